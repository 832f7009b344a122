use std::sync::Arc;

use ff_api::ApiClient;
use ff_app::{auth_service, gate, GateDecision, admin_service};

use crate::fetch_worker::FetchWorker;
use crate::views::{
    AdminView, AgentsView, DashboardView, LoginView, ProductsView, ProfileView, RetirementView,
};

#[derive(Debug, Clone, Copy, PartialEq)]
enum ViewTab {
    Dashboard,
    Profile,
    Retirement,
    Products,
    Agents,
    Admin,
}

pub struct FinflowApp {
    client: Arc<ApiClient>,
    active_view: ViewTab,
    login_view: LoginView,
    dashboard_view: DashboardView,
    profile_view: ProfileView,
    retirement_view: RetirementView,
    products_view: ProductsView,
    agents_view: AgentsView,
    admin_view: AdminView,
    // None until the probe settles; the admin tab is hidden meanwhile.
    is_admin: Option<bool>,
    admin_probe: Option<FetchWorker<bool>>,
    status: Option<String>,
}

impl FinflowApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, client: Arc<ApiClient>) -> Self {
        let mut app = Self {
            client,
            active_view: ViewTab::Dashboard,
            login_view: LoginView::default(),
            dashboard_view: DashboardView::default(),
            profile_view: ProfileView::default(),
            retirement_view: RetirementView::default(),
            products_view: ProductsView::default(),
            agents_view: AgentsView::default(),
            admin_view: AdminView::default(),
            is_admin: None,
            admin_probe: None,
            status: None,
        };
        if app.client.session().is_authenticated() {
            app.start_admin_probe();
        }
        app
    }

    fn start_admin_probe(&mut self) {
        let client = Arc::clone(&self.client);
        self.is_admin = None;
        self.admin_probe = Some(FetchWorker::spawn(move || async move {
            Ok(admin_service::check_admin(&client).await)
        }));
    }

    fn poll_admin_probe(&mut self) {
        if let Some(worker) = &self.admin_probe {
            if let Some(result) = worker.try_take() {
                self.admin_probe = None;
                // The probe itself reports false on error; a worker failure
                // gets the same closed-gate treatment.
                self.is_admin = Some(result.unwrap_or(false));
            }
        }
    }

    fn on_signed_in(&mut self) {
        self.active_view = ViewTab::Dashboard;
        self.status = self
            .client
            .session()
            .email()
            .map(|email| format!("Signed in as {email}"));
        self.start_admin_probe();
    }

    fn sign_out(&mut self) {
        if let Err(e) = auth_service::logout(&self.client) {
            self.status = Some(e.user_message());
        } else {
            self.status = Some("Signed out.".to_string());
        }
        // Teardown: fresh view state, nothing fetched for the next user
        // survives, workers are dropped and their late results discarded.
        self.dashboard_view = DashboardView::default();
        self.profile_view = ProfileView::default();
        self.retirement_view = RetirementView::default();
        self.products_view = ProductsView::default();
        self.agents_view = AgentsView::default();
        self.admin_view = AdminView::default();
        self.is_admin = None;
        self.admin_probe = None;
        self.active_view = ViewTab::Dashboard;
    }
}

impl eframe::App for FinflowApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_admin_probe();
        if self.admin_probe.is_some() {
            ctx.request_repaint_after(std::time::Duration::from_millis(200));
        }

        // Session gate before anything renders or fetches.
        let authenticated = self.client.session().is_authenticated();
        if gate::decide(authenticated, false, false) == GateDecision::RedirectLogin {
            let client = Arc::clone(&self.client);
            let signed_in = egui::CentralPanel::default()
                .show(ctx, |ui| self.login_view.show(ui, &client))
                .inner;
            if signed_in {
                self.on_signed_in();
            }
            return;
        }

        egui::TopBottomPanel::top("tabs").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.active_view, ViewTab::Dashboard, "Dashboard");
                ui.selectable_value(&mut self.active_view, ViewTab::Profile, "Profile");
                ui.selectable_value(&mut self.active_view, ViewTab::Retirement, "Retirement");
                ui.selectable_value(&mut self.active_view, ViewTab::Products, "Products");
                ui.selectable_value(&mut self.active_view, ViewTab::Agents, "Agents");
                if self.is_admin == Some(true) {
                    ui.selectable_value(&mut self.active_view, ViewTab::Admin, "Admin");
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Sign out").clicked() {
                        self.sign_out();
                    }
                    if let Some(email) = self.client.session().email() {
                        ui.label(email);
                    }
                });
            });
        });

        if let Some(status) = self.status.clone() {
            egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(status);
                    if ui.small_button("✕").clicked() {
                        self.status = None;
                    }
                });
            });
        }

        // The session can have been invalidated by sign_out above.
        if !self.client.session().is_authenticated() {
            return;
        }

        // Admin tab gate: fails closed while the probe is unsettled.
        if self.active_view == ViewTab::Admin && self.is_admin != Some(true) {
            self.active_view = ViewTab::Dashboard;
        }

        let client = Arc::clone(&self.client);
        egui::CentralPanel::default().show(ctx, |ui| match self.active_view {
            ViewTab::Dashboard => self.dashboard_view.show(ui, &client),
            ViewTab::Profile => self.profile_view.show(ui, &client),
            ViewTab::Retirement => self.retirement_view.show(ui, &client),
            ViewTab::Products => self.products_view.show(ui, &client),
            ViewTab::Agents => self.agents_view.show(ui, &client),
            ViewTab::Admin => self.admin_view.show(ui, &client),
        });
    }
}
