//! Login screen plus the three-step password-reset flow.

use std::sync::Arc;

use ff_api::{ApiClient, endpoints::LoginResponse};
use ff_app::auth_service;

use crate::fetch_worker::FetchWorker;

#[derive(Debug, Clone, Copy, PartialEq)]
enum ResetStage {
    Email,
    Code,
    NewPassword,
}

enum LoginJob {
    SignIn(FetchWorker<LoginResponse>),
    Reset(FetchWorker<()>, ResetStage),
}

#[derive(Default)]
pub struct LoginView {
    email: String,
    password: String,
    reset_stage: Option<ResetStage>,
    reset_code: String,
    new_password: String,
    job: Option<LoginJob>,
    error: Option<String>,
    notice: Option<String>,
}

impl LoginView {
    /// Returns true once a login has settled successfully; the app switches
    /// to the main screen on that frame.
    pub fn show(&mut self, ui: &mut egui::Ui, client: &Arc<ApiClient>) -> bool {
        let signed_in = self.poll();

        ui.vertical_centered(|ui| {
            ui.add_space(80.0);
            ui.heading("Finflow");
            ui.add_space(20.0);

            let busy = self.job.is_some();
            ui.add_enabled_ui(!busy, |ui| match self.reset_stage {
                None => self.sign_in_form(ui, client),
                Some(stage) => self.reset_form(ui, client, stage),
            });

            if busy {
                ui.add_space(8.0);
                ui.spinner();
                ui.ctx().request_repaint_after(std::time::Duration::from_millis(100));
            }

            if let Some(notice) = &self.notice {
                ui.add_space(8.0);
                ui.label(notice);
            }
            if let Some(error) = &self.error {
                ui.add_space(8.0);
                ui.colored_label(egui::Color32::LIGHT_RED, error);
            }
        });

        signed_in
    }

    fn sign_in_form(&mut self, ui: &mut egui::Ui, client: &Arc<ApiClient>) {
        egui::Grid::new("login_form").num_columns(2).show(ui, |ui| {
            ui.label("Email");
            ui.text_edit_singleline(&mut self.email);
            ui.end_row();
            ui.label("Password");
            ui.add(egui::TextEdit::singleline(&mut self.password).password(true));
            ui.end_row();
        });
        ui.add_space(8.0);

        if ui.button("Sign in").clicked() {
            let client = Arc::clone(client);
            let email = self.email.clone();
            let password = self.password.clone();
            self.error = None;
            self.notice = None;
            self.job = Some(LoginJob::SignIn(FetchWorker::spawn(move || async move {
                auth_service::login(&client, &email, &password).await
            })));
        }

        if ui.link("Forgot password?").clicked() {
            self.reset_stage = Some(ResetStage::Email);
            self.error = None;
            self.notice = None;
        }
    }

    fn reset_form(&mut self, ui: &mut egui::Ui, client: &Arc<ApiClient>, stage: ResetStage) {
        match stage {
            ResetStage::Email => {
                ui.label("Enter your account email to receive a reset code.");
                ui.text_edit_singleline(&mut self.email);
                ui.add_space(8.0);
                if ui.button("Send code").clicked() {
                    let client = Arc::clone(client);
                    let email = self.email.clone();
                    self.start_reset_step(stage, move || async move {
                        auth_service::request_reset_code(&client, &email).await
                    });
                }
            }
            ResetStage::Code => {
                ui.label("Enter the code from the email.");
                ui.text_edit_singleline(&mut self.reset_code);
                ui.add_space(8.0);
                if ui.button("Verify code").clicked() {
                    let client = Arc::clone(client);
                    let email = self.email.clone();
                    let code = self.reset_code.clone();
                    self.start_reset_step(stage, move || async move {
                        auth_service::verify_reset_code(&client, &email, &code).await
                    });
                }
            }
            ResetStage::NewPassword => {
                ui.label("Choose a new password.");
                ui.add(egui::TextEdit::singleline(&mut self.new_password).password(true));
                ui.add_space(8.0);
                if ui.button("Reset password").clicked() {
                    let client = Arc::clone(client);
                    let email = self.email.clone();
                    let code = self.reset_code.clone();
                    let password = self.new_password.clone();
                    self.start_reset_step(stage, move || async move {
                        auth_service::reset_password(&client, &email, &code, &password).await
                    });
                }
            }
        }

        if ui.link("Back to sign in").clicked() {
            self.cancel_reset();
        }
    }

    fn start_reset_step<F, Fut>(&mut self, stage: ResetStage, task: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ff_app::AppResult<()>>,
    {
        self.error = None;
        self.notice = None;
        self.job = Some(LoginJob::Reset(FetchWorker::spawn(task), stage));
    }

    fn cancel_reset(&mut self) {
        self.reset_stage = None;
        self.reset_code.clear();
        self.new_password.clear();
        self.error = None;
        self.notice = None;
    }

    fn poll(&mut self) -> bool {
        let Some(job) = &self.job else {
            return false;
        };
        match job {
            LoginJob::SignIn(worker) => {
                if let Some(result) = worker.try_take() {
                    self.job = None;
                    match result {
                        Ok(_) => {
                            self.password.clear();
                            return true;
                        }
                        Err(e) => self.error = Some(e.user_message()),
                    }
                }
            }
            LoginJob::Reset(worker, stage) => {
                let stage = *stage;
                if let Some(result) = worker.try_take() {
                    self.job = None;
                    match result {
                        Ok(()) => match stage {
                            ResetStage::Email => {
                                self.notice = Some("Code sent. Check your inbox.".to_string());
                                self.reset_stage = Some(ResetStage::Code);
                            }
                            ResetStage::Code => {
                                self.reset_stage = Some(ResetStage::NewPassword);
                            }
                            ResetStage::NewPassword => {
                                self.cancel_reset();
                                self.notice =
                                    Some("Password updated. Sign in with it.".to_string());
                            }
                        },
                        Err(e) => self.error = Some(e.user_message()),
                    }
                }
            }
        }
        false
    }
}
