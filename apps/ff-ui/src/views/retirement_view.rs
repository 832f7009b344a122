//! Retirement planning: the current plan, the what-if form, and the
//! projected-savings chart.

use std::sync::Arc;

use egui_plot::{Legend, Line, Plot, PlotPoints};
use ff_api::ApiClient;
use ff_app::{RequestState, retirement_service};
use ff_model::{RetirementPlan, WhatIfRequest, WhatIfResponse};

use crate::fetch_worker::Fetch;

pub struct RetirementView {
    plan: Fetch<RetirementPlan>,
    projection: Fetch<WhatIfResponse>,
    request: WhatIfRequest,
    form_error: Option<String>,
}

impl Default for RetirementView {
    fn default() -> Self {
        Self {
            plan: Fetch::default(),
            projection: Fetch::default(),
            request: WhatIfRequest::default(),
            form_error: None,
        }
    }
}

impl RetirementView {
    pub fn show(&mut self, ui: &mut egui::Ui, client: &Arc<ApiClient>) {
        self.plan.poll();
        self.projection.poll();

        if matches!(self.plan.state(), RequestState::Idle) {
            let task_client = Arc::clone(client);
            self.plan
                .start(move || async move { retirement_service::current_plan(&task_client).await });
        }
        if self.plan.in_flight() || self.projection.in_flight() {
            ui.ctx()
                .request_repaint_after(std::time::Duration::from_millis(150));
        }

        ui.heading("Retirement");
        ui.separator();

        egui::ScrollArea::vertical().show(ui, |ui| {
            self.plan_section(ui);
            ui.add_space(12.0);
            self.what_if_form(ui, client);
            ui.add_space(12.0);
            self.projection_section(ui);
        });
    }

    fn plan_section(&mut self, ui: &mut egui::Ui) {
        ui.strong("Current plan");
        match self.plan.state() {
            RequestState::Idle | RequestState::Loading => {
                ui.spinner();
            }
            RequestState::Failed(message) => {
                ui.colored_label(egui::Color32::LIGHT_RED, message);
            }
            RequestState::Ready(plan) => {
                egui::Grid::new("plan_grid")
                    .num_columns(4)
                    .spacing([16.0, 4.0])
                    .show(ui, |ui| {
                        ui.label("Current age");
                        ui.label(plan.current_age.to_string());
                        ui.label("Retirement age");
                        ui.label(plan.retirement_age.to_string());
                        ui.end_row();

                        ui.label("Years until retirement");
                        ui.label(plan.years_until_retirement.to_string());
                        ui.label("Years in retirement");
                        ui.label(plan.years_in_retirement.to_string());
                        ui.end_row();

                        ui.label("Current savings");
                        ui.label(format!("${:.0}", plan.current_savings));
                        ui.label("Monthly contribution");
                        ui.label(format!("${:.0}", plan.monthly_contribution));
                        ui.end_row();

                        ui.label("Projected savings");
                        ui.label(format!("${:.0}", plan.projected_savings));
                        ui.label("Required savings");
                        ui.label(format!("${:.0}", plan.required_savings));
                        ui.end_row();

                        ui.label("Savings gap");
                        let gap_color = if plan.savings_gap > 0.0 {
                            egui::Color32::LIGHT_RED
                        } else {
                            egui::Color32::LIGHT_GREEN
                        };
                        ui.colored_label(gap_color, format!("${:.0}", plan.savings_gap));
                        ui.label("Government benefits / mo");
                        ui.label(format!("${:.0}", plan.government_benefits));
                        ui.end_row();
                    });
            }
        }
    }

    fn what_if_form(&mut self, ui: &mut egui::Ui, client: &Arc<ApiClient>) {
        ui.strong("What-if projection");
        let busy = self.projection.in_flight();
        ui.add_enabled_ui(!busy, |ui| {
            egui::Grid::new("what_if_grid")
                .num_columns(4)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    ui.label("Current age");
                    ui.add(egui::DragValue::new(&mut self.request.current_age).range(18..=74));
                    ui.label("Retirement age");
                    ui.add(egui::DragValue::new(&mut self.request.retirement_age).range(55..=75));
                    ui.end_row();

                    ui.label("Life expectancy");
                    ui.add(egui::DragValue::new(&mut self.request.life_expectancy).range(56..=110));
                    ui.label("Current savings");
                    ui.add(
                        egui::DragValue::new(&mut self.request.current_savings)
                            .speed(1000.0)
                            .prefix("$"),
                    );
                    ui.end_row();

                    ui.label("Monthly contribution");
                    ui.add(
                        egui::DragValue::new(&mut self.request.monthly_contribution)
                            .speed(50.0)
                            .prefix("$"),
                    );
                    ui.label("Expected return");
                    ui.add(
                        egui::DragValue::new(&mut self.request.expected_return_rate)
                            .speed(0.1)
                            .suffix("%"),
                    );
                    ui.end_row();

                    ui.label("Inflation");
                    ui.add(
                        egui::DragValue::new(&mut self.request.inflation_rate)
                            .speed(0.1)
                            .suffix("%"),
                    );
                    ui.label("Desired income / mo");
                    ui.add(
                        egui::DragValue::new(&mut self.request.desired_retirement_income)
                            .speed(100.0)
                            .prefix("$"),
                    );
                    ui.end_row();
                });
            ui.checkbox(&mut self.request.include_cpp_oas, "Include CPP & OAS");

            if ui.button("Project").clicked() {
                match self.request.validate() {
                    Ok(()) => {
                        self.form_error = None;
                        let client = Arc::clone(client);
                        let request = self.request.clone();
                        self.projection.start(move || async move {
                            retirement_service::run_what_if(&client, &request).await
                        });
                    }
                    Err(e) => self.form_error = Some(e.to_string()),
                }
            }
        });
        if let Some(message) = &self.form_error {
            ui.colored_label(egui::Color32::LIGHT_RED, message);
        }
    }

    fn projection_section(&mut self, ui: &mut egui::Ui) {
        match self.projection.state() {
            RequestState::Idle => {}
            RequestState::Loading => {
                ui.spinner();
            }
            RequestState::Failed(message) => {
                ui.colored_label(egui::Color32::LIGHT_RED, message);
            }
            RequestState::Ready(projection) => {
                if projection.savings_by_year.is_empty() {
                    ui.label("No projection data returned.");
                } else {
                    let points: Vec<[f64; 2]> = projection
                        .savings_by_year
                        .iter()
                        .map(|p| [f64::from(p.year), p.amount])
                        .collect();
                    let plot_points: PlotPoints = points.into();
                    let line = Line::new(plot_points).name("Projected savings");
                    Plot::new("savings_plot")
                        .legend(Legend::default())
                        .x_axis_label("Year")
                        .y_axis_label("Savings ($)")
                        .height(260.0)
                        .show(ui, |plot_ui| {
                            plot_ui.line(line);
                        });
                }

                if !projection.monthly_income_breakdown.is_empty() {
                    ui.add_space(8.0);
                    ui.strong("Monthly income in retirement");
                    for (source, amount) in &projection.monthly_income_breakdown {
                        ui.label(format!("{}: ${amount:.0}", humanize(source)));
                    }
                }
            }
        }
    }
}

fn humanize(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for (i, part) in key.split('_').enumerate() {
        if i > 0 {
            out.push(' ');
        }
        if i == 0 {
            let mut chars = part.chars();
            if let Some(first) = chars.next() {
                out.extend(first.to_uppercase());
                out.push_str(chars.as_str());
            }
        } else {
            out.push_str(part);
        }
    }
    out
}
