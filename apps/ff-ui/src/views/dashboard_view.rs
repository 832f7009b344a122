//! Dashboard: financial assessment cards, retirement health summary, and
//! saved recommendations with feedback.

use std::sync::Arc;

use ff_api::ApiClient;
use ff_app::{RequestState, profile_service, retirement_service};
use ff_model::{FinancialAssessment, RecommendationResponse, RetirementHealth};

use crate::fetch_worker::{Fetch, FetchWorker};

#[derive(Default)]
pub struct DashboardView {
    assessment: Fetch<FinancialAssessment>,
    health: Fetch<RetirementHealth>,
    recommendations: Fetch<RecommendationResponse>,
    feedback: Option<FetchWorker<()>>,
    feedback_note: Option<String>,
}

impl DashboardView {
    pub fn show(&mut self, ui: &mut egui::Ui, client: &Arc<ApiClient>) {
        self.assessment.poll();
        self.health.poll();
        self.recommendations.poll();
        if let Some(worker) = &self.feedback {
            if let Some(result) = worker.try_take() {
                self.feedback = None;
                self.feedback_note = Some(match result {
                    Ok(()) => "Thanks for the feedback.".to_string(),
                    Err(e) => e.user_message(),
                });
            }
        }

        // First visit: kick everything off at once.
        if matches!(self.assessment.state(), RequestState::Idle) {
            self.refresh(client, false, false);
        }

        if self.assessment.in_flight()
            || self.health.in_flight()
            || self.recommendations.in_flight()
            || self.feedback.is_some()
        {
            ui.ctx()
                .request_repaint_after(std::time::Duration::from_millis(150));
        }

        ui.horizontal(|ui| {
            ui.heading("Dashboard");
            let busy = self.assessment.in_flight() || self.recommendations.in_flight();
            ui.add_enabled_ui(!busy, |ui| {
                if ui.button("Refresh").clicked() {
                    self.refresh(client, true, false);
                }
            });
        });
        ui.separator();

        egui::ScrollArea::vertical().show(ui, |ui| {
            self.assessment_section(ui);
            ui.add_space(12.0);
            self.health_section(ui);
            ui.add_space(12.0);
            self.recommendation_section(ui, client);
        });
    }

    fn refresh(&mut self, client: &Arc<ApiClient>, force_refresh: bool, force_new: bool) {
        {
            let client = Arc::clone(client);
            self.assessment.start(move || async move {
                profile_service::financial_assessment(&client, force_refresh).await
            });
        }
        {
            let client = Arc::clone(client);
            self.health
                .start(move || async move { retirement_service::health(&client).await });
        }
        {
            let client = Arc::clone(client);
            self.recommendations.start(move || async move {
                retirement_service::recommendations(&client, force_new).await
            });
        }
    }

    fn assessment_section(&mut self, ui: &mut egui::Ui) {
        ui.strong("Financial assessment");
        match self.assessment.state() {
            RequestState::Idle | RequestState::Loading => {
                ui.spinner();
            }
            RequestState::Failed(message) => {
                ui.colored_label(egui::Color32::LIGHT_RED, message);
            }
            RequestState::Ready(assessment) => {
                ui.horizontal_wrapped(|ui| {
                    for (label, dimension) in assessment.dimensions() {
                        ui.group(|ui| {
                            ui.set_min_width(220.0);
                            ui.vertical(|ui| {
                                ui.strong(label);
                                ui.colored_label(
                                    status_color(&dimension.status),
                                    &dimension.status,
                                );
                                for line in &dimension.strengths {
                                    ui.label(format!("+ {line}"));
                                }
                                for line in &dimension.areas_for_improvement {
                                    ui.label(format!("- {line}"));
                                }
                            });
                        });
                    }
                });
            }
        }
    }

    fn health_section(&mut self, ui: &mut egui::Ui) {
        ui.strong("Retirement health");
        match self.health.state() {
            RequestState::Idle | RequestState::Loading => {
                ui.spinner();
            }
            RequestState::Failed(message) => {
                ui.colored_label(egui::Color32::LIGHT_RED, message);
            }
            RequestState::Ready(health) => {
                ui.horizontal(|ui| {
                    ui.colored_label(status_color(&health.status), &health.status);
                    ui.add(
                        egui::ProgressBar::new((health.progress / 100.0) as f32)
                            .show_percentage()
                            .desired_width(180.0),
                    );
                });
                for (name, item) in &health.checklist {
                    let done = item.status.eq_ignore_ascii_case("complete")
                        || item.status.eq_ignore_ascii_case("on_track");
                    let title = if item.title.is_empty() { name } else { &item.title };
                    ui.label(format!("{} {}", if done { "☑" } else { "☐" }, title));
                    if !item.message.is_empty() {
                        ui.small(&item.message);
                    }
                }
                if !health.missing_fields.is_empty() {
                    ui.label(format!("Missing: {}", health.missing_fields.join(", ")));
                }
                if let Some(message) = &health.message {
                    ui.label(message);
                }
            }
        }
    }

    fn recommendation_section(&mut self, ui: &mut egui::Ui, client: &Arc<ApiClient>) {
        ui.horizontal(|ui| {
            ui.strong("Recommendations");
            ui.add_enabled_ui(!self.recommendations.in_flight(), |ui| {
                if ui.button("Get new").clicked() {
                    let task_client = Arc::clone(client);
                    self.recommendations.start(move || async move {
                        retirement_service::recommendations(&task_client, true).await
                    });
                }
            });
        });

        let mut feedback_request: Option<(String, &'static str)> = None;
        match self.recommendations.state() {
            RequestState::Idle | RequestState::Loading => {
                ui.spinner();
            }
            RequestState::Failed(message) => {
                ui.colored_label(egui::Color32::LIGHT_RED, message);
            }
            RequestState::Ready(response) => {
                if !response.has_recommendation || response.recommendations.is_empty() {
                    ui.label(
                        response
                            .message
                            .as_deref()
                            .unwrap_or("No recommendations yet."),
                    );
                } else {
                    for rec in &response.recommendations {
                        ui.group(|ui| {
                            ui.strong(&rec.recommended_symbol);
                            ui.label(&rec.recommended_rationale);
                            if let Some(id) = rec.id {
                                ui.horizontal(|ui| {
                                    ui.add_enabled_ui(self.feedback.is_none(), |ui| {
                                        if ui.button("Helpful").clicked() {
                                            feedback_request =
                                                Some((id.to_string(), "positive"));
                                        }
                                        if ui.button("Not helpful").clicked() {
                                            feedback_request =
                                                Some((id.to_string(), "negative"));
                                        }
                                    });
                                });
                            }
                        });
                    }
                }
            }
        }

        if let Some((id, verdict)) = feedback_request {
            let client = Arc::clone(client);
            self.feedback_note = None;
            self.feedback = Some(FetchWorker::spawn(move || async move {
                retirement_service::send_feedback(&client, &id, verdict, None).await
            }));
        }
        if let Some(note) = &self.feedback_note {
            ui.label(note);
        }
    }
}

fn status_color(status: &str) -> egui::Color32 {
    match status.to_ascii_lowercase().as_str() {
        "excellent" | "good" | "on_track" | "on track" => egui::Color32::LIGHT_GREEN,
        "fair" | "needs_attention" | "needs attention" => egui::Color32::YELLOW,
        "poor" | "critical" | "off_track" | "off track" => egui::Color32::LIGHT_RED,
        _ => egui::Color32::GRAY,
    }
}
