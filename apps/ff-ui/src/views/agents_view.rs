//! Agent tools: portfolio analyst, time machine, and the financial team.
//! All three share the report renderer and a staged progress display.

use std::sync::Arc;
use std::time::Instant;

use ff_api::ApiClient;
use ff_app::{RequestState, agents_service, progress};
use ff_model::{AgentReport, TimeMachineRequest};

use crate::fetch_worker::Fetch;

#[derive(Debug, Clone, Copy, PartialEq)]
enum AgentTab {
    Analyst,
    TimeMachine,
    Team,
}

pub struct AgentsView {
    tab: AgentTab,
    analyst_query: String,
    team_query: String,
    time_machine: TimeMachineRequest,
    report: Fetch<AgentReport>,
    started: Option<Instant>,
    timeline: progress::ProgressTimeline,
}

impl Default for AgentsView {
    fn default() -> Self {
        Self {
            tab: AgentTab::Analyst,
            analyst_query: String::new(),
            team_query: String::new(),
            time_machine: TimeMachineRequest::default(),
            report: Fetch::default(),
            started: None,
            timeline: progress::analyst(),
        }
    }
}

impl AgentsView {
    pub fn show(&mut self, ui: &mut egui::Ui, client: &Arc<ApiClient>) {
        self.report.poll();
        if !self.report.in_flight() {
            self.started = None;
        }

        ui.heading("Agents");
        ui.horizontal(|ui| {
            ui.selectable_value(&mut self.tab, AgentTab::Analyst, "Analyst");
            ui.selectable_value(&mut self.tab, AgentTab::TimeMachine, "Time machine");
            ui.selectable_value(&mut self.tab, AgentTab::Team, "Financial team");
        });
        ui.separator();

        let busy = self.report.in_flight();
        ui.add_enabled_ui(!busy, |ui| match self.tab {
            AgentTab::Analyst => self.analyst_form(ui, client),
            AgentTab::TimeMachine => self.time_machine_form(ui, client),
            AgentTab::Team => self.team_form(ui, client),
        });

        if busy {
            if let Some(started) = self.started {
                let sample = self.timeline.sample(started.elapsed());
                ui.add_space(8.0);
                ui.label(sample.label);
                ui.add(
                    egui::ProgressBar::new(sample.percent / 100.0)
                        .show_percentage()
                        .desired_width(420.0),
                );
            }
            ui.ctx()
                .request_repaint_after(std::time::Duration::from_millis(100));
            return;
        }

        ui.add_space(8.0);
        match self.report.state() {
            RequestState::Idle | RequestState::Loading => {}
            RequestState::Failed(message) => {
                ui.colored_label(egui::Color32::LIGHT_RED, message);
            }
            RequestState::Ready(report) => {
                render_report(ui, report);
            }
        }
    }

    fn analyst_form(&mut self, ui: &mut egui::Ui, client: &Arc<ApiClient>) {
        ui.label("Ask the analyst about your portfolio:");
        ui.add(
            egui::TextEdit::multiline(&mut self.analyst_query)
                .desired_rows(3)
                .desired_width(480.0),
        );
        if ui.button("Analyze").clicked() && !self.analyst_query.trim().is_empty() {
            let client = Arc::clone(client);
            let query = self.analyst_query.trim().to_string();
            self.begin(progress::analyst());
            self.report
                .start(move || async move { agents_service::analyst(&client, &query).await });
        }
    }

    fn time_machine_form(&mut self, ui: &mut egui::Ui, client: &Arc<ApiClient>) {
        ui.label("Replay a past financial decision:");
        egui::Grid::new("tm_grid").num_columns(2).show(ui, |ui| {
            ui.label("Decision");
            ui.text_edit_singleline(&mut self.time_machine.decision_description);
            ui.end_row();
            ui.label("Amount");
            ui.add(
                egui::DragValue::new(&mut self.time_machine.decision_amount)
                    .speed(100.0)
                    .prefix("$"),
            );
            ui.end_row();
            ui.label("Years ago");
            ui.add(egui::DragValue::new(&mut self.time_machine.timeframe_years).range(1..=40));
            ui.end_row();
        });
        if ui.button("Run the time machine").clicked()
            && !self.time_machine.decision_description.trim().is_empty()
        {
            let client = Arc::clone(client);
            let request = self.time_machine.clone();
            self.begin(progress::time_machine());
            self.report
                .start(move || async move { agents_service::time_machine(&client, &request).await });
        }
    }

    fn team_form(&mut self, ui: &mut egui::Ui, client: &Arc<ApiClient>) {
        ui.label("Ask the whole team a planning question:");
        ui.add(
            egui::TextEdit::multiline(&mut self.team_query)
                .desired_rows(3)
                .desired_width(480.0),
        );
        if ui.button("Ask the team").clicked() && !self.team_query.trim().is_empty() {
            let client = Arc::clone(client);
            let query = self.team_query.trim().to_string();
            self.begin(progress::financial_team());
            self.report
                .start(move || async move { agents_service::financial_team(&client, &query).await });
        }
    }

    fn begin(&mut self, timeline: progress::ProgressTimeline) {
        self.timeline = timeline;
        self.started = Some(Instant::now());
    }
}

fn render_report(ui: &mut egui::Ui, report: &AgentReport) {
    if report.is_empty() {
        ui.label("The agent returned an empty answer. Try again.");
        return;
    }
    egui::ScrollArea::vertical().show(ui, |ui| {
        if report.sections.is_empty() {
            // Prose answer with no recognizable structure.
            ui.label(&report.raw_text);
        }
        for section in &report.sections {
            if !section.heading.is_empty() {
                ui.strong(&section.heading);
            }
            ui.label(&section.body);
            ui.add_space(6.0);
        }
        if let Some(url) = &report.image_url {
            ui.hyperlink_to("Open visualization", url);
        }
    });
}
