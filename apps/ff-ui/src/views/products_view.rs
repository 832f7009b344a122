//! Product search: free-text query, fabricated progress while the agent
//! works, and the normalized product cards.

use std::sync::Arc;
use std::time::Instant;

use ff_api::ApiClient;
use ff_app::{RequestState, products_service, progress};
use ff_model::ProductCard;

use crate::fetch_worker::Fetch;

pub struct ProductsView {
    query: String,
    results: Fetch<Vec<ProductCard>>,
    started: Option<Instant>,
    timeline: progress::ProgressTimeline,
}

impl Default for ProductsView {
    fn default() -> Self {
        Self {
            query: String::new(),
            results: Fetch::default(),
            started: None,
            timeline: progress::product_search(),
        }
    }
}

impl ProductsView {
    pub fn show(&mut self, ui: &mut egui::Ui, client: &Arc<ApiClient>) {
        self.results.poll();
        if !self.results.in_flight() {
            // The real request settled (or never started); the fabricated
            // timeline stops being sampled immediately.
            self.started = None;
        }

        ui.heading("Products");
        ui.separator();

        let searching = self.results.in_flight();
        ui.horizontal(|ui| {
            ui.add_enabled_ui(!searching, |ui| {
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.query)
                        .hint_text("e.g. low-fee index funds for long-term growth")
                        .desired_width(420.0),
                );
                let submitted = response.lost_focus()
                    && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if (ui.button("Search").clicked() || submitted)
                    && !self.query.trim().is_empty()
                {
                    self.start_search(client);
                }
            });
        });

        if searching {
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
        match self.results.state() {
            RequestState::Idle | RequestState::Loading => {
                ui.label("Ask about investment products to see matches here.");
            }
            RequestState::Failed(message) => {
                let message = message.to_string();
                ui.colored_label(egui::Color32::LIGHT_RED, &message);
                if ui.button("Retry").clicked() {
                    self.start_search(client);
                }
            }
            RequestState::Ready(cards) if cards.is_empty() => {
                ui.label("No matching products. Try rephrasing your question.");
            }
            RequestState::Ready(cards) => {
                let cards = cards.clone();
                egui::ScrollArea::vertical().show(ui, |ui| {
                    for card in &cards {
                        product_card(ui, card);
                        ui.add_space(6.0);
                    }
                });
            }
        }
    }

    fn start_search(&mut self, client: &Arc<ApiClient>) {
        let client = Arc::clone(client);
        let query = self.query.trim().to_string();
        self.started = Some(Instant::now());
        self.results
            .start(move || async move { products_service::search(&client, &query).await });
    }
}

fn product_card(ui: &mut egui::Ui, card: &ProductCard) {
    ui.group(|ui| {
        ui.horizontal(|ui| {
            ui.strong(&card.name);
            ui.label(format!("({})", card.ticker));
        });
        ui.horizontal(|ui| {
            ui.label(&card.provider);
            ui.separator();
            ui.label(&card.category);
        });
        egui::Grid::new(("product_metrics", &card.ticker, &card.name))
            .num_columns(4)
            .show(ui, |ui| {
            ui.label("1y return");
            ui.label(format!("{:.2}%", card.performance.one_year));
            ui.label("Expense ratio");
            ui.label(format!("{:.2}%", card.expense_ratio));
            ui.end_row();
            ui.label("3y return");
            ui.label(format!("{:.2}%", card.performance.three_year));
            ui.label("Since inception");
            ui.label(format!("{:.2}%", card.performance.since_inception));
            ui.end_row();
        });
        if !card.description.is_empty() && card.description != "N/A" {
            ui.label(&card.description);
        }
        if !card.suitable_for.is_empty() && card.suitable_for != "N/A" {
            ui.small(format!("Suitable for: {}", card.suitable_for));
        }
    });
}
