//! Admin workflow: upload a fund fact sheet, review the extracted asset
//! allocation, correct it, and save. Only reachable when the admin probe
//! says yes.

use std::path::PathBuf;
use std::sync::Arc;

use egui_extras::{Column, TableBuilder};
use egui_file_dialog::{DialogMode, FileDialog};
use ff_api::ApiClient;
use ff_app::{AppError, RequestState, admin_service};
use ff_model::{AssetAllocation, AssetAllocationSave};

use crate::fetch_worker::Fetch;

pub struct AdminView {
    file_dialog: FileDialog,
    picked_file: Option<PathBuf>,
    extraction: Fetch<AssetAllocation>,
    save: Fetch<()>,
    allocation: Option<AssetAllocation>,
    investment_product_id: i64,
    note: Option<String>,
}

impl Default for AdminView {
    fn default() -> Self {
        Self {
            file_dialog: FileDialog::new(),
            picked_file: None,
            extraction: Fetch::default(),
            save: Fetch::default(),
            allocation: None,
            investment_product_id: 0,
            note: None,
        }
    }
}

impl AdminView {
    pub fn show(&mut self, ui: &mut egui::Ui, client: &Arc<ApiClient>) {
        self.extraction.poll();
        self.save.poll();

        if let RequestState::Ready(extracted) = self.extraction.state() {
            self.allocation = Some(extracted.clone());
            self.extraction.reset();
        }
        match self.save.state() {
            RequestState::Ready(()) => {
                self.note = Some("Allocation saved.".to_string());
                self.save.reset();
            }
            RequestState::Failed(message) => {
                self.note = Some(message.to_string());
                self.save.reset();
            }
            _ => {}
        }

        if self.extraction.in_flight() || self.save.in_flight() {
            ui.ctx()
                .request_repaint_after(std::time::Duration::from_millis(150));
        }

        ui.heading("Admin: fund intake");
        ui.separator();

        let busy = self.extraction.in_flight() || self.save.in_flight();
        ui.add_enabled_ui(!busy, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Pick fact sheet PDF").clicked() {
                    let _ = self.file_dialog.open(DialogMode::SelectFile, true, None);
                }
                if let Some(path) = &self.picked_file {
                    ui.label(path.display().to_string());
                    if ui.button("Extract").clicked() {
                        self.start_extract(client);
                    }
                }
            });
        });

        self.file_dialog.update(ui.ctx());
        if let Some(path) = self.file_dialog.take_selected() {
            self.picked_file = Some(path.to_path_buf());
        }

        if self.extraction.in_flight() {
            ui.spinner();
            ui.label("Extracting allocation from the fact sheet…");
        }
        if let RequestState::Failed(message) = self.extraction.state() {
            ui.colored_label(egui::Color32::LIGHT_RED, message);
        }

        if self.allocation.is_some() {
            ui.add_space(10.0);
            self.allocation_editor(ui, client, busy);
        }
        if let Some(note) = &self.note {
            ui.add_space(6.0);
            ui.label(note);
        }
    }

    fn start_extract(&mut self, client: &Arc<ApiClient>) {
        let Some(path) = self.picked_file.clone() else {
            return;
        };
        let client = Arc::clone(client);
        self.note = None;
        self.extraction.start(move || async move {
            let bytes = tokio::fs::read(&path)
                .await
                .map_err(|e| AppError::InvalidInput(format!("could not read {}: {e}", path.display())))?;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "factsheet.pdf".to_string());
            admin_service::extract_allocation(&client, &file_name, bytes).await
        });
    }

    fn allocation_editor(&mut self, ui: &mut egui::Ui, client: &Arc<ApiClient>, busy: bool) {
        let Some(allocation) = self.allocation.as_mut() else {
            return;
        };

        ui.strong("Extracted allocation (review before saving)");
        ui.add_enabled_ui(!busy, |ui| {
            ui.horizontal(|ui| {
                ui.label("Product symbol");
                ui.text_edit_singleline(&mut allocation.product_symbol);
                ui.label("Product id");
                ui.add(egui::DragValue::new(&mut self.investment_product_id).range(0..=i64::MAX));
            });

            TableBuilder::new(ui)
                .striped(true)
                .column(Column::auto().at_least(220.0))
                .column(Column::remainder())
                .header(20.0, |mut header| {
                    header.col(|ui| {
                        ui.strong("Asset class");
                    });
                    header.col(|ui| {
                        ui.strong("Share (%)");
                    });
                })
                .body(|mut body| {
                    for (name, value) in allocation.fields_mut() {
                        body.row(22.0, |mut row| {
                            row.col(|ui| {
                                ui.label(name);
                            });
                            row.col(|ui| {
                                ui.add(
                                    egui::DragValue::new(value)
                                        .speed(0.5)
                                        .range(0.0..=100.0)
                                        .suffix("%"),
                                );
                            });
                        });
                    }
                });

            let total: f64 = allocation.fields().iter().map(|(_, v)| v).sum();
            ui.label(format!("Total: {total:.1}%"));

            if ui.button("Save allocation").clicked() {
                let save = AssetAllocationSave {
                    investment_product_id: self.investment_product_id,
                    allocations: allocation.clone(),
                };
                match save.allocations.validate() {
                    Ok(()) => {
                        let client = Arc::clone(client);
                        self.note = None;
                        self.save.start(move || async move {
                            admin_service::save_allocation(&client, &save).await
                        });
                    }
                    Err(e) => self.note = Some(e.to_string()),
                }
            }
        });
    }
}
