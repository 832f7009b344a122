//! Profile form. Numeric fields stay text while editing; coercion happens
//! wholesale on save and a bad field blocks the request with an inline
//! message.

use std::sync::Arc;

use ff_api::ApiClient;
use ff_app::{RequestState, profile_service};
use ff_model::{Profile, ProfileDraft};

use crate::fetch_worker::Fetch;

#[derive(Default)]
pub struct ProfileView {
    profile: Fetch<Profile>,
    save: Fetch<Profile>,
    draft: Option<ProfileDraft>,
    save_note: Option<String>,
}

impl ProfileView {
    pub fn show(&mut self, ui: &mut egui::Ui, client: &Arc<ApiClient>) {
        self.profile.poll();
        self.save.poll();

        if matches!(self.profile.state(), RequestState::Idle) {
            self.reload(client);
        }
        // Seed the draft from the first successful fetch; after that the
        // user's edits win.
        if self.draft.is_none() {
            if let Some(profile) = self.profile.state().value() {
                self.draft = Some(ProfileDraft::from_profile(profile));
            }
        }
        // A finished save refreshes the draft from the server's echo.
        if let RequestState::Ready(saved) = self.save.state() {
            self.draft = Some(ProfileDraft::from_profile(saved));
            self.save_note = Some("Profile saved.".to_string());
            self.save.reset();
        } else if let RequestState::Failed(message) = self.save.state() {
            self.save_note = Some(message.to_string());
            self.save.reset();
        }

        if self.profile.in_flight() || self.save.in_flight() {
            ui.ctx()
                .request_repaint_after(std::time::Duration::from_millis(150));
        }

        ui.horizontal(|ui| {
            ui.heading("Profile");
            ui.add_enabled_ui(!self.profile.in_flight() && !self.save.in_flight(), |ui| {
                if ui.button("Reload").clicked() {
                    self.draft = None;
                    self.save_note = None;
                    self.reload(client);
                }
            });
        });
        ui.separator();

        match (&mut self.draft, self.profile.state()) {
            (Some(_), _) => self.form(ui, client),
            (None, RequestState::Failed(message)) => {
                let message = message.to_string();
                ui.colored_label(egui::Color32::LIGHT_RED, &message);
                if ui.button("Retry").clicked() {
                    self.reload(client);
                }
            }
            (None, _) => {
                ui.spinner();
            }
        }
    }

    fn reload(&mut self, client: &Arc<ApiClient>) {
        let client = Arc::clone(client);
        self.profile
            .start(move || async move { profile_service::fetch_profile(&client).await });
    }

    fn form(&mut self, ui: &mut egui::Ui, client: &Arc<ApiClient>) {
        let Some(draft) = self.draft.as_mut() else {
            return;
        };
        let busy = self.save.in_flight();

        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.add_enabled_ui(!busy, |ui| {
                egui::Grid::new("profile_form")
                    .num_columns(2)
                    .spacing([12.0, 6.0])
                    .show(ui, |ui| {
                        text_row(ui, "Name", &mut draft.name);
                        text_row(ui, "Age", &mut draft.age);
                        text_row(ui, "Country", &mut draft.country_of_residence);
                        text_row(ui, "Marital status", &mut draft.marital_status);
                        text_row(ui, "Dependents", &mut draft.number_of_dependents);
                        text_row(ui, "Postal code", &mut draft.postal_code);
                        text_row(ui, "Monthly income", &mut draft.monthly_income);
                        text_row(ui, "Monthly expenses", &mut draft.monthly_expenses);
                        text_row(ui, "Cash balance", &mut draft.cash_balance);
                        text_row(ui, "Investments", &mut draft.investments);
                        text_row(ui, "Debt", &mut draft.debt);
                        text_row(ui, "RRSP savings", &mut draft.rrsp_savings);
                        text_row(ui, "TFSA savings", &mut draft.tfsa_savings);
                        text_row(
                            ui,
                            "Other retirement accounts",
                            &mut draft.other_retirement_accounts,
                        );
                        text_row(ui, "Investor type", &mut draft.investor_type);
                        text_row(ui, "Advisor preference", &mut draft.advisor_preference);
                        text_row(
                            ui,
                            "Desired retirement lifestyle",
                            &mut draft.desired_retirement_lifestyle,
                        );
                    });

                ui.checkbox(&mut draft.has_advisor, "I have a financial advisor");
                if draft.has_advisor {
                    egui::Grid::new("advisor_form")
                        .num_columns(2)
                        .spacing([12.0, 6.0])
                        .show(ui, |ui| {
                            text_row(ui, "Advisor name", &mut draft.advisor_name);
                            text_row(ui, "Advisor email", &mut draft.advisor_email_address);
                            text_row(ui, "Advisor company", &mut draft.advisor_company_name);
                        });
                }
            });

            ui.add_space(8.0);
            ui.add_enabled_ui(!busy, |ui| {
                if ui.button("Save").clicked() {
                    // Coerce locally first so junk never leaves the client.
                    match draft.to_update() {
                        Ok(_) => {
                            let client = Arc::clone(client);
                            let draft = draft.clone();
                            self.save_note = None;
                            self.save.start(move || async move {
                                profile_service::save_profile(&client, &draft).await
                            });
                        }
                        Err(e) => {
                            self.save_note = Some(e.to_string());
                        }
                    }
                }
            });
            if busy {
                ui.spinner();
            }
            if let Some(note) = &self.save_note {
                ui.label(note);
            }
        });
    }
}

fn text_row(ui: &mut egui::Ui, label: &str, value: &mut String) {
    ui.label(label);
    ui.text_edit_singleline(value);
    ui.end_row();
}
