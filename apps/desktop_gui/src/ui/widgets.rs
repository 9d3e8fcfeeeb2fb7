//! Modal dialogs for viewing, editing, and deleting a user.

use eframe::egui;
use shared::domain::User;

use crate::controller::reducer::{DraftField, UserDraft};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogOutcome {
    Open,
    Confirm,
    Dismiss,
}

fn detail_row(ui: &mut egui::Ui, label: &str, value: &str) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(format!("{label}:")).strong());
        ui.label(value);
    });
}

fn dialog_buttons(
    ui: &mut egui::Ui,
    dismiss_label: &str,
    confirm_label: Option<&str>,
) -> DialogOutcome {
    let mut outcome = DialogOutcome::Open;
    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
        if let Some(confirm_label) = confirm_label {
            if ui.button(confirm_label).clicked() {
                outcome = DialogOutcome::Confirm;
            }
        }
        if ui.button(dismiss_label).clicked() {
            outcome = DialogOutcome::Dismiss;
        }
    });
    outcome
}

fn resolve(outcome: DialogOutcome, should_close: bool) -> DialogOutcome {
    match outcome {
        DialogOutcome::Open if should_close => DialogOutcome::Dismiss,
        other => other,
    }
}

/// Shows every stored field, password and remember token included, in plaintext.
pub fn user_details_modal(ctx: &egui::Context, user: Option<&User>) -> DialogOutcome {
    let response = egui::Modal::new(egui::Id::new("user_details_modal")).show(ctx, |ui| {
        ui.set_width(380.0);
        ui.heading("User Details");
        ui.separator();
        match user {
            Some(user) => {
                detail_row(ui, "ID", &user.id.to_string());
                detail_row(ui, "Name", &user.name);
                detail_row(ui, "Email", &user.email);
                detail_row(ui, "Phone", user.phone.as_deref().unwrap_or_default());
                detail_row(ui, "Address", user.address.as_deref().unwrap_or_default());
                detail_row(ui, "Password", &user.password);
                detail_row(
                    ui,
                    "Remember Token",
                    user.remember_token.as_deref().unwrap_or_default(),
                );
            }
            None => {
                ui.label("No user selected");
            }
        }
        ui.separator();
        dialog_buttons(ui, "Close", None)
    });
    resolve(response.inner, response.should_close())
}

pub fn edit_user_modal(ctx: &egui::Context, draft: &mut UserDraft) -> DialogOutcome {
    let response = egui::Modal::new(egui::Id::new("edit_user_modal")).show(ctx, |ui| {
        ui.set_width(420.0);
        ui.heading("Edit User");
        ui.separator();
        egui::Grid::new("edit_user_form")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                for field in DraftField::ALL {
                    ui.label(field.label());
                    ui.add(
                        egui::TextEdit::singleline(draft.field_mut(field))
                            .password(field.is_secret())
                            .desired_width(280.0),
                    );
                    ui.end_row();
                }
            });
        ui.separator();
        dialog_buttons(ui, "Cancel", Some("Save Changes"))
    });
    resolve(response.inner, response.should_close())
}

pub fn confirm_delete_modal(ctx: &egui::Context) -> DialogOutcome {
    let response = egui::Modal::new(egui::Id::new("confirm_delete_modal")).show(ctx, |ui| {
        ui.set_width(340.0);
        ui.label("Are you sure you want to delete this user?");
        ui.add_space(8.0);
        dialog_buttons(ui, "Cancel", Some("Delete"))
    });
    resolve(response.inner, response.should_close())
}
