//! Central page content: the id search form and the users table.

use eframe::egui;
use shared::domain::{User, UserId};

pub enum TableAction {
    View(UserId),
    Edit(User),
    Delete(UserId),
}

/// Returns true when the search form was submitted by button or Enter.
pub fn search_bar(ui: &mut egui::Ui, search_input: &mut String) -> bool {
    let mut submitted = false;
    ui.horizontal(|ui| {
        let response = ui.add(
            egui::TextEdit::singleline(search_input)
                .id_salt("search_user_id")
                .hint_text("Enter User ID")
                .desired_width(260.0),
        );
        let enter_pressed =
            response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if ui.button("Search").clicked() || enter_pressed {
            submitted = true;
        }
    });
    submitted
}

pub fn users_table(ui: &mut egui::Ui, users: &[User]) -> Option<TableAction> {
    let mut action = None;
    egui::ScrollArea::vertical()
        .auto_shrink([false, true])
        .show(ui, |ui| {
            egui::Grid::new("users_table")
                .num_columns(4)
                .striped(true)
                .spacing([24.0, 8.0])
                .show(ui, |ui| {
                    ui.strong("ID");
                    ui.strong("Name");
                    ui.strong("Email");
                    ui.strong("Actions");
                    ui.end_row();

                    for user in users {
                        ui.label(user.id.to_string());
                        ui.label(&user.name);
                        ui.label(&user.email);
                        ui.horizontal(|ui| {
                            if ui.small_button("View").clicked() {
                                action = Some(TableAction::View(user.id));
                            }
                            if ui.small_button("Edit").clicked() {
                                action = Some(TableAction::Edit(user.clone()));
                            }
                            if ui.small_button("Delete").clicked() {
                                action = Some(TableAction::Delete(user.id));
                            }
                        });
                        ui.end_row();
                    }
                });
        });
    action
}
