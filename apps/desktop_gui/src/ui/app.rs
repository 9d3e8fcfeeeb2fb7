use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::UiEvent, orchestration::dispatch_backend_command, reducer::UsersPageState,
};
use crate::ui::{
    panels::{self, TableAction},
    widgets::{self, DialogOutcome},
};

pub struct UserConsoleApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    api_base_url: String,
    page: UsersPageState,
}

impl UserConsoleApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        api_base_url: String,
    ) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            api_base_url,
            page: UsersPageState {
                status: "Loading users...".to_string(),
                ..UsersPageState::default()
            },
        };
        let load = app.page.load();
        app.queue(load);
        app
    }

    fn queue(&mut self, cmd: BackendCommand) {
        dispatch_backend_command(&self.cmd_tx, cmd, &mut self.page.status);
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.page.apply(event);
        }
    }

    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.weak(format!("API: {}", self.api_base_url));
                ui.separator();
                ui.weak(&self.page.status);
            });
        });
    }

    fn show_users_page(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(12.0);
            ui.heading("All Users");
            ui.add_space(12.0);

            if panels::search_bar(ui, &mut self.page.search_input) {
                if let Some(cmd) = self.page.submit_search() {
                    self.queue(cmd);
                }
            }
            ui.add_space(12.0);

            match panels::users_table(ui, &self.page.users) {
                Some(TableAction::View(user_id)) => {
                    let cmd = self.page.view_user(user_id);
                    self.queue(cmd);
                }
                Some(TableAction::Edit(user)) => self.page.begin_edit(&user),
                Some(TableAction::Delete(user_id)) => self.page.request_delete(user_id),
                None => {}
            }
        });
    }

    fn show_dialogs(&mut self, ctx: &egui::Context) {
        if self.page.show_view_modal {
            let outcome = widgets::user_details_modal(ctx, self.page.selected_user.as_ref());
            if outcome != DialogOutcome::Open {
                self.page.close_view();
            }
        }

        if self.page.show_edit_modal {
            if let Some(draft) = self.page.edit_draft.as_mut() {
                match widgets::edit_user_modal(ctx, draft) {
                    DialogOutcome::Confirm => {
                        if let Some(cmd) = self.page.save_edit() {
                            self.queue(cmd);
                        }
                    }
                    DialogOutcome::Dismiss => self.page.cancel_edit(),
                    DialogOutcome::Open => {}
                }
            }
        }

        if self.page.pending_delete.is_some() {
            match widgets::confirm_delete_modal(ctx) {
                DialogOutcome::Confirm => {
                    if let Some(cmd) = self.page.confirm_delete() {
                        self.queue(cmd);
                    }
                }
                DialogOutcome::Dismiss => self.page.cancel_delete(),
                DialogOutcome::Open => {}
            }
        }
    }
}

impl eframe::App for UserConsoleApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        self.show_status_bar(ctx);
        self.show_users_page(ctx);
        self.show_dialogs(ctx);

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
