//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{ClientError, UserDirectory};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{RequestKind, UiEvent};

/// Spawns the backend worker thread. Commands run one at a time, in queue order.
pub fn launch(
    directory: Arc<dyn UserDirectory>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                emit(
                    &ui_tx,
                    UiEvent::Info(format!("Backend worker startup failure: {err}")),
                );
                return;
            }
        };

        runtime.block_on(async move {
            emit(&ui_tx, UiEvent::Info("Backend worker ready".to_string()));
            while let Ok(cmd) = cmd_rx.recv() {
                handle_command(directory.as_ref(), cmd, &ui_tx).await;
            }
            tracing::info!("ui->backend command queue closed; backend worker exiting");
        });
    })
}

pub async fn handle_command(
    directory: &dyn UserDirectory,
    cmd: BackendCommand,
    ui_tx: &Sender<UiEvent>,
) {
    let operation = cmd.kind();
    tracing::debug!(operation = operation.label(), "processing backend command");
    match cmd {
        BackendCommand::ListUsers => refresh_users(directory, ui_tx).await,
        BackendCommand::FindUser { user_id } => match directory.get_user(user_id).await {
            Ok(user) => emit(ui_tx, UiEvent::UserFound(user)),
            Err(err) => report_failure(ui_tx, operation, &err),
        },
        BackendCommand::UpdateUser { user } => match directory.update_user(&user).await {
            Ok(updated) => {
                tracing::info!(user_id = user.id.0, "user updated");
                emit(ui_tx, UiEvent::UserUpdated(updated));
                refresh_users(directory, ui_tx).await;
            }
            Err(err) => report_failure(ui_tx, operation, &err),
        },
        BackendCommand::DeleteUser { user_id } => match directory.delete_user(user_id).await {
            Ok(()) => {
                tracing::info!(user_id = user_id.0, "user deleted");
                emit(ui_tx, UiEvent::UserDeleted(user_id));
                refresh_users(directory, ui_tx).await;
            }
            Err(err) => report_failure(ui_tx, operation, &err),
        },
    }
}

async fn refresh_users(directory: &dyn UserDirectory, ui_tx: &Sender<UiEvent>) {
    match directory.list_users().await {
        Ok(users) => emit(ui_tx, UiEvent::UsersLoaded(users)),
        Err(err) => report_failure(ui_tx, RequestKind::ListUsers, &err),
    }
}

fn report_failure(ui_tx: &Sender<UiEvent>, operation: RequestKind, err: &ClientError) {
    if err.is_not_found() {
        tracing::warn!(operation = operation.label(), error = %err, "user not found");
    } else {
        tracing::error!(operation = operation.label(), error = %err, "users api request failed");
    }
    emit(
        ui_tx,
        UiEvent::RequestFailed {
            operation,
            message: err.to_string(),
        },
    );
}

fn emit(ui_tx: &Sender<UiEvent>, event: UiEvent) {
    if ui_tx.send(event).is_err() {
        tracing::warn!("backend->ui event queue disconnected; dropping event");
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
