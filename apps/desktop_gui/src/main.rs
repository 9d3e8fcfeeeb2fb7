use std::sync::Arc;

mod backend_bridge;
mod controller;
mod ui;

use anyhow::Context;
use backend_bridge::commands::BackendCommand;
use clap::Parser;
use client_core::{load_client_config, ClientConfig, UsersClient};
use controller::events::UiEvent;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

const COMMAND_QUEUE_CAPACITY: usize = 64;
const EVENT_QUEUE_CAPACITY: usize = 256;

#[derive(Parser, Debug)]
#[command(about = "Desktop console for browsing and editing users over the users REST API")]
struct Args {
    /// Overrides the configured API base URL, e.g. http://127.0.0.1:8080
    #[arg(long)]
    base_url: Option<String>,
}

fn resolve_config(args: Args) -> anyhow::Result<ClientConfig> {
    load_client_config()
        .context("failed to load client configuration")?
        .with_base_url_override(args.base_url)
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let config = match resolve_config(args) {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("{err:#}");
            std::process::exit(2);
        }
    };
    let client = match UsersClient::from_config(&config) {
        Ok(client) => client,
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(2);
        }
    };
    tracing::info!(api_base_url = client.base_url(), "starting user console");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(COMMAND_QUEUE_CAPACITY);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(EVENT_QUEUE_CAPACITY);
    let api_base_url = client.base_url().to_string();
    backend_bridge::runtime::launch(Arc::new(client), cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("User Console")
            .with_inner_size([960.0, 640.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };
    eframe::run_native(
        "User Console",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(ui::UserConsoleApp::new(
                cmd_tx,
                ui_rx,
                api_base_url,
            )))
        }),
    )
}
