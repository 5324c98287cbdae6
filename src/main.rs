pub mod config;
pub mod driver;
pub mod game;
pub mod ui;
pub mod vote;

use crate::config::AppConfig;
use crate::driver::GameHandle;
use crate::ui::key_bindings::KeyBindings;
use crate::ui::LaunchClockUI;
use crate::vote::{LogVoteSink, MqttVoteSink, VotePanel, VoteSink};
use color_eyre::{eyre::eyre, Result};
use eframe::egui;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    setup()?;

    let config_path = AppConfig::default_path();
    let config = AppConfig::load_or_create(&config_path).await?;

    info!("Initializing game driver");
    let game_handle = GameHandle::spawn(
        config.controller_settings(),
        config.game.initial_selection(),
    )
    .map_err(|e| eyre!("Failed to spawn game driver: {}", e))?;

    let vote_sink: Arc<dyn VoteSink> = if config.vote.enabled {
        Arc::new(MqttVoteSink::spawn(&config.vote))
    } else {
        info!("Voting broker disabled, votes are only logged");
        Arc::new(LogVoteSink)
    };
    let vote_panel = VotePanel::new(
        vote_sink,
        Duration::from_millis(config.vote.thanks_ms),
        config.vote.client_id.clone(),
    );

    let bindings = KeyBindings::from_config(&config.keys);
    let key_sender = game_handle.key_sender();
    let snapshot_receiver = game_handle.subscribe();
    let repaint_interval = Duration::from_millis(config.ui.repaint_ms.max(1));

    // UI starten
    info!("Starting UI");
    let mut native_options = eframe::NativeOptions::default();
    native_options.viewport = egui::ViewportBuilder::default()
        .with_title("Launch Clock")
        .with_fullscreen(config.ui.fullscreen);

    eframe::run_native(
        "Launch Clock",
        native_options,
        Box::new(move |cc| {
            Ok(Box::new(LaunchClockUI::new(
                cc,
                key_sender,
                snapshot_receiver,
                bindings,
                vote_panel,
                repaint_interval,
            )))
        }),
    )
    .map_err(|e| eyre!("UI terminated with error: {}", e))?;

    game_handle.shutdown().await;
    info!("Launch Clock closed");
    Ok(())
}

fn setup() -> Result<()> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    setup_logging_env();
    Ok(())
}

fn setup_logging_env() {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .pretty()
        .init();
}
