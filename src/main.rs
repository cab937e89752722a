use std::sync::Arc;
use tokio::sync::{mpsc, watch};

use canids_console::control::{ConsoleController, ConsoleEvent};
use canids_console::dispatcher::CommandDispatcher;
use canids_console::feed::FeedClient;
use canids_console::ui::AppUI;
use canids_console::ConsoleConfig;

#[tokio::main]
async fn main() -> canids_console::Result<()> {
    // =========================================================================
    // LOGGING INITIALIZATION - MUST BE FIRST
    // =========================================================================
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("[Main] CAN IDS console starting");

    let config = ConsoleConfig::from_env();
    log::info!(
        "[Main] Backend: api={} ws={}",
        config.api_base,
        config.ws_url
    );

    // =========================================================================
    // CHANNELS AND BACKGROUND TASKS
    // =========================================================================
    let (events_tx, events_rx) = mpsc::channel::<ConsoleEvent>(256);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let feed_handle = FeedClient::new(config.ws_url, events_tx.clone(), shutdown_rx).spawn();

    let dispatcher = Arc::new(CommandDispatcher::new(config.api_base));
    let controller = ConsoleController::new(dispatcher, events_tx);

    // =========================================================================
    // LAUNCH EGUI
    // =========================================================================
    let app_ui = AppUI::new(controller, events_rx, shutdown_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        "CAN IDS Console",
        options,
        Box::new(move |_cc| Box::new(app_ui)),
    );

    // on_exit flipped the shutdown signal; wait for the feed task to stop.
    if let Err(e) = feed_handle.await {
        log::warn!("[Main] Feed task did not shut down cleanly: {}", e);
    }
    log::info!("[Main] Application shutting down.");

    result.map_err(|e| e.into())
}
