/// Main Application UI
///
/// Owns every piece of console state and drains the background-task event
/// channel at the top of each frame, so all state transitions happen on
/// the UI thread. Background tasks only do I/O and report back.

use crate::control::{ConsoleController, ConsoleEvent};
use crate::feed::ConnectionState;
use crate::store::TelemetryStore;
use crate::ui::{dashboard, sidebar};
use eframe::egui;
use std::time::Duration;
use tokio::sync::{mpsc, watch};

pub struct AppUI {
    controller: ConsoleController,
    store: TelemetryStore,
    events_rx: mpsc::Receiver<ConsoleEvent>,
    shutdown_tx: watch::Sender<bool>,
    connection: ConnectionState,
    error_message: Option<String>,
    frames_rejected: u64,
}

impl AppUI {
    pub fn new(
        controller: ConsoleController,
        events_rx: mpsc::Receiver<ConsoleEvent>,
        shutdown_tx: watch::Sender<bool>,
    ) -> Self {
        Self {
            controller,
            store: TelemetryStore::new(),
            events_rx,
            shutdown_tx,
            connection: ConnectionState::Connecting,
            error_message: None,
            frames_rejected: 0,
        }
    }

    /// Drain all events queued since the last frame.
    fn process_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            match event {
                ConsoleEvent::FeedConnected => {
                    self.connection = ConnectionState::Connected;
                }
                ConsoleEvent::FeedDisconnected => {
                    // The stale snapshot stays visible behind the indicator.
                    self.connection = ConnectionState::Disconnected;
                }
                ConsoleEvent::Snapshot(snapshot) => {
                    let attacker_running = snapshot.status.attacker;
                    self.store.replace(snapshot);
                    self.controller.reconcile(attacker_running);
                }
                ConsoleEvent::FrameRejected(_) => {
                    self.frames_rejected += 1;
                }
                ConsoleEvent::CommandFinished { key, label, result } => {
                    let success = result.is_ok();
                    self.controller.apply_command_result(key, success);
                    if let Err(e) = result {
                        log::warn!("[UI] Command '{}' failed: {}", label, e);
                        self.error_message = Some(e.user_message());
                    }
                }
            }
        }
    }
}

impl eframe::App for AppUI {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_events();

        let snapshot = self.store.current();

        egui::SidePanel::left("controls")
            .resizable(false)
            .default_width(220.0)
            .show(ctx, |ui| {
                sidebar::render_sidebar(ui, &mut self.controller, &snapshot, self.connection);
            });

        if self.error_message.is_some() {
            egui::TopBottomPanel::bottom("error_bar").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let message = self.error_message.clone().unwrap_or_default();
                    ui.colored_label(crate::ui::widgets::WARNING, message);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("Dismiss").clicked() {
                            self.error_message = None;
                        }
                    });
                });
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            dashboard::render_dashboard(ui, &snapshot, &mut self.controller, self.frames_rejected);
        });

        // Snapshots arrive at 10 Hz; poll the event channel at least that fast
        // even when no input happens.
        ctx.request_repaint_after(Duration::from_millis(100));
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        log::info!("[UI] Shutting down background tasks");
        let _ = self.shutdown_tx.send(true);
    }
}
