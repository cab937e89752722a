/// Dashboard View
///
/// Displays the two instrument gauges, the IDS status card, the recent
/// alerts list (most recent first) and the live log panel (append order)
/// from the latest telemetry snapshot.

use crate::control::ConsoleController;
use crate::gauge::{self, GaugeConfig, GaugeScene};
use crate::models::{Command, TelemetrySnapshot};
use crate::ui::widgets;
use eframe::egui;

const GAUGE_SIZE: f32 = 220.0;

/// Render the main dashboard content.
pub fn render_dashboard(
    ui: &mut egui::Ui,
    snapshot: &TelemetrySnapshot,
    controller: &mut ConsoleController,
    frames_rejected: u64,
) {
    // Top row: gauges and IDS verdict
    ui.columns(3, |cols| {
        cols[0].group(|ui| {
            ui.label(egui::RichText::new("RPM").strong());
            let scene = GaugeScene::build(snapshot.can.rpm, &GaugeConfig::rpm());
            widgets::gauge(ui, &scene, GAUGE_SIZE);
        });

        cols[1].group(|ui| {
            ui.label(egui::RichText::new("Speed").strong());
            let scene = GaugeScene::build(snapshot.can.speed, &GaugeConfig::speed())
                .with_secondary(gauge::gear_label(snapshot.can.gear));
            widgets::gauge(ui, &scene, GAUGE_SIZE);
            ui.horizontal(|ui| {
                if !snapshot.vehicle_state.is_empty() {
                    ui.label(
                        egui::RichText::new(&snapshot.vehicle_state)
                            .small()
                            .color(widgets::TEXT_MUTED),
                    );
                }
                if snapshot.can.brake > 0.0 {
                    ui.colored_label(
                        widgets::WARNING,
                        egui::RichText::new("BRAKE").small().strong(),
                    );
                }
            });
        });

        cols[2].group(|ui| {
            ui.label(egui::RichText::new("IDS Status").strong());
            ui.add_space(8.0);
            if snapshot.alerts.is_empty() {
                ui.colored_label(
                    widgets::OK_GREEN,
                    egui::RichText::new("🛡 SYSTEM SECURE").heading(),
                );
            } else {
                ui.colored_label(
                    widgets::WARNING,
                    egui::RichText::new("⚠ INTRUSION DETECTED").heading(),
                );
            }
            ui.add_space(4.0);
            ui.colored_label(
                widgets::TEXT_DIM,
                format!("{} alerts in last session", snapshot.alerts.len()),
            );
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.label("Detector:");
                widgets::status_badge(ui, snapshot.status.ids, "ACTIVE", "INACTIVE");
            });
        });
    });

    ui.add_space(8.0);

    // Bottom row: alerts and logs
    ui.columns(2, |cols| {
        cols[0].group(|ui| {
            ui.label(egui::RichText::new("Recent Alerts").strong());
            ui.separator();
            render_alerts(ui, snapshot);
        });

        cols[1].group(|ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("System Logs").strong());
                if snapshot.dos_active {
                    ui.colored_label(
                        widgets::WARNING,
                        egui::RichText::new("⚠ BUS OFF - FLOODING").small().strong(),
                    );
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("Clear").clicked() {
                        controller.issue(Command::ClearLogs);
                    }
                });
            });
            ui.separator();
            widgets::terminal_viewport(ui, &snapshot.logs);
            if frames_rejected > 0 {
                ui.colored_label(
                    widgets::TEXT_DIM,
                    egui::RichText::new(format!("{} malformed frames dropped", frames_rejected))
                        .small(),
                );
            }
        });
    });
}

/// Alerts render most recent first; snapshot order is oldest first.
fn render_alerts(ui: &mut egui::Ui, snapshot: &TelemetrySnapshot) {
    egui::ScrollArea::vertical()
        .id_source("alerts_scroll")
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            if snapshot.alerts.is_empty() {
                ui.colored_label(widgets::TEXT_DIM, "No threats detected.");
                return;
            }
            for alert in snapshot.alerts.iter().rev() {
                ui.horizontal(|ui| {
                    ui.colored_label(widgets::WARNING, "⚠");
                    ui.vertical(|ui| {
                        ui.label(egui::RichText::new(&alert.kind).strong());
                        ui.colored_label(
                            widgets::TEXT_MUTED,
                            egui::RichText::new(format!(
                                "Vol: {}  {}",
                                alert.volume, alert.details
                            ))
                            .small(),
                        );
                    });
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                        ui.colored_label(
                            widgets::TEXT_DIM,
                            egui::RichText::new(&alert.timestamp).small(),
                        );
                    });
                });
                ui.separator();
            }
        });
}
