/// Control Sidebar
///
/// Operator controls for the three backend subsystems: simulator and IDS
/// start/stop toggles plus the attack injection buttons. Button enablement
/// mirrors the control-state machine's guards so the UI cannot issue a
/// command the machine would reject; the machine still enforces the guards
/// defensively on every click.

use crate::control::ConsoleController;
use crate::feed::ConnectionState;
use crate::models::{ActionKey, AttackKind, Command, TelemetrySnapshot};
use crate::ui::widgets;
use eframe::egui;

/// Render the control sidebar content.
pub fn render_sidebar(
    ui: &mut egui::Ui,
    controller: &mut ConsoleController,
    snapshot: &TelemetrySnapshot,
    connection: ConnectionState,
) {
    ui.heading("CAN IDS");
    ui.label(egui::RichText::new("Security Monitor").small().color(widgets::TEXT_MUTED));
    ui.separator();

    ui.label(egui::RichText::new("Controls").strong());
    ui.add_space(4.0);

    // Simulator start/stop toggle. No pre-check against the pushed status:
    // the backend is authoritative and the next snapshot corrects the badge.
    subsystem_group(
        ui,
        controller,
        "Simulator",
        snapshot.status.simulator,
        ("RUNNING", "STOPPED"),
        ActionKey::Simulator,
        ("▶ Start Sim", Command::StartSimulator),
        ("⏹ Stop Sim", Command::StopSimulator),
    );

    subsystem_group(
        ui,
        controller,
        "IDS Detector",
        snapshot.status.ids,
        ("ACTIVE", "INACTIVE"),
        ActionKey::Ids,
        ("▶ Enable IDS", Command::StartIds),
        ("⏹ Disable IDS", Command::StopIds),
    );

    ui.separator();
    ui.label(egui::RichText::new("Attack Injection").strong());
    ui.add_space(4.0);

    for kind in AttackKind::ALL {
        let pending = controller.control().is_pending(ActionKey::Attack(kind));
        let active = controller.control().active_attack() == Some(kind);
        let enabled = controller.control().can_start_attack(kind);

        let name = match kind {
            AttackKind::Replay => "Replay Attack",
            AttackKind::Spoof => "Spoof Attack",
            AttackKind::Flood => "Flood Attack",
        };
        let text = if pending {
            "Injecting...".to_string()
        } else if active {
            format!("{} (active)", name)
        } else {
            name.to_string()
        };

        let button = egui::Button::new(text).min_size(egui::vec2(ui.available_width(), 0.0));
        if ui.add_enabled(enabled, button).clicked() {
            controller.issue(Command::StartAttack(kind));
        }
    }

    let stop_pending = controller.control().is_pending(ActionKey::StopAttack);
    let stop_text = if stop_pending { "Stopping..." } else { "Stop Attack" };
    let stop_button =
        egui::Button::new(stop_text).min_size(egui::vec2(ui.available_width(), 0.0));
    if ui
        .add_enabled(controller.control().can_stop_attack(), stop_button)
        .clicked()
    {
        controller.issue(Command::StopAttack);
    }

    ui.separator();
    widgets::connection_indicator(ui, connection);
}

/// One subsystem control group: name, state badge, start/stop toggle.
#[allow(clippy::too_many_arguments)]
fn subsystem_group(
    ui: &mut egui::Ui,
    controller: &mut ConsoleController,
    name: &str,
    running: bool,
    badges: (&str, &str),
    key: ActionKey,
    start: (&str, Command),
    stop: (&str, Command),
) {
    ui.group(|ui| {
        ui.horizontal(|ui| {
            ui.label(name);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                widgets::status_badge(ui, running, badges.0, badges.1);
            });
        });

        let pending = controller.control().is_pending(key);
        let (label, command) = if running { stop } else { start };
        let text = if pending { "Working..." } else { label };
        let button = egui::Button::new(text).min_size(egui::vec2(ui.available_width(), 0.0));
        if ui.add_enabled(!pending, button).clicked() {
            controller.issue(command);
        }
    });
    ui.add_space(4.0);
}
