/// Custom egui Widgets
///
/// Implementations of specialized widgets using egui::Painter:
/// - gauge: Analog instrument face drawn from a precomputed GaugeScene
/// - status_badge: RUNNING/STOPPED-style colored state label
/// - connection_indicator: Push-channel state with a colored dot
/// - terminal_viewport: Monospace log viewer

use crate::feed::ConnectionState;
use crate::gauge::{self, GaugeScene};
use eframe::egui;
use egui::{Align2, Color32, FontId, Pos2, Rect, Stroke, Vec2};

/// Instrument palette, matching the testbed's dark dashboard theme.
pub const ACCENT: Color32 = Color32::from_rgb(59, 130, 246);
pub const WARNING: Color32 = Color32::from_rgb(239, 68, 68);
pub const OK_GREEN: Color32 = Color32::from_rgb(34, 197, 94);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(148, 163, 184);
pub const TEXT_DIM: Color32 = Color32::from_rgb(100, 116, 139);

const ACCENT_FADED: Color32 = Color32::from_rgba_premultiplied(18, 39, 74, 76);
const WARNING_FADED: Color32 = Color32::from_rgba_premultiplied(143, 41, 41, 153);
const MINOR_TICK: Color32 = Color32::from_rgba_premultiplied(30, 65, 123, 128);
const FACE_BG: Color32 = Color32::from_rgb(15, 23, 42);
const FACE_RING: Color32 = Color32::from_rgb(51, 65, 85);
const NEEDLE: Color32 = Color32::from_rgb(248, 250, 252);
const PIVOT: Color32 = Color32::from_rgb(226, 232, 240);

/// Draws one analog instrument from a precomputed scene.
///
/// The scene lives in the gauge module's fixed 200x200 face frame; this
/// widget only scales it into the allocated square and applies colors.
pub fn gauge(ui: &mut egui::Ui, scene: &GaugeScene, size: f32) {
    let (response, painter) = ui.allocate_painter(Vec2::splat(size), egui::Sense::hover());
    let rect = response.rect;
    let scale = size / gauge::FRAME_SIZE;
    let to_screen =
        |p: (f32, f32)| Pos2::new(rect.left() + p.0 * scale, rect.top() + p.1 * scale);
    let center = to_screen(gauge::CENTER);

    // Face background and outer ring
    painter.circle_filled(center, 95.0 * scale, FACE_BG);
    painter.circle_stroke(center, 95.0 * scale, Stroke::new(2.0 * scale, FACE_RING));

    // Zone arcs, drawn as line segments for smooth appearance
    for zone in &scene.zones {
        let sweep = zone.end_deg - zone.start_deg;
        let segments = ((sweep / 4.0).ceil() as usize).max(2);
        let color = if zone.warning { WARNING_FADED } else { ACCENT_FADED };
        for i in 0..segments {
            let a0 = zone.start_deg + sweep * i as f64 / segments as f64;
            let a1 = zone.start_deg + sweep * (i + 1) as f64 / segments as f64;
            painter.line_segment(
                [
                    to_screen(gauge::point_at(a0, gauge::ZONE_RADIUS)),
                    to_screen(gauge::point_at(a1, gauge::ZONE_RADIUS)),
                ],
                Stroke::new(12.0 * scale, color),
            );
        }
    }

    // Ticks and tick labels
    for tick in &scene.ticks {
        let width = (if tick.major { 3.0 } else { 1.5 }) * scale;
        let color = if !tick.major {
            MINOR_TICK
        } else if tick.warning {
            WARNING
        } else {
            ACCENT
        };
        painter.line_segment(
            [to_screen(tick.from), to_screen(tick.to)],
            Stroke::new(width, color),
        );
        if let Some(label) = &tick.label {
            painter.text(
                to_screen(label.pos),
                Align2::CENTER_CENTER,
                &label.text,
                FontId::proportional(14.0 * scale),
                Color32::WHITE,
            );
        }
    }

    // Unit caption under the pivot
    painter.text(
        to_screen((100.0, 135.0)),
        Align2::CENTER_CENTER,
        scene.unit_label,
        FontId::proportional(10.0 * scale),
        TEXT_MUTED,
    );

    // Needle and pivot caps
    let points: Vec<Pos2> = scene.needle.iter().map(|&p| to_screen(p)).collect();
    painter.add(egui::Shape::convex_polygon(points, NEEDLE, Stroke::NONE));
    painter.circle_filled(center, gauge::PIVOT_CAP_RADIUS * scale, PIVOT);
    painter.circle_stroke(
        center,
        gauge::PIVOT_CAP_RADIUS * scale,
        Stroke::new(2.0 * scale, TEXT_MUTED),
    );
    painter.circle_filled(center, gauge::PIVOT_HUB_RADIUS * scale, FACE_RING);

    // Center readout (gear display), covering the pivot
    if let Some(secondary) = &scene.secondary {
        painter.circle_filled(center, 25.0 * scale, FACE_BG);
        painter.circle_stroke(center, 25.0 * scale, Stroke::new(2.0 * scale, FACE_RING));
        painter.text(
            center,
            Align2::CENTER_CENTER,
            secondary,
            FontId::proportional(24.0 * scale),
            ACCENT,
        );
        painter.text(
            to_screen((100.0, 118.0)),
            Align2::CENTER_CENTER,
            "GEAR",
            FontId::proportional(8.0 * scale),
            TEXT_DIM,
        );
    }

    // Digital readout box
    let readout_rect = Rect::from_min_size(
        to_screen((75.0, 155.0)),
        Vec2::new(50.0 * scale, 22.0 * scale),
    );
    painter.rect_filled(readout_rect, 4.0 * scale, FACE_BG);
    painter.rect_stroke(readout_rect, 4.0 * scale, Stroke::new(1.0 * scale, FACE_RING));
    painter.text(
        readout_rect.center(),
        Align2::CENTER_CENTER,
        &scene.readout,
        FontId::monospace(14.0 * scale),
        ACCENT,
    );
}

/// Two-state colored label, e.g. RUNNING/STOPPED or ACTIVE/INACTIVE.
pub fn status_badge(ui: &mut egui::Ui, on: bool, on_label: &str, off_label: &str) {
    let (color, text) = if on {
        (OK_GREEN, on_label)
    } else {
        (WARNING, off_label)
    };
    ui.colored_label(color, egui::RichText::new(text).small().strong());
}

/// Push-channel state with a colored dot.
pub fn connection_indicator(ui: &mut egui::Ui, state: ConnectionState) {
    let color = match state {
        ConnectionState::Connected => OK_GREEN,
        ConnectionState::Connecting => TEXT_MUTED,
        ConnectionState::Disconnected => WARNING,
    };
    ui.horizontal(|ui| {
        let (rect, _) = ui.allocate_exact_size(Vec2::splat(10.0), egui::Sense::hover());
        ui.painter().circle_filled(rect.center(), 4.0, color);
        ui.colored_label(color, egui::RichText::new(state.label()).small());
    });
}

/// Terminal-style log viewer with monospace font
pub fn terminal_viewport(ui: &mut egui::Ui, logs: &[String]) {
    egui::ScrollArea::vertical()
        .auto_shrink([false; 2])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            if logs.is_empty() {
                ui.monospace("Awaiting output...");
                return;
            }
            for line in logs {
                ui.monospace(line);
            }
        });
}
