//! Pure gauge renderer.
//!
//! Maps a scalar value plus a per-instrument configuration onto a
//! deterministic vector scene (ticks, zone arcs, needle, readouts) laid out
//! in a fixed 200x200 instrument-face frame. No I/O and no state: the
//! tachometer and the speedometer are two `GaugeConfig` instances of the
//! same algorithm, so their geometry cannot drift apart.
//!
//! House style of the instrument face: a 240 degree sweep from -210 degrees
//! (8 o'clock, screen coordinates with y down) to +30 degrees (4 o'clock).
//! The arc endpoints, needle polygon and pivot caps all assume this sweep.

/// First angle of the sweep, degrees, screen frame (y grows downward).
pub const START_ANGLE_DEG: f64 = -210.0;
/// Last angle of the sweep.
pub const END_ANGLE_DEG: f64 = 30.0;

/// Side length of the logical instrument-face frame.
pub const FRAME_SIZE: f32 = 200.0;
/// Needle pivot, also the face center.
pub const CENTER: (f32, f32) = (100.0, 100.0);

/// Outer pivot cap radius.
pub const PIVOT_CAP_RADIUS: f32 = 8.0;
/// Inner pivot hub radius.
pub const PIVOT_HUB_RADIUS: f32 = 3.0;
/// Radius of the colored zone arcs, just outside the ticks.
pub const ZONE_RADIUS: f32 = 88.0;

const TICK_RADIUS: f32 = 80.0;
const MAJOR_TICK_LEN: f32 = 10.0;
const MINOR_TICK_LEN: f32 = 6.0;
const LABEL_RADIUS: f32 = 60.0;
const NEEDLE_TIP_RADIUS: f32 = 85.0;
const NEEDLE_HALF_WIDTH: f32 = 3.0;

/// Per-instrument configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct GaugeConfig {
    pub min_value: f64,
    pub max_value: f64,
    /// Spacing of labeled ticks, in value units.
    pub major_step: f64,
    /// Spacing of unlabeled ticks; positions coincident with a major tick
    /// are skipped.
    pub minor_step: f64,
    /// Values at or above this render in the warning color. `None` disables
    /// the warning zone.
    pub red_zone_from: Option<f64>,
    /// Major tick labels show `value / label_divisor` (RPM is labeled in
    /// thousands).
    pub label_divisor: f64,
    /// Caption under the pivot, e.g. `km/h`.
    pub unit_label: &'static str,
    /// Whether the digital readout rounds to a whole number.
    pub integral: bool,
}

impl GaugeConfig {
    /// Tachometer: 0-8000 RPM, red zone from 7000, labeled in thousands.
    pub fn rpm() -> Self {
        Self {
            min_value: 0.0,
            max_value: 8000.0,
            major_step: 1000.0,
            minor_step: 100.0,
            red_zone_from: Some(7000.0),
            label_divisor: 1000.0,
            unit_label: "x1000r/min",
            integral: true,
        }
    }

    /// Speedometer: 0-120 km/h, no warning zone.
    pub fn speed() -> Self {
        Self {
            min_value: 0.0,
            max_value: 120.0,
            major_step: 20.0,
            minor_step: 10.0,
            red_zone_from: None,
            label_divisor: 1.0,
            unit_label: "km/h",
            integral: true,
        }
    }
}

/// A radial tick segment, optionally labeled.
#[derive(Debug, Clone, PartialEq)]
pub struct TickMark {
    /// Outer endpoint, on the tick circle.
    pub from: (f32, f32),
    /// Inner endpoint.
    pub to: (f32, f32),
    pub major: bool,
    /// True when the tick sits in the warning zone.
    pub warning: bool,
    pub label: Option<TickLabel>,
}

/// Centered text for a major tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickLabel {
    pub text: String,
    pub pos: (f32, f32),
}

/// One colored stretch of the background arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneArc {
    pub start_deg: f64,
    pub end_deg: f64,
    pub warning: bool,
}

/// Deterministic drawing of one instrument at one value.
#[derive(Debug, Clone, PartialEq)]
pub struct GaugeScene {
    pub ticks: Vec<TickMark>,
    pub zones: Vec<ZoneArc>,
    /// Needle angle after clamping, degrees on the sweep.
    pub needle_angle_deg: f64,
    /// Needle triangle, already rotated about the pivot.
    pub needle: [(f32, f32); 3],
    /// Digital readout of the raw (unclamped) value.
    pub readout: String,
    pub unit_label: &'static str,
    /// Center readout (the speedometer shows the gear here).
    pub secondary: Option<String>,
}

impl GaugeScene {
    /// Build the scene for `value`. The needle clamps to the sweep; the
    /// readout always shows the raw value.
    pub fn build(value: f64, config: &GaugeConfig) -> Self {
        Self {
            ticks: build_ticks(config),
            zones: build_zones(config),
            needle_angle_deg: needle_angle_deg(value, config),
            needle: needle_polygon(needle_angle_deg(value, config)),
            readout: format_readout(value, config),
            unit_label: config.unit_label,
            secondary: None,
        }
    }

    /// Attach a center readout (gear display on the speedometer).
    pub fn with_secondary(mut self, text: impl Into<String>) -> Self {
        self.secondary = Some(text.into());
        self
    }
}

/// Point on the face at `angle_deg` and `radius` from the pivot.
pub fn point_at(angle_deg: f64, radius: f32) -> (f32, f32) {
    let rad = angle_deg.to_radians();
    (
        CENTER.0 + radius * rad.cos() as f32,
        CENTER.1 + radius * rad.sin() as f32,
    )
}

/// Needle angle for `value`, clamped to the sweep.
pub fn needle_angle_deg(value: f64, config: &GaugeConfig) -> f64 {
    let clamped = value.clamp(config.min_value, config.max_value);
    let span = config.max_value - config.min_value;
    START_ANGLE_DEG + (clamped - config.min_value) / span * (END_ANGLE_DEG - START_ANGLE_DEG)
}

/// Angle for an in-range value without clamping (tick and zone positions).
fn angle_of(value: f64, config: &GaugeConfig) -> f64 {
    let span = config.max_value - config.min_value;
    START_ANGLE_DEG + (value - config.min_value) / span * (END_ANGLE_DEG - START_ANGLE_DEG)
}

fn build_ticks(config: &GaugeConfig) -> Vec<TickMark> {
    let mut ticks = Vec::new();
    let span = config.max_value - config.min_value;

    // Minor ticks first so majors paint over them.
    let minor_count = (span / config.minor_step).round() as i64;
    for i in 0..=minor_count {
        let value = config.min_value + i as f64 * config.minor_step;
        if is_multiple_of(value - config.min_value, config.major_step) {
            continue;
        }
        let angle = angle_of(value, config);
        ticks.push(TickMark {
            from: point_at(angle, TICK_RADIUS),
            to: point_at(angle, TICK_RADIUS - MINOR_TICK_LEN),
            major: false,
            warning: in_red_zone(value, config),
            label: None,
        });
    }

    let major_count = (span / config.major_step).round() as i64;
    for i in 0..=major_count {
        let value = config.min_value + i as f64 * config.major_step;
        let angle = angle_of(value, config);
        ticks.push(TickMark {
            from: point_at(angle, TICK_RADIUS),
            to: point_at(angle, TICK_RADIUS - MAJOR_TICK_LEN),
            major: true,
            warning: in_red_zone(value, config),
            label: Some(TickLabel {
                text: format_number(value / config.label_divisor),
                pos: point_at(angle, LABEL_RADIUS),
            }),
        });
    }

    ticks
}

fn build_zones(config: &GaugeConfig) -> Vec<ZoneArc> {
    match config.red_zone_from {
        Some(red_from) if red_from > config.min_value && red_from < config.max_value => {
            let boundary = angle_of(red_from, config);
            vec![
                ZoneArc {
                    start_deg: START_ANGLE_DEG,
                    end_deg: boundary,
                    warning: false,
                },
                ZoneArc {
                    start_deg: boundary,
                    end_deg: END_ANGLE_DEG,
                    warning: true,
                },
            ]
        }
        _ => vec![ZoneArc {
            start_deg: START_ANGLE_DEG,
            end_deg: END_ANGLE_DEG,
            warning: false,
        }],
    }
}

/// Needle triangle rotated to `angle_deg`: a thin wedge from the pivot base
/// to the tip, plus-shaped caps drawn separately by the painter.
fn needle_polygon(angle_deg: f64) -> [(f32, f32); 3] {
    let unrotated = [
        (CENTER.0, CENTER.1 - NEEDLE_HALF_WIDTH),
        (CENTER.0 + NEEDLE_TIP_RADIUS, CENTER.1),
        (CENTER.0, CENTER.1 + NEEDLE_HALF_WIDTH),
    ];
    let rad = angle_deg.to_radians();
    let (sin, cos) = (rad.sin() as f32, rad.cos() as f32);
    unrotated.map(|(x, y)| {
        let (dx, dy) = (x - CENTER.0, y - CENTER.1);
        (
            CENTER.0 + dx * cos - dy * sin,
            CENTER.1 + dx * sin + dy * cos,
        )
    })
}

fn in_red_zone(value: f64, config: &GaugeConfig) -> bool {
    config.red_zone_from.map_or(false, |red| value >= red)
}

fn is_multiple_of(offset: f64, step: f64) -> bool {
    let remainder = (offset / step - (offset / step).round()).abs();
    remainder < 1e-9
}

/// Digital readout string for the raw value.
pub fn format_readout(value: f64, config: &GaugeConfig) -> String {
    if config.integral {
        format!("{:.0}", value)
    } else {
        format_number(value)
    }
}

/// Gear center readout: neutral shows as `N`.
pub fn gear_label(gear: i64) -> String {
    if gear == 0 {
        "N".to_string()
    } else {
        gear.to_string()
    }
}

fn format_number(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}
