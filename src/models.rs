//! Core data types for the CAN IDS console.
//!
//! The wire shapes here mirror the backend's JSON exactly (capitalized CAN
//! signal names, `vehicle_state`, `dos_active`). Every field carries
//! `#[serde(default)]` because the backend elides fields while a flood is
//! suppressing bus traffic (e.g. `Brake` disappears from the `can` object).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Latest decoded CAN signal values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CanReadings {
    #[serde(rename = "RPM", default)]
    pub rpm: f64,

    /// 0 = neutral; sign meaningful for reverse if the simulator models it.
    #[serde(rename = "Gear", default)]
    pub gear: i64,

    #[serde(rename = "Speed", default)]
    pub speed: f64,

    #[serde(rename = "Brake", default)]
    pub brake: f64,
}

/// One intrusion-detection alert as parsed from the backend logs.
///
/// Alerts have no stable id; they are identified by position in the
/// snapshot's `alerts` sequence (oldest first).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Alert {
    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default)]
    pub volume: f64,

    #[serde(default)]
    pub details: String,

    #[serde(default)]
    pub timestamp: String,
}

/// Authoritative run-state of the three backend subsystems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SubsystemStatus {
    #[serde(rename = "Simulator", default)]
    pub simulator: bool,

    #[serde(rename = "IDS", default)]
    pub ids: bool,

    #[serde(rename = "Attacker", default)]
    pub attacker: bool,
}

/// One complete, self-consistent telemetry state pushed by the backend.
///
/// Replaced wholesale on every push frame; never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TelemetrySnapshot {
    #[serde(default)]
    pub can: CanReadings,

    /// Opaque driving-state label (free text from the backend).
    #[serde(default)]
    pub vehicle_state: String,

    /// Detection order, oldest first.
    #[serde(default)]
    pub alerts: Vec<Alert>,

    #[serde(default)]
    pub status: SubsystemStatus,

    /// Backend log lines, oldest first. The backend controls trimming.
    #[serde(default)]
    pub logs: Vec<String>,

    /// True while a flood is saturating the bus.
    #[serde(default)]
    pub dos_active: bool,
}

/// Injectable attack kinds supported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttackKind {
    Replay,
    Spoof,
    Flood,
}

impl AttackKind {
    pub const ALL: [AttackKind; 3] = [AttackKind::Replay, AttackKind::Spoof, AttackKind::Flood];
}

impl fmt::Display for AttackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttackKind::Replay => write!(f, "replay"),
            AttackKind::Spoof => write!(f, "spoof"),
            AttackKind::Flood => write!(f, "flood"),
        }
    }
}

impl FromStr for AttackKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "replay" => Ok(AttackKind::Replay),
            "spoof" => Ok(AttackKind::Spoof),
            "flood" => Ok(AttackKind::Flood),
            _ => Err(format!("Unknown attack kind: {}", s)),
        }
    }
}

/// Stable identifier for one controllable action, used to guard re-entrancy.
///
/// Start and stop of the same subsystem share a key (a simulator stop may not
/// be issued while a simulator start is still in flight, and vice versa).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKey {
    Simulator,
    Ids,
    Attack(AttackKind),
    StopAttack,
}

/// One backend command endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    StartSimulator,
    StopSimulator,
    StartIds,
    StopIds,
    StartAttack(AttackKind),
    StopAttack,
    ClearLogs,
}

impl Command {
    /// Endpoint path relative to the API base, e.g. `start/simulator`.
    pub fn path(&self) -> &'static str {
        match self {
            Command::StartSimulator => "start/simulator",
            Command::StopSimulator => "stop/simulator",
            Command::StartIds => "start/ids",
            Command::StopIds => "stop/ids",
            Command::StartAttack(_) => "start/attack",
            Command::StopAttack => "stop/attack",
            Command::ClearLogs => "logs/clear",
        }
    }

    /// JSON request body, where the endpoint takes one.
    pub fn body(&self) -> Option<serde_json::Value> {
        match self {
            Command::StartAttack(kind) => Some(serde_json::json!({ "type": kind.to_string() })),
            _ => None,
        }
    }

    /// The re-entrancy guard key for this command.
    ///
    /// `ClearLogs` deliberately has no key: clearing is fire-and-forget and
    /// harmless to repeat.
    pub fn action_key(&self) -> Option<ActionKey> {
        match self {
            Command::StartSimulator | Command::StopSimulator => Some(ActionKey::Simulator),
            Command::StartIds | Command::StopIds => Some(ActionKey::Ids),
            Command::StartAttack(kind) => Some(ActionKey::Attack(*kind)),
            Command::StopAttack => Some(ActionKey::StopAttack),
            Command::ClearLogs => None,
        }
    }

    /// Operator-facing description for notifications and logs.
    pub fn label(&self) -> String {
        match self {
            Command::StartSimulator => "start simulator".to_string(),
            Command::StopSimulator => "stop simulator".to_string(),
            Command::StartIds => "start IDS".to_string(),
            Command::StopIds => "stop IDS".to_string(),
            Command::StartAttack(kind) => format!("start {} attack", kind),
            Command::StopAttack => "stop attack".to_string(),
            Command::ClearLogs => "clear logs".to_string(),
        }
    }
}

/// Body returned by the backend's command endpoints on success.
///
/// The backend promises no particular shape beyond success/failure, so both
/// fields tolerate absence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CommandResponse {
    #[serde(default)]
    pub status: String,

    #[serde(default)]
    pub message: String,
}
