//! CAN IDS Testbed Operator Console
//!
//! Desktop console for a CAN-bus intrusion-detection testbed. It renders
//! live vehicle telemetry (tachometer, speedometer, gear), the IDS alert
//! feed and backend logs, and lets the operator start and stop the traffic
//! simulator, the detector, and the attack injectors.
//!
//! **Architecture**: the backend owns all truth. State arrives as full
//! snapshots over one push channel and is replaced wholesale; commands go
//! out as fire-and-forget HTTP requests whose effects come back on the next
//! snapshot. All state transitions run on the UI thread, fed by an event
//! channel drained once per frame.
//!
//! The system is organized into functional modules:
//! - **error**: Unified error type hierarchy
//! - **models**: Wire data structures and command definitions
//! - **config**: Backend endpoint configuration
//! - **gauge**: Pure gauge-scene geometry (no rendering)
//! - **store**: Last-write-wins snapshot holder
//! - **control**: Control-state machine and console controller
//! - **dispatcher**: HTTP command dispatch
//! - **feed**: WebSocket push-channel client
//! - **ui**: Egui application, dashboard, and widgets

// Core foundational modules
pub mod error;
pub mod models;

// Backend endpoint configuration
pub mod config;

// Gauge scene geometry, independent of any rendering backend
pub mod gauge;

// Snapshot storage and control state
pub mod control;
pub mod store;

// Backend I/O
pub mod dispatcher;
pub mod feed;

// Egui application and widgets
pub mod ui;

// Re-export the log crate for macro usage
pub use log;

// ============================================================================
// PUBLIC RE-EXPORTS FOR CONVENIENCE
// ============================================================================

pub use config::ConsoleConfig;
pub use control::{ConsoleController, ConsoleEvent, ControlState};
pub use dispatcher::CommandDispatcher;
pub use error::{CommandError, FeedError, Result};
pub use feed::{ConnectionState, FeedClient};
pub use gauge::{GaugeConfig, GaugeScene};
pub use models::{
    ActionKey, Alert, AttackKind, CanReadings, Command, CommandResponse, SubsystemStatus,
    TelemetrySnapshot,
};
pub use store::TelemetryStore;
pub use ui::AppUI;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
