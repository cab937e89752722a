//! Telemetry store: last-write-wins holder for the newest snapshot.
//!
//! Single writer (the console's event drain), many readers (gauges, alert
//! and log panels, status badges). Every push is a full-state replacement
//! behind an `Arc` swap, so a reader either sees the whole old snapshot or
//! the whole new one, never a mix.

use crate::models::TelemetrySnapshot;
use std::sync::Arc;

/// Holds the latest full snapshot pushed by the backend.
#[derive(Debug, Clone)]
pub struct TelemetryStore {
    current: Arc<TelemetrySnapshot>,
}

impl TelemetryStore {
    /// Starts blank: all-zero readings, no alerts, everything stopped.
    /// Restart semantics are "blank slate until first push".
    pub fn new() -> Self {
        Self {
            current: Arc::new(TelemetrySnapshot::default()),
        }
    }

    /// Replace the held snapshot wholesale. The superseded snapshot is
    /// dropped once the last outstanding reader releases it.
    pub fn replace(&mut self, snapshot: TelemetrySnapshot) {
        self.current = Arc::new(snapshot);
    }

    /// The newest snapshot. Cheap to call per frame.
    pub fn current(&self) -> Arc<TelemetrySnapshot> {
        Arc::clone(&self.current)
    }
}

impl Default for TelemetryStore {
    fn default() -> Self {
        Self::new()
    }
}
