//! Unified error type hierarchy for the CAN IDS console.
//!
//! Provides structured error handling with FeedError for the push channel
//! and CommandError for the backend command endpoints. Nothing here is fatal
//! to the process: the console stays interactive after any of them.

use thiserror::Error;

/// Push-channel errors (WebSocket transport and frame decoding).
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("WebSocket error: {0}")]
    Socket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("Malformed telemetry frame: {0}")]
    MalformedFrame(#[from] serde_json::Error),
}

/// Command endpoint errors.
///
/// A failed command clears its action's pending flag and is reported to the
/// operator; no other state changes.
#[derive(Error, Debug)]
pub enum CommandError {
    /// The request never produced a response (connection refused, DNS, ...).
    #[error("Request for '{endpoint}' failed: {reason}")]
    Transport { endpoint: String, reason: String },

    /// The backend answered with a non-success status.
    #[error("Backend rejected '{endpoint}' ({status}): {detail}")]
    Rejected {
        endpoint: String,
        status: u16,
        detail: String,
    },
}

impl CommandError {
    /// Get a user-facing error message suitable for UI display
    pub fn user_message(&self) -> String {
        match self {
            CommandError::Transport { endpoint, reason } => {
                format!("Could not reach backend for '{}': {}", endpoint, reason)
            }
            CommandError::Rejected { endpoint, detail, .. } => {
                format!("Backend refused '{}': {}", endpoint, detail)
            }
        }
    }
}

/// Top-level result type for operations that may fail.
/// Use this as the return type for all fallible functions.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
