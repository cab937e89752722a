//! Command dispatcher: thin request wrapper around the backend's command
//! endpoints.
//!
//! Exactly one network request per call, no automatic retry, no queueing.
//! Overlapping calls for the same action are prevented upstream by the
//! control-state machine's pending guard, not here.

use crate::error::CommandError;
use crate::models::{Command, CommandResponse};

/// Issues backend commands over HTTP.
pub struct CommandDispatcher {
    client: reqwest::Client,
    base_url: String,
}

impl CommandDispatcher {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Send one command. A non-success status surfaces the backend's
    /// `detail` field when the body carries one.
    pub async fn send(&self, command: &Command) -> Result<CommandResponse, CommandError> {
        let endpoint = command.path();
        let url = format!("{}/{}", self.base_url, endpoint);

        let mut request = self.client.post(&url);
        if let Some(body) = command.body() {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(|e| CommandError::Transport {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|body| {
                    body.get("detail")
                        .and_then(|d| d.as_str())
                        .map(str::to_string)
                })
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                });
            log::warn!(
                "[DISPATCH] Backend rejected '{}': {} {}",
                endpoint,
                status.as_u16(),
                detail
            );
            return Err(CommandError::Rejected {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                detail,
            });
        }

        // Success bodies have no guaranteed shape; tolerate anything.
        let parsed = response.json::<CommandResponse>().await.unwrap_or_default();
        log::debug!("[DISPATCH] '{}' succeeded: {}", endpoint, parsed.status);
        Ok(parsed)
    }
}
