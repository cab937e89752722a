//! Endpoint configuration for the console.
//!
//! The backend location is a deployment concern, not part of the core
//! contract, so it stays out of the UI entirely: defaults match the testbed's
//! local backend and can be overridden through environment variables.

/// Where the backend lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Base URL for the command endpoints, without a trailing slash.
    pub api_base: String,

    /// URL of the dashboard push channel.
    pub ws_url: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_base: "http://localhost:8000/api".to_string(),
            ws_url: "ws://localhost:8000/ws/dashboard".to_string(),
        }
    }
}

impl ConsoleConfig {
    /// Build the configuration from `CANIDS_API_URL` / `CANIDS_WS_URL`,
    /// falling back to the local-testbed defaults.
    pub fn from_env() -> Self {
        Self::from_overrides(
            std::env::var("CANIDS_API_URL").ok(),
            std::env::var("CANIDS_WS_URL").ok(),
        )
    }

    fn from_overrides(api_base: Option<String>, ws_url: Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            api_base: api_base
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base),
            ws_url: ws_url.unwrap_or(defaults.ws_url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_point_at_local_backend() {
        let config = ConsoleConfig::default();
        assert_eq!(config.api_base, "http://localhost:8000/api");
        assert_eq!(config.ws_url, "ws://localhost:8000/ws/dashboard");
    }

    #[test]
    fn test_override_trims_trailing_slash() {
        let config = ConsoleConfig::from_overrides(
            Some("http://10.0.0.5:8000/api/".to_string()),
            None,
        );
        assert_eq!(config.api_base, "http://10.0.0.5:8000/api");
        assert_eq!(config.ws_url, ConsoleConfig::default().ws_url);
    }

    #[test]
    fn test_both_overrides_applied() {
        let config = ConsoleConfig::from_overrides(
            Some("http://testbed:9000/api".to_string()),
            Some("ws://testbed:9000/ws/dashboard".to_string()),
        );
        assert_eq!(config.api_base, "http://testbed:9000/api");
        assert_eq!(config.ws_url, "ws://testbed:9000/ws/dashboard");
    }
}
