//! Remote OHLC history endpoint configuration.

use std::time::Duration;

/// Compile-time defaults for the history endpoint
pub struct ApiDefaults {
    /// Host serving the UDF-style history endpoint (no trailing slash)
    pub base_url: &'static str,
    /// Path of the history endpoint, appended to `base_url`
    pub history_path: &'static str,
    /// Request timeout (native only, the browser owns timeouts on WASM)
    pub timeout_ms: u64,
}

pub const API: ApiDefaults = ApiDefaults {
    base_url: "https://api.app.trustedstake.ai",
    history_path: "/udf/history",
    timeout_ms: 15_000,
};

/// Runtime configuration injected into the fetch client.
/// Keeping the base URL here (rather than a literal in the client) lets tests
/// point the client at a local stub server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub history_path: String,
    pub timeout: Duration,
    /// Honour `HTTP_PROXY`-style environment settings (native only)
    pub use_system_proxy: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: API.base_url.to_string(),
            history_path: API.history_path.to_string(),
            timeout: Duration::from_millis(API.timeout_ms),
            use_system_proxy: true,
        }
    }
}

impl ApiConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Full URL of the history endpoint, tolerant of a trailing slash on the base.
    pub fn history_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.history_path.trim_start_matches('/')
        )
    }
}
