//! Client configuration structures

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_REFRESH_PATH, DEFAULT_TIMEOUT_SECS, DEFAULT_UNAUTHORIZED_STATUS,
};
use crate::errors::{BookingError, Result};

/// Configuration for the authenticated API client
///
/// Every field has a default so partial config files are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the remote API (e.g., "http://localhost:8000")
    pub base_url: String,
    /// Per-request timeout applied by the transport
    pub timeout_secs: u64,
    /// Optional User-Agent header
    pub user_agent: Option<String>,
    /// Status code treated as authentication expiry
    pub unauthorized_status: u16,
    /// Path of the credential refresh endpoint
    pub refresh_path: String,
    /// Log output format
    pub log_format: LogFormat,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
            unauthorized_status: DEFAULT_UNAUTHORIZED_STATUS,
            refresh_path: DEFAULT_REFRESH_PATH.to_string(),
            log_format: LogFormat::default(),
        }
    }
}

impl ClientConfig {
    /// Request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Semantic checks that serde cannot express.
    ///
    /// # Errors
    /// Returns `BookingError::Config` describing the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(BookingError::Config(format!(
                "base_url must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(BookingError::Config("timeout_secs must be greater than zero".into()));
        }
        if !self.refresh_path.starts_with('/') {
            return Err(BookingError::Config(format!(
                "refresh_path must start with '/', got '{}'",
                self.refresh_path
            )));
        }
        if !(400..500).contains(&self.unauthorized_status) {
            return Err(BookingError::Config(format!(
                "unauthorized_status must be a 4xx code, got {}",
                self.unauthorized_status
            )));
        }
        Ok(())
    }
}

/// Output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable output for terminals
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

impl FromStr for LogFormat {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(BookingError::Config(format!("Unknown log format: {other}"))),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pretty => f.write_str("pretty"),
            Self::Json => f.write_str("json"),
        }
    }
}
