//! Error types used throughout the client

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Bookings
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum BookingError {
    /// The remote API answered with a non-success status.
    #[error("HTTP {status}: {detail}")]
    Http { status: u16, detail: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {0} ms")]
    Timeout(u64),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl BookingError {
    /// Build an HTTP status error.
    pub fn http(status: u16, detail: impl Into<String>) -> Self {
        Self::Http { status, detail: detail.into() }
    }

    /// Status code carried by the error, if the server produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Server-provided detail message (FastAPI `detail`) for HTTP errors.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Http { detail, .. } => Some(detail.as_str()),
            _ => None,
        }
    }

    /// Whether this error is the authentication-expiry signal for the given
    /// unauthorized status code.
    pub fn is_unauthorized_with(&self, unauthorized_status: u16) -> bool {
        self.status() == Some(unauthorized_status)
    }

    /// Stable label suitable for structured logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Http { status, .. } if (400..500).contains(status) => "http_client",
            Self::Http { .. } => "http_server",
            Self::Network(_) => "network",
            Self::Timeout(_) => "timeout",
            Self::Auth(_) => "auth",
            Self::Config(_) => "config",
            Self::InvalidInput(_) => "invalid_input",
            Self::Serialization(_) => "serialization",
            Self::Internal(_) => "internal",
        }
    }
}

impl From<serde_json::Error> for BookingError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type alias for Bookings operations
pub type Result<T> = std::result::Result<T, BookingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_is_only_reported_for_http_errors() {
        assert_eq!(BookingError::http(401, "Invalid token").status(), Some(401));
        assert_eq!(BookingError::Network("refused".into()).status(), None);
        assert_eq!(BookingError::Timeout(30_000).status(), None);
    }

    #[test]
    fn unauthorized_check_uses_configured_code() {
        let err = BookingError::http(401, "Not authenticated");
        assert!(err.is_unauthorized_with(401));
        assert!(!err.is_unauthorized_with(419));
        assert!(!BookingError::http(403, "Forbidden").is_unauthorized_with(401));
    }

    #[test]
    fn labels_split_client_and_server_statuses() {
        assert_eq!(BookingError::http(404, "missing").label(), "http_client");
        assert_eq!(BookingError::http(502, "bad gateway").label(), "http_server");
        assert_eq!(BookingError::Config("x".into()).label(), "config");
    }

    #[test]
    fn serializes_with_type_tag() {
        let json = serde_json::to_value(BookingError::http(401, "Invalid token")).unwrap();
        assert_eq!(json["type"], "Http");
        assert_eq!(json["message"]["status"], 401);
        assert_eq!(json["message"]["detail"], "Invalid token");
    }

    #[test]
    fn display_includes_status_and_detail() {
        let err = BookingError::http(400, "Email already in use");
        assert_eq!(err.to_string(), "HTTP 400: Email already in use");
    }
}
