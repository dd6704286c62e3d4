//! Client constants
//!
//! Centralized location for the defaults and limits used throughout the
//! client crates.

// Remote API defaults
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_UNAUTHORIZED_STATUS: u16 = 401;
pub const DEFAULT_REFRESH_PATH: &str = "/auth/refresh";

// Error reporting
pub const MAX_ERROR_DETAIL_CHARS: usize = 200;

// Contract limits
pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_SERVICE_NAME_LENGTH: usize = 100;
pub const MAX_PAGE_LIMIT: u32 = 100;

// Environment variables
pub const ENV_API_URL: &str = "BOOKINGS_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "BOOKINGS_TIMEOUT_SECS";
pub const ENV_USER_AGENT: &str = "BOOKINGS_USER_AGENT";
pub const ENV_UNAUTHORIZED_STATUS: &str = "BOOKINGS_UNAUTHORIZED_STATUS";
pub const ENV_REFRESH_PATH: &str = "BOOKINGS_REFRESH_PATH";
pub const ENV_LOG_FORMAT: &str = "BOOKINGS_LOG_FORMAT";
