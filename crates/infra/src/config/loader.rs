//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If `BOOKINGS_API_URL` is unset, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Without any config file, uses the defaults
//!
//! The result is validated before it is returned.
//!
//! ## Environment Variables
//! - `BOOKINGS_API_URL`: Base URL of the API (required for the env path)
//! - `BOOKINGS_TIMEOUT_SECS`: Request timeout in seconds
//! - `BOOKINGS_USER_AGENT`: User-Agent header
//! - `BOOKINGS_UNAUTHORIZED_STATUS`: Status code treated as credential expiry
//! - `BOOKINGS_REFRESH_PATH`: Path of the refresh endpoint
//! - `BOOKINGS_LOG_FORMAT`: `pretty` or `json`
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./bookings.{toml,json}` then `./config.{toml,json}`
//! 2. The same names in the parent and grandparent directories
//! 3. The same names next to the executable

use std::path::{Path, PathBuf};
use std::str::FromStr;

use bookings_domain::constants::{
    ENV_API_URL, ENV_LOG_FORMAT, ENV_REFRESH_PATH, ENV_TIMEOUT_SECS, ENV_UNAUTHORIZED_STATUS,
    ENV_USER_AGENT,
};
use bookings_domain::{BookingError, ClientConfig, LogFormat, Result};

use crate::errors::InfraError;

const CONFIG_FILE_NAMES: [&str; 4] = ["bookings.toml", "bookings.json", "config.toml", "config.json"];

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `BookingError::Config` if:
/// - An environment variable or file has an invalid value
/// - A probed file cannot be parsed
/// - The resulting configuration fails validation
pub fn load() -> Result<ClientConfig> {
    let config = match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            config
        }
        Err(BookingError::Config(reason)) if reason.starts_with(MISSING_VAR) => {
            tracing::debug!(reason = %reason, "Environment incomplete, trying file");
            match probe_config_paths() {
                Some(path) => load_from_file(Some(path))?,
                None => {
                    tracing::debug!("No config file found, using defaults");
                    ClientConfig::default()
                }
            }
        }
        Err(e) => return Err(e),
    };

    config.validate()?;
    Ok(config)
}

/// Load configuration from environment variables
///
/// `BOOKINGS_API_URL` must be present; every other variable falls back to
/// its default when unset.
///
/// # Errors
/// Returns `BookingError::Config` if the base URL is missing or a variable
/// has an invalid value.
pub fn load_from_env() -> Result<ClientConfig> {
    let defaults = ClientConfig::default();

    Ok(ClientConfig {
        base_url: env_var(ENV_API_URL)?,
        timeout_secs: env_parse(ENV_TIMEOUT_SECS)?.unwrap_or(defaults.timeout_secs),
        user_agent: std::env::var(ENV_USER_AGENT).ok().or(defaults.user_agent),
        unauthorized_status: env_parse(ENV_UNAUTHORIZED_STATUS)?
            .unwrap_or(defaults.unauthorized_status),
        refresh_path: std::env::var(ENV_REFRESH_PATH).unwrap_or(defaults.refresh_path),
        log_format: env_parse::<LogFormat>(ENV_LOG_FORMAT)?.unwrap_or(defaults.log_format),
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `BookingError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<ClientConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(BookingError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            BookingError::Config("No config file found in any of the standard locations".into())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| BookingError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents).map_err(|e| InfraError::from(e).into()),
        "json" => serde_json::from_str(contents)
            .map_err(|e| BookingError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(BookingError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.extend(cwd.ancestors().take(3).map(Path::to_path_buf));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            dirs.push(exe_dir.to_path_buf());
        }
    }

    dirs.iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.is_file())
}

const MISSING_VAR: &str = "Missing required environment variable";

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| BookingError::Config(format!("{MISSING_VAR}: {key}")))
}

/// Parse an optional environment variable
///
/// Returns `Ok(None)` when the variable is unset.
fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| BookingError::Config(format!("Invalid value for {key}: {e}"))),
        Err(_) => Ok(None),
    }
}
