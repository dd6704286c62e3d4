//! Tracing subscriber initialisation

use bookings_domain::{BookingError, LogFormat, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "warn,bookings=info";

/// Install the global tracing subscriber.
///
/// Events go to stderr so command output on stdout stays machine-readable.
///
/// # Errors
/// Returns `BookingError::Internal` if a global subscriber is already set.
pub fn init_tracing(format: LogFormat) -> Result<()> {
    let filter = build_filter(std::env::var("RUST_LOG").ok().as_deref());
    let registry = tracing_subscriber::registry().with(filter);

    let result = match format {
        LogFormat::Pretty => registry.with(fmt::layer().with_writer(std::io::stderr)).try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(true).with_writer(std::io::stderr))
            .try_init(),
    };

    result.map_err(|err| BookingError::Internal(format!("Failed to initialise tracing: {err}")))
}

fn build_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|raw| !raw.trim().is_empty())
        .and_then(|raw| EnvFilter::try_new(raw).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_default_filter() {
        assert_eq!(build_filter(None).to_string(), EnvFilter::new(DEFAULT_LOG_FILTER).to_string());
        assert_eq!(build_filter(Some("  ")).to_string(), EnvFilter::new(DEFAULT_LOG_FILTER).to_string());
    }

    #[test]
    fn honours_explicit_directives() {
        assert_eq!(build_filter(Some("bookings_core=debug")).to_string(), "bookings_core=debug");
    }

    #[test]
    fn second_initialisation_fails() {
        // The first call may lose to another test; the second always fails.
        let _ = init_tracing(LogFormat::Pretty);
        assert!(matches!(init_tracing(LogFormat::Json), Err(BookingError::Internal(_))));
    }
}
