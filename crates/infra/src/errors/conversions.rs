//! Conversions from external infrastructure errors into domain errors.

use bookings_domain::BookingError;
use reqwest::Error as HttpError;
use toml::de::Error as TomlError;
use url::ParseError as UrlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub BookingError);

impl From<InfraError> for BookingError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<BookingError> for InfraError {
    fn from(value: BookingError) -> Self {
        Self(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoBookingError {
    fn into_booking(self) -> BookingError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → BookingError */
/* -------------------------------------------------------------------------- */

impl IntoBookingError for HttpError {
    fn into_booking(self) -> BookingError {
        if self.is_timeout() {
            return BookingError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return BookingError::Network(format!("HTTP connection failure: {self}"));
        }

        if self.is_builder() {
            return BookingError::Config(format!("invalid HTTP request: {self}"));
        }

        if self.is_decode() || self.is_body() {
            return BookingError::Serialization(format!("failed to read HTTP body: {self}"));
        }

        if let Some(status) = self.status() {
            let reason = status.canonical_reason().unwrap_or("unknown status");
            return BookingError::http(status.as_u16(), reason);
        }

        BookingError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        Self(value.into_booking())
    }
}

/* -------------------------------------------------------------------------- */
/* url::ParseError → BookingError */
/* -------------------------------------------------------------------------- */

impl IntoBookingError for UrlError {
    fn into_booking(self) -> BookingError {
        BookingError::Config(format!("invalid URL: {self}"))
    }
}

impl From<UrlError> for InfraError {
    fn from(value: UrlError) -> Self {
        Self(value.into_booking())
    }
}

/* -------------------------------------------------------------------------- */
/* toml::de::Error → BookingError */
/* -------------------------------------------------------------------------- */

impl IntoBookingError for TomlError {
    fn into_booking(self) -> BookingError {
        BookingError::Config(format!("Invalid TOML format: {}", self.message()))
    }
}

impl From<TomlError> for InfraError {
    fn from(value: TomlError) -> Self {
        Self(value.into_booking())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
