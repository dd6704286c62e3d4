//! Account payloads for the `/auth` endpoints

use std::fmt;

use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;
use uuid::Uuid;

use crate::constants::MIN_PASSWORD_LENGTH;
use crate::errors::{BookingError, Result};

/// Email/password pair posted to `/auth/login` and `/auth/register`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self { email: email.into(), password: password.into() }
    }

    /// Form-level checks applied before anything is sent.
    ///
    /// # Errors
    /// Returns `BookingError::InvalidInput` for a malformed email or a
    /// password shorter than the minimum length.
    pub fn validate(&self) -> Result<()> {
        if !looks_like_email(&self.email) {
            return Err(BookingError::InvalidInput(format!(
                "'{}' is not a valid email address",
                self.email
            )));
        }
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(BookingError::InvalidInput(format!(
                "password must be at least {MIN_PASSWORD_LENGTH} characters"
            )));
        }
        Ok(())
    }
}

// Never print the password.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .finish()
    }
}

fn looks_like_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !value.chars().any(char::is_whitespace)
        && domain.split('.').count() >= 2
        && domain.split('.').all(|label| !label.is_empty())
}

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

/// Account as returned by `/auth/register` and `/auth/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct UserAccount {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
}

/// `{"ok": true}` acknowledgement of login and refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct AuthAck {
    pub ok: bool,
}
