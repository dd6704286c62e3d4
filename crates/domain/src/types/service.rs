//! Bookable service payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;
use uuid::Uuid;

use crate::constants::MAX_SERVICE_NAME_LENGTH;
use crate::errors::{BookingError, Result};

/// Service offered for booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "ts-gen", ts(optional))]
    pub description: Option<String>,
    /// Duration in minutes
    pub duration: u32,
    pub price: f64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /services`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct CreateService {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "ts-gen", ts(optional))]
    pub description: Option<String>,
    pub duration: u32,
    pub price: f64,
}

impl CreateService {
    /// # Errors
    /// Returns `BookingError::InvalidInput` when a contract constraint fails.
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)?;
        validate_duration(self.duration)?;
        validate_price(self.price)
    }
}

/// Body of `PATCH /services/{id}`; absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct UpdateService {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "ts-gen", ts(optional))]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "ts-gen", ts(optional))]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "ts-gen", ts(optional))]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "ts-gen", ts(optional))]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "ts-gen", ts(optional))]
    pub is_active: Option<bool>,
}

impl UpdateService {
    /// # Errors
    /// Returns `BookingError::InvalidInput` when a present field violates a
    /// contract constraint.
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(duration) = self.duration {
            validate_duration(duration)?;
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<()> {
    let len = name.chars().count();
    if len == 0 || len > MAX_SERVICE_NAME_LENGTH {
        return Err(BookingError::InvalidInput(format!(
            "service name must be 1..={MAX_SERVICE_NAME_LENGTH} characters, got {len}"
        )));
    }
    Ok(())
}

fn validate_duration(minutes: u32) -> Result<()> {
    if minutes == 0 {
        return Err(BookingError::InvalidInput("service duration must be positive".into()));
    }
    Ok(())
}

fn validate_price(price: f64) -> Result<()> {
    if !price.is_finite() || price <= 0.0 {
        return Err(BookingError::InvalidInput(format!("service price must be positive, got {price}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn haircut() -> CreateService {
        CreateService { name: "Haircut".into(), description: None, duration: 30, price: 25.0 }
    }

    #[test]
    fn valid_service_passes() {
        assert!(haircut().validate().is_ok());
    }

    #[test]
    fn rejects_contract_violations() {
        assert!(CreateService { name: String::new(), ..haircut() }.validate().is_err());
        assert!(CreateService { name: "x".repeat(101), ..haircut() }.validate().is_err());
        assert!(CreateService { duration: 0, ..haircut() }.validate().is_err());
        assert!(CreateService { price: 0.0, ..haircut() }.validate().is_err());
        assert!(CreateService { price: f64::NAN, ..haircut() }.validate().is_err());
    }

    #[test]
    fn update_only_checks_present_fields() {
        assert!(UpdateService::default().validate().is_ok());
        let bad = UpdateService { price: Some(-1.0), ..UpdateService::default() };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn service_round_trips_is_active_in_camel_case() {
        let json = r#"{
            "id": "00000000-0000-0000-0000-000000000000",
            "name": "Massage",
            "duration": 60,
            "price": 80.5,
            "isActive": true,
            "createdAt": "2025-10-18T09:00:00Z",
            "updatedAt": "2025-10-18T09:00:00Z"
        }"#;
        let service: Service = serde_json::from_str(json).unwrap();
        assert!(service.is_active);
        assert_eq!(service.description, None);
    }
}
