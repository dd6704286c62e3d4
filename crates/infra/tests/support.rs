//! Shared fixtures for the HTTP integration tests.

#![allow(dead_code)]

use bookings_domain::ClientConfig;
use bookings_infra::BookingsApi;
use serde_json::{json, Value};
use wiremock::MockServer;

pub const USER_ID: &str = "3f1c7c1e-6a55-4d4f-9a61-1f6f2d0c8b10";
pub const BOOKING_ID: &str = "0192a3b4-5c6d-7e8f-9a0b-1c2d3e4f5a6b";
pub const SERVICE_ID: &str = "0192a3b4-0000-7000-8000-000000000001";

/// API client pointed at the mock server with default settings.
pub fn api_for(server: &MockServer) -> BookingsApi {
    api_with(server, ClientConfig::default())
}

pub fn api_with(server: &MockServer, config: ClientConfig) -> BookingsApi {
    let config = ClientConfig { base_url: server.uri(), ..config };
    BookingsApi::from_config(&config).expect("api client should build")
}

pub fn account_json() -> Value {
    json!({"id": USER_ID, "email": "ada@example.com", "role": "user"})
}

pub fn booking_json(status: &str) -> Value {
    json!({
        "id": BOOKING_ID,
        "userId": USER_ID,
        "serviceId": SERVICE_ID,
        "startTime": "2025-10-20T09:00:00Z",
        "endTime": "2025-10-20T10:00:00Z",
        "status": status,
        "createdAt": "2025-10-18T12:00:00Z",
        "updatedAt": "2025-10-18T12:00:00Z"
    })
}

pub fn service_json() -> Value {
    json!({
        "id": SERVICE_ID,
        "name": "Haircut",
        "duration": 30,
        "price": 25.0,
        "isActive": true,
        "createdAt": "2025-10-01T08:00:00Z",
        "updatedAt": "2025-10-01T08:00:00Z"
    })
}

pub fn not_authenticated() -> Value {
    json!({"detail": "Not authenticated"})
}
