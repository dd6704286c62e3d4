//! # Bookings Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - The reqwest-backed transport with a cookie store
//! - The remote credential refresh
//! - Typed facades for the auth, bookings and services endpoints
//! - Configuration loading and tracing initialisation
//!
//! ## Architecture
//! - Implements traits defined in `bookings-core`
//! - Depends on `bookings-domain` and `bookings-core`
//! - Contains all "impure" code (network, filesystem, environment)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod observability;

// Re-export commonly used items
pub use api::{BookingsApi, RemoteRefresher};
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use observability::init_tracing;
