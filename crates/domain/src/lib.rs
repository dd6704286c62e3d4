//! # Bookings Domain
//!
//! Value types shared by every Bookings crate.
//!
//! This crate contains:
//! - The domain error type and `Result` alias
//! - Client configuration structures
//! - Request/response descriptions passed between the client and transports
//! - Booking, service and account payload schemas of the remote API
//!
//! ## Architecture
//! - No dependencies on other Bookings crates
//! - No I/O; only serde-level (de)serialization

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
