//! # Bookings Core
//!
//! Request execution logic - no HTTP library dependencies.
//!
//! This crate contains:
//! - Port interfaces for the request transport and the credential refresh
//! - The refresh coordinator (single-flight state machine + waiter queue)
//! - The authenticated client that replays requests after a refresh
//!
//! ## Architecture Principles
//! - Only depends on `bookings-domain`
//! - No network or platform code
//! - All external capabilities via traits
//! - State is owned by one client instance, never process-wide

pub mod client;
pub mod ports;
pub mod refresh;

pub use client::AuthenticatedClient;
pub use ports::{CredentialRefresher, HttpTransport};
pub use refresh::{
    RefreshCoordinator, RefreshLeader, RefreshOutcome, RefreshSignal, RefreshStats, RefreshTicket,
    RefreshWaiter,
};
