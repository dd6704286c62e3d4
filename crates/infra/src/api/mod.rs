//! Typed client for the Bookings API
//!
//! [`BookingsApi`] wraps an [`bookings_core::AuthenticatedClient`] over the
//! reqwest transport. Every business call goes through the authenticated
//! client, so an expired access cookie is refreshed once and the call is
//! replayed transparently.
//!
//! # Architecture
//!
//! - Uses [`crate::http::HttpClient`] (no direct reqwest)
//! - Cookie-based credentials, refreshed via [`RemoteRefresher`]
//! - Payload validation happens before anything is sent
//! - No retries beyond the single post-refresh replay

pub mod auth;
pub mod bookings;
pub mod client;
pub mod services;

pub use auth::RemoteRefresher;
pub use client::{BookingsApi, BookingsClient};
