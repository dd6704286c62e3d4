//! Domain types and models
//!
//! - `http`: request/response descriptions exchanged with transports
//! - `auth`: account payloads for the `/auth` endpoints
//! - `booking`, `service`: business payloads of the remote API
//! - `envelope`: generic response wrappers (pagination, envelopes)

pub mod auth;
pub mod booking;
pub mod envelope;
pub mod http;
pub mod service;

pub use auth::{AuthAck, Credentials, Role, UserAccount};
pub use booking::{Booking, BookingStatus, CreateBooking, UpdateBooking};
pub use envelope::{ApiEnvelope, HealthStatus, PageRequest, Paginated, Pagination};
pub use http::{ApiRequest, ApiResponse, Attempt, HttpMethod};
pub use service::{CreateService, Service, UpdateService};
