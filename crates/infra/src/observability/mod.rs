//! Observability infrastructure
//!
//! Structured logging through `tracing`. Libraries in this workspace only
//! emit events; binaries call [`init_tracing`] once at startup.

pub mod logging;

pub use logging::{init_tracing, DEFAULT_LOG_FILTER};
