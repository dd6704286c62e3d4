//! Port interfaces for outbound requests
//!
//! These traits define the boundary between the authenticated client and
//! the infrastructure that actually talks to the remote API.

use std::sync::Arc;

use async_trait::async_trait;
use bookings_domain::{ApiRequest, ApiResponse, Result};

/// Performs one HTTP request.
///
/// Implementations return `Ok` only for 2xx responses. Any other status must
/// surface as `BookingError::Http` so the client can recognise the
/// unauthorized status.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send `request` once, without retrying.
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse>;
}

/// Obtains a fresh credential from the remote API.
///
/// On success later transport calls are expected to be authenticated. On
/// failure the credential state is left unchanged.
#[async_trait]
pub trait CredentialRefresher: Send + Sync {
    async fn refresh(&self) -> Result<()>;
}

#[async_trait]
impl<T: HttpTransport + ?Sized> HttpTransport for Arc<T> {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        (**self).send(request).await
    }
}

#[async_trait]
impl<R: CredentialRefresher + ?Sized> CredentialRefresher for Arc<R> {
    async fn refresh(&self) -> Result<()> {
        (**self).refresh().await
    }
}
