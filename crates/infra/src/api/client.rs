//! API facade over the authenticated client

use std::sync::Arc;

use bookings_core::{AuthenticatedClient, HttpTransport, RefreshStats};
use bookings_domain::{ApiRequest, ApiResponse, ClientConfig, HealthStatus, Result};
use serde::de::DeserializeOwned;
use tracing::{info, instrument};

use super::auth::RemoteRefresher;
use crate::http::HttpClient;

/// Authenticated client type used by [`BookingsApi`].
pub type BookingsClient = AuthenticatedClient<HttpClient, RemoteRefresher>;

/// Typed access to the remote Bookings API.
///
/// Cheap to clone; clones share the cookie jar and the refresh coordinator.
#[derive(Clone, Debug)]
pub struct BookingsApi {
    client: Arc<BookingsClient>,
}

impl BookingsApi {
    /// Create an API client from configuration.
    ///
    /// # Errors
    /// Returns `BookingError::Config` if the configuration is invalid.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let http = HttpClient::from_config(config)?;
        let refresher = RemoteRefresher::new(http.clone(), config.refresh_path.clone());
        let client = AuthenticatedClient::new(http, refresher)
            .with_unauthorized_status(config.unauthorized_status);
        Ok(Self::new(client))
    }

    /// Wrap an already configured client.
    pub fn new(client: BookingsClient) -> Self {
        Self { client: Arc::new(client) }
    }

    /// The underlying authenticated client.
    pub fn client(&self) -> &BookingsClient {
        &self.client
    }

    /// Refresh counters of the underlying client.
    pub fn refresh_stats(&self) -> RefreshStats {
        self.client.stats()
    }

    /// Execute a raw request through the authenticated client.
    ///
    /// # Errors
    /// Whatever the final attempt returned.
    pub async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        self.client.execute(request).await
    }

    /// Execute `request` and decode the JSON body.
    pub(crate) async fn fetch<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        self.execute(request).await?.json()
    }

    /// Send `request` over the bare transport, bypassing refresh handling.
    ///
    /// Used for the endpoints that issue credentials.
    pub(crate) async fn send_unauthenticated<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<T> {
        self.client.transport().send(&request).await?.json()
    }

    /// `GET /health`
    ///
    /// # Errors
    /// Returns the transport error if the API is unreachable.
    #[instrument(skip(self))]
    pub async fn health(&self) -> Result<HealthStatus> {
        let health: HealthStatus = self.send_unauthenticated(ApiRequest::get("/health")).await?;
        info!(status = %health.status, service = %health.service, "health check");
        Ok(health)
    }
}
