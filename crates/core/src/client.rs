//! Authenticated request client
//!
//! Wraps a [`HttpTransport`] and recovers transparently from credential
//! expiry: the first request that hits the unauthorized status triggers a
//! single refresh, requests failing meanwhile are parked, and every one of
//! them is replayed once after the refresh succeeds.

use bookings_domain::constants::DEFAULT_UNAUTHORIZED_STATUS;
use bookings_domain::{ApiRequest, ApiResponse, BookingError, Result};
use tracing::{debug, info, warn};

use crate::ports::{CredentialRefresher, HttpTransport};
use crate::refresh::{RefreshCoordinator, RefreshOutcome, RefreshSignal, RefreshStats, RefreshTicket};

/// Request client with single-flight credential refresh.
#[derive(Debug)]
pub struct AuthenticatedClient<T, R> {
    transport: T,
    refresher: R,
    coordinator: RefreshCoordinator,
    unauthorized_status: u16,
}

impl<T, R> AuthenticatedClient<T, R>
where
    T: HttpTransport,
    R: CredentialRefresher,
{
    /// Client treating 401 as credential expiry.
    pub fn new(transport: T, refresher: R) -> Self {
        Self {
            transport,
            refresher,
            coordinator: RefreshCoordinator::new(),
            unauthorized_status: DEFAULT_UNAUTHORIZED_STATUS,
        }
    }

    /// Treat `status` instead of 401 as credential expiry.
    #[must_use]
    pub fn with_unauthorized_status(mut self, status: u16) -> Self {
        self.unauthorized_status = status;
        self
    }

    /// Transport used for every attempt.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Capability invoked by the refresh leader.
    pub fn refresher(&self) -> &R {
        &self.refresher
    }

    /// Refresh state shared by every request on this client.
    pub fn coordinator(&self) -> &RefreshCoordinator {
        &self.coordinator
    }

    /// Status treated as credential expiry.
    pub fn unauthorized_status(&self) -> u16 {
        self.unauthorized_status
    }

    /// Snapshot of the refresh counters.
    pub fn stats(&self) -> RefreshStats {
        self.coordinator.stats()
    }

    /// Execute `request`, refreshing credentials and replaying it once if the
    /// transport reports the unauthorized status.
    ///
    /// Successes and all other failures are returned unchanged. When the
    /// refresh fails, the request's own unauthorized error is returned.
    ///
    /// # Errors
    /// Whatever the transport returned for the final attempt.
    pub async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        debug!(method = %request.method(), path = request.path(), attempt = ?request.attempt(), "sending request");

        let unauthorized = match self.transport.send(&request).await {
            Err(err) if err.is_unauthorized_with(self.unauthorized_status) => err,
            other => return other,
        };

        if request.is_replay() {
            debug!(path = request.path(), "unauthorized on replayed request, giving up");
            return Err(unauthorized);
        }

        let replay = request.into_replay();

        if self.coordinated_refresh(replay.path()).await.is_err() {
            return Err(unauthorized);
        }

        self.replay(&replay).await
    }

    /// Refresh credentials now, joining the refresh already in flight if
    /// there is one.
    ///
    /// # Errors
    /// The refresher's error when this call led the refresh, or
    /// `BookingError::Auth` when the joined refresh failed.
    pub async fn refresh(&self) -> Result<()> {
        self.coordinated_refresh("explicit").await
    }

    async fn coordinated_refresh(&self, trigger: &str) -> Result<()> {
        match self.coordinator.enter() {
            RefreshTicket::Leader(leader) => {
                debug!(trigger, "starting credential refresh");
                match self.refresher.refresh().await {
                    Ok(()) => {
                        let released = leader.settle(RefreshOutcome::Succeeded);
                        info!(released, "credential refresh succeeded");
                        Ok(())
                    }
                    Err(err) => {
                        let released = leader.settle(RefreshOutcome::Failed);
                        warn!(
                            error = %err,
                            error_type = err.label(),
                            failed_waiters = released,
                            "credential refresh failed"
                        );
                        Err(err)
                    }
                }
            }
            RefreshTicket::Waiter(waiter) => match waiter.wait().await {
                RefreshSignal::Retry => Ok(()),
                RefreshSignal::Fail => {
                    Err(BookingError::Auth("credential refresh failed".to_string()))
                }
            },
        }
    }

    async fn replay(&self, request: &ApiRequest) -> Result<ApiResponse> {
        self.coordinator.record_replay();
        debug!(method = %request.method(), path = request.path(), "replaying request after refresh");

        let result = self.transport.send(request).await;
        if let Err(err) = &result {
            if err.is_unauthorized_with(self.unauthorized_status) {
                warn!(path = request.path(), "replayed request still unauthorized");
            }
        }
        result
    }
}
