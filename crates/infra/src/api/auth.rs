//! Cookie-based authentication endpoints
//!
//! The API issues HttpOnly `access_token` and `refresh_token` cookies. The
//! cookie jar of [`HttpClient`] carries them; nothing here touches the token
//! values.

use async_trait::async_trait;
use bookings_core::{CredentialRefresher, HttpTransport};
use bookings_domain::{ApiRequest, AuthAck, Credentials, Result, UserAccount};
use tracing::{debug, info, instrument};

use super::client::BookingsApi;
use crate::http::HttpClient;

/// Refreshes the access cookie by calling the refresh endpoint.
///
/// The call goes straight to the transport, never through the authenticated
/// client, so a rejected refresh cannot park behind itself.
#[derive(Clone, Debug)]
pub struct RemoteRefresher {
    http: HttpClient,
    path: String,
}

impl RemoteRefresher {
    /// Refresher posting to `path` on `http`.
    pub fn new(http: HttpClient, path: impl Into<String>) -> Self {
        Self { http, path: path.into() }
    }

    /// Refresh endpoint path.
    pub fn path(&self) -> &str {
        &self.path
    }
}

#[async_trait]
impl CredentialRefresher for RemoteRefresher {
    async fn refresh(&self) -> Result<()> {
        debug!(path = %self.path, "requesting credential refresh");
        self.http.send(&ApiRequest::post(self.path.as_str())).await?;
        Ok(())
    }
}

impl BookingsApi {
    /// `POST /auth/register`
    ///
    /// # Errors
    /// Returns `BookingError::InvalidInput` for malformed credentials, or
    /// the API error (e.g. 400 "Email already in use").
    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    pub async fn register(&self, credentials: &Credentials) -> Result<UserAccount> {
        credentials.validate()?;
        let request = ApiRequest::post("/auth/register").json(credentials)?;
        let account: UserAccount = self.send_unauthenticated(request).await?;
        info!(user_id = %account.id, "account registered");
        Ok(account)
    }

    /// `POST /auth/login`; the session cookies land in the cookie jar.
    ///
    /// # Errors
    /// Returns `BookingError::InvalidInput` for malformed credentials, or a
    /// 401 `BookingError::Http` when the API rejects them.
    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthAck> {
        credentials.validate()?;
        let request = ApiRequest::post("/auth/login").json(credentials)?;
        let ack: AuthAck = self.send_unauthenticated(request).await?;
        info!("logged in");
        Ok(ack)
    }

    /// `GET /auth/me`
    ///
    /// # Errors
    /// Returns the API error if the session cannot be recovered.
    #[instrument(skip(self))]
    pub async fn me(&self) -> Result<UserAccount> {
        self.fetch(ApiRequest::get("/auth/me")).await
    }

    /// `POST /auth/logout`; the API clears both cookies.
    ///
    /// # Errors
    /// Returns the transport error.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<()> {
        self.fetch::<()>(ApiRequest::post("/auth/logout")).await?;
        info!("logged out");
        Ok(())
    }

    /// Refresh the access cookie explicitly.
    ///
    /// Joins the on-demand refresh if one is already in flight.
    ///
    /// # Errors
    /// Returns the refresh endpoint's error, or `BookingError::Auth` when
    /// the joined refresh failed.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<()> {
        self.client().refresh().await
    }
}
