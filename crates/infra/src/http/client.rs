use std::time::Duration;

use async_trait::async_trait;
use bookings_core::HttpTransport;
use bookings_domain::constants::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, MAX_ERROR_DETAIL_CHARS};
use bookings_domain::{ApiRequest, ApiResponse, BookingError, ClientConfig, HttpMethod, Result};
use reqwest::{Client as ReqwestClient, Method, StatusCode};
use tracing::debug;
use url::Url;

use crate::errors::InfraError;

/// HTTP transport with a cookie store and a per-request timeout.
///
/// Credentials travel as HttpOnly cookies set by the API, so clones of the
/// same client share one cookie jar. Requests are sent exactly once.
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: ReqwestClient,
    base_url: Url,
    timeout: Duration,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Build a client from the loaded configuration.
    ///
    /// # Errors
    /// Returns `BookingError::Config` if the base URL is invalid or the
    /// underlying client cannot be created.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let mut builder = Self::builder().base_url(&config.base_url).timeout(config.timeout());
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent);
        }
        builder.build()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve an API path against the base URL, keeping any base path
    /// prefix (e.g. `http://host/api` + `/auth/me`).
    ///
    /// # Errors
    /// Returns `BookingError::Config` if the result is not a valid URL.
    pub fn url_for(&self, path: &str) -> Result<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let joined = if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        };
        Url::parse(&joined).map_err(|err| InfraError::from(err).into())
    }

    fn map_send_error(&self, err: reqwest::Error) -> BookingError {
        if err.is_timeout() {
            let millis = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);
            return BookingError::Timeout(millis);
        }
        InfraError::from(err).into()
    }
}

#[async_trait]
impl HttpTransport for HttpClient {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let url = self.url_for(request.path())?;
        let method = reqwest_method(request.method());

        let mut builder = self.client.request(method.clone(), url.clone());
        for (name, value) in request.headers() {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        debug!(%method, %url, attempt = ?request.attempt(), "sending HTTP request");

        let response = builder.send().await.map_err(|err| self.map_send_error(err))?;
        let status = response.status();
        debug!(%method, %url, %status, "received HTTP response");

        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value.to_str().ok().map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response.bytes().await.map_err(|err| self.map_send_error(err))?;

        if !status.is_success() {
            return Err(BookingError::http(status.as_u16(), error_detail(status, &body)));
        }

        Ok(headers
            .into_iter()
            .fold(ApiResponse::new(status.as_u16(), body.to_vec()), |response, (name, value)| {
                response.with_header(name, value)
            }))
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    base_url: String,
    timeout: Duration,
    user_agent: Option<String>,
    default_headers: Option<reqwest::header::HeaderMap>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: None,
            default_headers: None,
        }
    }
}

impl HttpClientBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn default_headers(mut self, headers: reqwest::header::HeaderMap) -> Self {
        self.default_headers = Some(headers);
        self
    }

    /// # Errors
    /// Returns `BookingError::Config` if the base URL does not parse or the
    /// reqwest client cannot be built.
    pub fn build(self) -> Result<HttpClient> {
        let base_url = Url::parse(&self.base_url).map_err(InfraError::from)?;

        let mut builder = ReqwestClient::builder()
            .timeout(self.timeout)
            .cookie_store(true)
            .no_proxy();

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        if let Some(headers) = self.default_headers {
            builder = builder.default_headers(headers);
        }

        let client = builder
            .build()
            .map_err(|err| BookingError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(HttpClient { client, base_url, timeout: self.timeout })
    }
}

fn reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
    }
}

/// Human-readable detail for a failed response.
///
/// Prefers the `detail` field of a JSON error body, falls back to the raw
/// body text and finally to the canonical reason phrase.
fn error_detail(status: StatusCode, body: &[u8]) -> String {
    let from_json = serde_json::from_slice::<serde_json::Value>(body).ok().and_then(|value| {
        match value.get("detail")? {
            serde_json::Value::String(detail) => Some(detail.clone()),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    });

    let detail = from_json.unwrap_or_else(|| String::from_utf8_lossy(body).trim().to_string());
    if detail.is_empty() {
        return status.canonical_reason().unwrap_or("unknown status").to_string();
    }
    truncate(&detail, MAX_ERROR_DETAIL_CHARS)
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_for(server: &MockServer) -> HttpClient {
        HttpClient::builder().base_url(server.uri()).build().expect("http client")
    }

    #[tokio::test]
    async fn returns_successful_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
            .expect(1)
            .mount(&server)
            .await;

        let response = client_for(&server).send(&ApiRequest::get("/health")).await.expect("response");

        assert_eq!(response.status(), 200);
        let body: serde_json::Value = response.json().unwrap();
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn sends_json_body_and_extra_headers() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bookings"))
            .and(header("x-request-id", "abc"))
            .and(body_json(json!({"notes": "window"})))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let request = ApiRequest::post("/bookings")
            .with_body(json!({"notes": "window"}))
            .header("x-request-id", "abc");
        let response = client_for(&server).send(&request).await.expect("response");

        assert_eq!(response.status(), 201);
    }

    #[tokio::test]
    async fn does_not_retry_server_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let result = client_for(&server).send(&ApiRequest::get("/bookings")).await;

        assert!(matches!(result, Err(BookingError::Http { status: 503, .. })));
    }

    #[tokio::test]
    async fn maps_fastapi_detail_into_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"detail": "Invalid credentials"})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).send(&ApiRequest::post("/auth/login")).await.unwrap_err();

        assert!(err.is_unauthorized_with(401));
        assert_eq!(err.detail(), Some("Invalid credentials"));
    }

    #[tokio::test]
    async fn times_out_slow_responses() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let client = HttpClient::builder()
            .base_url(server.uri())
            .timeout(Duration::from_millis(50))
            .build()
            .expect("http client");

        let result = client.send(&ApiRequest::get("/slow")).await;
        assert!(matches!(result, Err(BookingError::Timeout(50))), "got {result:?}");
    }

    #[tokio::test]
    async fn connection_refused_is_a_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener); // release the port so that requests fail with ECONNREFUSED

        let client = HttpClient::builder().base_url(format!("http://{addr}")).build().unwrap();

        let result = client.send(&ApiRequest::get("/health")).await;
        assert!(matches!(result, Err(BookingError::Network(_))), "got {result:?}");
    }

    #[test]
    fn url_for_keeps_base_path_prefix() {
        let client = HttpClient::builder().base_url("http://localhost:8000/api/").build().unwrap();
        assert_eq!(client.url_for("/auth/me").unwrap().as_str(), "http://localhost:8000/api/auth/me");
        assert_eq!(client.url_for("bookings").unwrap().as_str(), "http://localhost:8000/api/bookings");
    }

    #[test]
    fn rejects_invalid_base_url() {
        assert!(matches!(
            HttpClient::builder().base_url("::not a url").build(),
            Err(BookingError::Config(_))
        ));
    }

    #[test]
    fn error_detail_falls_back_to_body_and_reason() {
        assert_eq!(error_detail(StatusCode::BAD_GATEWAY, b""), "Bad Gateway");
        assert_eq!(error_detail(StatusCode::BAD_REQUEST, b"  plain text \n"), "plain text");
        assert_eq!(
            error_detail(StatusCode::UNPROCESSABLE_ENTITY, br#"{"detail":[{"msg":"bad"}]}"#),
            r#"[{"msg":"bad"}]"#
        );

        assert_eq!(error_detail(StatusCode::UNAUTHORIZED, br#"{"detail":null}"#), r#"{"detail":null}"#);

        let long = "x".repeat(MAX_ERROR_DETAIL_CHARS + 50);
        let detail = error_detail(StatusCode::INTERNAL_SERVER_ERROR, long.as_bytes());
        assert_eq!(detail.chars().count(), MAX_ERROR_DETAIL_CHARS + 3);
        assert!(detail.ends_with("..."));
    }
}
