//! Request and response descriptions
//!
//! An [`ApiRequest`] is the opaque description of one outbound call. It is
//! cheap to clone and is re-sent verbatim when replayed, with its
//! [`Attempt`] marker switched to [`Attempt::Replay`].

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::errors::{BookingError, Result};

/// HTTP method of an [`ApiRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which attempt of a request this is.
///
/// A request is replayed at most once after a credential refresh. A replay
/// that fails again with the unauthorized status is terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Attempt {
    #[default]
    Initial,
    Replay,
}

/// Description of one outbound call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    method: HttpMethod,
    path: String,
    body: Option<serde_json::Value>,
    headers: Vec<(String, String)>,
    attempt: Attempt,
}

impl ApiRequest {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            headers: Vec::new(),
            attempt: Attempt::Initial,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    /// Returns `BookingError::Serialization` if `body` cannot be encoded.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Attach an already-encoded JSON body.
    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Add an extra request header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Mark the request as already retried.
    ///
    /// Used both by the client before replaying and by callers re-issuing a
    /// request after their own manual retry.
    #[must_use]
    pub fn into_replay(mut self) -> Self {
        self.attempt = Attempt::Replay;
        self
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn attempt(&self) -> Attempt {
        self.attempt
    }

    pub fn is_replay(&self) -> bool {
        self.attempt == Attempt::Replay
    }
}

/// Successful response returned by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    status: u16,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self { status, headers: Vec::new(), body: body.into() }
    }

    /// Convenience constructor for a JSON body.
    ///
    /// # Errors
    /// Returns `BookingError::Serialization` if `value` cannot be encoded.
    pub fn from_json<T: Serialize + ?Sized>(status: u16, value: &T) -> Result<Self> {
        let body = serde_json::to_vec(value)?;
        Ok(Self::new(status, body).with_header("content-type", "application/json"))
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// First header value matching `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decode the body as JSON.
    ///
    /// 204/205 responses (and empty bodies) are decoded from `null`, so
    /// `()` and `Option<T>` targets work for bodiless endpoints.
    ///
    /// # Errors
    /// Returns `BookingError::Serialization` if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        if self.status == 204 || self.status == 205 || self.body.is_empty() {
            return serde_json::from_value(serde_json::Value::Null).map_err(|_| {
                BookingError::Serialization(format!(
                    "No content response ({}), but response type cannot be deserialized from empty body",
                    self.status
                ))
            });
        }
        serde_json::from_slice(&self.body).map_err(|e| {
            BookingError::Serialization(format!("Failed to parse response: {e}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn new_requests_start_as_initial_attempts() {
        let request = ApiRequest::get("/auth/me");
        assert_eq!(request.method(), HttpMethod::Get);
        assert_eq!(request.path(), "/auth/me");
        assert_eq!(request.attempt(), Attempt::Initial);
        assert!(!request.is_replay());
    }

    #[test]
    fn into_replay_keeps_the_description() {
        let request = ApiRequest::post("/bookings")
            .with_body(json!({"notes": "window seat"}))
            .header("X-Request-Id", "abc");
        let replay = request.clone().into_replay();

        assert!(replay.is_replay());
        assert_eq!(replay.method(), request.method());
        assert_eq!(replay.path(), request.path());
        assert_eq!(replay.body(), request.body());
        assert_eq!(replay.headers(), request.headers());
    }

    #[test]
    fn json_body_is_encoded() {
        #[derive(Serialize)]
        struct Body<'a> {
            email: &'a str,
        }

        let request = ApiRequest::post("/auth/login").json(&Body { email: "a@b.co" }).unwrap();
        assert_eq!(request.body(), Some(&json!({"email": "a@b.co"})));
    }

    #[test]
    fn response_json_decodes_body() {
        let response = ApiResponse::from_json(200, &json!({"ok": true})).unwrap();
        let value: serde_json::Value = response.json().unwrap();
        assert_eq!(value["ok"], true);
        assert_eq!(response.header("Content-Type"), Some("application/json"));
    }

    #[test]
    fn no_content_decodes_to_unit() {
        let response = ApiResponse::new(204, Vec::new());
        response.json::<()>().unwrap();
    }

    #[test]
    fn mismatched_body_is_a_serialization_error() {
        let response = ApiResponse::new(200, b"not json".to_vec());
        let result: Result<serde_json::Value> = response.json();
        assert!(matches!(result, Err(BookingError::Serialization(_))));
    }
}
