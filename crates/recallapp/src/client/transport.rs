use super::error::ClientError;
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One fully prepared request.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    /// Absolute URL (base URL + path).
    pub url: String,
    /// Path below the base URL, already percent-encoded.
    pub path: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<Value>,
}

impl Request {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status and body text as received, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn no_content() -> Self {
        Self::new(204, "")
    }

    pub fn json(status: u16, value: &Value) -> Self {
        Self::new(status, value.to_string())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Abstract interface for moving a request over the wire.
///
/// This trait handles the "how" (real HTTP vs an in-memory service), while
/// [`super::RowClient`] handles the "what": URLs, headers, and turning raw
/// responses into typed results or a [`ClientError`].
pub trait Transport {
    /// Sends the request. Returns `Err` only when no response was received;
    /// any HTTP status, success or not, comes back as `Ok`.
    fn send(&self, request: &Request) -> Result<RawResponse, ClientError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &Request) -> Result<RawResponse, ClientError> {
        (**self).send(request)
    }
}
