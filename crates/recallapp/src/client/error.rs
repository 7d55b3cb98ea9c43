use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Raw body of a failed response, kept for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorPayload {
    Json(Value),
    Text(String),
}

impl ErrorPayload {
    /// JSON first, plain text as the fallback.
    pub fn from_body(body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(value) => ErrorPayload::Json(value),
            Err(_) => ErrorPayload::Text(body.to_string()),
        }
    }

    /// The `error` field of a JSON payload, when it holds a non-empty string.
    pub fn error_field(&self) -> Option<&str> {
        match self {
            ErrorPayload::Json(value) => value
                .get("error")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty()),
            ErrorPayload::Text(_) => None,
        }
    }
}

impl fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorPayload::Json(value) => write!(f, "{}", value),
            ErrorPayload::Text(text) => f.write_str(text),
        }
    }
}

/// Every failure the row client can produce.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ClientError {
    /// The service answered with a non-2xx status.
    #[error("{message}")]
    Http {
        message: String,
        status: u16,
        payload: ErrorPayload,
    },

    /// An endpoint that must return a body returned none.
    #[error("{message}")]
    MissingBody { message: String },

    /// No response was received at all.
    #[error("Network error: {0}")]
    Transport(String),

    /// A 2xx body that is not the JSON we expected.
    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl ClientError {
    /// Normalizes a non-2xx response into [`ClientError::Http`].
    pub fn from_response(status: u16, body: &str) -> Self {
        let payload = ErrorPayload::from_body(body);
        let message = payload
            .error_field()
            .map(str::to_string)
            .unwrap_or_else(|| format!("Request failed with status {}", status));
        ClientError::Http {
            message,
            status,
            payload,
        }
    }

    pub fn missing_body(message: impl Into<String>) -> Self {
        ClientError::MissingBody {
            message: message.into(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn payload(&self) -> Option<&ErrorPayload> {
        match self {
            ClientError::Http { payload, .. } => Some(payload),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn uses_error_field_when_present() {
        let err = ClientError::from_response(404, r#"{"error":"Sheet not found"}"#);
        assert_eq!(err.to_string(), "Sheet not found");
        assert_eq!(err.status(), Some(404));
        assert_eq!(
            err.payload(),
            Some(&ErrorPayload::Json(json!({"error": "Sheet not found"})))
        );
    }

    #[test]
    fn plain_text_body_falls_back_to_status_message() {
        let err = ClientError::from_response(502, "Bad Gateway");
        assert_eq!(err.to_string(), "Request failed with status 502");
        assert_eq!(
            err.payload(),
            Some(&ErrorPayload::Text("Bad Gateway".into()))
        );
    }

    #[test]
    fn json_without_error_field_falls_back_to_status_message() {
        let err = ClientError::from_response(500, r#"{"message":"boom"}"#);
        assert_eq!(err.to_string(), "Request failed with status 500");
    }

    #[test]
    fn empty_or_non_string_error_field_is_ignored() {
        let err = ClientError::from_response(400, r#"{"error":""}"#);
        assert_eq!(err.to_string(), "Request failed with status 400");

        let err = ClientError::from_response(400, r#"{"error":{"code":7}}"#);
        assert_eq!(err.to_string(), "Request failed with status 400");
    }

    #[test]
    fn empty_body_is_kept_as_text() {
        let err = ClientError::from_response(503, "");
        assert_eq!(err.to_string(), "Request failed with status 503");
        assert_eq!(err.payload(), Some(&ErrorPayload::Text(String::new())));
    }

    #[test]
    fn non_http_errors_have_no_status() {
        assert_eq!(ClientError::missing_body("x").status(), None);
        assert_eq!(ClientError::Transport("refused".into()).status(), None);
    }
}
