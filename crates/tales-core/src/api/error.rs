//! Backend error type.

use std::fmt;

use serde_json::Value;

/// Error category for a failed backend call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// Connection refused, DNS failure, reset, etc.
    Network,
    /// The configured request timeout elapsed.
    Timeout,
    /// Non-2xx status code.
    HttpStatus(u16),
    /// Body could not be decoded into the expected shape.
    Parse,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErrorKind::Network => write!(f, "network"),
            ApiErrorKind::Timeout => write!(f, "timeout"),
            ApiErrorKind::HttpStatus(status) => write!(f, "http_status({status})"),
            ApiErrorKind::Parse => write!(f, "parse"),
        }
    }
}

/// Structured error from the backend with kind and details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// Error category
    pub kind: ApiErrorKind,
    /// One-line summary for logs
    pub message: String,
    /// Server-supplied `detail` string, when the error body carried one
    pub detail: Option<String>,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            detail: None,
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Network, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Timeout, message)
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Parse, message)
    }

    /// Creates an HTTP status error, pulling `detail` out of a JSON body.
    ///
    /// Only a non-empty string `detail` counts; list-shaped validation
    /// details are ignored.
    pub fn http_status(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|json| {
                json.get("detail")
                    .and_then(Value::as_str)
                    .map(str::trim)
                    .filter(|detail| !detail.is_empty())
                    .map(ToString::to_string)
            });

        let message = match &detail {
            Some(detail) => format!("HTTP {status}: {detail}"),
            None => format!("HTTP {status}"),
        };

        Self {
            kind: ApiErrorKind::HttpStatus(status),
            message,
            detail,
        }
    }

    /// Returns the server detail, or `fallback` when there is none.
    pub fn user_message<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.detail.as_deref().unwrap_or(fallback)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::timeout(err.to_string())
        } else if err.is_decode() {
            ApiError::parse(err.to_string())
        } else {
            ApiError::network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_extracts_detail() {
        let err = ApiError::http_status(409, r#"{"detail":"User already exists"}"#);
        assert_eq!(err.kind, ApiErrorKind::HttpStatus(409));
        assert_eq!(err.detail.as_deref(), Some("User already exists"));
        assert_eq!(err.message, "HTTP 409: User already exists");
    }

    #[test]
    fn test_http_status_without_detail() {
        let err = ApiError::http_status(500, "Internal Server Error");
        assert_eq!(err.detail, None);
        assert_eq!(err.message, "HTTP 500");
        assert_eq!(err.user_message("Login failed"), "Login failed");
    }

    #[test]
    fn test_http_status_ignores_non_string_detail() {
        let body = r#"{"detail":[{"loc":["body","phone"],"msg":"field required"}]}"#;
        let err = ApiError::http_status(422, body);
        assert_eq!(err.detail, None);
    }

    #[test]
    fn test_http_status_ignores_blank_detail() {
        let err = ApiError::http_status(401, r#"{"detail":"  "}"#);
        assert_eq!(err.user_message("Login failed"), "Login failed");
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ApiErrorKind::HttpStatus(404).to_string(), "http_status(404)");
        assert_eq!(ApiErrorKind::Network.to_string(), "network");
    }
}
