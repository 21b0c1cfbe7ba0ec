//! Error types for the Museume client.
//!
//! Every failure of the remote call layer is normalized into [`ApiError`],
//! whose [`ApiError::message`] is the single human-readable string the store
//! records and the toast queue shows.

use thiserror::Error;

/// Shown when the server gives no usable message.
pub const FALLBACK_MESSAGE: &str = "Something went wrong. Please try again.";

/// Shown when the request never reached the server.
pub const NETWORK_MESSAGE: &str = "Could not reach the server. Please check your connection.";

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("invalid response body: {0}")]
    Decode(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// Build a status error from a non-2xx response body.
    pub fn from_response(status: u16, body: &str) -> Self {
        Self::Status {
            status,
            message: extract_message(body).unwrap_or_else(|| FALLBACK_MESSAGE.to_string()),
        }
    }

    /// User-facing message.
    pub fn message(&self) -> String {
        match self {
            Self::Status { message, .. } => message.clone(),
            Self::Network(_) => NETWORK_MESSAGE.to_string(),
            Self::Decode(_) => FALLBACK_MESSAGE.to_string(),
            Self::Config(detail) => detail.clone(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Pull a message out of an error body.
///
/// Lookup order: `message`, `error`, `errors` (string only), `detail`.
/// Non-JSON and blank bodies yield `None`.
pub fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "error", "errors", "detail"]
        .iter()
        .filter_map(|key| value.get(*key))
        .filter_map(|v| v.as_str())
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_field_wins() {
        let body = r#"{"message": "Already liked", "error": "ignored"}"#;
        assert_eq!(extract_message(body).as_deref(), Some("Already liked"));
    }

    #[test]
    fn falls_back_through_known_keys() {
        assert_eq!(
            extract_message(r#"{"error": "Class not found."}"#).as_deref(),
            Some("Class not found.")
        );
        assert_eq!(
            extract_message(r#"{"errors": "Payment record not found."}"#).as_deref(),
            Some("Payment record not found.")
        );
        assert_eq!(
            extract_message(r#"{"detail": "Authentication credentials were not provided."}"#)
                .as_deref(),
            Some("Authentication credentials were not provided.")
        );
    }

    #[test]
    fn field_error_maps_use_fallback() {
        let err = ApiError::from_response(400, r#"{"title": ["This field is required."]}"#);
        assert_eq!(err.message(), FALLBACK_MESSAGE);
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn html_body_uses_fallback() {
        let err = ApiError::from_response(502, "<html>Bad Gateway</html>");
        assert_eq!(err.message(), FALLBACK_MESSAGE);
    }

    #[test]
    fn blank_message_is_skipped() {
        assert_eq!(
            extract_message(r#"{"message": "  ", "detail": "Not found."}"#).as_deref(),
            Some("Not found.")
        );
    }
}
