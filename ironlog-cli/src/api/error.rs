use reqwest::StatusCode;
use thiserror::Error;

use crate::features::Feature;
use crate::storage::StorageError;

/// API-specific errors
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Session expired, please log in again")]
    SessionExpired,

    #[error("Not authorized: {0}")]
    Unauthorized(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("{0} requires IronLog PRO")]
    ProRequired(Feature),

    #[error("Token store error: {0}")]
    Storage(#[from] StorageError),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl ApiError {
    pub fn from_status(status: StatusCode, body: String) -> Self {
        let message = extract_message(&body);
        let msg = if message.is_empty() {
            status.canonical_reason().unwrap_or("Unknown error").to_string()
        } else {
            message
        };

        match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized(msg),
            StatusCode::FORBIDDEN => ApiError::Unauthorized(msg),
            StatusCode::NOT_FOUND => ApiError::NotFound(msg),
            StatusCode::BAD_REQUEST => ApiError::BadRequest(msg),
            status if status.is_server_error() => ApiError::ServerError(msg),
            status if status.is_client_error() => ApiError::BadRequest(msg),
            _ => ApiError::Unknown(msg),
        }
    }

    /// Whether the failure may go away on its own (network, 5xx)
    pub fn is_transient(&self) -> bool {
        matches!(self, ApiError::NetworkError(_) | ApiError::ServerError(_))
    }

    /// Whether the user has to authenticate again
    pub fn requires_login(&self) -> bool {
        matches!(self, ApiError::NotLoggedIn | ApiError::SessionExpired)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::NetworkError(err.to_string())
        }
    }
}

/// Pull a human readable message out of an error body.
///
/// The backend answers with `{"detail": ...}`, `{"message": ...}` or
/// `{"error": ...}`; field-level validation errors come back as
/// `{"field": ["msg", ...]}`. Anything else is passed through as text.
fn extract_message(body: &str) -> String {
    let trimmed = body.trim();
    let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) else {
        return trimmed.to_string();
    };

    for key in ["detail", "message", "error"] {
        if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
            return text.to_string();
        }
    }

    if let Some(object) = value.as_object() {
        let fields: Vec<String> = object
            .iter()
            .map(|(field, errors)| match errors {
                serde_json::Value::Array(items) => {
                    let joined: Vec<&str> = items.iter().filter_map(|i| i.as_str()).collect();
                    format!("{}: {}", field, joined.join(", "))
                }
                other => format!("{}: {}", field, other),
            })
            .collect();
        if !fields.is_empty() {
            return fields.join("; ");
        }
    }

    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_field_is_used() {
        let err = ApiError::from_status(
            StatusCode::NOT_FOUND,
            r#"{"detail": "Workout not found."}"#.to_string(),
        );
        assert_eq!(err.to_string(), "Resource not found: Workout not found.");
    }

    #[test]
    fn test_field_errors_are_flattened() {
        let err = ApiError::from_status(
            StatusCode::BAD_REQUEST,
            r#"{"reps": ["Ensure this value is greater than 0."]}"#.to_string(),
        );
        assert_eq!(
            err.to_string(),
            "Bad request: reps: Ensure this value is greater than 0."
        );
    }

    #[test]
    fn test_empty_body_uses_canonical_reason() {
        let err = ApiError::from_status(StatusCode::SERVICE_UNAVAILABLE, String::new());
        assert!(matches!(err, ApiError::ServerError(ref m) if m == "Service Unavailable"));
        assert!(err.is_transient());
    }

    #[test]
    fn test_plain_text_body_passes_through() {
        let err = ApiError::from_status(StatusCode::BAD_GATEWAY, "upstream down".to_string());
        assert!(matches!(err, ApiError::ServerError(ref m) if m == "upstream down"));
    }
}
