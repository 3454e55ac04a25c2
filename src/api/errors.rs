//! Errors raised while talking to the REST backend

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend error (status {status}): {}", .message.as_deref().unwrap_or("no message"))]
    Status {
        status: u16,
        message: Option<String>,
    },

    #[error("Failed to decode backend response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),
}

impl ApiError {
    /// Human-readable message supplied by the backend under the `error` key,
    /// if the failed response carried one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_only_for_status_errors() {
        let err = ApiError::Status {
            status: 400,
            message: Some("Rating must be between 1 and 5".to_string()),
        };
        assert_eq!(err.server_message(), Some("Rating must be between 1 and 5"));
        assert_eq!(
            err.to_string(),
            "Backend error (status 400): Rating must be between 1 and 5"
        );

        let err = ApiError::Status { status: 500, message: None };
        assert_eq!(err.server_message(), None);
        assert_eq!(err.to_string(), "Backend error (status 500): no message");

        let decode = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(ApiError::Decode(decode).server_message(), None);
    }
}
