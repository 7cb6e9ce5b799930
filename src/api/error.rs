//! Errors raised by the prediction service client

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid API URL: {0}")]
    Url(String),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server returned {status}{}", detail_suffix(.message))]
    Status { status: u16, message: Option<String> },

    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Message supplied by the server in the `error` field of its body
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

fn detail_suffix(message: &Option<String>) -> String {
    message.as_deref().map(|m| format!(": {m}")).unwrap_or_default()
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message() {
        let err = ApiError::Status {
            status: 400,
            message: Some("No symptoms provided".to_string()),
        };
        assert_eq!(err.server_message(), Some("No symptoms provided"));
        assert_eq!(err.to_string(), "Server returned 400: No symptoms provided");
    }

    #[test]
    fn test_status_without_message() {
        let err = ApiError::Status {
            status: 502,
            message: None,
        };
        assert_eq!(err.server_message(), None);
        assert_eq!(err.to_string(), "Server returned 502");
    }

    #[test]
    fn test_url_error_has_no_server_message() {
        assert!(ApiError::Url("nope".into()).server_message().is_none());
    }
}
