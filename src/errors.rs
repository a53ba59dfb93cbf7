// src/errors.rs

use reqwest::StatusCode;
use thiserror::Error;

pub type CopilotoResult<T> = Result<T, CopilotoError>;

#[derive(Debug, Error)]
pub enum CopilotoError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("backend returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to start logger: {0}")]
    Logger(#[from] flexi_logger::FlexiLoggerError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CopilotoError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        CopilotoError::Config(msg.into())
    }

    /// True when the request never produced an HTTP response in time.
    pub fn is_timeout(&self) -> bool {
        matches!(self, CopilotoError::Request(e) if e.is_timeout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = CopilotoError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "backend returned 500 Internal Server Error: boom");
        assert!(!err.is_timeout());
    }

    #[test]
    fn test_config_error_helper() {
        let err = CopilotoError::config_error("base_url is required");
        assert!(matches!(err, CopilotoError::Config(ref m) if m == "base_url is required"));
    }
}
