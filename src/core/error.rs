//! Errors returned by the quote, news and mail seams

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AlertError {
    #[error("Request error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP error: {status} for {endpoint}")]
    Status {
        status: StatusCode,
        endpoint: String,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Rate limited by provider: {0}")]
    RateLimited(String),

    #[error("Provider error: {0}")]
    Api(String),

    #[error("Failed to parse response from {endpoint}: {reason}")]
    Malformed { endpoint: String, reason: String },

    #[error("No quote data found for symbol: {0}")]
    NoData(String),

    #[error("Previous close is zero for symbol: {0}")]
    ZeroPreviousClose(String),

    #[error("Price change out of range for symbol: {0}")]
    ChangeOutOfRange(String),

    #[error("Missing credential: {0} is not set")]
    MissingCredential(&'static str),

    #[error("Mail error: {0}")]
    Mail(String),
}

impl AlertError {
    /// Whether running again later could succeed without any change on our side.
    pub fn is_transient(&self) -> bool {
        match self {
            AlertError::Transport(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            AlertError::Status { status, .. } => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            AlertError::RateLimited(_) => true,
            _ => false,
        }
    }
}
