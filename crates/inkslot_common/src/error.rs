use std::fmt;
use thiserror::Error;

/// Failures of the shared plumbing: building the HTTP client and reaching
/// the backend.
///
/// Crates with richer failure modes keep their own error enum and wrap this
/// one, e.g. `ClientError::Common`.
#[derive(Error, Debug)]
pub enum InkslotError {
    /// Error occurred during an HTTP request
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred due to a timeout
    #[error("Timeout: {0}")]
    TimeoutError(String),
}

impl From<reqwest::Error> for InkslotError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            InkslotError::TimeoutError(err.to_string())
        } else {
            InkslotError::HttpError(err.to_string())
        }
    }
}

pub fn config_error<T: fmt::Display>(message: T) -> InkslotError {
    InkslotError::ConfigError(message.to_string())
}
