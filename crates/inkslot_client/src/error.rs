// --- File: crates/inkslot_client/src/error.rs ---
use inkslot_common::InkslotError;
use inkslot_slots::{SelectionError, SpanError};
use thiserror::Error;

/// Errors raised while talking to the studio backend or preparing a call.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport failure: connection refused, timeout, TLS...
    #[error("Backend request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Non-2xx answer from the backend
    #[error("Backend returned an error: {message} (Status: {status_code})")]
    ApiError { status_code: u16, message: String },

    /// The studio's subscription does not allow more appointments or clients
    #[error("Plan limit reached: {0}")]
    SaasLimit(String),

    /// The backend answered with something we refuse to interpret
    #[error("Invalid backend payload: {0}")]
    InvalidPayload(String),

    #[error("Select at least one slot")]
    EmptySelection,

    #[error("Invalid selection: {0}")]
    InvalidSelection(#[from] SelectionError),

    #[error("No appointment is being edited")]
    NotEditing,

    #[error("Unknown time zone: {0}")]
    UnknownTimezone(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error(transparent)]
    Common(#[from] InkslotError),
}

impl From<SpanError> for ClientError {
    fn from(err: SpanError) -> Self {
        match err {
            SpanError::EmptySelection => ClientError::EmptySelection,
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::InvalidPayload(err.to_string())
    }
}

impl ClientError {
    /// Text shown to the person using the form. Every failure is scoped to
    /// the action that triggered it, so the message always invites a retry
    /// or a correction.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::RequestError(_)
            | ClientError::Common(InkslotError::HttpError(_) | InkslotError::TimeoutError(_)) => {
                "The server could not be reached. Please retry.".to_string()
            }
            ClientError::ApiError { message, .. } => message.clone(),
            ClientError::SaasLimit(message) => {
                format!("{} Upgrade the studio plan to continue.", message)
            }
            ClientError::EmptySelection => "Select at least one slot.".to_string(),
            ClientError::InvalidPayload(_) => "Something went wrong. Please retry.".to_string(),
            other => other.to_string(),
        }
    }

    pub fn is_saas_limit(&self) -> bool {
        matches!(self, ClientError::SaasLimit(_))
    }
}
