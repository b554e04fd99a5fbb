// --- File: crates/services/inkslot_desk/src/error.rs ---
use inkslot_client::ClientError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeskError {
    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("Availability could not be loaded: {0}")]
    Unavailable(String),
}

impl DeskError {
    pub fn user_message(&self) -> String {
        match self {
            DeskError::Client(err) => err.user_message(),
            other => other.to_string(),
        }
    }
}

pub fn usage(message: impl Into<String>) -> DeskError {
    DeskError::Usage(message.into())
}
