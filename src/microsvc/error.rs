//! Error types for microsvc command handlers.

use thiserror::Error;

use crate::orders::OrderError;

/// Error type for command handler operations.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// No handler registered for this command name.
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    /// Payload decode / deserialization failed.
    #[error("decode failed: {0}")]
    DecodeFailed(String),
    /// Guard rejected the command (input validation failed).
    #[error("guard rejected command: {0}")]
    GuardRejected(String),
    /// Missing authentication.
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    /// The order service refused or failed the operation.
    #[error(transparent)]
    Order(#[from] OrderError),
    /// Other error.
    #[error("handler error: {0}")]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl From<serde_json::Error> for HandlerError {
    fn from(err: serde_json::Error) -> Self {
        HandlerError::DecodeFailed(err.to_string())
    }
}

impl HandlerError {
    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            HandlerError::UnknownCommand(_) => 404,
            HandlerError::DecodeFailed(_) => 400,
            HandlerError::GuardRejected(_) => 400,
            HandlerError::Unauthorized(_) => 401,
            HandlerError::Order(e) => e.status_code(),
            HandlerError::Other(_) => 500,
        }
    }
}
