use thiserror::Error;

use crate::model::ModelError;

/// Failures of order operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// Missing product or order; the message names what was missing.
    #[error("{0}")]
    NotFound(String),
    #[error("Insufficient stock for {product}. Available: {available}")]
    InsufficientStock { product: String, available: u32 },
    /// Requester is neither the owner nor allowed by role.
    #[error("{0}")]
    Forbidden(String),
    /// The order's status does not allow the operation.
    #[error("{0}")]
    InvalidState(String),
    /// Malformed request that deserialized but is semantically invalid.
    #[error("{0}")]
    InvalidRequest(String),
    /// Concurrent updates kept invalidating the operation's reads.
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    Store(#[from] ModelError),
}

impl OrderError {
    pub fn order_not_found() -> Self {
        OrderError::NotFound("Order not found".into())
    }

    pub fn product_not_found(id: &str) -> Self {
        OrderError::NotFound(format!("Product not found: {}", id))
    }

    pub fn access_denied() -> Self {
        OrderError::Forbidden("Access denied".into())
    }

    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            OrderError::NotFound(_) => 404,
            OrderError::InsufficientStock { .. } => 400,
            OrderError::Forbidden(_) => 403,
            OrderError::InvalidState(_) => 400,
            OrderError::InvalidRequest(_) => 400,
            OrderError::Conflict(_) => 409,
            OrderError::Store(_) => 500,
        }
    }
}
