//! Error types for the commerce service.

use crate::domain::{Amount, OrderId};

/// Domain-level errors (business logic violations).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("payment amount must equal order amount: order has {expected}, payment has {got}")]
    AmountMismatch { expected: Amount, got: Amount },

    #[error("email already registered: {0}")]
    DuplicateEmail(String),

    #[error("order already has a payment: {0}")]
    DuplicatePayment(OrderId),

    #[error("payment already processed")]
    AlreadyProcessed,

    #[error("validation error: {0}")]
    ValidationError(String),
}

/// Repository-level errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Transaction error: {0}")]
    Transaction(String),

    #[error("Entity not found")]
    NotFound,
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::DuplicateEmail(_)
            | DomainError::DuplicatePayment(_)
            | DomainError::AlreadyProcessed => AppError::Conflict(err.to_string()),
            DomainError::InvalidAmount(_)
            | DomainError::AmountMismatch { .. }
            | DomainError::ValidationError(_) => AppError::BadRequest(err.to_string()),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Domain(e) => e.into(),
            RepoError::NotFound => AppError::NotFound("Resource not found".into()),
            RepoError::Database(e) => AppError::Internal(e),
            RepoError::Transaction(e) => AppError::Internal(e),
        }
    }
}
