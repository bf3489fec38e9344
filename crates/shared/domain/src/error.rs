//! Domain-level errors.
//!
//! These errors represent failures inside domain value objects.
//! They are independent of infrastructure concerns (gRPC, database).

use thiserror::Error;

/// Domain-specific errors.
#[derive(Error, Debug, Clone)]
pub enum DomainError {
    /// Password hashing could not be performed
    #[error("Password error: {0}")]
    Password(String),

    /// A value could not be parsed into a domain type
    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

impl DomainError {
    /// Create a password error
    pub fn password(msg: impl Into<String>) -> Self {
        DomainError::Password(msg.into())
    }

    /// Create an invalid value error
    pub fn invalid_value(msg: impl Into<String>) -> Self {
        DomainError::InvalidValue(msg.into())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
