//! Unified error handling for the SSO service.
//!
//! Two vocabularies live here:
//! - `StoreError`: what a credential store can report
//! - `AppError`: what the auth service reports, convertible to a tonic `Status`

use thiserror::Error;
use tonic::Status;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

// =============================================================================
// Storage errors
// =============================================================================

/// Outcomes a credential store distinguishes from plain I/O failures.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("user already exists")]
    UserExists,

    #[error("user not found")]
    UserNotFound,

    #[error("app not found")]
    AppNotFound,

    #[error("app already exists")]
    AppExists,

    #[cfg(feature = "database")]
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("storage error: {0}")]
    Internal(String),
}

impl StoreError {
    pub fn internal(msg: impl Into<String>) -> Self {
        StoreError::Internal(msg.into())
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Service errors
// =============================================================================

/// Errors returned by the auth service.
///
/// The first four variants are expected business outcomes and safe to show to
/// callers. `Internal` carries the failing operation and the original error
/// for diagnostics only.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("invalid app id")]
    InvalidAppId,

    #[error("user already exists")]
    UserExists,

    #[error("user not found")]
    UserNotFound,

    #[error("{op}: {source}")]
    Internal {
        op: &'static str,
        #[source]
        source: BoxError,
    },
}

impl AppError {
    /// Wrap an unexpected failure with the operation it was seen in
    pub fn internal(op: &'static str, source: impl Into<BoxError>) -> Self {
        AppError::Internal {
            op,
            source: source.into(),
        }
    }

    /// Get error code for logs
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::InvalidAppId => "INVALID_APP_ID",
            AppError::UserExists => "USER_EXISTS",
            AppError::UserNotFound => "USER_NOT_FOUND",
            AppError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// gRPC code for this error
    pub fn grpc_code(&self) -> tonic::Code {
        match self {
            AppError::InvalidCredentials => tonic::Code::InvalidArgument,
            AppError::InvalidAppId => tonic::Code::NotFound,
            AppError::UserExists => tonic::Code::AlreadyExists,
            AppError::UserNotFound => tonic::Code::NotFound,
            AppError::Internal { .. } => tonic::Code::Internal,
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::Internal { op, source } => {
                tracing::error!(
                    code = self.code(),
                    op = %op,
                    error = %source,
                    "Internal error"
                );
                "internal error".to_string()
            }
            _ => self.to_string(),
        }
    }
}

// =============================================================================
// gRPC Status (Tonic)
// =============================================================================

impl From<AppError> for Status {
    fn from(err: AppError) -> Self {
        Status::new(err.grpc_code(), err.user_message())
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;
