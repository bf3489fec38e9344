//! Common utilities shared across the SSO crates.
//!
//! This crate provides:
//! - The storage and service error vocabularies
//! - Mapping of service errors onto gRPC status codes
//! - Configuration structures

pub mod config;
pub mod error;

pub use config::*;
pub use error::{AppError, AppResult, StoreError, StoreResult};
