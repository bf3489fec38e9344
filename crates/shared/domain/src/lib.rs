//! Domain layer - Core SSO entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! Users and applications are shared between the store, the token issuer
//! and the auth service.

pub mod app;
pub mod constants;
pub mod error;
pub mod password;
pub mod user;

pub use app::App;
pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use password::{HashCost, Password};
pub use user::User;
