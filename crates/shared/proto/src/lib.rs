//! gRPC protocol buffer definitions.
//!
//! This crate contains the generated definitions for the `sso.Auth`
//! service: Register, Login and IsAdmin.

/// SSO service definitions.
pub mod sso {
    tonic::include_proto!("sso");
}

// Re-export commonly used items
pub use sso::auth_server::{Auth, AuthServer};
