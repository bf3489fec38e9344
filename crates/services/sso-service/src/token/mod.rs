//! Signed, application-scoped access tokens.

mod jwt;

pub use jwt::{issue, verify, TokenClaims, TokenError};
