//! HS256 JWT issuance keyed by the application's own secret.
//!
//! Tokens are stateless: nothing is stored and nothing is revoked. Validity
//! is signature plus `exp`, checked by whoever consumes the token.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use domain::{App, User};

/// JWT claims payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject user id
    pub uid: i64,
    /// Subject email
    pub email: String,
    /// Issuing application id
    #[serde(rename = "appid")]
    pub app_id: i32,
    /// Expiration (unix seconds)
    pub exp: i64,
}

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("token ttl out of range")]
    TtlOutOfRange,

    #[error("token was issued for app {found}, not {expected}")]
    AppMismatch { expected: i32, found: i32 },

    #[error(transparent)]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

/// Sign a token for `user` scoped to `app`, valid for `ttl` from now.
pub fn issue(user: &User, app: &App, ttl: Duration) -> Result<String, TokenError> {
    let ttl = chrono::Duration::from_std(ttl).map_err(|_| TokenError::TtlOutOfRange)?;
    let expires_at = Utc::now()
        .checked_add_signed(ttl)
        .ok_or(TokenError::TtlOutOfRange)?;

    let claims = TokenClaims {
        uid: user.id,
        email: user.email.clone(),
        app_id: app.id,
        exp: expires_at.timestamp(),
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(app.secret_bytes()),
    )?;

    Ok(token)
}

/// Check signature and expiry against `app`'s secret and return the claims.
///
/// A token that embeds another application's id is rejected even if the
/// signature happens to verify.
pub fn verify(token: &str, app: &App) -> Result<TokenClaims, TokenError> {
    let data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(app.secret_bytes()),
        &Validation::new(Algorithm::HS256),
    )?;

    if data.claims.app_id != app.id {
        return Err(TokenError::AppMismatch {
            expected: app.id,
            found: data.claims.app_id,
        });
    }

    Ok(data.claims)
}
