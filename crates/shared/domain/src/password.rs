//! Password value object - Domain layer password handling.
//!
//! Hashes are Argon2id PHC strings. Verification reads the parameters back
//! from the stored string, so hashes produced under any `HashCost` verify
//! with the same code path.

use std::str::FromStr;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

use crate::error::{DomainError, DomainResult};

/// Plaintext hashed against when the account does not exist, so that an
/// unknown email costs as much as a wrong password.
const DUMMY_PASSWORD: &str = "sso-dummy-password";

/// Work factor used when hashing new passwords.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HashCost {
    /// Argon2id defaults (m=19 MiB, t=2, p=1)
    #[default]
    Standard,
    /// Lowest parameters Argon2 accepts. Only for tests and local development.
    Minimal,
}

impl HashCost {
    fn argon2(self) -> DomainResult<Argon2<'static>> {
        match self {
            HashCost::Standard => Ok(Argon2::default()),
            HashCost::Minimal => {
                let params = Params::new(
                    Params::MIN_M_COST,
                    Params::MIN_T_COST,
                    Params::MIN_P_COST,
                    None,
                )
                .map_err(|e| DomainError::password(format!("Invalid Argon2 params: {}", e)))?;
                Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
            }
        }
    }
}

impl FromStr for HashCost {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(HashCost::Standard),
            "minimal" => Ok(HashCost::Minimal),
            other => Err(DomainError::invalid_value(format!(
                "unknown hash cost '{}', expected 'standard' or 'minimal'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for HashCost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HashCost::Standard => write!(f, "standard"),
            HashCost::Minimal => write!(f, "minimal"),
        }
    }
}

/// Password value object that handles hashing and verification.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output (security)
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Hash a plaintext password with a fresh random salt.
    ///
    /// No length or strength rules are applied here; request shape is
    /// validated before the domain is reached.
    pub fn new(plain_text: &str, cost: HashCost) -> DomainResult<Self> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = cost
            .argon2()?
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| DomainError::password(format!("Password hash failed: {}", e)))?;
        Ok(Self {
            hash: hash.to_string(),
        })
    }

    /// Hash of a fixed throwaway password, used to equalise login timing.
    pub fn dummy(cost: HashCost) -> DomainResult<Self> {
        Self::new(DUMMY_PASSWORD, cost)
    }

    /// Create a Password from an existing hash (from storage).
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }

    /// Get the hash string for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Consume and return the hash string.
    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plain text password against this hash.
    ///
    /// A malformed stored hash never matches.
    pub fn verify(&self, plain_text: &str) -> bool {
        match PasswordHash::new(&self.hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(plain_text.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.hash
    }
}
