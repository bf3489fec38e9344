//! Authentication service - registration, login and admin checks.
//!
//! Store outcomes that represent known business conditions are remapped to
//! the four domain errors. Anything else is passed up as
//! `AppError::Internal` tagged with the operation it came from.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{error, info, instrument, warn};

use crate::storage::CredentialStore;
use crate::token;
use common::{AppError, AppResult, StoreError};
use domain::{HashCost, Password};

const OP_REGISTER: &str = "auth.register";
const OP_LOGIN: &str = "auth.login";
const OP_IS_ADMIN: &str = "auth.is_admin";

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user and return its id
    async fn register(&self, email: &str, password: &str) -> AppResult<i64>;

    /// Check credentials and return a token scoped to `app_id`
    async fn login(&self, email: &str, password: &str, app_id: i32) -> AppResult<String>;

    /// Whether the user holds the admin flag
    async fn is_admin(&self, user_id: i64) -> AppResult<bool>;
}

/// Concrete implementation of AuthService over a credential store.
pub struct Authenticator {
    store: Arc<dyn CredentialStore>,
    token_ttl: Duration,
    hash_cost: HashCost,
    dummy_hash: Password,
}

impl Authenticator {
    /// Create new auth service instance
    pub fn new(store: Arc<dyn CredentialStore>, token_ttl: Duration, hash_cost: HashCost) -> Self {
        // An empty hash never verifies; it only loses the timing equalisation
        let dummy_hash = Password::dummy(hash_cost).unwrap_or_else(|e| {
            warn!(error = %e, "failed to prepare dummy hash");
            Password::from_hash(String::new())
        });

        Self {
            store,
            token_ttl,
            hash_cost,
            dummy_hash,
        }
    }
}

/// Hash on the blocking pool; Argon2 is deliberately slow.
async fn hash_password(op: &'static str, password: &str, cost: HashCost) -> AppResult<Password> {
    let plain = password.to_string();
    tokio::task::spawn_blocking(move || Password::new(&plain, cost))
        .await
        .map_err(|e| AppError::internal(op, e))?
        .map_err(|e| AppError::internal(op, e))
}

async fn verify_password(op: &'static str, stored: Password, password: &str) -> AppResult<bool> {
    let plain = password.to_string();
    tokio::task::spawn_blocking(move || stored.verify(&plain))
        .await
        .map_err(|e| AppError::internal(op, e))
}

#[async_trait]
impl AuthService for Authenticator {
    #[instrument(skip(self, password), fields(op = OP_REGISTER))]
    async fn register(&self, email: &str, password: &str) -> AppResult<i64> {
        info!("registering user");

        let password_hash = hash_password(OP_REGISTER, password, self.hash_cost)
            .await
            .inspect_err(|e| error!(error = %e, "failed to generate password hash"))?;

        match self.store.save_user(email, password_hash.as_str()).await {
            Ok(user_id) => {
                info!(user_id, "user registered");
                Ok(user_id)
            }
            Err(StoreError::UserExists) => {
                warn!("user already exists");
                Err(AppError::UserExists)
            }
            Err(err) => {
                error!(error = %err, "failed to save user");
                Err(AppError::internal(OP_REGISTER, err))
            }
        }
    }

    #[instrument(skip(self, password), fields(op = OP_LOGIN))]
    async fn login(&self, email: &str, password: &str, app_id: i32) -> AppResult<String> {
        info!("attempting to login");

        let user = match self.store.find_user_by_email(email).await {
            Ok(user) => Some(user),
            Err(StoreError::UserNotFound) => None,
            Err(err) => {
                error!(error = %err, "failed to look up user");
                return Err(AppError::internal(OP_LOGIN, err));
            }
        };

        // Verify even when the user is missing so both failures take as long
        let stored = match &user {
            Some(user) => Password::from_hash(user.password_hash.clone()),
            None => self.dummy_hash.clone(),
        };
        let password_valid = verify_password(OP_LOGIN, stored, password).await?;

        let user = match user {
            Some(user) if password_valid => user,
            Some(_) => {
                warn!("invalid password");
                return Err(AppError::InvalidCredentials);
            }
            None => {
                warn!("user not found");
                return Err(AppError::InvalidCredentials);
            }
        };

        let app = match self.store.find_app(app_id).await {
            Ok(app) => app,
            Err(StoreError::AppNotFound) => {
                warn!("app not found");
                return Err(AppError::InvalidAppId);
            }
            Err(err) => {
                error!(error = %err, "failed to look up app");
                return Err(AppError::internal(OP_LOGIN, err));
            }
        };

        let token = token::issue(&user, &app, self.token_ttl).map_err(|err| {
            error!(error = %err, "failed to generate token");
            AppError::internal(OP_LOGIN, err)
        })?;

        info!(user_id = user.id, "successfully logged in");
        Ok(token)
    }

    #[instrument(skip(self), fields(op = OP_IS_ADMIN))]
    async fn is_admin(&self, user_id: i64) -> AppResult<bool> {
        info!("checking if user is admin");

        match self.store.is_admin(user_id).await {
            Ok(is_admin) => {
                info!(is_admin, "checked if user is admin");
                Ok(is_admin)
            }
            Err(StoreError::UserNotFound) => {
                warn!("user not found");
                Err(AppError::UserNotFound)
            }
            Err(err) => {
                error!(error = %err, "failed to check admin flag");
                Err(AppError::internal(OP_IS_ADMIN, err))
            }
        }
    }
}
