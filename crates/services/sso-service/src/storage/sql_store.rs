//! SeaORM-backed credential store (SQLite or Postgres).

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set, SqlErr};

use super::entities::app::{self, Entity as AppEntity};
use super::entities::user::{self, Entity as UserEntity};
use super::CredentialStore;
use common::{StoreError, StoreResult};
use domain::{App, User};

/// Concrete implementation of CredentialStore over a SQL database
pub struct SqlStore {
    db: DatabaseConnection,
}

impl SqlStore {
    /// Create new store instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Register an application. Not part of the RPC surface; used by the
    /// provisioning command.
    pub async fn provision_app(&self, app: &App) -> StoreResult<()> {
        let model = app::ActiveModel {
            id: Set(app.id),
            name: Set(app.name.clone()),
            secret: Set(app.secret.clone()),
        };

        match AppEntity::insert(model).exec(&self.db).await {
            Ok(_) => Ok(()),
            Err(err) if is_unique_violation(&err) => Err(StoreError::AppExists),
            Err(err) => Err(StoreError::from(err)),
        }
    }
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

#[async_trait]
impl CredentialStore for SqlStore {
    async fn save_user(&self, email: &str, password_hash: &str) -> StoreResult<i64> {
        let model = user::ActiveModel {
            email: Set(email.to_string()),
            pass_hash: Set(password_hash.to_string()),
            is_admin: Set(false),
            ..Default::default()
        };

        // The unique index on email decides races between concurrent inserts
        match UserEntity::insert(model).exec(&self.db).await {
            Ok(result) => Ok(result.last_insert_id),
            Err(err) if is_unique_violation(&err) => Err(StoreError::UserExists),
            Err(err) => Err(StoreError::from(err)),
        }
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<User> {
        UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?
            .map(User::from)
            .ok_or(StoreError::UserNotFound)
    }

    async fn is_admin(&self, user_id: i64) -> StoreResult<bool> {
        UserEntity::find_by_id(user_id)
            .one(&self.db)
            .await?
            .map(|model| model.is_admin)
            .ok_or(StoreError::UserNotFound)
    }

    async fn find_app(&self, app_id: i32) -> StoreResult<App> {
        AppEntity::find_by_id(app_id)
            .one(&self.db)
            .await?
            .map(App::from)
            .ok_or(StoreError::AppNotFound)
    }
}
