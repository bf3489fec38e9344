//! In-process credential store.
//!
//! Same contract as the SQL store. The duplicate check and the insert run
//! under a single write lock, which makes `save_user` atomic.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::CredentialStore;
use common::{StoreError, StoreResult};
use domain::{App, User};

#[derive(Default)]
struct Tables {
    users: HashMap<i64, User>,
    ids_by_email: HashMap<String, i64>,
    apps: HashMap<i32, App>,
    last_user_id: i64,
}

/// Credential store held entirely in memory
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with applications
    pub fn with_apps(apps: impl IntoIterator<Item = App>) -> Self {
        let tables = Tables {
            apps: apps.into_iter().map(|app| (app.id, app)).collect(),
            ..Default::default()
        };
        Self {
            tables: RwLock::new(tables),
        }
    }

    /// Register an application
    pub async fn provision_app(&self, app: App) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if tables.apps.contains_key(&app.id) {
            return Err(StoreError::AppExists);
        }
        tables.apps.insert(app.id, app);
        Ok(())
    }

    /// Set the admin flag, standing in for an out-of-band admin action
    pub async fn set_admin(&self, user_id: i64, is_admin: bool) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        let user = tables
            .users
            .get_mut(&user_id)
            .ok_or(StoreError::UserNotFound)?;
        user.is_admin = is_admin;
        Ok(())
    }

    /// Number of stored users
    pub async fn user_count(&self) -> usize {
        self.tables.read().await.users.len()
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn save_user(&self, email: &str, password_hash: &str) -> StoreResult<i64> {
        let mut tables = self.tables.write().await;
        if tables.ids_by_email.contains_key(email) {
            return Err(StoreError::UserExists);
        }

        tables.last_user_id += 1;
        let id = tables.last_user_id;
        tables.ids_by_email.insert(email.to_string(), id);
        tables.users.insert(id, User::new(id, email, password_hash));
        Ok(id)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<User> {
        let tables = self.tables.read().await;
        tables
            .ids_by_email
            .get(email)
            .and_then(|id| tables.users.get(id))
            .cloned()
            .ok_or(StoreError::UserNotFound)
    }

    async fn is_admin(&self, user_id: i64) -> StoreResult<bool> {
        let tables = self.tables.read().await;
        tables
            .users
            .get(&user_id)
            .map(|user| user.is_admin)
            .ok_or(StoreError::UserNotFound)
    }

    async fn find_app(&self, app_id: i32) -> StoreResult<App> {
        let tables = self.tables.read().await;
        tables
            .apps
            .get(&app_id)
            .cloned()
            .ok_or(StoreError::AppNotFound)
    }
}
