//! Shared fixtures for integration tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use common::DatabaseConfig;
use domain::{App, HashCost};
use sso_service_lib::infra::Database;
use sso_service_lib::service::Authenticator;
use sso_service_lib::storage::{CredentialStore, SqlStore};

pub const APP_ID: i32 = 1;
pub const APP_SECRET: &str = "test-secret";
pub const UNKNOWN_APP_ID: i32 = 404;
pub const TOKEN_TTL: Duration = Duration::from_secs(3600);

static EMAIL_SEQ: AtomicU64 = AtomicU64::new(0);

/// Email address unique within this test process
pub fn unique_email() -> String {
    let n = EMAIL_SEQ.fetch_add(1, Ordering::Relaxed);
    format!("user{}-{}@example.com", std::process::id(), n)
}

pub fn test_app() -> App {
    App::new(APP_ID, "test", APP_SECRET)
}

/// Fresh in-memory SQLite database with migrations applied and the test
/// application provisioned.
pub async fn sqlite_store() -> Arc<SqlStore> {
    // One connection: every sqlite::memory: connection is its own database
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
        connect_timeout_secs: 5,
    };
    let db = Database::connect(&config).await.expect("connect sqlite");
    let store = SqlStore::new(db.get_connection());
    store.provision_app(&test_app()).await.expect("provision app");
    Arc::new(store)
}

pub fn authenticator(store: Arc<dyn CredentialStore>) -> Authenticator {
    Authenticator::new(store, TOKEN_TTL, HashCost::Minimal)
}
