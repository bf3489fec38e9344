//! Connection and migration lifecycle on in-memory SQLite.

use common::{DatabaseConfig, StoreError};
use sso_service_lib::infra::Database;
use sso_service_lib::storage::{CredentialStore, SqlStore};

fn memory_config() -> DatabaseConfig {
    DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
        connect_timeout_secs: 5,
    }
}

#[tokio::test]
async fn test_connect_applies_all_migrations() {
    let db = Database::connect(&memory_config()).await.unwrap();

    db.ping().await.unwrap();

    let status = db.migration_status().await.unwrap();
    let names: Vec<&str> = status.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(
        names,
        [
            "m20240101_000001_create_users_table",
            "m20240101_000002_create_apps_table"
        ]
    );
    assert!(status.iter().all(|(_, applied)| *applied));
}

#[tokio::test]
async fn test_rollback_then_reapply() {
    let db = Database::connect(&memory_config()).await.unwrap();

    db.rollback_migration().await.unwrap();
    let status = db.migration_status().await.unwrap();
    assert_eq!(
        status.iter().map(|(_, applied)| *applied).collect::<Vec<_>>(),
        [true, false]
    );

    db.run_migrations().await.unwrap();
    let status = db.migration_status().await.unwrap();
    assert!(status.iter().all(|(_, applied)| *applied));
}

#[tokio::test]
async fn test_fresh_on_unmigrated_database() {
    let db = Database::connect_without_migrations(&memory_config())
        .await
        .unwrap();

    db.ping().await.unwrap();
    db.fresh_migrations().await.unwrap();

    let status = db.migration_status().await.unwrap();
    assert_eq!(status.len(), 2);
    assert!(status.iter().all(|(_, applied)| *applied));
}

#[tokio::test]
async fn test_fresh_drops_existing_data() {
    let db = Database::connect(&memory_config()).await.unwrap();
    let store = SqlStore::new(db.get_connection());
    store.save_user("alice@example.com", "hash").await.unwrap();

    db.fresh_migrations().await.unwrap();

    assert!(matches!(
        store.find_user_by_email("alice@example.com").await,
        Err(StoreError::UserNotFound)
    ));
    let status = db.migration_status().await.unwrap();
    assert!(status.iter().all(|(_, applied)| *applied));
}
