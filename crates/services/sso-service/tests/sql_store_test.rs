//! SqlStore tests against in-memory SQLite.

mod support;

use futures::future::join_all;

use common::StoreError;
use domain::App;
use sso_service_lib::storage::CredentialStore;

use support::{sqlite_store, unique_email, APP_ID, APP_SECRET};

#[tokio::test]
async fn test_save_and_find_user() {
    let store = sqlite_store().await;
    let email = unique_email();

    let id = store.save_user(&email, "hash").await.unwrap();
    let user = store.find_user_by_email(&email).await.unwrap();

    assert_eq!(user.id, id);
    assert_eq!(user.email, email);
    assert_eq!(user.password_hash, "hash");
    assert!(!user.is_admin);
}

#[tokio::test]
async fn test_ids_are_unique() {
    let store = sqlite_store().await;

    let first = store.save_user(&unique_email(), "h").await.unwrap();
    let second = store.save_user(&unique_email(), "h").await.unwrap();

    assert_ne!(first, second);
}

#[tokio::test]
async fn test_duplicate_email_reported_by_constraint() {
    let store = sqlite_store().await;
    let email = unique_email();
    store.save_user(&email, "first").await.unwrap();

    let result = store.save_user(&email, "second").await;

    assert!(matches!(result, Err(StoreError::UserExists)));
    let user = store.find_user_by_email(&email).await.unwrap();
    assert_eq!(user.password_hash, "first");
}

#[tokio::test]
async fn test_missing_user() {
    let store = sqlite_store().await;

    assert!(matches!(
        store.find_user_by_email("nobody@example.com").await,
        Err(StoreError::UserNotFound)
    ));
    assert!(matches!(
        store.is_admin(123_456).await,
        Err(StoreError::UserNotFound)
    ));
}

#[tokio::test]
async fn test_new_user_is_not_admin() {
    let store = sqlite_store().await;
    let id = store.save_user(&unique_email(), "h").await.unwrap();

    assert!(!store.is_admin(id).await.unwrap());
}

#[tokio::test]
async fn test_find_app() {
    let store = sqlite_store().await;

    let app = store.find_app(APP_ID).await.unwrap();
    assert_eq!(app.secret, APP_SECRET);

    assert!(matches!(
        store.find_app(APP_ID + 1).await,
        Err(StoreError::AppNotFound)
    ));
}

#[tokio::test]
async fn test_provision_duplicate_app() {
    let store = sqlite_store().await;

    let result = store
        .provision_app(&App::new(APP_ID, "other-name", "other-secret"))
        .await;

    assert!(matches!(result, Err(StoreError::AppExists)));
}

#[tokio::test]
async fn test_concurrent_saves_with_same_email() {
    let store = sqlite_store().await;
    let email = unique_email();

    let attempts = (0..10).map(|_| store.save_user(&email, "h"));
    let results = join_all(attempts).await;

    let created = results.iter().filter(|r| r.is_ok()).count();
    let duplicates = results
        .iter()
        .filter(|r| matches!(r, Err(StoreError::UserExists)))
        .count();
    assert_eq!(created, 1);
    assert_eq!(duplicates, 9);
}
