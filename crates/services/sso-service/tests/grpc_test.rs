//! gRPC handler tests over the in-memory store.

mod support;

use std::sync::Arc;

use async_trait::async_trait;
use tonic::{Code, Request};

use common::{StoreError, StoreResult};
use domain::{App, User};
use proto::sso::{IsAdminRequest, LoginRequest, RegisterRequest};
use proto::Auth;
use sso_service_lib::grpc::SsoGrpcService;
use sso_service_lib::storage::{CredentialStore, MemoryStore};

use support::{authenticator, test_app, unique_email, APP_ID, UNKNOWN_APP_ID};

const PASSWORD: &str = "hunter2hunter2";

fn memory_service() -> (Arc<MemoryStore>, SsoGrpcService) {
    let store = Arc::new(MemoryStore::with_apps([test_app()]));
    let service = SsoGrpcService::new(Arc::new(authenticator(store.clone())));
    (store, service)
}

fn register_request(email: &str, password: &str) -> Request<RegisterRequest> {
    Request::new(RegisterRequest {
        email: email.to_string(),
        password: password.to_string(),
    })
}

fn login_request(email: &str, password: &str, app_id: i32) -> Request<LoginRequest> {
    Request::new(LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
        app_id,
    })
}

/// Store whose every call fails with an infrastructure error
struct BrokenStore;

#[async_trait]
impl CredentialStore for BrokenStore {
    async fn save_user(&self, _email: &str, _password_hash: &str) -> StoreResult<i64> {
        Err(StoreError::internal("disk I/O error at /var/lib/sso.db"))
    }

    async fn find_user_by_email(&self, _email: &str) -> StoreResult<User> {
        Err(StoreError::internal("disk I/O error at /var/lib/sso.db"))
    }

    async fn is_admin(&self, _user_id: i64) -> StoreResult<bool> {
        Err(StoreError::internal("disk I/O error at /var/lib/sso.db"))
    }

    async fn find_app(&self, _app_id: i32) -> StoreResult<App> {
        Err(StoreError::internal("disk I/O error at /var/lib/sso.db"))
    }
}

#[tokio::test]
async fn test_invalid_requests_never_reach_the_store() {
    let (store, service) = memory_service();

    let cases = [
        register_request("", PASSWORD),
        register_request("not-an-email", PASSWORD),
        register_request(&unique_email(), ""),
    ];
    for request in cases {
        let status = service.register(request).await.unwrap_err();
        assert_eq!(status.code(), Code::InvalidArgument);
    }

    let status = service
        .login(login_request(&unique_email(), PASSWORD, 0))
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::InvalidArgument);
    assert_eq!(status.message(), "app_id is required");

    let status = service
        .is_admin(Request::new(IsAdminRequest { user_id: 0 }))
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::InvalidArgument);
    assert_eq!(status.message(), "user_id is required");

    assert_eq!(store.user_count().await, 0);
}

#[tokio::test]
async fn test_register_and_login() {
    let (_store, service) = memory_service();
    let email = unique_email();

    let registered = service
        .register(register_request(&email, PASSWORD))
        .await
        .unwrap()
        .into_inner();
    assert_eq!(registered.user_id, 1);

    let login = service
        .login(login_request(&email, PASSWORD, APP_ID))
        .await
        .unwrap()
        .into_inner();
    assert_eq!(login.token.split('.').count(), 3);
}

#[tokio::test]
async fn test_status_codes() {
    let (_store, service) = memory_service();
    let email = unique_email();
    service
        .register(register_request(&email, PASSWORD))
        .await
        .unwrap();

    let duplicate = service
        .register(register_request(&email, PASSWORD))
        .await
        .unwrap_err();
    assert_eq!(duplicate.code(), Code::AlreadyExists);

    let bad_password = service
        .login(login_request(&email, "not the password", APP_ID))
        .await
        .unwrap_err();
    assert_eq!(bad_password.code(), Code::InvalidArgument);
    assert_eq!(bad_password.message(), "invalid credentials");

    let bad_app = service
        .login(login_request(&email, PASSWORD, UNKNOWN_APP_ID))
        .await
        .unwrap_err();
    assert_eq!(bad_app.code(), Code::NotFound);

    let missing_user = service
        .is_admin(Request::new(IsAdminRequest { user_id: 99 }))
        .await
        .unwrap_err();
    assert_eq!(missing_user.code(), Code::NotFound);
}

#[tokio::test]
async fn test_is_admin_reflects_flag() {
    let (store, service) = memory_service();
    let user_id = service
        .register(register_request(&unique_email(), PASSWORD))
        .await
        .unwrap()
        .into_inner()
        .user_id;

    store.set_admin(user_id, true).await.unwrap();

    let response = service
        .is_admin(Request::new(IsAdminRequest { user_id }))
        .await
        .unwrap()
        .into_inner();
    assert!(response.is_admin);
}

#[tokio::test]
async fn test_internal_errors_are_opaque() {
    let service = SsoGrpcService::new(Arc::new(authenticator(Arc::new(BrokenStore))));

    let statuses = [
        service
            .register(register_request(&unique_email(), PASSWORD))
            .await
            .unwrap_err(),
        service
            .login(login_request(&unique_email(), PASSWORD, APP_ID))
            .await
            .unwrap_err(),
        service
            .is_admin(Request::new(IsAdminRequest { user_id: 1 }))
            .await
            .unwrap_err(),
    ];

    for status in statuses {
        assert_eq!(status.code(), Code::Internal);
        assert_eq!(status.message(), "internal error");
        assert!(!status.message().contains("/var/lib"));
    }
}
