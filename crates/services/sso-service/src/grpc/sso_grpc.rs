//! gRPC implementation for the `sso.Auth` service.

use std::sync::Arc;

use tonic::{Request, Response, Status};

use super::validation::validate;
use crate::service::AuthService;
use proto::sso::{
    auth_server::Auth as AuthProto, IsAdminRequest, IsAdminResponse, LoginRequest,
    LoginResponse, RegisterRequest, RegisterResponse,
};

/// gRPC service wrapper for AuthService.
pub struct SsoGrpcService {
    service: Arc<dyn AuthService>,
}

impl SsoGrpcService {
    /// Create a new gRPC service wrapper.
    pub fn new(service: Arc<dyn AuthService>) -> Self {
        Self { service }
    }
}

#[tonic::async_trait]
impl AuthProto for SsoGrpcService {
    async fn register(
        &self,
        request: Request<RegisterRequest>,
    ) -> Result<Response<RegisterResponse>, Status> {
        let req = request.into_inner();
        validate(&req)?;

        let user_id = self
            .service
            .register(&req.email, &req.password)
            .await
            .map_err(Status::from)?;

        Ok(Response::new(RegisterResponse { user_id }))
    }

    async fn login(
        &self,
        request: Request<LoginRequest>,
    ) -> Result<Response<LoginResponse>, Status> {
        let req = request.into_inner();
        validate(&req)?;

        let token = self
            .service
            .login(&req.email, &req.password, req.app_id)
            .await
            .map_err(Status::from)?;

        Ok(Response::new(LoginResponse { token }))
    }

    async fn is_admin(
        &self,
        request: Request<IsAdminRequest>,
    ) -> Result<Response<IsAdminResponse>, Status> {
        let req = request.into_inner();
        validate(&req)?;

        let is_admin = self
            .service
            .is_admin(req.user_id)
            .await
            .map_err(Status::from)?;

        Ok(Response::new(IsAdminResponse { is_admin }))
    }
}
