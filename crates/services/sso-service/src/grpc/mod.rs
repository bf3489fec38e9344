//! gRPC request boundary.

mod sso_grpc;
pub mod validation;

pub use sso_grpc::SsoGrpcService;
