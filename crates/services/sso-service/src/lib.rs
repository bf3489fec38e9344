//! SSO Service Library
//!
//! Single-sign-on over gRPC: user registration, application-scoped login
//! returning a signed token, and admin checks.

pub mod config;
pub mod grpc;
pub mod infra;
pub mod service;
pub mod storage;
pub mod telemetry;
pub mod token;

use std::net::SocketAddr;
use std::sync::Arc;

use tonic::transport::Server;
use tracing::{info, warn};

use crate::config::SsoConfig;
use crate::grpc::SsoGrpcService;
use crate::infra::Database;
use crate::service::{AuthService, Authenticator};
use crate::storage::SqlStore;
use domain::{App, HashCost};

/// Build the tonic service around an auth service.
pub fn grpc_server(auth: Arc<dyn AuthService>) -> proto::AuthServer<SsoGrpcService> {
    proto::AuthServer::new(SsoGrpcService::new(auth))
}

/// Run the gRPC server until SIGINT/SIGTERM.
pub async fn run_server(config: SsoConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Initialize database
    let db = Database::connect(&config.database).await?;
    let store = Arc::new(SqlStore::new(db.get_connection()));

    if config.hash_cost == HashCost::Minimal {
        warn!("Password hashing uses the minimal Argon2 cost; do not use in production");
    }

    let auth = Arc::new(Authenticator::new(
        store,
        config.token.ttl(),
        config.hash_cost,
    ));

    // Build address
    let addr: SocketAddr = format!("{}:{}", config.service.host, config.service.port).parse()?;
    info!(
        service = %config.service.service_name,
        env = %config.env,
        token_ttl_secs = config.token.ttl_secs,
        "SSO service listening on {}",
        addr
    );

    // Run server
    Server::builder()
        .timeout(config.service.request_timeout())
        .add_service(grpc_server(auth))
        .serve_with_shutdown(addr, shutdown_signal())
        .await?;

    info!("SSO service stopped");
    Ok(())
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(
    config: &SsoConfig,
    action: MigrateAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Register an application out-of-band (for CLI commands).
pub async fn provision_app(config: &SsoConfig, app: App) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect(&config.database).await?;
    let store = SqlStore::new(db.get_connection());

    store.provision_app(&app).await?;
    info!(app_id = app.id, name = %app.name, "Application provisioned");

    Ok(())
}
