//! SSO Service - gRPC server for single sign-on.

use clap::{Parser, Subcommand};

use domain::App;
use sso_service_lib::config::SsoConfig;
use sso_service_lib::{telemetry, MigrateAction};

#[derive(Parser)]
#[command(name = "sso-service")]
#[command(about = "Single sign-on authentication service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the gRPC server
    Serve {
        /// Overrides SSO_HOST
        #[arg(long)]
        host: Option<String>,
        /// Overrides SSO_PORT
        #[arg(long)]
        port: Option<u16>,
    },
    /// Database migration commands
    Migrate {
        #[command(subcommand)]
        action: MigrateCommands,
    },
    /// Application (tenant) management
    App {
        #[command(subcommand)]
        action: AppCommands,
    },
}

#[derive(Subcommand)]
enum MigrateCommands {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

#[derive(Subcommand)]
enum AppCommands {
    /// Register a client application and its signing secret
    Add {
        #[arg(long)]
        id: i32,
        #[arg(long)]
        name: String,
        #[arg(long, env = "SSO_APP_SECRET", hide_env_values = true)]
        secret: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load environment variables
    dotenvy::dotenv().ok();

    let mut config = SsoConfig::from_env()?;
    telemetry::init(config.env);

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.service.host = host;
            }
            if let Some(port) = port {
                config.service.port = port;
            }
            sso_service_lib::run_server(config).await?;
        }
        Commands::Migrate { action } => {
            let migrate_action = match action {
                MigrateCommands::Up => MigrateAction::Up,
                MigrateCommands::Down => MigrateAction::Down,
                MigrateCommands::Status => MigrateAction::Status,
                MigrateCommands::Fresh => MigrateAction::Fresh,
            };
            sso_service_lib::run_migrations(&config, migrate_action).await?;
        }
        Commands::App {
            action: AppCommands::Add { id, name, secret },
        } => {
            sso_service_lib::provision_app(&config, App::new(id, name, secret)).await?;
        }
    }

    Ok(())
}
