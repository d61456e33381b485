//! User Service - HTTP server for user records.

use clap::{Parser, Subcommand};

use user_service_lib::config::{StorageBackend, UserServiceConfig};

#[derive(Parser)]
#[command(name = "user-service")]
#[command(about = "User records CRUD service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Address to bind (overrides HOST)
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on (overrides PORT)
        #[arg(long)]
        port: Option<u16>,
        /// Storage backend (overrides STORAGE_BACKEND)
        #[arg(long, value_enum)]
        storage: Option<StorageBackend>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = UserServiceConfig::from_env();

    user_service_lib::logging::init_tracing(config.is_production());
    tracing::debug!(?config, "Configuration loaded");

    match cli.command {
        Commands::Serve {
            host,
            port,
            storage,
        } => {
            if let Some(host) = host {
                config.service.host = host;
            }
            if let Some(port) = port {
                config.service.port = port;
            }
            if let Some(storage) = storage {
                config.storage = storage;
            }

            if let Err(e) = user_service_lib::run(config).await {
                tracing::error!("Server failed: {}", e);
                return Err(e);
            }
        }
    }

    Ok(())
}
