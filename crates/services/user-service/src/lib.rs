//! User Service Library
//!
//! CRUD HTTP service for user records (name, date of birth, derived age).
//!
//! # Layers
//!
//! - **repository**: persistence port, SeaORM and in-memory implementations
//! - **service**: validation, age calculation and persistence orchestration
//! - **api**: axum handlers, extractors, routes and OpenAPI document
//! - **infra**: database connection
//! - **config** / **logging**: environment-driven settings and tracing setup

pub mod api;
pub mod config;
pub mod infra;
pub mod logging;
pub mod repository;
pub mod service;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tracing::{info, warn};

use crate::api::{create_router, AppState};
use crate::config::{StorageBackend, UserServiceConfig};
use crate::infra::Database;
use crate::repository::{InMemoryUserStore, UserRepository, UserStore};
use crate::service::{UserManager, UserService};

/// Build the HTTP application around an already-constructed repository.
pub fn build_app(repo: Arc<dyn UserRepository>, database: Option<Arc<Database>>) -> Router {
    let user_service: Arc<dyn UserService> = Arc::new(UserManager::with_system_clock(repo));
    create_router(AppState::new(user_service, database))
}

/// Run the HTTP server with the given configuration.
pub async fn run(config: UserServiceConfig) -> Result<(), Box<dyn std::error::Error>> {
    let (repo, database) = match config.storage {
        StorageBackend::Postgres => {
            if config.uses_default_database() {
                warn!("DATABASE_URL not set, using default");
            }
            let db = Arc::new(Database::connect(&config.database).await?);
            let repo: Arc<dyn UserRepository> = Arc::new(UserStore::new(db.get_connection()));
            (repo, Some(db))
        }
        StorageBackend::Memory => {
            info!("Using in-memory storage; records are lost on exit");
            let repo: Arc<dyn UserRepository> = Arc::new(InMemoryUserStore::new());
            (repo, None)
        }
    };

    let app = build_app(repo, database);

    let addr: SocketAddr = format!("{}:{}", config.service.host, config.service.port).parse()?;
    info!(service = %config.service.service_name, "listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
