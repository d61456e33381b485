//! User service configuration.

use std::env;
use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;

use common::{DatabaseConfig, ServiceConfig};

/// Where user records are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackend {
    /// Relational store (Postgres via SeaORM)
    Postgres,
    /// Process-local map, lost on exit
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" => Ok(StorageBackend::Postgres),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(format!("unknown storage backend: {}", other)),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::Postgres => write!(f, "postgres"),
            StorageBackend::Memory => write!(f, "memory"),
        }
    }
}

/// User service configuration.
#[derive(Debug, Clone)]
pub struct UserServiceConfig {
    /// Bind address and service name
    pub service: ServiceConfig,
    /// Database connection settings
    pub database: DatabaseConfig,
    /// Storage backend for user records
    pub storage: StorageBackend,
    /// Deployment environment (`production` switches logs to JSON)
    pub app_env: String,
}

impl UserServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            service: ServiceConfig {
                service_name: defaults.service.service_name,
                host: env::var("HOST").unwrap_or(defaults.service.host),
                port: env::var("PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(defaults.service.port),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").unwrap_or(defaults.database.url),
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|n| n.parse().ok())
                    .unwrap_or(defaults.database.max_connections),
                min_connections: env::var("DATABASE_MIN_CONNECTIONS")
                    .ok()
                    .and_then(|n| n.parse().ok())
                    .unwrap_or(defaults.database.min_connections),
            },
            storage: env::var("STORAGE_BACKEND")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.storage),
            app_env: env::var("APP_ENV").unwrap_or(defaults.app_env),
        }
    }

    /// Whether the database URL is the built-in development default
    pub fn uses_default_database(&self) -> bool {
        self.database.url == DatabaseConfig::default().url
    }

    /// Whether logs should be emitted as JSON
    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }
}

impl Default for UserServiceConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                service_name: "user-service".to_string(),
                ..ServiceConfig::default()
            },
            database: DatabaseConfig::default(),
            storage: StorageBackend::Postgres,
            app_env: "development".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = UserServiceConfig::default();

        assert_eq!(config.service.port, 8080);
        assert_eq!(config.storage, StorageBackend::Postgres);
        assert!(config.uses_default_database());
        assert!(!config.is_production());
    }

    #[test]
    fn test_storage_backend_parsing() {
        assert_eq!("memory".parse::<StorageBackend>(), Ok(StorageBackend::Memory));
        assert_eq!("Postgres".parse::<StorageBackend>(), Ok(StorageBackend::Postgres));
        assert!("sqlite".parse::<StorageBackend>().is_err());
    }
}
