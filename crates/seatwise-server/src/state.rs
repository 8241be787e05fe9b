//! Application state and configuration for the API server.

use seatwise_db::repository::{
    SurrealLicenseRepository, SurrealTeamRepository, SurrealVendorRepository,
};
use seatwise_db::{DbError, run_migrations};
use surrealdb::Surreal;
use surrealdb::engine::any::Any;

/// API server state: one repository per entity over the shared
/// connection. Cheap to clone per request.
#[derive(Clone)]
pub struct AppState {
    pub teams: SurrealTeamRepository<Any>,
    pub vendors: SurrealVendorRepository<Any>,
    pub licenses: SurrealLicenseRepository<Any>,
}

impl AppState {
    /// Create app state from a connected database, running any pending
    /// migrations first.
    pub async fn new(db: Surreal<Any>) -> Result<Self, DbError> {
        run_migrations(&db).await?;

        Ok(Self {
            teams: SurrealTeamRepository::new(db.clone()),
            vendors: SurrealVendorRepository::new(db.clone()),
            licenses: SurrealLicenseRepository::new(db),
        })
    }
}

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub enable_cors: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            enable_cors: true,
        }
    }
}

impl ApiConfig {
    /// Build a configuration from `SEATWISE_*` environment variables,
    /// falling back to the defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("SEATWISE_HOST").unwrap_or(defaults.host),
            port: std::env::var("SEATWISE_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            enable_cors: defaults.enable_cors,
        }
    }
}
