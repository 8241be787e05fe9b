//! SurrealDB connection management.
//!
//! The endpoint goes through the `any` engine so the same code path
//! serves `ws://` in production and `mem://` in tests.

use std::time::Duration;

use surrealdb::Surreal;
use surrealdb::engine::any::Any;
use surrealdb::opt::auth::Root;
use tracing::info;

use crate::error::DbError;

/// Configuration for connecting to SurrealDB.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Endpoint understood by the `any` engine
    /// (e.g. `ws://127.0.0.1:8000`, `mem://`).
    pub endpoint: String,
    /// SurrealDB namespace.
    pub namespace: String,
    /// SurrealDB database name.
    pub database: String,
    /// Root username for authentication (remote endpoints only).
    pub username: String,
    /// Root password for authentication (remote endpoints only).
    pub password: String,
    /// Abort the connection attempt after this many seconds rather than
    /// hang on an unreachable store.
    pub connect_timeout_secs: u64,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            endpoint: "ws://127.0.0.1:8000".into(),
            namespace: "seatwise".into(),
            database: "main".into(),
            username: "root".into(),
            password: "root".into(),
            connect_timeout_secs: 5,
        }
    }
}

impl DbConfig {
    /// Build a configuration from `SEATWISE_DB_*` environment variables,
    /// falling back to the defaults for anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            endpoint: std::env::var("SEATWISE_DB_ENDPOINT").unwrap_or(defaults.endpoint),
            namespace: std::env::var("SEATWISE_DB_NS").unwrap_or(defaults.namespace),
            database: std::env::var("SEATWISE_DB_NAME").unwrap_or(defaults.database),
            username: std::env::var("SEATWISE_DB_USER").unwrap_or(defaults.username),
            password: std::env::var("SEATWISE_DB_PASS").unwrap_or(defaults.password),
            connect_timeout_secs: defaults.connect_timeout_secs,
        }
    }

    fn is_local(&self) -> bool {
        self.endpoint.starts_with("mem:") || self.endpoint.starts_with("memory")
    }
}

/// Manages a connection to SurrealDB.
#[derive(Clone)]
pub struct DbManager {
    db: Surreal<Any>,
}

impl DbManager {
    /// Connect to SurrealDB using the provided configuration.
    ///
    /// Authenticates as root for remote endpoints, selects the configured
    /// namespace and database, and returns a ready-to-use manager.
    pub async fn connect(config: &DbConfig) -> Result<Self, DbError> {
        info!(
            endpoint = %config.endpoint,
            namespace = %config.namespace,
            database = %config.database,
            "Connecting to SurrealDB"
        );

        let db = tokio::time::timeout(
            Duration::from_secs(config.connect_timeout_secs),
            surrealdb::engine::any::connect(&config.endpoint),
        )
        .await
        .map_err(|_| DbError::ConnectTimeout(config.connect_timeout_secs))??;

        if !config.is_local() {
            db.signin(Root {
                username: config.username.clone(),
                password: config.password.clone(),
            })
            .await?;
        }

        db.use_ns(&config.namespace)
            .use_db(&config.database)
            .await?;

        info!("Successfully connected to SurrealDB");

        Ok(Self { db })
    }

    /// Returns a reference to the underlying SurrealDB client.
    pub fn client(&self) -> &Surreal<Any> {
        &self.db
    }
}
