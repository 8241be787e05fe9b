//! Schema definitions and migration runner for SurrealDB.
//!
//! All table definitions use SCHEMAFULL mode for data integrity.
//! UUIDs are stored as strings. Enums are stored as strings with
//! ASSERT constraints. Calendar dates (purchase/expiry) are stored as
//! ISO-8601 `YYYY-MM-DD` strings, whose lexicographic order matches
//! chronological order.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
    #[allow(dead_code)]
    name: String,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1 — initial table definitions
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Teams
-- =======================================================================
DEFINE TABLE team SCHEMAFULL;
DEFINE FIELD name ON TABLE team TYPE string;
DEFINE FIELD description ON TABLE team TYPE option<string>;
DEFINE FIELD created_at ON TABLE team TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_team_name ON TABLE team COLUMNS name UNIQUE;

-- =======================================================================
-- Vendors
-- =======================================================================
DEFINE TABLE vendor SCHEMAFULL;
DEFINE FIELD name ON TABLE vendor TYPE string;
DEFINE FIELD website ON TABLE vendor TYPE option<string>;
DEFINE FIELD contact_email ON TABLE vendor TYPE option<string>;
DEFINE FIELD created_at ON TABLE vendor TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_vendor_name ON TABLE vendor COLUMNS name UNIQUE;

-- =======================================================================
-- Licenses
-- =======================================================================
DEFINE TABLE license SCHEMAFULL;
DEFINE FIELD software_name ON TABLE license TYPE string;
DEFINE FIELD vendor_id ON TABLE license TYPE string;
DEFINE FIELD team_id ON TABLE license TYPE string;
DEFINE FIELD license_type ON TABLE license TYPE string \
    ASSERT $value IN ['subscription', 'perpetual', 'enterprise'];
DEFINE FIELD total_seats ON TABLE license TYPE int;
DEFINE FIELD used_seats ON TABLE license TYPE int DEFAULT 0;
DEFINE FIELD cost ON TABLE license TYPE decimal;
DEFINE FIELD billing_frequency ON TABLE license TYPE string \
    ASSERT $value IN ['monthly', 'quarterly', 'annually', 'one-time'];
DEFINE FIELD purchase_date ON TABLE license TYPE string;
DEFINE FIELD expiry_date ON TABLE license TYPE option<string>;
DEFINE FIELD contact_person ON TABLE license TYPE string;
DEFINE FIELD description ON TABLE license TYPE option<string>;
DEFINE FIELD status ON TABLE license TYPE string DEFAULT 'active' \
    ASSERT $value IN ['active', 'expiring', 'expired', 'cancelled'];
DEFINE FIELD created_at ON TABLE license TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE license TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_license_team ON TABLE license COLUMNS team_id;
DEFINE INDEX idx_license_vendor ON TABLE license COLUMNS vendor_id;
DEFINE INDEX idx_license_status ON TABLE license COLUMNS status;
";

// -----------------------------------------------------------------------
// Public API
// -----------------------------------------------------------------------

/// Run all pending migrations against the given SurrealDB client.
///
/// Creates a `_migration` tracking table on first run, then applies
/// each migration whose version exceeds the current maximum.
/// All DEFINE statements are idempotent so re-running is safe.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    // Ensure migration tracking table exists (idempotent).
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    // Determine current schema version.
    let mut result = db
        .query("SELECT * FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version > current_version {
            info!(
                version = migration.version,
                name = migration.name,
                "Applying migration"
            );
            db.query(migration.sql).await?.check().map_err(|e| {
                DbError::Migration(format!(
                    "Migration v{} '{}' failed: {}",
                    migration.version, migration.name, e,
                ))
            })?;

            // Record the applied migration.
            db.query(
                "CREATE _migration SET version = $version, \
                 name = $name",
            )
            .bind(("version", migration.version))
            .bind(("name", migration.name))
            .await?
            .check()
            .map_err(|e| {
                DbError::Migration(format!(
                    "Failed to record migration v{}: {}",
                    migration.version, e,
                ))
            })?;

            info!(
                version = migration.version,
                "Migration applied successfully"
            );
        }
    }

    Ok(())
}

/// Returns the raw schema DDL for version 1.
///
/// Exposed for testing with in-memory SurrealDB instances that
/// bypass the migration runner.
pub fn schema_v1() -> &'static str {
    SCHEMA_V1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_v1_is_nonempty() {
        assert!(!SCHEMA_V1.is_empty());
    }

    #[test]
    fn migrations_are_ordered() {
        for window in MIGRATIONS.windows(2) {
            assert!(
                window[0].version < window[1].version,
                "Migrations must be in ascending version order"
            );
        }
    }
}
