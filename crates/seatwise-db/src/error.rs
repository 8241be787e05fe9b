//! Database-specific error types and conversions.

use seatwise_core::error::SeatwiseError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Connection attempt timed out after {0} seconds")]
    ConnectTimeout(u64),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Unique constraint violated: {entity} with name {name}")]
    Conflict { entity: String, name: String },
}

impl DbError {
    /// Classify a statement-level failure. A unique-index violation
    /// (SurrealDB reports "index ... already contains ...") becomes a
    /// `Conflict` the caller can act on; anything else stays a plain
    /// query error.
    pub(crate) fn from_statement(entity: &str, name: &str, err: surrealdb::Error) -> Self {
        let text = err.to_string();
        if text.contains("already contains") {
            DbError::Conflict {
                entity: entity.into(),
                name: name.into(),
            }
        } else {
            DbError::Query(text)
        }
    }
}

impl From<DbError> for SeatwiseError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => SeatwiseError::NotFound { entity, id },
            DbError::Conflict { entity, name } => SeatwiseError::AlreadyExists { entity, name },
            other => SeatwiseError::Database(other.to_string()),
        }
    }
}
