//! Error types for the Seatwise system.
//!
//! Layers below the HTTP boundary propagate these typed failures upward
//! and never pick status codes; the boundary alone decides the wire shape.

use serde::Serialize;
use thiserror::Error;

/// A single field-level validation failure.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SeatwiseError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Entity already exists: {entity} with name {name}")]
    AlreadyExists { entity: String, name: String },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        fields: Vec<FieldError>,
    },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SeatwiseError {
    /// Build a validation error from a non-empty list of field failures.
    pub fn validation(fields: Vec<FieldError>) -> Self {
        let message = match fields.as_slice() {
            [only] => format!("{}: {}", only.field, only.message),
            many => format!("{} invalid fields", many.len()),
        };
        SeatwiseError::Validation { message, fields }
    }
}

pub type SeatwiseResult<T> = Result<T, SeatwiseError>;
