//! Seatwise Core — domain models and data-access contracts for the
//! software-license inventory.
//!
//! This crate carries no I/O: it defines the entity types, the repository
//! traits implemented by `seatwise-db`, the hand-written input validation,
//! and the pure analytics computations (duplicate grouping, expiry
//! windowing, metric aggregation).

pub mod analytics;
pub mod error;
pub mod models;
pub mod repository;
pub mod validation;
