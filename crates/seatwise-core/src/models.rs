//! Domain models for Seatwise.
//!
//! These are the core types shared across all crates.

pub mod license;
pub mod team;
pub mod vendor;
