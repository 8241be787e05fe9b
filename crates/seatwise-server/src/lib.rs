//! Seatwise API Server
//!
//! REST surface over the license inventory.
//!
//! ## Endpoints
//!
//! ### Teams
//! - GET /api/teams - List teams
//! - POST /api/teams - Create team
//! - GET /api/teams/:team_id/licenses - Licenses owned by a team
//!
//! ### Vendors
//! - GET /api/vendors - List vendors
//! - POST /api/vendors - Create vendor
//!
//! ### Licenses
//! - GET /api/licenses - List licenses (optionally filtered)
//! - GET /api/licenses/:id - Get license
//! - POST /api/licenses - Create license (vendor resolved by name)
//! - PUT /api/licenses/:id - Partial update
//! - DELETE /api/licenses/:id - Delete license
//!
//! ### Analytics
//! - GET /api/analytics/metrics - Aggregated metrics
//! - GET /api/analytics/duplicates - Duplicate purchases across teams
//! - GET /api/analytics/expiring - Licenses expiring soon

pub mod dto;
pub mod error;
pub mod routes;
pub mod server;
pub mod state;

pub use routes::create_router;
pub use server::{create_server, run_server};
pub use state::{ApiConfig, AppState};
