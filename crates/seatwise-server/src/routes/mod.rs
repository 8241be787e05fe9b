//! API route handlers.

pub mod analytics;
pub mod health;
pub mod license;
pub mod team;
pub mod vendor;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        // Team endpoints
        .route("/api/teams", get(team::list_teams).post(team::create_team))
        .route("/api/teams/:team_id/licenses", get(team::list_team_licenses))
        // Vendor endpoints
        .route(
            "/api/vendors",
            get(vendor::list_vendors).post(vendor::create_vendor),
        )
        // License endpoints
        .route(
            "/api/licenses",
            get(license::list_licenses).post(license::create_license),
        )
        .route(
            "/api/licenses/:id",
            get(license::get_license)
                .put(license::update_license)
                .delete(license::delete_license),
        )
        // Analytics endpoints
        .route("/api/analytics/metrics", get(analytics::get_metrics))
        .route("/api/analytics/duplicates", get(analytics::get_duplicates))
        .route("/api/analytics/expiring", get(analytics::get_expiring))
        // State
        .with_state(state)
}
