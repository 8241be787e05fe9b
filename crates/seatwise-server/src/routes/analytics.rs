//! Analytics endpoints: derived reads over the full license set.

use axum::{
    Json,
    extract::{Query, State},
};
use seatwise_core::analytics::{
    DEFAULT_EXPIRY_WINDOW_DAYS, duplicate_groups, expiring_licenses, license_metrics,
};
use seatwise_core::repository::LicenseRepository;

use crate::dto::{DuplicateGroupResponse, ExpiringQuery, LicenseResponse, MetricsResponse};
use crate::error::ApiResult;
use crate::state::AppState;

/// "Today" for expiry windowing is the server's local calendar date.
fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

/// Aggregated license metrics.
pub async fn get_metrics(State(state): State<AppState>) -> ApiResult<Json<MetricsResponse>> {
    let licenses = state.licenses.list().await?;
    let metrics = license_metrics(&licenses, today());

    Ok(Json(metrics.into()))
}

/// Groups of licenses sharing a software name across teams.
pub async fn get_duplicates(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<DuplicateGroupResponse>>> {
    let licenses = state.licenses.list().await?;
    let groups = duplicate_groups(&licenses);

    Ok(Json(groups.into_iter().map(Into::into).collect()))
}

/// Active licenses expiring within the requested window (default 30
/// days).
pub async fn get_expiring(
    State(state): State<AppState>,
    Query(query): Query<ExpiringQuery>,
) -> ApiResult<Json<Vec<LicenseResponse>>> {
    let days = query.days.unwrap_or(DEFAULT_EXPIRY_WINDOW_DAYS);

    let licenses = state.licenses.list().await?;
    let expiring = expiring_licenses(&licenses, today(), days);

    Ok(Json(expiring.into_iter().map(Into::into).collect()))
}
