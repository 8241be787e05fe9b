//! License management endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use seatwise_core::error::FieldError;
use seatwise_core::models::license::{LicenseFilter, LicenseStatus};
use seatwise_core::repository::{LicenseRepository, VendorRepository};
use seatwise_core::validation::{
    LicenseDraft, LicenseUpdateDraft, validate_create_license, validate_update_license,
};
use uuid::Uuid;

use crate::dto::{LicenseQuery, LicenseResponse};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

fn build_filter(query: LicenseQuery) -> ApiResult<LicenseFilter> {
    let status = match query.status.as_deref() {
        Some(s) => Some(LicenseStatus::parse(s).ok_or_else(|| ApiError::Validation {
            message: format!("unknown status: {s}"),
            fields: vec![FieldError::new(
                "status",
                "must be one of: active, expiring, expired, cancelled",
            )],
        })?),
        None => None,
    };

    Ok(LicenseFilter {
        search: query.search,
        team_id: query.team_id,
        vendor_id: query.vendor_id,
        status,
    })
}

/// List licenses, newest first, optionally filtered by any combination
/// of free-text search, team, vendor and status.
pub async fn list_licenses(
    State(state): State<AppState>,
    Query(query): Query<LicenseQuery>,
) -> ApiResult<Json<Vec<LicenseResponse>>> {
    let filter = build_filter(query)?;
    let licenses = state.licenses.search(filter).await?;
    Ok(Json(licenses.into_iter().map(Into::into).collect()))
}

/// Get a license by id.
pub async fn get_license(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<LicenseResponse>> {
    let license = state
        .licenses
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("License {id} not found")))?;

    Ok(Json(license.into()))
}

/// Create a license. The client supplies a vendor name, which is
/// resolved to a vendor row through the idempotent get-or-create.
pub async fn create_license(
    State(state): State<AppState>,
    Json(draft): Json<LicenseDraft>,
) -> ApiResult<(StatusCode, Json<LicenseResponse>)> {
    let validated = validate_create_license(draft)?;

    let vendor = state.vendors.get_or_create(&validated.vendor_name).await?;
    let license = state
        .licenses
        .create(validated.into_create(vendor.id))
        .await?;

    Ok((StatusCode::CREATED, Json(license.into())))
}

/// Partially update a license; only supplied fields are applied.
pub async fn update_license(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(draft): Json<LicenseUpdateDraft>,
) -> ApiResult<Json<LicenseResponse>> {
    let input = validate_update_license(draft)?;
    let license = state.licenses.update(id, input).await?;

    Ok(Json(license.into()))
}

/// Delete a license. Idempotent: deleting an absent id still returns
/// 204, matching the store-level semantics.
pub async fn delete_license(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.licenses.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
