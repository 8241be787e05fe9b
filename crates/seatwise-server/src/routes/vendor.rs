//! Vendor management endpoints.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use seatwise_core::repository::VendorRepository;
use seatwise_core::validation::{VendorDraft, validate_create_vendor};

use crate::dto::VendorResponse;
use crate::error::ApiResult;
use crate::state::AppState;

/// List all vendors, ordered by name.
pub async fn list_vendors(State(state): State<AppState>) -> ApiResult<Json<Vec<VendorResponse>>> {
    let vendors = state.vendors.list().await?;
    Ok(Json(vendors.into_iter().map(Into::into).collect()))
}

/// Create a new vendor.
pub async fn create_vendor(
    State(state): State<AppState>,
    Json(draft): Json<VendorDraft>,
) -> ApiResult<(StatusCode, Json<VendorResponse>)> {
    let input = validate_create_vendor(draft)?;
    let vendor = state.vendors.create(input).await?;

    Ok((StatusCode::CREATED, Json(vendor.into())))
}
