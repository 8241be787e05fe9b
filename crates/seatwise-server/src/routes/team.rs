//! Team management endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use seatwise_core::repository::{LicenseRepository, TeamRepository};
use seatwise_core::validation::{TeamDraft, validate_create_team};
use uuid::Uuid;

use crate::dto::{LicenseResponse, TeamResponse};
use crate::error::ApiResult;
use crate::state::AppState;

/// List all teams, ordered by name.
pub async fn list_teams(State(state): State<AppState>) -> ApiResult<Json<Vec<TeamResponse>>> {
    let teams = state.teams.list().await?;
    Ok(Json(teams.into_iter().map(Into::into).collect()))
}

/// Create a new team.
pub async fn create_team(
    State(state): State<AppState>,
    Json(draft): Json<TeamDraft>,
) -> ApiResult<(StatusCode, Json<TeamResponse>)> {
    let input = validate_create_team(draft)?;
    let team = state.teams.create(input).await?;

    Ok((StatusCode::CREATED, Json(team.into())))
}

/// Licenses owned by a team, newest first.
pub async fn list_team_licenses(
    State(state): State<AppState>,
    Path(team_id): Path<Uuid>,
) -> ApiResult<Json<Vec<LicenseResponse>>> {
    let licenses = state.licenses.list_by_team(team_id).await?;
    Ok(Json(licenses.into_iter().map(Into::into).collect()))
}
