// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated users.

use crate::error::{AppError, Result};
use crate::models::{LogWeightRequest, Profile, ProfileRequest, WeightPoint};
use crate::services::Identity;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use validator::Validate;

/// API routes (require authentication via bearer token).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/profile",
            get(get_profile)
                .post(create_profile)
                .patch(update_profile)
                .delete(delete_profile),
        )
        .route("/weight", get(get_weights).post(log_weight))
}

/// Unwrap and validate a JSON body, reporting problems as 400s.
fn parse_body<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T>
where
    T: DeserializeOwned + Validate,
{
    let Json(body) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    body.validate()?;
    Ok(body)
}

// ─── Profile ─────────────────────────────────────────────────

/// Get the caller's profile.
async fn get_profile(
    State(state): State<Arc<AppState>>,
    identity: Identity,
) -> Result<Json<Profile>> {
    let profile = state.profile_service.require_profile(&identity).await?;
    Ok(Json(profile))
}

/// Create the caller's profile, or return the existing one unchanged.
async fn create_profile(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    payload: std::result::Result<Json<ProfileRequest>, JsonRejection>,
) -> Result<Json<Profile>> {
    let request = parse_body(payload)?;
    let profile = state
        .profile_service
        .create_profile(&identity, &request.name)
        .await?;
    Ok(Json(profile))
}

/// Rename the caller's profile.
async fn update_profile(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    payload: std::result::Result<Json<ProfileRequest>, JsonRejection>,
) -> Result<Json<Profile>> {
    let request = parse_body(payload)?;
    let profile = state
        .profile_service
        .update_profile(&identity, &request.name)
        .await?;
    Ok(Json(profile))
}

/// Delete the caller's profile and all of its weight records.
async fn delete_profile(
    State(state): State<Arc<AppState>>,
    identity: Identity,
) -> Result<StatusCode> {
    state.profile_service.delete_profile(&identity).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ─── Weight ──────────────────────────────────────────────────

/// Log a weight for the caller.
///
/// Responds as soon as the write is queued; a failed write is reported in
/// the background and never changes the response.
async fn log_weight(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    payload: std::result::Result<Json<LogWeightRequest>, JsonRejection>,
) -> Result<StatusCode> {
    let request = parse_body(payload)?;
    let profile = state.profile_service.require_profile(&identity).await?;

    // Dropping the handle detaches the task.
    drop(state.weight_service.log_weight(&profile, request.weight));

    Ok(StatusCode::OK)
}

/// List the caller's weights as chart points.
async fn get_weights(
    State(state): State<Arc<AppState>>,
    identity: Identity,
) -> Result<Json<Vec<WeightPoint>>> {
    let profile = state.profile_service.require_profile(&identity).await?;
    let weights = state.weight_service.get_weights(&profile).await?;

    tracing::debug!(
        profile_id = %profile.id,
        count = weights.len(),
        "Fetched weights"
    );

    Ok(Json(weights))
}
