use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    response::IntoResponse,
};
use serde_json::{Value, json};

use crate::server::AppState;
use crate::server::extract::{JsonBody, PathParam};
use crate::server::response::{ApiError, MessageResponse, StoreResultExt};
use crate::types::{PROFILE_ID, ProfileInput};

/// GET /profile - The profile, or `{}` when none has been saved yet
pub async fn get_profile(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let profile = state
        .store
        .get_profile()
        .api_err("Failed to get profile")?;

    let body = match profile {
        Some(profile) => serde_json::to_value(profile).map_err(|e| {
            tracing::error!("Failed to serialize profile: {e}");
            ApiError::internal("Failed to get profile")
        })?,
        None => json!({}),
    };

    Ok::<_, ApiError>(Json::<Value>(body))
}

/// PUT /profile/{id} - Replace every profile field, creating the row if needed
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<i64>,
    JsonBody(req): JsonBody<ProfileInput>,
) -> impl IntoResponse {
    if id != PROFILE_ID {
        return Err(ApiError::not_found("Profile not found"));
    }

    state
        .store
        .save_profile(&req)
        .api_err("Failed to update profile")?;

    Ok::<_, ApiError>(Json(MessageResponse::new("Profile updated")))
}
