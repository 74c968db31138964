use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    response::IntoResponse,
};

use crate::server::AppState;
use crate::server::extract::{JsonBody, PathParam};
use crate::server::response::{ApiError, MessageResponse, StoreOptionExt, StoreResultExt};
use crate::types::{EducationPatch, NewEducation};

pub async fn list_education(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let education = state
        .store
        .list_education()
        .api_err("Failed to list education")?;

    Ok::<_, ApiError>(Json(education))
}

pub async fn get_education(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<i64>,
) -> impl IntoResponse {
    let row = state
        .store
        .get_education(id)
        .api_err("Failed to get education entry")?
        .or_not_found("Education entry not found")?;

    Ok::<_, ApiError>(Json(row))
}

pub async fn create_education(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<NewEducation>,
) -> impl IntoResponse {
    let entry = state
        .store
        .create_education(&req)
        .api_err("Failed to create education entry")?;

    Ok::<_, ApiError>(Json(entry))
}

pub async fn update_education(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<i64>,
    JsonBody(patch): JsonBody<EducationPatch>,
) -> impl IntoResponse {
    let matched = state
        .store
        .update_education(id, patch)
        .api_err("Failed to update education entry")?;

    if !matched {
        tracing::debug!("Update matched no education entry with id {id}");
    }

    Ok::<_, ApiError>(Json(MessageResponse::new("Education updated")))
}

pub async fn delete_education(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<i64>,
) -> impl IntoResponse {
    state
        .store
        .delete_education(id)
        .api_err("Failed to delete education entry")?;

    Ok::<_, ApiError>(Json(MessageResponse::new("Education deleted")))
}
