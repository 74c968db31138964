use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    response::IntoResponse,
};

use crate::server::AppState;
use crate::server::extract::{JsonBody, PathParam};
use crate::server::response::{ApiError, MessageResponse, StoreOptionExt, StoreResultExt};
use crate::types::{NewSkill, SkillPatch};

pub async fn list_skills(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let skills = state
        .store
        .list_skills()
        .api_err("Failed to list skills")?;

    Ok::<_, ApiError>(Json(skills))
}

pub async fn get_skill(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<i64>,
) -> impl IntoResponse {
    let row = state
        .store
        .get_skill(id)
        .api_err("Failed to get skill")?
        .or_not_found("Skill not found")?;

    Ok::<_, ApiError>(Json(row))
}

pub async fn create_skill(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<NewSkill>,
) -> impl IntoResponse {
    let skill = state
        .store
        .create_skill(&req)
        .api_err("Failed to create skill")?;

    Ok::<_, ApiError>(Json(skill))
}

pub async fn update_skill(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<i64>,
    JsonBody(patch): JsonBody<SkillPatch>,
) -> impl IntoResponse {
    let matched = state
        .store
        .update_skill(id, patch)
        .api_err("Failed to update skill")?;

    if !matched {
        tracing::debug!("Update matched no skill with id {id}");
    }

    Ok::<_, ApiError>(Json(MessageResponse::new("Skill updated")))
}

pub async fn delete_skill(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<i64>,
) -> impl IntoResponse {
    state
        .store
        .delete_skill(id)
        .api_err("Failed to delete skill")?;

    Ok::<_, ApiError>(Json(MessageResponse::new("Skill deleted")))
}
