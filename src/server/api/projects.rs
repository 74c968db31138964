use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    response::IntoResponse,
};

use crate::server::AppState;
use crate::server::extract::{JsonBody, PathParam};
use crate::server::response::{ApiError, MessageResponse, StoreOptionExt, StoreResultExt};
use crate::types::{NewProject, ProjectPatch};

pub async fn list_projects(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let projects = state
        .store
        .list_projects()
        .api_err("Failed to list projects")?;

    Ok::<_, ApiError>(Json(projects))
}

pub async fn get_project(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<i64>,
) -> impl IntoResponse {
    let row = state
        .store
        .get_project(id)
        .api_err("Failed to get project")?
        .or_not_found("Project not found")?;

    Ok::<_, ApiError>(Json(row))
}

pub async fn create_project(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<NewProject>,
) -> impl IntoResponse {
    let project = state
        .store
        .create_project(&req)
        .api_err("Failed to create project")?;

    Ok::<_, ApiError>(Json(project))
}

pub async fn update_project(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<i64>,
    JsonBody(patch): JsonBody<ProjectPatch>,
) -> impl IntoResponse {
    let matched = state
        .store
        .update_project(id, patch)
        .api_err("Failed to update project")?;

    if !matched {
        tracing::debug!("Update matched no project with id {id}");
    }

    Ok::<_, ApiError>(Json(MessageResponse::new("Project updated")))
}

pub async fn delete_project(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<i64>,
) -> impl IntoResponse {
    state
        .store
        .delete_project(id)
        .api_err("Failed to delete project")?;

    Ok::<_, ApiError>(Json(MessageResponse::new("Project deleted")))
}
