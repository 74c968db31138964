mod cv;
mod education;
mod profile;
mod projects;
mod skills;

use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post, put},
};

use crate::server::AppState;

pub use cv::serve_upload;

pub fn api_router(max_upload_bytes: usize) -> Router<Arc<AppState>> {
    Router::new()
        // Profile (single row)
        .route("/profile", get(profile::get_profile))
        .route("/profile/{id}", put(profile::update_profile))
        // Résumé
        .route(
            "/upload-cv",
            post(cv::upload_cv).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/download-cv", get(cv::download_cv))
        // Skills
        .route("/skills", get(skills::list_skills).post(skills::create_skill))
        .route(
            "/skills/{id}",
            get(skills::get_skill)
                .put(skills::update_skill)
                .delete(skills::delete_skill),
        )
        // Projects
        .route(
            "/projects",
            get(projects::list_projects).post(projects::create_project),
        )
        .route(
            "/projects/{id}",
            get(projects::get_project)
                .put(projects::update_project)
                .delete(projects::delete_project),
        )
        // Education
        .route(
            "/education",
            get(education::list_education).post(education::create_education),
        )
        .route(
            "/education/{id}",
            get(education::get_education)
                .put(education::update_education)
                .delete(education::delete_education),
        )
}
