use std::sync::Arc;

use axum::{
    Json,
    body::Body,
    extract::{State, multipart::Field},
    http::{HeaderValue, StatusCode, header},
    response::Response,
};
use chrono::Utc;
use serde::Serialize;
use tokio_util::io::ReaderStream;
use tracing::{info, warn};

use crate::server::AppState;
use crate::server::extract::{MultipartBody, PathParam};
use crate::server::response::{ApiError, StoreOptionExt, StoreResultExt};
use crate::uploads::{
    PendingUpload, UploadError, UploadStorage, base_name, public_url, stored_name,
    stored_name_from_url,
};

/// Multipart field carrying the résumé.
const CV_FIELD: &str = "cv";

#[derive(Debug, Serialize)]
pub struct UploadCvResponse {
    pub filename: String,
    pub url: String,
    pub message: String,
}

fn multipart_error(e: axum::extract::multipart::MultipartError) -> ApiError {
    ApiError {
        status: e.status(),
        message: e.body_text(),
    }
}

async fn write_field(field: &mut Field<'_>, pending: &mut PendingUpload) -> Result<(), ApiError> {
    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        pending.write_chunk(&chunk).await.map_err(|e| {
            tracing::error!("Failed to write upload: {e}");
            ApiError::internal("Failed to store upload")
        })?;
    }
    Ok(())
}

/// POST /upload-cv - Store a résumé and link it to the profile
pub async fn upload_cv(
    State(state): State<Arc<AppState>>,
    MultipartBody(mut multipart): MultipartBody,
) -> Result<Json<UploadCvResponse>, ApiError> {
    let storage = UploadStorage::new(&state.uploads_dir);

    while let Some(mut field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(CV_FIELD) {
            continue;
        }
        let Some(original_name) = field.file_name().map(|n| base_name(n).to_string()) else {
            continue;
        };

        let mut pending = storage.begin().await.map_err(|e| {
            tracing::error!("Failed to start upload: {e}");
            ApiError::internal("Failed to store upload")
        })?;

        if let Err(e) = write_field(&mut field, &mut pending).await {
            pending.abort().await;
            return Err(e);
        }

        let name = stored_name(&original_name, Utc::now().timestamp_millis());
        let size = storage.commit(pending, &name).await.map_err(|e| {
            tracing::error!("Failed to commit upload {name}: {e}");
            ApiError::internal("Failed to store upload")
        })?;
        info!("Stored upload {name} ({size} bytes)");

        let url = public_url(&name);
        let linked = match state.store.set_profile_cv(&original_name, &url) {
            Ok(true) => Ok(()),
            Ok(false) => Err(ApiError::not_found("Profile not found")),
            Err(e) => {
                tracing::error!("Failed to link upload to profile: {e}");
                Err(ApiError::internal("Failed to update profile"))
            }
        };

        if let Err(e) = linked {
            discard(&storage, &name).await;
            return Err(e);
        }

        return Ok(Json(UploadCvResponse {
            filename: original_name,
            url,
            message: "CV uploaded and profile updated".to_string(),
        }));
    }

    Err(ApiError::bad_request("No file provided"))
}

async fn discard(storage: &UploadStorage, name: &str) {
    match storage.delete(name).await {
        Ok(_) => info!("Removed unlinked upload {name}"),
        Err(e) => warn!("Failed to remove unlinked upload {name}: {e}"),
    }
}

/// GET /download-cv - Stream the linked résumé under its original name
pub async fn download_cv(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let profile = state
        .store
        .get_profile()
        .api_err("Failed to get profile")?
        .or_not_found("CV not found")?;

    let url = profile.cv_url.or_not_found("CV not found")?;
    let name = stored_name_from_url(&url).or_not_found("CV not found")?;
    let filename = profile.cv_filename.unwrap_or_else(|| name.to_string());

    let storage = UploadStorage::new(&state.uploads_dir);
    stream_upload(&storage, name, Disposition::Attachment(&filename)).await
}

/// GET /uploads/{name} - Serve a stored upload
pub async fn serve_upload(
    State(state): State<Arc<AppState>>,
    PathParam(name): PathParam<String>,
) -> Result<Response, ApiError> {
    let storage = UploadStorage::new(&state.uploads_dir);
    stream_upload(&storage, &name, Disposition::Inline).await
}

enum Disposition<'a> {
    Inline,
    Attachment(&'a str),
}

async fn stream_upload(
    storage: &UploadStorage,
    name: &str,
    disposition: Disposition<'_>,
) -> Result<Response, ApiError> {
    let (reader, size) = match storage.get(name).await {
        Ok(result) => result,
        Err(UploadError::NotFound | UploadError::InvalidName) => {
            return Err(ApiError::not_found("File not found"));
        }
        Err(e) => {
            tracing::error!("Upload storage error: {e}");
            return Err(ApiError::internal("Storage error"));
        }
    };

    let body = Body::from_stream(ReaderStream::new(reader));

    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type_for(name))
        .header(header::CONTENT_LENGTH, size)
        .header("X-Content-Type-Options", "nosniff");

    if let Disposition::Attachment(filename) = disposition {
        builder = builder.header(header::CONTENT_DISPOSITION, attachment_header(filename));
    }

    builder
        .body(body)
        .map_err(|_| ApiError::internal("Failed to build response"))
}

fn content_type_for(name: &str) -> &'static str {
    let extension = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "txt" => "text/plain; charset=utf-8",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        _ => "application/octet-stream",
    }
}

/// `attachment` disposition with an ASCII fallback name and the exact name
/// in RFC 5987 form.
fn attachment_header(filename: &str) -> HeaderValue {
    let fallback: String = filename
        .chars()
        .map(|c| {
            if c == ' ' || (c.is_ascii_graphic() && c != '"' && c != '\\') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let value = format!(
        "attachment; filename=\"{fallback}\"; filename*=UTF-8''{}",
        urlencoding::encode(filename)
    );

    HeaderValue::from_str(&value).unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}
