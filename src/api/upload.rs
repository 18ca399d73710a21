use axum::body::Bytes;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::app::AppState;
use crate::error::AppError;
use crate::storage::media::{is_key_segment, DeleteResult, UploadResult};
use crate::storage::staging::UploadKind;

/// Request body for `POST /api/uploads/base64`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Base64UploadRequest {
    /// Data URI or bare base64 payload.
    pub image: String,
    #[serde(default)]
    pub folder: Option<String>,
    #[serde(default)]
    pub public_id: Option<String>,
}

/// Axum handler for `POST /api/uploads/image`.
///
/// Accepts a multipart form with a file field named "file" and an optional
/// "folder" text field. Only image types are accepted.
pub async fn upload_image_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResult>, AppError> {
    handle_upload(&state, UploadKind::Image, multipart).await
}

/// Axum handler for `POST /api/uploads/document`.
///
/// Same form as the image upload; accepts PDFs and common photo formats.
pub async fn upload_document_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResult>, AppError> {
    handle_upload(&state, UploadKind::Document, multipart).await
}

/// Axum handler for `POST /api/uploads/base64`.
pub async fn upload_base64_handler(
    State(state): State<AppState>,
    Json(request): Json<Base64UploadRequest>,
) -> Result<Json<UploadResult>, AppError> {
    let folder = request.folder.as_deref().map(validate_folder).transpose()?;
    let public_id = request
        .public_id
        .as_deref()
        .map(validate_public_id)
        .transpose()?;

    let result = state
        .media
        .upload_base64(&request.image, folder, public_id)
        .await?;
    Ok(Json(result))
}

/// Axum handler for `DELETE /api/media/{*public_id}`.
pub async fn delete_media_handler(
    State(state): State<AppState>,
    Path(public_id): Path<String>,
) -> Result<Json<DeleteResult>, AppError> {
    let public_id = public_id.trim_start_matches('/');
    if public_id.is_empty() {
        return Err(AppError::BadRequest("Public id cannot be empty".into()));
    }
    Ok(Json(state.media.delete(public_id).await?))
}

struct UploadedFile {
    name: String,
    content_type: String,
    data: Bytes,
}

/// Read the form, stage the file on disk, then forward it to media storage.
///
/// The file is buffered until the whole form has been read so that a broken
/// request never leaves anything in the staging directory.
async fn handle_upload(
    state: &AppState,
    kind: UploadKind,
    mut multipart: Multipart,
) -> Result<Json<UploadResult>, AppError> {
    let mut folder: Option<String> = None;
    let mut file: Option<UploadedFile> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            "folder" => {
                let value = field.text().await.map_err(multipart_error)?;
                folder = Some(validate_folder(&value)?.to_string());
            }
            "file" if file.is_none() => {
                let name = field.file_name().unwrap_or("upload.bin").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();

                // Reject before buffering the body.
                if !kind.accepts(&content_type) {
                    return Err(AppError::BadRequest(kind.rejection().into()));
                }

                let data = field.bytes().await.map_err(multipart_error)?;
                file = Some(UploadedFile {
                    name,
                    content_type,
                    data,
                });
            }
            _ => continue,
        }
    }

    let file =
        file.ok_or_else(|| AppError::BadRequest("No file field found in request".into()))?;

    let staged = state
        .staging
        .stage(kind, &file.name, &file.content_type, &file.data)
        .await?;

    let result = state
        .media
        .upload_file(&staged, folder.as_deref(), None)
        .await?;

    tracing::info!("Uploaded '{}' as {}", file.name, result.public_id);
    Ok(Json(result))
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::BadRequest(format!("Multipart error: {}", e.body_text()))
    }
}

/// Folders become object key prefixes: allow only `[A-Za-z0-9_-]` segments
/// separated by `/`.
fn validate_folder(value: &str) -> Result<&str, AppError> {
    let trimmed = value.trim().trim_matches('/');
    if !trimmed.is_empty() && trimmed.split('/').all(is_key_segment) {
        Ok(trimmed)
    } else {
        Err(AppError::BadRequest(format!("Invalid folder '{}'", value)))
    }
}

/// A caller-chosen public id names the object inside its folder, so it is a
/// single key segment.
fn validate_public_id(value: &str) -> Result<&str, AppError> {
    let trimmed = value.trim();
    if is_key_segment(trimmed) {
        Ok(trimmed)
    } else {
        Err(AppError::BadRequest(format!("Invalid public id '{}'", value)))
    }
}
