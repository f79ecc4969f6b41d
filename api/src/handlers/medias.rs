//! Media handlers
//!
//! Image upload (multipart) and download.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::entities::MediaId;
use crate::error::AppError;
use crate::AppState;

use super::PathParam;

/// Multipart field holding the uploaded image
const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct MediaUploadResponse {
    pub result: bool,
    pub media_id: MediaId,
}

/// POST /api/medias
pub async fn upload_media(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<MediaUploadResponse>, AppError> {
    let mut multipart = multipart?;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await?;

        let media_id = state
            .media_service
            .upload(file_name.as_deref(), content_type.as_deref(), data.to_vec())
            .await?;

        return Ok(Json(MediaUploadResponse {
            result: true,
            media_id,
        }));
    }

    Err(AppError::BadRequest(format!(
        "Missing multipart field '{}'",
        FILE_FIELD
    )))
}

/// GET /api/media/:id
///
/// Public so that attachment links work in plain `<img>` tags.
pub async fn download_media(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> Result<Response, AppError> {
    let media = state.media_service.get(&MediaId(id)).await?;

    let content_type = HeaderValue::from_str(&media.content_type).map_err(|e| {
        AppError::Internal(format!(
            "Stored content type of media {} is not a header value: {}",
            media.id, e
        ))
    })?;

    Ok(([(header::CONTENT_TYPE, content_type)], media.data).into_response())
}
