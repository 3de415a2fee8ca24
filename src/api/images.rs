//! Image upload endpoint.
//!
//! Uploaded files are written under the configured upload directory with a
//! generated unique filename and served back under `/uploads/`.

use std::path::Path as FsPath;

use axum::{
    extract::{Multipart, State},
    http::{header, HeaderMap},
    Json,
};
use serde::{Deserialize, Serialize};

use super::ApiResult;
use crate::errors::AppError;
use crate::AppState;

/// Response body for a stored image.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResponse {
    pub image_url: String,
}

/// POST /api/image - Store an uploaded image and return its URL.
pub async fn upload_image(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> ApiResult<Json<ImageResponse>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::Validation(format!("Invalid multipart body: {}", err)))?
    {
        let is_image_field = field.name() == Some("image") || field.file_name().is_some();
        if !is_image_field {
            continue;
        }

        // Keep the original extension; the name itself is server-generated.
        let extension = field
            .file_name()
            .and_then(|name| FsPath::new(name).extension())
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext))
            .unwrap_or_default();
        let filename = format!("{}{}", uuid::Uuid::new_v4(), extension);

        let bytes = field
            .bytes()
            .await
            .map_err(|err| AppError::Validation(format!("Failed to read upload: {}", err)))?;

        tokio::fs::create_dir_all(&state.config.upload_dir)
            .await
            .map_err(|err| {
                tracing::error!("Failed to create upload dir: {}", err);
                AppError::Internal(format!("upload dir: {}", err))
            })?;
        tokio::fs::write(state.config.upload_dir.join(&filename), &bytes)
            .await
            .map_err(|err| {
                tracing::error!("Failed to store upload: {}", err);
                AppError::Internal(format!("store upload: {}", err))
            })?;

        let base = public_base(&state, &headers);
        tracing::info!(%filename, size = bytes.len(), "image stored");

        return Ok(Json(ImageResponse {
            image_url: format!("{}/uploads/{}", base, filename),
        }));
    }

    Err(AppError::Validation("Image file is required".to_string()))
}

/// Base URL for uploaded-image links: the configured public base URL, or
/// one derived from the request's Host header.
fn public_base(state: &AppState, headers: &HeaderMap) -> String {
    if let Some(base) = &state.config.public_base_url {
        return base.clone();
    }

    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| state.config.bind_addr.to_string());

    format!("http://{}", host)
}
