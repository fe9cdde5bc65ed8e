//! Batch upload handler.

use axum::Json;
use axum::extract::{Multipart, State};
use tracing::debug;

use mediadesk_core::error::AppError;
use mediadesk_core::types::{FolderId, parse_folder_param};
use mediadesk_entity::{MediaFile, UploadBatch, UploadBlob};

use crate::dto::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::ActingUser;
use crate::state::AppState;

/// POST /api/media/upload with multipart `folder_id` plus repeated `files`.
///
/// The whole batch is committed or rejected together.
pub async fn upload(
    State(state): State<AppState>,
    ActingUser(user): ActingUser,
    mut multipart: Multipart,
) -> ApiResult<Json<ApiResponse<Vec<MediaFile>>>> {
    let mut folder_id: Option<FolderId> = None;
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "folder_id" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Read error: {e}")))?;
                folder_id = parse_folder_param(&text)?;
            }
            "files" | "file" => {
                let file_name = field
                    .file_name()
                    .map(String::from)
                    .ok_or_else(|| AppError::validation("Uploaded file has no name"))?;
                let mime_type = field.content_type().map(String::from);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Read error: {e}")))?;
                files.push(UploadBlob {
                    file_name,
                    mime_type,
                    data,
                });
            }
            other => debug!(field = %other, "Ignoring unknown multipart field"),
        }
    }

    let created = state
        .store
        .insert_batch(UploadBatch::new(folder_id, files), user)
        .await?;

    Ok(Json(ApiResponse::ok(created)))
}
