//! File listing, metadata, content, and stats handlers.

use axum::Json;
use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::Response;

use mediadesk_core::error::AppError;
use mediadesk_core::types::FileId;
use mediadesk_entity::{MediaFile, StatsSnapshot};

use crate::dto::{ApiResponse, ListFilesQuery, MessageResponse, UpdateFileRequest};
use crate::error::ApiResult;
use crate::extractors::{ValidatedJson, parse_id};
use crate::state::AppState;

/// GET /api/media/files?folder_id=&search=&type=
pub async fn list_files(
    State(state): State<AppState>,
    Query(query): Query<ListFilesQuery>,
) -> ApiResult<Json<ApiResponse<Vec<MediaFile>>>> {
    let folder_id = query.folder()?;
    let filter = query.filter()?;
    let files = state.store.list_files(folder_id, &filter).await?;
    Ok(Json(ApiResponse::ok(files)))
}

/// PUT /api/media/files/{id}
pub async fn update_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateFileRequest>,
) -> ApiResult<Json<ApiResponse<MediaFile>>> {
    let id: FileId = parse_id(&id)?;
    let file = state.store.update_file(id, &req.into()).await?;
    Ok(Json(ApiResponse::ok(file)))
}

/// DELETE /api/media/files/{id}
pub async fn delete_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    let id: FileId = parse_id(&id)?;
    let file = state.store.delete_file(id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(format!(
        "File '{}' deleted",
        file.name
    )))))
}

/// GET /api/media/files/{id}/content
pub async fn file_content(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let id: FileId = parse_id(&id)?;
    let file = state
        .store
        .find_file(id)
        .await?
        .ok_or_else(|| AppError::not_found("File not found"))?;
    let blob = state.store.file_content(id).await?;

    let response = Response::builder()
        .header(header::CONTENT_TYPE, blob.mime_type)
        .header(header::CONTENT_LENGTH, blob.data.len())
        .header(
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"{}\"", file.original_name.replace('"', "")),
        )
        .body(Body::from(blob.data))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")))?;

    Ok(response)
}

/// GET /api/media/stats
pub async fn stats(State(state): State<AppState>) -> ApiResult<Json<ApiResponse<StatsSnapshot>>> {
    let stats = state.store.stats().await?;
    Ok(Json(ApiResponse::ok(stats)))
}
