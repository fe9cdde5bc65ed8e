//! Folder handlers.

use axum::Json;
use axum::extract::{Path, State};

use mediadesk_core::types::FolderId;
use mediadesk_entity::Folder;

use crate::dto::{ApiResponse, CreateFolderRequest, MessageResponse, MoveFolderRequest};
use crate::error::ApiResult;
use crate::extractors::{ActingUser, ValidatedJson, parse_id};
use crate::state::AppState;

/// GET /api/media/folders
pub async fn list_folders(State(state): State<AppState>) -> ApiResult<Json<ApiResponse<Vec<Folder>>>> {
    let folders = state.store.list_folders().await?;
    Ok(Json(ApiResponse::ok(folders)))
}

/// POST /api/media/folders
pub async fn create_folder(
    State(state): State<AppState>,
    ActingUser(user): ActingUser,
    ValidatedJson(req): ValidatedJson<CreateFolderRequest>,
) -> ApiResult<Json<ApiResponse<Folder>>> {
    let folder = state.store.create_folder(req.into(), user).await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// PUT /api/media/folders/{id}/move
pub async fn move_folder(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<MoveFolderRequest>,
) -> ApiResult<Json<ApiResponse<Folder>>> {
    let id: FolderId = parse_id(&id)?;
    let folder = state.store.move_folder(id, req.parent_id).await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// DELETE /api/media/folders/{id}
pub async fn delete_folder(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    let id: FolderId = parse_id(&id)?;
    let files_removed = state.store.delete_folder(id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(format!(
        "Folder deleted with {files_removed} file(s)"
    )))))
}
