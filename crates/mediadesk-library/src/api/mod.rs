//! The request surface the media library consumes.

pub mod local;
pub mod progress;

use async_trait::async_trait;

use mediadesk_core::result::AppResult;
use mediadesk_core::types::{FileId, FolderId};
use mediadesk_entity::{
    CreateFolder, Folder, MediaFile, StatsSnapshot, UpdateFileMetadata, UploadBatch,
};

pub use local::LocalMediaApi;
pub use progress::ProgressReporter;

/// Collaborator that persists media changes.
///
/// Implemented over HTTP by `mediadesk-client` and in-process by
/// [`LocalMediaApi`]. Every method is one request; none of them retry.
#[async_trait]
pub trait MediaApi: Send + Sync + 'static {
    /// Files directly inside `folder_id` (None for root).
    async fn list_files(&self, folder_id: Option<FolderId>) -> AppResult<Vec<MediaFile>>;

    /// Every folder, with file counts.
    async fn list_folders(&self) -> AppResult<Vec<Folder>>;

    /// Aggregate statistics over all files.
    async fn get_stats(&self) -> AppResult<StatsSnapshot>;

    /// Transfer a whole batch in one request.
    ///
    /// Implementations report transfer progress through `progress` while the
    /// request is outstanding. Either every file is created or none is.
    async fn upload(
        &self,
        batch: UploadBatch,
        progress: ProgressReporter,
    ) -> AppResult<Vec<MediaFile>>;

    /// Create a folder.
    async fn create_folder(&self, req: CreateFolder) -> AppResult<Folder>;

    /// Reparent a folder (None for root).
    async fn move_folder(&self, id: FolderId, parent_id: Option<FolderId>) -> AppResult<Folder>;

    /// Delete a folder with everything below it.
    async fn delete_folder(&self, id: FolderId) -> AppResult<()>;

    /// Delete a file.
    async fn delete_file(&self, id: FileId) -> AppResult<()>;

    /// Edit file metadata.
    async fn update_file(&self, id: FileId, update: &UpdateFileMetadata) -> AppResult<MediaFile>;
}
