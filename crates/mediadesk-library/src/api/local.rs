//! In-process [`MediaApi`] over a [`MemoryMediaStore`].

use async_trait::async_trait;

use mediadesk_core::result::AppResult;
use mediadesk_core::types::{FileId, FolderId, UserId};
use mediadesk_entity::{
    CreateFolder, FileFilter, Folder, MediaFile, StatsSnapshot, UpdateFileMetadata, UploadBatch,
};
use mediadesk_store::MemoryMediaStore;

use super::{MediaApi, ProgressReporter};

/// Drives the library straight against an in-memory store, without HTTP.
#[derive(Debug, Clone)]
pub struct LocalMediaApi {
    store: MemoryMediaStore,
    acting_user: Option<UserId>,
}

impl LocalMediaApi {
    /// Wrap a store.
    pub fn new(store: MemoryMediaStore) -> Self {
        Self {
            store,
            acting_user: None,
        }
    }

    /// Record `user_id` as creator/uploader of new entities.
    pub fn with_user(mut self, user_id: UserId) -> Self {
        self.acting_user = Some(user_id);
        self
    }

    /// The wrapped store.
    pub fn store(&self) -> &MemoryMediaStore {
        &self.store
    }
}

#[async_trait]
impl MediaApi for LocalMediaApi {
    async fn list_files(&self, folder_id: Option<FolderId>) -> AppResult<Vec<MediaFile>> {
        self.store.list_files(folder_id, &FileFilter::all()).await
    }

    async fn list_folders(&self) -> AppResult<Vec<Folder>> {
        self.store.list_folders().await
    }

    async fn get_stats(&self) -> AppResult<StatsSnapshot> {
        self.store.stats().await
    }

    async fn upload(
        &self,
        batch: UploadBatch,
        progress: ProgressReporter,
    ) -> AppResult<Vec<MediaFile>> {
        // Nothing is transferred in-process; report the payload as handed over.
        let total = batch.total_size();
        progress.report_fraction(total, total);
        self.store.insert_batch(batch, self.acting_user).await
    }

    async fn create_folder(&self, req: CreateFolder) -> AppResult<Folder> {
        self.store.create_folder(req, self.acting_user).await
    }

    async fn move_folder(&self, id: FolderId, parent_id: Option<FolderId>) -> AppResult<Folder> {
        self.store.move_folder(id, parent_id).await
    }

    async fn delete_folder(&self, id: FolderId) -> AppResult<()> {
        self.store.delete_folder(id).await.map(|_| ())
    }

    async fn delete_file(&self, id: FileId) -> AppResult<()> {
        self.store.delete_file(id).await.map(|_| ())
    }

    async fn update_file(&self, id: FileId, update: &UpdateFileMetadata) -> AppResult<MediaFile> {
        self.store.update_file(id, update).await
    }
}
