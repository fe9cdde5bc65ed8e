//! File record and content operations.

use chrono::Utc;
use tracing::{info, warn};

use mediadesk_core::error::AppError;
use mediadesk_core::result::AppResult;
use mediadesk_core::types::{FileId, FolderId, UserId};
use mediadesk_entity::{
    FileFilter, MediaFile, StatsSnapshot, UpdateFileMetadata, UploadBatch,
};

use crate::blobs::StoredBlob;
use crate::state::MemoryMediaStore;

impl MemoryMediaStore {
    /// List files directly inside `folder_id` (None for root) that pass `filter`,
    /// newest first.
    pub async fn list_files(
        &self,
        folder_id: Option<FolderId>,
        filter: &FileFilter,
    ) -> AppResult<Vec<MediaFile>> {
        let state = self.state.read().await;
        let mut files: Vec<MediaFile> = state
            .files
            .values()
            .filter(|file| file.folder_id == folder_id && filter.matches(file))
            .cloned()
            .collect();
        files.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(files)
    }

    /// Find a file by ID.
    pub async fn find_file(&self, id: FileId) -> AppResult<Option<MediaFile>> {
        Ok(self.state.read().await.files.get(&id).cloned())
    }

    /// Commit an upload batch.
    ///
    /// Every file is validated before anything is written; on error the
    /// store is left untouched.
    pub async fn insert_batch(
        &self,
        batch: UploadBatch,
        uploaded_by: Option<UserId>,
    ) -> AppResult<Vec<MediaFile>> {
        if batch.is_empty() {
            return Err(AppError::validation("No files to upload"));
        }
        if batch.files.len() > self.upload.max_batch_files {
            return Err(AppError::validation(format!(
                "Too many files in one upload ({} > {})",
                batch.files.len(),
                self.upload.max_batch_files
            )));
        }
        for blob in &batch.files {
            if blob.file_name.trim().is_empty() {
                return Err(AppError::validation("Uploaded file has no name"));
            }
            if blob.size() > self.upload.max_upload_size_bytes {
                return Err(AppError::validation(format!(
                    "'{}' exceeds the maximum upload size of {} bytes",
                    blob.file_name, self.upload.max_upload_size_bytes
                )));
            }
        }

        let mut state = self.state.write().await;

        if let Some(folder_id) = batch.folder_id
            && !state.folders.contains_key(&folder_id)
        {
            return Err(AppError::not_found("Target folder not found"));
        }

        let prefix = self.upload.public_url_prefix.trim_end_matches('/');
        let now = Utc::now();
        let mut created = Vec::with_capacity(batch.files.len());

        for blob in batch.files {
            let id = FileId::new();
            let mime_type = blob.resolved_mime();
            let file_type = blob.file_type();
            let original_name = blob.file_name.trim().to_string();

            let file = MediaFile {
                id,
                name: original_name.clone(),
                original_name,
                file_type,
                mime_type: mime_type.clone(),
                size_bytes: blob.size(),
                url: format!("{prefix}/{id}/content"),
                thumbnail_url: None,
                folder_id: batch.folder_id,
                alt_text: None,
                description: None,
                uploaded_by,
                created_at: now,
                updated_at: now,
            };

            self.blobs.put(
                id,
                StoredBlob {
                    mime_type,
                    data: blob.data,
                },
            );
            state.files.insert(id, file.clone());
            created.push(file);
        }

        info!(
            folder_id = ?batch.folder_id,
            count = created.len(),
            bytes = created.iter().map(|f| f.size_bytes).sum::<u64>(),
            "Upload batch committed"
        );

        Ok(created)
    }

    /// Apply a metadata edit.
    pub async fn update_file(&self, id: FileId, update: &UpdateFileMetadata) -> AppResult<MediaFile> {
        update.validate()?;

        let mut state = self.state.write().await;
        let file = state
            .files
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("File not found"))?;

        let changed = update.apply_to(file);
        if !changed.is_empty() {
            file.updated_at = Utc::now();
            info!(file_id = %id, changed = ?changed, "File metadata updated");
        }

        Ok(file.clone())
    }

    /// Delete a file record and its content.
    pub async fn delete_file(&self, id: FileId) -> AppResult<MediaFile> {
        let removed = self
            .state
            .write()
            .await
            .files
            .remove(&id)
            .ok_or_else(|| AppError::not_found("File not found"))?;

        if !self.blobs.remove(&id) {
            warn!(file_id = %id, "Deleted file had no stored content");
        }

        info!(file_id = %id, name = %removed.name, "File deleted");
        Ok(removed)
    }

    /// Fetch the stored content of a file.
    pub async fn file_content(&self, id: FileId) -> AppResult<StoredBlob> {
        self.blobs
            .get(&id)
            .ok_or_else(|| AppError::not_found("File content not found"))
    }

    /// Aggregate statistics over every stored file.
    pub async fn stats(&self) -> AppResult<StatsSnapshot> {
        let state = self.state.read().await;
        Ok(StatsSnapshot::from_files(state.files.values()))
    }
}
