//! [`MediaApi`] over HTTP.

use async_trait::async_trait;
use tracing::info;

use mediadesk_core::result::AppResult;
use mediadesk_core::types::{FileId, FolderId};
use mediadesk_entity::{
    CreateFolder, FileFilter, Folder, MediaFile, MessageResponse, MoveFolder, StatsSnapshot,
    UpdateFileMetadata, UploadBatch,
};
use mediadesk_library::{MediaApi, ProgressReporter};

use crate::client::HttpMediaApi;
use crate::upload::build_form;

#[async_trait]
impl MediaApi for HttpMediaApi {
    async fn list_files(&self, folder_id: Option<FolderId>) -> AppResult<Vec<MediaFile>> {
        self.list_files_filtered(folder_id, &FileFilter::all()).await
    }

    async fn list_folders(&self) -> AppResult<Vec<Folder>> {
        let url = self.endpoint("/api/media/folders")?;
        self.send(self.http.get(url)).await
    }

    async fn get_stats(&self) -> AppResult<StatsSnapshot> {
        let url = self.endpoint("/api/media/stats")?;
        self.send(self.http.get(url)).await
    }

    async fn upload(
        &self,
        batch: UploadBatch,
        progress: ProgressReporter,
    ) -> AppResult<Vec<MediaFile>> {
        let url = self.endpoint("/api/media/upload")?;
        let count = batch.files.len();
        let bytes = batch.total_size();
        let form = build_form(batch, progress)?;

        let request = self
            .http
            .post(url)
            .timeout(self.upload_timeout)
            .multipart(form);
        let created: Vec<MediaFile> = self.send(request).await?;

        info!(count, bytes, "Upload batch sent");
        Ok(created)
    }

    async fn create_folder(&self, req: CreateFolder) -> AppResult<Folder> {
        let url = self.endpoint("/api/media/folders")?;
        self.send(self.http.post(url).json(&req)).await
    }

    async fn move_folder(&self, id: FolderId, parent_id: Option<FolderId>) -> AppResult<Folder> {
        let url = self.endpoint(&format!("/api/media/folders/{id}/move"))?;
        self.send(self.http.put(url).json(&MoveFolder { parent_id }))
            .await
    }

    async fn delete_folder(&self, id: FolderId) -> AppResult<()> {
        let url = self.endpoint(&format!("/api/media/folders/{id}"))?;
        let _: MessageResponse = self.send(self.http.delete(url)).await?;
        Ok(())
    }

    async fn delete_file(&self, id: FileId) -> AppResult<()> {
        let url = self.endpoint(&format!("/api/media/files/{id}"))?;
        let _: MessageResponse = self.send(self.http.delete(url)).await?;
        Ok(())
    }

    async fn update_file(&self, id: FileId, update: &UpdateFileMetadata) -> AppResult<MediaFile> {
        let url = self.endpoint(&format!("/api/media/files/{id}"))?;
        self.send(self.http.put(url).json(update)).await
    }
}
