//! Files of the active folder.

use mediadesk_core::error::AppError;
use mediadesk_core::result::AppResult;
use mediadesk_core::types::{FileId, FolderId};
use mediadesk_entity::{FileFilter, MediaFile, StatsSnapshot, UpdateFileMetadata};

/// File metadata loaded for one folder scope.
#[derive(Debug, Clone, Default)]
pub struct FileRegistry {
    scope: Option<FolderId>,
    files: Vec<MediaFile>,
}

impl FileRegistry {
    /// Create an empty registry scoped to root.
    pub fn new() -> Self {
        Self::default()
    }

    /// The folder the loaded files belong to (None for root).
    pub fn scope(&self) -> Option<FolderId> {
        self.scope
    }

    /// Replace the loaded files with a fresh listing of `scope`.
    ///
    /// Records that belong to another folder are dropped.
    pub fn replace(&mut self, scope: Option<FolderId>, files: Vec<MediaFile>) {
        self.scope = scope;
        self.files = files.into_iter().filter(|f| f.folder_id == scope).collect();
    }

    /// Files in `folder_id` passing `filter`, in listing order.
    ///
    /// A folder other than the loaded scope yields nothing.
    pub fn list(&self, folder_id: Option<FolderId>, filter: &FileFilter) -> Vec<MediaFile> {
        if folder_id != self.scope {
            return Vec::new();
        }
        self.files
            .iter()
            .filter(|f| filter.matches(f))
            .cloned()
            .collect()
    }

    /// Every loaded file.
    pub fn all(&self) -> &[MediaFile] {
        &self.files
    }

    /// Look up a loaded file.
    pub fn get(&self, id: FileId) -> Option<&MediaFile> {
        self.files.iter().find(|f| f.id == id)
    }

    /// Whether a file is loaded.
    pub fn contains(&self, id: FileId) -> bool {
        self.get(id).is_some()
    }

    /// Number of loaded files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether nothing is loaded.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Apply an edit locally.
    pub fn update_metadata(&mut self, id: FileId, update: &UpdateFileMetadata) -> AppResult<MediaFile> {
        update.validate()?;
        let file = self
            .files
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| AppError::not_found("File not found"))?;
        update.apply_to(file);
        Ok(file.clone())
    }

    /// Swap in the server's copy of an edited file.
    pub fn replace_file(&mut self, updated: MediaFile) -> AppResult<()> {
        let slot = self
            .files
            .iter_mut()
            .find(|f| f.id == updated.id)
            .ok_or_else(|| AppError::not_found("File not found"))?;
        *slot = updated;
        Ok(())
    }

    /// Remove a loaded file.
    pub fn delete(&mut self, id: FileId) -> AppResult<MediaFile> {
        let index = self
            .files
            .iter()
            .position(|f| f.id == id)
            .ok_or_else(|| AppError::not_found("File not found"))?;
        Ok(self.files.remove(index))
    }

    /// Add committed uploads. Files for other folders are ignored; returns
    /// how many were added.
    pub fn insert_batch(&mut self, files: Vec<MediaFile>) -> usize {
        let incoming: Vec<MediaFile> = files
            .into_iter()
            .filter(|f| f.folder_id == self.scope && !self.contains(f.id))
            .collect();
        let added = incoming.len();
        // Newest first, matching the server listing.
        self.files.splice(0..0, incoming);
        added
    }

    /// Aggregate over the loaded files.
    pub fn compute_stats(&self) -> StatsSnapshot {
        StatsSnapshot::from_files(&self.files)
    }
}
