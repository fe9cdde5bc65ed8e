//! Folder operations.

use std::collections::HashMap;

use tracing::info;

use mediadesk_core::error::AppError;
use mediadesk_core::result::AppResult;
use mediadesk_core::types::{FolderId, UserId};
use mediadesk_entity::{CreateFolder, Folder};

use crate::state::MemoryMediaStore;

impl MemoryMediaStore {
    /// List every folder, sorted by name, with derived file counts.
    pub async fn list_folders(&self) -> AppResult<Vec<Folder>> {
        let state = self.state.read().await;

        let mut counts: HashMap<FolderId, u64> = HashMap::new();
        for file in state.files.values() {
            if let Some(folder_id) = file.folder_id {
                *counts.entry(folder_id).or_default() += 1;
            }
        }

        let mut folders: Vec<Folder> = state
            .folders
            .values()
            .map(|folder| Folder {
                file_count: counts.get(&folder.id).copied().unwrap_or(0),
                ..folder.clone()
            })
            .collect();
        folders.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then(a.created_at.cmp(&b.created_at))
        });
        Ok(folders)
    }

    /// Find a folder by ID.
    pub async fn find_folder(&self, id: FolderId) -> AppResult<Option<Folder>> {
        let state = self.state.read().await;
        Ok(state.folders.get(&id).map(|f| state.folder_with_count(f)))
    }

    /// Create a new folder.
    pub async fn create_folder(
        &self,
        req: CreateFolder,
        created_by: Option<UserId>,
    ) -> AppResult<Folder> {
        let name = req.name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Folder name cannot be empty"));
        }

        let mut state = self.state.write().await;

        if let Some(parent_id) = req.parent_id
            && !state.folders.contains_key(&parent_id)
        {
            return Err(AppError::not_found("Parent folder not found"));
        }

        if state.sibling_name_taken(req.parent_id, name, None) {
            return Err(AppError::conflict(format!(
                "A folder named '{name}' already exists here"
            )));
        }

        let folder = Folder::new(name, req.parent_id, created_by);
        state.folders.insert(folder.id, folder.clone());

        info!(
            folder_id = %folder.id,
            parent_id = ?folder.parent_id,
            name = %folder.name,
            "Folder created"
        );

        Ok(folder)
    }

    /// Move a folder under a new parent (None for root).
    ///
    /// Rejects parents that would make the folder its own ancestor.
    pub async fn move_folder(&self, id: FolderId, parent_id: Option<FolderId>) -> AppResult<Folder> {
        let mut state = self.state.write().await;

        let name = state
            .folders
            .get(&id)
            .map(|f| f.name.clone())
            .ok_or_else(|| AppError::not_found("Folder not found"))?;

        if let Some(target) = parent_id {
            if !state.folders.contains_key(&target) {
                return Err(AppError::not_found("Target folder not found"));
            }
            if state.is_self_or_ancestor(id, target) {
                return Err(AppError::conflict(
                    "Cannot move a folder into itself or one of its descendants",
                ));
            }
        }

        if state.sibling_name_taken(parent_id, &name, Some(id)) {
            return Err(AppError::conflict(format!(
                "A folder named '{name}' already exists in the target folder"
            )));
        }

        let updated = match state.folders.get_mut(&id) {
            Some(folder) => {
                folder.parent_id = parent_id;
                folder.clone()
            }
            None => return Err(AppError::not_found("Folder not found")),
        };

        info!(folder_id = %id, new_parent = ?parent_id, "Folder moved");

        Ok(state.folder_with_count(&updated))
    }

    /// Delete a folder, every folder below it, and all of their files.
    ///
    /// Returns the number of files removed.
    pub async fn delete_folder(&self, id: FolderId) -> AppResult<u64> {
        let mut state = self.state.write().await;

        if !state.folders.contains_key(&id) {
            return Err(AppError::not_found("Folder not found"));
        }

        let doomed = state.subtree_ids(id);

        let doomed_files: Vec<_> = state
            .files
            .values()
            .filter(|file| file.folder_id.is_some_and(|f| doomed.contains(&f)))
            .map(|file| file.id)
            .collect();

        for file_id in &doomed_files {
            state.files.remove(file_id);
            self.blobs.remove(file_id);
        }
        for folder_id in &doomed {
            state.folders.remove(folder_id);
        }

        info!(
            folder_id = %id,
            folders_removed = doomed.len(),
            files_removed = doomed_files.len(),
            "Folder deleted"
        );

        Ok(doomed_files.len() as u64)
    }
}
