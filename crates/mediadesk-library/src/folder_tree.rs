//! Client-side folder hierarchy and navigation queries.

use std::collections::{HashMap, HashSet};

use mediadesk_core::error::AppError;
use mediadesk_core::result::AppResult;
use mediadesk_core::types::FolderId;
use mediadesk_entity::{CreateFolder, Folder, FolderNode};

/// One step of a breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Crumb {
    /// The top-level sentinel.
    Root,
    /// A real folder.
    Folder {
        /// Folder ID.
        id: FolderId,
        /// Folder name.
        name: String,
    },
}

impl Crumb {
    /// The folder this crumb navigates to (None for root).
    pub fn target(&self) -> Option<FolderId> {
        match self {
            Self::Root => None,
            Self::Folder { id, .. } => Some(*id),
        }
    }
}

/// Indexed set of folders.
#[derive(Debug, Clone, Default)]
pub struct FolderTreeStore {
    folders: HashMap<FolderId, Folder>,
}

impl FolderTreeStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole set with a fresh listing.
    pub fn replace_all(&mut self, folders: Vec<Folder>) {
        self.folders = folders.into_iter().map(|f| (f.id, f)).collect();
    }

    /// Insert or replace one folder.
    pub fn upsert(&mut self, folder: Folder) {
        self.folders.insert(folder.id, folder);
    }

    /// Look up a folder.
    pub fn get(&self, id: FolderId) -> Option<&Folder> {
        self.folders.get(&id)
    }

    /// Whether the folder is known.
    pub fn contains(&self, id: FolderId) -> bool {
        self.folders.contains_key(&id)
    }

    /// Number of known folders.
    pub fn len(&self) -> usize {
        self.folders.len()
    }

    /// Whether no folder is known.
    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }

    /// Every folder, sorted by name.
    pub fn all(&self) -> Vec<Folder> {
        let mut folders: Vec<Folder> = self.folders.values().cloned().collect();
        sort_by_name(&mut folders);
        folders
    }

    /// Folders whose parent is `parent_id` (None for root), sorted by name.
    pub fn list_children(&self, parent_id: Option<FolderId>) -> Vec<Folder> {
        let mut children: Vec<Folder> = self
            .folders
            .values()
            .filter(|f| f.parent_id == parent_id)
            .cloned()
            .collect();
        sort_by_name(&mut children);
        children
    }

    /// Ancestor chain of `id`, root-first, ending with the folder itself.
    ///
    /// Each hop is a map lookup. A dangling parent reference or a cycle ends
    /// the walk, so the result may be partial; an unknown `id` yields an
    /// empty path.
    pub fn breadcrumb_path(&self, id: FolderId) -> Vec<Folder> {
        let mut path = Vec::new();
        let mut seen = HashSet::new();
        let mut current = Some(id);

        while let Some(folder_id) = current {
            if !seen.insert(folder_id) {
                tracing::warn!(folder_id = %folder_id, "Cycle in folder parents");
                break;
            }
            let Some(folder) = self.folders.get(&folder_id) else {
                if folder_id != id {
                    tracing::warn!(folder_id = %folder_id, "Dangling folder parent reference");
                }
                break;
            };
            path.push(folder.clone());
            current = folder.parent_id;
        }

        path.reverse();
        path
    }

    /// Breadcrumb trail for `folder_id`, always starting with [`Crumb::Root`].
    pub fn trail(&self, folder_id: Option<FolderId>) -> Vec<Crumb> {
        let mut trail = vec![Crumb::Root];
        if let Some(id) = folder_id {
            trail.extend(self.breadcrumb_path(id).into_iter().map(|f| Crumb::Folder {
                id: f.id,
                name: f.name,
            }));
        }
        trail
    }

    /// Whether `candidate` is `folder` itself or one of its ancestors.
    pub fn is_self_or_ancestor(&self, candidate: FolderId, folder: FolderId) -> bool {
        let mut seen = HashSet::new();
        let mut current = Some(folder);
        while let Some(id) = current {
            if id == candidate {
                return true;
            }
            if !seen.insert(id) {
                return false;
            }
            current = self.folders.get(&id).and_then(|f| f.parent_id);
        }
        false
    }

    /// Check that `folder` may be placed under `new_parent`.
    pub fn validate_parent(&self, folder: FolderId, new_parent: Option<FolderId>) -> AppResult<()> {
        if !self.contains(folder) {
            return Err(AppError::not_found("Folder not found"));
        }
        if let Some(parent) = new_parent {
            if !self.contains(parent) {
                return Err(AppError::not_found("Target folder not found"));
            }
            if self.is_self_or_ancestor(folder, parent) {
                return Err(AppError::conflict(
                    "Cannot move a folder into itself or one of its descendants",
                ));
            }
        }
        Ok(())
    }

    /// Validate a create request before it is sent.
    pub fn prepare_create(&self, name: &str, parent_id: Option<FolderId>) -> AppResult<CreateFolder> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Folder name cannot be empty"));
        }
        if let Some(parent) = parent_id
            && !self.contains(parent)
        {
            return Err(AppError::not_found("Parent folder not found"));
        }
        Ok(CreateFolder {
            name: name.to_string(),
            parent_id,
        })
    }

    /// Remove a folder and everything below it. Returns the removed ids.
    pub fn remove_subtree(&mut self, id: FolderId) -> HashSet<FolderId> {
        let mut removed = HashSet::new();
        if !self.contains(id) {
            return removed;
        }
        removed.insert(id);

        // Grow the removed set until no remaining folder hangs off it.
        loop {
            let next: Vec<FolderId> = self
                .folders
                .values()
                .filter(|f| !removed.contains(&f.id))
                .filter(|f| f.parent_id.is_some_and(|p| removed.contains(&p)))
                .map(|f| f.id)
                .collect();
            if next.is_empty() {
                break;
            }
            removed.extend(next);
        }

        self.folders.retain(|id, _| !removed.contains(id));
        removed
    }

    /// Shift the cached file count of a folder.
    pub fn adjust_file_count(&mut self, id: FolderId, delta: i64) {
        if let Some(folder) = self.folders.get_mut(&id) {
            folder.file_count = folder.file_count.saturating_add_signed(delta);
        }
    }

    /// Nested view of the whole hierarchy.
    pub fn forest(&self) -> Vec<FolderNode> {
        let folders: Vec<Folder> = self.folders.values().cloned().collect();
        FolderNode::build_forest(&folders)
    }
}

fn sort_by_name(folders: &mut [Folder]) {
    folders.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then(a.created_at.cmp(&b.created_at))
    });
}
