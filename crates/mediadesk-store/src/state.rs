//! Store handle and the guarded record maps behind it.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::RwLock;

use mediadesk_core::config::UploadConfig;
use mediadesk_core::types::{FileId, FolderId};
use mediadesk_entity::{Folder, MediaFile};

use crate::blobs::BlobStore;

/// In-memory media backend.
///
/// Cloning is cheap; all clones share the same records.
#[derive(Debug, Clone)]
pub struct MemoryMediaStore {
    /// Folder and file records. Guarded together so cascades and batch
    /// inserts are atomic.
    pub(crate) state: Arc<RwLock<StoreState>>,
    /// Uploaded content.
    pub(crate) blobs: BlobStore,
    /// Upload limits and URL prefix.
    pub(crate) upload: UploadConfig,
}

impl MemoryMediaStore {
    /// Create an empty store.
    pub fn new(upload: UploadConfig) -> Self {
        Self {
            state: Arc::new(RwLock::new(StoreState::default())),
            blobs: BlobStore::new(),
            upload,
        }
    }

    /// The upload limits this store enforces.
    pub fn upload_config(&self) -> &UploadConfig {
        &self.upload
    }
}

impl Default for MemoryMediaStore {
    fn default() -> Self {
        Self::new(UploadConfig::default())
    }
}

/// Record maps.
#[derive(Debug, Default)]
pub(crate) struct StoreState {
    pub(crate) folders: HashMap<FolderId, Folder>,
    pub(crate) files: HashMap<FileId, MediaFile>,
}

impl StoreState {
    /// Ids of `root` and every folder below it.
    pub(crate) fn subtree_ids(&self, root: FolderId) -> HashSet<FolderId> {
        let mut children: HashMap<FolderId, Vec<FolderId>> = HashMap::new();
        for folder in self.folders.values() {
            if let Some(parent) = folder.parent_id {
                children.entry(parent).or_default().push(folder.id);
            }
        }

        let mut seen = HashSet::from([root]);
        let mut pending = vec![root];
        while let Some(current) = pending.pop() {
            for child in children.get(&current).into_iter().flatten() {
                if seen.insert(*child) {
                    pending.push(*child);
                }
            }
        }
        seen
    }

    /// Whether `candidate` is `folder` itself or one of its ancestors.
    pub(crate) fn is_self_or_ancestor(&self, candidate: FolderId, folder: FolderId) -> bool {
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

    /// Whether a sibling under `parent` already uses `name` (case-insensitive).
    pub(crate) fn sibling_name_taken(
        &self,
        parent: Option<FolderId>,
        name: &str,
        except: Option<FolderId>,
    ) -> bool {
        let name = name.to_lowercase();
        self.folders.values().any(|f| {
            f.parent_id == parent && Some(f.id) != except && f.name.to_lowercase() == name
        })
    }

    /// A folder record with its derived file count filled in.
    pub(crate) fn folder_with_count(&self, folder: &Folder) -> Folder {
        let file_count = self
            .files
            .values()
            .filter(|file| file.folder_id == Some(folder.id))
            .count() as u64;
        Folder {
            file_count,
            ..folder.clone()
        }
    }
}
