//! Uploaded file content, keyed by file id.

use std::sync::Arc;

use bytes::Bytes;
use dashmap::DashMap;

use mediadesk_core::types::FileId;

/// Content of one stored file.
#[derive(Debug, Clone)]
pub struct StoredBlob {
    /// MIME type served with the content.
    pub mime_type: String,
    /// Raw bytes.
    pub data: Bytes,
}

/// Concurrent map of file contents.
#[derive(Debug, Clone, Default)]
pub struct BlobStore {
    blobs: Arc<DashMap<FileId, StoredBlob>>,
}

impl BlobStore {
    /// Create an empty blob store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store or replace content.
    pub fn put(&self, id: FileId, blob: StoredBlob) {
        self.blobs.insert(id, blob);
    }

    /// Fetch content.
    pub fn get(&self, id: &FileId) -> Option<StoredBlob> {
        self.blobs.get(id).map(|entry| entry.value().clone())
    }

    /// Drop content. Returns `true` if something was removed.
    pub fn remove(&self, id: &FileId) -> bool {
        self.blobs.remove(id).is_some()
    }

    /// Number of stored blobs.
    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    /// Whether the store holds no content.
    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}
