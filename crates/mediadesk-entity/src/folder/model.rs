//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mediadesk_core::types::{FolderId, UserId};

/// A folder in the media hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: FolderId,
    /// Folder name.
    pub name: String,
    /// Parent folder ID (null for top-level folders).
    pub parent_id: Option<FolderId>,
    /// Number of files directly inside this folder.
    pub file_count: u64,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// The admin who created the folder.
    pub created_by: Option<UserId>,
}

impl Folder {
    /// Build a new folder record with a fresh id.
    pub fn new(name: impl Into<String>, parent_id: Option<FolderId>, created_by: Option<UserId>) -> Self {
        Self {
            id: FolderId::new(),
            name: name.into(),
            parent_id,
            file_count: 0,
            created_at: Utc::now(),
            created_by,
        }
    }
}

/// Data required to create a new folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateFolder {
    /// Folder name.
    pub name: String,
    /// Parent folder (None for root).
    #[serde(default)]
    pub parent_id: Option<FolderId>,
}

/// Data required to reparent a folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveFolder {
    /// New parent folder (None for root).
    #[serde(default)]
    pub parent_id: Option<FolderId>,
}
