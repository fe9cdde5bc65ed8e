//! Media file entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mediadesk_core::types::{FileId, FolderId, UserId};

use super::file_type::FileType;

/// An uploaded asset with its metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaFile {
    /// Unique file identifier.
    pub id: FileId,
    /// Display name, editable after upload.
    pub name: String,
    /// Name the file was uploaded with.
    pub original_name: String,
    /// Classification derived from `mime_type`.
    pub file_type: FileType,
    /// MIME type string.
    pub mime_type: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// URL the content is served from.
    pub url: String,
    /// Thumbnail URL, when one exists.
    pub thumbnail_url: Option<String>,
    /// Owning folder (None for root).
    pub folder_id: Option<FolderId>,
    /// Alternative text for images.
    pub alt_text: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// The admin who uploaded the file.
    pub uploaded_by: Option<UserId>,
    /// When the file was created.
    pub created_at: DateTime<Utc>,
    /// When the file metadata was last updated.
    pub updated_at: DateTime<Utc>,
}
