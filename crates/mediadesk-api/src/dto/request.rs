//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use mediadesk_core::result::AppResult;
use mediadesk_core::types::{FolderId, parse_folder_param};
use mediadesk_entity::{CreateFolder, FileFilter, FileType, UpdateFileMetadata};

/// Create folder request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFolderRequest {
    /// Folder name.
    #[validate(length(min = 1, max = 255, message = "Folder name must be 1-255 characters"))]
    pub name: String,
    /// Parent folder (absent for root).
    #[serde(default)]
    pub parent_id: Option<FolderId>,
}

impl From<CreateFolderRequest> for CreateFolder {
    fn from(req: CreateFolderRequest) -> Self {
        Self {
            name: req.name,
            parent_id: req.parent_id,
        }
    }
}

/// Move folder request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct MoveFolderRequest {
    /// New parent (absent for root).
    #[serde(default)]
    pub parent_id: Option<FolderId>,
}

/// Update file metadata request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateFileRequest {
    /// New display name.
    #[validate(length(min = 1, max = 255, message = "File name must be 1-255 characters"))]
    pub name: Option<String>,
    /// New alternative text.
    #[validate(length(max = 1000))]
    pub alt_text: Option<String>,
    /// New description.
    #[validate(length(max = 5000))]
    pub description: Option<String>,
}

impl From<UpdateFileRequest> for UpdateFileMetadata {
    fn from(req: UpdateFileRequest) -> Self {
        Self {
            name: req.name,
            alt_text: req.alt_text,
            description: req.description,
        }
    }
}

/// Query string of `GET /api/media/files`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListFilesQuery {
    /// Folder id or `root`.
    pub folder_id: Option<String>,
    /// Name substring.
    pub search: Option<String>,
    /// File type.
    #[serde(rename = "type")]
    pub file_type: Option<String>,
}

impl ListFilesQuery {
    /// The folder being listed (None for root).
    pub fn folder(&self) -> AppResult<Option<FolderId>> {
        match self.folder_id.as_deref() {
            Some(value) => parse_folder_param(value),
            None => Ok(None),
        }
    }

    /// The filter to apply.
    pub fn filter(&self) -> AppResult<FileFilter> {
        let mut filter = FileFilter::all();
        if let Some(search) = self.search.as_deref()
            && !search.trim().is_empty()
        {
            filter = filter.with_search(search.trim());
        }
        if let Some(file_type) = self.file_type.as_deref()
            && !file_type.trim().is_empty()
        {
            filter = filter.with_type(file_type.trim().parse::<FileType>()?);
        }
        Ok(filter)
    }
}
