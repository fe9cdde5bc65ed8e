//! Listing filters.

use serde::{Deserialize, Serialize};

use super::file_type::FileType;
use super::model::MediaFile;

/// Name and type filter applied to a folder listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFilter {
    /// Case-insensitive substring of the name or original name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Exact file type.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub file_type: Option<FileType>,
}

impl FileFilter {
    /// A filter that matches everything.
    pub fn all() -> Self {
        Self::default()
    }

    /// Restrict to names containing `search`.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Restrict to one file type.
    pub fn with_type(mut self, file_type: FileType) -> Self {
        self.file_type = Some(file_type);
        self
    }

    /// Whether the file passes both conditions.
    pub fn matches(&self, file: &MediaFile) -> bool {
        if let Some(wanted) = self.file_type
            && file.file_type != wanted
        {
            return false;
        }

        match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(needle) => {
                let needle = needle.to_lowercase();
                file.name.to_lowercase().contains(&needle)
                    || file.original_name.to_lowercase().contains(&needle)
            }
        }
    }
}
