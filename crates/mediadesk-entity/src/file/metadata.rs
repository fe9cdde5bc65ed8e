//! Metadata edits.

use serde::{Deserialize, Serialize};

use mediadesk_core::error::AppError;
use mediadesk_core::result::AppResult;

use super::model::MediaFile;

/// Editable file metadata. Absent fields are left unchanged.
///
/// Content, type and folder are deliberately not part of this struct.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateFileMetadata {
    /// New display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New alternative text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
    /// New description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl UpdateFileMetadata {
    /// Rename only.
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Whether no field would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.alt_text.is_none() && self.description.is_none()
    }

    /// Reject edits that would blank the display name.
    pub fn validate(&self) -> AppResult<()> {
        if let Some(name) = &self.name
            && name.trim().is_empty()
        {
            return Err(AppError::validation("File name cannot be empty"));
        }
        Ok(())
    }

    /// Apply the edit in place and return the names of the fields that changed.
    pub fn apply_to(&self, file: &mut MediaFile) -> Vec<&'static str> {
        let mut changed = Vec::new();
        if let Some(name) = &self.name {
            let name = name.trim();
            if file.name != name {
                file.name = name.to_string();
                changed.push("name");
            }
        }
        if let Some(alt_text) = &self.alt_text
            && file.alt_text.as_deref() != Some(alt_text.as_str())
        {
            file.alt_text = Some(alt_text.clone());
            changed.push("alt_text");
        }
        if let Some(description) = &self.description
            && file.description.as_deref() != Some(description.as_str())
        {
            file.description = Some(description.clone());
            changed.push("description");
        }
        changed
    }
}
