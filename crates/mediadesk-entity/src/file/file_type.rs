//! Coarse file classification derived from MIME types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use mediadesk_core::error::AppError;

/// File type classification used for filtering and stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// `image/*`.
    Image,
    /// `video/*`.
    Video,
    /// PDFs, office formats and plain text.
    Document,
    /// Anything else.
    Other,
}

/// MIME types outside `text/*` that count as documents.
const DOCUMENT_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.ms-excel",
    "application/vnd.ms-powerpoint",
    "application/rtf",
    "application/vnd.oasis.opendocument.text",
    "application/vnd.oasis.opendocument.spreadsheet",
    "application/vnd.oasis.opendocument.presentation",
];

impl FileType {
    /// All variants, in display order.
    pub const ALL: [FileType; 4] = [Self::Image, Self::Video, Self::Document, Self::Other];

    /// Classify a MIME type string.
    pub fn from_mime(mime: &str) -> Self {
        let essence = mime
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        if essence.starts_with("image/") {
            Self::Image
        } else if essence.starts_with("video/") {
            Self::Video
        } else if essence.starts_with("text/")
            || DOCUMENT_MIME_TYPES.contains(&essence.as_str())
            || essence.starts_with("application/vnd.openxmlformats-officedocument.")
        {
            Self::Document
        } else {
            Self::Other
        }
    }

    /// Lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Document => "document",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "image" => Ok(Self::Image),
            "video" => Ok(Self::Video),
            "document" => Ok(Self::Document),
            "other" => Ok(Self::Other),
            other => Err(AppError::validation(format!("Unknown file type '{other}'"))),
        }
    }
}
