//! Aggregate statistics over the file set.

use serde::{Deserialize, Serialize};

use crate::file::{FileType, MediaFile};

/// Per-type file counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeCounts {
    /// Image files.
    pub image: u64,
    /// Video files.
    pub video: u64,
    /// Document files.
    pub document: u64,
    /// Everything else.
    pub other: u64,
}

impl TypeCounts {
    /// Count for one type.
    pub fn get(&self, file_type: FileType) -> u64 {
        match file_type {
            FileType::Image => self.image,
            FileType::Video => self.video,
            FileType::Document => self.document,
            FileType::Other => self.other,
        }
    }

    fn bump(&mut self, file_type: FileType) {
        match file_type {
            FileType::Image => self.image += 1,
            FileType::Video => self.video += 1,
            FileType::Document => self.document += 1,
            FileType::Other => self.other += 1,
        }
    }
}

/// Read-only aggregate over a file set, recomputed on demand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    /// Number of files.
    pub total_files: u64,
    /// Sum of file sizes in bytes.
    pub total_size: u64,
    /// Per-type counts.
    pub files_by_type: TypeCounts,
}

impl StatsSnapshot {
    /// Compute a snapshot from scratch.
    pub fn from_files<'a>(files: impl IntoIterator<Item = &'a MediaFile>) -> Self {
        files.into_iter().fold(Self::default(), |mut stats, file| {
            stats.total_files += 1;
            stats.total_size += file.size_bytes;
            stats.files_by_type.bump(file.file_type);
            stats
        })
    }
}
