//! # mediadesk-entity
//!
//! Entity models for the MediaDesk media library. Every struct in this
//! crate is either a stored record (folders, files) or a value object
//! exchanged with the API (filters, metadata edits, upload blobs, stats).

pub mod envelope;
pub mod file;
pub mod folder;
pub mod stats;

pub use envelope::{ApiErrorResponse, ApiResponse, HealthResponse, MessageResponse, USER_ID_HEADER};
pub use file::{FileFilter, FileType, MediaFile, UpdateFileMetadata, UploadBatch, UploadBlob};
pub use folder::{CreateFolder, Folder, FolderNode, MoveFolder};
pub use stats::{StatsSnapshot, TypeCounts};
