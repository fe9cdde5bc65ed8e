//! Media file domain entities.

pub mod file_type;
pub mod filter;
pub mod metadata;
pub mod model;
pub mod upload;

pub use file_type::FileType;
pub use filter::FileFilter;
pub use metadata::UpdateFileMetadata;
pub use model::MediaFile;
pub use upload::{UploadBatch, UploadBlob};
