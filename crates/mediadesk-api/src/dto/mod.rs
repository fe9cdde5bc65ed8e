//! Request DTOs. Response envelopes live in `mediadesk_entity::envelope`.

pub mod request;

pub use mediadesk_entity::{ApiErrorResponse, ApiResponse, HealthResponse, MessageResponse};
pub use request::{CreateFolderRequest, ListFilesQuery, MoveFolderRequest, UpdateFileRequest};
