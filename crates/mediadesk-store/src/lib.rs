//! # mediadesk-store
//!
//! In-memory backend for the media library. Owns the folder hierarchy, the
//! file records and the uploaded content, and enforces the referential
//! rules the HTTP API promises (cascade delete, acyclic parents,
//! all-or-nothing batch inserts).

pub mod blobs;
pub mod files;
pub mod folders;
pub mod state;

pub use blobs::{BlobStore, StoredBlob};
pub use state::MemoryMediaStore;
