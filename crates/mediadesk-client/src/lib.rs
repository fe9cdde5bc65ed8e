//! # mediadesk-client
//!
//! [`HttpMediaApi`] speaks the MediaDesk REST surface with `reqwest` and
//! implements [`mediadesk_library::MediaApi`], so a
//! [`MediaLibrary`](mediadesk_library::MediaLibrary) can drive a remote
//! server.

pub mod client;
pub mod error;
pub mod media;
pub mod upload;

pub use client::{FileContent, HttpMediaApi};
