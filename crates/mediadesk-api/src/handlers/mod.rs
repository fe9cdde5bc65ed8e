//! HTTP request handlers.

pub mod file;
pub mod folder;
pub mod health;
pub mod upload;
