//! Core type definitions used across the MediaDesk workspace.

pub mod id;
pub mod scope;

pub use id::*;
pub use scope::{ROOT_SENTINEL, folder_param, parse_folder_param};
