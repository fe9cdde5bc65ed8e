//! Folder domain entities.

pub mod model;
pub mod tree;

pub use model::{CreateFolder, Folder, MoveFolder};
pub use tree::FolderNode;
