//! Folder tree structures for hierarchical display.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use mediadesk_core::types::FolderId;

use super::model::Folder;

/// A node in a folder tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderNode {
    /// Folder ID.
    pub id: FolderId,
    /// Folder name.
    pub name: String,
    /// Depth level (0 for top-level folders).
    pub depth: usize,
    /// Number of files in this folder.
    pub file_count: u64,
    /// Child folder nodes, sorted by name.
    pub children: Vec<FolderNode>,
}

impl FolderNode {
    /// Build the forest of top-level folders from a flat folder list.
    ///
    /// Folders whose parent is missing from the list are not reachable from
    /// the root and are left out, as are folders caught in a parent cycle.
    pub fn build_forest(folders: &[Folder]) -> Vec<FolderNode> {
        let mut by_parent: HashMap<Option<FolderId>, Vec<&Folder>> = HashMap::new();
        for folder in folders {
            by_parent.entry(folder.parent_id).or_default().push(folder);
        }
        for siblings in by_parent.values_mut() {
            siblings.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        }
        Self::build_level(&by_parent, None, 0)
    }

    fn build_level(
        by_parent: &HashMap<Option<FolderId>, Vec<&Folder>>,
        parent: Option<FolderId>,
        depth: usize,
    ) -> Vec<FolderNode> {
        // A cycle can never hang off the root, so plain recursion terminates.
        by_parent
            .get(&parent)
            .map(|siblings| {
                siblings
                    .iter()
                    .map(|folder| FolderNode {
                        id: folder.id,
                        name: folder.name.clone(),
                        depth,
                        file_count: folder.file_count,
                        children: Self::build_level(by_parent, Some(folder.id), depth + 1),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Total number of nodes in this subtree, including itself.
    pub fn subtree_size(&self) -> usize {
        1 + self.children.iter().map(FolderNode::subtree_size).sum::<usize>()
    }
}
