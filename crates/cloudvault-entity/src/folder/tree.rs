//! Folder tree structures for hierarchical display.

use serde::{Deserialize, Serialize};

use super::model::Folder;

/// A node in a folder tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderNode {
    /// The folder at this node.
    #[serde(flatten)]
    pub folder: Folder,
    /// Child folder nodes.
    pub children: Vec<FolderNode>,
}

impl FolderNode {
    /// Number of folders in this subtree, including this one.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(FolderNode::size).sum::<usize>()
    }
}

/// The complete folder forest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderTree {
    /// The root node(s) of the tree.
    pub roots: Vec<FolderNode>,
    /// Total number of folders in the tree.
    pub total_folders: usize,
}

impl FolderTree {
    /// Wrap root nodes, counting every folder beneath them.
    pub fn from_roots(roots: Vec<FolderNode>) -> Self {
        let total_folders = roots.iter().map(FolderNode::size).sum();
        Self {
            roots,
            total_folders,
        }
    }
}
