//! Folder tree building and ancestor resolution.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::warn;

use cloudvault_core::error::AppError;
use cloudvault_core::traits::{Latency, Repository};
use cloudvault_core::types::{FolderId, Operation};
use cloudvault_entity::file::File;
use cloudvault_entity::folder::{Folder, FolderNode, FolderTree};
use cloudvault_store::MemoryStore;

/// Builds folder trees and breadcrumb trails.
#[derive(Debug, Clone)]
pub struct TreeService {
    /// Folder store.
    folder_repo: Arc<MemoryStore<Folder>>,
    /// File store (for child counts).
    file_repo: Arc<MemoryStore<File>>,
    /// Simulated network delay.
    latency: Arc<dyn Latency>,
}

impl TreeService {
    /// Creates a new tree service.
    pub fn new(
        folder_repo: Arc<MemoryStore<Folder>>,
        file_repo: Arc<MemoryStore<File>>,
        latency: Arc<dyn Latency>,
    ) -> Self {
        Self {
            folder_repo,
            file_repo,
            latency,
        }
    }

    /// The trail from the root down to `folder_id`, inclusive.
    ///
    /// Empty for `None`. The walk stops at a missing parent, and at a folder
    /// it already visited if parent links ever form a loop.
    pub async fn get_breadcrumbs(
        &self,
        folder_id: Option<FolderId>,
    ) -> Result<Vec<Folder>, AppError> {
        self.latency.simulate(Operation::FolderBreadcrumbs).await;

        let all = self.counted_folders().await;
        let by_id: HashMap<FolderId, &Folder> = all.iter().map(|f| (f.id, f)).collect();

        let mut breadcrumbs = Vec::new();
        let mut visited = HashSet::new();
        let mut current = folder_id;
        while let Some(id) = current {
            if !visited.insert(id) {
                warn!(folder_id = %id, "Folder parent links form a cycle");
                break;
            }
            let Some(folder) = by_id.get(&id) else {
                break;
            };
            breadcrumbs.push((*folder).clone());
            current = folder.parent_id;
        }
        breadcrumbs.reverse();

        Ok(breadcrumbs)
    }

    /// Builds the complete folder forest from the root folders down.
    pub async fn get_tree(&self) -> Result<FolderTree, AppError> {
        self.latency.simulate(Operation::FolderTree).await;

        let all = self.counted_folders().await;
        let mut visited = HashSet::new();
        let roots = build_children(None, &all, &mut visited);

        Ok(FolderTree::from_roots(roots))
    }

    async fn counted_folders(&self) -> Vec<Folder> {
        let mut folders = self.folder_repo.list().await;
        let files = self.file_repo.list().await;
        refresh_child_counts(&mut folders, &files);
        folders
    }
}

/// Builds nodes for the folders under `parent_id`.
fn build_children(
    parent_id: Option<FolderId>,
    all_folders: &[Folder],
    visited: &mut HashSet<FolderId>,
) -> Vec<FolderNode> {
    let mut nodes = Vec::new();
    for folder in all_folders.iter().filter(|f| f.parent_id == parent_id) {
        if !visited.insert(folder.id) {
            continue;
        }
        let children = build_children(Some(folder.id), all_folders, visited);
        nodes.push(FolderNode {
            folder: folder.clone(),
            children,
        });
    }
    nodes
}

/// All transitive descendants of `root`, depth first, excluding `root`.
pub(crate) fn descendants_of(all_folders: &[Folder], root: FolderId) -> Vec<FolderId> {
    let mut found = Vec::new();
    let mut visited = HashSet::from([root]);
    let mut stack = vec![root];

    while let Some(parent) = stack.pop() {
        for child in all_folders.iter().filter(|f| f.parent_id == Some(parent)) {
            if visited.insert(child.id) {
                found.push(child.id);
                stack.push(child.id);
            }
        }
    }

    found
}

/// Sets `child_count` to direct sub-folders plus files outside the trash.
pub(crate) fn refresh_child_counts(folders: &mut [Folder], files: &[File]) {
    let mut counts: HashMap<FolderId, u64> = HashMap::new();
    for parent in folders.iter().filter_map(|f| f.parent_id) {
        *counts.entry(parent).or_default() += 1;
    }
    for folder_id in files
        .iter()
        .filter(|f| f.is_active())
        .filter_map(|f| f.folder_id)
    {
        *counts.entry(folder_id).or_default() += 1;
    }
    for folder in folders.iter_mut() {
        folder.child_count = counts.get(&folder.id).copied().unwrap_or(0);
    }
}
