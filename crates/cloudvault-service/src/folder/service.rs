//! Folder CRUD with path maintenance and cascading delete.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use tracing::{info, warn};

use cloudvault_core::error::AppError;
use cloudvault_core::result::AppResult;
use cloudvault_core::traits::{Clock, Latency, Repository};
use cloudvault_core::types::{FolderId, Operation};
use cloudvault_entity::file::File;
use cloudvault_entity::folder::{CreateFolder, Folder, UpdateFolder};
use cloudvault_store::MemoryStore;

use super::tree::{descendants_of, refresh_child_counts};

/// Manages folder records.
#[derive(Debug, Clone)]
pub struct FolderService {
    /// Folder store.
    folder_repo: Arc<MemoryStore<Folder>>,
    /// File store (for child counts).
    file_repo: Arc<MemoryStore<File>>,
    /// Simulated network delay.
    latency: Arc<dyn Latency>,
    /// Time source for timestamps.
    clock: Arc<dyn Clock>,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(
        folder_repo: Arc<MemoryStore<Folder>>,
        file_repo: Arc<MemoryStore<File>>,
        latency: Arc<dyn Latency>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            folder_repo,
            file_repo,
            latency,
            clock,
        }
    }

    /// Lists every folder in insertion order.
    pub async fn get_all(&self) -> Result<Vec<Folder>, AppError> {
        self.latency.simulate(Operation::FolderGetAll).await;
        let mut folders = self.folder_repo.list().await;
        self.with_child_counts(&mut folders).await;
        Ok(folders)
    }

    /// Gets a folder by ID.
    pub async fn get_by_id(&self, folder_id: FolderId) -> Result<Folder, AppError> {
        self.latency.simulate(Operation::FolderGetById).await;
        let folder = self.find(folder_id).await?;
        let mut one = [folder];
        self.with_child_counts(&mut one).await;
        let [folder] = one;
        Ok(folder)
    }

    /// Lists the direct children of `parent_id` (`None` for root folders).
    pub async fn get_by_parent(
        &self,
        parent_id: Option<FolderId>,
    ) -> Result<Vec<Folder>, AppError> {
        self.latency.simulate(Operation::FolderGetByParent).await;
        let mut folders = self
            .folder_repo
            .find_where(&|f: &Folder| f.parent_id == parent_id)
            .await;
        self.with_child_counts(&mut folders).await;
        Ok(folders)
    }

    /// Creates a new folder.
    pub async fn create(&self, req: CreateFolder) -> Result<Folder, AppError> {
        self.latency.simulate(Operation::FolderCreate).await;

        let name = req.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::validation("Folder name cannot be empty"));
        }

        let path = match req.parent_id {
            Some(parent_id) => match self.folder_repo.find_by_id(&parent_id).await {
                Some(parent) => parent.child_path(&name),
                None => {
                    warn!(parent_id = %parent_id, "Parent folder missing, using root path");
                    name.clone()
                }
            },
            None => name.clone(),
        };

        let folder = Folder {
            id: FolderId::new(),
            name,
            parent_id: req.parent_id,
            path,
            created_date: self.clock.now(),
            child_count: 0,
        };
        let folder = self.folder_repo.insert(folder).await?;

        info!(folder_id = %folder.id, path = %folder.path, "Folder created");

        Ok(folder)
    }

    /// Renames a folder and rewrites the paths below it.
    ///
    /// The new path is rebuilt from the parent's path, so names holding a
    /// `/` never shift the prefix.
    pub async fn update(&self, folder_id: FolderId, req: UpdateFolder) -> Result<Folder, AppError> {
        self.latency.simulate(Operation::FolderUpdate).await;

        let Some(new_name) = req.name else {
            return self.find(folder_id).await;
        };
        let new_name = new_name.trim().to_string();
        if new_name.is_empty() {
            return Err(AppError::validation("Folder name cannot be empty"));
        }

        let folder = self
            .folder_repo
            .modify_all(Box::new(move |folders: &mut Vec<Folder>| -> AppResult<Folder> {
                let pos = position_of(folders, folder_id)?;
                let path = path_under(folders, folders[pos].parent_id, &new_name);
                folders[pos].name = new_name;
                folders[pos].path = path;
                rewrite_descendant_paths(folders, folder_id);
                Ok(folders[pos].clone())
            }))
            .await?;

        info!(folder_id = %folder_id, new_name = %folder.name, "Folder renamed");

        Ok(folder)
    }

    /// Moves a folder under a new parent (`None` for root).
    ///
    /// The cycle check and the path rewrite see the same snapshot, so two
    /// crossed moves cannot both succeed.
    pub async fn move_folder(
        &self,
        folder_id: FolderId,
        new_parent_id: Option<FolderId>,
    ) -> Result<Folder, AppError> {
        self.latency.simulate(Operation::FolderMove).await;

        let folder = self
            .folder_repo
            .modify_all(Box::new(move |folders: &mut Vec<Folder>| -> AppResult<Folder> {
                let pos = position_of(folders, folder_id)?;
                if let Some(target_id) = new_parent_id {
                    if target_id == folder_id {
                        return Err(AppError::validation("Cannot move a folder into itself"));
                    }
                    if !folders.iter().any(|f| f.id == target_id) {
                        return Err(AppError::not_found("Target folder not found"));
                    }
                    if descendants_of(folders, folder_id).contains(&target_id) {
                        return Err(AppError::validation(
                            "Cannot move a folder into one of its descendants",
                        ));
                    }
                }
                let path = path_under(folders, new_parent_id, &folders[pos].name);
                folders[pos].parent_id = new_parent_id;
                folders[pos].path = path;
                rewrite_descendant_paths(folders, folder_id);
                Ok(folders[pos].clone())
            }))
            .await?;

        info!(
            folder_id = %folder_id,
            new_parent = ?new_parent_id,
            "Folder moved"
        );

        Ok(folder)
    }

    /// Deletes a folder together with every folder beneath it.
    ///
    /// Returns the ids removed. Files are not touched here.
    ///
    /// # Errors
    ///
    /// `NotFound` when `folder_id` does not exist.
    pub async fn delete(&self, folder_id: FolderId) -> Result<Vec<FolderId>, AppError> {
        self.latency.simulate(Operation::FolderDelete).await;

        let removed = self
            .folder_repo
            .modify_all(Box::new(move |folders: &mut Vec<Folder>| -> AppResult<Vec<FolderId>> {
                position_of(folders, folder_id)?;
                let mut doomed: HashSet<FolderId> =
                    descendants_of(folders, folder_id).into_iter().collect();
                doomed.insert(folder_id);

                let removed = folders
                    .iter()
                    .filter(|f| doomed.contains(&f.id))
                    .map(|f| f.id)
                    .collect();
                folders.retain(|f| !doomed.contains(&f.id));
                Ok(removed)
            }))
            .await?;

        info!(
            folder_id = %folder_id,
            removed = removed.len(),
            "Folder deleted"
        );

        Ok(removed)
    }

    /// Loads a folder without simulating latency.
    pub(crate) async fn find(&self, folder_id: FolderId) -> Result<Folder, AppError> {
        self.folder_repo
            .find_by_id(&folder_id)
            .await
            .ok_or_else(|| AppError::not_found("Folder not found"))
    }

    async fn with_child_counts(&self, folders: &mut [Folder]) {
        let all = self.folder_repo.list().await;
        let files = self.file_repo.list().await;
        let mut counted = all;
        refresh_child_counts(&mut counted, &files);
        for folder in folders.iter_mut() {
            if let Some(c) = counted.iter().find(|c| c.id == folder.id) {
                folder.child_count = c.child_count;
            }
        }
    }
}

fn position_of(folders: &[Folder], folder_id: FolderId) -> AppResult<usize> {
    folders
        .iter()
        .position(|f| f.id == folder_id)
        .ok_or_else(|| AppError::not_found("Folder not found"))
}

/// Path of a folder named `name` placed under `parent_id`. A parent that
/// no longer exists puts the folder at the root.
fn path_under(folders: &[Folder], parent_id: Option<FolderId>, name: &str) -> String {
    parent_id
        .and_then(|id| folders.iter().find(|f| f.id == id))
        .map(|parent| parent.child_path(name))
        .unwrap_or_else(|| name.to_string())
}

/// Rewrites the path of every descendant of `root` from its current path.
fn rewrite_descendant_paths(folders: &mut [Folder], root: FolderId) {
    let mut visited = HashSet::from([root]);
    let mut queue = VecDeque::from([root]);

    while let Some(parent_id) = queue.pop_front() {
        let Some(parent_path) = folders
            .iter()
            .find(|f| f.id == parent_id)
            .map(|f| f.path.clone())
        else {
            continue;
        };
        for child in folders.iter_mut().filter(|f| f.parent_id == Some(parent_id)) {
            if visited.insert(child.id) {
                child.path = format!("{parent_path}/{}", child.name);
                queue.push_back(child.id);
            }
        }
    }
}
