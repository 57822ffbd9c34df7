//! Core file CRUD and trash lifecycle.

use std::sync::Arc;

use tracing::info;

use cloudvault_core::error::AppError;
use cloudvault_core::traits::{Clock, Latency, Repository};
use cloudvault_core::types::{FileId, FolderId, Operation};
use cloudvault_entity::file::{CreateFile, File, UpdateFile};
use cloudvault_store::MemoryStore;

/// Handles file records: listing, updates, soft delete, restore, purge.
#[derive(Debug, Clone)]
pub struct FileService {
    /// File store.
    file_repo: Arc<MemoryStore<File>>,
    /// Simulated network delay.
    latency: Arc<dyn Latency>,
    /// Time source for timestamps.
    clock: Arc<dyn Clock>,
}

impl FileService {
    /// Creates a new file service.
    pub fn new(
        file_repo: Arc<MemoryStore<File>>,
        latency: Arc<dyn Latency>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            file_repo,
            latency,
            clock,
        }
    }

    /// Lists every file, trashed ones included, in insertion order.
    pub async fn get_all(&self) -> Result<Vec<File>, AppError> {
        self.latency.simulate(Operation::FileGetAll).await;
        Ok(self.file_repo.list().await)
    }

    /// Gets a single file.
    pub async fn get_by_id(&self, file_id: FileId) -> Result<File, AppError> {
        self.latency.simulate(Operation::FileGetById).await;
        self.find(file_id).await
    }

    /// Lists the files outside the trash placed in `folder_id` (`None` for root).
    pub async fn get_by_folder(&self, folder_id: Option<FolderId>) -> Result<Vec<File>, AppError> {
        self.latency.simulate(Operation::FileGetByFolder).await;
        Ok(self
            .file_repo
            .find_where(&|f: &File| f.folder_id == folder_id && f.is_active())
            .await)
    }

    /// Creates a file record from explicit data.
    pub async fn create(&self, data: CreateFile) -> Result<File, AppError> {
        self.latency.simulate(Operation::FileCreate).await;
        validate_name(&data.name)?;

        let file = File::new(FileId::new(), data, self.clock.now());
        let file = self.file_repo.insert(file).await?;

        info!(file_id = %file.id, name = %file.name, "File created");

        Ok(file)
    }

    /// Merges `update` into the file and stamps `modified_date`.
    pub async fn update(&self, file_id: FileId, update: UpdateFile) -> Result<File, AppError> {
        self.latency.simulate(Operation::FileUpdate).await;
        self.apply_update(file_id, update).await
    }

    /// Moves a file to the trash.
    pub async fn delete(&self, file_id: FileId) -> Result<File, AppError> {
        self.latency.simulate(Operation::FileDelete).await;
        let now = self.clock.now();

        let file = self
            .file_repo
            .modify(&file_id, Box::new(move |f: &mut File| f.mark_deleted(now)))
            .await
            .ok_or_else(|| AppError::not_found("File not found"))?;

        info!(file_id = %file_id, name = %file.name, "File moved to trash");

        Ok(file)
    }

    /// Lists the files in the trash.
    pub async fn get_deleted(&self) -> Result<Vec<File>, AppError> {
        self.latency.simulate(Operation::FileGetDeleted).await;
        Ok(self.file_repo.find_where(&|f: &File| f.is_deleted).await)
    }

    /// Takes a file back out of the trash.
    pub async fn restore(&self, file_id: FileId) -> Result<File, AppError> {
        self.latency.simulate(Operation::FileRestore).await;

        let file = self
            .file_repo
            .modify(&file_id, Box::new(|f: &mut File| f.mark_restored()))
            .await
            .ok_or_else(|| AppError::not_found("File not found"))?;

        info!(file_id = %file_id, name = %file.name, "File restored");

        Ok(file)
    }

    /// Removes a file for good. Returns whether a record was removed;
    /// purging an absent file is not an error.
    pub async fn permanent_delete(&self, file_id: FileId) -> Result<bool, AppError> {
        self.latency.simulate(Operation::FilePermanentDelete).await;

        let removed = self.file_repo.remove(&file_id).await;
        if let Some(file) = &removed {
            info!(file_id = %file_id, name = %file.name, "File permanently deleted");
        }

        Ok(removed.is_some())
    }

    /// Moves a file to another folder (`None` for root).
    pub async fn move_to_folder(
        &self,
        file_id: FileId,
        folder_id: Option<FolderId>,
    ) -> Result<File, AppError> {
        self.latency.simulate(Operation::FileMove).await;
        let file = self
            .apply_update(file_id, UpdateFile::move_to(folder_id))
            .await?;

        info!(
            file_id = %file_id,
            to_folder = ?folder_id,
            "File moved"
        );

        Ok(file)
    }

    /// Flips the starred flag.
    pub async fn toggle_star(&self, file_id: FileId) -> Result<File, AppError> {
        self.latency.simulate(Operation::FileToggleStar).await;
        let now = self.clock.now();

        self.file_repo
            .modify(
                &file_id,
                Box::new(move |f: &mut File| {
                    let starred = !f.is_starred;
                    f.apply(UpdateFile::starred(starred), now);
                }),
            )
            .await
            .ok_or_else(|| AppError::not_found("File not found"))
    }

    /// Loads a file without simulating latency.
    pub(crate) async fn find(&self, file_id: FileId) -> Result<File, AppError> {
        self.file_repo
            .find_by_id(&file_id)
            .await
            .ok_or_else(|| AppError::not_found("File not found"))
    }

    /// Update path shared by the public mutators.
    async fn apply_update(&self, file_id: FileId, update: UpdateFile) -> Result<File, AppError> {
        if let Some(name) = &update.name {
            validate_name(name)?;
        }
        let now = self.clock.now();

        self.file_repo
            .modify(&file_id, Box::new(move |f: &mut File| f.apply(update, now)))
            .await
            .ok_or_else(|| AppError::not_found("File not found"))
    }
}

pub(crate) fn validate_name(name: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::validation("File name cannot be empty"));
    }
    Ok(())
}
