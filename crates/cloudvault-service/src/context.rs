//! The vault: stores, services, and the operations spanning several stores.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use cloudvault_core::config::AppConfig;
use cloudvault_core::error::AppError;
use cloudvault_core::result::AppResult;
use cloudvault_core::traits::{Clock, Latency, Repository};
use cloudvault_core::types::{FileId, FolderId};
use cloudvault_entity::file::File;
use cloudvault_entity::folder::Folder;
use cloudvault_entity::share::{CreateShareLink, ShareLink, SharedFile};
use cloudvault_store::{Fixtures, MemoryStore, SimulatedLatency, SystemClock};

use crate::batch::BatchOutcome;
use crate::file::{FileService, SearchService, UploadService};
use crate::folder::{FolderService, TreeService};
use crate::share::{LinkService, ShareService};

/// What a browser shows for one folder (or the root).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderView {
    /// The folder being shown; `None` at the root.
    pub current: Option<Folder>,
    /// Trail from the root down to `current`.
    pub breadcrumbs: Vec<Folder>,
    /// Direct sub-folders.
    pub folders: Vec<Folder>,
    /// Files placed here, trash excluded.
    pub files: Vec<File>,
}

/// One CloudVault instance.
///
/// Owns the three record stores plus the shared latency and clock, and
/// hands out the services built on them. Cloning is cheap and every clone
/// sees the same stores.
#[derive(Debug, Clone)]
pub struct Vault {
    // ── Configuration ────────────────────────────────────────
    config: Arc<AppConfig>,
    clock: Arc<dyn Clock>,

    // ── Stores ───────────────────────────────────────────────
    file_repo: Arc<MemoryStore<File>>,
    folder_repo: Arc<MemoryStore<Folder>>,
    share_repo: Arc<MemoryStore<ShareLink>>,

    // ── Services ─────────────────────────────────────────────
    files: Arc<FileService>,
    uploads: Arc<UploadService>,
    search: Arc<SearchService>,
    folders: Arc<FolderService>,
    tree: Arc<TreeService>,
    shares: Arc<ShareService>,
}

/// Assembles a [`Vault`]. Anything left unset falls back to the embedded
/// fixtures, simulated latency from the config, and the system clock.
#[derive(Debug, Default)]
pub struct VaultBuilder {
    config: AppConfig,
    fixtures: Option<Fixtures>,
    latency: Option<Arc<dyn Latency>>,
    clock: Option<Arc<dyn Clock>>,
}

impl VaultBuilder {
    /// Use `config`.
    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Seed the stores from `fixtures`.
    pub fn fixtures(mut self, fixtures: Fixtures) -> Self {
        self.fixtures = Some(fixtures);
        self
    }

    /// Use `latency` for every service call.
    pub fn latency(mut self, latency: Arc<dyn Latency>) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Use `clock` for timestamps and expiry checks.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Build the vault.
    pub fn build(self) -> AppResult<Vault> {
        let fixtures = match self.fixtures {
            Some(fixtures) => fixtures,
            None => Fixtures::embedded()?,
        };
        let latency: Arc<dyn Latency> = match self.latency {
            Some(latency) => latency,
            None => Arc::new(SimulatedLatency::new(self.config.latency.clone())),
        };
        let clock: Arc<dyn Clock> = match self.clock {
            Some(clock) => clock,
            None => Arc::new(SystemClock),
        };
        let config = Arc::new(self.config);

        // ── Step 1: Seed stores ──────────────────────────────────
        let file_repo = Arc::new(MemoryStore::seeded("files", fixtures.files));
        let folder_repo = Arc::new(MemoryStore::seeded("folders", fixtures.folders));
        let share_repo = Arc::new(MemoryStore::seeded("share_links", fixtures.share_links));

        // ── Step 2: Initialize services ──────────────────────────
        let files = Arc::new(FileService::new(
            Arc::clone(&file_repo),
            Arc::clone(&latency),
            Arc::clone(&clock),
        ));
        let uploads = Arc::new(UploadService::new(
            Arc::clone(&file_repo),
            Arc::clone(&latency),
            Arc::clone(&clock),
        ));
        let search = Arc::new(SearchService::new(
            Arc::clone(&file_repo),
            Arc::clone(&latency),
        ));
        let folders = Arc::new(FolderService::new(
            Arc::clone(&folder_repo),
            Arc::clone(&file_repo),
            Arc::clone(&latency),
            Arc::clone(&clock),
        ));
        let tree = Arc::new(TreeService::new(
            Arc::clone(&folder_repo),
            Arc::clone(&file_repo),
            Arc::clone(&latency),
        ));
        let link_service = Arc::new(LinkService::from_config(&config.share));
        let shares = Arc::new(ShareService::new(
            Arc::clone(&share_repo),
            link_service,
            Arc::clone(&latency),
            Arc::clone(&clock),
        ));

        Ok(Vault {
            config,
            clock,
            file_repo,
            folder_repo,
            share_repo,
            files,
            uploads,
            search,
            folders,
            tree,
            shares,
        })
    }
}

impl Vault {
    /// Start assembling a vault.
    pub fn builder() -> VaultBuilder {
        VaultBuilder::default()
    }

    /// A vault with the fixtures, latency, and clock `config` describes.
    pub async fn from_config(config: AppConfig) -> AppResult<Self> {
        let fixtures = Fixtures::load(&config.vault).await?;
        Self::builder().config(config).fixtures(fixtures).build()
    }

    /// The active configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The time source shared by all services.
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// File CRUD and trash lifecycle.
    pub fn files(&self) -> &FileService {
        &self.files
    }

    /// Upload simulation.
    pub fn uploads(&self) -> &UploadService {
        &self.uploads
    }

    /// Recent, starred, and name search views.
    pub fn search(&self) -> &SearchService {
        &self.search
    }

    /// Folder CRUD.
    pub fn folders(&self) -> &FolderService {
        &self.folders
    }

    /// Folder tree and breadcrumbs.
    pub fn tree(&self) -> &TreeService {
        &self.tree
    }

    /// Share link issuing.
    pub fn shares(&self) -> &ShareService {
        &self.shares
    }

    /// Drops every change and restores the seed data in all stores.
    pub async fn reset(&self) {
        self.file_repo.reset().await;
        self.folder_repo.reset().await;
        self.share_repo.reset().await;
        info!("Vault reset to seed data");
    }

    /// Issues a share link for a file outside the trash and records its URL
    /// on the file. Without an explicit expiry the configured default applies.
    pub async fn share_file(
        &self,
        file_id: FileId,
        expiry_date: Option<DateTime<Utc>>,
    ) -> AppResult<ShareLink> {
        let file = self.files.find(file_id).await?;
        if !file.is_active() {
            return Err(AppError::not_found("File not found"));
        }

        let expiry_date = match expiry_date {
            Some(expiry_date) => expiry_date,
            None => self.default_expiry()?,
        };
        let link = self
            .shares
            .create(CreateShareLink {
                file_id,
                expiry_date: Some(expiry_date),
            })
            .await?;

        let url = link.url.clone();
        self.file_repo
            .modify(&file_id, Box::new(move |f: &mut File| f.share_link = Some(url)))
            .await;

        Ok(link)
    }

    fn default_expiry(&self) -> AppResult<DateTime<Utc>> {
        let days = self.config.share.default_expiry_days;
        Duration::try_days(days)
            .and_then(|delta| self.clock.now().checked_add_signed(delta))
            .ok_or_else(|| {
                AppError::configuration(format!("Share expiry of {days} days is out of range"))
            })
    }

    /// Revokes every link of a file and clears its recorded URL.
    pub async fn revoke_sharing(&self, file_id: FileId) -> AppResult<usize> {
        let removed = self.shares.delete(file_id).await?;
        self.file_repo
            .modify(&file_id, Box::new(|f: &mut File| f.share_link = None))
            .await;
        Ok(removed)
    }

    /// Every share link joined with its file. Links whose file is gone are
    /// skipped.
    pub async fn shared_files(&self) -> AppResult<Vec<SharedFile>> {
        let links = self.shares.get_all().await?;

        let mut shared = Vec::with_capacity(links.len());
        for link in links {
            match self.file_repo.find_by_id(&link.file_id).await {
                Some(file) => shared.push(SharedFile { file, link }),
                None => {
                    warn!(link_id = %link.id, file_id = %link.file_id, "Share link points to a missing file");
                }
            }
        }

        Ok(shared)
    }

    /// Deletes a folder and its descendants, moving the files they held to
    /// the trash. Returns the removed folder ids.
    pub async fn delete_folder(&self, folder_id: FolderId) -> AppResult<Vec<FolderId>> {
        let removed = self.folders.delete(folder_id).await?;
        let gone: HashSet<FolderId> = removed.iter().copied().collect();

        let now = self.clock.now();
        let trashed = self
            .file_repo
            .modify_all(Box::new(move |files: &mut Vec<File>| -> AppResult<usize> {
                let mut trashed = 0;
                for file in files.iter_mut() {
                    if file.is_active() && file.folder_id.is_some_and(|id| gone.contains(&id)) {
                        file.mark_deleted(now);
                        trashed += 1;
                    }
                }
                Ok(trashed)
            }))
            .await?;

        if trashed > 0 {
            info!(
                folder_id = %folder_id,
                trashed,
                "Files of deleted folders moved to trash"
            );
        }

        Ok(removed)
    }

    /// Takes a file out of the trash. A file whose folder no longer exists
    /// lands at the root.
    pub async fn restore_file(&self, file_id: FileId) -> AppResult<File> {
        let file = self.files.restore(file_id).await?;

        let Some(folder_id) = file.folder_id else {
            return Ok(file);
        };
        if self.folder_repo.find_by_id(&folder_id).await.is_some() {
            return Ok(file);
        }

        warn!(file_id = %file_id, folder_id = %folder_id, "Folder gone, restoring file to root");
        self.file_repo
            .modify(&file_id, Box::new(|f: &mut File| f.folder_id = None))
            .await
            .ok_or_else(|| AppError::not_found("File not found"))
    }

    /// Removes a file for good together with its share links.
    pub async fn purge_file(&self, file_id: FileId) -> AppResult<bool> {
        let removed = self.files.permanent_delete(file_id).await?;
        self.shares.delete(file_id).await?;
        Ok(removed)
    }

    /// Restores files one after another, stopping at the first failure.
    pub async fn restore_many(&self, file_ids: &[FileId]) -> BatchOutcome<File> {
        let mut outcome = BatchOutcome::new();
        for (index, file_id) in file_ids.iter().enumerate() {
            match self.restore_file(*file_id).await {
                Ok(file) => outcome.push(file),
                Err(error) => {
                    warn!(index, error = %error, "Bulk restore stopped");
                    outcome.stop(index, file_ids.len(), error);
                    break;
                }
            }
        }
        outcome
    }

    /// Purges every file in the trash, stopping at the first failure.
    pub async fn empty_trash(&self) -> AppResult<BatchOutcome<FileId>> {
        let trashed = self.files.get_deleted().await?;
        let total = trashed.len();

        let mut outcome = BatchOutcome::new();
        for (index, file) in trashed.into_iter().enumerate() {
            match self.purge_file(file.id).await {
                Ok(_) => outcome.push(file.id),
                Err(error) => {
                    warn!(index, error = %error, "Emptying trash stopped");
                    outcome.stop(index, total, error);
                    break;
                }
            }
        }

        info!(purged = outcome.completed.len(), "Trash emptied");

        Ok(outcome)
    }

    /// Everything needed to show `folder_id` (`None` for the root).
    pub async fn folder_view(&self, folder_id: Option<FolderId>) -> AppResult<FolderView> {
        let current = match folder_id {
            Some(id) => Some(self.folders.get_by_id(id).await?),
            None => None,
        };
        let breadcrumbs = self.tree.get_breadcrumbs(folder_id).await?;
        let folders = self.folders.get_by_parent(folder_id).await?;
        let files = self.files.get_by_folder(folder_id).await?;

        Ok(FolderView {
            current,
            breadcrumbs,
            folders,
            files,
        })
    }
}
