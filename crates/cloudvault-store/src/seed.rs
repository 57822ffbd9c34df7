//! Fixture data the stores are seeded from.

use std::collections::HashSet;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use cloudvault_core::config::vault::VaultConfig;
use cloudvault_core::error::{AppError, ErrorKind};
use cloudvault_core::result::AppResult;
use cloudvault_core::types::{FileId, FolderId};
use cloudvault_entity::file::File;
use cloudvault_entity::folder::Folder;
use cloudvault_entity::share::ShareLink;

const FILES_JSON: &str = include_str!("../fixtures/files.json");
const FOLDERS_JSON: &str = include_str!("../fixtures/folders.json");
const SHARE_LINKS_JSON: &str = include_str!("../fixtures/share_links.json");

/// Ordered seed records for each store.
#[derive(Debug, Clone, Default)]
pub struct Fixtures {
    /// File records.
    pub files: Vec<File>,
    /// Folder records.
    pub folders: Vec<Folder>,
    /// Share link records.
    pub share_links: Vec<ShareLink>,
}

impl Fixtures {
    /// No records at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The sample drive compiled into the crate.
    pub fn embedded() -> AppResult<Self> {
        Ok(Self {
            files: parse("files.json", FILES_JSON)?,
            folders: parse("folders.json", FOLDERS_JSON)?,
            share_links: parse("share_links.json", SHARE_LINKS_JSON)?,
        })
    }

    /// Read `files.json`, `folders.json`, and `share_links.json` from `dir`.
    /// A missing file yields an empty collection. Inconsistent records are
    /// repaired, see [`Fixtures::normalized`].
    pub async fn from_dir(dir: impl AsRef<Path>) -> AppResult<Self> {
        let dir = dir.as_ref();
        let fixtures = Self {
            files: read_optional(&dir.join("files.json")).await?,
            folders: read_optional(&dir.join("folders.json")).await?,
            share_links: read_optional(&dir.join("share_links.json")).await?,
        };
        Ok(fixtures.normalized())
    }

    /// Repair records that break the store invariants, logging each one.
    ///
    /// - a file's trash flag follows its `deleted_date`; a flagged file
    ///   without a date is stamped with its `modified_date`
    /// - a file in an unknown folder moves to the root
    /// - a folder under an unknown parent becomes a root folder
    ///
    /// Share links to unknown files are kept but reported.
    pub fn normalized(mut self) -> Self {
        let folder_ids: HashSet<FolderId> = self.folders.iter().map(|f| f.id).collect();

        for folder in &mut self.folders {
            if let Some(parent_id) = folder.parent_id
                && !folder_ids.contains(&parent_id)
            {
                warn!(folder_id = %folder.id, %parent_id, "Fixture folder has unknown parent, moving to root");
                folder.parent_id = None;
                folder.path = folder.name.clone();
            }
        }

        for file in &mut self.files {
            if file.is_deleted != file.deleted_date.is_some() {
                warn!(file_id = %file.id, is_deleted = file.is_deleted, "Fixture file trash state is inconsistent");
                if file.is_deleted {
                    file.deleted_date = Some(file.modified_date);
                } else {
                    file.deleted_date = None;
                }
            }
            if let Some(folder_id) = file.folder_id
                && !folder_ids.contains(&folder_id)
            {
                warn!(file_id = %file.id, %folder_id, "Fixture file has unknown folder, moving to root");
                file.folder_id = None;
            }
        }

        let file_ids: HashSet<FileId> = self.files.iter().map(|f| f.id).collect();
        for link in self.share_links.iter().filter(|l| !file_ids.contains(&l.file_id)) {
            warn!(link_id = %link.id, file_id = %link.file_id, "Fixture share link points to unknown file");
        }

        self
    }

    /// Resolve the fixtures named by configuration.
    pub async fn load(config: &VaultConfig) -> AppResult<Self> {
        let fixtures = match &config.fixtures_dir {
            Some(dir) => Self::from_dir(dir).await?,
            None => Self::embedded()?,
        };
        info!(
            files = fixtures.files.len(),
            folders = fixtures.folders.len(),
            share_links = fixtures.share_links.len(),
            "Fixtures loaded"
        );
        Ok(fixtures)
    }
}

fn parse<T: DeserializeOwned>(name: &str, raw: &str) -> AppResult<Vec<T>> {
    serde_json::from_str(raw).map_err(|e| {
        AppError::with_source(
            ErrorKind::Serialization,
            format!("Invalid fixture {name}: {e}"),
            e,
        )
    })
}

async fn read_optional<T: DeserializeOwned>(path: &Path) -> AppResult<Vec<T>> {
    match tokio::fs::read_to_string(path).await {
        Ok(raw) => parse(&path.display().to_string(), &raw),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "Fixture file absent, seeding empty");
            Ok(Vec::new())
        }
        Err(e) => Err(e.into()),
    }
}
