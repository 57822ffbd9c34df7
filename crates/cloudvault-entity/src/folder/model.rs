//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cloudvault_core::traits::Record;
use cloudvault_core::types::FolderId;

/// A folder in the drive hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: FolderId,
    /// Folder name.
    pub name: String,
    /// Parent folder ID (`None` for root folders).
    #[serde(default)]
    pub parent_id: Option<FolderId>,
    /// Ancestor names from the root down to this folder, joined by `/`.
    pub path: String,
    /// When the folder was created.
    pub created_date: DateTime<Utc>,
    /// Direct sub-folders plus files outside the trash. Refreshed on read.
    #[serde(default)]
    pub child_count: u64,
}

impl Folder {
    /// Check if this is a root folder (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Case-insensitive substring match on the name.
    pub fn matches_query(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase())
    }

    /// The path a direct child called `name` would have.
    pub fn child_path(&self, name: &str) -> String {
        format!("{}/{}", self.path, name)
    }
}

impl Record for Folder {
    type Id = FolderId;

    fn id(&self) -> FolderId {
        self.id
    }
}

/// Data required to create a new folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolder {
    /// Folder name.
    pub name: String,
    /// Parent folder (`None` for root).
    pub parent_id: Option<FolderId>,
}

impl CreateFolder {
    /// Describe a new folder.
    pub fn new(name: impl Into<String>, parent_id: Option<FolderId>) -> Self {
        Self {
            name: name.into(),
            parent_id,
        }
    }
}

/// The fields of a folder a caller may change. Re-parenting goes through
/// the dedicated move operation so paths stay consistent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateFolder {
    /// New folder name.
    pub name: Option<String>,
}

impl UpdateFolder {
    /// An update that renames the folder.
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}
