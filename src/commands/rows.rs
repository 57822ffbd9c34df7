//! Table rows shared by the listing commands.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tabled::Tabled;

use cloudvault_entity::file::File;
use cloudvault_entity::folder::Folder;
use cloudvault_entity::share::{ShareLink, SharedFile};

use crate::output::format_bytes;

fn short_date(date: DateTime<Utc>) -> String {
    date.format("%Y-%m-%d %H:%M").to_string()
}

/// File display row
#[derive(Debug, Serialize, Tabled)]
pub struct FileRow {
    /// File ID
    id: String,
    /// Name
    name: String,
    /// MIME category
    #[tabled(rename = "type")]
    kind: String,
    /// Size
    size: String,
    /// Last modified
    modified: String,
    /// Star / share markers
    flags: String,
}

impl From<&File> for FileRow {
    fn from(file: &File) -> Self {
        let mut flags = Vec::new();
        if file.is_starred {
            flags.push("starred");
        }
        if file.share_link.is_some() {
            flags.push("shared");
        }
        Self {
            id: file.id.to_string(),
            name: file.name.clone(),
            kind: file.kind.as_str().to_string(),
            size: format_bytes(file.size),
            modified: short_date(file.modified_date),
            flags: flags.join(","),
        }
    }
}

/// Folder display row
#[derive(Debug, Serialize, Tabled)]
pub struct FolderRow {
    /// Folder ID
    id: String,
    /// Name
    name: String,
    /// Full path
    path: String,
    /// Direct children
    items: u64,
    /// Created
    created: String,
}

impl From<&Folder> for FolderRow {
    fn from(folder: &Folder) -> Self {
        Self {
            id: folder.id.to_string(),
            name: folder.name.clone(),
            path: folder.path.clone(),
            items: folder.child_count,
            created: short_date(folder.created_date),
        }
    }
}

/// Trashed file display row
#[derive(Debug, Serialize, Tabled)]
pub struct TrashRow {
    /// File ID
    id: String,
    /// Name
    name: String,
    /// Size
    size: String,
    /// Moved to trash
    deleted: String,
}

impl From<&File> for TrashRow {
    fn from(file: &File) -> Self {
        Self {
            id: file.id.to_string(),
            name: file.name.clone(),
            size: format_bytes(file.size),
            deleted: file
                .deleted_date
                .map(short_date)
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// Share link display row
#[derive(Debug, Serialize, Tabled)]
pub struct ShareRow {
    /// File name (or file ID when the file is gone)
    file: String,
    /// Public URL
    url: String,
    /// Issued
    shared: String,
    /// Expiry
    expires: String,
    /// Times opened
    accesses: u64,
    /// active / expired
    status: String,
}

impl ShareRow {
    /// Build a row for `link`, labelled with `file`.
    pub fn new(file: String, link: &ShareLink, now: DateTime<Utc>) -> Self {
        Self {
            file,
            url: link.url.clone(),
            shared: short_date(link.created_date),
            expires: link
                .expiry_date
                .map(short_date)
                .unwrap_or_else(|| "never".to_string()),
            accesses: link.access_count,
            status: if link.is_expired(now) {
                "expired".to_string()
            } else {
                "active".to_string()
            },
        }
    }

    /// Build a row from a shared-file join.
    pub fn from_shared(shared: &SharedFile, now: DateTime<Utc>) -> Self {
        Self::new(shared.file.name.clone(), &shared.link, now)
    }
}
