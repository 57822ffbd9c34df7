//! File entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cloudvault_core::traits::Record;
use cloudvault_core::types::{FileId, FolderId};

use super::kind::FileKind;

/// A file stored in the vault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    /// Unique file identifier.
    pub id: FileId,
    /// The file name (including extension).
    pub name: String,
    /// File size in bytes.
    pub size: u64,
    /// Top-level MIME category.
    #[serde(rename = "type")]
    pub kind: FileKind,
    /// Full MIME type.
    pub mime_type: String,
    /// The folder containing this file (`None` for the root).
    #[serde(default)]
    pub folder_id: Option<FolderId>,
    /// When the file was uploaded.
    pub upload_date: DateTime<Utc>,
    /// When the file was last modified.
    pub modified_date: DateTime<Utc>,
    /// When the file was moved to the trash.
    #[serde(default)]
    pub deleted_date: Option<DateTime<Utc>>,
    /// Whether the file is in the trash.
    #[serde(default)]
    pub is_deleted: bool,
    /// Whether the user starred the file.
    #[serde(default)]
    pub is_starred: bool,
    /// Preview image URL (images only).
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    /// URL the file content can be fetched from.
    pub download_url: String,
    /// The URL of the file's active share link, if shared.
    #[serde(default)]
    pub share_link: Option<String>,
}

impl File {
    /// Build a new record from creation data.
    pub fn new(id: FileId, data: CreateFile, now: DateTime<Utc>) -> Self {
        Self {
            id,
            kind: FileKind::from_mime(&data.mime_type),
            name: data.name,
            size: data.size,
            mime_type: data.mime_type,
            folder_id: data.folder_id,
            upload_date: now,
            modified_date: now,
            deleted_date: None,
            is_deleted: false,
            is_starred: false,
            thumbnail_url: data.thumbnail_url,
            download_url: data.download_url,
            share_link: None,
        }
    }

    /// Whether the file is outside the trash.
    pub fn is_active(&self) -> bool {
        !self.is_deleted
    }

    /// Case-insensitive substring match on the name. An empty query matches.
    pub fn matches_query(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase())
    }

    /// Get the file extension (lowercase), if any.
    pub fn extension(&self) -> Option<String> {
        self.name
            .rsplit('.')
            .next()
            .filter(|ext| *ext != self.name)
            .map(|ext| ext.to_lowercase())
    }

    /// Move the file to the trash.
    pub fn mark_deleted(&mut self, now: DateTime<Utc>) {
        self.is_deleted = true;
        self.deleted_date = Some(now);
    }

    /// Take the file back out of the trash.
    pub fn mark_restored(&mut self) {
        self.is_deleted = false;
        self.deleted_date = None;
    }

    /// Merge the fields present in `update` and stamp `modified_date`.
    pub fn apply(&mut self, update: UpdateFile, now: DateTime<Utc>) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(folder_id) = update.folder_id {
            self.folder_id = folder_id;
        }
        if let Some(is_starred) = update.is_starred {
            self.is_starred = is_starred;
        }
        self.modified_date = now;
    }
}

impl Record for File {
    type Id = FileId;

    fn id(&self) -> FileId {
        self.id
    }
}

/// Data required to create a new file record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFile {
    /// The file name.
    pub name: String,
    /// File size in bytes.
    pub size: u64,
    /// Full MIME type.
    pub mime_type: String,
    /// The folder to place the file in.
    pub folder_id: Option<FolderId>,
    /// Preview image URL.
    pub thumbnail_url: Option<String>,
    /// Content URL.
    pub download_url: String,
}

/// The fields of a file a caller may change. Absent fields are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateFile {
    /// New file name.
    pub name: Option<String>,
    /// New folder (`Some(None)` moves the file to the root).
    pub folder_id: Option<Option<FolderId>>,
    /// New starred flag.
    pub is_starred: Option<bool>,
}

impl UpdateFile {
    /// An update that renames the file.
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// An update that moves the file.
    pub fn move_to(folder_id: Option<FolderId>) -> Self {
        Self {
            folder_id: Some(folder_id),
            ..Self::default()
        }
    }

    /// An update that sets the starred flag.
    pub fn starred(is_starred: bool) -> Self {
        Self {
            is_starred: Some(is_starred),
            ..Self::default()
        }
    }
}

/// A local file handed to the upload simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadBlob {
    /// File name as picked by the user.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// MIME type reported by the picker (may be empty).
    pub mime_type: String,
}

impl UploadBlob {
    /// Describe a blob to upload.
    pub fn new(name: impl Into<String>, size: u64, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            mime_type: mime_type.into(),
        }
    }

    /// Whether the blob is an image and gets a thumbnail.
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}
