//! Share link entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cloudvault_core::traits::Record;
use cloudvault_core::types::{FileId, ShareLinkId};

use crate::file::File;

/// A capability URL granting read access to one file.
///
/// There is no stored state: whether a link is active or expired is derived
/// from `expiry_date` at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareLink {
    /// Unique share link identifier.
    pub id: ShareLinkId,
    /// The shared file.
    pub file_id: FileId,
    /// The public URL (fixed prefix plus opaque token).
    pub url: String,
    /// When the link was issued.
    pub created_date: DateTime<Utc>,
    /// When the link stops working (`None` = never).
    #[serde(default)]
    pub expiry_date: Option<DateTime<Utc>>,
    /// How many times the link was opened.
    #[serde(default)]
    pub access_count: u64,
}

impl ShareLink {
    /// Whether the link expired strictly before `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiry_date.is_some_and(|expiry| expiry < now)
    }

    /// The opaque token at the end of the URL.
    pub fn token(&self) -> &str {
        self.url.rsplit('/').next().unwrap_or(&self.url)
    }
}

impl Record for ShareLink {
    type Id = ShareLinkId;

    fn id(&self) -> ShareLinkId {
        self.id
    }
}

/// Data required to issue a share link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateShareLink {
    /// The file to share.
    pub file_id: FileId,
    /// Expiry time (`None` = never).
    pub expiry_date: Option<DateTime<Utc>>,
}

/// The fields of a share link a caller may change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateShareLink {
    /// New expiry (`Some(None)` removes it).
    pub expiry_date: Option<Option<DateTime<Utc>>>,
}

/// A file joined with the link it is shared through.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedFile {
    /// The shared file.
    pub file: File,
    /// The link sharing it.
    pub link: ShareLink,
}
