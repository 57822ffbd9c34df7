//! Named service operations and their simulated network delay.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Every latency-bearing call a CloudVault service exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    FileGetAll,
    FileGetById,
    FileGetByFolder,
    FileUpload,
    FileCreate,
    FileUpdate,
    FileDelete,
    FileGetDeleted,
    FileRestore,
    FilePermanentDelete,
    FileMove,
    FileToggleStar,
    FolderGetAll,
    FolderGetById,
    FolderGetByParent,
    FolderCreate,
    FolderUpdate,
    FolderMove,
    FolderDelete,
    FolderBreadcrumbs,
    FolderTree,
    ShareGetAll,
    ShareGetById,
    ShareGetByFile,
    ShareCreate,
    ShareUpdate,
    ShareDelete,
    ShareIncrementAccess,
    ShareGetExpired,
}

impl Operation {
    /// The delay a real round-trip for this call is emulated with.
    pub fn default_delay(self) -> Duration {
        let ms = match self {
            Self::FileGetAll => 300,
            Self::FileGetById => 200,
            Self::FileGetByFolder => 250,
            Self::FileUpload => 1000,
            Self::FileCreate => 400,
            Self::FileUpdate => 300,
            Self::FileDelete => 250,
            Self::FileGetDeleted => 300,
            Self::FileRestore => 250,
            Self::FilePermanentDelete => 250,
            Self::FileMove => 300,
            Self::FileToggleStar => 200,
            Self::FolderGetAll => 250,
            Self::FolderGetById => 200,
            Self::FolderGetByParent => 200,
            Self::FolderCreate => 300,
            Self::FolderUpdate => 250,
            Self::FolderMove => 250,
            Self::FolderDelete => 300,
            Self::FolderBreadcrumbs => 100,
            Self::FolderTree => 200,
            Self::ShareGetAll => 250,
            Self::ShareGetById => 200,
            Self::ShareGetByFile => 200,
            Self::ShareCreate => 300,
            Self::ShareUpdate => 250,
            Self::ShareDelete => 200,
            Self::ShareIncrementAccess => 100,
            Self::ShareGetExpired => 200,
        };
        Duration::from_millis(ms)
    }

    /// Stable snake_case name, used as the key for per-operation overrides.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FileGetAll => "file_get_all",
            Self::FileGetById => "file_get_by_id",
            Self::FileGetByFolder => "file_get_by_folder",
            Self::FileUpload => "file_upload",
            Self::FileCreate => "file_create",
            Self::FileUpdate => "file_update",
            Self::FileDelete => "file_delete",
            Self::FileGetDeleted => "file_get_deleted",
            Self::FileRestore => "file_restore",
            Self::FilePermanentDelete => "file_permanent_delete",
            Self::FileMove => "file_move",
            Self::FileToggleStar => "file_toggle_star",
            Self::FolderGetAll => "folder_get_all",
            Self::FolderGetById => "folder_get_by_id",
            Self::FolderGetByParent => "folder_get_by_parent",
            Self::FolderCreate => "folder_create",
            Self::FolderUpdate => "folder_update",
            Self::FolderMove => "folder_move",
            Self::FolderDelete => "folder_delete",
            Self::FolderBreadcrumbs => "folder_breadcrumbs",
            Self::FolderTree => "folder_tree",
            Self::ShareGetAll => "share_get_all",
            Self::ShareGetById => "share_get_by_id",
            Self::ShareGetByFile => "share_get_by_file",
            Self::ShareCreate => "share_create",
            Self::ShareUpdate => "share_update",
            Self::ShareDelete => "share_delete",
            Self::ShareIncrementAccess => "share_increment_access",
            Self::ShareGetExpired => "share_get_expired",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
