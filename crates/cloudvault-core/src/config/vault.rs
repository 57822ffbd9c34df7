//! Fixture and view configuration.

use serde::{Deserialize, Serialize};

/// Where the stores are seeded from and how views are sized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultConfig {
    /// Directory holding `files.json`, `folders.json`, and `share_links.json`.
    /// The embedded fixtures are used when unset.
    #[serde(default)]
    pub fixtures_dir: Option<String>,
    /// Maximum number of entries in the recent-files view.
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            fixtures_dir: None,
            recent_limit: default_recent_limit(),
        }
    }
}

fn default_recent_limit() -> usize {
    50
}
