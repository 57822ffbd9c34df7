//! Share link configuration.

use serde::{Deserialize, Serialize};

/// How share links are composed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareConfig {
    /// Fixed prefix every share URL starts with.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Number of base-36 characters in a share token.
    #[serde(default = "default_token_length")]
    pub token_length: usize,
    /// Expiry applied when a file is shared without an explicit one.
    #[serde(default = "default_expiry_days")]
    pub default_expiry_days: i64,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token_length: default_token_length(),
            default_expiry_days: default_expiry_days(),
        }
    }
}

fn default_base_url() -> String {
    "https://cloudvault.app/s/".to_string()
}

fn default_token_length() -> usize {
    13
}

fn default_expiry_days() -> i64 {
    7
}
