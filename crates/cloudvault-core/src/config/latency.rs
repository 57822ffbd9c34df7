//! Simulated latency configuration.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::Operation;

/// Controls the artificial delay every service call awaits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatencyConfig {
    /// Whether delays are applied at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Multiplier applied to every delay (0.5 halves them).
    #[serde(default = "default_scale")]
    pub scale: f64,
    /// Per-operation delays in milliseconds, keyed by operation name
    /// (`file_upload`, `folder_breadcrumbs`, ...).
    #[serde(default)]
    pub overrides_ms: HashMap<String, u64>,
}

impl LatencyConfig {
    /// The effective delay for `operation`.
    pub fn delay_for(&self, operation: Operation) -> Duration {
        if !self.enabled {
            return Duration::ZERO;
        }
        let base = self
            .overrides_ms
            .get(operation.as_str())
            .map(|ms| Duration::from_millis(*ms))
            .unwrap_or_else(|| operation.default_delay());
        Duration::try_from_secs_f64(base.as_secs_f64() * self.scale.max(0.0)).unwrap_or(base)
    }
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            scale: default_scale(),
            overrides_ms: HashMap::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_scale() -> f64 {
    1.0
}
