//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from an
//! optional TOML file plus `CLOUDVAULT__*` environment variables. Every field
//! has a default, so an empty source yields a working configuration.

pub mod latency;
pub mod logging;
pub mod share;
pub mod vault;

use serde::{Deserialize, Serialize};

use self::latency::LatencyConfig;
use self::logging::LoggingConfig;
use self::share::ShareConfig;
use self::vault::VaultConfig;

use crate::error::AppError;

const MAX_LATENCY_SCALE: f64 = 1000.0;
const MAX_EXPIRY_DAYS: i64 = 36_500;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Fixture and view settings.
    #[serde(default)]
    pub vault: VaultConfig,
    /// Simulated network latency.
    #[serde(default)]
    pub latency: LatencyConfig,
    /// Share link issuing.
    #[serde(default)]
    pub share: ShareConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file and the environment.
    ///
    /// The file is optional. Environment variables prefixed with
    /// `CLOUDVAULT__` override file values, e.g.
    /// `CLOUDVAULT__LATENCY__ENABLED=false`.
    pub fn load(path: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("CLOUDVAULT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the services cannot turn into delays or dates.
    pub fn validate(&self) -> Result<(), AppError> {
        let scale = self.latency.scale;
        if !scale.is_finite() || !(0.0..=MAX_LATENCY_SCALE).contains(&scale) {
            return Err(AppError::configuration(format!(
                "latency.scale must be between 0 and {MAX_LATENCY_SCALE}, got {scale}"
            )));
        }
        let days = self.share.default_expiry_days;
        if !(0..=MAX_EXPIRY_DAYS).contains(&days) {
            return Err(AppError::configuration(format!(
                "share.default_expiry_days must be between 0 and {MAX_EXPIRY_DAYS}, got {days}"
            )));
        }
        Ok(())
    }
}
