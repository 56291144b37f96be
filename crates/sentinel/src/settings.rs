//! Layered runtime configuration

use attention::AttentionConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use crate::SentinelError;

/// Config file read when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "gaze-sentinel.toml";

/// Environment variable naming an alternative config file
pub const CONFIG_PATH_ENV: &str = "GAZE_SENTINEL_CONFIG";

/// Prefix for per-key environment overrides, e.g.
/// `GAZE_ATTENTION__ALARM__GLANCE_FRAMES=40`
pub const ENV_PREFIX: &str = "GAZE";

/// Sentinel configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SentinelConfig {
    /// Classifier thresholds and alarm frame counts
    pub attention: AttentionConfig,

    /// Maximum log level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Also write analysis lines for frames that were skipped
    pub emit_skipped: bool,
}

impl Default for SentinelConfig {
    fn default() -> Self {
        Self {
            attention: AttentionConfig::default(),
            log_level: "info".to_string(),
            emit_skipped: true,
        }
    }
}

impl SentinelConfig {
    /// Load defaults, then the config file, then environment overrides
    ///
    /// An explicit `path` must exist. Otherwise the file named by
    /// `GAZE_SENTINEL_CONFIG` or `gaze-sentinel.toml` is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self, SentinelError> {
        let file = match path {
            Some(p) => config::File::from(p).required(true),
            None => {
                let name = std::env::var(CONFIG_PATH_ENV)
                    .unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
                config::File::with_name(&name).required(false)
            }
        };

        let settings = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let loaded: SentinelConfig = settings.try_deserialize()?;
        loaded.attention.validate()?;
        Ok(loaded)
    }
}
