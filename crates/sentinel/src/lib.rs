//! Gaze Sentinel
//!
//! Replays recorded face-mesh keypoint frames through the attention
//! classifier and forwards looking-away warnings to notification sinks.

pub mod cli;
pub mod replay;
pub mod settings;

pub use cli::Cli;
pub use replay::{run_replay, FrameReader, ReplaySummary};
pub use settings::SentinelConfig;

use attention::AttentionError;
use std::str::FromStr;
use thiserror::Error;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Sentinel error types
#[derive(Error, Debug)]
pub enum SentinelError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid frame on line {line}: {source}")]
    Parse {
        line: usize,
        source: serde_json::Error,
    },

    #[error("Failed to write analysis: {0}")]
    Output(serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Attention(#[from] AttentionError),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

/// Initialize logging to stderr
///
/// Unknown level names fall back to `info`.
pub fn init_logging(level: &str) -> Result<(), SentinelError> {
    let level = Level::from_str(level).unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| SentinelError::Logging(e.to_string()))
}
