//! Command-line definition

use clap::Parser;
use std::path::{Path, PathBuf};

/// Gaze Sentinel - replay face-mesh keypoint recordings and report
/// looking-away warnings
#[derive(Debug, Parser)]
#[command(name = "gaze-sentinel")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (TOML); defaults to gaze-sentinel.toml when present
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write the replay summary (totals and final counters) as JSON
    #[arg(short, long)]
    pub summary: Option<PathBuf>,

    /// JSON Lines recording; stdin when absent or `-`
    pub input: Option<PathBuf>,
}

impl Cli {
    /// Input file, or `None` for stdin
    pub fn input_path(&self) -> Option<&Path> {
        self.input
            .as_deref()
            .filter(|p| p.as_os_str() != "-")
    }
}
