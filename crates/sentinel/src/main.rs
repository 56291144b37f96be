//! Gaze Sentinel - Main Entry Point
//!
//! Reads keypoint frames from a recording (or stdin), writes one JSON
//! analysis per frame to stdout and logs warnings to stderr.

use alerting::{LogSink, WarningDispatcher};
use anyhow::Context;
use clap::Parser;
use sentinel::{init_logging, run_replay, Cli, SentinelConfig};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = SentinelConfig::load(cli.config.as_deref()).context("loading configuration")?;
    init_logging(&config.log_level)?;

    info!("=== Gaze Sentinel v{} ===", env!("CARGO_PKG_VERSION"));

    let mut dispatcher = WarningDispatcher::new().with_sink(LogSink);
    let stdout = io::stdout();

    let summary = match cli.input_path() {
        Some(path) => {
            info!("Replaying frames from {}", path.display());
            let file = File::open(path)
                .with_context(|| format!("opening {}", path.display()))?;
            run_replay(BufReader::new(file), stdout.lock(), &config, &mut dispatcher)?
        }
        None => {
            info!("Replaying frames from stdin");
            run_replay(io::stdin().lock(), stdout.lock(), &config, &mut dispatcher)?
        }
    };

    if let Some(path) = &cli.summary {
        let file = File::create(path)
            .with_context(|| format!("creating {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &summary)
            .with_context(|| format!("writing summary to {}", path.display()))?;
        writer.flush()?;
        info!("Summary written to {}", path.display());
    }

    info!(
        frames = summary.frames,
        skipped = summary.skipped_frames,
        "Done"
    );
    Ok(())
}
