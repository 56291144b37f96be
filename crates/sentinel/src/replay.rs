//! Keypoint frame replay
//!
//! Input is JSON Lines: one frame per line, each frame an array of
//! detections, each detection an array of `[x, y, z]` keypoints.

use alerting::WarningDispatcher;
use attention::{AttentionClassifier, ClassifierState, KeypointSet, WarningKind};
use serde::Serialize;
use std::io::{BufRead, Write};
use tracing::{debug, info};
use crate::settings::SentinelConfig;
use crate::SentinelError;

/// Iterates over the frames of a JSON Lines recording
pub struct FrameReader<R> {
    reader: R,
    line: usize,
    buf: String,
}

impl<R: BufRead> FrameReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buf: String::new(),
        }
    }
}

impl<R: BufRead> Iterator for FrameReader<R> {
    type Item = Result<Vec<KeypointSet>, SentinelError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            self.line += 1;
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e.into())),
            }
            let trimmed = self.buf.trim();
            if trimmed.is_empty() {
                continue;
            }
            return Some(
                serde_json::from_str(trimmed).map_err(|source| SentinelError::Parse {
                    line: self.line,
                    source,
                }),
            );
        }
    }
}

/// Totals for one replay run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReplaySummary {
    pub frames: u64,
    pub skipped_frames: u64,
    pub prolonged_warnings: usize,
    pub repeated_warnings: usize,

    /// Classifier counters after the last frame
    pub final_state: ClassifierState,
}

/// Drive the classifier over every frame in `input`
///
/// Writes one JSON analysis per frame to `output` and hands warnings to the
/// dispatcher as they fire.
pub fn run_replay<R: BufRead, W: Write>(
    input: R,
    mut output: W,
    config: &SentinelConfig,
    dispatcher: &mut WarningDispatcher,
) -> Result<ReplaySummary, SentinelError> {
    let mut classifier = AttentionClassifier::new(config.attention.clone())?;
    let mut summary = ReplaySummary::default();

    for frame in FrameReader::new(input) {
        let detections = frame?;
        let analysis = classifier.process_frame(&detections);

        summary.frames += 1;
        if analysis.is_skipped() {
            summary.skipped_frames += 1;
            if !config.emit_skipped {
                continue;
            }
        }

        if analysis.has_warnings() {
            for warning in &analysis.warnings {
                match warning.kind {
                    WarningKind::ProlongedAway => summary.prolonged_warnings += 1,
                    WarningKind::RepeatedAway => summary.repeated_warnings += 1,
                }
            }
            dispatcher.dispatch(&analysis.warnings);
        }

        serde_json::to_writer(&mut output, &analysis).map_err(SentinelError::Output)?;
        output.write_all(b"\n")?;
    }
    output.flush()?;

    summary.final_state = *classifier.state();

    debug!("Final classifier state: {:?}", summary.final_state);
    info!(
        "Replay finished: {} frames ({} skipped), {} prolonged, {} repeated warnings",
        summary.frames, summary.skipped_frames, summary.prolonged_warnings, summary.repeated_warnings
    );
    Ok(summary)
}
