//! Attention Classifier
//!
//! Gaze-direction classification over face-mesh keypoints:
//! - Head pose (pitch, yaw, roll) from fixed landmark pairs
//! - Horizontal and vertical eye gaze from iris landmarks
//! - Away-looking tallies per direction
//! - Prolonged and repeated looking-away warnings

pub mod analysis;
pub mod config;
pub mod direction;
pub mod keypoints;
pub mod rules;
pub mod signals;
pub mod state;

#[cfg(test)]
mod fixtures;

pub use analysis::{AttentionWarning, FaceOutcome, FrameAnalysis, WarningKind};
pub use config::{AlarmConfig, AttentionConfig, Thresholds};
pub use direction::{Direction, Tally};
pub use keypoints::{Keypoint, KeypointSet};
pub use rules::Classification;
pub use signals::{FaceAngles, FrameSignals, IrisMeasurement};
pub use state::ClassifierState;

use thiserror::Error;
use tracing::{debug, info, warn};

/// Attention classifier error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AttentionError {
    #[error("Keypoints missing: need {required}, got {actual}")]
    KeypointsMissing { required: usize, actual: usize },

    #[error("Eye centres sum to zero")]
    DegenerateEyeCentre,

    #[error("Non-finite signal: {0}")]
    NonFiniteSignal(&'static str),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Owns classifier state and configuration across frames
#[derive(Debug, Clone)]
pub struct AttentionClassifier {
    config: AttentionConfig,
    state: ClassifierState,
    frames: u64,
}

impl AttentionClassifier {
    /// Create a classifier with a validated configuration
    pub fn new(config: AttentionConfig) -> Result<Self, AttentionError> {
        config.validate()?;
        info!(
            "Attention classifier ready (glance > {} frames, prolonged > {} frames, max_faces {})",
            config.alarm.glance_frames, config.alarm.prolonged_frames, config.max_faces
        );
        Ok(Self {
            config,
            state: ClassifierState::default(),
            frames: 0,
        })
    }

    /// Process one frame's detections
    ///
    /// Each detection (up to `max_faces`) runs its own classification and
    /// warning pass. Detections without usable signals leave the state as is.
    pub fn process_frame(&mut self, detections: &[KeypointSet]) -> FrameAnalysis {
        let frame = self.frames;
        self.frames += 1;

        if detections.is_empty() {
            debug!("Frame {}: no face detected", frame);
            return FrameAnalysis { frame, ..Default::default() };
        }
        if detections.len() > self.config.max_faces {
            debug!(
                "Frame {}: {} faces detected, processing {}",
                frame,
                detections.len(),
                self.config.max_faces
            );
        }

        let mut analysis = FrameAnalysis {
            frame,
            face_detected: true,
            ..Default::default()
        };

        for keypoints in detections.iter().take(self.config.max_faces) {
            let outcome = match FrameSignals::extract(keypoints) {
                Ok(signals) => {
                    let classification = rules::classify(&signals, &self.config.thresholds);
                    let (next, warnings) = self.state.advance(classification, &self.config.alarm);
                    self.state = next;
                    for warning in &warnings {
                        warn!("Frame {}: {}", frame, warning);
                    }
                    analysis.warnings.extend(warnings);
                    FaceOutcome::Classified { signals, classification }
                }
                Err(e) => {
                    debug!("Frame {}: skipping face: {}", frame, e);
                    FaceOutcome::Skipped { reason: e.to_string() }
                }
            };
            analysis.faces.push(outcome);
        }

        analysis
    }

    pub fn state(&self) -> &ClassifierState {
        &self.state
    }

    pub fn config(&self) -> &AttentionConfig {
        &self.config
    }

    /// Frames seen so far, including skipped ones
    pub fn frames_processed(&self) -> u64 {
        self.frames
    }

    /// Reset classifier state (on subject change)
    pub fn reset_state(&mut self) {
        self.state.reset();
    }
}
