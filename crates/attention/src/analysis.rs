//! Attention warnings and per-frame analysis results

use serde::{Deserialize, Serialize};
use std::fmt;
use crate::direction::Direction;
use crate::rules::Classification;
use crate::signals::FrameSignals;

/// Warning kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// Sticky tally for a category ran past its limit
    ProlongedAway,

    /// A category collected its limit of short glances
    RepeatedAway,
}

impl WarningKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            WarningKind::ProlongedAway => "prolonged_away",
            WarningKind::RepeatedAway => "repeated_away",
        }
    }
}

/// Warning emitted by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttentionWarning {
    pub kind: WarningKind,
    pub direction: Direction,
}

impl AttentionWarning {
    pub fn prolonged(direction: Direction) -> Self {
        Self { kind: WarningKind::ProlongedAway, direction }
    }

    pub fn repeated(direction: Direction) -> Self {
        Self { kind: WarningKind::RepeatedAway, direction }
    }

    /// Human-readable text for notifications
    pub fn message(&self) -> &'static str {
        match self.kind {
            WarningKind::ProlongedAway => "Looking away for a long time",
            WarningKind::RepeatedAway => "Looking away constantly in a particular direction",
        }
    }
}

impl fmt::Display for AttentionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message(), self.direction)
    }
}

/// What happened to one detected face
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FaceOutcome {
    /// Signals were usable and the state machine advanced
    Classified {
        signals: FrameSignals,
        classification: Classification,
    },

    /// No usable signal; state untouched
    Skipped { reason: String },
}

/// Complete result for one frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameAnalysis {
    /// Zero-based frame index
    pub frame: u64,

    /// Whether any face was detected
    pub face_detected: bool,

    /// One entry per processed detection
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub faces: Vec<FaceOutcome>,

    /// Warnings emitted during this frame
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub warnings: Vec<AttentionWarning>,
}

impl FrameAnalysis {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// True when no detection advanced the state machine
    pub fn is_skipped(&self) -> bool {
        !self
            .faces
            .iter()
            .any(|f| matches!(f, FaceOutcome::Classified { .. }))
    }

    /// Classification of the first classified face
    pub fn classification(&self) -> Option<Classification> {
        self.faces.iter().find_map(|f| match f {
            FaceOutcome::Classified { classification, .. } => Some(*classification),
            FaceOutcome::Skipped { .. } => None,
        })
    }
}
