//! Attention classifier configuration
//!
//! The thresholds are empirical and tied to the face-mesh model's
//! pixel-scaled coordinates. They do not carry over to other keypoint scales.

use serde::{Deserialize, Serialize};
use crate::AttentionError;

/// Pitch below which the head counts as tilted up (radians)
pub const FACE_UP_PITCH: f32 = -0.1;
/// Yaw above which the head counts as turned left (radians)
pub const FACE_LEFT_YAW: f32 = 0.17;
/// Yaw below which the head counts as turned right (radians)
pub const FACE_RIGHT_YAW: f32 = -0.18;
/// Brow-to-iris offset above which the eyes count as raised (pixels)
pub const UP_DISTANCE: f32 = 14.0;
/// Eye ratio below which the eyes count as turned right
pub const EYE_RATIO_RIGHT: f32 = 0.992;
/// Eye ratio above which the eyes count as turned left
pub const EYE_RATIO_LEFT: f32 = 1.0125;
/// Landmark spread below which the face is returning to the screen (pixels)
pub const SCREEN_RETURN_DISTANCE: f32 = 43.0;

/// Classification thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub face_up_pitch: f32,
    pub face_left_yaw: f32,
    pub face_right_yaw: f32,
    pub up_distance: f32,
    pub eye_ratio_right: f32,
    pub eye_ratio_left: f32,
    pub screen_return_distance: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            face_up_pitch: FACE_UP_PITCH,
            face_left_yaw: FACE_LEFT_YAW,
            face_right_yaw: FACE_RIGHT_YAW,
            up_distance: UP_DISTANCE,
            eye_ratio_right: EYE_RATIO_RIGHT,
            eye_ratio_left: EYE_RATIO_LEFT,
            screen_return_distance: SCREEN_RETURN_DISTANCE,
        }
    }
}

/// Frame counts driving the warning state machine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlarmConfig {
    /// Centered frames after which direction and sticky tallies are cleared
    pub tally_reset_frames: u32,

    /// Centered frames after which repeated-offense counters are cleared
    pub offense_reset_frames: u32,

    /// Direction tally above which a short glance is recorded
    pub glance_frames: u32,

    /// Sticky tally above which a prolonged-away warning fires
    pub prolonged_frames: u32,

    /// Repeated-offense count at which a repeated-away warning fires
    pub repeat_offenses: u32,
}

impl Default for AlarmConfig {
    fn default() -> Self {
        Self {
            tally_reset_frames: 30,
            offense_reset_frames: 300,
            glance_frames: 50,
            prolonged_frames: 150,
            repeat_offenses: 4,
        }
    }
}

impl AlarmConfig {
    /// Warn sooner (fewer frames per stage)
    pub fn strict() -> Self {
        Self {
            glance_frames: 30,
            prolonged_frames: 90,
            repeat_offenses: 3,
            ..Default::default()
        }
    }

    /// Warn later (more frames per stage)
    pub fn lenient() -> Self {
        Self {
            glance_frames: 75,
            prolonged_frames: 240,
            repeat_offenses: 5,
            ..Default::default()
        }
    }
}

/// Attention classifier configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttentionConfig {
    pub thresholds: Thresholds,
    pub alarm: AlarmConfig,

    /// Detections processed per frame; extra faces are ignored
    pub max_faces: usize,
}

impl Default for AttentionConfig {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            alarm: AlarmConfig::default(),
            max_faces: 1,
        }
    }
}

impl AttentionConfig {
    pub fn strict() -> Self {
        Self {
            alarm: AlarmConfig::strict(),
            ..Default::default()
        }
    }

    pub fn lenient() -> Self {
        Self {
            alarm: AlarmConfig::lenient(),
            ..Default::default()
        }
    }

    /// Reject configurations the state machine cannot run with
    pub fn validate(&self) -> Result<(), AttentionError> {
        let t = &self.thresholds;
        let values = [
            t.face_up_pitch,
            t.face_left_yaw,
            t.face_right_yaw,
            t.up_distance,
            t.eye_ratio_right,
            t.eye_ratio_left,
            t.screen_return_distance,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(AttentionError::Config("thresholds must be finite".into()));
        }
        if t.eye_ratio_right > t.eye_ratio_left {
            return Err(AttentionError::Config(format!(
                "eye_ratio_right ({}) exceeds eye_ratio_left ({})",
                t.eye_ratio_right, t.eye_ratio_left
            )));
        }
        if t.face_right_yaw > t.face_left_yaw {
            return Err(AttentionError::Config(format!(
                "face_right_yaw ({}) exceeds face_left_yaw ({})",
                t.face_right_yaw, t.face_left_yaw
            )));
        }

        let a = &self.alarm;
        if a.glance_frames == 0 || a.prolonged_frames == 0 || a.repeat_offenses == 0 {
            return Err(AttentionError::Config("alarm frame counts must be non-zero".into()));
        }
        if a.offense_reset_frames < a.tally_reset_frames {
            return Err(AttentionError::Config(format!(
                "offense_reset_frames ({}) below tally_reset_frames ({})",
                a.offense_reset_frames, a.tally_reset_frames
            )));
        }
        if self.max_faces == 0 {
            return Err(AttentionError::Config("max_faces must be at least 1".into()));
        }
        Ok(())
    }
}
