//! Ordered gaze classification rules

use serde::{Deserialize, Serialize};
use crate::config::Thresholds;
use crate::direction::Direction;
use crate::signals::FrameSignals;

/// Result of classifying one face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "direction", rename_all = "snake_case")]
pub enum Classification {
    /// Looking away in a category
    Away(Direction),
    /// Turning back toward the screen; clears the on-screen streak
    ReturningToScreen,
    /// Looking at the screen
    Centered,
}

/// One entry of the rule table
pub struct Rule {
    pub name: &'static str,
    pub outcome: Classification,
    predicate: fn(&FrameSignals, &Thresholds) -> bool,
}

impl Rule {
    pub fn matches(&self, signals: &FrameSignals, thresholds: &Thresholds) -> bool {
        (self.predicate)(signals, thresholds)
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("outcome", &self.outcome)
            .finish()
    }
}

/// Evaluated top to bottom; the first match wins
pub static RULES: [Rule; 7] = [
    Rule {
        name: "head tilted up",
        outcome: Classification::Away(Direction::FaceUp),
        predicate: head_tilted_up,
    },
    Rule {
        name: "head turned left",
        outcome: Classification::Away(Direction::FaceLeft),
        predicate: head_turned_left,
    },
    Rule {
        name: "head turned right",
        outcome: Classification::Away(Direction::FaceRight),
        predicate: head_turned_right,
    },
    Rule {
        name: "eyes raised",
        outcome: Classification::Away(Direction::Up),
        predicate: eyes_raised,
    },
    Rule {
        name: "eyes right",
        outcome: Classification::Away(Direction::Right),
        predicate: eyes_right,
    },
    Rule {
        name: "eyes left",
        outcome: Classification::Away(Direction::Left),
        predicate: eyes_left,
    },
    Rule {
        name: "returning to screen",
        outcome: Classification::ReturningToScreen,
        predicate: returning_to_screen,
    },
];

fn head_tilted_up(s: &FrameSignals, t: &Thresholds) -> bool {
    s.angles.pitch < t.face_up_pitch
}

fn head_turned_left(s: &FrameSignals, t: &Thresholds) -> bool {
    s.angles.yaw > t.face_left_yaw
}

fn head_turned_right(s: &FrameSignals, t: &Thresholds) -> bool {
    s.angles.yaw < t.face_right_yaw
}

fn eyes_raised(s: &FrameSignals, t: &Thresholds) -> bool {
    s.up_distance > t.up_distance
}

fn eyes_right(s: &FrameSignals, t: &Thresholds) -> bool {
    s.eye_ratio < t.eye_ratio_right
}

fn eyes_left(s: &FrameSignals, t: &Thresholds) -> bool {
    s.eye_ratio > t.eye_ratio_left
}

fn returning_to_screen(s: &FrameSignals, t: &Thresholds) -> bool {
    s.screen_return_distance < t.screen_return_distance
}

/// First matching rule, if any
pub fn matching_rule(signals: &FrameSignals, thresholds: &Thresholds) -> Option<&'static Rule> {
    RULES.iter().find(|rule| rule.matches(signals, thresholds))
}

/// Classify one face; `Centered` when no rule matches
pub fn classify(signals: &FrameSignals, thresholds: &Thresholds) -> Classification {
    matching_rule(signals, thresholds)
        .map(|rule| rule.outcome)
        .unwrap_or(Classification::Centered)
}
