//! Classifier state and the per-frame warning state machine

use serde::Serialize;
use tracing::{debug, info};
use crate::analysis::AttentionWarning;
use crate::config::AlarmConfig;
use crate::direction::{Direction, Tally};
use crate::rules::Classification;

/// Counters carried from frame to frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClassifierState {
    /// Away frames per category since the last glance was recorded
    pub looking_direction: Tally,

    /// Away frames per category since the last tally reset
    pub constantly_looking: Tally,

    /// Short glances recorded per category
    pub direction_count: Tally,

    /// Consecutive centered frames
    pub on_screen: u32,
}

impl ClassifierState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one classification, then evaluate warnings
    ///
    /// Consumes the previous state and returns the next one together with
    /// any warnings fired on this frame.
    pub fn advance(
        mut self,
        classification: Classification,
        alarm: &AlarmConfig,
    ) -> (ClassifierState, Vec<AttentionWarning>) {
        self.record(classification);
        let warnings = self.evaluate(alarm);
        (self, warnings)
    }

    fn record(&mut self, classification: Classification) {
        match classification {
            Classification::Away(direction) => {
                self.looking_direction.increment(direction);
                self.constantly_looking.increment(direction);
                self.on_screen = 0;
            }
            Classification::ReturningToScreen => {
                debug!("Returning to screen");
                self.on_screen = 0;
            }
            Classification::Centered => {
                self.on_screen = self.on_screen.saturating_add(1);
            }
        }
    }

    fn evaluate(&mut self, alarm: &AlarmConfig) -> Vec<AttentionWarning> {
        let mut warnings = Vec::new();

        if self.on_screen > alarm.tally_reset_frames {
            self.reset_tallies();
            if self.on_screen > alarm.offense_reset_frames {
                self.reset_offenses();
            }
        }

        for direction in Direction::ALL {
            if self.looking_direction[direction] > alarm.glance_frames {
                self.direction_count.increment(direction);
                self.looking_direction.reset(direction);
                debug!(
                    "Glance recorded: {} (count: {})",
                    direction, self.direction_count[direction]
                );
            }
        }

        for direction in Direction::ALL {
            if self.constantly_looking[direction] > alarm.prolonged_frames {
                warnings.push(AttentionWarning::prolonged(direction));
                self.reset_tallies();
                self.reset_offenses();
            }
        }

        for direction in Direction::ALL {
            if self.direction_count[direction] == alarm.repeat_offenses {
                warnings.push(AttentionWarning::repeated(direction));
                self.reset_offenses();
            }
        }

        warnings
    }

    /// Zero direction and sticky tallies
    pub fn reset_tallies(&mut self) {
        self.looking_direction.clear();
        self.constantly_looking.clear();
    }

    /// Zero repeated-offense counters
    pub fn reset_offenses(&mut self) {
        self.direction_count.clear();
    }

    /// Reset everything (on subject change)
    pub fn reset(&mut self) {
        info!("Classifier state reset");
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::WarningKind;
    use proptest::prelude::*;

    fn run(
        state: ClassifierState,
        classification: Classification,
        frames: u32,
    ) -> (ClassifierState, Vec<AttentionWarning>) {
        let alarm = AlarmConfig::default();
        let mut state = state;
        let mut all = Vec::new();
        for _ in 0..frames {
            let (next, warnings) = state.advance(classification, &alarm);
            state = next;
            all.extend(warnings);
        }
        (state, all)
    }

    fn away(direction: Direction) -> Classification {
        Classification::Away(direction)
    }

    #[test]
    fn test_away_increments_both_tallies() {
        let state = ClassifierState { on_screen: 12, ..Default::default() };
        let (state, warnings) = run(state, away(Direction::Up), 3);
        assert!(warnings.is_empty());
        assert_eq!(state.looking_direction[Direction::Up], 3);
        assert_eq!(state.constantly_looking[Direction::Up], 3);
        assert_eq!(state.on_screen, 0);
        assert_eq!(state.looking_direction.total(), 3);
    }

    #[test]
    fn test_returning_clears_streak_only() {
        let (state, _) = run(ClassifierState::new(), away(Direction::Left), 5);
        let (state, _) = run(state, Classification::Centered, 10);
        assert_eq!(state.on_screen, 10);

        let (state, _) = run(state, Classification::ReturningToScreen, 1);
        assert_eq!(state.on_screen, 0);
        assert_eq!(state.looking_direction[Direction::Left], 5);
    }

    #[test]
    fn test_51_frames_records_glance() {
        let (state, warnings) = run(ClassifierState::new(), away(Direction::Left), 51);
        assert!(warnings.is_empty());
        assert_eq!(state.direction_count[Direction::Left], 1);
        assert_eq!(state.looking_direction[Direction::Left], 0);
        assert_eq!(state.constantly_looking[Direction::Left], 51);

        let (state, _) = run(ClassifierState::new(), away(Direction::Left), 50);
        assert_eq!(state.direction_count[Direction::Left], 0);
        assert_eq!(state.looking_direction[Direction::Left], 50);
    }

    #[test]
    fn test_prolonged_warning_fires_once() {
        let mut state = ClassifierState::new();
        state.direction_count.increment(Direction::Right);

        let (state, warnings) = run(state, away(Direction::FaceRight), 150);
        assert!(warnings.is_empty());
        assert_eq!(state.constantly_looking[Direction::FaceRight], 150);

        let (state, warnings) = run(state, away(Direction::FaceRight), 1);
        assert_eq!(warnings, vec![AttentionWarning::prolonged(Direction::FaceRight)]);
        assert!(state.looking_direction.is_clear());
        assert!(state.constantly_looking.is_clear());
        assert!(state.direction_count.is_clear());
    }

    #[test]
    fn test_repeated_warning_at_four_glances() {
        // 4 glances of 51 frames each, broken up by returning to the screen
        // so the sticky tally is cleared between them
        let mut state = ClassifierState::new();
        let mut fired = Vec::new();
        for _ in 0..4 {
            let (next, warnings) = run(state, away(Direction::Up), 51);
            fired.extend(warnings);
            let (next, warnings) = run(next, Classification::Centered, 31);
            fired.extend(warnings);
            state = next;
        }
        assert_eq!(fired, vec![AttentionWarning::repeated(Direction::Up)]);
        assert!(state.direction_count.is_clear());
    }

    #[test]
    fn test_repeated_counter_never_reaches_five() {
        let mut state = ClassifierState::new();
        for _ in 0..3 {
            state.direction_count.increment(Direction::FaceUp);
        }
        state.looking_direction[Direction::FaceUp] = 50;

        let (state, warnings) = run(state, away(Direction::FaceUp), 1);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, WarningKind::RepeatedAway);
        assert_eq!(state.direction_count[Direction::FaceUp], 0);

        let mut state = state;
        state.looking_direction[Direction::FaceUp] = 50;
        let (state, warnings) = run(state, away(Direction::FaceUp), 1);
        assert!(warnings.is_empty());
        assert_eq!(state.direction_count[Direction::FaceUp], 1);
    }

    #[test]
    fn test_31_centered_frames_clear_tallies() {
        let (state, _) = run(ClassifierState::new(), away(Direction::Right), 20);
        let (state, _) = run(state, Classification::Centered, 30);
        assert_eq!(state.looking_direction[Direction::Right], 20);
        assert_eq!(state.constantly_looking[Direction::Right], 20);

        let (state, _) = run(state, Classification::Centered, 1);
        assert!(state.looking_direction.is_clear());
        assert!(state.constantly_looking.is_clear());
    }

    #[test]
    fn test_long_idle_clears_offenses() {
        let (state, _) = run(ClassifierState::new(), away(Direction::Left), 51);
        assert_eq!(state.direction_count[Direction::Left], 1);

        let (state, _) = run(state, Classification::Centered, 300);
        assert_eq!(state.direction_count[Direction::Left], 1);

        let (state, _) = run(state, Classification::Centered, 1);
        assert!(state.direction_count.is_clear());
    }

    #[test]
    fn test_reset() {
        let (mut state, _) = run(ClassifierState::new(), away(Direction::Up), 60);
        state.reset();
        assert_eq!(state, ClassifierState::default());
    }

    fn any_classification() -> impl Strategy<Value = Classification> {
        prop_oneof![
            (0usize..Direction::COUNT)
                .prop_map(|i| Classification::Away(Direction::ALL[i])),
            Just(Classification::ReturningToScreen),
            Just(Classification::Centered),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_counters_stay_within_limits(
            seq in prop::collection::vec(any_classification(), 0..1500)
        ) {
            let alarm = AlarmConfig::default();
            let mut state = ClassifierState::new();
            for c in seq {
                let (next, warnings) = state.advance(c, &alarm);
                state = next;
                prop_assert!(warnings.len() <= 2);
                for (_, v) in state.looking_direction.iter() {
                    prop_assert!(v <= alarm.glance_frames);
                }
                for (_, v) in state.constantly_looking.iter() {
                    prop_assert!(v <= alarm.prolonged_frames);
                }
                for (_, v) in state.direction_count.iter() {
                    prop_assert!(v < alarm.repeat_offenses);
                }
            }
        }

        #[test]
        fn prop_at_most_one_category_changes(
            seq in prop::collection::vec(any_classification(), 1..400)
        ) {
            let alarm = AlarmConfig::default();
            let mut state = ClassifierState::new();
            for c in seq {
                let before = state;
                let (next, _) = state.advance(c, &alarm);
                state = next;
                let grew = Direction::ALL
                    .iter()
                    .filter(|&&d| state.constantly_looking[d] > before.constantly_looking[d])
                    .count();
                prop_assert!(grew <= 1);
                if let Classification::Away(_) = c {
                    prop_assert_eq!(state.on_screen, 0);
                }
            }
        }
    }
}
