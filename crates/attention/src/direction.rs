//! Away-looking categories and per-category counters

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::ops::{Index, IndexMut};

/// Direction the subject is looking away in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    /// Eyes turned left
    Left,
    /// Eyes turned right
    Right,
    /// Eyes raised
    Up,
    /// Whole head turned left
    FaceLeft,
    /// Whole head turned right
    FaceRight,
    /// Whole head tilted up
    FaceUp,
}

impl Direction {
    pub const COUNT: usize = 6;

    /// All categories in evaluation order
    pub const ALL: [Direction; Direction::COUNT] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::FaceLeft,
        Direction::FaceRight,
        Direction::FaceUp,
    ];

    pub const fn index(self) -> usize {
        match self {
            Direction::Left => 0,
            Direction::Right => 1,
            Direction::Up => 2,
            Direction::FaceLeft => 3,
            Direction::FaceRight => 4,
            Direction::FaceUp => 5,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::FaceLeft => "faceLeft",
            Direction::FaceRight => "faceRight",
            Direction::FaceUp => "faceUp",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Frame counter keyed by [`Direction`]
///
/// Backed by a fixed array, so every tally always holds exactly one entry per
/// category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally([u32; Direction::COUNT]);

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one to a category
    pub fn increment(&mut self, direction: Direction) {
        let slot = &mut self.0[direction.index()];
        *slot = slot.saturating_add(1);
    }

    /// Zero a single category
    pub fn reset(&mut self, direction: Direction) {
        self.0[direction.index()] = 0;
    }

    /// Zero every category
    pub fn clear(&mut self) {
        self.0 = [0; Direction::COUNT];
    }

    pub fn is_clear(&self) -> bool {
        self.0.iter().all(|&v| v == 0)
    }

    pub fn total(&self) -> u64 {
        self.0.iter().map(|&v| v as u64).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Direction, u32)> + '_ {
        Direction::ALL.iter().map(move |&d| (d, self.0[d.index()]))
    }
}

impl Index<Direction> for Tally {
    type Output = u32;

    fn index(&self, direction: Direction) -> &u32 {
        &self.0[direction.index()]
    }
}

impl IndexMut<Direction> for Tally {
    fn index_mut(&mut self, direction: Direction) -> &mut u32 {
        &mut self.0[direction.index()]
    }
}

impl Serialize for Tally {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Direction::COUNT))?;
        for (direction, count) in self.iter() {
            map.serialize_entry(direction.as_str(), &count)?;
        }
        map.end()
    }
}
