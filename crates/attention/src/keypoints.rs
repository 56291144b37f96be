//! Face-mesh keypoint types and landmark layout

use serde::{Deserialize, Serialize};
use crate::AttentionError;

/// Number of base face-mesh landmarks
pub const NUM_KEYPOINTS: usize = 468;

/// Number of iris landmarks appended per eye (centre + 4 contour points)
pub const NUM_IRIS_KEYPOINTS: usize = 5;

/// Landmark indices used by the classifier
pub mod landmarks {
    use super::{NUM_IRIS_KEYPOINTS, NUM_KEYPOINTS};

    /// Forehead (top of the pitch axis)
    pub const FOREHEAD: usize = 10;
    /// Chin (bottom of the pitch axis)
    pub const CHIN: usize = 152;
    /// Outer corner of the right eye (face edge for yaw/roll)
    pub const RIGHT_EDGE: usize = 33;
    /// Outer corner of the left eye (face edge for yaw/roll)
    pub const LEFT_EDGE: usize = 263;

    /// Right-eye lid cluster averaged for the eye centre
    pub const RIGHT_EYE_CLUSTER: [usize; 6] = [160, 159, 158, 144, 145, 153];
    /// Left-eye lid cluster averaged for the eye centre
    pub const LEFT_EYE_CLUSTER: [usize; 6] = [385, 386, 387, 380, 374, 373];

    /// Reference above the right iris for vertical gaze
    pub const RIGHT_UPPER_REFERENCE: usize = 23;
    /// Reference above the left iris for vertical gaze
    pub const LEFT_UPPER_REFERENCE: usize = 253;

    /// Pair whose spread signals the face turning back to the screen
    pub const SCREEN_RETURN_PAIR: (usize, usize) = (66, 296);

    /// First iris block (reported as the left iris)
    pub const LEFT_IRIS: usize = NUM_KEYPOINTS;
    /// Second iris block (reported as the right iris)
    pub const RIGHT_IRIS: usize = NUM_KEYPOINTS + NUM_IRIS_KEYPOINTS;
}

/// A single 3D landmark
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 3]", into = "[f32; 3]")]
pub struct Keypoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Keypoint {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance in the image plane (z ignored)
    pub fn planar_distance(&self, other: &Keypoint) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

impl From<[f32; 3]> for Keypoint {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<Keypoint> for [f32; 3] {
    fn from(p: Keypoint) -> Self {
        [p.x, p.y, p.z]
    }
}

/// Ordered keypoints for one detected face in one frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeypointSet {
    points: Vec<Keypoint>,
}

impl KeypointSet {
    pub fn new(points: Vec<Keypoint>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Keypoint] {
        &self.points
    }

    /// Number of eyes with iris landmarks present (0, 1 or 2)
    pub fn iris_count(&self) -> usize {
        self.points.len().saturating_sub(NUM_KEYPOINTS) / NUM_IRIS_KEYPOINTS
    }

    /// Landmark at `index`, or `KeypointsMissing` if the set is too short
    pub fn get(&self, index: usize) -> Result<&Keypoint, AttentionError> {
        self.points.get(index).ok_or(AttentionError::KeypointsMissing {
            required: index + 1,
            actual: self.points.len(),
        })
    }

    /// Fail unless the set holds at least `required` points
    pub fn require(&self, required: usize) -> Result<(), AttentionError> {
        if self.points.len() < required {
            return Err(AttentionError::KeypointsMissing {
                required,
                actual: self.points.len(),
            });
        }
        Ok(())
    }
}

impl From<Vec<Keypoint>> for KeypointSet {
    fn from(points: Vec<Keypoint>) -> Self {
        Self::new(points)
    }
}

impl std::ops::Index<usize> for KeypointSet {
    type Output = Keypoint;

    fn index(&self, index: usize) -> &Keypoint {
        &self.points[index]
    }
}
