//! Gaze signals derived from face-mesh keypoints

use serde::{Deserialize, Serialize};
use crate::keypoints::{landmarks, KeypointSet, Keypoint, NUM_IRIS_KEYPOINTS};
use crate::AttentionError;

/// Head orientation (radians)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FaceAngles {
    /// Up-down tilt, forehead to chin
    pub pitch: f32,
    /// Left-right turn, face edge to face edge in the x/z plane
    pub yaw: f32,
    /// Sideways tilt, face edge to face edge in the x/y plane
    pub roll: f32,
}

impl FaceAngles {
    pub fn from_keypoints(kp: &KeypointSet) -> Result<Self, AttentionError> {
        let forehead = kp.get(landmarks::FOREHEAD)?;
        let chin = kp.get(landmarks::CHIN)?;
        let right = kp.get(landmarks::RIGHT_EDGE)?;
        let left = kp.get(landmarks::LEFT_EDGE)?;

        Ok(Self {
            pitch: (chin.z - forehead.z).atan2(chin.y - forehead.y),
            yaw: (left.z - right.z).atan2(left.x - right.x),
            roll: (left.y - right.y).atan2(left.x - right.x),
        })
    }
}

/// Iris centre and contour diameters for one eye
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IrisMeasurement {
    pub center: Keypoint,
    pub diameter_x: f32,
    pub diameter_y: f32,
}

impl IrisMeasurement {
    /// Read the iris block starting at `offset` (centre, then 4 contour points)
    fn from_block(kp: &KeypointSet, offset: usize) -> Result<Self, AttentionError> {
        kp.require(offset + NUM_IRIS_KEYPOINTS)?;
        Ok(Self {
            center: kp[offset],
            diameter_x: kp[offset + 3].planar_distance(&kp[offset + 1]),
            diameter_y: kp[offset + 4].planar_distance(&kp[offset + 2]),
        })
    }
}

/// Everything the classifier reads from one face
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameSignals {
    pub angles: FaceAngles,

    /// Iris x over eye-centre x; <1 looks right, >1 looks left
    pub eye_ratio: f32,

    /// Mean vertical offset from brow references to the irises
    pub up_distance: f32,

    /// Planar spread of the screen-return landmark pair
    pub screen_return_distance: f32,

    pub left_iris: IrisMeasurement,
    pub right_iris: IrisMeasurement,
}

impl FrameSignals {
    /// Derive signals from one face
    ///
    /// Needs both iris blocks. Fails with `DegenerateEyeCentre` when the eye
    /// centres sum to zero, and `NonFiniteSignal` when a value the rules read
    /// is NaN or infinite. Roll and the iris diameters are reported as is.
    pub fn extract(kp: &KeypointSet) -> Result<Self, AttentionError> {
        if kp.iris_count() < 2 {
            return Err(AttentionError::KeypointsMissing {
                required: landmarks::RIGHT_IRIS + NUM_IRIS_KEYPOINTS,
                actual: kp.len(),
            });
        }
        let left_iris = IrisMeasurement::from_block(kp, landmarks::LEFT_IRIS)?;
        let right_iris = IrisMeasurement::from_block(kp, landmarks::RIGHT_IRIS)?;

        let angles = FaceAngles::from_keypoints(kp)?;

        let centre_right = cluster_mean_x(kp, &landmarks::RIGHT_EYE_CLUSTER)?;
        let centre_left = cluster_mean_x(kp, &landmarks::LEFT_EYE_CLUSTER)?;
        let denominator = centre_left + centre_right;
        if denominator == 0.0 {
            return Err(AttentionError::DegenerateEyeCentre);
        }
        let eye_ratio = (left_iris.center.x + right_iris.center.x) / denominator;

        let upper_right = kp.get(landmarks::RIGHT_UPPER_REFERENCE)?;
        let upper_left = kp.get(landmarks::LEFT_UPPER_REFERENCE)?;
        let up_distance = (upper_right.y - right_iris.center.y) / 2.0
            + (upper_left.y - left_iris.center.y) / 2.0;

        let (a, b) = landmarks::SCREEN_RETURN_PAIR;
        let screen_return_distance = kp.get(a)?.planar_distance(kp.get(b)?);

        let signals = Self {
            angles,
            eye_ratio,
            up_distance,
            screen_return_distance,
            left_iris,
            right_iris,
        };
        signals.check_finite()?;
        Ok(signals)
    }

    /// Only the inputs of the classification rules
    fn check_finite(&self) -> Result<(), AttentionError> {
        let named = [
            ("pitch", self.angles.pitch),
            ("yaw", self.angles.yaw),
            ("eye_ratio", self.eye_ratio),
            ("up_distance", self.up_distance),
            ("screen_return_distance", self.screen_return_distance),
        ];
        match named.iter().find(|(_, v)| !v.is_finite()) {
            Some((name, _)) => Err(AttentionError::NonFiniteSignal(name)),
            None => Ok(()),
        }
    }
}

fn cluster_mean_x(kp: &KeypointSet, cluster: &[usize]) -> Result<f32, AttentionError> {
    let mut sum = 0.0;
    for &index in cluster {
        sum += kp.get(index)?.x;
    }
    Ok(sum / cluster.len() as f32)
}
