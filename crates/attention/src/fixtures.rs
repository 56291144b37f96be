//! Synthetic face meshes for tests

use crate::keypoints::{landmarks, Keypoint, KeypointSet, NUM_IRIS_KEYPOINTS, NUM_KEYPOINTS};

const FACE_HEIGHT: f32 = 100.0;
const FACE_WIDTH: f32 = 100.0;
const EYE_LINE_Y: f32 = 50.0;
const IRIS_RADIUS: f32 = 5.0;

/// Builds a full mesh whose derived signals take chosen values
#[derive(Debug, Clone)]
pub(crate) struct FaceBuilder {
    pitch: f32,
    yaw: f32,
    eye_ratio: f32,
    up_distance: f32,
    screen_return: f32,
    centre_right: f32,
    centre_left: f32,
    irises: bool,
}

impl FaceBuilder {
    /// Face looking straight at the screen
    pub fn neutral() -> Self {
        Self {
            pitch: 0.0,
            yaw: 0.0,
            eye_ratio: 1.0,
            up_distance: 0.0,
            screen_return: 100.0,
            centre_right: 40.0,
            centre_left: 60.0,
            irises: true,
        }
    }

    pub fn pitch(mut self, pitch: f32) -> Self {
        self.pitch = pitch;
        self
    }

    pub fn yaw(mut self, yaw: f32) -> Self {
        self.yaw = yaw;
        self
    }

    pub fn eye_ratio(mut self, ratio: f32) -> Self {
        self.eye_ratio = ratio;
        self
    }

    pub fn up_distance(mut self, distance: f32) -> Self {
        self.up_distance = distance;
        self
    }

    pub fn screen_return(mut self, distance: f32) -> Self {
        self.screen_return = distance;
        self
    }

    pub fn eye_centres(mut self, right: f32, left: f32) -> Self {
        self.centre_right = right;
        self.centre_left = left;
        self
    }

    pub fn without_irises(mut self) -> Self {
        self.irises = false;
        self
    }

    pub fn build(&self) -> KeypointSet {
        let mut points = vec![Keypoint::default(); NUM_KEYPOINTS + 2 * NUM_IRIS_KEYPOINTS];

        points[landmarks::FOREHEAD] = Keypoint::new(0.0, 0.0, 0.0);
        points[landmarks::CHIN] = Keypoint::new(0.0, FACE_HEIGHT, FACE_HEIGHT * self.pitch.tan());

        points[landmarks::RIGHT_EDGE] = Keypoint::new(-FACE_WIDTH / 2.0, 0.0, 0.0);
        points[landmarks::LEFT_EDGE] =
            Keypoint::new(FACE_WIDTH / 2.0, 0.0, FACE_WIDTH * self.yaw.tan());

        for &i in &landmarks::RIGHT_EYE_CLUSTER {
            points[i] = Keypoint::new(self.centre_right, EYE_LINE_Y, 0.0);
        }
        for &i in &landmarks::LEFT_EYE_CLUSTER {
            points[i] = Keypoint::new(self.centre_left, EYE_LINE_Y, 0.0);
        }

        let upper_y = EYE_LINE_Y + self.up_distance;
        points[landmarks::RIGHT_UPPER_REFERENCE] = Keypoint::new(self.centre_right, upper_y, 0.0);
        points[landmarks::LEFT_UPPER_REFERENCE] = Keypoint::new(self.centre_left, upper_y, 0.0);

        let (a, b) = landmarks::SCREEN_RETURN_PAIR;
        points[a] = Keypoint::new(0.0, 0.0, 0.0);
        points[b] = Keypoint::new(self.screen_return, 0.0, 0.0);

        write_iris(&mut points, landmarks::LEFT_IRIS, self.centre_left * self.eye_ratio);
        write_iris(&mut points, landmarks::RIGHT_IRIS, self.centre_right * self.eye_ratio);

        if !self.irises {
            points.truncate(NUM_KEYPOINTS);
        }
        KeypointSet::new(points)
    }
}

fn write_iris(points: &mut [Keypoint], offset: usize, cx: f32) {
    let cy = EYE_LINE_Y;
    points[offset] = Keypoint::new(cx, cy, 0.0);
    points[offset + 1] = Keypoint::new(cx - IRIS_RADIUS, cy, 0.0);
    points[offset + 2] = Keypoint::new(cx, cy - IRIS_RADIUS, 0.0);
    points[offset + 3] = Keypoint::new(cx + IRIS_RADIUS, cy, 0.0);
    points[offset + 4] = Keypoint::new(cx, cy + IRIS_RADIUS, 0.0);
}
