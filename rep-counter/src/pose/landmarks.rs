//! Landmark vocabulary and per-frame pose data
//!
//! Poses arrive from an external detector (one body per frame at most).
//! Coordinates may be normalized (0-1) or raw pixels depending on the source.

use serde::{Deserialize, Serialize};

// ============================================================================
// LANDMARK NAMES (COCO-17 keypoint vocabulary)
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LandmarkName {
    Nose,
    LeftEye,
    RightEye,
    LeftEar,
    RightEar,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

impl LandmarkName {
    pub fn as_str(&self) -> &'static str {
        match self {
            LandmarkName::Nose => "nose",
            LandmarkName::LeftEye => "left_eye",
            LandmarkName::RightEye => "right_eye",
            LandmarkName::LeftEar => "left_ear",
            LandmarkName::RightEar => "right_ear",
            LandmarkName::LeftShoulder => "left_shoulder",
            LandmarkName::RightShoulder => "right_shoulder",
            LandmarkName::LeftElbow => "left_elbow",
            LandmarkName::RightElbow => "right_elbow",
            LandmarkName::LeftWrist => "left_wrist",
            LandmarkName::RightWrist => "right_wrist",
            LandmarkName::LeftHip => "left_hip",
            LandmarkName::RightHip => "right_hip",
            LandmarkName::LeftKnee => "left_knee",
            LandmarkName::RightKnee => "right_knee",
            LandmarkName::LeftAnkle => "left_ankle",
            LandmarkName::RightAnkle => "right_ankle",
        }
    }
}

// ============================================================================
// FRAME DATA
// ============================================================================

/// A single named body joint as reported by the detector
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    pub name: LandmarkName,
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
    /// Detection confidence (0-1), absent for detectors that don't report it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl Keypoint {
    pub fn new(name: LandmarkName, x: f64, y: f64, score: f64) -> Self {
        Self {
            name,
            x,
            y,
            z: None,
            score: Some(score),
        }
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

/// All keypoints of one detected body in one frame
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    #[serde(default)]
    pub keypoints: Vec<Keypoint>,
    /// Whole-body detection score
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl Pose {
    pub fn new(keypoints: Vec<Keypoint>) -> Self {
        Self { keypoints, score: None }
    }

    /// No body detected this frame
    pub fn is_empty(&self) -> bool {
        self.keypoints.is_empty()
    }
}

/// Bring a vertical coordinate into normalized (0-1) space.
///
/// Values above 1.0 are taken to be pixels and divided by the frame height.
/// Returns None when the value looks like pixels but no usable height is known.
pub fn normalize_coordinate(value: f64, video_height: Option<u32>) -> Option<f64> {
    if value <= 1.0 {
        return Some(value);
    }
    match video_height {
        Some(height) if height > 1 => Some(value / height as f64),
        _ => None,
    }
}
