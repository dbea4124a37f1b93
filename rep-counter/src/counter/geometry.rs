//! Exercise geometry descriptors
//!
//! One generic counter serves every exercise. What differs per exercise
//! lives here: which joints to measure, what the rest signal is, and the
//! thresholds of the hysteresis band.

use serde::{Deserialize, Serialize};

use super::state::{ExerciseState, Phase};
use crate::error::{EngineError, EngineResult};
use crate::exercise::ExerciseType;
use crate::pose::LandmarkName;
use crate::signal::BaselineTuning;

/// Three landmarks whose middle one is the measured joint
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JointChain {
    pub parent: LandmarkName,
    pub joint: LandmarkName,
    pub child: LandmarkName,
}

impl JointChain {
    pub const fn new(parent: LandmarkName, joint: LandmarkName, child: LandmarkName) -> Self {
        Self { parent, joint, child }
    }
}

/// Signal that the rest baseline is calibrated on
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum BaselineSource {
    /// Mean normalized y of these landmarks (e.g. hip height)
    Coordinate { landmarks: Vec<LandmarkName> },
    /// The combined flexion angle itself (e.g. extended elbow)
    FlexionAngle,
}

/// Side-on camera detection for arm exercises
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewClassifier {
    /// Below this horizontal spread / chain length the arm reads as side-on
    pub max_spread_ratio: f64,
    /// Degrees added to enter/quality and taken from exit when side-on
    pub relaxation: f64,
    /// Every measured limb must be straighter than this for the view to be reclassified
    pub min_extension: f64,
}

/// Hysteresis band and quality bar
///
/// Angles in degrees. Depths in units of the baseline signal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thresholds {
    /// Enter Flexed when the flexion angle drops below this
    pub enter_angle: f64,
    /// Return to Rest when the flexion angle rises back above this
    pub exit_angle: f64,
    /// A rep counts if the dwell's minimum angle reached this
    pub quality_angle: f64,
    /// Enter Flexed when deviation from baseline exceeds this
    #[serde(default)]
    pub enter_depth: Option<f64>,
    /// Return to Rest only once deviation falls below this
    #[serde(default)]
    pub exit_depth: Option<f64>,
    /// A rep counts if the dwell's peak deviation reached this
    #[serde(default)]
    pub quality_depth: Option<f64>,
}

impl Thresholds {
    /// Easier band for side-on views
    pub fn relaxed(&self, by: f64) -> Self {
        Self {
            enter_angle: self.enter_angle + by,
            exit_angle: self.exit_angle - by,
            quality_angle: self.quality_angle + by,
            ..self.clone()
        }
    }
}

/// Everything the counter needs to know about one exercise
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseGeometry {
    /// Joints measured each frame; either one crossing a threshold is enough
    pub chains: Vec<JointChain>,
    pub baseline_source: BaselineSource,
    /// Keypoints at or below this score are ignored
    pub min_score: f64,
    pub thresholds: Thresholds,
    /// Deviation reported as 100% depth
    pub full_range: f64,
    #[serde(default)]
    pub view_classifier: Option<ViewClassifier>,
    pub baseline: BaselineTuning,
    /// Label reported while at rest
    pub rest_state: ExerciseState,
}

impl ExerciseGeometry {
    /// Squat: knee angle plus hip drop from standing height
    pub fn squat() -> Self {
        use LandmarkName::*;
        Self {
            chains: vec![
                JointChain::new(LeftHip, LeftKnee, LeftAnkle),
                JointChain::new(RightHip, RightKnee, RightAnkle),
            ],
            baseline_source: BaselineSource::Coordinate {
                landmarks: vec![LeftHip, RightHip],
            },
            min_score: 0.3,
            thresholds: Thresholds {
                enter_angle: 160.0,
                exit_angle: 165.0,
                quality_angle: 140.0,
                enter_depth: Some(0.05),
                exit_depth: Some(0.03),
                quality_depth: Some(0.06),
            },
            full_range: 0.20,
            view_classifier: None,
            baseline: BaselineTuning::for_coordinate(),
            rest_state: ExerciseState::Standing,
        }
    }

    /// Push-up: elbow angle, relaxed when filmed side-on
    pub fn push_up() -> Self {
        use LandmarkName::*;
        Self {
            chains: vec![
                JointChain::new(LeftShoulder, LeftElbow, LeftWrist),
                JointChain::new(RightShoulder, RightElbow, RightWrist),
            ],
            baseline_source: BaselineSource::FlexionAngle,
            min_score: 0.2,
            thresholds: Thresholds {
                enter_angle: 100.0,
                exit_angle: 130.0,
                quality_angle: 95.0,
                enter_depth: None,
                exit_depth: None,
                quality_depth: None,
            },
            full_range: 80.0,
            view_classifier: Some(ViewClassifier {
                max_spread_ratio: 0.25,
                relaxation: 10.0,
                min_extension: 155.0,
            }),
            baseline: BaselineTuning::for_angle(),
            rest_state: ExerciseState::Up,
        }
    }

    /// Lunge: front knee angle plus hip drop
    pub fn lunge() -> Self {
        use LandmarkName::*;
        Self {
            chains: vec![
                JointChain::new(LeftHip, LeftKnee, LeftAnkle),
                JointChain::new(RightHip, RightKnee, RightAnkle),
            ],
            baseline_source: BaselineSource::Coordinate {
                landmarks: vec![LeftHip, RightHip],
            },
            min_score: 0.3,
            thresholds: Thresholds {
                enter_angle: 140.0,
                exit_angle: 155.0,
                quality_angle: 115.0,
                enter_depth: Some(0.06),
                exit_depth: Some(0.03),
                quality_depth: Some(0.08),
            },
            full_range: 0.25,
            view_classifier: None,
            baseline: BaselineTuning::for_coordinate(),
            rest_state: ExerciseState::Standing,
        }
    }

    pub fn for_exercise(exercise: ExerciseType) -> Self {
        match exercise {
            ExerciseType::Squat => Self::squat(),
            ExerciseType::PushUp => Self::push_up(),
            ExerciseType::Lunge => Self::lunge(),
        }
    }

    /// Thresholds in effect for this frame
    pub fn active_thresholds(&self, side_view: bool) -> Thresholds {
        match (&self.view_classifier, side_view) {
            (Some(view), true) => self.thresholds.relaxed(view.relaxation),
            _ => self.thresholds.clone(),
        }
    }

    pub fn state_for(&self, phase: Phase) -> ExerciseState {
        match phase {
            Phase::Rest => self.rest_state,
            Phase::Flexed => ExerciseState::Down,
        }
    }

    /// Check the descriptor is internally consistent. `name` prefixes field paths.
    pub fn validate(&self, name: &str) -> EngineResult<()> {
        let field = |f: &str| format!("{}.{}", name, f);
        let t = &self.thresholds;

        if self.chains.is_empty() {
            return Err(EngineError::config(field("chains"), "at least one joint chain is required"));
        }
        if let BaselineSource::Coordinate { landmarks } = &self.baseline_source {
            if landmarks.is_empty() {
                return Err(EngineError::config(field("baselineSource"), "no landmarks to track"));
            }
        }
        if !(0.0..1.0).contains(&self.min_score) {
            return Err(EngineError::config(field("minScore"), "must be in [0, 1)"));
        }
        if t.enter_angle >= t.exit_angle {
            return Err(EngineError::config(
                field("thresholds.enterAngle"),
                "must be below exitAngle",
            ));
        }
        if t.quality_angle > t.enter_angle {
            return Err(EngineError::config(
                field("thresholds.qualityAngle"),
                "must not exceed enterAngle",
            ));
        }
        match (t.enter_depth, t.exit_depth) {
            (Some(enter), Some(exit)) if enter <= exit => {
                return Err(EngineError::config(
                    field("thresholds.enterDepth"),
                    "must exceed exitDepth",
                ));
            }
            (Some(_), None) | (None, Some(_)) => {
                return Err(EngineError::config(
                    field("thresholds.exitDepth"),
                    "enterDepth and exitDepth must be set together",
                ));
            }
            _ => {}
        }
        if self.full_range <= 0.0 {
            return Err(EngineError::config(field("fullRange"), "must be positive"));
        }
        if !(self.baseline.blend > 0.0 && self.baseline.blend <= 1.0) {
            return Err(EngineError::config(field("baseline.blend"), "must be in (0, 1]"));
        }
        if let Some(view) = &self.view_classifier {
            if view.relaxation < 0.0 || 2.0 * view.relaxation >= t.exit_angle - t.enter_angle {
                return Err(EngineError::config(
                    field("viewClassifier.relaxation"),
                    "would collapse the hysteresis band",
                ));
            }
            if view.min_extension <= t.exit_angle {
                return Err(EngineError::config(
                    field("viewClassifier.minExtension"),
                    "must exceed exitAngle",
                ));
            }
        }
        Ok(())
    }
}
