//! Synthetic pose frames for integration tests
#![allow(dead_code)]

use std::time::Duration;

use rep_counter::{
    AnalysisResult, EngineConfig, ExerciseType, Keypoint, LandmarkName, ManualClock, Pose, RepEngine,
};

/// Nominal frame interval (~30Hz)
pub const FRAME: Duration = Duration::from_millis(33);

const SCORE: f64 = 0.9;

/// Rotate `v` by `deg` degrees
fn rotate(v: (f64, f64), deg: f64) -> (f64, f64) {
    let (sin, cos) = deg.to_radians().sin_cos();
    (v.0 * cos - v.1 * sin, v.0 * sin + v.1 * cos)
}

/// Place `child` so the angle parent→joint→child equals `angle`
fn bend(parent: (f64, f64), joint: (f64, f64), angle: f64, length: f64) -> (f64, f64) {
    let up = (parent.0 - joint.0, parent.1 - joint.1);
    let norm = (up.0 * up.0 + up.1 * up.1).sqrt();
    let dir = rotate((up.0 / norm, up.1 / norm), angle);
    (joint.0 + dir.0 * length, joint.1 + dir.1 * length)
}

fn mirror(p: (f64, f64)) -> (f64, f64) {
    (1.0 - p.0, p.1)
}

fn kp(name: LandmarkName, p: (f64, f64), score: f64) -> Keypoint {
    Keypoint::new(name, p.0, p.1, score)
}

/// Standing/squatting body with both knees at `knee_angle` and hips at `hip_y`
pub fn squat_frame(hip_y: f64, knee_angle: f64) -> Pose {
    legs_frame(hip_y, knee_angle, knee_angle)
}

/// Legs with independent knee angles (left, right)
pub fn legs_frame(hip_y: f64, left_knee: f64, right_knee: f64) -> Pose {
    use LandmarkName::*;

    let hip = (0.45, hip_y);
    let knee = (0.45, hip_y + 0.2);
    let left_ankle = bend(hip, knee, left_knee, 0.2);
    let right_ankle = mirror(bend(hip, knee, right_knee, 0.2));

    Pose::new(vec![
        kp(LeftShoulder, (0.45, hip_y - 0.25), SCORE),
        kp(RightShoulder, (0.55, hip_y - 0.25), SCORE),
        kp(LeftHip, hip, SCORE),
        kp(RightHip, mirror(hip), SCORE),
        kp(LeftKnee, knee, SCORE),
        kp(RightKnee, mirror(knee), SCORE),
        kp(LeftAnkle, left_ankle, SCORE),
        kp(RightAnkle, right_ankle, SCORE),
    ])
}

/// Same body in pixel coordinates, `height` pixels per unit on both axes
pub fn to_pixels(pose: Pose, height: f64) -> Pose {
    Pose::new(
        pose.keypoints
            .into_iter()
            .map(|k| Keypoint {
                x: k.x * height,
                y: k.y * height,
                ..k
            })
            .collect(),
    )
}

/// Same body with every score on `names` replaced
pub fn with_score(pose: Pose, names: &[LandmarkName], score: f64) -> Pose {
    Pose::new(
        pose.keypoints
            .into_iter()
            .map(|k| if names.contains(&k.name) { Keypoint { score: Some(score), ..k } } else { k })
            .collect(),
    )
}

/// Camera framing for push-up frames
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum View {
    /// Arms flare outward in the image
    Frontal,
    /// Upper arm hangs straight down; the arm is nearly vertical when extended
    Side,
}

/// Push-up frame with both elbows at `elbow_angle`
pub fn push_up_frame(elbow_angle: f64, view: View) -> Pose {
    arms_frame(elbow_angle, elbow_angle, view)
}

/// Push-up frame with independent elbow angles (left, right)
pub fn arms_frame(left_elbow: f64, right_elbow: f64, view: View) -> Pose {
    use LandmarkName::*;

    let shoulder = (0.40, 0.40);
    let elbow = match view {
        View::Frontal => (0.31, 0.52),
        View::Side => (0.40, 0.55),
    };
    let left_wrist = bend(shoulder, elbow, left_elbow, 0.15);
    let right_wrist = mirror(bend(shoulder, elbow, right_elbow, 0.15));
    let left_score = if view == View::Side { 0.6 } else { SCORE };

    Pose::new(vec![
        kp(LeftShoulder, shoulder, left_score),
        kp(LeftElbow, elbow, left_score),
        kp(LeftWrist, left_wrist, left_score),
        kp(RightShoulder, mirror(shoulder), SCORE),
        kp(RightElbow, mirror(elbow), SCORE),
        kp(RightWrist, right_wrist, SCORE),
    ])
}

/// Engine on a manual clock, with the clock handle kept by the test
pub fn engine(exercise: ExerciseType) -> (RepEngine, ManualClock) {
    engine_with(exercise, EngineConfig::default())
}

pub fn engine_with(exercise: ExerciseType, config: EngineConfig) -> (RepEngine, ManualClock) {
    let clock = ManualClock::new();
    let mut engine = RepEngine::with_clock(config, clock.clone()).unwrap();
    engine.set_exercise_type(exercise);
    (engine, clock)
}

/// Feed frames `dt` apart, passing each result's count back in like a session would
pub fn feed(
    engine: &mut RepEngine,
    clock: &ManualClock,
    frames: &[Pose],
    dt: Duration,
    count: &mut u32,
) -> Vec<AnalysisResult> {
    frames
        .iter()
        .map(|pose| {
            clock.advance(dt);
            let result = engine.analyze(pose, *count, None);
            *count = result.count;
            result
        })
        .collect()
}

/// Five frames standing at hip 0.30, knees at 175°
pub fn squat_rest() -> Vec<Pose> {
    (0..5).map(|_| squat_frame(0.30, 175.0)).collect()
}

/// Ten frames descending to hip 0.40 / knee 120°, five frames back to standing
pub fn squat_cycle() -> Vec<Pose> {
    let mut frames: Vec<Pose> = (1..=10)
        .map(|i| squat_frame(0.30 + 0.01 * i as f64, 175.0 - 5.5 * i as f64))
        .collect();
    frames.extend((0..5).map(|_| squat_frame(0.30, 175.0)));
    frames
}

pub fn completions(results: &[AnalysisResult]) -> usize {
    results.iter().filter(|r| r.is_complete).count()
}
