//! Counter states - the generic machine phase and the per-exercise label

use serde::{Deserialize, Serialize};

/// Phase of the hysteresis machine
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Rest posture (standing, arms extended)
    #[default]
    Rest,
    /// Inside a repetition attempt (a dwell)
    Flexed,
}

/// State label reported to the session layer
///
/// Each exercise uses exactly two of these: squat and lunge report
/// `Standing`/`Down`, push-up reports `Up`/`Down`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseState {
    Standing,
    Up,
    Down,
}
