//! Counter introspection for tests and debug overlays

use serde::Serialize;

use super::geometry::Thresholds;
use super::state::{ExerciseState, Phase};
use crate::exercise::ExerciseType;

/// Internal state of one counter after the latest frame
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterSnapshot {
    pub exercise: ExerciseType,
    pub phase: Phase,
    pub state: ExerciseState,
    pub count: u32,
    /// Rest reference value, None until calibrated
    pub baseline: Option<f64>,
    /// Thresholds in effect (relaxed when side-on)
    pub thresholds: Thresholds,
    pub side_view: bool,
    pub dwell_min_angle: Option<f64>,
    pub dwell_peak_deviation: Option<f64>,
    /// Consecutive held frames toward the next baseline drift
    pub stable_frames: u32,
    /// Timestamp of the last accepted rep in milliseconds
    pub last_accepted_ms: Option<u64>,
    pub frames: u64,
}

impl CounterSnapshot {
    /// One-line summary for a debug overlay
    pub fn overlay_text(&self) -> String {
        format!(
            "{} {:?} #{} | base {} | band {:.0}°/{:.0}°{} | min {} | peak {}",
            self.exercise,
            self.phase,
            self.count,
            fmt_opt(self.baseline, 3),
            self.thresholds.enter_angle,
            self.thresholds.exit_angle,
            if self.side_view { " side" } else { "" },
            fmt_opt(self.dwell_min_angle, 0),
            fmt_opt(self.dwell_peak_deviation, 3),
        )
    }
}

fn fmt_opt(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", precision, v),
        None => "-".to_string(),
    }
}
