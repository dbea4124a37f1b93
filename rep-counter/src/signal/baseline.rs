//! Rest-posture baseline calibration
//!
//! Learns what "rest" looks like for this user and camera framing (standing
//! hip height, extended elbow angle) without a calibration screen.
//! The first baseline is committed once a few held samples agree; after that
//! it drifts slowly toward the current rest value, but only while the user
//! is holding still at rest. It is never written mid-rep.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Samples kept for the initial calibration
const CALIBRATION_WINDOW: usize = 5;

/// Fewest samples that can commit the initial baseline
pub const MIN_CALIBRATION_SAMPLES: usize = 3;

/// Calibration gates, in units of the tracked signal
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaselineTuning {
    /// Max variance of the calibration samples for the first commit
    pub variance_epsilon: f64,
    /// Max frame-to-frame change that still counts as holding still
    pub stability_epsilon: f64,
    /// Stable frames required before the baseline starts to drift
    pub stable_streak: u32,
    /// Fraction of the gap closed per stable frame
    pub blend: f64,
}

impl BaselineTuning {
    /// Normalized vertical coordinate (hip height)
    pub fn for_coordinate() -> Self {
        Self {
            variance_epsilon: 1e-4,
            stability_epsilon: 0.005,
            stable_streak: 3,
            blend: 0.05,
        }
    }

    /// Joint angle in degrees
    pub fn for_angle() -> Self {
        Self {
            variance_epsilon: 4.0,
            stability_epsilon: 2.0,
            stable_streak: 3,
            blend: 0.05,
        }
    }
}

impl Default for BaselineTuning {
    fn default() -> Self {
        Self::for_coordinate()
    }
}

/// Tracks the rest-posture reference value of one signal
#[derive(Clone, Debug)]
pub struct BaselineCalibrator {
    tuning: BaselineTuning,
    /// Committed rest value
    baseline: Option<f64>,
    /// Pending smoothed samples before the first commit
    samples: VecDeque<f64>,
    /// Previous raw sample, for the stability check
    last_raw: Option<f64>,
    /// Consecutive frames within `stability_epsilon`
    stable_frames: u32,
}

impl BaselineCalibrator {
    pub fn new(tuning: BaselineTuning) -> Self {
        Self {
            tuning,
            baseline: None,
            samples: VecDeque::with_capacity(CALIBRATION_WINDOW + 1),
            last_raw: None,
            stable_frames: 0,
        }
    }

    pub fn baseline(&self) -> Option<f64> {
        self.baseline
    }

    pub fn is_calibrated(&self) -> bool {
        self.baseline.is_some()
    }

    pub fn stable_frames(&self) -> u32 {
        self.stable_frames
    }

    /// Absolute distance of `value` from the baseline
    pub fn deviation(&self, value: f64) -> Option<f64> {
        self.baseline.map(|b| (value - b).abs())
    }

    /// Feed one frame. Returns true if the baseline was written.
    ///
    /// Outside rest the baseline is frozen and the stability streak restarts,
    /// so drift can only resume after a fresh held pose.
    pub fn observe(&mut self, raw: f64, smoothed: f64, at_rest: bool) -> bool {
        if !at_rest {
            self.interrupt();
            return false;
        }

        let Some(current) = self.baseline else {
            self.last_raw = Some(raw);
            return self.try_initial_commit(smoothed);
        };

        let held = self
            .last_raw
            .map_or(false, |prev| (raw - prev).abs() < self.tuning.stability_epsilon);
        self.last_raw = Some(raw);

        if !held {
            self.stable_frames = 0;
            return false;
        }

        self.stable_frames += 1;
        if self.stable_frames <= self.tuning.stable_streak {
            return false;
        }

        self.baseline = Some(current + (smoothed - current) * self.tuning.blend);
        true
    }

    /// Restart the stability streak without writing anything
    pub fn interrupt(&mut self) {
        self.last_raw = None;
        self.stable_frames = 0;
    }

    fn try_initial_commit(&mut self, smoothed: f64) -> bool {
        self.samples.push_back(smoothed);
        if self.samples.len() > CALIBRATION_WINDOW {
            self.samples.pop_front();
        }
        if self.samples.len() < MIN_CALIBRATION_SAMPLES {
            return false;
        }

        let n = self.samples.len() as f64;
        let mean = self.samples.iter().sum::<f64>() / n;
        let variance = self.samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n;

        if variance >= self.tuning.variance_epsilon {
            return false;
        }

        self.baseline = Some(mean);
        self.samples.clear();
        true
    }

    pub fn reset(&mut self) {
        self.baseline = None;
        self.samples.clear();
        self.last_raw = None;
        self.stable_frames = 0;
    }
}

impl Default for BaselineCalibrator {
    fn default() -> Self {
        Self::new(BaselineTuning::default())
    }
}
