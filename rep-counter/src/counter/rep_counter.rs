//! Per-session repetition counter
//!
//! One instance per exercise per session. Each frame:
//! pose → joint angles → smoothing → baseline deviation → hysteresis
//! transition → quality bar → debounce → result.

use std::time::Duration;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::debounce::DebounceGuard;
use super::feedback::Cue;
use super::geometry::{BaselineSource, ExerciseGeometry, Thresholds};
use super::machine::{DwellTracker, FrameSignal, HysteresisMachine, Transition};
use super::snapshot::CounterSnapshot;
use super::state::{ExerciseState, Phase};
use crate::config::EngineConfig;
use crate::exercise::ExerciseType;
use crate::logging::{LogSampler, LOG_TARGET};
use crate::pose::{
    chain_visibility, find_keypoint, horizontal_spread_ratio, joint_angle, normalize_coordinate,
    Pose,
};
use crate::signal::{BaselineCalibrator, SampleSmoother};

/// Per-frame output handed back to the session layer
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Running total for the session
    pub count: u32,
    /// True only on the frame a rep is accepted
    pub is_complete: bool,
    /// Depth of the current (or just finished) rep, 0-100
    pub depth: u32,
    /// Smoothed angle of the most flexed measured joint, degrees
    pub angle: u32,
    pub state: ExerciseState,
    pub feedback: Option<String>,
}

/// Result plus the counter's internal state after the frame
#[derive(Clone, Debug, PartialEq)]
pub struct Analysis {
    pub result: AnalysisResult,
    pub snapshot: CounterSnapshot,
}

/// One measured joint this frame
struct ChainReading {
    raw: f64,
    smoothed: f64,
    visibility: f64,
    spread: Option<f64>,
}

pub struct RepCounter {
    exercise: ExerciseType,
    geometry: ExerciseGeometry,
    /// One smoother per joint chain
    chain_smoothers: Vec<SampleSmoother>,
    /// Smoother for a coordinate baseline signal
    coordinate_smoother: SampleSmoother,
    calibrator: BaselineCalibrator,
    machine: HysteresisMachine,
    debounce: DebounceGuard,
    sampler: LogSampler,
    count: u32,
    side_view: bool,
}

impl RepCounter {
    pub fn new(exercise: ExerciseType, config: &EngineConfig) -> Self {
        let geometry = config.geometry(exercise).clone();
        let window = config.smoothing_window;
        Self {
            exercise,
            chain_smoothers: geometry.chains.iter().map(|_| SampleSmoother::new(window)).collect(),
            coordinate_smoother: SampleSmoother::new(window),
            calibrator: BaselineCalibrator::new(geometry.baseline.clone()),
            machine: HysteresisMachine::new(),
            debounce: DebounceGuard::new(config.debounce_interval()),
            sampler: LogSampler::new(config.log_sample_every),
            count: 0,
            side_view: false,
            geometry,
        }
    }

    pub fn exercise(&self) -> ExerciseType {
        self.exercise
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn phase(&self) -> Phase {
        self.machine.phase()
    }

    pub fn baseline(&self) -> Option<f64> {
        self.calibrator.baseline()
    }

    /// Analyze one frame. `now` is the monotonic frame time.
    pub fn analyze(
        &mut self,
        pose: &Pose,
        current_count: u32,
        video_height: Option<u32>,
        now: Duration,
    ) -> AnalysisResult {
        // The caller may have persisted a higher count (resumed set)
        self.count = self.count.max(current_count);
        let trace = self.sampler.tick();

        if pose.is_empty() {
            return self.neutral(Cue::NoPose);
        }

        let readings = self.read_chains(pose);
        if readings.is_empty() {
            if trace {
                debug!(target: LOG_TARGET, "{}: required landmarks missing or below score floor", self.exercise);
            }
            return self.neutral(Cue::OutOfFrame);
        }

        let selected = self.select_view(&readings);
        let flexion = selected.iter().map(|r| r.smoothed).fold(f64::INFINITY, f64::min);
        let raw_flexion = selected.iter().map(|r| r.raw).fold(f64::INFINITY, f64::min);

        let sample = self.baseline_sample(pose, video_height, raw_flexion, flexion);
        let deviation = sample.and_then(|(_, smoothed)| self.calibrator.deviation(smoothed));

        let thresholds = self.geometry.active_thresholds(self.side_view);
        let signal = FrameSignal { flexion, deviation };
        let transition = self.machine.step(&signal, &thresholds);

        // Calibrate against the post-transition phase so a Flexed frame never writes
        let at_rest = self.machine.phase() == Phase::Rest;
        match sample {
            Some((raw, smoothed)) => {
                self.calibrator.observe(raw, smoothed, at_rest);
            }
            None if !at_rest => self.calibrator.interrupt(),
            None => {}
        }

        let (is_complete, depth, cue) = match transition {
            Transition::Exited(dwell) => self.finish_dwell(&dwell, &thresholds, now),
            Transition::Entered | Transition::Stay if !at_rest => {
                let dwell = self.machine.dwell();
                let cue = if dwell.meets_quality(&thresholds) {
                    Cue::GoodDepth
                } else {
                    Cue::GoDeeper
                };
                (false, self.depth_percent(dwell.peak_deviation()), cue)
            }
            _ => {
                let cue = if self.calibrator.is_calibrated() {
                    Cue::Ready
                } else {
                    Cue::Calibrating
                };
                (false, 0, cue)
            }
        };

        if trace {
            debug!(
                target: LOG_TARGET,
                "{} frame={} phase={:?} flexion={:.1} deviation={:?} baseline={:?} side_view={} count={}",
                self.exercise,
                self.sampler.frames(),
                self.machine.phase(),
                flexion,
                deviation,
                self.calibrator.baseline(),
                self.side_view,
                self.count,
            );
        }

        AnalysisResult {
            count: self.count,
            is_complete,
            depth,
            angle: flexion.round().clamp(0.0, 180.0) as u32,
            state: self.geometry.state_for(self.machine.phase()),
            feedback: cue.text(self.exercise).map(str::to_string),
        }
    }

    /// Analyze and return the internal state alongside the result
    pub fn analyze_detailed(
        &mut self,
        pose: &Pose,
        current_count: u32,
        video_height: Option<u32>,
        now: Duration,
    ) -> Analysis {
        let result = self.analyze(pose, current_count, video_height, now);
        Analysis {
            result,
            snapshot: self.snapshot(),
        }
    }

    pub fn snapshot(&self) -> CounterSnapshot {
        let dwell = self.machine.dwell();
        CounterSnapshot {
            exercise: self.exercise,
            phase: self.machine.phase(),
            state: self.geometry.state_for(self.machine.phase()),
            count: self.count,
            baseline: self.calibrator.baseline(),
            thresholds: self.geometry.active_thresholds(self.side_view),
            side_view: self.side_view,
            dwell_min_angle: dwell.min_angle(),
            dwell_peak_deviation: dwell.peak_deviation(),
            stable_frames: self.calibrator.stable_frames(),
            last_accepted_ms: self.debounce.last_accepted().map(|t| t.as_millis() as u64),
            frames: self.sampler.frames(),
        }
    }

    /// Drop all session state: smoothing, calibration, dwell, debounce and count
    pub fn reset(&mut self) {
        for smoother in &mut self.chain_smoothers {
            smoother.clear();
        }
        self.coordinate_smoother.clear();
        self.calibrator.reset();
        self.machine.reset();
        self.debounce.reset();
        self.sampler.reset();
        self.count = 0;
        self.side_view = false;
    }

    // ========================================================================
    // FRAME STAGES
    // ========================================================================

    fn read_chains(&mut self, pose: &Pose) -> Vec<ChainReading> {
        let min_score = self.geometry.min_score;
        let mut readings = Vec::with_capacity(self.geometry.chains.len());

        for (chain, smoother) in self.geometry.chains.iter().zip(self.chain_smoothers.iter_mut()) {
            let parent = find_keypoint(&pose.keypoints, chain.parent, min_score);
            let joint = find_keypoint(&pose.keypoints, chain.joint, min_score);
            let child = find_keypoint(&pose.keypoints, chain.child, min_score);
            let (Some(a), Some(b), Some(c)) = (parent, joint, child) else {
                continue;
            };

            let raw = joint_angle(a.position(), b.position(), c.position());
            readings.push(ChainReading {
                raw,
                smoothed: smoother.push(raw),
                visibility: chain_visibility(&[a, b, c]),
                spread: horizontal_spread_ratio(&[a.position(), b.position(), c.position()]),
            });
        }

        readings
    }

    /// Side-on: keep only the most visible chain. Otherwise keep all.
    ///
    /// The view is only classified at rest with every limb nearly straight,
    /// then held; a bending arm always spreads horizontally.
    fn select_view<'r>(&mut self, readings: &'r [ChainReading]) -> Vec<&'r ChainReading> {
        if let Some(view) = &self.geometry.view_classifier {
            let extended = readings.iter().all(|r| r.raw > view.min_extension);
            if self.machine.phase() == Phase::Rest && extended {
                self.side_view = readings
                    .iter()
                    .all(|r| r.spread.map_or(false, |s| s < view.max_spread_ratio));
            }
        }

        if self.side_view {
            readings
                .iter()
                .max_by(|a, b| a.visibility.total_cmp(&b.visibility))
                .into_iter()
                .collect()
        } else {
            readings.iter().collect()
        }
    }

    /// (raw, smoothed) value of the baseline signal, None if unavailable this frame
    fn baseline_sample(
        &mut self,
        pose: &Pose,
        video_height: Option<u32>,
        raw_flexion: f64,
        flexion: f64,
    ) -> Option<(f64, f64)> {
        match &self.geometry.baseline_source {
            BaselineSource::FlexionAngle => Some((raw_flexion, flexion)),
            BaselineSource::Coordinate { landmarks } => {
                let ys = landmarks
                    .iter()
                    .filter_map(|name| find_keypoint(&pose.keypoints, *name, self.geometry.min_score))
                    .map(|kp| normalize_coordinate(kp.y, video_height))
                    .collect::<Option<Vec<f64>>>()?;
                if ys.is_empty() {
                    return None;
                }
                let raw = ys.iter().sum::<f64>() / ys.len() as f64;
                Some((raw, self.coordinate_smoother.push(raw)))
            }
        }
    }

    fn finish_dwell(&mut self, dwell: &DwellTracker, thresholds: &Thresholds, now: Duration) -> (bool, u32, Cue) {
        let depth = self.depth_percent(dwell.peak_deviation());

        if !dwell.meets_quality(thresholds) {
            debug!(
                target: LOG_TARGET,
                "{}: shallow rep dropped (min angle {:?}, peak deviation {:?})",
                self.exercise,
                dwell.min_angle(),
                dwell.peak_deviation(),
            );
            return (false, depth, Cue::TooShallow);
        }

        if !self.debounce.try_accept(now) {
            debug!(
                target: LOG_TARGET,
                "{}: rep rejected, less than {:?} since the last one",
                self.exercise,
                self.debounce.min_interval(),
            );
            return (false, depth, Cue::TooFast);
        }

        self.count = self.count.saturating_add(1);
        info!(
            target: LOG_TARGET,
            "{}: rep {} counted (depth {}%, min angle {:.0})",
            self.exercise,
            self.count,
            depth,
            dwell.min_angle().unwrap_or(0.0),
        );
        (true, depth, Cue::RepCounted)
    }

    fn depth_percent(&self, peak: Option<f64>) -> u32 {
        peak.map_or(0, |p| (p / self.geometry.full_range * 100.0).round().clamp(0.0, 100.0) as u32)
    }

    fn neutral(&self, cue: Cue) -> AnalysisResult {
        AnalysisResult {
            count: self.count,
            is_complete: false,
            depth: 0,
            angle: 0,
            state: self.geometry.rest_state,
            feedback: cue.text(self.exercise).map(str::to_string),
        }
    }
}
