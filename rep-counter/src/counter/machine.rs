//! Two-state hysteresis machine with a dwell extremum tracker
//!
//! Rest → Flexed and Flexed → Rest use different thresholds, so a signal
//! hovering around one boundary can't chatter between states. While
//! Flexed, the deepest point of the attempt is recorded for the quality bar.

use super::geometry::Thresholds;
use super::state::Phase;

/// Smoothed measurements for one frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameSignal {
    /// Most flexed joint angle; drives entry, exit and the dwell minimum
    pub flexion: f64,
    /// Distance of the baseline signal from the rest baseline, if calibrated
    pub deviation: Option<f64>,
}

/// Extremes reached during one dwell
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DwellTracker {
    min_angle: Option<f64>,
    peak_deviation: Option<f64>,
}

impl DwellTracker {
    fn start(signal: &FrameSignal) -> Self {
        Self {
            min_angle: Some(signal.flexion),
            peak_deviation: signal.deviation,
        }
    }

    fn observe(&mut self, signal: &FrameSignal) {
        self.min_angle = Some(self.min_angle.map_or(signal.flexion, |m| m.min(signal.flexion)));
        if let Some(deviation) = signal.deviation {
            self.peak_deviation = Some(self.peak_deviation.map_or(deviation, |p| p.max(deviation)));
        }
    }

    pub fn min_angle(&self) -> Option<f64> {
        self.min_angle
    }

    pub fn peak_deviation(&self) -> Option<f64> {
        self.peak_deviation
    }

    /// Deep enough by angle, or by depth when a depth bar is configured
    pub fn meets_quality(&self, thresholds: &Thresholds) -> bool {
        let by_angle = self.min_angle.map_or(false, |m| m <= thresholds.quality_angle);
        let by_depth = match (thresholds.quality_depth, self.peak_deviation) {
            (Some(bar), Some(peak)) => peak >= bar,
            _ => false,
        };
        by_angle || by_depth
    }
}

/// Result of feeding one frame to the machine
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Transition {
    Stay,
    /// Rest → Flexed this frame
    Entered,
    /// Flexed → Rest this frame, with the finished dwell
    Exited(DwellTracker),
}

#[derive(Clone, Debug, Default)]
pub struct HysteresisMachine {
    phase: Phase,
    dwell: DwellTracker,
}

impl HysteresisMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current dwell (empty while at rest)
    pub fn dwell(&self) -> &DwellTracker {
        &self.dwell
    }

    pub fn step(&mut self, signal: &FrameSignal, thresholds: &Thresholds) -> Transition {
        match self.phase {
            Phase::Rest => {
                let by_angle = signal.flexion < thresholds.enter_angle;
                let by_depth = match (thresholds.enter_depth, signal.deviation) {
                    (Some(limit), Some(deviation)) => deviation > limit,
                    _ => false,
                };
                if by_angle || by_depth {
                    self.phase = Phase::Flexed;
                    self.dwell = DwellTracker::start(signal);
                    Transition::Entered
                } else {
                    Transition::Stay
                }
            }
            Phase::Flexed => {
                self.dwell.observe(signal);

                let extended = signal.flexion > thresholds.exit_angle;
                let risen = match (thresholds.exit_depth, signal.deviation) {
                    (Some(limit), Some(deviation)) => deviation < limit,
                    _ => true,
                };
                if extended && risen {
                    self.phase = Phase::Rest;
                    Transition::Exited(std::mem::take(&mut self.dwell))
                } else {
                    Transition::Stay
                }
            }
        }
    }

    pub fn reset(&mut self) {
        self.phase = Phase::Rest;
        self.dwell = DwellTracker::default();
    }
}
