//! Moving-average smoother over the last few samples
//!
//! Single-joint detector noise is large compared to the rep thresholds,
//! so every threshold comparison uses the mean of a short recent window.

use std::collections::VecDeque;

/// Default number of samples in the smoothing window (~170ms at 30Hz)
pub const DEFAULT_WINDOW: usize = 5;

/// Sliding-window mean of a scalar signal
#[derive(Clone, Debug)]
pub struct SampleSmoother {
    /// Ring buffer of recent samples, oldest first
    history: VecDeque<f64>,
    window: usize,
}

impl SampleSmoother {
    pub fn new(window: usize) -> Self {
        let window = window.max(1);
        Self {
            history: VecDeque::with_capacity(window + 1),
            window,
        }
    }

    /// Push a sample, returns the smoothed value
    pub fn push(&mut self, sample: f64) -> f64 {
        self.history.push_back(sample);
        if self.history.len() > self.window {
            self.history.pop_front();
        }
        self.mean()
    }

    /// Current smoothed value, 0.0 when empty
    pub fn mean(&self) -> f64 {
        if self.history.is_empty() {
            return 0.0;
        }
        self.history.iter().sum::<f64>() / self.history.len() as f64
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }
}

impl Default for SampleSmoother {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}
