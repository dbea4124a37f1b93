//! Sampled per-frame tracing
//!
//! At ~30 frames per second a trace per frame floods the console, so
//! frame-level debug output goes through a sampler whose rate belongs to
//! the caller's config.

/// Log target for everything emitted by the engine
pub const LOG_TARGET: &str = "rep_counter";

/// Emits on every `every`-th frame; `every == 0` disables sampling
#[derive(Clone, Debug, Default)]
pub struct LogSampler {
    every: u32,
    frames: u64,
}

impl LogSampler {
    pub fn new(every: u32) -> Self {
        Self { every, frames: 0 }
    }

    /// Count one frame, returns true if this frame should be traced
    pub fn tick(&mut self) -> bool {
        self.frames += 1;
        self.every != 0 && self.frames % u64::from(self.every) == 0
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn reset(&mut self) {
        self.frames = 0;
    }
}
