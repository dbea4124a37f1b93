//! Engine configuration
//!
//! Everything tunable lives here: the smoothing window, the debounce floor,
//! the trace sampling rate and one geometry descriptor per exercise.
//! Missing fields fall back to the defaults, so the session layer can send
//! a partial object.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::counter::ExerciseGeometry;
use crate::error::{EngineError, EngineResult};
use crate::exercise::ExerciseType;
use crate::signal::DEFAULT_WINDOW;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Samples averaged before any threshold comparison
    pub smoothing_window: usize,
    /// Minimum time between two accepted reps
    pub debounce_ms: u64,
    /// Trace every N-th frame at debug level (0 = off)
    pub log_sample_every: u32,
    pub squat: ExerciseGeometry,
    pub push_up: ExerciseGeometry,
    pub lunge: ExerciseGeometry,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            smoothing_window: DEFAULT_WINDOW,
            debounce_ms: 500,
            log_sample_every: 0,
            squat: ExerciseGeometry::squat(),
            push_up: ExerciseGeometry::push_up(),
            lunge: ExerciseGeometry::lunge(),
        }
    }
}

impl EngineConfig {
    pub fn geometry(&self, exercise: ExerciseType) -> &ExerciseGeometry {
        match exercise {
            ExerciseType::Squat => &self.squat,
            ExerciseType::PushUp => &self.push_up,
            ExerciseType::Lunge => &self.lunge,
        }
    }

    pub fn debounce_interval(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn validate(&self) -> EngineResult<()> {
        if self.smoothing_window == 0 {
            return Err(EngineError::config("smoothingWindow", "must be at least 1"));
        }
        self.squat.validate("squat")?;
        self.push_up.validate("pushUp")?;
        self.lunge.validate("lunge")?;
        Ok(())
    }
}
