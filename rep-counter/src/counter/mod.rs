//! Counter module - generic hysteresis rep counter and its parts
//!
//! Re-exports only. All logic in submodules.

mod debounce;
mod feedback;
mod geometry;
mod machine;
mod rep_counter;
mod snapshot;
mod state;

pub use debounce::{DebounceGuard, DEFAULT_DEBOUNCE};
pub use feedback::Cue;
pub use geometry::{BaselineSource, ExerciseGeometry, JointChain, Thresholds, ViewClassifier};
pub use machine::{DwellTracker, FrameSignal, HysteresisMachine, Transition};
pub use rep_counter::{Analysis, AnalysisResult, RepCounter};
pub use snapshot::CounterSnapshot;
pub use state::{ExerciseState, Phase};
