//! Rep Counter - real-time repetition counting from pose landmarks
//!
//! Turns a noisy ~30Hz stream of body keypoints into exactly-once rep
//! events (squat, push-up, lunge) with a depth metric and coaching text.
//!
//! Module layout:
//! - `pose`: landmark data, confidence gating, joint angles
//! - `signal`: smoothing and rest-posture calibration
//! - `counter`: the generic hysteresis counter and exercise geometry
//! - `dispatch`: tag → counter routing and the `RepEngine` facade
//! - `bridge`: wasm_bindgen session class (wasm32 only)

pub mod clock;
pub mod config;
pub mod counter;
pub mod dispatch;
pub mod error;
pub mod exercise;
pub mod logging;
pub mod pose;
pub mod signal;

#[cfg(target_arch = "wasm32")]
mod bridge;

#[cfg(target_arch = "wasm32")]
pub use bridge::RepSession;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::EngineConfig;
pub use counter::{Analysis, AnalysisResult, CounterSnapshot, ExerciseGeometry, ExerciseState, Phase, RepCounter};
pub use dispatch::{RepEngine, StrategyRegistry};
pub use error::{EngineError, EngineResult};
pub use exercise::ExerciseType;
pub use pose::{Keypoint, LandmarkName, Pose};

// ============================================================================
// WASM ENTRY POINT
// ============================================================================

/// Called automatically when the WASM module loads
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}
