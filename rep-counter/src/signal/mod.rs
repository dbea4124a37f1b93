//! Signal module - smoothing and rest-posture calibration
//!
//! Re-exports only. All logic in submodules.

mod baseline;
mod smoother;

pub use baseline::{BaselineCalibrator, BaselineTuning, MIN_CALIBRATION_SAMPLES};
pub use smoother::{SampleSmoother, DEFAULT_WINDOW};
