//! Pose module - landmark data, confidence gating and joint geometry
//!
//! Re-exports only. All logic in submodules.

mod angles;
mod confidence;
mod landmarks;

pub use angles::{horizontal_spread_ratio, joint_angle};
pub use confidence::{chain_visibility, find_keypoint};
pub use landmarks::{normalize_coordinate, Keypoint, LandmarkName, Pose};
