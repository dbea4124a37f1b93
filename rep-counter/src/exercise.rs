//! Exercise type tags
//!
//! The tag selects a geometry descriptor and a cached counter; there is no
//! per-exercise type hierarchy.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Supported exercises
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseType {
    Squat,
    PushUp,
    Lunge,
}

impl ExerciseType {
    pub const ALL: [ExerciseType; 3] = [ExerciseType::Squat, ExerciseType::PushUp, ExerciseType::Lunge];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseType::Squat => "squat",
            ExerciseType::PushUp => "pushup",
            ExerciseType::Lunge => "lunge",
        }
    }
}

impl fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExerciseType {
    type Err = EngineError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "squat" | "squats" => Ok(ExerciseType::Squat),
            "pushup" | "push-up" | "push_up" | "pushups" => Ok(ExerciseType::PushUp),
            "lunge" | "lunges" => Ok(ExerciseType::Lunge),
            _ => Err(EngineError::UnknownExercise {
                tag: tag.to_string(),
            }),
        }
    }
}
