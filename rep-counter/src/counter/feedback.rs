//! Coaching cues shown to the user

use crate::exercise::ExerciseType;

/// What the counter wants to tell the user this frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    /// No body detected
    NoPose,
    /// Body detected but the measured joints are missing or low confidence
    OutOfFrame,
    /// At rest, still learning the rest posture
    Calibrating,
    /// At rest and calibrated; nothing to say
    Ready,
    /// In a rep, not deep enough yet
    GoDeeper,
    /// In a rep, deep enough to count
    GoodDepth,
    RepCounted,
    /// Returned to rest without reaching the quality bar
    TooShallow,
    /// Rep rejected by the debounce guard
    TooFast,
}

impl Cue {
    /// Text for this cue, None when the UI should stay quiet
    pub fn text(&self, exercise: ExerciseType) -> Option<&'static str> {
        use ExerciseType::*;

        let text = match (self, exercise) {
            (Cue::NoPose, _) => "Step into the camera view",
            (Cue::OutOfFrame, PushUp) => "Keep your arms in view",
            (Cue::OutOfFrame, _) => "Make sure your hips, knees and ankles are visible",
            (Cue::Calibrating, _) => "Hold still for a moment",
            (Cue::Ready, _) => return None,
            (Cue::GoDeeper, Squat) => "Lower your hips a bit more",
            (Cue::GoDeeper, PushUp) => "Lower your chest further",
            (Cue::GoDeeper, Lunge) => "Bend your front knee more",
            (Cue::GoodDepth, Squat | Lunge) => "Good depth, now drive up",
            (Cue::GoodDepth, PushUp) => "Good depth, push up",
            (Cue::RepCounted, _) => "Nice rep!",
            (Cue::TooShallow, PushUp) => "Go lower to count that push-up",
            (Cue::TooShallow, _) => "Go lower to count that rep",
            (Cue::TooFast, _) => "Slow down, control the movement",
        };
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ready_is_quiet() {
        for exercise in ExerciseType::ALL {
            assert_eq!(Cue::Ready.text(exercise), None);
            assert!(Cue::RepCounted.text(exercise).is_some());
        }
    }

    #[test]
    fn test_exercise_specific_text() {
        assert_ne!(
            Cue::GoDeeper.text(ExerciseType::Squat),
            Cue::GoDeeper.text(ExerciseType::PushUp)
        );
    }
}
