//! Confidence gate for landmark lookup
//!
//! A keypoint only counts when its detector score clears the per-exercise
//! floor. Keypoints without a score are trusted as-is.

use super::landmarks::{Keypoint, LandmarkName};

/// Find `name` in `set`, rejecting it if its score does not exceed `min_score`
pub fn find_keypoint(set: &[Keypoint], name: LandmarkName, min_score: f64) -> Option<&Keypoint> {
    set.iter()
        .find(|kp| kp.name == name)
        .filter(|kp| kp.score.map_or(true, |score| score > min_score))
}

/// Mean confidence of a set of keypoints (unscored points count as 1.0)
pub fn chain_visibility(points: &[&Keypoint]) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    let total: f64 = points.iter().map(|kp| kp.score.unwrap_or(1.0)).sum();
    total / points.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_set() -> Vec<Keypoint> {
        vec![
            Keypoint::new(LandmarkName::LeftHip, 0.4, 0.3, 0.9),
            Keypoint::new(LandmarkName::RightHip, 0.6, 0.3, 0.1),
            Keypoint {
                name: LandmarkName::LeftKnee,
                x: 0.4,
                y: 0.5,
                z: None,
                score: None,
            },
        ]
    }

    #[test]
    fn test_find_keypoint_respects_floor() {
        let set = sample_set();
        assert!(find_keypoint(&set, LandmarkName::LeftHip, 0.3).is_some());
        assert!(find_keypoint(&set, LandmarkName::RightHip, 0.3).is_none());
        // Floor is exclusive
        assert!(find_keypoint(&set, LandmarkName::LeftHip, 0.9).is_none());
    }

    #[test]
    fn test_unscored_keypoint_is_trusted() {
        let set = sample_set();
        assert!(find_keypoint(&set, LandmarkName::LeftKnee, 0.99).is_some());
        assert!(find_keypoint(&set, LandmarkName::LeftAnkle, 0.0).is_none());
    }

    #[test]
    fn test_chain_visibility() {
        let set = sample_set();
        let points: Vec<&Keypoint> = set.iter().collect();
        assert!((chain_visibility(&points) - (0.9 + 0.1 + 1.0) / 3.0).abs() < 1e-9);
        assert_eq!(chain_visibility(&[]), 0.0);
    }
}
