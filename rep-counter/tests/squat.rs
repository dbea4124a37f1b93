//! Squat counting through the public engine API

mod common;

use std::time::Duration;

use common::*;
use rep_counter::counter::Cue;
use rep_counter::{ExerciseState, ExerciseType, LandmarkName, Phase, Pose};

#[test]
fn test_one_clean_squat_counts_once() {
    let (mut engine, clock) = engine(ExerciseType::Squat);
    let mut count = 0;

    let rest = feed(&mut engine, &clock, &squat_rest(), FRAME, &mut count);
    assert!(rest.iter().all(|r| r.state == ExerciseState::Standing && !r.is_complete));
    assert!((engine.snapshot().baseline.unwrap() - 0.30).abs() < 1e-9);

    let cycle = feed(&mut engine, &clock, &squat_cycle(), FRAME, &mut count);
    assert_eq!(completions(&cycle), 1);
    assert_eq!(count, 1);

    // Smoothed knee angle crosses 160° on the 5th descent frame
    assert_eq!(cycle[3].state, ExerciseState::Standing);
    assert_eq!(cycle[4].state, ExerciseState::Down);

    // The rep lands on the last return frame, once the window is back above 165°
    let done = &cycle[14];
    assert!(done.is_complete);
    assert_eq!(done.state, ExerciseState::Standing);
    assert_eq!(done.depth, 40);
    assert_eq!(done.angle, 175);
    assert_eq!(done.feedback.as_deref(), Cue::RepCounted.text(ExerciseType::Squat));

    // Deep at the bottom of the descent
    assert_eq!(cycle[9].feedback.as_deref(), Cue::GoodDepth.text(ExerciseType::Squat));
    assert!(cycle[..14].iter().all(|r| r.count == 0));
}

#[test]
fn test_shallow_squat_is_not_counted() {
    let (mut engine, clock) = engine(ExerciseType::Squat);
    let mut count = 0;
    feed(&mut engine, &clock, &squat_rest(), FRAME, &mut count);

    let mut frames: Vec<Pose> = (1..=10)
        .map(|i| squat_frame(0.30 + 0.003 * i as f64, 175.0 - 2.5 * i as f64))
        .collect();
    frames.extend((0..5).map(|_| squat_frame(0.30, 175.0)));

    let results = feed(&mut engine, &clock, &frames, FRAME, &mut count);
    assert!(results.iter().any(|r| r.state == ExerciseState::Down));
    assert_eq!(completions(&results), 0);
    assert_eq!(count, 0);

    let text = Cue::TooShallow.text(ExerciseType::Squat);
    assert_eq!(results.iter().filter(|r| r.feedback.as_deref() == text).count(), 1);
    assert_eq!(engine.snapshot().phase, Phase::Rest);
}

#[test]
fn test_second_rep_inside_debounce_window_is_dropped() {
    let (mut engine, clock) = engine(ExerciseType::Squat);
    let mut count = 0;
    let step = Duration::from_millis(1);

    feed(&mut engine, &clock, &squat_rest(), step, &mut count);
    let first = feed(&mut engine, &clock, &squat_cycle(), step, &mut count);
    assert_eq!(completions(&first), 1);

    let second = feed(&mut engine, &clock, &squat_cycle(), step, &mut count);
    assert_eq!(completions(&second), 0);
    assert_eq!(second[14].feedback.as_deref(), Cue::TooFast.text(ExerciseType::Squat));
    assert_eq!(count, 1);

    clock.advance(Duration::from_millis(600));
    let third = feed(&mut engine, &clock, &squat_cycle(), step, &mut count);
    assert_eq!(completions(&third), 1);
    assert_eq!(count, 2);
}

#[test]
fn test_baseline_frozen_while_flexed() {
    let (mut engine, clock) = engine(ExerciseType::Squat);
    let mut count = 0;
    feed(&mut engine, &clock, &squat_rest(), FRAME, &mut count);
    let calibrated = engine.snapshot().baseline;
    assert!(calibrated.is_some());

    let mut flexed_frames = 0;
    for pose in squat_cycle() {
        clock.advance(FRAME);
        let analysis = engine.analyze_detailed(&pose, count, None);
        count = analysis.result.count;
        if analysis.snapshot.phase == Phase::Flexed {
            flexed_frames += 1;
            assert_eq!(analysis.snapshot.baseline, calibrated);
            assert_eq!(analysis.snapshot.stable_frames, 0);
        }
    }
    assert!(flexed_frames > 0);
}

#[test]
fn test_pixel_coordinates_with_known_height() {
    let (mut engine, clock) = engine(ExerciseType::Squat);
    let mut count = 0;

    let frames: Vec<Pose> = squat_rest()
        .into_iter()
        .chain(squat_cycle())
        .map(|pose| to_pixels(pose, 480.0))
        .collect();
    for pose in &frames {
        clock.advance(FRAME);
        count = engine.analyze(pose, count, Some(480)).count;
    }

    assert_eq!(count, 1);
    assert!((engine.snapshot().baseline.unwrap() - 0.30).abs() < 1e-9);
}

#[test]
fn test_pixel_coordinates_without_height_count_by_angle() {
    let (mut engine, clock) = engine(ExerciseType::Squat);
    let mut count = 0;

    let frames: Vec<Pose> = squat_rest()
        .into_iter()
        .chain(squat_cycle())
        .map(|pose| to_pixels(pose, 480.0))
        .collect();
    let results = feed(&mut engine, &clock, &frames, FRAME, &mut count);

    // Hip height is unusable, so there is no baseline and no depth
    assert_eq!(count, 1);
    assert_eq!(engine.snapshot().baseline, None);
    assert!(results.iter().all(|r| r.depth == 0));
}

#[test]
fn test_low_confidence_legs_give_neutral_result() {
    let (mut engine, clock) = engine(ExerciseType::Squat);
    let mut count = 0;
    feed(&mut engine, &clock, &squat_rest(), FRAME, &mut count);

    let knees = [LandmarkName::LeftKnee, LandmarkName::RightKnee];
    // The floor is exclusive: a score equal to it is rejected
    let pose = with_score(squat_frame(0.40, 120.0), &knees, 0.3);
    clock.advance(FRAME);
    let result = engine.analyze(&pose, 0, None);

    assert_eq!(result.state, ExerciseState::Standing);
    assert_eq!(result.angle, 0);
    assert_eq!(result.depth, 0);
    assert!(!result.is_complete);
    assert_eq!(result.feedback.as_deref(), Cue::OutOfFrame.text(ExerciseType::Squat));
    assert_eq!(engine.snapshot().phase, Phase::Rest);
}

#[test]
fn test_one_visible_leg_is_enough() {
    let (mut engine, clock) = engine(ExerciseType::Squat);
    let mut count = 0;

    let right = [LandmarkName::RightHip, LandmarkName::RightKnee, LandmarkName::RightAnkle];
    let frames: Vec<Pose> = squat_rest()
        .into_iter()
        .chain(squat_cycle())
        .map(|pose| with_score(pose, &right, 0.1))
        .collect();
    feed(&mut engine, &clock, &frames, FRAME, &mut count);

    assert_eq!(count, 1);
}
