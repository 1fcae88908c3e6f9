//! Integration tests for classification
//!
//! Tests the path: frame → primary hand / face → classifiers → debounce

mod common;

use std::time::Duration;

use common::{face, hand, panic_face, pointing_hand, temp_log_path, Palm};
use safemesh::config::{DebounceConfig, SafeMeshConfig};
use safemesh::core::{
    AlertLog, DebounceState, Dispatcher, ExpressionClassifier, FramePipeline, GestureClassifier,
    ManualClock,
};
use safemesh::types::{Detection, FaceLandmarks, Frame, HandLandmarks, Landmark, Severity};

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

/// Every combination of the four non-thumb digits raised, with any thumb
#[test]
fn test_four_raised_fingers_always_need_help() {
    let classifier = GestureClassifier::default();
    let clock = ManualClock::default();

    for palm in [Palm::Positive, Palm::Negative] {
        for thumb in [true, false] {
            let mut state = DebounceState::new();
            let detection = classifier.classify(&hand(palm, thumb, true, true, true, true), &mut state, &clock);

            assert_eq!(detection.label, Some("need-help"), "palm={:?} thumb={}", palm, thumb);
            assert_eq!(detection.severity, Severity::Risk);
        }
    }
}

#[test]
fn test_thumbs_up_is_ok_for_both_palms() {
    let classifier = GestureClassifier::default();
    let clock = ManualClock::default();

    for palm in [Palm::Positive, Palm::Negative] {
        let detection = classifier.classify(
            &hand(palm, true, false, false, false, false),
            &mut DebounceState::new(),
            &clock,
        );
        assert_eq!(detection.label, Some("ok"), "palm={:?}", palm);
        assert_eq!(detection.severity, Severity::Info);
    }
}

#[test]
fn test_thumb_direction_depends_on_palm() {
    let classifier = GestureClassifier::default();
    let clock = ManualClock::default();

    // Same thumb-tip geometry under the opposite palm sign reads as folded
    let thumbs_up = hand(Palm::Positive, true, false, false, false, false);
    let mut points: Vec<Landmark> = thumbs_up.clone().into();
    points[2].x = 0.4;
    points[17].x = 0.6;
    let fist = HandLandmarks::try_from(points).unwrap();

    assert_eq!(
        classifier.classify(&thumbs_up, &mut DebounceState::new(), &clock).label,
        Some("ok")
    );
    assert!(classifier.classify(&fist, &mut DebounceState::new(), &clock).is_none());
}

#[test]
fn test_hang_loose_for_both_palms() {
    let classifier = GestureClassifier::default();
    let clock = ManualClock::default();

    for palm in [Palm::Positive, Palm::Negative] {
        let detection = classifier.classify(
            &hand(palm, true, false, false, false, true),
            &mut DebounceState::new(),
            &clock,
        );
        assert_eq!(detection.label, Some("power-restored"), "palm={:?}", palm);
        assert_eq!(detection.severity, Severity::Info);
    }
}

#[test]
fn test_double_tap_fires_once_then_cools_down() {
    let classifier = GestureClassifier::default();
    let mut state = DebounceState::new();
    let clock = ManualClock::new(ms(50_000));
    let point = pointing_hand();

    let first = classifier.classify(&point, &mut state, &clock);
    clock.set(ms(50_300));
    let second = classifier.classify(&point, &mut state, &clock);
    clock.set(ms(50_350));
    let third = classifier.classify(&point, &mut state, &clock);

    assert!(first.is_none());
    assert_eq!(second.label, Some("distress-signal-activated"));
    assert_eq!(second.severity, Severity::Distress);
    assert!(third.is_none());

    // A fresh double tap once the cooldown has passed fires again
    clock.set(ms(52_250));
    assert!(classifier.classify(&point, &mut state, &clock).is_none());
    clock.set(ms(52_400));
    assert_eq!(
        classifier.classify(&point, &mut state, &clock).severity,
        Severity::Distress
    );
}

#[test]
fn test_slow_tapping_never_fires() {
    let classifier = GestureClassifier::default();
    let mut state = DebounceState::new();
    let clock = ManualClock::new(ms(1_000));

    for _ in 0..100 {
        assert!(classifier.classify(&pointing_hand(), &mut state, &clock).is_none());
        clock.advance(ms(600));
    }
    assert_eq!(state.last_confirmed(), None);
}

#[test]
fn test_debounce_window_is_configurable() {
    let classifier = GestureClassifier::new(&DebounceConfig {
        double_tap_window_secs: 1.0,
        cooldown_secs: 2.0,
    });
    let mut state = DebounceState::new();
    let clock = ManualClock::new(ms(1_000));

    classifier.classify(&pointing_hand(), &mut state, &clock);
    clock.advance(ms(600));
    assert!(!classifier.classify(&pointing_hand(), &mut state, &clock).is_none());
}

#[test]
fn test_zero_width_face_is_none() {
    let mut points: Vec<Landmark> = face(0.3, 0.3, 0.3).into();
    points[454].x = points[234].x;
    let degenerate = FaceLandmarks::try_from(points).unwrap();

    assert_eq!(ExpressionClassifier::default().classify(&degenerate), Detection::NONE);
}

#[test]
fn test_panic_expression_is_risk() {
    let detection = ExpressionClassifier::default().classify(&panic_face());
    assert_eq!(detection.label, Some("panic-expression"));
    assert_eq!(detection.severity, Severity::Risk);
}

#[test]
fn test_pipeline_uses_first_hand_and_face_only() {
    let path = temp_log_path("first_subject");
    let dispatcher = Dispatcher::new(AlertLog::new(&path), 4);
    let mut pipeline = FramePipeline::with_clock(&SafeMeshConfig::default(), dispatcher, ManualClock::default());

    let frame = Frame {
        hands: vec![
            hand(Palm::Positive, false, false, false, false, false),
            hand(Palm::Positive, true, true, true, true, true),
        ],
        faces: vec![face(0.0, 0.0, 0.0), panic_face()],
    };
    let report = pipeline.process(&frame);
    std::fs::remove_file(&path).ok();

    assert!(report.is_empty());
    assert!(pipeline.dispatcher().history().is_empty());
}

#[test]
fn test_pipeline_dispatches_both_detections() {
    let path = temp_log_path("both");
    let dispatcher = Dispatcher::new(AlertLog::new(&path), 4);
    let mut pipeline = FramePipeline::with_clock(&SafeMeshConfig::default(), dispatcher, ManualClock::default());

    let frame = Frame {
        hands: vec![hand(Palm::Positive, true, false, false, false, false)],
        faces: vec![panic_face()],
    };
    let report = pipeline.process(&frame);
    let lines = AlertLog::new(&path).read_lines().unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(report.gesture.label, Some("ok"));
    assert_eq!(report.expression.label, Some("panic-expression"));
    let messages: Vec<&str> = pipeline.dispatcher().history().iter().map(|e| e.message.as_str()).collect();
    assert_eq!(messages, vec!["gesture: ok", "expression: panic-expression"]);
    assert_eq!(lines.len(), 2);
    assert_eq!(pipeline.frames_processed(), 1);
}

#[test]
fn test_pipeline_double_tap_across_frames() {
    let path = temp_log_path("tap_frames");
    let dispatcher = Dispatcher::new(AlertLog::new(&path), 4);
    let clock = ManualClock::new(ms(10_000));
    let mut pipeline = FramePipeline::with_clock(&SafeMeshConfig::default(), dispatcher, &clock);

    let frame = Frame {
        hands: vec![pointing_hand()],
        faces: vec![],
    };
    pipeline.process(&frame);
    clock.advance(ms(250));
    let report = pipeline.process(&frame);
    std::fs::remove_file(&path).ok();

    assert_eq!(report.gesture.severity, Severity::Distress);
    assert_eq!(pipeline.debounce_state().last_confirmed(), Some(ms(10_250)));
    assert_eq!(
        pipeline.dispatcher().history()[0].message,
        "gesture: distress-signal-activated"
    );
}

#[test]
fn test_frame_from_json_line() {
    let points: Vec<String> = (0..21)
        .map(|i| {
            // Open palm: every fingertip above its joint
            let y = if [8, 12, 16, 20].contains(&i) { 0.2 } else { 0.5 };
            format!(r#"{{"x":0.5,"y":{},"z":-0.01}}"#, y)
        })
        .collect();
    let line = format!(r#"{{"hands":[[{}]]}}"#, points.join(","));

    let frame = Frame::from_json_line(&line).unwrap();
    let detection = GestureClassifier::default().classify(
        frame.primary_hand().unwrap(),
        &mut DebounceState::new(),
        &ManualClock::default(),
    );
    assert_eq!(detection.label, Some("need-help"));
}
