use zoomable_geometry::Point;

use super::TouchScript;
use crate::config::ViewConfiguration;
use crate::nodes::input::gestures::{TapEvent, TapGestureRecognizer};

fn recognizer() -> TapGestureRecognizer {
    TapGestureRecognizer::new(ViewConfiguration::default())
}

#[test]
fn press_then_release_is_a_tap() {
    let mut script = TouchScript::new();
    let mut tap = recognizer();

    let down = tap.on_event(&script.frame(&[(1, 10.0, 10.0, true)]));
    assert_eq!(down.as_slice(), &[TapEvent::Press(Point::new(10.0, 10.0))]);

    let up = script.frame(&[(1, 12.0, 10.0, false)]);
    assert_eq!(tap.on_event(&up).as_slice(), &[TapEvent::Tap(Point::new(12.0, 10.0))]);
    assert!(up.changes[0].is_consumed());
}

#[test]
fn second_tap_in_window_is_a_double_tap() {
    let mut script = TouchScript::new();
    let mut tap = recognizer();

    tap.on_event(&script.frame_at(0, &[(1, 10.0, 10.0, true)]));
    tap.on_event(&script.frame_at(50, &[(1, 10.0, 10.0, false)]));

    tap.on_event(&script.frame_at(150, &[(2, 20.0, 15.0, true)]));
    let events = tap.on_event(&script.frame_at(200, &[(2, 20.0, 15.0, false)]));
    assert_eq!(events.as_slice(), &[TapEvent::DoubleTap(Point::new(20.0, 15.0))]);

    // A third tap starts over instead of chaining.
    tap.on_event(&script.frame_at(300, &[(3, 20.0, 15.0, true)]));
    let events = tap.on_event(&script.frame_at(320, &[(3, 20.0, 15.0, false)]));
    assert_eq!(events.as_slice(), &[TapEvent::Tap(Point::new(20.0, 15.0))]);
}

#[test]
fn taps_outside_the_time_window_stay_single() {
    let mut script = TouchScript::new();
    let mut tap = recognizer();

    tap.on_event(&script.frame_at(0, &[(1, 10.0, 10.0, true)]));
    tap.on_event(&script.frame_at(50, &[(1, 10.0, 10.0, false)]));
    // 20ms gap: a bounce, not a double tap.
    tap.on_event(&script.frame_at(70, &[(2, 10.0, 10.0, true)]));
    let bounce = tap.on_event(&script.frame_at(90, &[(2, 10.0, 10.0, false)]));
    assert_eq!(bounce.as_slice(), &[TapEvent::Tap(Point::new(10.0, 10.0))]);

    // 400ms gap: too slow.
    tap.on_event(&script.frame_at(490, &[(3, 10.0, 10.0, true)]));
    let slow = tap.on_event(&script.frame_at(500, &[(3, 10.0, 10.0, false)]));
    assert_eq!(slow.as_slice(), &[TapEvent::Tap(Point::new(10.0, 10.0))]);
}

#[test]
fn taps_far_apart_stay_single() {
    let mut script = TouchScript::new();
    let mut tap = recognizer();

    tap.on_event(&script.frame_at(0, &[(1, 0.0, 0.0, true)]));
    tap.on_event(&script.frame_at(50, &[(1, 0.0, 0.0, false)]));
    tap.on_event(&script.frame_at(150, &[(2, 300.0, 0.0, true)]));
    let events = tap.on_event(&script.frame_at(200, &[(2, 300.0, 0.0, false)]));
    assert_eq!(events.as_slice(), &[TapEvent::Tap(Point::new(300.0, 0.0))]);
}

#[test]
fn moving_past_slop_cancels() {
    let mut script = TouchScript::new();
    let mut tap = recognizer();

    tap.on_event(&script.frame(&[(1, 0.0, 0.0, true)]));
    let events = tap.on_event(&script.frame(&[(1, 20.0, 0.0, true)]));
    assert_eq!(events.as_slice(), &[TapEvent::Cancel]);
    assert!(tap.on_event(&script.frame(&[(1, 20.0, 0.0, false)])).is_empty());
}

#[test]
fn claimed_release_cancels() {
    let mut script = TouchScript::new();
    let mut tap = recognizer();

    tap.on_event(&script.frame(&[(1, 0.0, 0.0, true)]));
    let up = script.frame(&[(1, 0.0, 0.0, false)]);
    up.consume_all();
    assert_eq!(tap.on_event(&up).as_slice(), &[TapEvent::Cancel]);
}

#[test]
fn second_finger_cancels_and_waits_for_all_up() {
    let mut script = TouchScript::new();
    let mut tap = recognizer();

    tap.on_event(&script.frame(&[(1, 0.0, 0.0, true)]));
    let events = tap.on_event(&script.frame(&[(1, 0.0, 0.0, true), (2, 50.0, 0.0, true)]));
    assert_eq!(events.as_slice(), &[TapEvent::Cancel]);

    assert!(tap
        .on_event(&script.frame(&[(1, 0.0, 0.0, false), (2, 50.0, 0.0, true)]))
        .is_empty());
    assert!(tap.on_event(&script.frame(&[(2, 50.0, 0.0, false)])).is_empty());

    let events = tap.on_event(&script.frame(&[(3, 5.0, 5.0, true)]));
    assert_eq!(events.as_slice(), &[TapEvent::Press(Point::new(5.0, 5.0))]);
}
