use super::*;

const FRAME_NANOS: u64 = 16_666_667; // ~60 FPS

fn run_to_end(animation: &mut FloatAnimation, max_frames: usize) -> Vec<f32> {
    let mut samples = Vec::new();
    let mut frame_time = 1_000_000_000u64;
    for _ in 0..max_frames {
        let frame = animation.on_frame(frame_time);
        samples.push(frame.value);
        if frame.finished {
            break;
        }
        frame_time += FRAME_NANOS;
    }
    samples
}

#[test]
fn tween_first_frame_pins_start_time() {
    let mut animation = FloatAnimation::progress(AnimationSpec::linear(100).into());
    let first = animation.on_frame(5_000_000_000);
    assert_eq!(first.value, 0.0);
    assert!(!first.finished);

    let half = animation.on_frame(5_050_000_000);
    assert!((half.value - 0.5).abs() < 1e-4, "got {}", half.value);
}

#[test]
fn tween_reaches_target_exactly_and_stays_there() {
    let mut animation = FloatAnimation::new(2.0, 5.0, AnimationType::default());
    let samples = run_to_end(&mut animation, 64);
    assert!(animation.is_finished());
    assert_eq!(*samples.last().expect("samples"), 5.0);
    assert!(samples.windows(2).all(|pair| pair[1] >= pair[0]));

    let after = animation.on_frame(u64::MAX);
    assert_eq!(after.value, 5.0);
    assert!(after.finished);
}

#[test]
fn zero_duration_tween_finishes_on_first_frame() {
    let mut animation = FloatAnimation::progress(AnimationSpec::linear(0).into());
    let frame = animation.on_frame(42);
    assert!(frame.finished);
    assert_eq!(frame.value, 1.0);
}

#[test]
fn tween_delay_holds_the_start_value() {
    let spec = AnimationSpec::linear(100).with_delay(50);
    let mut animation = FloatAnimation::progress(spec.into());
    animation.on_frame(0);
    assert_eq!(animation.on_frame(40_000_000).value, 0.0);
    let value = animation.on_frame(100_000_000).value;
    assert!((value - 0.5).abs() < 1e-4, "got {value}");
}

#[test]
fn spring_settles_on_target() {
    let mut animation = FloatAnimation::new(0.0, 10.0, SpringSpec::default().into());
    let samples = run_to_end(&mut animation, 600);
    assert!(animation.is_finished(), "spring never settled: {samples:?}");
    assert_eq!(animation.value(), 10.0);
}

#[test]
fn bouncy_spring_overshoots() {
    let mut animation = FloatAnimation::progress(SpringSpec::bouncy().into());
    let samples = run_to_end(&mut animation, 600);
    assert!(samples.iter().any(|value| *value > 1.0));
}

#[test]
fn easing_curves_are_pinned_at_the_ends() {
    let curves = [
        Easing::LinearEasing,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
        Easing::FastOutSlowInEasing,
        Easing::LinearOutSlowInEasing,
        Easing::FastOutLinearEasing,
        Easing::CubicBezier(0.3, 0.0, 0.7, 1.0),
    ];
    for easing in curves {
        assert_eq!(easing.transform(0.0), 0.0, "{easing:?}");
        assert_eq!(easing.transform(1.0), 1.0, "{easing:?}");
        let mid = easing.transform(0.5);
        assert!(mid > 0.0 && mid < 1.0, "{easing:?} gave {mid}");
    }
}
