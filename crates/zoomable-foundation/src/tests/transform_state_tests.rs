use zoomable_geometry::Point;

use super::assert_close;
use crate::error::MutationError;
use crate::transform::{MutatePriority, TransformState, TransformableState};

#[test]
fn transform_by_composes_scale_offset_and_rotation() {
    let state = TransformableState::default();
    let session = state.begin(MutatePriority::UserInput).expect("session");

    session.transform_by(2.0, Point::new(10.0, 0.0), 30.0).expect("write");
    let result = session
        .transform_by(1.5, Point::new(0.0, -4.0), 15.0)
        .expect("write");

    assert_close(result.scale, 3.0, 1e-6);
    assert_eq!(result.offset, Point::new(10.0, -4.0));
    assert_close(result.rotation_degrees, 45.0, 1e-5);
    assert_eq!(state.transform(), result);
}

#[test]
fn rotation_always_lands_in_half_open_range() {
    let state = TransformableState::default();
    let session = state.begin(MutatePriority::Default).expect("session");

    for change in [170.0, 20.0, 359.0, -725.0, 180.0, -180.0, 90.5, 1080.0] {
        let rotation = session
            .transform_by(1.0, Point::ZERO, change)
            .expect("write")
            .rotation_degrees;
        assert!(
            rotation > -180.0 && rotation <= 180.0,
            "rotation {rotation} after adding {change}"
        );
    }
}

#[test]
fn rotation_wraps_past_half_turn() {
    let state = TransformableState::default();
    let session = state.begin(MutatePriority::Default).expect("session");

    let wrapped = session.transform_by(1.0, Point::ZERO, 190.0).expect("write");
    assert_close(wrapped.rotation_degrees, -170.0, 1e-4);

    let half = session.transform_by(1.0, Point::ZERO, -10.0).expect("write");
    assert_close(half.rotation_degrees, 180.0, 1e-4);
}

#[test]
fn not_transformed_uses_fixed_epsilons() {
    let nearly = TransformState {
        scale: 1.0009,
        ..TransformState::IDENTITY
    };
    assert!(nearly.is_not_transformed());

    let zoomed = TransformState {
        scale: 1.01,
        ..TransformState::IDENTITY
    };
    assert!(!zoomed.is_not_transformed());
    assert!(zoomed.is_transformed());

    let nudged = TransformState {
        offset: Point::new(0.0005, 0.0),
        ..TransformState::IDENTITY
    };
    assert!(nudged.is_not_transformed());

    let panned = TransformState {
        offset: Point::new(0.01, 0.0),
        ..TransformState::IDENTITY
    };
    assert!(panned.is_transformed());
}

#[test]
fn user_input_preempts_default_and_last_write_wins() {
    let state = TransformableState::default();
    let animation = state.begin(MutatePriority::Default).expect("animation session");
    animation
        .transform_by(1.0, Point::new(10.0, 0.0), 0.0)
        .expect("animation write");

    let gesture = state.begin(MutatePriority::UserInput).expect("gesture session");
    gesture
        .transform_by(1.0, Point::new(0.0, 5.0), 0.0)
        .expect("gesture write");

    assert!(!animation.is_active());
    assert_eq!(
        animation.transform_by(1.0, Point::new(100.0, 0.0), 0.0),
        Err(MutationError::Preempted {
            session: animation.id()
        })
    );
    // Nothing is rolled back and the stale write is dropped.
    assert_eq!(state.transform().offset, Point::new(10.0, 5.0));
}

#[test]
fn lower_priority_request_is_rejected() {
    let state = TransformableState::default();
    let gesture = state.begin(MutatePriority::UserInput).expect("gesture session");

    assert_eq!(
        state.begin(MutatePriority::Default).map(|session| session.id()),
        Err(MutationError::Rejected {
            held: MutatePriority::UserInput,
            requested: MutatePriority::Default,
        })
    );
    assert!(gesture.is_active());
}

#[test]
fn equal_priority_takes_over() {
    let state = TransformableState::default();
    let first = state.begin(MutatePriority::Default).expect("first");
    let second = state.begin(MutatePriority::Default).expect("second");

    assert!(!first.is_active());
    assert!(second.is_active());
    assert_ne!(first.id(), second.id());
}

#[test]
fn dropping_a_session_releases_ownership() {
    let state = TransformableState::default();
    let session = state.begin(MutatePriority::UserInput).expect("session");
    assert!(state.is_transform_in_progress());

    drop(session);
    assert!(!state.is_transform_in_progress());
    assert!(state.begin(MutatePriority::Default).is_ok());
}

#[test]
fn stale_session_drop_keeps_new_owner() {
    let state = TransformableState::default();
    let old = state.begin(MutatePriority::Default).expect("old");
    let new = state.begin(MutatePriority::UserInput).expect("new");

    old.release();
    assert!(new.is_active());
    assert!(state.is_transform_in_progress());
}

#[test]
fn invalid_changes_are_refused() {
    let state = TransformableState::default();
    let session = state.begin(MutatePriority::UserInput).expect("session");

    assert_eq!(
        session.transform_by(0.0, Point::ZERO, 0.0),
        Err(MutationError::InvalidChange)
    );
    assert_eq!(
        session.transform_by(1.0, Point::new(f32::NAN, 0.0), 0.0),
        Err(MutationError::InvalidChange)
    );
    assert_eq!(
        session.transform_by(1.0, Point::ZERO, f32::INFINITY),
        Err(MutationError::InvalidChange)
    );
    assert_eq!(state.transform(), TransformState::IDENTITY);
}

#[test]
fn mutate_scopes_a_session() {
    let state = TransformableState::default();
    let scale = state
        .mutate(MutatePriority::Default, |session| {
            session
                .transform_by(3.0, Point::ZERO, 0.0)
                .map(|transform| transform.scale)
        })
        .expect("session")
        .expect("write");

    assert_close(scale, 3.0, 1e-6);
    assert!(!state.is_transform_in_progress());
}

#[test]
fn clones_share_state() {
    let state = TransformableState::default();
    let observer = state.clone();
    state
        .mutate(MutatePriority::UserInput, |session| {
            session.transform_by(1.0, Point::new(1.0, 1.0), 0.0)
        })
        .expect("session")
        .expect("write");

    assert_eq!(observer.transform().offset, Point::new(1.0, 1.0));
}

#[test]
fn graphics_layer_mirrors_transform() {
    let transform = TransformState {
        scale: 2.0,
        offset: Point::new(3.0, 4.0),
        rotation_degrees: -45.0,
    };
    let layer = transform.graphics_layer();
    assert_eq!(layer.scale_x, 2.0);
    assert_eq!(layer.scale_y, 2.0);
    assert_eq!(layer.translation(), Point::new(3.0, 4.0));
    assert_eq!(layer.rotation_z, -45.0);
}
