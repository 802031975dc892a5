//! Animated transform driver.
//!
//! Animations are ordinary writers: each holds a `Default`-priority
//! [`MutationSession`] and turns every animation frame into one
//! `transform_by` call, so a user gesture can take over mid-flight.

use zoomable_animation::{AnimationType, FloatAnimation};
use zoomable_geometry::Point;

use super::state::{MutatePriority, MutationSession, TransformState, TransformableState};
use crate::error::MutationError;
use crate::gesture_constants::MIN_SPAN;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationStatus {
    Running,
    Finished,
    /// A newer session took over; the rest of the animation is dropped.
    Preempted,
}

/// A running `animate_by`, advanced with [`TransformAnimation::on_frame`].
#[derive(Debug)]
pub struct TransformAnimation {
    session: Option<MutationSession>,
    progress: FloatAnimation,
    base_scale: f32,
    zoom_change: f32,
    pan_change: Point,
    rotation_change: f32,
    previous_fraction: f32,
    status: AnimationStatus,
}

impl TransformAnimation {
    pub fn status(&self) -> AnimationStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == AnimationStatus::Running
    }

    /// Apply the increment for this frame.
    pub fn on_frame(&mut self, frame_time_nanos: u64) -> AnimationStatus {
        if self.status != AnimationStatus::Running {
            return self.status;
        }
        let Some(session) = self.session.as_ref() else {
            self.status = AnimationStatus::Finished;
            return self.status;
        };

        let frame = self.progress.on_frame(frame_time_nanos);
        let fraction = frame.value;
        let delta = fraction - self.previous_fraction;
        self.previous_fraction = fraction;

        // Zoom is recomputed from the baseline each frame so per-frame
        // rounding does not compound.
        let current_scale = session.transform().scale;
        let target_scale = self.base_scale * (1.0 + (self.zoom_change - 1.0) * fraction);
        let zoom_step = if target_scale > 0.0 && current_scale > 0.0 {
            target_scale / current_scale
        } else {
            1.0
        };

        match session.transform_by(
            zoom_step,
            self.pan_change * delta,
            self.rotation_change * delta,
        ) {
            Ok(state) => log::trace!("animation frame {fraction}: {state:?}"),
            Err(MutationError::Preempted { session }) => {
                log::debug!("animation session {session} preempted, dropping remaining frames");
                self.session = None;
                self.status = AnimationStatus::Preempted;
                return self.status;
            }
            Err(err) => log::warn!("animation frame skipped: {err}"),
        }

        if frame.finished {
            self.session = None;
            self.status = AnimationStatus::Finished;
        }
        self.status
    }

    /// Stop where it is. Already applied frames stay applied.
    pub fn cancel(mut self) {
        self.session = None;
    }
}

/// Animate towards `zoom_change`×, `pan_change` and `rotation_change` from
/// the current state.
pub fn animate_by(
    state: &TransformableState,
    zoom_change: f32,
    pan_change: Point,
    rotation_change: f32,
    spec: AnimationType,
) -> Result<TransformAnimation, MutationError> {
    if !zoom_change.is_finite()
        || zoom_change <= 0.0
        || !pan_change.is_finite()
        || !rotation_change.is_finite()
    {
        return Err(MutationError::InvalidChange);
    }

    let session = state.begin(MutatePriority::Default)?;
    let base_scale = session.transform().scale;
    Ok(TransformAnimation {
        session: Some(session),
        progress: FloatAnimation::progress(spec),
        base_scale,
        zoom_change,
        pan_change,
        rotation_change,
        previous_fraction: 0.0,
        status: AnimationStatus::Running,
    })
}

/// Pan that keeps `target_position` visually fixed while zooming by
/// `zoom_change` around `element_center`.
///
/// The vector from the element center (shifted by the current offset) to the
/// target is taken apart into length and angle, its length scaled by the
/// zoom, and the pan is the difference between the two vectors.
pub fn zoom_to_position_pan(
    current: TransformState,
    zoom_change: f32,
    target_position: Point,
    element_center: Point,
) -> Point {
    let relative = target_position - element_center - current.offset;
    let distance = relative.get_distance();
    if distance < MIN_SPAN {
        return Point::ZERO;
    }
    let scaled = Point::from_polar(distance * zoom_change, relative.angle());
    relative - scaled
}

pub fn animate_zoom_to_position(
    state: &TransformableState,
    zoom_change: f32,
    target_position: Point,
    element_center: Point,
    spec: AnimationType,
) -> Result<TransformAnimation, MutationError> {
    let pan = zoom_to_position_pan(state.transform(), zoom_change, target_position, element_center);
    animate_by(state, zoom_change, pan, 0.0, spec)
}

/// Double-tap policy: zoom in around the tap when untransformed, otherwise
/// animate back to the identity transform.
pub fn animate_double_tap(
    state: &TransformableState,
    tap_position: Point,
    element_center: Point,
    zoom: f32,
    spec: AnimationType,
) -> Result<TransformAnimation, MutationError> {
    let current = state.transform();
    if current.is_not_transformed() {
        animate_zoom_to_position(state, zoom, tap_position, element_center, spec)
    } else {
        animate_by(
            state,
            1.0 / current.scale,
            -current.offset,
            -current.rotation_degrees,
            spec,
        )
    }
}

/// Jump straight to `target` in a single write.
pub fn snap_to(state: &TransformableState, target: TransformState) -> Result<(), MutationError> {
    if !(target.scale > 0.0) {
        return Err(MutationError::InvalidChange);
    }
    state.mutate(MutatePriority::Default, |session| {
        let current = session.transform();
        session
            .transform_by(
                target.scale / current.scale,
                target.offset - current.offset,
                target.rotation_degrees - current.rotation_degrees,
            )
            .map(|_| ())
    })?
}
