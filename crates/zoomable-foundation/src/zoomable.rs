//! Pan/zoom/rotate controller for a single element.
//!
//! Every batch goes to the transform recognizer first, then the drag
//! recognizer, then the tap recognizer. Whatever an earlier recognizer
//! consumes is invisible to the later ones, which is how a two-finger pinch
//! suppresses the one-finger pan underneath it.

use smallvec::SmallVec;
use zoomable_geometry::{Point, Rect};

use crate::config::{RotationBehavior, ViewConfiguration, ZoomableConfig};
use crate::error::MutationError;
use crate::nodes::input::gestures::{
    DragEvent, DragGestureRecognizer, TapEvent, TapGestureRecognizer, TransformEvent,
    TransformGestureRecognizer,
};
use crate::nodes::input::types::PointerEvent;
use crate::transform::{
    animate_double_tap, zoom_to_position_pan, AnimationStatus, MutatePriority, MutationSession,
    TransformAnimation, TransformState, TransformableState,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    Left,
    Right,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ZoomableEvent {
    /// The shared transform changed because of a gesture.
    Transformed(TransformState),
    Tap(Point),
    DoubleTap(Point),
    Swipe(SwipeDirection),
}

pub type ZoomableEvents = SmallVec<[ZoomableEvent; 2]>;

#[derive(Debug)]
pub struct ZoomableController {
    config: ZoomableConfig,
    state: TransformableState,
    transform_recognizer: TransformGestureRecognizer,
    drag_recognizer: DragGestureRecognizer,
    tap_recognizer: TapGestureRecognizer,
    /// Held from transform start to end.
    transform_session: Option<MutationSession>,
    /// Held for a one-finger pan of transformed content.
    pan_session: Option<MutationSession>,
    /// Horizontal travel of a one-finger drag over untransformed content.
    swipe_distance: Option<f32>,
    animation: Option<TransformAnimation>,
    element_bounds: Rect,
}

impl ZoomableController {
    pub fn new(config: ZoomableConfig) -> Self {
        Self::with_state(config, ViewConfiguration::default(), TransformableState::default())
    }

    /// Build around an existing state, e.g. one shared with another writer.
    pub fn with_state(
        config: ZoomableConfig,
        view_configuration: ViewConfiguration,
        state: TransformableState,
    ) -> Self {
        let transform_view_configuration = if config.slop_required {
            view_configuration
        } else {
            view_configuration.with_touch_slop(0.0)
        };
        let transform_recognizer = TransformGestureRecognizer::new(transform_view_configuration)
            .with_required_pointer_count(config.required_pointer_count)
            .with_pan_zoom_lock(config.effective_pan_zoom_lock());

        // One-finger drags only matter when they can pan or swipe.
        let swipe_enabled = config.minimum_swipe_distance > 0;
        let filter_state = state.clone();
        let drag_recognizer = DragGestureRecognizer::new(view_configuration)
            .await_touch_slop(config.slop_required)
            .with_slop_filter(move |_, _| {
                swipe_enabled || filter_state.transform().is_transformed()
            });

        Self {
            config,
            state,
            transform_recognizer,
            drag_recognizer,
            tap_recognizer: TapGestureRecognizer::new(view_configuration),
            transform_session: None,
            pan_session: None,
            swipe_distance: None,
            animation: None,
            element_bounds: Rect::default(),
        }
    }

    pub fn config(&self) -> &ZoomableConfig {
        &self.config
    }

    pub fn state(&self) -> &TransformableState {
        &self.state
    }

    pub fn transform(&self) -> TransformState {
        self.state.transform()
    }

    pub fn is_transformed(&self) -> bool {
        self.state.transform().is_transformed()
    }

    pub fn is_animating(&self) -> bool {
        self.animation
            .as_ref()
            .is_some_and(TransformAnimation::is_running)
    }

    pub fn element_bounds(&self) -> Rect {
        self.element_bounds
    }

    /// Layout input; the bounds center is the zoom pivot for double taps.
    pub fn set_element_bounds(&mut self, bounds: Rect) {
        self.element_bounds = bounds;
    }

    pub fn on_pointer_event(&mut self, event: &PointerEvent) -> ZoomableEvents {
        let mut out = ZoomableEvents::new();

        for transform_event in self.transform_recognizer.on_event(event) {
            self.handle_transform(transform_event, &mut out);
        }
        for drag_event in self.drag_recognizer.on_event(event) {
            self.handle_drag(drag_event, &mut out);
        }
        for tap_event in self.tap_recognizer.on_event(event) {
            self.handle_tap(tap_event, &mut out);
        }

        out
    }

    /// Advance a running double-tap animation. Returns the transform if the
    /// frame changed it.
    pub fn on_frame(&mut self, frame_time_nanos: u64) -> Option<TransformState> {
        let animation = self.animation.as_mut()?;
        let status = animation.on_frame(frame_time_nanos);
        if status != AnimationStatus::Running {
            log::debug!("zoomable: animation {status:?}");
            self.animation = None;
        }
        match status {
            AnimationStatus::Preempted => None,
            AnimationStatus::Running | AnimationStatus::Finished => Some(self.state.transform()),
        }
    }

    pub fn cancel_animation(&mut self) {
        if let Some(animation) = self.animation.take() {
            animation.cancel();
        }
    }

    /// Restart every recognizer from idle. Applied changes stay applied.
    pub fn reset(&mut self) {
        self.transform_recognizer.reset();
        self.drag_recognizer.reset();
        self.tap_recognizer.reset();
        self.transform_session = None;
        self.pan_session = None;
        self.swipe_distance = None;
    }

    fn handle_transform(&mut self, event: TransformEvent, out: &mut ZoomableEvents) {
        match event {
            TransformEvent::Start { centroid } => {
                log::debug!("zoomable: transform started at {centroid:?}");
                self.transform_session = self.begin_user_input();
            }
            TransformEvent::Tick {
                centroid,
                pan,
                zoom,
                rotation,
            } => {
                if self.transform_session.is_none() {
                    self.transform_session = self.begin_user_input();
                }
                let Some(session) = self.transform_session.as_ref() else {
                    return;
                };

                let current = session.transform();
                let zoom = clamp_zoom(current.scale, zoom, &self.config);
                let rotation = match self.config.rotation_behavior {
                    RotationBehavior::Disabled => 0.0,
                    RotationBehavior::AlwaysEnabled | RotationBehavior::LockOnZoomPan => rotation,
                };
                // Keep the content under the centroid in place while zooming.
                let pivot =
                    zoom_to_position_pan(current, zoom, centroid, self.element_bounds.center());

                match session.transform_by(zoom, pan + pivot, rotation) {
                    Ok(state) => out.push(ZoomableEvent::Transformed(state)),
                    Err(err) => {
                        log::debug!("zoomable: transform tick dropped: {err}");
                        if matches!(err, MutationError::Preempted { .. }) {
                            self.transform_session = None;
                        }
                    }
                }
            }
            TransformEvent::End | TransformEvent::Cancel => {
                log::debug!("zoomable: transform finished ({event:?})");
                self.transform_session = None;
            }
        }
    }

    fn handle_drag(&mut self, event: DragEvent, out: &mut ZoomableEvents) {
        match event {
            DragEvent::Start { .. } => {
                if self.is_transformed() {
                    self.pan_session = self.begin_user_input();
                } else {
                    self.swipe_distance = Some(0.0);
                }
            }
            DragEvent::Move { delta, .. } => {
                if let Some(session) = self.pan_session.as_ref() {
                    match session.transform_by(1.0, delta, 0.0) {
                        Ok(state) => out.push(ZoomableEvent::Transformed(state)),
                        Err(err) => {
                            log::debug!("zoomable: pan dropped: {err}");
                            self.pan_session = None;
                        }
                    }
                } else if let Some(distance) = self.swipe_distance.as_mut() {
                    *distance += delta.x;
                }
            }
            DragEvent::End { .. } => {
                self.pan_session = None;
                if let Some(distance) = self.swipe_distance.take() {
                    if let Some(direction) = swipe_direction(distance, &self.config) {
                        log::debug!("zoomable: swipe {direction:?} ({distance})");
                        out.push(ZoomableEvent::Swipe(direction));
                    }
                }
            }
            DragEvent::Cancel => {
                self.pan_session = None;
                self.swipe_distance = None;
            }
        }
    }

    fn handle_tap(&mut self, event: TapEvent, out: &mut ZoomableEvents) {
        match event {
            TapEvent::Tap(position) => out.push(ZoomableEvent::Tap(position)),
            TapEvent::DoubleTap(position) => {
                match animate_double_tap(
                    &self.state,
                    position,
                    self.element_bounds.center(),
                    self.config.double_tap_zoom,
                    self.config.animation,
                ) {
                    Ok(animation) => self.animation = Some(animation),
                    Err(err) => log::debug!("zoomable: double tap ignored: {err}"),
                }
                out.push(ZoomableEvent::DoubleTap(position));
            }
            TapEvent::Press(_) | TapEvent::Cancel => {}
        }
    }

    fn begin_user_input(&self) -> Option<MutationSession> {
        match self.state.begin(MutatePriority::UserInput) {
            Ok(session) => Some(session),
            Err(err) => {
                log::warn!("zoomable: could not start gesture session: {err}");
                None
            }
        }
    }
}

impl Default for ZoomableController {
    fn default() -> Self {
        Self::new(ZoomableConfig::default())
    }
}

/// Scale the zoom factor down so the resulting scale stays in bounds.
fn clamp_zoom(current_scale: f32, zoom: f32, config: &ZoomableConfig) -> f32 {
    if current_scale <= 0.0 {
        return zoom;
    }
    let target = (current_scale * zoom)
        .max(config.min_scale)
        .min(config.max_scale);
    target / current_scale
}

fn swipe_direction(distance: f32, config: &ZoomableConfig) -> Option<SwipeDirection> {
    let minimum = config.minimum_swipe_distance;
    if minimum <= 0 || distance.abs() < minimum as f32 {
        return None;
    }
    Some(if distance < 0.0 {
        SwipeDirection::Left
    } else {
        SwipeDirection::Right
    })
}
