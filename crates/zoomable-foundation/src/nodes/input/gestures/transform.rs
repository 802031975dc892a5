//! Multi-pointer pan/zoom/rotate recognizer.
//!
//! Per batch the recognizer derives a zoom ratio, a rotation delta and a pan
//! delta from the contacts that were pressed in both this batch and the
//! previous one. Until touch slop is crossed these are only accumulated to
//! evaluate slop; afterwards each batch is reported directly and its changes
//! are consumed.

use smallvec::SmallVec;
use zoomable_geometry::{to_degrees, Point};

use crate::config::ViewConfiguration;
use crate::gesture_constants::MIN_SPAN;
use crate::nodes::input::types::{PointerEvent, PointerInputChange};

#[derive(Clone, Debug, PartialEq)]
pub enum TransformEvent {
    /// Slop crossed; a transform gesture is now active.
    Start { centroid: Point },
    Tick {
        centroid: Point,
        pan: Point,
        zoom: f32,
        rotation: f32,
    },
    /// Pointers lifted below the required count after the gesture started.
    End,
    /// Pointer count exceeded, or another recognizer claimed the changes.
    Cancel,
}

pub type TransformEvents = SmallVec<[TransformEvent; 2]>;

/// Per-contact-cycle accumulators, dropped when every pointer lifts.
#[derive(Clone, Debug)]
struct GestureSession {
    zoom: f32,
    rotation: f32,
    pan: Point,
    past_touch_slop: bool,
    locked_to_pan_zoom: bool,
}

impl GestureSession {
    fn new() -> Self {
        Self {
            zoom: 1.0,
            rotation: 0.0,
            pan: Point::ZERO,
            past_touch_slop: false,
            locked_to_pan_zoom: false,
        }
    }
}

#[derive(Debug)]
pub struct TransformGestureRecognizer {
    config: ViewConfiguration,
    required_pointer_count: usize,
    pan_zoom_lock: bool,
    session: Option<GestureSession>,
}

impl TransformGestureRecognizer {
    pub fn new(config: ViewConfiguration) -> Self {
        Self {
            config,
            required_pointer_count: 2,
            pan_zoom_lock: false,
            session: None,
        }
    }

    pub fn with_required_pointer_count(mut self, count: usize) -> Self {
        self.required_pointer_count = count.max(1);
        self
    }

    /// Freeze rotation at zero when pan or zoom crosses slop before rotation.
    pub fn with_pan_zoom_lock(mut self, pan_zoom_lock: bool) -> Self {
        self.pan_zoom_lock = pan_zoom_lock;
        self
    }

    pub fn is_in_progress(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| session.past_touch_slop)
    }

    pub fn reset(&mut self) {
        self.session = None;
    }

    pub fn on_event(&mut self, event: &PointerEvent) -> TransformEvents {
        let mut out = TransformEvents::new();

        if self.session.is_none() {
            if !event
                .changes
                .iter()
                .any(|change| change.changed_to_down_ignore_consumed())
            {
                return out;
            }
            self.session = Some(GestureSession::new());
        }

        if !event.any_pressed() {
            if self.is_in_progress() {
                log::debug!("transform: all pointers up, ending");
                out.push(TransformEvent::End);
            }
            self.session = None;
            return out;
        }

        let pressed = event.pressed_count();
        let consumed = event.is_any_consumed();
        if pressed != self.required_pointer_count || consumed {
            if self.is_in_progress() {
                if consumed || pressed > self.required_pointer_count {
                    log::debug!("transform: cancelled (pressed={pressed}, consumed={consumed})");
                    out.push(TransformEvent::Cancel);
                } else {
                    log::debug!("transform: pointer count dropped to {pressed}, ending");
                    out.push(TransformEvent::End);
                }
            }
            self.session = Some(GestureSession::new());
            return out;
        }

        let stable = stable_changes(event);
        if stable.len() != self.required_pointer_count {
            // A pointer landed this batch; wait for it to have a history.
            return out;
        }

        let Some(frame) = FrameMotion::from_changes(&stable) else {
            log::warn!("transform: degenerate pointer geometry, skipping batch");
            return out;
        };

        let touch_slop = self.config.touch_slop;
        let pan_zoom_lock = self.pan_zoom_lock;
        let Some(session) = self.session.as_mut() else {
            return out;
        };

        if !session.past_touch_slop {
            session.zoom *= frame.zoom;
            session.rotation += frame.rotation;
            session.pan += frame.pan;

            let centroid_size = frame.previous_centroid_size;
            let zoom_motion = (1.0 - session.zoom).abs() * centroid_size;
            let rotation_motion =
                (session.rotation * std::f32::consts::PI * centroid_size / 180.0).abs();
            let pan_motion = session.pan.get_distance();

            if zoom_motion > touch_slop || rotation_motion > touch_slop || pan_motion > touch_slop
            {
                session.past_touch_slop = true;
                session.locked_to_pan_zoom = pan_zoom_lock && rotation_motion < touch_slop;
                log::debug!(
                    "transform: slop crossed (zoom={zoom_motion}, rotation={rotation_motion}, pan={pan_motion}, locked={})",
                    session.locked_to_pan_zoom
                );
                out.push(TransformEvent::Start {
                    centroid: frame.previous_centroid,
                });
            }
        }

        if session.past_touch_slop {
            let rotation = if session.locked_to_pan_zoom {
                0.0
            } else {
                frame.rotation
            };
            if rotation != 0.0 || frame.zoom != 1.0 || frame.pan != Point::ZERO {
                log::trace!(
                    "transform: pan={:?} zoom={} rotation={rotation}",
                    frame.pan,
                    frame.zoom
                );
                out.push(TransformEvent::Tick {
                    centroid: frame.previous_centroid,
                    pan: frame.pan,
                    zoom: frame.zoom,
                    rotation,
                });
            }
            for change in &stable {
                if change.position_changed() {
                    change.consume();
                }
            }
        }

        out
    }
}

fn stable_changes(event: &PointerEvent) -> SmallVec<[&PointerInputChange; 4]> {
    event
        .changes
        .iter()
        .filter(|change| change.pressed && change.previous_pressed)
        .map(|change| change.as_ref())
        .collect()
}

/// Motion of a set of contacts between two consecutive batches.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameMotion {
    pub previous_centroid: Point,
    pub current_centroid: Point,
    pub previous_centroid_size: f32,
    pub current_centroid_size: f32,
    pub pan: Point,
    pub zoom: f32,
    /// Degrees, positive clockwise in a y-down space.
    pub rotation: f32,
}

impl FrameMotion {
    /// Returns `None` when there are no contacts or the result is not finite.
    pub fn from_changes(changes: &[&PointerInputChange]) -> Option<Self> {
        if changes.is_empty() {
            return None;
        }

        let count = changes.len() as f32;
        let (previous_sum, current_sum) = changes.iter().fold(
            (Point::ZERO, Point::ZERO),
            |(previous, current), change| {
                (previous + change.previous_position, current + change.position)
            },
        );
        let previous_centroid = previous_sum / count;
        let current_centroid = current_sum / count;

        let previous_centroid_size = changes
            .iter()
            .map(|change| (change.previous_position - previous_centroid).get_distance())
            .sum::<f32>()
            / count;
        let current_centroid_size = changes
            .iter()
            .map(|change| (change.position - current_centroid).get_distance())
            .sum::<f32>()
            / count;

        let zoom = if previous_centroid_size < MIN_SPAN || current_centroid_size < MIN_SPAN {
            1.0
        } else {
            current_centroid_size / previous_centroid_size
        };

        let rotation = if changes.len() < 2 {
            0.0
        } else {
            weighted_rotation(changes, previous_centroid, current_centroid)
        };

        let motion = Self {
            previous_centroid,
            current_centroid,
            previous_centroid_size,
            current_centroid_size,
            pan: current_centroid - previous_centroid,
            zoom,
            rotation,
        };

        if motion.pan.is_finite() && motion.zoom.is_finite() && motion.rotation.is_finite() {
            Some(motion)
        } else {
            None
        }
    }
}

/// Average angular change around the centroid, weighted by each contact's
/// distance from it so far-out contacts dominate.
fn weighted_rotation(
    changes: &[&PointerInputChange],
    previous_centroid: Point,
    current_centroid: Point,
) -> f32 {
    let mut rotation = 0.0;
    let mut rotation_weight = 0.0;

    for change in changes {
        let previous_offset = change.previous_position - previous_centroid;
        let current_offset = change.position - current_centroid;
        if previous_offset.get_distance_squared() < MIN_SPAN * MIN_SPAN
            || current_offset.get_distance_squared() < MIN_SPAN * MIN_SPAN
        {
            continue;
        }

        let angle_diff = to_degrees(current_offset.angle() - previous_offset.angle());
        let angle_diff = if angle_diff > 180.0 {
            angle_diff - 360.0
        } else if angle_diff < -180.0 {
            angle_diff + 360.0
        } else {
            angle_diff
        };

        let weight = (current_offset + previous_offset).get_distance() / 2.0;
        rotation += angle_diff * weight;
        rotation_weight += weight;
    }

    if rotation_weight < MIN_SPAN {
        0.0
    } else {
        rotation / rotation_weight
    }
}
