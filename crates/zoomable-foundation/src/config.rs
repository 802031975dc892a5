//! Gesture configuration.
//!
//! Three plain structs with `Default` and `with_*` builders: platform-level
//! thresholds ([`ViewConfiguration`]), the zoomable component's options
//! ([`ZoomableConfig`]) and the handle box options ([`HandleBoxConfig`]).

use zoomable_animation::AnimationType;
use zoomable_geometry::Dp;

use crate::gesture_constants::{
    DOUBLE_TAP_MIN_TIME_MILLIS, DOUBLE_TAP_SLOP, DOUBLE_TAP_TIMEOUT_MILLIS, DRAG_THRESHOLD,
    MOUSE_TO_TOUCH_SLOP_RATIO,
};
use crate::nodes::input::PointerType;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewConfiguration {
    pub touch_slop: f32,
    pub double_tap_timeout_millis: u64,
    pub double_tap_min_time_millis: u64,
    pub double_tap_slop: f32,
    pub density: f32,
}

impl ViewConfiguration {
    pub fn with_touch_slop(mut self, touch_slop: f32) -> Self {
        self.touch_slop = touch_slop;
        self
    }

    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    pub fn with_double_tap_timeout(mut self, millis: u64) -> Self {
        self.double_tap_timeout_millis = millis;
        self
    }

    /// Slop for the given pointer type; mice use a much smaller threshold.
    pub fn pointer_slop(&self, type_: PointerType) -> f32 {
        match type_ {
            PointerType::Mouse => self.touch_slop * MOUSE_TO_TOUCH_SLOP_RATIO,
            _ => self.touch_slop,
        }
    }
}

impl Default for ViewConfiguration {
    fn default() -> Self {
        Self {
            touch_slop: DRAG_THRESHOLD,
            double_tap_timeout_millis: DOUBLE_TAP_TIMEOUT_MILLIS,
            double_tap_min_time_millis: DOUBLE_TAP_MIN_TIME_MILLIS,
            double_tap_slop: DOUBLE_TAP_SLOP,
            density: 1.0,
        }
    }
}

/// How multi-finger rotation feeds into the transform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum RotationBehavior {
    AlwaysEnabled,
    /// Rotation is frozen when pan or zoom crosses slop before rotation does.
    #[default]
    LockOnZoomPan,
    Disabled,
}

impl RotationBehavior {
    pub fn pan_zoom_lock(self) -> bool {
        matches!(self, RotationBehavior::LockOnZoomPan)
    }
}

/// Options for [`crate::ZoomableController`].
///
/// The rotation lock is on when either `pan_zoom_lock` is set or
/// `rotation_behavior` is [`RotationBehavior::LockOnZoomPan`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomableConfig {
    pub slop_required: bool,
    pub required_pointer_count: usize,
    /// Freeze rotation for gestures that crossed slop by pan or zoom first.
    pub pan_zoom_lock: bool,
    pub rotation_behavior: RotationBehavior,
    /// Horizontal distance an untransformed one-finger drag must cover to
    /// count as a swipe. Zero disables swipes.
    pub minimum_swipe_distance: i32,
    pub double_tap_zoom: f32,
    pub min_scale: f32,
    pub max_scale: f32,
    pub animation: AnimationType,
}

impl ZoomableConfig {
    pub fn with_pan_zoom_lock(mut self, pan_zoom_lock: bool) -> Self {
        self.pan_zoom_lock = pan_zoom_lock;
        self
    }

    /// Lock flag handed to the transform recognizer.
    pub fn effective_pan_zoom_lock(&self) -> bool {
        self.pan_zoom_lock || self.rotation_behavior.pan_zoom_lock()
    }

    pub fn with_rotation_behavior(mut self, rotation_behavior: RotationBehavior) -> Self {
        self.rotation_behavior = rotation_behavior;
        self
    }

    pub fn with_minimum_swipe_distance(mut self, distance: i32) -> Self {
        self.minimum_swipe_distance = distance;
        self
    }

    pub fn with_required_pointer_count(mut self, count: usize) -> Self {
        self.required_pointer_count = count;
        self
    }

    pub fn with_slop_required(mut self, slop_required: bool) -> Self {
        self.slop_required = slop_required;
        self
    }

    pub fn with_scale_bounds(mut self, min_scale: f32, max_scale: f32) -> Self {
        self.min_scale = min_scale;
        self.max_scale = max_scale;
        self
    }

    pub fn with_animation(mut self, animation: AnimationType) -> Self {
        self.animation = animation;
        self
    }
}

impl Default for ZoomableConfig {
    fn default() -> Self {
        Self {
            slop_required: true,
            required_pointer_count: 2,
            pan_zoom_lock: false,
            rotation_behavior: RotationBehavior::default(),
            minimum_swipe_distance: 0,
            double_tap_zoom: 2.0,
            min_scale: 1.0,
            max_scale: 5.0,
            animation: AnimationType::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandleBoxConfig {
    pub handle_radius: Dp,
    pub minimum_element_dimension: Dp,
    pub density: f32,
}

impl HandleBoxConfig {
    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    pub fn with_handle_radius(mut self, radius: Dp) -> Self {
        self.handle_radius = radius;
        self
    }

    pub fn handle_radius_px(&self) -> f32 {
        self.handle_radius.to_px(self.density)
    }

    /// Distance from a corner within which a touch grabs that corner.
    pub fn touch_threshold_px(&self) -> f32 {
        self.handle_radius_px() * 2.0
    }

    /// Smallest width or height the box may be resized to.
    pub fn min_dimension_px(&self) -> f32 {
        let diameter = self.handle_radius_px() * 2.0;
        (diameter * 2.0).max(self.minimum_element_dimension.to_px(self.density) + diameter)
    }
}

impl Default for HandleBoxConfig {
    fn default() -> Self {
        Self {
            handle_radius: Dp(15.0),
            minimum_element_dimension: Dp(48.0),
            density: 1.0,
        }
    }
}
