//! Shared gesture constants for consistent touch/pointer handling.
//!
//! These values are in logical pixels unless stated otherwise. They are the
//! defaults behind [`crate::ViewConfiguration`]; hosts with a real platform
//! configuration should override them there.

/// Touch slop in logical pixels.
///
/// Motion below this distance is jitter. Once accumulated motion crosses it,
/// drags and transforms begin and taps are cancelled.
///
/// Hosts with a coarser or finer digitizer scale it via `ViewConfiguration::with_touch_slop`.
pub const DRAG_THRESHOLD: f32 = 8.0;

/// Mouse slop relative to touch slop (0.125dp mouse vs 18dp touch).
///
/// Precise pointing devices should not need a large preliminary motion.
pub const MOUSE_TO_TOUCH_SLOP_RATIO: f32 = 0.125 / 18.0;

/// Maximum time between the first up and the second down of a double tap.
pub const DOUBLE_TAP_TIMEOUT_MILLIS: u64 = 300;

/// Taps closer together than this are treated as a bounce, not a double tap.
pub const DOUBLE_TAP_MIN_TIME_MILLIS: u64 = 40;

/// Maximum distance between the two taps of a double tap.
pub const DOUBLE_TAP_SLOP: f32 = 100.0;

/// Scale/rotation tolerance for "not transformed".
pub const TRANSFORM_EPSILON: f32 = 1e-3;

/// Squared-offset tolerance for "not transformed".
pub const OFFSET_EPSILON_SQUARED: f32 = 1e-6;

/// Below this spread, two contacts are treated as coincident.
pub const MIN_SPAN: f32 = 1e-3;
