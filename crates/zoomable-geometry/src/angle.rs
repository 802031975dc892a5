//! Degree/radian helpers shared by the rotation math.

use std::f32::consts::PI;

pub fn to_radians(degrees: f32) -> f32 {
    degrees * PI / 180.0
}

pub fn to_degrees(radians: f32) -> f32 {
    radians * 180.0 / PI
}

/// Wraps an angle in degrees into `(-180, 180]`.
///
/// `rem_euclid` keeps the intermediate in `[0, 360)` so negative inputs wrap
/// the same way positive ones do. The `-180` edge is folded onto `180`.
pub fn normalize_degrees(degrees: f32) -> f32 {
    let wrapped = (degrees + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped <= -180.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}
