//! Pure math for Zoomable
//!
//! This crate contains the point/vector, size and rectangle primitives, the
//! layer transform handed to renderers, and the density-independent unit
//! types used throughout the gesture engine.

mod angle;
mod geometry;
mod unit;

pub use angle::*;
pub use geometry::*;
pub use unit::*;

pub mod prelude {
    pub use crate::geometry::{GraphicsLayer, Point, Rect, Size};
    pub use crate::unit::{Dp, Px};
}

#[cfg(test)]
#[path = "tests/geometry_tests.rs"]
mod tests;
