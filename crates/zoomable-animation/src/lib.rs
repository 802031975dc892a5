//! Animation primitives for Zoomable
//!
//! Time-based tweens with easing curves and spring physics, driven by
//! explicit frame timestamps instead of a runtime frame clock.

mod animation;
mod easing;

pub use animation::*;
pub use easing::*;
