//! Gesture recognition and transform state for Zoomable
//!
//! Pointer batches flow through the recognizers in `nodes::input::gestures`,
//! semantic deltas are applied to a shared [`TransformableState`] through its
//! mutation arbiter, and animated writers in [`transform`] compete with
//! gestures for the same state. [`ZoomableController`] wires these together
//! for a pan/zoom/rotate element; [`ScaleEditBox`] is the standalone
//! corner-handle resize box.

pub mod config;
pub mod error;
pub mod gesture_constants;
pub mod nodes;
pub mod scale_edit_box;
pub mod transform;
pub mod zoomable;

pub use config::{HandleBoxConfig, RotationBehavior, ViewConfiguration, ZoomableConfig};
pub use error::MutationError;
pub use nodes::input::{
    PointerEvent, PointerId, PointerInputChange, PointerInputEvent, PointerInputEventData,
    PointerType,
};
pub use scale_edit_box::{HandleRect, ScaleEditBox, TouchRegion};
pub use transform::{
    AnimationStatus, MutatePriority, MutationSession, TransformAnimation, TransformState,
    TransformableState,
};
pub use zoomable::{SwipeDirection, ZoomableController, ZoomableEvent, ZoomableEvents};

pub mod prelude {
    pub use crate::config::*;
    pub use crate::error::MutationError;
    pub use crate::nodes::input::prelude::*;
    pub use crate::nodes::input::{
        PointerDispatcher, PointerEventHandler, PointerInputChangeProducer,
    };
    pub use crate::scale_edit_box::{ScaleEditBox, TouchRegion};
    pub use crate::transform::*;
    pub use crate::zoomable::*;
}

#[cfg(test)]
mod tests;
