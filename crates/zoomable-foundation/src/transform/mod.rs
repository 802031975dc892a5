//! Transform state, the mutation arbiter, and animated writers.

pub mod animation;
pub mod state;

pub use animation::{
    animate_by, animate_double_tap, animate_zoom_to_position, snap_to, zoom_to_position_pan,
    AnimationStatus, TransformAnimation,
};
pub use state::{
    MutatePriority, MutationSession, SessionId, TransformState, TransformableState,
};
