pub mod drag;
pub mod slop;
pub mod tap;
pub mod transform;

pub use drag::{DragEvent, DragEvents, DragGestureRecognizer, DragPhase};
pub use slop::{Orientation, TouchSlopDetector};
pub use tap::{TapEvent, TapEvents, TapGestureRecognizer};
pub use transform::{FrameMotion, TransformEvent, TransformEvents, TransformGestureRecognizer};
