pub mod dispatcher;
pub mod gestures;
pub mod processor;
pub mod types;

pub use dispatcher::{PointerDispatcher, PointerEventHandler};
pub use processor::PointerInputChangeProducer;
pub use types::{
    PointerEvent, PointerId, PointerInputChange, PointerInputEvent, PointerInputEventData,
    PointerType,
};

pub mod prelude {
    pub use super::gestures::{
        DragEvent, DragGestureRecognizer, TapEvent, TapGestureRecognizer, TouchSlopDetector,
        TransformEvent, TransformGestureRecognizer,
    };
    pub use super::types::{
        PointerEvent, PointerId, PointerInputChange, PointerInputEvent, PointerInputEventData,
        PointerType,
    };
}
