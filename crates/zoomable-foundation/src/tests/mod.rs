mod scale_edit_box_tests;
mod tap_tests;
mod transform_state_tests;

use zoomable_geometry::Point;

use crate::nodes::input::{
    PointerEvent, PointerId, PointerInputChangeProducer, PointerInputEvent, PointerInputEventData,
    PointerType,
};

const FRAME_MILLIS: u64 = 16;

/// Feeds scripted touch frames through a real change producer.
struct TouchScript {
    producer: PointerInputChangeProducer,
    uptime: u64,
    pointer_type: PointerType,
}

impl TouchScript {
    fn new() -> Self {
        Self {
            producer: PointerInputChangeProducer::new(),
            uptime: 0,
            pointer_type: PointerType::Touch,
        }
    }

    /// Same frames, reported by a mouse.
    fn mouse() -> Self {
        Self {
            pointer_type: PointerType::Mouse,
            ..Self::new()
        }
    }

    /// `(id, x, y, down)` per contact; one frame later than the previous one.
    fn frame(&mut self, pointers: &[(PointerId, f32, f32, bool)]) -> PointerEvent {
        let uptime = self.uptime + FRAME_MILLIS;
        self.frame_at(uptime, pointers)
    }

    fn frame_at(&mut self, uptime: u64, pointers: &[(PointerId, f32, f32, bool)]) -> PointerEvent {
        self.uptime = uptime;
        let pointers = pointers
            .iter()
            .map(|&(id, x, y, down)| PointerInputEventData {
                type_: self.pointer_type,
                ..PointerInputEventData::touch(id, uptime, Point::new(x, y), down)
            })
            .collect();
        self.producer
            .produce(&PointerInputEvent::new(uptime, pointers))
    }
}

fn assert_close(actual: f32, expected: f32, tolerance: f32) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} (±{tolerance}), got {actual}"
    );
}

fn assert_point_close(actual: Point, expected: Point, tolerance: f32) {
    assert!(
        (actual.x - expected.x).abs() <= tolerance && (actual.y - expected.y).abs() <= tolerance,
        "expected {expected:?} (±{tolerance}), got {actual:?}"
    );
}
