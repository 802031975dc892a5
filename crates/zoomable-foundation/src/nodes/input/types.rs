use std::cell::Cell;
use std::rc::Rc;
use zoomable_geometry::Point;

pub type PointerId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerType {
    Mouse,
    Touch,
    Stylus,
    Eraser,
    Unknown,
}

/// Data that describes a particular pointer, as reported by the host.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerInputEventData {
    pub id: PointerId,
    pub uptime: u64,
    pub position: Point,
    pub down: bool,
    pub type_: PointerType,
}

impl PointerInputEventData {
    pub fn touch(id: PointerId, uptime: u64, position: Point, down: bool) -> Self {
        Self {
            id,
            uptime,
            position,
            down,
            type_: PointerType::Touch,
        }
    }
}

/// One raw host batch: every currently relevant contact.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerInputEvent {
    pub uptime: u64,
    pub pointers: Vec<PointerInputEventData>,
}

impl PointerInputEvent {
    pub fn new(uptime: u64, pointers: Vec<PointerInputEventData>) -> Self {
        Self { uptime, pointers }
    }
}

/// Describes a change in a pointer between two batches.
///
/// The consumption flag is shared: every holder of the same `Rc` sees a
/// `consume()` made by any other holder.
#[derive(Clone, Debug)]
pub struct PointerInputChange {
    pub id: PointerId,
    pub uptime: u64,
    pub position: Point,
    pub pressed: bool,
    pub previous_uptime: u64,
    pub previous_position: Point,
    pub previous_pressed: bool,
    pub type_: PointerType,
    is_consumed: Cell<bool>,
}

impl PointerInputChange {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: PointerId,
        uptime: u64,
        position: Point,
        pressed: bool,
        previous_uptime: u64,
        previous_position: Point,
        previous_pressed: bool,
        type_: PointerType,
    ) -> Self {
        Self {
            id,
            uptime,
            position,
            pressed,
            previous_uptime,
            previous_position,
            previous_pressed,
            type_,
            is_consumed: Cell::new(false),
        }
    }

    pub fn is_consumed(&self) -> bool {
        self.is_consumed.get()
    }

    pub fn consume(&self) {
        self.is_consumed.set(true);
    }

    pub fn changed_to_down(&self) -> bool {
        !self.is_consumed() && !self.previous_pressed && self.pressed
    }

    pub fn changed_to_down_ignore_consumed(&self) -> bool {
        !self.previous_pressed && self.pressed
    }

    pub fn changed_to_up(&self) -> bool {
        !self.is_consumed() && self.previous_pressed && !self.pressed
    }

    pub fn changed_to_up_ignore_consumed(&self) -> bool {
        self.previous_pressed && !self.pressed
    }

    pub fn position_changed(&self) -> bool {
        self.position_change_internal(false) != Point::ZERO
    }

    pub fn position_changed_ignore_consumed(&self) -> bool {
        self.position_change_internal(true) != Point::ZERO
    }

    /// Movement since the previous batch, or zero once consumed.
    pub fn position_change(&self) -> Point {
        self.position_change_internal(false)
    }

    pub fn position_change_ignore_consumed(&self) -> Point {
        self.position_change_internal(true)
    }

    fn position_change_internal(&self, ignore_consumed: bool) -> Point {
        let offset = self.position - self.previous_position;
        if !ignore_consumed && self.is_consumed() {
            Point::ZERO
        } else {
            offset
        }
    }
}

/// One batch of changes delivered to recognizers.
#[derive(Clone, Debug, Default)]
pub struct PointerEvent {
    pub changes: Vec<Rc<PointerInputChange>>,
}

impl PointerEvent {
    pub fn new(changes: Vec<Rc<PointerInputChange>>) -> Self {
        Self { changes }
    }

    pub fn change(&self, id: PointerId) -> Option<&Rc<PointerInputChange>> {
        self.changes.iter().find(|change| change.id == id)
    }

    pub fn any_pressed(&self) -> bool {
        self.changes.iter().any(|change| change.pressed)
    }

    pub fn pressed_count(&self) -> usize {
        self.changes.iter().filter(|change| change.pressed).count()
    }

    pub fn is_any_consumed(&self) -> bool {
        self.changes.iter().any(|change| change.is_consumed())
    }

    pub fn consume_all(&self) {
        for change in &self.changes {
            change.consume();
        }
    }
}
