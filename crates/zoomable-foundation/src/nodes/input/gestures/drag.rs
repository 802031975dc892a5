//! Single-pointer drag recognizer.
//!
//! Driven one batch at a time: each call to
//! [`DragGestureRecognizer::on_event`] is one "await next event" step of the
//! gesture loop. The recognizer tracks one driving pointer, hands off to
//! another pressed pointer when the driver lifts, and reports signed deltas
//! since the previous batch.

use smallvec::SmallVec;
use zoomable_geometry::Point;

use super::slop::{Orientation, TouchSlopDetector};
use crate::config::ViewConfiguration;
use crate::nodes::input::types::{PointerEvent, PointerId, PointerInputChange};

#[derive(Clone, Debug, PartialEq)]
pub enum DragEvent {
    /// Slop crossed (or the pointer went down, when slop is skipped).
    /// `position` is where the driving pointer first went down.
    Start { id: PointerId, position: Point },
    /// Movement of the driving pointer since the previous batch.
    Move {
        id: PointerId,
        position: Point,
        delta: Point,
    },
    End { id: PointerId, position: Point },
    Cancel,
}

pub type DragEvents = SmallVec<[DragEvent; 2]>;

#[derive(Clone, Debug, PartialEq)]
pub enum DragPhase {
    Idle,
    AwaitingDown,
    AwaitingSlop {
        pointer: PointerId,
        down_position: Point,
    },
    Dragging {
        pointer: PointerId,
    },
    Ended,
    Canceled,
}

type SlopFilter = Box<dyn FnMut(&PointerInputChange, Point) -> bool>;
type CancelPredicate = Box<dyn FnMut(&PointerInputChange) -> bool>;

pub struct DragGestureRecognizer {
    config: ViewConfiguration,
    orientation: Option<Orientation>,
    await_touch_slop: bool,
    consume_down: bool,
    phase: DragPhase,
    slop_detector: TouchSlopDetector,
    slop_filter: Option<SlopFilter>,
    cancel_predicate: Option<CancelPredicate>,
    /// Whether any pointer was pressed after the previous batch.
    pointers_down: bool,
}

impl DragGestureRecognizer {
    pub fn new(config: ViewConfiguration) -> Self {
        Self {
            config,
            orientation: None,
            await_touch_slop: true,
            consume_down: false,
            phase: DragPhase::Idle,
            slop_detector: TouchSlopDetector::new(None),
            slop_filter: None,
            cancel_predicate: None,
            pointers_down: false,
        }
    }

    /// Constrain slop detection and reported deltas to one axis.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self.slop_detector = TouchSlopDetector::new(Some(orientation));
        self
    }

    /// When false, the drag starts on pointer-down with no slop phase.
    pub fn await_touch_slop(mut self, await_touch_slop: bool) -> Self {
        self.await_touch_slop = await_touch_slop;
        self
    }

    /// Consume the initiating down so competing recognizers ignore it.
    pub fn consume_down(mut self, consume_down: bool) -> Self {
        self.consume_down = consume_down;
        self
    }

    /// Called when slop is crossed with the post-slop offset. Returning false
    /// declines the drag: the slop accumulator restarts from zero.
    pub fn with_slop_filter(
        mut self,
        filter: impl FnMut(&PointerInputChange, Point) -> bool + 'static,
    ) -> Self {
        self.slop_filter = Some(Box::new(filter));
        self
    }

    /// Returning true for a driving change ends the drag with `Cancel`.
    pub fn with_cancel_predicate(
        mut self,
        predicate: impl FnMut(&PointerInputChange) -> bool + 'static,
    ) -> Self {
        self.cancel_predicate = Some(Box::new(predicate));
        self
    }

    pub fn phase(&self) -> &DragPhase {
        &self.phase
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging { .. })
    }

    /// Tears the loop down to `Idle`. The next batch restarts recognition.
    pub fn reset(&mut self) {
        self.phase = DragPhase::Idle;
        self.slop_detector.reset();
    }

    pub fn on_event(&mut self, event: &PointerEvent) -> DragEvents {
        let mut out = DragEvents::new();
        let pointers_were_down = self.pointers_down;
        self.pointers_down = event.any_pressed();

        if matches!(self.phase, DragPhase::Idle) {
            self.phase = DragPhase::AwaitingDown;
        }

        // A finished gesture waits for every pointer to lift before the next
        // one may begin.
        if matches!(self.phase, DragPhase::Ended | DragPhase::Canceled) {
            if pointers_were_down {
                return out;
            }
            self.phase = DragPhase::AwaitingDown;
        }

        match self.phase.clone() {
            DragPhase::AwaitingDown => self.await_down(event, &mut out),
            DragPhase::AwaitingSlop {
                pointer,
                down_position,
            } => self.await_slop(event, pointer, down_position, &mut out),
            DragPhase::Dragging { pointer } => self.drag(event, pointer, &mut out),
            DragPhase::Idle | DragPhase::Ended | DragPhase::Canceled => {}
        }

        out
    }

    fn await_down(&mut self, event: &PointerEvent, out: &mut DragEvents) {
        let Some(down) = event
            .changes
            .iter()
            .find(|change| change.changed_to_down_ignore_consumed())
        else {
            return;
        };

        if self.consume_down {
            down.consume();
        }

        if self.await_touch_slop {
            log::debug!("drag: pointer {} down, awaiting slop", down.id);
            self.slop_detector.reset();
            self.phase = DragPhase::AwaitingSlop {
                pointer: down.id,
                down_position: down.position,
            };
        } else {
            log::debug!("drag: pointer {} down, starting without slop", down.id);
            self.phase = DragPhase::Dragging { pointer: down.id };
            out.push(DragEvent::Start {
                id: down.id,
                position: down.position,
            });
        }
    }

    fn await_slop(
        &mut self,
        event: &PointerEvent,
        pointer: PointerId,
        down_position: Point,
        out: &mut DragEvents,
    ) {
        let Some(change) = event.change(pointer) else {
            log::warn!("drag: pointer {pointer} missing from batch, cancelling");
            self.phase = DragPhase::Canceled;
            return;
        };

        if change.changed_to_up_ignore_consumed() {
            if change.is_consumed() {
                log::debug!("drag: slop pointer {pointer} lift was claimed, cancelling");
                self.phase = DragPhase::Canceled;
                return;
            }
            match event.changes.iter().find(|other| other.pressed) {
                Some(other) => {
                    log::debug!("drag: slop pointer {pointer} lifted, handing off to {}", other.id);
                    self.phase = DragPhase::AwaitingSlop {
                        pointer: other.id,
                        down_position,
                    };
                }
                None => {
                    log::debug!("drag: pointer {pointer} lifted before slop");
                    self.phase = DragPhase::Canceled;
                }
            }
            return;
        }

        if change.is_consumed() {
            // Someone else claimed this motion; start counting again.
            self.slop_detector.reset();
            return;
        }

        let touch_slop = self.config.pointer_slop(change.type_);
        let Some(over_slop) = self
            .slop_detector
            .add_pointer_input_change(change, touch_slop)
        else {
            return;
        };

        if let Some(filter) = self.slop_filter.as_mut() {
            if !filter(change, over_slop) {
                log::debug!("drag: slop crossed but declined, resetting");
                self.slop_detector.reset();
                return;
            }
        }

        change.consume();
        self.slop_detector.reset();
        self.phase = DragPhase::Dragging { pointer };
        log::debug!("drag: slop crossed by pointer {pointer}, over slop {over_slop:?}");

        out.push(DragEvent::Start {
            id: pointer,
            position: down_position,
        });
        let delta = self.constrain(over_slop);
        if delta != Point::ZERO {
            out.push(DragEvent::Move {
                id: pointer,
                position: change.position,
                delta,
            });
        }
    }

    fn drag(&mut self, event: &PointerEvent, pointer: PointerId, out: &mut DragEvents) {
        let Some(change) = event.change(pointer) else {
            log::warn!("drag: pointer {pointer} missing from batch, cancelling");
            self.cancel(out);
            return;
        };

        if change.changed_to_up_ignore_consumed() {
            // A claimed lift (including a pointer the host stopped reporting)
            // cancels even when another pointer could take over.
            if change.is_consumed() {
                log::debug!("drag: pointer {pointer} lift was claimed, cancelling");
                self.cancel(out);
                return;
            }

            if let Some(other) = event.changes.iter().find(|other| other.pressed) {
                log::debug!("drag: pointer {pointer} lifted, handing off to {}", other.id);
                self.phase = DragPhase::Dragging { pointer: other.id };
                return;
            }

            let delta = self.constrain(change.position_change());
            if delta != Point::ZERO {
                out.push(DragEvent::Move {
                    id: pointer,
                    position: change.position,
                    delta,
                });
            }
            change.consume();
            log::debug!("drag: ended by pointer {pointer}");
            self.phase = DragPhase::Ended;
            out.push(DragEvent::End {
                id: pointer,
                position: change.position,
            });
            return;
        }

        if change.is_consumed() {
            log::debug!("drag: pointer {pointer} consumed elsewhere, cancelling");
            self.cancel(out);
            return;
        }

        if let Some(predicate) = self.cancel_predicate.as_mut() {
            if predicate(change) {
                log::debug!("drag: cancel predicate matched for pointer {pointer}");
                self.cancel(out);
                return;
            }
        }

        if change.position_changed() {
            let delta = self.constrain(change.position_change());
            change.consume();
            log::trace!("drag: pointer {pointer} delta {delta:?}");
            out.push(DragEvent::Move {
                id: pointer,
                position: change.position,
                delta,
            });
        }
    }

    fn cancel(&mut self, out: &mut DragEvents) {
        self.phase = DragPhase::Canceled;
        out.push(DragEvent::Cancel);
    }

    fn constrain(&self, delta: Point) -> Point {
        match self.orientation {
            Some(orientation) => orientation.project(delta),
            None => delta,
        }
    }
}

impl std::fmt::Debug for DragGestureRecognizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DragGestureRecognizer")
            .field("phase", &self.phase)
            .field("orientation", &self.orientation)
            .field("await_touch_slop", &self.await_touch_slop)
            .finish()
    }
}
