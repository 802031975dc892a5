//! Turns raw host batches into [`PointerEvent`]s with previous-state deltas.

use std::collections::HashMap;
use std::rc::Rc;

use zoomable_geometry::Point;

use super::types::{PointerEvent, PointerId, PointerInputChange, PointerInputEvent, PointerType};

struct PointerInputData {
    uptime: u64,
    position: Point,
    down: bool,
    type_: PointerType,
}

/// Remembers each pointer's last reported state so every produced change
/// carries its previous position and pressed flag.
///
/// A pointer that was down in the previous batch but is missing from the next
/// one is reported as a lift whose change is already consumed. Recognizers
/// treat a consumed lift as a cancellation rather than a normal end.
#[derive(Default)]
pub struct PointerInputChangeProducer {
    previous_pointer_input_data: HashMap<PointerId, PointerInputData>,
}

impl PointerInputChangeProducer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn produce(&mut self, event: &PointerInputEvent) -> PointerEvent {
        let mut changes = Vec::with_capacity(event.pointers.len());

        for pointer in &event.pointers {
            let (previous_uptime, previous_position, previous_down) =
                match self.previous_pointer_input_data.get(&pointer.id) {
                    Some(prev) => (prev.uptime, prev.position, prev.down),
                    None => (pointer.uptime, pointer.position, false),
                };

            changes.push(Rc::new(PointerInputChange::new(
                pointer.id,
                pointer.uptime,
                pointer.position,
                pointer.down,
                previous_uptime,
                previous_position,
                previous_down,
                pointer.type_,
            )));
        }

        let mut vanished: Vec<PointerId> = self
            .previous_pointer_input_data
            .keys()
            .copied()
            .filter(|id| !event.pointers.iter().any(|pointer| pointer.id == *id))
            .collect();
        vanished.sort_unstable();

        for id in vanished {
            if let Some(prev) = self.previous_pointer_input_data.remove(&id) {
                log::warn!("pointer {id} vanished without a lift; cancelling it");
                let change = PointerInputChange::new(
                    id,
                    event.uptime,
                    prev.position,
                    false,
                    prev.uptime,
                    prev.position,
                    prev.down,
                    prev.type_,
                );
                change.consume();
                changes.push(Rc::new(change));
            }
        }

        for pointer in &event.pointers {
            if pointer.down {
                self.previous_pointer_input_data.insert(
                    pointer.id,
                    PointerInputData {
                        uptime: pointer.uptime,
                        position: pointer.position,
                        down: pointer.down,
                        type_: pointer.type_,
                    },
                );
            } else {
                self.previous_pointer_input_data.remove(&pointer.id);
            }
        }

        PointerEvent::new(changes)
    }

    pub fn tracked_pointer_count(&self) -> usize {
        self.previous_pointer_input_data.len()
    }

    pub fn clear(&mut self) {
        self.previous_pointer_input_data.clear();
    }
}
