//! Pointer batch dispatcher.
//!
//! Hosts enqueue batches as they arrive and drain them into handlers. Each
//! batch reaches every handler in registration order, so a change consumed
//! by an earlier handler is already marked when a later one looks at it.

use std::collections::VecDeque;

use super::types::PointerEvent;

/// A consumer of pointer batches, such as a recognizer loop.
pub trait PointerEventHandler {
    fn on_pointer_event(&mut self, event: &PointerEvent);
}

impl<F> PointerEventHandler for F
where
    F: FnMut(&PointerEvent),
{
    fn on_pointer_event(&mut self, event: &PointerEvent) {
        self(event)
    }
}

#[derive(Default)]
pub struct PointerDispatcher {
    queue: VecDeque<PointerEvent>,
}

impl PointerDispatcher {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    pub fn push(&mut self, event: PointerEvent) {
        self.queue.push_back(event);
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn drain(&mut self, handlers: &mut [&mut dyn PointerEventHandler]) {
        while let Some(event) = self.queue.pop_front() {
            for handler in handlers.iter_mut() {
                handler.on_pointer_event(&event);
            }
        }
    }
}
