//! Tap and double-tap recognizer.
//!
//! Runs as its own loop beside the drag/transform loop and sees the same
//! batches. A tap is a single pointer going down and up without moving past
//! slop and without any of its changes being consumed by another recognizer.

use smallvec::SmallVec;
use zoomable_geometry::Point;

use crate::config::ViewConfiguration;
use crate::nodes::input::types::{PointerEvent, PointerId};

#[derive(Clone, Debug, PartialEq)]
pub enum TapEvent {
    Press(Point),
    Tap(Point),
    DoubleTap(Point),
    /// The pressed pointer moved, was claimed, or was joined by another.
    Cancel,
}

pub type TapEvents = SmallVec<[TapEvent; 2]>;

#[derive(Clone, Copy, Debug, PartialEq)]
enum TapPhase {
    Idle,
    Pressed {
        id: PointerId,
        down_position: Point,
        down_uptime: u64,
    },
    /// Candidate lost; wait for every pointer to lift.
    AwaitingAllUp,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct CompletedTap {
    position: Point,
    up_uptime: u64,
}

#[derive(Debug)]
pub struct TapGestureRecognizer {
    config: ViewConfiguration,
    phase: TapPhase,
    last_tap: Option<CompletedTap>,
}

impl TapGestureRecognizer {
    pub fn new(config: ViewConfiguration) -> Self {
        Self {
            config,
            phase: TapPhase::Idle,
            last_tap: None,
        }
    }

    pub fn reset(&mut self) {
        self.phase = TapPhase::Idle;
        self.last_tap = None;
    }

    pub fn on_event(&mut self, event: &PointerEvent) -> TapEvents {
        let mut out = TapEvents::new();

        match self.phase {
            TapPhase::Idle => {
                let Some(down) = event.changes.iter().find(|change| change.changed_to_down()) else {
                    return out;
                };
                if event.pressed_count() > 1 {
                    self.phase = TapPhase::AwaitingAllUp;
                    return out;
                }
                self.phase = TapPhase::Pressed {
                    id: down.id,
                    down_position: down.position,
                    down_uptime: down.uptime,
                };
                out.push(TapEvent::Press(down.position));
            }
            TapPhase::Pressed {
                id,
                down_position,
                down_uptime,
            } => {
                let Some(change) = event.change(id) else {
                    self.cancel(event, &mut out);
                    return out;
                };

                let slop = self.config.pointer_slop(change.type_);
                let moved_too_far = (change.position - down_position).get_distance() > slop;
                let other_pressed = event
                    .changes
                    .iter()
                    .any(|other| other.id != id && other.pressed);

                if change.is_consumed() || moved_too_far || other_pressed {
                    self.cancel(event, &mut out);
                    return out;
                }

                if change.changed_to_up() {
                    change.consume();
                    self.phase = TapPhase::Idle;
                    if self.is_double_tap(down_position, down_uptime) {
                        log::debug!("tap: double tap at {:?}", change.position);
                        self.last_tap = None;
                        out.push(TapEvent::DoubleTap(change.position));
                    } else {
                        log::debug!("tap: tap at {:?}", change.position);
                        self.last_tap = Some(CompletedTap {
                            position: change.position,
                            up_uptime: change.uptime,
                        });
                        out.push(TapEvent::Tap(change.position));
                    }
                }
            }
            TapPhase::AwaitingAllUp => {
                if !event.any_pressed() {
                    self.phase = TapPhase::Idle;
                }
            }
        }

        out
    }

    fn is_double_tap(&self, down_position: Point, down_uptime: u64) -> bool {
        let Some(previous) = self.last_tap else {
            return false;
        };
        let gap = down_uptime.saturating_sub(previous.up_uptime);
        let within_time = gap >= self.config.double_tap_min_time_millis
            && gap <= self.config.double_tap_timeout_millis;
        let within_slop =
            (down_position - previous.position).get_distance() <= self.config.double_tap_slop;
        within_time && within_slop
    }

    fn cancel(&mut self, event: &PointerEvent, out: &mut TapEvents) {
        log::debug!("tap: candidate cancelled");
        self.last_tap = None;
        self.phase = if event.any_pressed() {
            TapPhase::AwaitingAllUp
        } else {
            TapPhase::Idle
        };
        out.push(TapEvent::Cancel);
    }
}
