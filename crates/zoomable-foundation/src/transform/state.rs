//! Shared transform state and the mutation arbiter guarding it.
//!
//! Writers never touch [`TransformState`] directly. They acquire a
//! [`MutationSession`] from [`TransformableState::begin`] and call
//! [`MutationSession::transform_by`]. Only the most recent compatible session
//! may write; a session that has been preempted gets
//! [`MutationError::Preempted`] from every later write, and whatever it
//! already applied stays applied.

use std::cell::RefCell;
use std::rc::Rc;

use zoomable_geometry::{normalize_degrees, GraphicsLayer, Point};

use crate::error::MutationError;
use crate::gesture_constants::{OFFSET_EPSILON_SQUARED, TRANSFORM_EPSILON};

pub type SessionId = u64;

/// Ordering matters: a request may preempt any session of equal or lower
/// priority.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MutatePriority {
    Default,
    UserInput,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformState {
    pub scale: f32,
    pub offset: Point,
    /// Always within `(-180, 180]`.
    pub rotation_degrees: f32,
}

impl TransformState {
    pub const IDENTITY: TransformState = TransformState {
        scale: 1.0,
        offset: Point::ZERO,
        rotation_degrees: 0.0,
    };

    pub fn is_not_transformed(&self) -> bool {
        (self.scale - 1.0).abs() < TRANSFORM_EPSILON
            && self.offset.get_distance_squared() < OFFSET_EPSILON_SQUARED
            && self.rotation_degrees.abs() < TRANSFORM_EPSILON
    }

    pub fn is_transformed(&self) -> bool {
        !self.is_not_transformed()
    }

    /// Layer values for a renderer pivoting on the element center.
    pub fn graphics_layer(&self) -> GraphicsLayer {
        GraphicsLayer {
            scale_x: self.scale,
            scale_y: self.scale,
            translation_x: self.offset.x,
            translation_y: self.offset.y,
            rotation_z: self.rotation_degrees,
        }
    }

    fn apply(&mut self, zoom_change: f32, pan_change: Point, rotation_change: f32) {
        self.scale *= zoom_change;
        self.offset += pan_change;
        self.rotation_degrees = normalize_degrees(self.rotation_degrees + rotation_change);
    }
}

impl Default for TransformState {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[derive(Clone, Copy, Debug)]
struct Owner {
    id: SessionId,
    priority: MutatePriority,
}

#[derive(Debug)]
struct TransformableInner {
    transform: TransformState,
    owner: Option<Owner>,
    next_session_id: SessionId,
}

/// Owner of a [`TransformState`] plus the single-writer arbiter.
///
/// Cloning shares the same state. Everything runs on one thread; preemption
/// takes effect at the loser's next write.
#[derive(Clone, Debug)]
pub struct TransformableState {
    inner: Rc<RefCell<TransformableInner>>,
}

impl TransformableState {
    pub fn new(initial: TransformState) -> Self {
        Self {
            inner: Rc::new(RefCell::new(TransformableInner {
                transform: initial,
                owner: None,
                next_session_id: 1,
            })),
        }
    }

    pub fn transform(&self) -> TransformState {
        self.inner.borrow().transform
    }

    pub fn is_transform_in_progress(&self) -> bool {
        self.inner.borrow().owner.is_some()
    }

    /// Acquire exclusive write access.
    ///
    /// A request of equal or higher priority than the running session takes
    /// over; a lower-priority request is rejected and the running session
    /// keeps going.
    pub fn begin(&self, priority: MutatePriority) -> Result<MutationSession, MutationError> {
        let mut inner = self.inner.borrow_mut();
        if let Some(owner) = inner.owner {
            if priority < owner.priority {
                return Err(MutationError::Rejected {
                    held: owner.priority,
                    requested: priority,
                });
            }
            log::debug!(
                "transform session {} ({:?}) preempted by {:?} request",
                owner.id,
                owner.priority,
                priority
            );
        }

        let id = inner.next_session_id;
        inner.next_session_id += 1;
        inner.owner = Some(Owner { id, priority });

        Ok(MutationSession {
            inner: Rc::clone(&self.inner),
            id,
            priority,
        })
    }

    /// Run `body` inside a session that is released when it returns.
    pub fn mutate<R>(
        &self,
        priority: MutatePriority,
        body: impl FnOnce(&MutationSession) -> R,
    ) -> Result<R, MutationError> {
        let session = self.begin(priority)?;
        let result = body(&session);
        session.release();
        Ok(result)
    }
}

impl Default for TransformableState {
    fn default() -> Self {
        Self::new(TransformState::IDENTITY)
    }
}

/// Exclusive write token for a [`TransformableState`].
///
/// Dropping the token releases ownership if it still holds it.
#[derive(Debug)]
pub struct MutationSession {
    inner: Rc<RefCell<TransformableInner>>,
    id: SessionId,
    priority: MutatePriority,
}

impl MutationSession {
    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn priority(&self) -> MutatePriority {
        self.priority
    }

    pub fn is_active(&self) -> bool {
        self.inner
            .borrow()
            .owner
            .is_some_and(|owner| owner.id == self.id)
    }

    pub fn transform(&self) -> TransformState {
        self.inner.borrow().transform
    }

    /// `scale *= zoom_change`, `offset += pan_change`, and rotation wrapped
    /// back into `(-180, 180]`.
    pub fn transform_by(
        &self,
        zoom_change: f32,
        pan_change: Point,
        rotation_change: f32,
    ) -> Result<TransformState, MutationError> {
        let mut inner = self.inner.borrow_mut();
        if !inner.owner.is_some_and(|owner| owner.id == self.id) {
            return Err(MutationError::Preempted { session: self.id });
        }

        if !zoom_change.is_finite()
            || zoom_change <= 0.0
            || !pan_change.is_finite()
            || !rotation_change.is_finite()
        {
            log::warn!(
                "session {}: skipping invalid change zoom={zoom_change} pan={pan_change:?} rotation={rotation_change}",
                self.id
            );
            return Err(MutationError::InvalidChange);
        }

        inner.transform.apply(zoom_change, pan_change, rotation_change);
        Ok(inner.transform)
    }

    pub fn release(self) {
        // Drop does the work.
    }
}

impl Drop for MutationSession {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.inner.try_borrow_mut() {
            if inner.owner.is_some_and(|owner| owner.id == self.id) {
                inner.owner = None;
            }
        }
    }
}
