use crate::transform::{MutatePriority, SessionId};

/// Why a transform write did not happen.
///
/// None of these are fatal; callers typically log and drop the tick.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationError {
    /// A newer session took over; this session's writes are discarded.
    Preempted { session: SessionId },
    /// A higher-priority session already holds the state.
    Rejected {
        held: MutatePriority,
        requested: MutatePriority,
    },
    /// Non-finite delta or non-positive zoom factor.
    InvalidChange,
}

impl std::fmt::Display for MutationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MutationError::Preempted { session } => {
                write!(f, "mutation session {session} was preempted")
            }
            MutationError::Rejected { held, requested } => {
                write!(
                    f,
                    "cannot start {requested:?} mutation while a {held:?} mutation is running"
                )
            }
            MutationError::InvalidChange => {
                write!(f, "transform change is not finite or zoom is not positive")
            }
        }
    }
}

impl std::error::Error for MutationError {}
