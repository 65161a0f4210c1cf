use ringq_proc_macros::{EnumDisplay, EnumFromStr};
use thiserror::Error;

/// Broad category of a [`QueueError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumDisplay, EnumFromStr)]
pub enum ErrorKind {
    /// A constructor was handed an argument it cannot accept.
    InvalidArgument,
    /// The operation is not valid in the queue's or cursor's current state.
    InvalidState,
    /// The queue was structurally modified while a cursor was traversing it.
    StructuralMutation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    #[error("capacity must be non-negative, was {capacity}")]
    NegativeCapacity { capacity: isize },
    #[error("source sequence must be present")]
    MissingSource,
    #[error("queue is empty")]
    Empty,
    #[error("cursor is not positioned on an element")]
    NoCurrentElement,
    #[error("queue was modified during traversal (expected stamp {expected}, found {found})")]
    Modified { expected: u64, found: u64 },
}

impl QueueError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NegativeCapacity { .. } | Self::MissingSource => ErrorKind::InvalidArgument,
            Self::Empty | Self::NoCurrentElement => ErrorKind::InvalidState,
            Self::Modified { .. } => ErrorKind::StructuralMutation,
        }
    }
}
