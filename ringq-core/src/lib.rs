//! A growable FIFO queue backed by a single circular buffer.
//!
//! [`Queue`] grows its storage geometrically when an insertion would overflow it, moves values out
//! of vacated slots on removal, and stamps every structural mutation so that a detached [`Cursor`]
//! can fail fast when the queue changes underneath it.

mod error;
mod queue;

pub use error::{ErrorKind, QueueError};
pub use queue::{Cursor, IntoIter, Iter, Queue};
