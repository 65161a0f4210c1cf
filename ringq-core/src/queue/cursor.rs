use crate::{Queue, QueueError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    BeforeFirst,
    At(usize),
    Exhausted,
}

/// A detached, fail-fast traversal over a [`Queue`].
///
/// A cursor holds only a logical position and the queue's mutation stamp from when it was created
/// or last reset; the queue itself is passed to each call. That leaves the caller free to mutate
/// the queue between steps, and any such mutation makes the next [`Cursor::advance`] or
/// [`Cursor::current`] fail with [`QueueError::Modified`] rather than skip or repeat elements. The
/// cursor stays invalid until [`Cursor::reset`].
///
/// A cursor must only be used with the queue that created it.
///
/// ```
/// use ringq_core::Queue;
///
/// let queue: Queue<_> = ["first", "second", "third"].into();
/// let mut cursor = queue.cursor();
/// let mut seen = Vec::new();
/// while cursor.advance(&queue)? {
///     seen.push(*cursor.current(&queue)?);
/// }
/// assert_eq!(vec!["first", "second", "third"], seen);
/// # Ok::<(), ringq_core::QueueError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Cursor {
    stamp: u64,
    position: Position,
}

impl Cursor {
    pub(super) fn new<T>(queue: &Queue<T>) -> Self {
        Self {
            stamp: queue.stamp(),
            position: Position::BeforeFirst,
        }
    }

    /// Move to the next element, returning `false` once every element has been visited. An
    /// exhausted cursor keeps returning `false` until it is reset.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Modified`] if the queue changed since the cursor was created or
    /// last reset.
    pub fn advance<T>(&mut self, queue: &Queue<T>) -> Result<bool, QueueError> {
        self.check_stamp(queue)?;

        let next = match self.position {
            Position::BeforeFirst => 0,
            Position::At(index) => index + 1,
            Position::Exhausted => return Ok(false),
        };

        if next < queue.len() {
            self.position = Position::At(next);
            Ok(true)
        } else {
            self.position = Position::Exhausted;
            Ok(false)
        }
    }

    /// The element the cursor is positioned on.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::NoCurrentElement`] before the first advance and after exhaustion,
    /// and [`QueueError::Modified`] if the queue changed since the cursor was created or last
    /// reset.
    pub fn current<'q, T>(&self, queue: &'q Queue<T>) -> Result<&'q T, QueueError> {
        self.check_stamp(queue)?;

        match self.position {
            Position::At(index) => queue.get(index).ok_or(QueueError::NoCurrentElement),
            Position::BeforeFirst | Position::Exhausted => Err(QueueError::NoCurrentElement),
        }
    }

    /// Advance and return the new current element, or `None` once exhausted.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Modified`] under the same conditions as [`Cursor::advance`].
    pub fn step<'q, T>(&mut self, queue: &'q Queue<T>) -> Result<Option<&'q T>, QueueError> {
        if self.advance(queue)? {
            self.current(queue).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Return to before the first element and resynchronize with the queue's current stamp.
    pub fn reset<T>(&mut self, queue: &Queue<T>) {
        self.stamp = queue.stamp();
        self.position = Position::BeforeFirst;
    }

    fn check_stamp<T>(&self, queue: &Queue<T>) -> Result<(), QueueError> {
        let found = queue.stamp();
        if self.stamp != found {
            return Err(QueueError::Modified {
                expected: self.stamp,
                found,
            });
        }

        Ok(())
    }
}
