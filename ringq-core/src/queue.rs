mod cursor;
mod iter;


use crate::QueueError;
use std::cmp;
use std::fmt::{self, Formatter};
use std::ops::Range;

pub use cursor::Cursor;
pub use iter::{IntoIter, Iter};

const DEFAULT_CAPACITY: usize = 4;
const GROWTH_FACTOR: usize = 2;
const MINIMUM_GROW: usize = 4;

fn grown_capacity(capacity: usize) -> usize {
    if capacity == 0 {
        return DEFAULT_CAPACITY;
    }

    cmp::max(
        capacity.saturating_mul(GROWTH_FACTOR),
        capacity.saturating_add(MINIMUM_GROW),
    )
}

fn empty_slots<T>(capacity: usize) -> Vec<Option<T>> {
    let mut slots = Vec::with_capacity(capacity);
    slots.resize_with(capacity, || None);
    slots
}

/// A first-in, first-out queue stored in a growable circular buffer.
///
/// Elements live in `slots[(head + i) % capacity]` for logical positions `0..len`; every other slot
/// is `None`. Enqueueing into a full buffer reallocates to
/// `max(2 * capacity, capacity + 4)` slots (4 when growing from empty) and lays the elements out
/// again starting at slot 0.
///
/// Every structural mutation (enqueue, dequeue, clear, growth) advances an internal stamp, which
/// is what lets a [`Cursor`] detect that the queue changed while it was being traversed.
#[derive(Clone)]
pub struct Queue<T> {
    slots: Vec<Option<T>>,
    head: usize,
    tail: usize,
    len: usize,
    stamp: u64,
}

impl<T> Queue<T> {
    /// Create an empty queue with no storage allocated.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty queue with room for `capacity` elements before the first reallocation.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: empty_slots(capacity),
            head: 0,
            tail: 0,
            len: 0,
            stamp: 0,
        }
    }

    /// Like [`Queue::with_capacity`], but for a signed capacity coming from an untrusted source.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::NegativeCapacity`] if `capacity < 0`.
    pub fn try_with_capacity(capacity: isize) -> Result<Self, QueueError> {
        let capacity_usize =
            usize::try_from(capacity).map_err(|_| QueueError::NegativeCapacity { capacity })?;
        Ok(Self::with_capacity(capacity_usize))
    }

    /// Build a queue holding the elements of `source` in iteration order. Callers holding a
    /// source that is always present should use `collect()` instead.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::MissingSource`] if `source` is `None`.
    pub fn try_from_source<I>(source: Option<I>) -> Result<Self, QueueError>
    where
        I: IntoIterator<Item = T>,
    {
        let Some(source) = source else {
            return Err(QueueError::MissingSource);
        };

        let queue: Self = source.into_iter().collect();
        log::trace!(
            "built queue of {} elements from source, capacity {}",
            queue.len,
            queue.capacity()
        );

        Ok(queue)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of elements the queue can hold before the next enqueue reallocates.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn stamp(&self) -> u64 {
        self.stamp
    }

    fn physical_index(&self, index: usize) -> usize {
        (self.head + index) % self.slots.len()
    }

    /// The live slot ranges in logical order: `[head, capacity)` and then `[0, tail)` if the
    /// contents wrap, otherwise `[head, head + len)` and an empty range.
    fn segments(&self) -> (Range<usize>, Range<usize>) {
        let capacity = self.slots.len();
        let end = self.head + self.len;
        if end <= capacity {
            (self.head..end, 0..0)
        } else {
            (self.head..capacity, 0..end - capacity)
        }
    }

    /// Element at logical position `index`, where 0 is the oldest element.
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }

        self.slots[self.physical_index(index)].as_ref()
    }

    /// Add an element to the back of the queue, growing the storage first if it is full.
    pub fn enqueue(&mut self, item: T) {
        if self.len == self.slots.len() {
            self.grow();
        }

        self.slots[self.tail] = Some(item);
        self.tail = (self.tail + 1) % self.slots.len();
        self.len += 1;
        self.bump_stamp();
    }

    /// Remove and return the oldest element. The vacated slot no longer owns the value.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Empty`] if the queue is empty.
    pub fn dequeue(&mut self) -> Result<T, QueueError> {
        if self.is_empty() {
            return Err(QueueError::Empty);
        }

        let item = self
            .slots
            .get_mut(self.head)
            .and_then(Option::take)
            .ok_or(QueueError::Empty)?;
        self.head = (self.head + 1) % self.slots.len();
        self.len -= 1;
        self.bump_stamp();

        Ok(item)
    }

    /// The oldest element, without removing it.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Empty`] if the queue is empty.
    pub fn peek(&self) -> Result<&T, QueueError> {
        if self.is_empty() {
            return Err(QueueError::Empty);
        }

        self.slots
            .get(self.head)
            .and_then(Option::as_ref)
            .ok_or(QueueError::Empty)
    }

    /// Drop every element. The storage keeps its current capacity.
    pub fn clear(&mut self) {
        let (front, back) = self.segments();
        self.slots[front].fill_with(|| None);
        self.slots[back].fill_with(|| None);

        self.head = 0;
        self.tail = 0;
        self.len = 0;
        self.bump_stamp();
    }

    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|element| element == item)
    }

    /// Copy the elements, oldest first, into a new `Vec` of exactly `len()` elements.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        let (front, back) = self.segments();

        let mut out = Vec::with_capacity(self.len);
        out.extend(self.slots[front].iter().flatten().cloned());
        out.extend(self.slots[back].iter().flatten().cloned());
        out
    }

    /// Start a stamp-checked traversal over the queue's current contents.
    pub fn cursor(&self) -> Cursor {
        Cursor::new(self)
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    fn grow(&mut self) {
        let old_capacity = self.slots.len();
        let new_capacity = grown_capacity(old_capacity);
        let (front, back) = self.segments();

        let mut slots = Vec::with_capacity(new_capacity);
        slots.extend(self.slots[front].iter_mut().map(Option::take));
        slots.extend(self.slots[back].iter_mut().map(Option::take));
        slots.resize_with(new_capacity, || None);

        self.slots = slots;
        self.head = 0;
        self.tail = self.len % new_capacity;
        self.bump_stamp();

        log::debug!(
            "grew queue storage from {old_capacity} to {new_capacity} slots with {} live elements",
            self.len
        );
    }

    fn bump_stamp(&mut self) {
        self.stamp = self.stamp.wrapping_add(1);
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Queue<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

// Equality is by logical contents; storage layout and stamp don't participate.
impl<T: PartialEq> PartialEq for Queue<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for Queue<T> {}

impl<T> FromIterator<T> for Queue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}

impl<T, const N: usize> From<[T; N]> for Queue<T> {
    fn from(value: [T; N]) -> Self {
        value.into_iter().collect()
    }
}

impl<T> Extend<T> for Queue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.enqueue(item);
        }
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for Queue<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T> IntoIterator for Queue<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<'a, T> IntoIterator for &'a Queue<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
