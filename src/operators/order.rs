//! Full sort.
//!
//! The one stage that buffers its whole input. It stays lazy about *when*: the
//! source is drained on the first query, sorted once (stably), and served from
//! the buffer afterwards.

use core::cmp::Ordering;
use core::fmt;

use crate::foundation::cursor::Cursor;
use crate::foundation::lookahead::Advance;
use crate::foundation::types::Primitive;

/// How a [`Sorted`] stage orders its buffer.
pub trait SortOrder<T> {
    /// Sorts `buffer` in place.
    fn sort(&mut self, buffer: &mut [T]);
}

/// The element type's [`Ord`] order.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaturalOrder;

impl<T: Ord> SortOrder<T> for NaturalOrder {
    fn sort(&mut self, buffer: &mut [T]) {
        buffer.sort();
    }
}

/// Numeric order for the unboxed kinds, total for floats.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericOrder;

impl<T: Primitive> SortOrder<T> for NumericOrder {
    fn sort(&mut self, buffer: &mut [T]) {
        debug_assert!(T::KIND.is_numeric(), "numeric sort over {}", T::KIND);
        tracing::trace!(kind = %T::KIND, len = buffer.len(), "numeric sort");
        buffer.sort_by(T::numeric_cmp);
    }
}

/// A user comparator.
#[derive(Clone, Copy)]
pub struct CompareBy<F>(pub F);

impl<T, F> SortOrder<T> for CompareBy<F>
where
    F: FnMut(&T, &T) -> Ordering,
{
    fn sort(&mut self, buffer: &mut [T]) {
        buffer.sort_by(&mut self.0);
    }
}

/// Order by an extracted key.
#[derive(Clone, Copy)]
pub struct KeyBy<F>(pub F);

impl<T, K, F> SortOrder<T> for KeyBy<F>
where
    F: FnMut(&T) -> K,
    K: Ord,
{
    fn sort(&mut self, buffer: &mut [T]) {
        buffer.sort_by_key(&mut self.0);
    }
}

/// Materializes the source, sorts it, and serves it in order.
pub struct Sorted<C: Cursor, O> {
    source: C,
    order: O,
    capacity: usize,
    buffer: std::vec::IntoIter<C::Item>,
}

impl<C, O> Sorted<C, O>
where
    C: Cursor,
    O: SortOrder<C::Item>,
{
    /// Sorts `source` with `order`.
    pub fn new(source: C, order: O) -> Self {
        Self::with_capacity(source, order, 0)
    }

    /// Sorts `source` with `order`, pre-sizing the buffer.
    pub fn with_capacity(source: C, order: O, capacity: usize) -> Self {
        Self {
            source,
            order,
            capacity,
            buffer: Vec::new().into_iter(),
        }
    }

    /// Elements still waiting in the buffer.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    fn materialize(&mut self) {
        let mut buffer = Vec::with_capacity(self.capacity);
        while let Some(item) = self.source.pull() {
            buffer.push(item);
        }
        self.order.sort(&mut buffer);
        tracing::debug!(len = buffer.len(), "materialized sort buffer");
        self.buffer = buffer.into_iter();
    }
}

impl<C, O> Advance for Sorted<C, O>
where
    C: Cursor,
    O: SortOrder<C::Item>,
{
    type Item = C::Item;

    fn compute_next(&mut self, initialized: bool) -> Option<C::Item> {
        if !initialized {
            self.materialize();
        }
        self.buffer.next()
    }

    fn close(&mut self) {
        self.source.close();
    }
}

impl<C: Cursor + fmt::Debug, O: fmt::Debug> fmt::Debug for Sorted<C, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sorted")
            .field("source", &self.source)
            .field("order", &self.order)
            .field("buffered", &self.buffer.len())
            .finish()
    }
}
