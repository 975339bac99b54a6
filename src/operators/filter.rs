//! Filtering stages: filter, filter-with-index, distinct and distinct-by-key.
//!
//! All of them may discard an unbounded run of upstream elements before
//! deciding, so they sit on the look-ahead engine.

use core::fmt;
use core::hash::Hash;
use std::collections::HashSet;

use crate::foundation::cursor::{Cursor, IndexedCursor};
use crate::foundation::lookahead::Advance;

/// Keeps the elements a predicate accepts.
pub struct Filter<C, P> {
    source: C,
    predicate: P,
}

impl<C, P> Filter<C, P>
where
    C: Cursor,
    P: FnMut(&C::Item) -> bool,
{
    /// Filters `source` with `predicate`.
    pub const fn new(source: C, predicate: P) -> Self {
        Self { source, predicate }
    }
}

impl<C, P> Advance for Filter<C, P>
where
    C: Cursor,
    P: FnMut(&C::Item) -> bool,
{
    type Item = C::Item;

    fn compute_next(&mut self, _initialized: bool) -> Option<C::Item> {
        while let Some(item) = self.source.pull() {
            if (self.predicate)(&item) {
                return Some(item);
            }
        }
        None
    }

    fn close(&mut self) {
        self.source.close();
    }
}

impl<C: fmt::Debug, P> fmt::Debug for Filter<C, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// Keeps the elements a predicate accepts, given their source index.
pub struct FilterIndexed<C, P> {
    source: C,
    predicate: P,
}

impl<C, P> FilterIndexed<C, P>
where
    C: IndexedCursor,
    P: FnMut(usize, &C::Item) -> bool,
{
    /// Filters `source` with `predicate(index, item)`.
    pub const fn new(source: C, predicate: P) -> Self {
        Self { source, predicate }
    }
}

impl<C, P> Advance for FilterIndexed<C, P>
where
    C: IndexedCursor,
    P: FnMut(usize, &C::Item) -> bool,
{
    type Item = C::Item;

    fn compute_next(&mut self, _initialized: bool) -> Option<C::Item> {
        while self.source.has_next() {
            let index = self.source.index();
            let item = self.source.next().ok()?;
            if (self.predicate)(index, &item) {
                return Some(item);
            }
        }
        None
    }

    fn close(&mut self) {
        self.source.close();
    }
}

impl<C: fmt::Debug, P> fmt::Debug for FilterIndexed<C, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterIndexed")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// Drops elements equal to one already produced.
///
/// Memory grows with the number of distinct elements seen.
pub struct Distinct<C: Cursor> {
    source: C,
    seen: HashSet<C::Item>,
}

impl<C> Distinct<C>
where
    C: Cursor,
    C::Item: Eq + Hash + Clone,
{
    /// Deduplicates `source`.
    pub fn new(source: C) -> Self {
        Self::with_capacity(source, 0)
    }

    /// Deduplicates `source`, pre-sizing the seen set.
    pub fn with_capacity(source: C, capacity: usize) -> Self {
        Self {
            source,
            seen: HashSet::with_capacity(capacity),
        }
    }

    /// Number of distinct elements produced so far.
    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }
}

impl<C> Advance for Distinct<C>
where
    C: Cursor,
    C::Item: Eq + Hash + Clone,
{
    type Item = C::Item;

    fn compute_next(&mut self, _initialized: bool) -> Option<C::Item> {
        while let Some(item) = self.source.pull() {
            if self.seen.insert(item.clone()) {
                return Some(item);
            }
        }
        None
    }

    fn close(&mut self) {
        self.source.close();
    }
}

impl<C: Cursor + fmt::Debug> fmt::Debug for Distinct<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Distinct")
            .field("source", &self.source)
            .field("seen", &self.seen.len())
            .finish()
    }
}

/// Drops elements whose key was already produced.
pub struct DistinctBy<C, F, K> {
    source: C,
    key: F,
    seen: HashSet<K>,
}

impl<C, F, K> DistinctBy<C, F, K>
where
    C: Cursor,
    F: FnMut(&C::Item) -> K,
    K: Eq + Hash,
{
    /// Deduplicates `source` by `key`.
    pub fn new(source: C, key: F) -> Self {
        Self::with_capacity(source, key, 0)
    }

    /// Deduplicates `source` by `key`, pre-sizing the seen set.
    pub fn with_capacity(source: C, key: F, capacity: usize) -> Self {
        Self {
            source,
            key,
            seen: HashSet::with_capacity(capacity),
        }
    }
}

impl<C, F, K> Advance for DistinctBy<C, F, K>
where
    C: Cursor,
    F: FnMut(&C::Item) -> K,
    K: Eq + Hash,
{
    type Item = C::Item;

    fn compute_next(&mut self, _initialized: bool) -> Option<C::Item> {
        while let Some(item) = self.source.pull() {
            if self.seen.insert((self.key)(&item)) {
                return Some(item);
            }
        }
        None
    }

    fn close(&mut self) {
        self.source.close();
    }
}

impl<C: fmt::Debug, F, K> fmt::Debug for DistinctBy<C, F, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DistinctBy")
            .field("source", &self.source)
            .field("keys", &self.seen.len())
            .finish_non_exhaustive()
    }
}
