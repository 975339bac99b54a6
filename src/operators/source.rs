//! Sequence sources: arrays, generators, ranges and the std iterator bridge.

use core::fmt;
use core::marker::PhantomData;
use core::mem;

use crate::foundation::cursor::Cursor;
use crate::foundation::error::{self, OrExhausted, Result};
use crate::foundation::lookahead::{Advance, Lookahead};
use crate::foundation::types::Integral;

// ============================================================================
// Array Source
// ============================================================================

/// A finite source backed by an owned vector.
#[derive(Debug, Clone)]
pub struct ArraySource<T> {
    values: std::vec::IntoIter<T>,
}

impl<T> ArraySource<T> {
    /// Serves `values` front to back.
    pub fn new(values: Vec<T>) -> Self {
        Self {
            values: values.into_iter(),
        }
    }

    /// Copies `values` into a new source.
    pub fn from_slice(values: &[T]) -> Self
    where
        T: Clone,
    {
        Self::new(values.to_vec())
    }

    /// Number of elements not yet produced.
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl<T> Cursor for ArraySource<T> {
    type Item = T;

    #[inline]
    fn has_next(&mut self) -> bool {
        self.remaining() > 0
    }

    #[inline]
    fn next(&mut self) -> Result<T> {
        if self.remaining() == 0 {
            return error::exhausted();
        }
        self.values.next().or_exhausted()
    }
}

// ============================================================================
// Generators
// ============================================================================

/// An infinite source calling a supplier for every element.
#[derive(Clone)]
pub struct Generate<F> {
    supplier: F,
}

impl<F> Generate<F> {
    /// Creates a source that never reports exhaustion.
    pub const fn new(supplier: F) -> Self {
        Self { supplier }
    }
}

impl<F, T> Cursor for Generate<F>
where
    F: FnMut() -> T,
{
    type Item = T;

    #[inline]
    fn has_next(&mut self) -> bool {
        true
    }

    #[inline]
    fn next(&mut self) -> Result<T> {
        Ok((self.supplier)())
    }
}

impl<F> fmt::Debug for Generate<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generate").finish_non_exhaustive()
    }
}

/// An infinite source: `seed`, `f(seed)`, `f(f(seed))`, …
#[derive(Clone)]
pub struct Iterate<T, F> {
    current: T,
    step: F,
}

impl<T, F> Iterate<T, F>
where
    F: FnMut(&T) -> T,
{
    /// Starts at `seed`.
    pub const fn new(seed: T, step: F) -> Self {
        Self {
            current: seed,
            step,
        }
    }
}

impl<T, F> Cursor for Iterate<T, F>
where
    F: FnMut(&T) -> T,
{
    type Item = T;

    #[inline]
    fn has_next(&mut self) -> bool {
        true
    }

    fn next(&mut self) -> Result<T> {
        let following = (self.step)(&self.current);
        Ok(mem::replace(&mut self.current, following))
    }
}

impl<T: fmt::Debug, F> fmt::Debug for Iterate<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iterate")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Ranges
// ============================================================================

/// Integers from `start` up to, but excluding, `end`.
#[derive(Debug, Clone)]
pub struct Range<T> {
    current: T,
    end: T,
}

impl<T: Integral> Range<T> {
    /// An empty range when `start >= end`.
    pub const fn new(start: T, end: T) -> Self {
        Self {
            current: start,
            end,
        }
    }
}

impl<T: Integral> Cursor for Range<T> {
    type Item = T;

    #[inline]
    fn has_next(&mut self) -> bool {
        self.current < self.end
    }

    fn next(&mut self) -> Result<T> {
        if self.current >= self.end {
            return error::exhausted();
        }
        let value = self.current;
        self.current = value.successor().unwrap_or(self.end);
        Ok(value)
    }
}

/// Integers from `start` up to and including `end`.
///
/// The upper bound may be the type's maximum value.
#[derive(Debug, Clone)]
pub struct RangeClosed<T> {
    current: T,
    end: T,
    has_more: bool,
}

impl<T: Integral> RangeClosed<T> {
    /// An empty range when `start > end`.
    pub fn new(start: T, end: T) -> Self {
        Self {
            current: start,
            end,
            has_more: start <= end,
        }
    }
}

impl<T: Integral> Cursor for RangeClosed<T> {
    type Item = T;

    #[inline]
    fn has_next(&mut self) -> bool {
        self.has_more
    }

    fn next(&mut self) -> Result<T> {
        if !self.has_more {
            return error::exhausted();
        }
        let value = self.current;
        match value.successor() {
            Some(following) if value < self.end => self.current = following,
            _ => self.has_more = false,
        }
        Ok(value)
    }
}

// ============================================================================
// Trivial Sources
// ============================================================================

/// A source with no elements.
pub struct Empty<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> Empty<T> {
    /// Creates the empty source.
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for Empty<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Empty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Empty")
    }
}

impl<T> Cursor for Empty<T> {
    type Item = T;

    #[inline]
    fn has_next(&mut self) -> bool {
        false
    }

    fn next(&mut self) -> Result<T> {
        error::exhausted()
    }
}

/// A source with exactly one element.
#[derive(Debug, Clone)]
pub struct Once<T> {
    value: Option<T>,
}

impl<T> Once<T> {
    /// Yields `value` once.
    pub const fn new(value: T) -> Self {
        Self { value: Some(value) }
    }
}

impl<T> Cursor for Once<T> {
    type Item = T;

    #[inline]
    fn has_next(&mut self) -> bool {
        self.value.is_some()
    }

    fn next(&mut self) -> Result<T> {
        self.value.take().or_exhausted()
    }
}

// ============================================================================
// Std Iterator Source
// ============================================================================

/// Look-ahead state over a [`std::iter::Iterator`].
#[derive(Debug, Clone)]
pub struct IterSource<I> {
    iter: I,
}

impl<I: Iterator> IterSource<I> {
    /// Wraps `iter`.
    pub const fn new(iter: I) -> Self {
        Self { iter }
    }
}

impl<I: Iterator> Advance for IterSource<I> {
    type Item = I::Item;

    #[inline]
    fn compute_next(&mut self, _initialized: bool) -> Option<I::Item> {
        self.iter.next()
    }
}

/// Cursor over a std iterator; `has_next` pulls ahead by one element.
pub type FromIter<I> = Lookahead<IterSource<I>>;

// ============================================================================
// Closable Source
// ============================================================================

/// Runs a release handler the first time the cursor is closed.
pub struct OnClose<C, F> {
    source: C,
    handler: Option<F>,
}

impl<C, F> OnClose<C, F>
where
    C: Cursor,
    F: FnOnce(),
{
    /// Attaches `handler` to `source`.
    pub const fn new(source: C, handler: F) -> Self {
        Self {
            source,
            handler: Some(handler),
        }
    }

    /// Whether the handler has already run.
    pub const fn is_closed(&self) -> bool {
        self.handler.is_none()
    }
}

impl<C, F> Cursor for OnClose<C, F>
where
    C: Cursor,
    F: FnOnce(),
{
    type Item = C::Item;

    #[inline]
    fn has_next(&mut self) -> bool {
        self.source.has_next()
    }

    #[inline]
    fn next(&mut self) -> Result<C::Item> {
        self.source.next()
    }

    fn close(&mut self) {
        self.source.close();
        if let Some(handler) = self.handler.take() {
            handler();
        }
    }
}

impl<C: fmt::Debug, F> fmt::Debug for OnClose<C, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OnClose")
            .field("source", &self.source)
            .field("closed", &self.handler.is_none())
            .finish()
    }
}

// ============================================================================
// Constructors
// ============================================================================

/// A source over the given values.
pub fn of<T>(values: Vec<T>) -> ArraySource<T> {
    ArraySource::new(values)
}

/// A source over a copy of `values`.
pub fn from_slice<T: Clone>(values: &[T]) -> ArraySource<T> {
    ArraySource::from_slice(values)
}

/// A source over any std iterable.
pub fn from_iter<I: IntoIterator>(iter: I) -> FromIter<I::IntoIter> {
    Lookahead::new(IterSource::new(iter.into_iter()))
}

/// An infinite source calling `supplier` for every element.
pub const fn generate<T, F: FnMut() -> T>(supplier: F) -> Generate<F> {
    Generate::new(supplier)
}

/// An infinite source starting at `seed` and applying `step` to the previous
/// element.
pub const fn iterate<T, F: FnMut(&T) -> T>(seed: T, step: F) -> Iterate<T, F> {
    Iterate::new(seed, step)
}

/// Integers in `start..end`.
pub const fn range<T: Integral>(start: T, end: T) -> Range<T> {
    Range::new(start, end)
}

/// Integers in `start..=end`.
pub fn range_closed<T: Integral>(start: T, end: T) -> RangeClosed<T> {
    RangeClosed::new(start, end)
}

/// A source with no elements.
pub const fn empty<T>() -> Empty<T> {
    Empty::new()
}

/// A source with exactly one element.
pub const fn once<T>(value: T) -> Once<T> {
    Once::new(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::error::Error;
    use std::cell::Cell;

    fn drain<C: Cursor>(mut cursor: C) -> Vec<C::Item> {
        let mut out = Vec::new();
        while cursor.has_next() {
            out.push(cursor.next().unwrap());
        }
        assert_eq!(cursor.next().err(), Some(Error::Exhausted));
        out
    }

    #[test]
    fn test_array_source() {
        let mut source = of(vec![1.5, 2.5]);
        assert_eq!(source.remaining(), 2);
        assert_eq!(drain(source.clone()), vec![1.5, 2.5]);
        assert_eq!(source.next(), Ok(1.5));
        assert_eq!(source.remaining(), 1);
    }

    #[test]
    fn test_generate_never_exhausts() {
        let mut counter = 0;
        let mut source = generate(|| {
            counter += 1;
            counter
        });
        for expected in 1..=100 {
            assert!(source.has_next());
            assert_eq!(source.next(), Ok(expected));
        }
    }

    #[test]
    fn test_iterate() {
        let mut source = iterate(1i64, |x| x * 3);
        let taken: Vec<_> = (0..5).map(|_| source.next().unwrap()).collect();
        assert_eq!(taken, vec![1, 3, 9, 27, 81]);
    }

    #[test]
    fn test_range() {
        assert_eq!(drain(range(0i32, 4)), vec![0, 1, 2, 3]);
        assert!(drain(range(5i64, 5)).is_empty());
        assert!(drain(range(5i32, -5)).is_empty());
        assert_eq!(drain(range(i32::MAX - 2, i32::MAX)), vec![i32::MAX - 2, i32::MAX - 1]);
    }

    #[test]
    fn test_range_closed_reaches_max() {
        assert_eq!(drain(range_closed(1i32, 3)), vec![1, 2, 3]);
        assert_eq!(drain(range_closed(7i64, 7)), vec![7]);
        assert!(drain(range_closed(2i32, 1)).is_empty());
        assert_eq!(
            drain(range_closed(i64::MAX - 1, i64::MAX)),
            vec![i64::MAX - 1, i64::MAX]
        );
    }

    #[test]
    fn test_empty_and_once() {
        assert!(drain(empty::<String>()).is_empty());
        assert_eq!(drain(once("x")), vec!["x"]);
    }

    #[test]
    fn test_from_iter_pulls_lazily() {
        let pulled = Cell::new(0);
        let mut source = from_iter((0..3).inspect(|_| pulled.set(pulled.get() + 1)));
        assert_eq!(pulled.get(), 0);
        assert!(source.has_next());
        assert!(source.has_next());
        assert_eq!(pulled.get(), 1);
        assert_eq!(drain(source), vec![0, 1, 2]);
        assert_eq!(pulled.get(), 3);
    }

    #[test]
    fn test_on_close_runs_once() {
        let closed = Cell::new(0);
        let mut source = OnClose::new(of(vec![1]), || closed.set(closed.get() + 1));
        assert!(!source.is_closed());
        source.close();
        source.close();
        assert!(source.is_closed());
        assert_eq!(closed.get(), 1);
        assert_eq!(source.next(), Ok(1));
    }
}
