//! Windowing stages: take-while, take-until, drop-while, limit, skip, sample.

use core::fmt;

use crate::foundation::cursor::{Cursor, IndexedCursor};
use crate::foundation::error::{self, Error, Result};
use crate::foundation::lookahead::Advance;

// ============================================================================
// Take While
// ============================================================================

/// Produces elements until the first one the predicate rejects.
///
/// The stop is permanent: later elements are never examined, even if they
/// would pass.
pub struct TakeWhile<C, P> {
    source: C,
    predicate: P,
}

impl<C, P> TakeWhile<C, P>
where
    C: Cursor,
    P: FnMut(&C::Item) -> bool,
{
    /// Takes from `source` while `predicate` holds.
    pub const fn new(source: C, predicate: P) -> Self {
        Self { source, predicate }
    }
}

impl<C, P> Advance for TakeWhile<C, P>
where
    C: Cursor,
    P: FnMut(&C::Item) -> bool,
{
    type Item = C::Item;

    fn compute_next(&mut self, _initialized: bool) -> Option<C::Item> {
        let item = self.source.pull()?;
        (self.predicate)(&item).then_some(item)
    }

    fn close(&mut self) {
        self.source.close();
    }
}

impl<C: fmt::Debug, P> fmt::Debug for TakeWhile<C, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TakeWhile")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// [`TakeWhile`] with the source index passed to the predicate.
pub struct TakeWhileIndexed<C, P> {
    source: C,
    predicate: P,
}

impl<C, P> TakeWhileIndexed<C, P>
where
    C: IndexedCursor,
    P: FnMut(usize, &C::Item) -> bool,
{
    /// Takes from `source` while `predicate(index, item)` holds.
    pub const fn new(source: C, predicate: P) -> Self {
        Self { source, predicate }
    }
}

impl<C, P> Advance for TakeWhileIndexed<C, P>
where
    C: IndexedCursor,
    P: FnMut(usize, &C::Item) -> bool,
{
    type Item = C::Item;

    fn compute_next(&mut self, _initialized: bool) -> Option<C::Item> {
        if !self.source.has_next() {
            return None;
        }
        let index = self.source.index();
        let item = self.source.next().ok()?;
        (self.predicate)(index, &item).then_some(item)
    }

    fn close(&mut self) {
        self.source.close();
    }
}

impl<C: fmt::Debug, P> fmt::Debug for TakeWhileIndexed<C, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TakeWhileIndexed")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Take Until
// ============================================================================

/// Produces elements up to and including the first one the stop predicate
/// accepts.
///
/// The predicate runs at the start of each step against the element produced
/// by the previous step, so the first element is always produced and the
/// element that triggers the stop is still delivered.
pub struct TakeUntil<C: Cursor, P> {
    source: C,
    stop: P,
    previous: Option<C::Item>,
}

impl<C, P> TakeUntil<C, P>
where
    C: Cursor,
    C::Item: Clone,
    P: FnMut(&C::Item) -> bool,
{
    /// Takes from `source` until `stop` accepts a produced element.
    pub const fn new(source: C, stop: P) -> Self {
        Self {
            source,
            stop,
            previous: None,
        }
    }
}

impl<C, P> Advance for TakeUntil<C, P>
where
    C: Cursor,
    C::Item: Clone,
    P: FnMut(&C::Item) -> bool,
{
    type Item = C::Item;

    fn compute_next(&mut self, initialized: bool) -> Option<C::Item> {
        if !self.source.has_next() {
            return None;
        }
        if initialized {
            if let Some(previous) = self.previous.as_ref() {
                if (self.stop)(previous) {
                    return None;
                }
            }
        }
        let item = self.source.next().ok()?;
        self.previous = Some(item.clone());
        Some(item)
    }

    fn close(&mut self) {
        self.source.close();
    }
}

impl<C: Cursor + fmt::Debug, P> fmt::Debug for TakeUntil<C, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TakeUntil")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// [`TakeUntil`] with the source index passed to the stop predicate.
///
/// The index is read when the predicate runs, after the previous element was
/// consumed, so it is the index of the pending element.
pub struct TakeUntilIndexed<C: Cursor, P> {
    source: C,
    stop: P,
    previous: Option<C::Item>,
}

impl<C, P> TakeUntilIndexed<C, P>
where
    C: IndexedCursor,
    C::Item: Clone,
    P: FnMut(usize, &C::Item) -> bool,
{
    /// Takes from `source` until `stop(index, item)` accepts a produced
    /// element.
    pub const fn new(source: C, stop: P) -> Self {
        Self {
            source,
            stop,
            previous: None,
        }
    }
}

impl<C, P> Advance for TakeUntilIndexed<C, P>
where
    C: IndexedCursor,
    C::Item: Clone,
    P: FnMut(usize, &C::Item) -> bool,
{
    type Item = C::Item;

    fn compute_next(&mut self, initialized: bool) -> Option<C::Item> {
        if !self.source.has_next() {
            return None;
        }
        if initialized {
            if let Some(previous) = self.previous.as_ref() {
                if (self.stop)(self.source.index(), previous) {
                    return None;
                }
            }
        }
        let item = self.source.next().ok()?;
        self.previous = Some(item.clone());
        Some(item)
    }

    fn close(&mut self) {
        self.source.close();
    }
}

impl<C: Cursor + fmt::Debug, P> fmt::Debug for TakeUntilIndexed<C, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TakeUntilIndexed")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Drop While
// ============================================================================

/// Discards elements while the predicate holds, then passes the rest through.
///
/// The discard phase runs on the first activation only. If the source runs
/// dry during it, the stage is permanently exhausted.
pub struct DropWhile<C, P> {
    source: C,
    predicate: P,
}

impl<C, P> DropWhile<C, P>
where
    C: Cursor,
    P: FnMut(&C::Item) -> bool,
{
    /// Drops from `source` while `predicate` holds.
    pub const fn new(source: C, predicate: P) -> Self {
        Self { source, predicate }
    }
}

impl<C, P> Advance for DropWhile<C, P>
where
    C: Cursor,
    P: FnMut(&C::Item) -> bool,
{
    type Item = C::Item;

    fn compute_next(&mut self, initialized: bool) -> Option<C::Item> {
        if initialized {
            return self.source.pull();
        }
        while let Some(item) = self.source.pull() {
            if !(self.predicate)(&item) {
                return Some(item);
            }
        }
        None
    }

    fn close(&mut self) {
        self.source.close();
    }
}

impl<C: fmt::Debug, P> fmt::Debug for DropWhile<C, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DropWhile")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// [`DropWhile`] with the source index passed to the predicate.
pub struct DropWhileIndexed<C, P> {
    source: C,
    predicate: P,
}

impl<C, P> DropWhileIndexed<C, P>
where
    C: IndexedCursor,
    P: FnMut(usize, &C::Item) -> bool,
{
    /// Drops from `source` while `predicate(index, item)` holds.
    pub const fn new(source: C, predicate: P) -> Self {
        Self { source, predicate }
    }
}

impl<C, P> Advance for DropWhileIndexed<C, P>
where
    C: IndexedCursor,
    P: FnMut(usize, &C::Item) -> bool,
{
    type Item = C::Item;

    fn compute_next(&mut self, initialized: bool) -> Option<C::Item> {
        if initialized {
            return self.source.pull();
        }
        while self.source.has_next() {
            let index = self.source.index();
            let item = self.source.next().ok()?;
            if !(self.predicate)(index, &item) {
                return Some(item);
            }
        }
        None
    }

    fn close(&mut self) {
        self.source.close();
    }
}

impl<C: fmt::Debug, P> fmt::Debug for DropWhileIndexed<C, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DropWhileIndexed")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Limit / Skip / Sample
// ============================================================================

/// Produces at most `max` elements.
#[derive(Debug, Clone)]
pub struct Limit<C> {
    source: C,
    remaining: usize,
}

impl<C: Cursor> Limit<C> {
    /// Caps `source` at `max` elements.
    pub const fn new(source: C, max: usize) -> Self {
        Self {
            source,
            remaining: max,
        }
    }
}

impl<C: Cursor> Cursor for Limit<C> {
    type Item = C::Item;

    #[inline]
    fn has_next(&mut self) -> bool {
        self.remaining > 0 && self.source.has_next()
    }

    fn next(&mut self) -> Result<C::Item> {
        if self.remaining == 0 {
            return error::exhausted();
        }
        let item = self.source.next()?;
        self.remaining -= 1;
        Ok(item)
    }

    fn close(&mut self) {
        self.source.close();
    }
}

/// Discards the first `n` elements, then passes the rest through.
///
/// The discard happens on the first query, not at construction.
#[derive(Debug, Clone)]
pub struct Skip<C> {
    source: C,
    pending: usize,
}

impl<C: Cursor> Skip<C> {
    /// Skips `n` elements of `source`.
    pub const fn new(source: C, n: usize) -> Self {
        Self { source, pending: n }
    }

    fn discard(&mut self) {
        while self.pending > 0 {
            if self.source.pull().is_none() {
                break;
            }
            self.pending -= 1;
        }
    }
}

impl<C: Cursor> Cursor for Skip<C> {
    type Item = C::Item;

    fn has_next(&mut self) -> bool {
        self.discard();
        self.source.has_next()
    }

    fn next(&mut self) -> Result<C::Item> {
        self.discard();
        self.source.next()
    }

    fn close(&mut self) {
        self.source.close();
    }
}

/// Produces every `step`-th element, starting with the first.
///
/// After each produced element the next `step - 1` source elements are
/// discarded (fewer at the end of the source).
#[derive(Debug, Clone)]
pub struct Sample<C> {
    source: C,
    step: usize,
}

impl<C: Cursor> Sample<C> {
    /// Samples `source` every `step` elements.
    ///
    /// # Panics
    ///
    /// Panics if `step` is 0.
    pub fn new(source: C, step: usize) -> Self {
        assert!(step > 0, "Sample step must be greater than 0");
        Self { source, step }
    }

    /// Like [`Sample::new`], reporting a zero step as an error.
    pub fn try_new(source: C, step: usize) -> Result<Self> {
        if step == 0 {
            return Err(Error::invalid_argument("step", "must be greater than 0"));
        }
        Ok(Self { source, step })
    }

    /// Returns the step width.
    pub const fn step(&self) -> usize {
        self.step
    }
}

impl<C: Cursor> Cursor for Sample<C> {
    type Item = C::Item;

    #[inline]
    fn has_next(&mut self) -> bool {
        self.source.has_next()
    }

    fn next(&mut self) -> Result<C::Item> {
        let item = self.source.next()?;

        // Skip step-1 items
        for _ in 1..self.step {
            if self.source.pull().is_none() {
                break;
            }
        }

        Ok(item)
    }

    fn close(&mut self) {
        self.source.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::cursor::Indexed;
    use crate::foundation::lookahead::Lookahead;
    use crate::operators::source::{from_iter, generate, of, range_closed};

    fn drain<C: Cursor>(mut cursor: C) -> Vec<C::Item> {
        let mut out = Vec::new();
        while let Some(item) = cursor.pull() {
            out.push(item);
        }
        assert_eq!(cursor.next().err(), Some(Error::Exhausted));
        out
    }

    #[test]
    fn test_take_while_does_not_resume() {
        let taken = Lookahead::new(TakeWhile::new(of(vec![1, 2, 3, 4, 1, 2]), |x| *x < 3));
        assert_eq!(drain(taken), vec![1, 2]);
    }

    #[test]
    fn test_take_while_on_infinite_source() {
        let mut n = 0;
        let source = generate(move || {
            n += 1;
            n
        });
        let taken = Lookahead::new(TakeWhile::new(source, |x| *x <= 4));
        assert_eq!(drain(taken), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_take_while_indexed() {
        let source = Indexed::new(of(vec![10, 20, 30, 40]));
        let taken = Lookahead::new(TakeWhileIndexed::new(source, |i, x: &i32| i < 2 || *x > 100));
        assert_eq!(drain(taken), vec![10, 20]);
    }

    #[test]
    fn test_take_until_tests_previous_element() {
        let taken = Lookahead::new(TakeUntil::new(of(vec![1, 2, 3, 4, 5]), |x| *x >= 3));
        assert_eq!(drain(taken), vec![1, 2, 3]);
    }

    #[test]
    fn test_take_until_first_element_is_free() {
        let taken = Lookahead::new(TakeUntil::new(of(vec![9, 1, 2]), |x| *x > 5));
        assert_eq!(drain(taken), vec![9]);
        let never = Lookahead::new(TakeUntil::new(of(Vec::<i32>::new()), |_| true));
        assert!(drain(never).is_empty());
    }

    #[test]
    fn test_take_until_indexed_sees_pending_index() {
        let mut seen = Vec::new();
        let source = Indexed::new(of(vec!["a", "b", "c", "d"]));
        let taken = Lookahead::new(TakeUntilIndexed::new(source, |i, s: &&str| {
            seen.push((i, *s));
            i == 1
        }));
        assert_eq!(drain(taken), vec!["a"]);
        assert_eq!(seen, vec![(1, "a")]);
    }

    #[test]
    fn test_take_until_indexed_pairs_index_with_previous_element() {
        let mut seen = Vec::new();
        let source = Indexed::with_start_step(of(vec![10, 20, 30]), 5, 5);
        let taken = Lookahead::new(TakeUntilIndexed::new(source, |i, x: &i32| {
            seen.push((i, *x));
            false
        }));
        assert_eq!(drain(taken), vec![10, 20, 30]);
        assert_eq!(seen, vec![(10, 10), (15, 20)]);
    }

    #[test]
    fn test_drop_while() {
        let dropped = Lookahead::new(DropWhile::new(of(vec![1, 2, 3, 1, 2]), |x| *x < 3));
        assert_eq!(drain(dropped), vec![3, 1, 2]);
    }

    #[test]
    fn test_drop_while_exhausts_during_discard() {
        let dropped = Lookahead::new(DropWhile::new(range_closed(1i64, 5), |_| true));
        assert!(drain(dropped).is_empty());
    }

    #[test]
    fn test_drop_while_indexed() {
        let source = Indexed::new(of(vec![5, 5, 5, 1]));
        let dropped = Lookahead::new(DropWhileIndexed::new(source, |i, _: &i32| i < 2));
        assert_eq!(drain(dropped), vec![5, 1]);
    }

    #[test]
    fn test_limit() {
        assert_eq!(drain(Limit::new(range_closed(1i32, 10), 3)), vec![1, 2, 3]);
        assert_eq!(drain(Limit::new(range_closed(1i32, 2), 5)), vec![1, 2]);
        assert!(drain(Limit::new(range_closed(1i32, 2), 0)).is_empty());
    }

    #[test]
    fn test_skip_is_lazy() {
        let mut pulled = 0;
        let source = from_iter((1..=5).inspect(|_| pulled += 1));
        let mut skipped = Skip::new(source, 2);
        assert!(skipped.has_next());
        assert_eq!(skipped.next(), Ok(3));
        assert_eq!(drain(skipped), vec![4, 5]);
        assert_eq!(pulled, 5);
    }

    #[test]
    fn test_skip_without_has_next() {
        let mut skipped = Skip::new(of(vec!['a', 'b', 'c']), 1);
        assert_eq!(skipped.next(), Ok('b'));
        assert_eq!(drain(Skip::new(of(vec!['a']), 4)), Vec::<char>::new());
    }

    #[test]
    fn test_sample() {
        assert_eq!(drain(Sample::new(range_closed(1i32, 7), 3)), vec![1, 4, 7]);
        assert_eq!(drain(Sample::new(range_closed(1i32, 8), 3)), vec![1, 4, 7]);
        assert_eq!(drain(Sample::new(of(vec![1.0f64, 2.0]), 1)), vec![1.0, 2.0]);
    }

    #[test]
    fn test_sample_rejects_zero_step() {
        let error = Sample::try_new(of(vec![1]), 0).unwrap_err();
        assert_eq!(error, Error::invalid_argument("step", "must be greater than 0"));
        assert_eq!(Sample::try_new(of(vec![1]), 2).unwrap().step(), 2);
    }

    #[test]
    #[should_panic(expected = "Sample step must be greater than 0")]
    fn test_sample_zero_step_panics() {
        let _ = Sample::new(of(vec![1]), 0);
    }
}
