//! Running folds: scan with and without a seed.

use core::fmt;

use crate::foundation::cursor::Cursor;
use crate::foundation::lookahead::Advance;

/// Emits the running fold of the source, starting with its first element.
///
/// The first element passes through unchanged; each later one is
/// `accumulator(previous_result, current)`. Cardinality matches the source.
pub struct Scan<C: Cursor, F> {
    source: C,
    accumulator: F,
    previous: Option<C::Item>,
}

impl<C, F> Scan<C, F>
where
    C: Cursor,
    C::Item: Clone,
    F: FnMut(&C::Item, C::Item) -> C::Item,
{
    /// Scans `source` with `accumulator`.
    pub const fn new(source: C, accumulator: F) -> Self {
        Self {
            source,
            accumulator,
            previous: None,
        }
    }
}

impl<C, F> Advance for Scan<C, F>
where
    C: Cursor,
    C::Item: Clone,
    F: FnMut(&C::Item, C::Item) -> C::Item,
{
    type Item = C::Item;

    fn compute_next(&mut self, initialized: bool) -> Option<C::Item> {
        let current = self.source.pull()?;
        let value = match self.previous.as_ref() {
            Some(previous) if initialized => (self.accumulator)(previous, current),
            _ => current,
        };
        self.previous = Some(value.clone());
        Some(value)
    }

    fn close(&mut self) {
        self.source.close();
    }
}

impl<C: Cursor + fmt::Debug, F> fmt::Debug for Scan<C, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scan")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// Emits `seed`, then the running fold of the source onto it.
///
/// The seed is produced without touching the source, so the cardinality is
/// one more than the source's.
pub struct ScanSeed<C, R, F> {
    source: C,
    state: R,
    accumulator: F,
}

impl<C, R, F> ScanSeed<C, R, F>
where
    C: Cursor,
    R: Clone,
    F: FnMut(&R, C::Item) -> R,
{
    /// Scans `source` onto `seed` with `accumulator`.
    pub const fn new(source: C, seed: R, accumulator: F) -> Self {
        Self {
            source,
            state: seed,
            accumulator,
        }
    }
}

impl<C, R, F> Advance for ScanSeed<C, R, F>
where
    C: Cursor,
    R: Clone,
    F: FnMut(&R, C::Item) -> R,
{
    type Item = R;

    fn compute_next(&mut self, initialized: bool) -> Option<R> {
        if !initialized {
            return Some(self.state.clone());
        }
        let current = self.source.pull()?;
        self.state = (self.accumulator)(&self.state, current);
        Some(self.state.clone())
    }

    fn close(&mut self) {
        self.source.close();
    }
}

impl<C: fmt::Debug, R: fmt::Debug, F> fmt::Debug for ScanSeed<C, R, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScanSeed")
            .field("source", &self.source)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
