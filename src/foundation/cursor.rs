//! The iterator contract every sequence stage implements.
//!
//! A [`Cursor`] separates "is there a next element" from "produce and consume
//! it". `has_next` may run arbitrary computation to find out, but it never
//! consumes a logical element twice: polling it repeatedly between two `next`
//! calls yields the same answer and triggers no additional upstream pulls.
//!
//! Cursors are move-only. Wrapping a cursor in an operator transfers ownership
//! of it, so a single cursor can never feed two consumers.

use crate::foundation::error::Result;

// ============================================================================
// Core Contract
// ============================================================================

/// A stateful, forward-only, single-owner cursor over a possibly infinite
/// sequence.
pub trait Cursor {
    /// The element type.
    type Item;

    /// Returns whether another element is available.
    fn has_next(&mut self) -> bool;

    /// Produces and consumes the next element.
    ///
    /// Fails with [`Error::Exhausted`](crate::foundation::error::Error::Exhausted)
    /// when no element remains. Calling it without a preceding `has_next` is
    /// allowed; the check is performed internally.
    fn next(&mut self) -> Result<Self::Item>;

    /// Releases whatever the cursor holds. Wrapping stages forward the signal
    /// upstream; sources without resources ignore it.
    fn close(&mut self) {}

    /// Pulls the next element if there is one.
    #[inline]
    fn pull(&mut self) -> Option<Self::Item> {
        if self.has_next() {
            self.next().ok()
        } else {
            None
        }
    }
}

/// A cursor that knows the position of its pending element.
pub trait IndexedCursor: Cursor {
    /// Index of the element the next call to `next` will return.
    fn index(&self) -> usize;
}

impl<C: Cursor + ?Sized> Cursor for Box<C> {
    type Item = C::Item;

    #[inline]
    fn has_next(&mut self) -> bool {
        (**self).has_next()
    }

    #[inline]
    fn next(&mut self) -> Result<Self::Item> {
        (**self).next()
    }

    fn close(&mut self) {
        (**self).close();
    }
}

impl<C: Cursor + ?Sized> Cursor for &mut C {
    type Item = C::Item;

    #[inline]
    fn has_next(&mut self) -> bool {
        (**self).has_next()
    }

    #[inline]
    fn next(&mut self) -> Result<Self::Item> {
        (**self).next()
    }

    fn close(&mut self) {
        (**self).close();
    }
}

impl<C: IndexedCursor + ?Sized> IndexedCursor for Box<C> {
    #[inline]
    fn index(&self) -> usize {
        (**self).index()
    }
}

// ============================================================================
// Indexed Wrapper
// ============================================================================

/// Attaches a position counter to a cursor.
///
/// The counter starts at `start` and advances by `step` each time an element
/// is produced by the wrapped source. It is never reset.
#[derive(Debug)]
pub struct Indexed<C> {
    source: C,
    index: usize,
    step: usize,
}

impl<C: Cursor> Indexed<C> {
    /// Counts from zero in steps of one.
    pub const fn new(source: C) -> Self {
        Self::with_start_step(source, 0, 1)
    }

    /// Counts from `start` in steps of `step`.
    pub const fn with_start_step(source: C, start: usize, step: usize) -> Self {
        Self {
            source,
            index: start,
            step,
        }
    }

    /// Unwraps the source cursor.
    pub fn into_inner(self) -> C {
        self.source
    }
}

impl<C: Cursor> Cursor for Indexed<C> {
    type Item = C::Item;

    #[inline]
    fn has_next(&mut self) -> bool {
        self.source.has_next()
    }

    fn next(&mut self) -> Result<Self::Item> {
        let item = self.source.next()?;
        self.index = self.index.wrapping_add(self.step);
        Ok(item)
    }

    fn close(&mut self) {
        self.source.close();
    }
}

impl<C: Cursor> IndexedCursor for Indexed<C> {
    #[inline]
    fn index(&self) -> usize {
        self.index
    }
}

// ============================================================================
// Std Bridge
// ============================================================================

/// Adapts a cursor to [`std::iter::Iterator`] so std collectors can drive it.
#[derive(Debug)]
pub struct IntoStd<C> {
    cursor: C,
}

impl<C: Cursor> IntoStd<C> {
    /// Wraps `cursor`.
    pub const fn new(cursor: C) -> Self {
        Self { cursor }
    }

    /// Returns the wrapped cursor.
    pub fn into_inner(self) -> C {
        self.cursor
    }
}

impl<C: Cursor> Iterator for IntoStd<C> {
    type Item = C::Item;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.pull()
    }
}
