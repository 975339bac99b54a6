//! Flattening and concatenation.
//!
//! [`FlatMap`] owns at most one child cursor at a time. A child is closed as
//! soon as it runs dry and always before the next one is opened. Whatever
//! child is still open when the stage is closed or dropped is closed then, so
//! abandoning a pipeline (or unwinding out of it) still releases it.

use core::fmt;

use crate::foundation::cursor::Cursor;
use crate::foundation::lookahead::Advance;

// ============================================================================
// Flat Map
// ============================================================================

/// Concatenates the child sequences a mapper opens for each source element.
///
/// The mapper may return `None` for "no sequence"; such elements, and elements
/// whose child turns out to be empty, are skipped within the same query.
pub struct FlatMap<C, F, N: Cursor> {
    source: C,
    mapper: F,
    child: Option<N>,
    opened: usize,
}

impl<C, F, N> FlatMap<C, F, N>
where
    C: Cursor,
    F: FnMut(C::Item) -> Option<N>,
    N: Cursor,
{
    /// Flattens the children `mapper` opens for each element of `source`.
    pub const fn new(source: C, mapper: F) -> Self {
        Self {
            source,
            mapper,
            child: None,
            opened: 0,
        }
    }

    /// Number of child sequences opened so far.
    pub const fn opened(&self) -> usize {
        self.opened
    }

    /// Whether a child sequence is currently open.
    pub const fn has_open_child(&self) -> bool {
        self.child.is_some()
    }
}

impl<C, F, N: Cursor> FlatMap<C, F, N> {
    fn close_child(&mut self) {
        if let Some(mut child) = self.child.take() {
            child.close();
            tracing::trace!(opened = self.opened, "closed child sequence");
        }
    }
}

impl<C, F, N> Advance for FlatMap<C, F, N>
where
    C: Cursor,
    F: FnMut(C::Item) -> Option<N>,
    N: Cursor,
{
    type Item = N::Item;

    fn compute_next(&mut self, _initialized: bool) -> Option<N::Item> {
        loop {
            if let Some(child) = self.child.as_mut() {
                if let Some(item) = child.pull() {
                    return Some(item);
                }
                self.close_child();
            }
            let outer = self.source.pull()?;
            if let Some(child) = (self.mapper)(outer) {
                self.opened += 1;
                tracing::trace!(opened = self.opened, "opened child sequence");
                self.child = Some(child);
            }
        }
    }

    fn close(&mut self) {
        self.close_child();
        self.source.close();
    }
}

impl<C, F, N: Cursor> Drop for FlatMap<C, F, N> {
    fn drop(&mut self) {
        self.close_child();
    }
}

impl<C: fmt::Debug, F, N: Cursor> fmt::Debug for FlatMap<C, F, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlatMap")
            .field("source", &self.source)
            .field("opened", &self.opened)
            .field("child_open", &self.child.is_some())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Concat
// ============================================================================

/// All elements of `first`, then all elements of `second`.
#[derive(Debug)]
pub struct Concat<A, B> {
    first: A,
    second: B,
    on_first: bool,
}

impl<A, B> Concat<A, B>
where
    A: Cursor,
    B: Cursor<Item = A::Item>,
{
    /// Chains `second` after `first`.
    pub const fn new(first: A, second: B) -> Self {
        Self {
            first,
            second,
            on_first: true,
        }
    }
}

impl<A, B> Advance for Concat<A, B>
where
    A: Cursor,
    B: Cursor<Item = A::Item>,
{
    type Item = A::Item;

    fn compute_next(&mut self, _initialized: bool) -> Option<A::Item> {
        if self.on_first {
            if let Some(item) = self.first.pull() {
                return Some(item);
            }
            self.on_first = false;
            tracing::trace!("first sequence exhausted, continuing with second");
        }
        self.second.pull()
    }

    fn close(&mut self) {
        self.first.close();
        self.second.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::error::Error;
    use crate::foundation::lookahead::Lookahead;
    use crate::operators::source::{empty, of, range, OnClose, Range};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn drain<C: Cursor>(mut cursor: C) -> Vec<C::Item> {
        let mut out = Vec::new();
        while let Some(item) = cursor.pull() {
            out.push(item);
        }
        assert_eq!(cursor.next().err(), Some(Error::Exhausted));
        out
    }

    /// Journal of child open/close events.
    type Journal = Rc<RefCell<Vec<String>>>;

    fn tracked(journal: &Journal, x: i32) -> OnClose<Range<i32>, impl FnOnce()> {
        journal.borrow_mut().push(format!("open {x}"));
        let journal = Rc::clone(journal);
        OnClose::new(range(0, x), move || journal.borrow_mut().push(format!("close {x}")))
    }

    #[test]
    fn test_flat_map_ranges() {
        let source = of(vec![1, 2, 3]);
        let flattened = Lookahead::new(FlatMap::new(source, |x| Some(range(0i32, x))));
        assert_eq!(drain(flattened), vec![0, 0, 1, 0, 1, 2]);
    }

    #[test]
    fn test_flat_map_closes_each_child_before_opening_next() {
        let journal = Journal::default();
        let flattened = Lookahead::new(FlatMap::new(of(vec![1, 2]), |x| {
            Some(tracked(&journal, x))
        }));
        assert_eq!(drain(flattened), vec![0, 0, 1]);
        assert_eq!(
            *journal.borrow(),
            vec!["open 1", "close 1", "open 2", "close 2"]
        );
    }

    #[test]
    fn test_flat_map_skips_absent_and_empty_children() {
        let mut calls = 0;
        let mut flattened = Lookahead::new(FlatMap::new(of(vec![0, -1, 0, 2]), |x: i32| {
            calls += 1;
            (x >= 0).then(|| range(0, x))
        }));
        assert!(flattened.has_next());
        assert_eq!(flattened.get_ref().opened(), 3);
        assert_eq!(flattened.next(), Ok(0));
        assert_eq!(flattened.next(), Ok(1));
        assert!(!flattened.has_next());
        assert!(!flattened.get_ref().has_open_child());
        drop(flattened);
        assert_eq!(calls, 4);
    }

    #[test]
    fn test_flat_map_closes_open_child_when_abandoned() {
        let journal = Journal::default();
        let mut flattened =
            Lookahead::new(FlatMap::new(of(vec![3, 3]), |x| Some(tracked(&journal, x))));
        assert_eq!(flattened.next(), Ok(0));
        assert!(flattened.get_ref().has_open_child());
        flattened.close();
        assert_eq!(*journal.borrow(), vec!["open 3", "close 3"]);
    }

    #[test]
    fn test_flat_map_closes_open_child_on_drop() {
        let journal = Journal::default();
        {
            let mut flattened =
                Lookahead::new(FlatMap::new(of(vec![2]), |x| Some(tracked(&journal, x))));
            assert_eq!(flattened.next(), Ok(0));
        }
        assert_eq!(*journal.borrow(), vec!["open 2", "close 2"]);
    }

    #[test]
    fn test_concat() {
        let joined = Lookahead::new(Concat::new(of(vec![1, 2]), range(10, 12)));
        assert_eq!(drain(joined), vec![1, 2, 10, 11]);
        let second_only = Lookahead::new(Concat::new(empty(), of(vec!['z'])));
        assert_eq!(drain(second_only), vec!['z']);
    }
}
