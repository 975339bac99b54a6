//! The pull-and-cache evaluation engine.
//!
//! [`Lookahead`] turns a single `compute_next` hook into a full [`Cursor`]. An
//! existence query runs the hook at most once per logical position and caches
//! its outcome; the following `next` hands the cached element out and arms the
//! next evaluation. Operators that consume upstream elements or call user
//! closures are built on it so that repeated `has_next` polling never repeats
//! their side effects.
//!
//! The cache is a small state machine:
//!
//! ```text
//! Fresh ──compute──▶ Ready(item) ──next──▶ Consumed ──compute──▶ Ready(item) …
//!   │                                         │
//!   └────────────compute (none)───────────────┴──▶ Done (terminal)
//! ```
//!
//! `Fresh` is only ever seen before the first element is produced, which is
//! what the `initialized` argument of [`Advance::compute_next`] reports.

use core::fmt;
use core::mem;

use crate::foundation::cursor::Cursor;
use crate::foundation::error::{self, Result};

/// The operator-specific half of a look-ahead cursor.
pub trait Advance {
    /// The element type.
    type Item;

    /// Computes the element for the next position, or `None` at the end.
    ///
    /// `initialized` is `false` on the very first activation and `true` once
    /// an element has been produced. After `None` is returned the hook is
    /// never invoked again.
    fn compute_next(&mut self, initialized: bool) -> Option<Self::Item>;

    /// Forwards a release signal to whatever the operator owns.
    fn close(&mut self) {}
}

enum Slot<T> {
    Fresh,
    Ready(T),
    Consumed,
    Done,
}

impl<T> fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Fresh => "Fresh",
            Self::Ready(_) => "Ready",
            Self::Consumed => "Consumed",
            Self::Done => "Done",
        })
    }
}

/// A cursor driven by an [`Advance`] implementation.
pub struct Lookahead<A: Advance> {
    advance: A,
    slot: Slot<A::Item>,
}

impl<A: Advance> Lookahead<A> {
    /// Wraps `advance`; nothing is computed until the first query.
    pub const fn new(advance: A) -> Self {
        Self {
            advance,
            slot: Slot::Fresh,
        }
    }

    /// Returns the operator state.
    pub const fn get_ref(&self) -> &A {
        &self.advance
    }

    /// Whether the hook has been activated at least once.
    pub const fn is_initialized(&self) -> bool {
        !matches!(self.slot, Slot::Fresh)
    }

    /// Whether the end of the sequence has been observed.
    pub const fn is_done(&self) -> bool {
        matches!(self.slot, Slot::Done)
    }

    fn evaluate(&mut self) {
        let initialized = match self.slot {
            Slot::Fresh => false,
            Slot::Consumed => true,
            Slot::Ready(_) | Slot::Done => return,
        };
        self.slot = match self.advance.compute_next(initialized) {
            Some(item) => Slot::Ready(item),
            None => Slot::Done,
        };
    }
}

impl<A: Advance> Cursor for Lookahead<A> {
    type Item = A::Item;

    #[inline]
    fn has_next(&mut self) -> bool {
        self.evaluate();
        !self.is_done()
    }

    fn next(&mut self) -> Result<Self::Item> {
        self.evaluate();
        match mem::replace(&mut self.slot, Slot::Done) {
            Slot::Ready(item) => {
                self.slot = Slot::Consumed;
                Ok(item)
            }
            _ => error::exhausted(),
        }
    }

    fn close(&mut self) {
        self.advance.close();
    }
}

impl<A> fmt::Debug for Lookahead<A>
where
    A: Advance + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lookahead")
            .field("advance", &self.advance)
            .field("slot", &self.slot)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::error::Error;

    /// Counts down from `remaining`, recording every activation.
    #[derive(Debug)]
    struct Countdown {
        remaining: u32,
        calls: Vec<bool>,
    }

    impl Advance for Countdown {
        type Item = u32;

        fn compute_next(&mut self, initialized: bool) -> Option<u32> {
            self.calls.push(initialized);
            if self.remaining == 0 {
                return None;
            }
            self.remaining -= 1;
            Some(self.remaining)
        }
    }

    fn countdown(from: u32) -> Lookahead<Countdown> {
        Lookahead::new(Countdown {
            remaining: from,
            calls: Vec::new(),
        })
    }

    #[test]
    fn test_has_next_is_idempotent() {
        let mut cursor = countdown(2);
        assert!(cursor.has_next());
        assert!(cursor.has_next());
        assert!(cursor.has_next());
        assert_eq!(cursor.get_ref().calls.len(), 1);
        assert_eq!(cursor.next(), Ok(1));
        assert_eq!(cursor.get_ref().calls.len(), 1);
    }

    #[test]
    fn test_next_without_has_next_evaluates() {
        let mut cursor = countdown(2);
        assert_eq!(cursor.next(), Ok(1));
        assert_eq!(cursor.next(), Ok(0));
        assert_eq!(cursor.next(), Err(Error::Exhausted));
        assert_eq!(cursor.get_ref().calls, vec![false, true, true]);
    }

    #[test]
    fn test_done_is_terminal() {
        let mut cursor = countdown(0);
        assert!(!cursor.has_next());
        assert!(!cursor.has_next());
        assert_eq!(cursor.next(), Err(Error::Exhausted));
        assert_eq!(cursor.next(), Err(Error::Exhausted));
        assert!(cursor.is_done());
        assert_eq!(cursor.get_ref().calls.len(), 1);
    }

    #[test]
    fn test_initialized_flag() {
        let mut cursor = countdown(3);
        assert!(!cursor.is_initialized());
        assert!(cursor.has_next());
        assert!(cursor.is_initialized());
        while cursor.pull().is_some() {}
        assert_eq!(cursor.get_ref().calls, vec![false, true, true, true]);
    }
}
