//! Element-wise stages: map, map-with-index and peek.
//!
//! None of these change cardinality, so they answer `has_next` straight from
//! their upstream and do their work in `next`.

use core::fmt;

use crate::foundation::cursor::{Cursor, IndexedCursor};
use crate::foundation::error::Result;

/// Transforms each element with a function.
#[derive(Clone)]
pub struct Map<C, F> {
    source: C,
    mapper: F,
}

impl<C: Cursor, F> Map<C, F> {
    /// Maps `source` through `mapper`.
    pub const fn new<B>(source: C, mapper: F) -> Self
    where
        F: FnMut(C::Item) -> B,
    {
        Self { source, mapper }
    }
}

impl<C, F, B> Cursor for Map<C, F>
where
    C: Cursor,
    F: FnMut(C::Item) -> B,
{
    type Item = B;

    #[inline]
    fn has_next(&mut self) -> bool {
        self.source.has_next()
    }

    #[inline]
    fn next(&mut self) -> Result<B> {
        self.source.next().map(&mut self.mapper)
    }

    fn close(&mut self) {
        self.source.close();
    }
}

impl<C: fmt::Debug, F> fmt::Debug for Map<C, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Map")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// Transforms each element together with its source index.
pub struct MapIndexed<C, F> {
    source: C,
    mapper: F,
}

impl<C: IndexedCursor, F> MapIndexed<C, F> {
    /// Maps `source` through `mapper(index, item)`.
    pub const fn new<B>(source: C, mapper: F) -> Self
    where
        F: FnMut(usize, C::Item) -> B,
    {
        Self { source, mapper }
    }
}

impl<C, F, B> Cursor for MapIndexed<C, F>
where
    C: IndexedCursor,
    F: FnMut(usize, C::Item) -> B,
{
    type Item = B;

    #[inline]
    fn has_next(&mut self) -> bool {
        self.source.has_next()
    }

    fn next(&mut self) -> Result<B> {
        let index = self.source.index();
        let item = self.source.next()?;
        Ok((self.mapper)(index, item))
    }

    fn close(&mut self) {
        self.source.close();
    }
}

impl<C: fmt::Debug, F> fmt::Debug for MapIndexed<C, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapIndexed")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// Hands each element to a consumer as it passes through.
pub struct Peek<C, F> {
    source: C,
    action: F,
}

impl<C, F> Peek<C, F>
where
    C: Cursor,
    F: FnMut(&C::Item),
{
    /// Observes `source` with `action`.
    pub const fn new(source: C, action: F) -> Self {
        Self { source, action }
    }
}

impl<C, F> Cursor for Peek<C, F>
where
    C: Cursor,
    F: FnMut(&C::Item),
{
    type Item = C::Item;

    #[inline]
    fn has_next(&mut self) -> bool {
        self.source.has_next()
    }

    fn next(&mut self) -> Result<C::Item> {
        let item = self.source.next()?;
        (self.action)(&item);
        Ok(item)
    }

    fn close(&mut self) {
        self.source.close();
    }
}

impl<C: fmt::Debug, F> fmt::Debug for Peek<C, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Peek")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::cursor::Indexed;
    use crate::foundation::error::Error;
    use crate::operators::source::{of, range};

    #[test]
    fn test_map_preserves_order_and_cardinality() {
        let mut mapped = Map::new(range(1i32, 4), |x| x * 10);
        assert_eq!(mapped.next(), Ok(10));
        assert_eq!(mapped.next(), Ok(20));
        assert_eq!(mapped.next(), Ok(30));
        assert!(!mapped.has_next());
        assert_eq!(mapped.next(), Err(Error::Exhausted));
    }

    #[test]
    fn test_map_across_kinds() {
        let mut mapped = Map::new(of(vec![1.9f64, -2.2]), |x: f64| x as i32);
        assert_eq!(mapped.next(), Ok(1));
        assert_eq!(mapped.next(), Ok(-2));
    }

    #[test]
    fn test_map_indexed_uses_source_index() {
        let source = Indexed::with_start_step(of(vec!["a", "b", "c"]), 1, 2);
        let mut mapped = MapIndexed::new(source, |i, s| format!("{i}:{s}"));
        assert_eq!(mapped.next().unwrap(), "1:a");
        assert_eq!(mapped.next().unwrap(), "3:b");
        assert_eq!(mapped.next().unwrap(), "5:c");
        assert_eq!(mapped.next(), Err(Error::Exhausted));
    }

    #[test]
    fn test_peek_sees_each_produced_element_once() {
        let mut seen = Vec::new();
        {
            let mut peeked = Peek::new(of(vec![1, 2, 3]), |x: &i32| seen.push(*x));
            assert!(peeked.has_next());
            assert!(peeked.has_next());
            assert_eq!(peeked.next(), Ok(1));
            assert_eq!(peeked.next(), Ok(2));
        }
        assert_eq!(seen, vec![1, 2]);
    }
}
