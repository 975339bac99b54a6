//! Fluent construction of cursor pipelines.
//!
//! [`CursorExt`] is implemented for every [`Cursor`], so operators chain the
//! way std adapters do:
//!
//! ```
//! use seqflow_core::prelude::*;
//!
//! let evens: Vec<i32> = range_closed(1, 10)
//!     .filter(|x| x % 2 == 0)
//!     .map(|x| x * x)
//!     .limit(3)
//!     .to_vec();
//! assert_eq!(evens, vec![4, 16, 36]);
//! ```

use core::cmp::Ordering;
use core::hash::Hash;

use crate::foundation::cursor::{Cursor, Indexed, IndexedCursor, IntoStd};
use crate::foundation::error::Result;
use crate::foundation::lookahead::Lookahead;
use crate::foundation::types::{Integral, Primitive};
use crate::operators::element::{Map, MapIndexed, Peek};
use crate::operators::filter::{Distinct, DistinctBy, Filter, FilterIndexed};
use crate::operators::flatten::{Concat, FlatMap};
use crate::operators::fold::{Scan, ScanSeed};
use crate::operators::order::{CompareBy, KeyBy, NaturalOrder, NumericOrder, Sorted};
use crate::operators::source::OnClose;
use crate::operators::window::{
    DropWhile, DropWhileIndexed, Limit, Sample, Skip, TakeUntil, TakeUntilIndexed, TakeWhile,
    TakeWhileIndexed,
};

/// Extension trait for cursors with the full operator set.
pub trait CursorExt: Cursor {
    // ------------------------------------------------------------------------
    // Element-wise
    // ------------------------------------------------------------------------

    /// Transforms each element.
    fn map<B, F>(self, f: F) -> Map<Self, F>
    where
        Self: Sized,
        F: FnMut(Self::Item) -> B,
    {
        Map::new(self, f)
    }

    /// Transforms each element together with its index.
    fn map_indexed<B, F>(self, f: F) -> MapIndexed<Self, F>
    where
        Self: Sized + IndexedCursor,
        F: FnMut(usize, Self::Item) -> B,
    {
        MapIndexed::new(self, f)
    }

    /// Maps to an `i32` sequence.
    fn map_to_i32<F>(self, f: F) -> Map<Self, F>
    where
        Self: Sized,
        F: FnMut(Self::Item) -> i32,
    {
        Map::new(self, f)
    }

    /// Maps to an `i64` sequence.
    fn map_to_i64<F>(self, f: F) -> Map<Self, F>
    where
        Self: Sized,
        F: FnMut(Self::Item) -> i64,
    {
        Map::new(self, f)
    }

    /// Maps to an `f64` sequence.
    fn map_to_f64<F>(self, f: F) -> Map<Self, F>
    where
        Self: Sized,
        F: FnMut(Self::Item) -> f64,
    {
        Map::new(self, f)
    }

    /// Maps a numeric sequence to arbitrary values.
    fn map_to_obj<B, F>(self, f: F) -> Map<Self, F>
    where
        Self: Sized,
        Self::Item: Primitive,
        F: FnMut(Self::Item) -> B,
    {
        Map::new(self, f)
    }

    /// Widens an integer sequence to `i64`.
    fn as_i64(self) -> Map<Self, fn(Self::Item) -> i64>
    where
        Self: Sized,
        Self::Item: Integral,
    {
        let widen: fn(Self::Item) -> i64 = <Self::Item as Integral>::to_i64;
        Map::new(self, widen)
    }

    /// Widens a numeric sequence to `f64`.
    fn as_f64(self) -> Map<Self, fn(Self::Item) -> f64>
    where
        Self: Sized,
        Self::Item: Primitive,
    {
        let widen: fn(Self::Item) -> f64 = <Self::Item as Primitive>::to_f64;
        Map::new(self, widen)
    }

    /// Calls `f` with each element as it is produced.
    fn peek<F>(self, f: F) -> Peek<Self, F>
    where
        Self: Sized,
        F: FnMut(&Self::Item),
    {
        Peek::new(self, f)
    }

    // ------------------------------------------------------------------------
    // Filtering
    // ------------------------------------------------------------------------

    /// Keeps elements accepted by `predicate`.
    fn filter<P>(self, predicate: P) -> Lookahead<Filter<Self, P>>
    where
        Self: Sized,
        P: FnMut(&Self::Item) -> bool,
    {
        Lookahead::new(Filter::new(self, predicate))
    }

    /// Keeps elements accepted by `predicate(index, item)`.
    fn filter_indexed<P>(self, predicate: P) -> Lookahead<FilterIndexed<Self, P>>
    where
        Self: Sized + IndexedCursor,
        P: FnMut(usize, &Self::Item) -> bool,
    {
        Lookahead::new(FilterIndexed::new(self, predicate))
    }

    /// Drops repeated elements, keeping first occurrences.
    fn distinct(self) -> Lookahead<Distinct<Self>>
    where
        Self: Sized,
        Self::Item: Eq + Hash + Clone,
    {
        Lookahead::new(Distinct::new(self))
    }

    /// Drops elements whose key was already seen.
    fn distinct_by<K, F>(self, key: F) -> Lookahead<DistinctBy<Self, F, K>>
    where
        Self: Sized,
        F: FnMut(&Self::Item) -> K,
        K: Eq + Hash,
    {
        Lookahead::new(DistinctBy::new(self, key))
    }

    // ------------------------------------------------------------------------
    // Windowing
    // ------------------------------------------------------------------------

    /// Produces elements until `predicate` first fails.
    fn take_while<P>(self, predicate: P) -> Lookahead<TakeWhile<Self, P>>
    where
        Self: Sized,
        P: FnMut(&Self::Item) -> bool,
    {
        Lookahead::new(TakeWhile::new(self, predicate))
    }

    /// Indexed [`take_while`](CursorExt::take_while).
    fn take_while_indexed<P>(self, predicate: P) -> Lookahead<TakeWhileIndexed<Self, P>>
    where
        Self: Sized + IndexedCursor,
        P: FnMut(usize, &Self::Item) -> bool,
    {
        Lookahead::new(TakeWhileIndexed::new(self, predicate))
    }

    /// Produces elements up to and including the first one `stop` accepts.
    fn take_until<P>(self, stop: P) -> Lookahead<TakeUntil<Self, P>>
    where
        Self: Sized,
        Self::Item: Clone,
        P: FnMut(&Self::Item) -> bool,
    {
        Lookahead::new(TakeUntil::new(self, stop))
    }

    /// Indexed [`take_until`](CursorExt::take_until).
    fn take_until_indexed<P>(self, stop: P) -> Lookahead<TakeUntilIndexed<Self, P>>
    where
        Self: Sized + IndexedCursor,
        Self::Item: Clone,
        P: FnMut(usize, &Self::Item) -> bool,
    {
        Lookahead::new(TakeUntilIndexed::new(self, stop))
    }

    /// Discards the leading run accepted by `predicate`.
    fn drop_while<P>(self, predicate: P) -> Lookahead<DropWhile<Self, P>>
    where
        Self: Sized,
        P: FnMut(&Self::Item) -> bool,
    {
        Lookahead::new(DropWhile::new(self, predicate))
    }

    /// Indexed [`drop_while`](CursorExt::drop_while).
    fn drop_while_indexed<P>(self, predicate: P) -> Lookahead<DropWhileIndexed<Self, P>>
    where
        Self: Sized + IndexedCursor,
        P: FnMut(usize, &Self::Item) -> bool,
    {
        Lookahead::new(DropWhileIndexed::new(self, predicate))
    }

    /// Produces at most `max` elements.
    fn limit(self, max: usize) -> Limit<Self>
    where
        Self: Sized,
    {
        Limit::new(self, max)
    }

    /// Discards the first `n` elements.
    fn skip(self, n: usize) -> Skip<Self>
    where
        Self: Sized,
    {
        Skip::new(self, n)
    }

    /// Produces every `step`-th element.
    ///
    /// # Panics
    ///
    /// Panics if `step` is 0.
    fn sample(self, step: usize) -> Sample<Self>
    where
        Self: Sized,
    {
        Sample::new(self, step)
    }

    /// Like [`sample`](CursorExt::sample), rejecting a zero step with an error.
    fn try_sample(self, step: usize) -> Result<Sample<Self>>
    where
        Self: Sized,
    {
        Sample::try_new(self, step)
    }

    // ------------------------------------------------------------------------
    // Folding and flattening
    // ------------------------------------------------------------------------

    /// Running fold starting from the first element.
    fn scan<F>(self, accumulator: F) -> Lookahead<Scan<Self, F>>
    where
        Self: Sized,
        Self::Item: Clone,
        F: FnMut(&Self::Item, Self::Item) -> Self::Item,
    {
        Lookahead::new(Scan::new(self, accumulator))
    }

    /// Running fold emitting `seed` first.
    fn scan_seed<R, F>(self, seed: R, accumulator: F) -> Lookahead<ScanSeed<Self, R, F>>
    where
        Self: Sized,
        R: Clone,
        F: FnMut(&R, Self::Item) -> R,
    {
        Lookahead::new(ScanSeed::new(self, seed, accumulator))
    }

    /// Concatenates the child cursors `f` opens per element.
    fn flat_map<N, F>(self, f: F) -> Lookahead<FlatMap<Self, F, N>>
    where
        Self: Sized,
        N: Cursor,
        F: FnMut(Self::Item) -> Option<N>,
    {
        Lookahead::new(FlatMap::new(self, f))
    }

    /// [`flat_map`](CursorExt::flat_map) into an `i32` sequence.
    fn flat_map_to_i32<N, F>(self, f: F) -> Lookahead<FlatMap<Self, F, N>>
    where
        Self: Sized,
        N: Cursor<Item = i32>,
        F: FnMut(Self::Item) -> Option<N>,
    {
        Lookahead::new(FlatMap::new(self, f))
    }

    /// [`flat_map`](CursorExt::flat_map) into an `i64` sequence.
    fn flat_map_to_i64<N, F>(self, f: F) -> Lookahead<FlatMap<Self, F, N>>
    where
        Self: Sized,
        N: Cursor<Item = i64>,
        F: FnMut(Self::Item) -> Option<N>,
    {
        Lookahead::new(FlatMap::new(self, f))
    }

    /// [`flat_map`](CursorExt::flat_map) into an `f64` sequence.
    fn flat_map_to_f64<N, F>(self, f: F) -> Lookahead<FlatMap<Self, F, N>>
    where
        Self: Sized,
        N: Cursor<Item = f64>,
        F: FnMut(Self::Item) -> Option<N>,
    {
        Lookahead::new(FlatMap::new(self, f))
    }

    /// Continues with `other` once this cursor is exhausted.
    fn concat<B>(self, other: B) -> Lookahead<Concat<Self, B>>
    where
        Self: Sized,
        B: Cursor<Item = Self::Item>,
    {
        Lookahead::new(Concat::new(self, other))
    }

    // ------------------------------------------------------------------------
    // Ordering
    // ------------------------------------------------------------------------

    /// Sorts by the natural order.
    fn sorted(self) -> Lookahead<Sorted<Self, NaturalOrder>>
    where
        Self: Sized,
        Self::Item: Ord,
    {
        Lookahead::new(Sorted::new(self, NaturalOrder))
    }

    /// Sorts a numeric sequence; floats use a total order.
    fn sorted_numeric(self) -> Lookahead<Sorted<Self, NumericOrder>>
    where
        Self: Sized,
        Self::Item: Primitive,
    {
        Lookahead::new(Sorted::new(self, NumericOrder))
    }

    /// Sorts with a comparator.
    fn sorted_by<F>(self, compare: F) -> Lookahead<Sorted<Self, CompareBy<F>>>
    where
        Self: Sized,
        F: FnMut(&Self::Item, &Self::Item) -> Ordering,
    {
        Lookahead::new(Sorted::new(self, CompareBy(compare)))
    }

    /// Sorts by an extracted key.
    fn sorted_by_key<K, F>(self, key: F) -> Lookahead<Sorted<Self, KeyBy<F>>>
    where
        Self: Sized,
        F: FnMut(&Self::Item) -> K,
        K: Ord,
    {
        Lookahead::new(Sorted::new(self, KeyBy(key)))
    }

    // ------------------------------------------------------------------------
    // Plumbing and terminals
    // ------------------------------------------------------------------------

    /// Runs `handler` the first time the pipeline is closed.
    fn on_close<F>(self, handler: F) -> OnClose<Self, F>
    where
        Self: Sized,
        F: FnOnce(),
    {
        OnClose::new(self, handler)
    }

    /// Numbers elements from zero.
    fn indexed(self) -> Indexed<Self>
    where
        Self: Sized,
    {
        Indexed::new(self)
    }

    /// Numbers elements from `start` in steps of `step`.
    fn indexed_from(self, start: usize, step: usize) -> Indexed<Self>
    where
        Self: Sized,
    {
        Indexed::with_start_step(self, start, step)
    }

    /// Adapts the cursor to [`std::iter::Iterator`].
    fn into_std(self) -> IntoStd<Self>
    where
        Self: Sized,
    {
        IntoStd::new(self)
    }

    /// Drains the remaining elements into a vector and closes the cursor.
    fn to_vec(mut self) -> Vec<Self::Item>
    where
        Self: Sized,
    {
        let mut out = Vec::new();
        while let Some(item) = self.pull() {
            out.push(item);
        }
        self.close();
        out
    }

    /// Counts the remaining elements and closes the cursor.
    fn count_all(mut self) -> usize
    where
        Self: Sized,
    {
        let mut count = 0;
        while self.pull().is_some() {
            count += 1;
        }
        self.close();
        count
    }
}

impl<C: Cursor + ?Sized> CursorExt for C {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::source::{from_iter, generate, iterate, of, range, range_closed};

    #[test]
    fn test_chain_reads_left_to_right() {
        let out = range(0i64, 100)
            .filter(|x| x % 3 == 0)
            .skip(1)
            .map(|x| x * 2)
            .take_while(|x| *x < 40)
            .to_vec();
        assert_eq!(out, vec![6, 12, 18, 24, 30, 36]);
    }

    #[test]
    fn test_kind_conversions() {
        assert_eq!(range(1i32, 4).as_i64().to_vec(), vec![1i64, 2, 3]);
        assert_eq!(of(vec![1i64, 2]).as_f64().to_vec(), vec![1.0, 2.0]);
        assert_eq!(
            of(vec!["a", "bb"]).map_to_i32(|s| s.len() as i32).to_vec(),
            vec![1, 2]
        );
        assert_eq!(
            range(0i32, 2).map_to_obj(|x| format!("#{x}")).to_vec(),
            vec!["#0", "#1"]
        );
    }

    #[test]
    fn test_indexed_operators() {
        let out = of(vec!['a', 'b', 'c', 'd'])
            .indexed_from(10, 5)
            .map_indexed(|i, c| format!("{i}{c}"))
            .to_vec();
        assert_eq!(out, vec!["10a", "15b", "20c", "25d"]);

        let kept = range(0i32, 6).indexed().filter_indexed(|i, _| i % 2 == 1).to_vec();
        assert_eq!(kept, vec![1, 3, 5]);
    }

    #[test]
    fn test_infinite_sources_with_short_circuit() {
        assert_eq!(iterate(1i64, |x| x * 2).limit(5).to_vec(), vec![1, 2, 4, 8, 16]);
        let mut n = 0;
        let count = generate(move || {
            n += 1;
            n
        })
        .take_until(|x| *x == 7)
        .count_all();
        assert_eq!(count, 7);
    }

    #[test]
    fn test_flat_map_to_numeric_kinds() {
        let out = of(vec!["ab", "", "c"])
            .flat_map_to_i32(|s| Some(from_iter(s.bytes().map(i32::from))))
            .to_vec();
        assert_eq!(out, vec![97, 98, 99]);
        let halves = range_closed(1i64, 2)
            .flat_map_to_f64(|x| Some(of(vec![x as f64 / 2.0; 2])))
            .to_vec();
        assert_eq!(halves, vec![0.5, 0.5, 1.0, 1.0]);
    }

    #[test]
    fn test_sorted_variants() {
        assert_eq!(of(vec![3, 1, 2]).sorted().to_vec(), vec![1, 2, 3]);
        assert_eq!(
            of(vec![0.5, -2.0, 1.5]).sorted_numeric().to_vec(),
            vec![-2.0, 0.5, 1.5]
        );
        assert_eq!(
            of(vec![1, 2, 3]).sorted_by(|a, b| b.cmp(a)).to_vec(),
            vec![3, 2, 1]
        );
        assert_eq!(
            of(vec![-3i32, 1, -2]).sorted_by_key(|x: &i32| x.abs()).to_vec(),
            vec![1, -2, -3]
        );
    }

    #[test]
    fn test_to_vec_closes() {
        let mut closed = false;
        let out = of(vec![1, 2]).on_close(|| closed = true).to_vec();
        assert_eq!(out, vec![1, 2]);
        assert!(closed);
    }

    #[test]
    fn test_into_std() {
        let total: i32 = range_closed(1i32, 4).scan(|acc, x| acc + x).into_std().sum();
        assert_eq!(total, 1 + 3 + 6 + 10);
    }
}
