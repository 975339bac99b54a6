//! A configured pipeline runner.
//!
//! [`Pipeline`] carries a validated [`PipelineConfig`] into the stages that
//! pre-allocate and wraps terminal operations in a tracing span.

use core::hash::Hash;

use crate::foundation::cursor::Cursor;
use crate::foundation::error::Result;
use crate::foundation::lookahead::Lookahead;
use crate::foundation::types::Primitive;
use crate::operators::filter::{Distinct, DistinctBy};
use crate::operators::order::{NaturalOrder, NumericOrder, Sorted};
use crate::pipeline::config::PipelineConfig;
use crate::pipeline::traits::{Labeled, Validate};

/// Applies a [`PipelineConfig`] to the stages it builds.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// A runner with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// A runner with `config`, validated first.
    pub fn with_config(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the active configuration.
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// [`distinct`](crate::pipeline::ext::CursorExt::distinct) with the
    /// configured set capacity.
    pub fn distinct<C>(&self, source: C) -> Lookahead<Distinct<C>>
    where
        C: Cursor,
        C::Item: Eq + Hash + Clone,
    {
        Lookahead::new(Distinct::with_capacity(source, self.config.distinct_capacity))
    }

    /// [`distinct_by`](crate::pipeline::ext::CursorExt::distinct_by) with the
    /// configured set capacity.
    pub fn distinct_by<C, F, K>(&self, source: C, key: F) -> Lookahead<DistinctBy<C, F, K>>
    where
        C: Cursor,
        F: FnMut(&C::Item) -> K,
        K: Eq + Hash,
    {
        Lookahead::new(DistinctBy::with_capacity(
            source,
            key,
            self.config.distinct_capacity,
        ))
    }

    /// [`sorted`](crate::pipeline::ext::CursorExt::sorted) with the configured
    /// buffer capacity.
    pub fn sorted<C>(&self, source: C) -> Lookahead<Sorted<C, NaturalOrder>>
    where
        C: Cursor,
        C::Item: Ord,
    {
        Lookahead::new(Sorted::with_capacity(
            source,
            NaturalOrder,
            self.config.sort_capacity,
        ))
    }

    /// [`sorted_numeric`](crate::pipeline::ext::CursorExt::sorted_numeric)
    /// with the configured buffer capacity.
    pub fn sorted_numeric<C>(&self, source: C) -> Lookahead<Sorted<C, NumericOrder>>
    where
        C: Cursor,
        C::Item: Primitive,
    {
        Lookahead::new(Sorted::with_capacity(
            source,
            NumericOrder,
            self.config.sort_capacity,
        ))
    }

    /// Drains `cursor` into a vector, then closes it.
    pub fn collect<C: Cursor>(&self, mut cursor: C) -> Vec<C::Item> {
        let span = tracing::debug_span!("pipeline", label = self.config.label());
        let _entered = span.enter();
        let mut out = Vec::new();
        while let Some(item) = cursor.pull() {
            out.push(item);
        }
        cursor.close();
        tracing::debug!(produced = out.len(), "pipeline drained");
        out
    }

    /// Counts the elements of `cursor`, then closes it.
    pub fn count<C: Cursor>(&self, mut cursor: C) -> usize {
        let span = tracing::debug_span!("pipeline", label = self.config.label());
        let _entered = span.enter();
        let mut produced = 0;
        while cursor.pull().is_some() {
            produced += 1;
        }
        cursor.close();
        tracing::debug!(produced, "pipeline drained");
        produced
    }
}
