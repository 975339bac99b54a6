//! Pipeline configuration.
//!
//! Only the stages that buffer (distinct sets and the sort buffer) have
//! anything to tune; the rest of the engine is configuration-free.

use crate::foundation::error::{Error, Result};
use crate::pipeline::traits::{Labeled, Validate};

/// Upper bound for any pre-allocated buffer capacity.
pub const MAX_PREALLOCATION: usize = 1 << 24;

/// Settings applied by [`Pipeline`](crate::pipeline::runner::Pipeline).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Initial capacity of the seen-set of distinct stages.
    pub distinct_capacity: usize,
    /// Initial capacity of the sort buffer.
    pub sort_capacity: usize,
    /// Label attached to the tracing span of terminal operations.
    pub label: Option<String>,
}

impl PipelineConfig {
    /// Starts a builder from the defaults.
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }
}

impl Validate for PipelineConfig {
    fn validate(&self) -> Result<()> {
        if self.distinct_capacity > MAX_PREALLOCATION {
            return Err(Error::invalid_argument(
                "distinct_capacity",
                format!("{} exceeds the limit of {MAX_PREALLOCATION}", self.distinct_capacity),
            ));
        }
        if self.sort_capacity > MAX_PREALLOCATION {
            return Err(Error::invalid_argument(
                "sort_capacity",
                format!("{} exceeds the limit of {MAX_PREALLOCATION}", self.sort_capacity),
            ));
        }
        if self.label.as_deref().is_some_and(|label| label.trim().is_empty()) {
            return Err(Error::invalid_argument("label", "must not be blank"));
        }
        Ok(())
    }
}

impl Labeled for PipelineConfig {
    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// Builder for [`PipelineConfig`].
#[derive(Debug, Clone, Default)]
pub struct PipelineConfigBuilder {
    config: PipelineConfig,
}

impl PipelineConfigBuilder {
    /// Sets the initial capacity of distinct stages.
    #[must_use]
    pub fn distinct_capacity(mut self, capacity: usize) -> Self {
        self.config.distinct_capacity = capacity;
        self
    }

    /// Sets the initial capacity of the sort buffer.
    #[must_use]
    pub fn sort_capacity(mut self, capacity: usize) -> Self {
        self.config.sort_capacity = capacity;
        self
    }

    /// Sets the tracing label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.config.label = Some(label.into());
        self
    }

    /// Validates and returns the configuration.
    pub fn build(self) -> Result<PipelineConfig> {
        if let Err(error) = self.config.validate() {
            tracing::warn!(%error, "rejected pipeline configuration");
            return Err(error);
        }
        Ok(self.config)
    }
}
