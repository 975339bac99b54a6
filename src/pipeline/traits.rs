//! Small capability traits shared by the pipeline layer.

use crate::foundation::error::Result;

/// Trait for components that can be validated.
pub trait Validate {
    /// Validates the component's state.
    fn validate(&self) -> Result<()>;
}

/// Trait for components that carry an optional human-readable label.
pub trait Labeled {
    /// Returns the label, if one was set.
    fn label(&self) -> Option<&str>;
}
