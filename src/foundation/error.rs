//! Error handling for seqflow core.
//!
//! The engine surfaces only two failure conditions of its own: pulling past
//! the end of a sequence, and rejecting an operator argument at construction.
//! Panics raised inside user-supplied closures are never caught here; they
//! unwind out of the `has_next`/`next` call that triggered them.

use thiserror::Error;

/// The main error type for seqflow core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An element was requested from a sequence that has none left.
    #[error("sequence exhausted: no element remains")]
    Exhausted,

    /// An operator or configuration argument violated its precondition.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument {
        /// Name of the offending argument.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

impl Error {
    /// Builds an [`Error::InvalidArgument`].
    pub fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }

    /// Returns `true` for [`Error::Exhausted`].
    pub const fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted)
    }
}

/// A specialized Result type for seqflow core operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Fails a pull with [`Error::Exhausted`].
#[inline]
pub(crate) fn exhausted<T>() -> Result<T> {
    tracing::trace!("next() called on an exhausted sequence");
    Err(Error::Exhausted)
}

/// Extension trait for turning a missing value into an exhausted-sequence error.
pub trait OrExhausted<T> {
    /// Converts `None` into [`Error::Exhausted`].
    fn or_exhausted(self) -> Result<T>;
}

impl<T> OrExhausted<T> for Option<T> {
    #[inline]
    fn or_exhausted(self) -> Result<T> {
        match self {
            Some(value) => Ok(value),
            None => exhausted(),
        }
    }
}
