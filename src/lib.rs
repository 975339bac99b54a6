//! # seqflow core
//!
//! Lazy, pull-based sequence pipelines with look-ahead evaluation.
//!
//! A pipeline is a chain of [`Cursor`](foundation::cursor::Cursor)s: a source
//! at the head, operators wrapping it, and a consumer pulling elements at the
//! end. Nothing runs until the consumer asks. Operators that need to look
//! ahead (filtering, windowing, flattening, sorting) are built on a single
//! evaluation engine, [`Lookahead`](foundation::lookahead::Lookahead), which
//! computes the next element once per position no matter how often
//! `has_next` is polled.
//!
//! ## Architecture
//!
//! The library is organized into three layers:
//!
//! 1. **Foundation**: the cursor contracts, the look-ahead engine, errors and
//!    element kinds
//! 2. **Operators**: sources and the operator stages
//! 3. **Pipeline**: the fluent [`CursorExt`](pipeline::ext::CursorExt) facade
//!    and the configured [`Pipeline`](pipeline::runner::Pipeline) runner
//!
//! ## Example
//!
//! ```rust
//! use seqflow_core::prelude::*;
//!
//! let flattened = of(vec![1, 2, 3])
//!     .flat_map(|x| Some(range(0, x)))
//!     .to_vec();
//! assert_eq!(flattened, vec![0, 0, 1, 0, 1, 2]);
//!
//! let running = range_closed(1i64, 4).scan_seed(0i64, |acc, x| acc + x).to_vec();
//! assert_eq!(running, vec![0, 1, 3, 6, 10]);
//! ```

#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
    missing_docs,
    rustdoc::all
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]
#![forbid(unsafe_code)]

// Foundation layer modules
pub mod foundation {
    //! Cursor contracts, the look-ahead engine and shared types.

    pub mod cursor;
    pub mod error;
    pub mod lookahead;
    pub mod types;
}

// Operator modules
pub mod operators {
    //! Sources and operator stages.

    pub mod element;
    pub mod filter;
    pub mod flatten;
    pub mod fold;
    pub mod order;
    pub mod source;
    pub mod window;
}

// Pipeline facade modules
pub mod pipeline {
    //! Fluent construction and configured execution of pipelines.

    pub mod config;
    pub mod ext;
    pub mod runner;
    pub mod traits;
}

// Re-exports for convenience
pub mod prelude {
    //! Common imports for users of the library.
    pub use crate::foundation::{
        cursor::{Cursor, Indexed, IndexedCursor, IntoStd},
        error::{Error, OrExhausted, Result},
        lookahead::{Advance, Lookahead},
        types::{ElementKind, Integral, Primitive},
    };
    pub use crate::operators::order::{CompareBy, KeyBy, NaturalOrder, NumericOrder, SortOrder};
    pub use crate::operators::source::{
        empty, from_iter, from_slice, generate, iterate, of, once, range, range_closed,
    };
    pub use crate::pipeline::{
        config::{PipelineConfig, PipelineConfigBuilder, MAX_PREALLOCATION},
        ext::CursorExt,
        runner::Pipeline,
        traits::{Labeled, Validate},
    };
}

// Version information
/// The version of the seqflow core library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The minimum supported Rust version.
pub const MSRV: &str = "1.70.0";
