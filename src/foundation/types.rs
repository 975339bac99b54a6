//! Element kinds and the numeric traits behind the unboxed specializations.
//!
//! The engine is written once, generically. What differs between the numeric
//! element kinds (their ordering, how integer ranges step) lives here.

use core::cmp::Ordering;
use core::fmt;

/// The specialization axis of a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Any non-numeric element type.
    Ref,
    /// 32-bit signed integers.
    Int32,
    /// 64-bit signed integers.
    Int64,
    /// 64-bit floating point numbers.
    Float64,
}

impl ElementKind {
    /// Returns `true` for the unboxed numeric kinds.
    #[inline]
    pub const fn is_numeric(self) -> bool {
        !matches!(self, Self::Ref)
    }

    /// Short lowercase name used in log output.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ref => "ref",
            Self::Int32 => "i32",
            Self::Int64 => "i64",
            Self::Float64 => "f64",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A numeric element kind.
pub trait Primitive: Copy + PartialOrd + fmt::Debug + 'static {
    /// The kind tag of this type.
    const KIND: ElementKind;

    /// Total numeric order. Floats order `-0.0` before `0.0` and NaN last.
    fn numeric_cmp(&self, other: &Self) -> Ordering;

    /// Widens the value to `f64`.
    fn to_f64(self) -> f64;
}

/// An integer element kind that can drive a range source.
pub trait Integral: Primitive + Ord {
    /// `self + 1`, or `None` on overflow.
    fn successor(self) -> Option<Self>;

    /// Widens the value to `i64`.
    fn to_i64(self) -> i64;
}

impl Primitive for i32 {
    const KIND: ElementKind = ElementKind::Int32;

    #[inline]
    fn numeric_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    #[inline]
    fn to_f64(self) -> f64 {
        f64::from(self)
    }
}

impl Primitive for i64 {
    const KIND: ElementKind = ElementKind::Int64;

    #[inline]
    fn numeric_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    #[inline]
    #[allow(clippy::cast_precision_loss)]
    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl Primitive for f64 {
    const KIND: ElementKind = ElementKind::Float64;

    #[inline]
    fn numeric_cmp(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }
}

impl Integral for i32 {
    #[inline]
    fn successor(self) -> Option<Self> {
        self.checked_add(1)
    }

    #[inline]
    fn to_i64(self) -> i64 {
        i64::from(self)
    }
}

impl Integral for i64 {
    #[inline]
    fn successor(self) -> Option<Self> {
        self.checked_add(1)
    }

    #[inline]
    fn to_i64(self) -> i64 {
        self
    }
}
