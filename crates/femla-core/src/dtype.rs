//! Numeric element types for vectors, matrices and expressions.
//!
//! The trait hierarchy is:
//! ```text
//! Scalar            (f32, f64, all primitive integers)
//!   └── Float       (f32, f64)
//! ```
//!
//! Every container and expression node is generic over [`Scalar`]; the
//! reductions that need a square root (two-norm, distance) require [`Float`].

use core::fmt;
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};

// ---------------------------------------------------------------------------
// Scalar: the root trait for every element type
// ---------------------------------------------------------------------------

/// Base trait for all numeric types storable in a container.
///
/// Integers are first-class: nothing here assumes a floating-point type.
pub trait Scalar:
    Copy
    + Clone
    + fmt::Debug
    + fmt::Display
    + PartialEq
    + PartialOrd
    + Send
    + Sync
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
    + Default
    + 'static
{
    /// The additive identity (`0`), neutral element of sums.
    fn zero() -> Self;

    /// The multiplicative identity (`1`), neutral element of products.
    fn one() -> Self;

    /// Convert from `usize` (element counts in `mean`, matrix `inf_norm`).
    fn from_usize(v: usize) -> Self;

    /// Absolute value. The identity for unsigned types; signed `MIN` wraps
    /// to itself.
    fn abs_val(self) -> Self;

    /// Smallest finite value; neutral element of `max`.
    fn lowest() -> Self;

    /// Largest finite value; neutral element of `min` and `abs_min`.
    fn highest() -> Self;

    /// Comparison tolerance: machine epsilon for floats, zero for integers.
    fn tolerance() -> Self;

    /// `|self - other|` without underflowing unsigned types.
    #[inline]
    fn abs_diff(self, other: Self) -> Self {
        if self > other {
            self - other
        } else {
            other - self
        }
    }

    /// Equality up to [`Scalar::tolerance`].
    ///
    /// For floats the tolerance is scaled by `max(1, |self|, |other|)`, so large
    /// magnitudes are compared relatively and values near zero absolutely.
    /// Integers compare exactly.
    #[inline]
    fn approx_eq(self, other: Self) -> bool {
        let tol = Self::tolerance();
        if tol == Self::zero() {
            return self == other;
        }
        let mut scale = Self::one();
        let (a, b) = (self.abs_val(), other.abs_val());
        if a > scale {
            scale = a;
        }
        if b > scale {
            scale = b;
        }
        self.abs_diff(other) <= tol * scale
    }
}

// ---------------------------------------------------------------------------
// Float
// ---------------------------------------------------------------------------

/// Floating-point element types (`f32`, `f64`).
pub trait Float: Scalar + core::ops::Neg<Output = Self> {
    /// Machine epsilon.
    fn epsilon() -> Self;

    fn sqrt(self) -> Self;

    fn is_nan(self) -> bool;

    /// Convert from an `f64` literal.
    fn from_f64(v: f64) -> Self;
}

// ===========================================================================
// Macro implementations
// ===========================================================================

macro_rules! impl_scalar_float {
    ($ty:ty) => {
        impl Scalar for $ty {
            #[inline]
            fn zero() -> Self {
                0.0
            }
            #[inline]
            fn one() -> Self {
                1.0
            }
            #[inline]
            #[allow(clippy::cast_precision_loss)]
            fn from_usize(v: usize) -> Self {
                v as Self
            }
            #[inline]
            fn abs_val(self) -> Self {
                <$ty>::abs(self)
            }
            #[inline]
            fn lowest() -> Self {
                <$ty>::MIN
            }
            #[inline]
            fn highest() -> Self {
                <$ty>::MAX
            }
            #[inline]
            fn tolerance() -> Self {
                <$ty>::EPSILON
            }
        }

        impl Float for $ty {
            #[inline]
            fn epsilon() -> Self {
                <$ty>::EPSILON
            }
            #[inline]
            fn sqrt(self) -> Self {
                <$ty>::sqrt(self)
            }
            #[inline]
            fn is_nan(self) -> bool {
                <$ty>::is_nan(self)
            }
            #[inline]
            #[allow(clippy::cast_possible_truncation)]
            fn from_f64(v: f64) -> Self {
                v as Self
            }
        }
    };
}

impl_scalar_float!(f32);
impl_scalar_float!(f64);

macro_rules! impl_scalar_int {
    ($ty:ty, $abs:expr) => {
        impl Scalar for $ty {
            #[inline]
            fn zero() -> Self {
                0
            }
            #[inline]
            fn one() -> Self {
                1
            }
            #[inline]
            #[allow(
                clippy::cast_possible_wrap,
                clippy::cast_possible_truncation,
                clippy::cast_lossless
            )]
            fn from_usize(v: usize) -> Self {
                v as Self
            }
            #[inline]
            fn abs_val(self) -> Self {
                $abs(self)
            }
            #[inline]
            fn lowest() -> Self {
                <$ty>::MIN
            }
            #[inline]
            fn highest() -> Self {
                <$ty>::MAX
            }
            #[inline]
            fn tolerance() -> Self {
                0
            }
        }
    };
}

// `MIN` has no positive counterpart and maps to itself.
impl_scalar_int!(i8, i8::wrapping_abs);
impl_scalar_int!(i16, i16::wrapping_abs);
impl_scalar_int!(i32, i32::wrapping_abs);
impl_scalar_int!(i64, i64::wrapping_abs);
impl_scalar_int!(isize, isize::wrapping_abs);
impl_scalar_int!(u8, core::convert::identity);
impl_scalar_int!(u16, core::convert::identity);
impl_scalar_int!(u32, core::convert::identity);
impl_scalar_int!(u64, core::convert::identity);
impl_scalar_int!(usize, core::convert::identity);
