//! Operations carried by expression nodes.
//!
//! Each functor is a zero-sized value passed to the node's constructor, so
//! every node/operation pair is monomorphised and inlined.

use core::ops::Neg;

use crate::{Float, Scalar};

// ======================================================================
// Elementwise
// ======================================================================

pub trait BinaryOp<T>: Copy {
    fn apply(&self, a: T, b: T) -> T;
}

pub trait UnaryOp<T>: Copy {
    fn apply(&self, x: T) -> T;
}

macro_rules! binary_ops {
    ($($name:ident => $op:tt;)*) => {
        $(
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
            pub struct $name;

            impl<T: Scalar> BinaryOp<T> for $name {
                #[inline(always)]
                fn apply(&self, a: T, b: T) -> T {
                    a $op b
                }
            }
        )*
    };
}

binary_ops! {
    Plus => +;
    Minus => -;
    Times => *;
    Divide => /;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Negate;

impl<T: Scalar + Neg<Output = T>> UnaryOp<T> for Negate {
    #[inline(always)]
    fn apply(&self, x: T) -> T {
        -x
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Abs;

impl<T: Scalar> UnaryOp<T> for Abs {
    #[inline(always)]
    fn apply(&self, x: T) -> T {
        x.abs_val()
    }
}

// ======================================================================
// Reductions
// ======================================================================

/// Fold of one operand: `init`, then `update` for indices `0..n` in order,
/// then `post_reduction`.
pub trait UnaryReduction<T>: Copy {
    fn init(&self) -> T;

    fn update(&self, acc: &mut T, x: T);

    #[inline]
    fn post_reduction(&self, acc: T, _count: usize) -> T {
        acc
    }
}

/// Fold of two operands of equal size.
pub trait BinaryReduction<T>: Copy {
    fn init(&self) -> T;

    fn update(&self, acc: &mut T, a: T, b: T);

    #[inline]
    fn post_reduction(&self, acc: T, _count: usize) -> T {
        acc
    }
}

macro_rules! unary_reductions {
    ($($(#[$meta:meta])* $name:ident { init: $init:expr, update: |$acc:ident, $x:ident| $body:expr $(,)? })*) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
            pub struct $name;

            impl<T: Scalar> UnaryReduction<T> for $name {
                #[inline(always)]
                fn init(&self) -> T {
                    $init
                }

                #[inline(always)]
                fn update(&self, $acc: &mut T, $x: T) {
                    $body
                }
            }
        )*
    };
}

unary_reductions! {
    /// `sum |x|`
    OneNorm { init: T::zero(), update: |acc, x| *acc += x.abs_val() }
    /// `sum x * x`
    UnaryDot { init: T::zero(), update: |acc, x| *acc += x * x }
    Sum { init: T::zero(), update: |acc, x| *acc += x }
    Prod { init: T::one(), update: |acc, x| *acc *= x }
    Max {
        init: T::lowest(),
        update: |acc, x| if x > *acc { *acc = x },
    }
    Min {
        init: T::highest(),
        update: |acc, x| if x < *acc { *acc = x },
    }
    /// `max |x|`, zero for an empty operand.
    AbsMax {
        init: T::zero(),
        update: |acc, x| {
            let a = x.abs_val();
            if a > *acc {
                *acc = a;
            }
        },
    }
    /// `min |x|`
    AbsMin {
        init: T::highest(),
        update: |acc, x| {
            let a = x.abs_val();
            if a < *acc {
                *acc = a;
            }
        },
    }
}

/// `sqrt(sum x * x)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TwoNorm;

impl<T: Float> UnaryReduction<T> for TwoNorm {
    #[inline(always)]
    fn init(&self) -> T {
        T::zero()
    }

    #[inline(always)]
    fn update(&self, acc: &mut T, x: T) {
        *acc += x * x;
    }

    #[inline]
    fn post_reduction(&self, acc: T, _count: usize) -> T {
        acc.sqrt()
    }
}

/// Arithmetic mean. The mean of nothing is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Mean;

impl<T: Scalar> UnaryReduction<T> for Mean {
    #[inline(always)]
    fn init(&self) -> T {
        T::zero()
    }

    #[inline(always)]
    fn update(&self, acc: &mut T, x: T) {
        *acc += x;
    }

    #[inline]
    fn post_reduction(&self, acc: T, count: usize) -> T {
        if count == 0 {
            acc
        } else {
            acc / T::from_usize(count)
        }
    }
}

/// `sum a * b`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dot;

impl<T: Scalar> BinaryReduction<T> for Dot {
    #[inline(always)]
    fn init(&self) -> T {
        T::zero()
    }

    #[inline(always)]
    fn update(&self, acc: &mut T, a: T, b: T) {
        *acc += a * b;
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn fold<F: UnaryReduction<f64>>(f: F, xs: &[f64]) -> f64 {
        let mut acc = f.init();
        for &x in xs {
            f.update(&mut acc, x);
        }
        f.post_reduction(acc, xs.len())
    }

    #[test]
    fn test_elementwise() {
        assert_eq!(Plus.apply(2, 3), 5);
        assert_eq!(Minus.apply(2, 3), -1);
        assert_eq!(Times.apply(2.0, 3.5), 7.0);
        assert_eq!(Divide.apply(9_u8, 2), 4);
        assert_eq!(Negate.apply(4_i16), -4);
        assert_eq!(Abs.apply(-4.5_f32), 4.5);
    }

    #[test]
    fn test_reductions() {
        let xs = [3.0, -4.0, 1.0];
        assert_eq!(fold(Sum, &xs), 0.0);
        assert_eq!(fold(OneNorm, &xs), 8.0);
        assert_eq!(fold(UnaryDot, &xs), 26.0);
        assert_eq!(fold(TwoNorm, &[3.0, 4.0]), 5.0);
        assert_eq!(fold(Prod, &xs), -12.0);
        assert_eq!(fold(Max, &xs), 3.0);
        assert_eq!(fold(Min, &xs), -4.0);
        assert_eq!(fold(AbsMax, &xs), 4.0);
        assert_eq!(fold(AbsMin, &xs), 1.0);
        assert_eq!(fold(Mean, &[1.0, 2.0, 6.0]), 3.0);
        assert_eq!(fold(Mean, &[]), 0.0);
    }

    #[test]
    fn test_dot() {
        let mut acc = Dot.init();
        for (a, b) in [(1, 4), (2, 5), (3, 6)] {
            Dot.update(&mut acc, a, b);
        }
        assert_eq!(Dot.post_reduction(acc, 3), 32);
    }
}
