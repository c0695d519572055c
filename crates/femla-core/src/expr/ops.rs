//! Arithmetic operators that build expression nodes.
//!
//! Implemented for borrowed containers and for every node type:
//! - `a + b`, `a - b`: elementwise ([`Binary`]), operands of the same kind
//! - `-a`: elementwise negation ([`Unary`])
//! - `a * b`: dot product (vector, vector) or [`MatVec`] (matrix, vector)
//! - `a * s`, `s * a`, `a / s` for every primitive scalar `s` ([`Scale`])

use core::ops::{Add, Div, Mul, Neg, Sub};

use super::functors::{BinaryOp, Divide, Minus, Negate, Plus, Times, UnaryOp};
use super::{Binary, Cross, Expr, MatVec, MatrixKind, Product, Scale, Unary, VectorKind};
use crate::container::{MatrixBase, VectorBase};
use crate::size_policy::SizePolicy;
use crate::storage::Storage;

// ======================================================================
// expr op scalar, scalar op expr
// ======================================================================

macro_rules! impl_scalar_op {
    ([$($gen:tt)*] $ty:ty; $s:ty) => {
        impl<$($gen)*> Mul<$s> for $ty
        where
            $ty: Expr<Elem = $s>,
        {
            type Output = Scale<$ty, Times>;

            #[inline]
            fn mul(self, rhs: $s) -> Self::Output {
                Scale::right(self, rhs, Times)
            }
        }

        impl<$($gen)*> Div<$s> for $ty
        where
            $ty: Expr<Elem = $s>,
        {
            type Output = Scale<$ty, Divide>;

            #[inline]
            fn div(self, rhs: $s) -> Self::Output {
                Scale::right(self, rhs, Divide)
            }
        }

        impl<$($gen)*> Mul<$ty> for $s
        where
            $ty: Expr<Elem = $s>,
        {
            type Output = Scale<$ty, Times>;

            #[inline]
            fn mul(self, rhs: $ty) -> Self::Output {
                Scale::left(self, rhs, Times)
            }
        }
    };
}

macro_rules! impl_scalar_ops {
    ($gens:tt $ty:ty) => {
        impl_scalar_ops!($gens $ty; f32, f64, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
    };
    ($gens:tt $ty:ty; $($s:ty),*) => {
        $( impl_scalar_op!($gens $ty; $s); )*
    };
}

// ======================================================================
// expr op expr
// ======================================================================

macro_rules! impl_expr_ops {
    ([$($gen:tt)*] $ty:ty) => {
        impl<$($gen)*, Rhs> Add<Rhs> for $ty
        where
            Rhs: Expr<Elem = <$ty as Expr>::Elem, Kind = <$ty as Expr>::Kind>,
        {
            type Output = Binary<$ty, Rhs, Plus>;

            #[inline]
            #[track_caller]
            fn add(self, rhs: Rhs) -> Self::Output {
                Binary::new(self, rhs, Plus)
            }
        }

        impl<$($gen)*, Rhs> Sub<Rhs> for $ty
        where
            Rhs: Expr<Elem = <$ty as Expr>::Elem, Kind = <$ty as Expr>::Kind>,
        {
            type Output = Binary<$ty, Rhs, Minus>;

            #[inline]
            #[track_caller]
            fn sub(self, rhs: Rhs) -> Self::Output {
                Binary::new(self, rhs, Minus)
            }
        }

        impl<$($gen)*, Rhs> Mul<Rhs> for $ty
        where
            Rhs: Expr<Elem = <$ty as Expr>::Elem>,
            <$ty as Expr>::Kind: Product<$ty, Rhs>,
        {
            type Output = <<$ty as Expr>::Kind as Product<$ty, Rhs>>::Output;

            #[inline]
            #[track_caller]
            fn mul(self, rhs: Rhs) -> Self::Output {
                <<$ty as Expr>::Kind as Product<$ty, Rhs>>::product(self, rhs)
            }
        }

        impl<$($gen)*> Neg for $ty
        where
            Negate: UnaryOp<<$ty as Expr>::Elem>,
        {
            type Output = Unary<$ty, Negate>;

            #[inline]
            fn neg(self) -> Self::Output {
                Unary::new(self, Negate)
            }
        }

        impl_scalar_ops!([$($gen)*] $ty);
    };
}

impl_expr_ops!(['a, S: Storage, P: SizePolicy] &'a VectorBase<S, P>);
impl_expr_ops!(['a, S: Storage, P: SizePolicy] &'a MatrixBase<S, P>);
impl_expr_ops!([E: Expr, F: UnaryOp<E::Elem>] Unary<E, F>);
impl_expr_ops!(
    [L: Expr, R: Expr<Elem = L::Elem, Kind = L::Kind>, F: BinaryOp<L::Elem>] Binary<L, R, F>
);
impl_expr_ops!([E: Expr, F: BinaryOp<E::Elem>] Scale<E, F>);
impl_expr_ops!(
    [M: Expr<Kind = MatrixKind>, V: Expr<Elem = M::Elem, Kind = VectorKind>] MatVec<M, V>
);
impl_expr_ops!(
    [A: Expr<Kind = VectorKind>, B: Expr<Elem = A::Elem, Kind = VectorKind>] Cross<A, B>
);
