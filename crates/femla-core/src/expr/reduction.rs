use super::functors::{BinaryReduction, UnaryReduction};
use super::{Expr, ScalarKind};
use crate::error::{fatal, LinalgError, Result};

/// Fold of one operand into a single value.
///
/// Nothing is computed until [`ReduceUnary::value`] (or a conversion into
/// the element type) is called. As an expression it has size one and
/// evaluates to the same value at every index.
#[derive(Debug, Clone, Copy)]
pub struct ReduceUnary<E, F> {
    expr: E,
    op: F,
}

impl<E: Expr, F: UnaryReduction<E::Elem>> ReduceUnary<E, F> {
    pub fn new(expr: E, op: F) -> Self {
        Self { expr, op }
    }

    /// Fold the operand in ascending index order.
    pub fn value(&self) -> E::Elem {
        let n = self.expr.size();
        let mut acc = self.op.init();
        for i in 0..n {
            self.op.update(&mut acc, self.expr.eval(i));
        }
        self.op.post_reduction(acc, n)
    }
}

impl<E: Expr, F: UnaryReduction<E::Elem>> Expr for ReduceUnary<E, F> {
    type Elem = E::Elem;
    type Kind = ScalarKind;

    const SIZE: Option<usize> = Some(1);
    const ROWS: Option<usize> = Some(1);
    const COLS: Option<usize> = Some(1);

    #[inline]
    fn size(&self) -> usize {
        1
    }

    #[inline]
    fn eval(&self, _i: usize) -> E::Elem {
        self.value()
    }

    #[inline]
    fn eval_at(&self, _row: usize, _col: usize) -> E::Elem {
        self.value()
    }
}

/// Fold of two operands of equal size, in ascending index order.
#[derive(Debug, Clone, Copy)]
pub struct ReduceBinary<A, B, F> {
    lhs: A,
    rhs: B,
    op: F,
}

impl<A, B, F> ReduceBinary<A, B, F>
where
    A: Expr,
    B: Expr<Elem = A::Elem>,
    F: BinaryReduction<A::Elem>,
{
    pub fn try_new(lhs: A, rhs: B, op: F, context: &'static str) -> Result<Self> {
        if lhs.size() != rhs.size() {
            return Err(LinalgError::SizeMismatch {
                context,
                expected: lhs.size(),
                got: rhs.size(),
            });
        }
        Ok(Self { lhs, rhs, op })
    }

    #[track_caller]
    pub fn new(lhs: A, rhs: B, op: F, context: &'static str) -> Self {
        Self::try_new(lhs, rhs, op, context).unwrap_or_else(|e| fatal(e))
    }

    pub fn value(&self) -> A::Elem {
        let n = self.lhs.size();
        let mut acc = self.op.init();
        for i in 0..n {
            self.op
                .update(&mut acc, self.lhs.eval(i), self.rhs.eval(i));
        }
        self.op.post_reduction(acc, n)
    }
}

impl<A, B, F> Expr for ReduceBinary<A, B, F>
where
    A: Expr,
    B: Expr<Elem = A::Elem>,
    F: BinaryReduction<A::Elem>,
{
    type Elem = A::Elem;
    type Kind = ScalarKind;

    const SIZE: Option<usize> = Some(1);
    const ROWS: Option<usize> = Some(1);
    const COLS: Option<usize> = Some(1);

    #[inline]
    fn size(&self) -> usize {
        1
    }

    #[inline]
    fn eval(&self, _i: usize) -> A::Elem {
        self.value()
    }

    #[inline]
    fn eval_at(&self, _row: usize, _col: usize) -> A::Elem {
        self.value()
    }
}

// Reductions convert into their element type wherever a plain number is
// expected: `let s: f64 = sum(&v).into();`
macro_rules! impl_reduction_into {
    ($($t:ty),*) => {
        $(
            impl<E, F> From<ReduceUnary<E, F>> for $t
            where
                E: Expr<Elem = $t>,
                F: UnaryReduction<$t>,
            {
                #[inline]
                fn from(r: ReduceUnary<E, F>) -> $t {
                    r.value()
                }
            }

            impl<A, B, F> From<ReduceBinary<A, B, F>> for $t
            where
                A: Expr<Elem = $t>,
                B: Expr<Elem = $t>,
                F: BinaryReduction<$t>,
            {
                #[inline]
                fn from(r: ReduceBinary<A, B, F>) -> $t {
                    r.value()
                }
            }
        )*
    };
}

impl_reduction_into!(f32, f64, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::expr::functors::{Dot, Max, Sum, TwoNorm};

    #[test]
    fn test_reduce_unary() {
        let a = [1.0, 2.0, 2.0];
        let r = ReduceUnary::new(&a[..], TwoNorm);
        assert_eq!(r.value(), 3.0);
        assert_eq!(r.size(), 1);
        assert_eq!(r.eval(42), 3.0);
        let s: f64 = ReduceUnary::new(&a[..], Sum).into();
        assert_eq!(s, 5.0);
        let m: f64 = ReduceUnary::new(&a[..], Max).into();
        assert_eq!(m, 2.0);
    }

    #[test]
    fn test_reduce_binary() {
        let a = [1, 2, 3];
        let b = [4, 5, 6];
        let d: i32 = ReduceBinary::new(&a[..], &b[..], Dot, "dot").into();
        assert_eq!(d, 32);
    }

    #[test]
    fn test_reduce_binary_size_mismatch() {
        let a = [1, 2, 3];
        let b = [4, 5];
        assert!(matches!(
            ReduceBinary::try_new(&a[..], &b[..], Dot, "dot"),
            Err(LinalgError::SizeMismatch { context: "dot", .. })
        ));
    }
}
