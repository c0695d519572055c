//! Reductions, norms and products as free functions.
//!
//! Every function takes its operands as expressions, so containers are passed
//! by reference and compound expressions by value:
//!
//! ```
//! use femla_core::prelude::*;
//! use femla_core::linalg::{dot, two_norm};
//!
//! let a = Vector::from_slice(&[3.0, 0.0]);
//! let b = Vector::from_slice(&[0.0, 4.0]);
//! assert_eq!(two_norm(&a + &b), 5.0);
//! assert_eq!(dot(&a, &b), 0.0);
//! ```
//!
//! Folds run over the elements in ascending index order, so results are
//! reproducible bit for bit.
//!
//! | function | value |
//! |----------|-------|
//! | `one_norm` | `sum abs(x_i)` |
//! | `two_norm`, `norm`, `frobenius_norm` | `sqrt(sum x_i^2)` |
//! | `unary_dot` | `sum x_i^2` |
//! | `inf_norm` | `max abs(x_i)`, times `sqrt(size)` for matrices |
//! | `sum`, `prod`, `mean` | sum, product, average |
//! | `max`, `min`, `abs_max`, `abs_min` | extremes, optionally of `abs(x_i)` |
//! | `dot` | `sum a_i * b_i` |
//! | `distance` | `two_norm(a - b)` |

pub use crate::expr::mat_vec_buffered;

use crate::error::{fatal, Result};
use crate::expr::functors::{
    Abs, AbsMax, AbsMin, Dot, Max, Mean, Min, Minus, OneNorm, Prod, Sum, TwoNorm, UnaryDot,
    UnaryReduction,
};
use crate::expr::{Binary, Cross, Expr, ReduceBinary, ReduceUnary, ShapeKind, Unary, VectorKind};
use crate::{Float, Scalar};

#[inline]
fn reduce<E, F>(expr: E, op: F) -> E::Elem
where
    E: Expr,
    F: UnaryReduction<E::Elem>,
{
    ReduceUnary::new(expr, op).value()
}

// ======================================================================
// Products
// ======================================================================

/// Inner product `sum a_i * b_i`. Sizes must match.
///
/// ```
/// # use femla_core::prelude::*;
/// # use femla_core::linalg::try_dot;
/// let a = Vector::from_slice(&[1, 2, 3]);
/// let b = Vector::from_slice(&[4, 5]);
/// assert!(try_dot(&a, &b).is_err());
/// ```
pub fn try_dot<A, B>(a: A, b: B) -> Result<A::Elem>
where
    A: Expr,
    B: Expr<Elem = A::Elem>,
{
    Ok(ReduceBinary::try_new(a, b, Dot, "dot product")?.value())
}

#[track_caller]
pub fn dot<A, B>(a: A, b: B) -> A::Elem
where
    A: Expr,
    B: Expr<Elem = A::Elem>,
{
    try_dot(a, b).unwrap_or_else(|e| fatal(e))
}

/// Lazy cross product of two 3-vectors.
#[track_caller]
pub fn cross<A, B>(a: A, b: B) -> Cross<A, B>
where
    A: Expr<Kind = VectorKind>,
    B: Expr<Elem = A::Elem, Kind = VectorKind>,
{
    Cross::new(a, b)
}

/// Lazy elementwise absolute value.
pub fn abs<E: Expr>(expr: E) -> Unary<E, Abs> {
    Unary::new(expr, Abs)
}

// ======================================================================
// Norms
// ======================================================================

/// `sum |x_i|`
pub fn one_norm<E: Expr>(expr: E) -> E::Elem {
    reduce(expr, OneNorm)
}

/// `sqrt(sum x_i^2)`
pub fn two_norm<E>(expr: E) -> E::Elem
where
    E: Expr,
    E::Elem: Float,
{
    reduce(expr, TwoNorm)
}

/// Euclidean norm of a vector, Frobenius norm of a matrix.
pub fn norm<E>(expr: E) -> E::Elem
where
    E: Expr,
    E::Elem: Float,
{
    two_norm(expr)
}

pub fn frobenius_norm<E>(expr: E) -> E::Elem
where
    E: Expr,
    E::Elem: Float,
{
    two_norm(expr)
}

/// `sum x_i^2`, the squared two-norm.
pub fn unary_dot<E: Expr>(expr: E) -> E::Elem {
    reduce(expr, UnaryDot)
}

/// `max |x_i|` for vectors. For matrices the value is scaled by
/// `sqrt(size)` so that it bounds the Frobenius norm.
pub fn inf_norm<E>(expr: E) -> E::Elem
where
    E: Expr,
    E::Elem: Float,
{
    let n = expr.size();
    let m = reduce(expr, AbsMax);
    if <E::Kind as ShapeKind>::IS_MATRIX {
        m * <E::Elem as Scalar>::from_usize(n).sqrt()
    } else {
        m
    }
}

/// `two_norm(a - b)`. Shapes must match.
#[track_caller]
pub fn distance<A, B>(a: A, b: B) -> A::Elem
where
    A: Expr,
    B: Expr<Elem = A::Elem, Kind = A::Kind>,
    A::Elem: Float,
{
    two_norm(Binary::new(a, b, Minus))
}

// ======================================================================
// Reductions
// ======================================================================

pub fn sum<E: Expr>(expr: E) -> E::Elem {
    reduce(expr, Sum)
}

pub fn prod<E: Expr>(expr: E) -> E::Elem {
    reduce(expr, Prod)
}

/// Arithmetic mean, zero for an empty operand. Integer means truncate.
pub fn mean<E: Expr>(expr: E) -> E::Elem {
    reduce(expr, Mean)
}

/// Largest element; the type's lowest value for an empty operand.
pub fn max<E: Expr>(expr: E) -> E::Elem {
    reduce(expr, Max)
}

/// Smallest element; the type's highest value for an empty operand.
pub fn min<E: Expr>(expr: E) -> E::Elem {
    reduce(expr, Min)
}

pub fn abs_max<E: Expr>(expr: E) -> E::Elem {
    reduce(expr, AbsMax)
}

pub fn abs_min<E: Expr>(expr: E) -> E::Elem {
    reduce(expr, AbsMin)
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::prelude::*;

    #[test]
    fn test_basic_reductions() {
        let v = Vector::from_slice(&[2.0, -3.0, 1.0]);
        assert_eq!(sum(&v), 0.0);
        assert_eq!(prod(&v), -6.0);
        assert_eq!(max(&v), 2.0);
        assert_eq!(min(&v), -3.0);
        assert_eq!(abs_max(&v), 3.0);
        assert_eq!(abs_min(&v), 1.0);
        assert_eq!(one_norm(&v), 6.0);
        assert_eq!(unary_dot(&v), 14.0);
        assert!(two_norm(&v).approx_eq(14.0_f64.sqrt()));
        assert_eq!(mean(&v), 0.0);
    }

    #[test]
    fn test_integer_reductions() {
        let v = Vector::from_slice(&[4_i64, -2, 7]);
        assert_eq!(sum(&v), 9);
        assert_eq!(one_norm(&v), 13);
        assert_eq!(mean(&v), 3);
        assert_eq!(abs_max(&v), 7);
    }

    #[test]
    fn test_reductions_of_expressions() {
        let a = Vector::from_slice(&[1.0, 2.0]);
        let b = Vector::from_slice(&[3.0, 4.0]);
        assert_eq!(sum(&a + &b), 10.0);
        assert_eq!(max(-&a), -1.0);
        assert_eq!(sum(abs(&a - &b)), 4.0);
    }

    #[test]
    fn test_dot_and_distance() {
        let a = Vector::from_slice(&[1.0, 2.0, 3.0]);
        let b = Vector::from_slice(&[4.0, 6.0, 3.0]);
        assert_eq!(dot(&a, &b), 25.0);
        assert_eq!(distance(&a, &b), 5.0);
    }

    #[test]
    #[should_panic(expected = "size mismatch in dot product")]
    fn test_dot_mismatch_is_fatal() {
        let a = Vector::from_slice(&[1.0, 2.0, 3.0]);
        let b = Vector::from_slice(&[1.0]);
        let _ = dot(&a, &b);
    }

    #[test]
    fn test_cross() {
        let a = Vector::from_slice(&[1.0, 0.0, 0.0]);
        let b = Vector::from_slice(&[0.0, 1.0, 0.0]);
        let c = Vector::from_expr(&cross(&a, &b));
        assert_eq!(c.as_slice(), &[0.0, 0.0, 1.0]);
        assert_eq!(dot(&c, &a), 0.0);
    }

    #[test]
    fn test_matrix_norms() {
        let m = Matrix::from_rows(&[[3.0, 0.0], [0.0, -4.0]]);
        assert_eq!(frobenius_norm(&m), 5.0);
        assert_eq!(norm(&m), 5.0);
        assert_eq!(inf_norm(&m), 8.0);
        let v = Vector::from_slice(&[3.0, -4.0]);
        assert_eq!(inf_norm(&v), 4.0);
    }
}
