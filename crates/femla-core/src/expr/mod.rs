//! Lazy expression trees.
//!
//! Arithmetic on containers does not compute anything: `&a + &b * 2.0` builds
//! a small tree of nodes that borrow their operands. The tree is evaluated
//! element by element, on demand, when it is assigned into a container
//! (see [`assign`](crate::assign)) or when a reduction is converted to a scalar.
//!
//! Node types:
//!
//! | node | result | built by |
//! |---|---|---|
//! | [`Unary`] | elementwise `f(x)` | `-e`, [`abs`](crate::linalg::abs) |
//! | [`Binary`] | elementwise `f(x, y)` | `a + b`, `a - b` |
//! | [`Scale`] | `s * x` or `x * s`, `x / s` | `e * s`, `s * e`, `e / s` |
//! | [`ReduceUnary`] | scalar fold of one operand | `sum`, norms, `min`/`max`, ... |
//! | [`ReduceBinary`] | scalar fold of two operands | `dot`, `vector * vector` |
//! | [`MatVec`] | matrix times vector | `matrix * vector` |
//! | [`Cross`] | 3d cross product | [`cross`](crate::linalg::cross) |

mod binary;
mod cross;
pub mod functors;
mod mat_vec;
mod ops;
mod reduction;
mod scale;
mod unary;

pub use binary::Binary;
pub use cross::Cross;
pub use mat_vec::{mat_vec_buffered, Buffer, MatVec};
pub use reduction::{ReduceBinary, ReduceUnary};
pub use scale::Scale;
pub use unary::Unary;

use crate::Scalar;

// ======================================================================
// Shape kinds
// ======================================================================

/// Type-level shape of an expression's result.
pub trait ShapeKind: 'static {
    const IS_MATRIX: bool;
}

/// Result indexed by a single position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VectorKind;

/// Result indexed by (row, column), stored row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatrixKind;

/// A single value (reductions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScalarKind;

impl ShapeKind for VectorKind {
    const IS_MATRIX: bool = false;
}

impl ShapeKind for MatrixKind {
    const IS_MATRIX: bool = true;
}

impl ShapeKind for ScalarKind {
    const IS_MATRIX: bool = false;
}

// ======================================================================
// Expr
// ======================================================================

/// Anything that can be evaluated at an index.
///
/// `SIZE`, `ROWS` and `COLS` are the compile-time shape, `None` when it is
/// only known at run time. The run-time shape is always available through
/// [`Expr::size`], [`Expr::num_rows`] and [`Expr::num_cols`].
pub trait Expr {
    type Elem: Scalar;
    type Kind: ShapeKind;

    const SIZE: Option<usize>;
    const ROWS: Option<usize>;
    const COLS: Option<usize>;

    fn size(&self) -> usize;

    #[inline]
    fn num_rows(&self) -> usize {
        self.size()
    }

    #[inline]
    fn num_cols(&self) -> usize {
        1
    }

    /// Value at flat (row-major) position `i`. `i < size()`.
    fn eval(&self, i: usize) -> Self::Elem;

    /// Value at `(row, col)`.
    #[inline]
    fn eval_at(&self, row: usize, col: usize) -> Self::Elem {
        self.eval(row * self.num_cols() + col)
    }
}

impl<E: Expr + ?Sized> Expr for &E {
    type Elem = E::Elem;
    type Kind = E::Kind;

    const SIZE: Option<usize> = E::SIZE;
    const ROWS: Option<usize> = E::ROWS;
    const COLS: Option<usize> = E::COLS;

    #[inline]
    fn size(&self) -> usize {
        (**self).size()
    }

    #[inline]
    fn num_rows(&self) -> usize {
        (**self).num_rows()
    }

    #[inline]
    fn num_cols(&self) -> usize {
        (**self).num_cols()
    }

    #[inline]
    fn eval(&self, i: usize) -> E::Elem {
        (**self).eval(i)
    }

    #[inline]
    fn eval_at(&self, row: usize, col: usize) -> E::Elem {
        (**self).eval_at(row, col)
    }
}

/// A plain slice reads as a vector.
impl<T: Scalar> Expr for [T] {
    type Elem = T;
    type Kind = VectorKind;

    const SIZE: Option<usize> = None;
    const ROWS: Option<usize> = None;
    const COLS: Option<usize> = Some(1);

    #[inline]
    fn size(&self) -> usize {
        self.len()
    }

    #[inline]
    fn eval(&self, i: usize) -> T {
        self[i]
    }
}

/// Combine two compile-time extents of elementwise operands: a known extent
/// wins over an unknown one.
pub const fn max_dim(a: Option<usize>, b: Option<usize>) -> Option<usize> {
    match (a, b) {
        (Some(x), Some(y)) => Some(if x > y { x } else { y }),
        (Some(x), None) | (None, Some(x)) => Some(x),
        (None, None) => None,
    }
}

/// Number of elements of any expression or container.
#[inline]
pub fn size<E: Expr + ?Sized>(e: &E) -> usize {
    e.size()
}

#[inline]
pub fn num_rows<E: Expr + ?Sized>(e: &E) -> usize {
    e.num_rows()
}

#[inline]
pub fn num_cols<E: Expr + ?Sized>(e: &E) -> usize {
    e.num_cols()
}

// ======================================================================
// Products (`*` between two expressions)
// ======================================================================

/// Result of `lhs * rhs` between two expressions, selected by the shape kind
/// of `lhs`.
///
/// - vector `*` vector: the dot product ([`ReduceBinary`]).
/// - matrix `*` vector: the lazy product [`MatVec`].
pub trait Product<L, R> {
    type Output;

    fn product(lhs: L, rhs: R) -> Self::Output;
}

impl<L, R> Product<L, R> for VectorKind
where
    L: Expr<Kind = VectorKind>,
    R: Expr<Elem = L::Elem, Kind = VectorKind>,
{
    type Output = ReduceBinary<L, R, functors::Dot>;

    #[inline]
    fn product(lhs: L, rhs: R) -> Self::Output {
        ReduceBinary::new(lhs, rhs, functors::Dot, "dot product")
    }
}

impl<L, R> Product<L, R> for MatrixKind
where
    L: Expr<Kind = MatrixKind>,
    R: Expr<Elem = L::Elem, Kind = VectorKind>,
{
    type Output = MatVec<L, R>;

    #[inline]
    fn product(lhs: L, rhs: R) -> Self::Output {
        MatVec::new(lhs, rhs)
    }
}
