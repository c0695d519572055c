use smallvec::SmallVec;

use super::{Expr, MatrixKind, VectorKind};
use crate::error::{fatal, LinalgError, Result};
use crate::Scalar;

/// Lazy `matrix * vector`.
///
/// Row `i` of the result is the dot product of matrix row `i` with the vector,
/// accumulated over the columns in ascending order. The vector operand is
/// re-evaluated for every row; wrap an expensive operand in a [`Buffer`]
/// (see [`mat_vec_buffered`]) to evaluate it only once.
#[derive(Debug, Clone, Copy)]
pub struct MatVec<M, V> {
    matrix: M,
    vector: V,
}

impl<M, V> MatVec<M, V>
where
    M: Expr<Kind = MatrixKind>,
    V: Expr<Elem = M::Elem, Kind = VectorKind>,
{
    pub fn try_new(matrix: M, vector: V) -> Result<Self> {
        if matrix.num_cols() != vector.size() {
            return Err(LinalgError::ShapeMismatch {
                context: "matrix-vector product",
                lhs: (matrix.num_rows(), matrix.num_cols()),
                rhs: (vector.size(), 1),
            });
        }
        Ok(Self { matrix, vector })
    }

    #[track_caller]
    pub fn new(matrix: M, vector: V) -> Self {
        Self::try_new(matrix, vector).unwrap_or_else(|e| fatal(e))
    }
}

impl<M, V> Expr for MatVec<M, V>
where
    M: Expr<Kind = MatrixKind>,
    V: Expr<Elem = M::Elem, Kind = VectorKind>,
{
    type Elem = M::Elem;
    type Kind = VectorKind;

    const SIZE: Option<usize> = M::ROWS;
    const ROWS: Option<usize> = M::ROWS;
    const COLS: Option<usize> = Some(1);

    #[inline]
    fn size(&self) -> usize {
        self.matrix.num_rows()
    }

    fn eval(&self, i: usize) -> M::Elem {
        let mut acc = M::Elem::zero();
        for c in 0..self.matrix.num_cols() {
            acc += self.matrix.eval_at(i, c) * self.vector.eval(c);
        }
        acc
    }
}

/// Inline copy of an evaluated vector expression.
///
/// Small operands (up to 16 elements) stay on the stack.
#[derive(Debug, Clone, PartialEq)]
pub struct Buffer<T: Scalar> {
    data: SmallVec<[T; 16]>,
}

impl<T: Scalar> Buffer<T> {
    /// Evaluate every element of `expr` once.
    pub fn from_expr<E>(expr: &E) -> Self
    where
        E: Expr<Elem = T> + ?Sized,
    {
        Self {
            data: (0..expr.size()).map(|i| expr.eval(i)).collect(),
        }
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl<T: Scalar> Expr for Buffer<T> {
    type Elem = T;
    type Kind = VectorKind;

    const SIZE: Option<usize> = None;
    const ROWS: Option<usize> = None;
    const COLS: Option<usize> = Some(1);

    #[inline]
    fn size(&self) -> usize {
        self.data.len()
    }

    #[inline]
    fn eval(&self, i: usize) -> T {
        self.data[i]
    }
}

/// `matrix * vector` with the vector evaluated once, up front.
///
/// Gives the same values as the lazy product. Because the result no longer
/// borrows `vector`, it can be assigned back into the vector it was computed
/// from:
///
/// ```
/// use femla_core::prelude::*;
/// use femla_core::expr::mat_vec_buffered;
///
/// let m = Matrix::from_rows(&[[0.0, 1.0], [1.0, 0.0]]);
/// let mut x = Vector::from_slice(&[1.0, 2.0]);
/// x.assign(&mat_vec_buffered(&m, &x));
/// assert_eq!(x.as_slice(), &[2.0, 1.0]);
/// ```
#[track_caller]
pub fn mat_vec_buffered<M, V>(matrix: M, vector: V) -> MatVec<M, Buffer<M::Elem>>
where
    M: Expr<Kind = MatrixKind>,
    V: Expr<Elem = M::Elem, Kind = VectorKind>,
{
    MatVec::new(matrix, Buffer::from_expr(&vector))
}
