use super::functors::BinaryOp;
use super::{max_dim, Expr};
use crate::error::{fatal, LinalgError, Result};

/// Elementwise `op(lhs, rhs)` of two operands of the same shape.
///
/// Shapes are checked once, at construction. There is no broadcasting.
#[derive(Debug, Clone, Copy)]
pub struct Binary<L, R, F> {
    lhs: L,
    rhs: R,
    op: F,
}

impl<L, R, F> Binary<L, R, F>
where
    L: Expr,
    R: Expr<Elem = L::Elem, Kind = L::Kind>,
    F: BinaryOp<L::Elem>,
{
    pub fn try_new(lhs: L, rhs: R, op: F) -> Result<Self> {
        let (l, r) = (
            (lhs.num_rows(), lhs.num_cols()),
            (rhs.num_rows(), rhs.num_cols()),
        );
        if l != r {
            return Err(LinalgError::ShapeMismatch {
                context: "elementwise operation",
                lhs: l,
                rhs: r,
            });
        }
        Ok(Self { lhs, rhs, op })
    }

    /// Like [`Binary::try_new`], treating a shape mismatch as fatal.
    #[track_caller]
    pub fn new(lhs: L, rhs: R, op: F) -> Self {
        Self::try_new(lhs, rhs, op).unwrap_or_else(|e| fatal(e))
    }
}

impl<L, R, F> Expr for Binary<L, R, F>
where
    L: Expr,
    R: Expr<Elem = L::Elem, Kind = L::Kind>,
    F: BinaryOp<L::Elem>,
{
    type Elem = L::Elem;
    type Kind = L::Kind;

    const SIZE: Option<usize> = max_dim(L::SIZE, R::SIZE);
    const ROWS: Option<usize> = max_dim(L::ROWS, R::ROWS);
    const COLS: Option<usize> = max_dim(L::COLS, R::COLS);

    #[inline]
    fn size(&self) -> usize {
        self.lhs.size()
    }

    #[inline]
    fn num_rows(&self) -> usize {
        self.lhs.num_rows()
    }

    #[inline]
    fn num_cols(&self) -> usize {
        self.lhs.num_cols()
    }

    #[inline]
    fn eval(&self, i: usize) -> L::Elem {
        self.op.apply(self.lhs.eval(i), self.rhs.eval(i))
    }

    #[inline]
    fn eval_at(&self, row: usize, col: usize) -> L::Elem {
        self.op
            .apply(self.lhs.eval_at(row, col), self.rhs.eval_at(row, col))
    }
}
