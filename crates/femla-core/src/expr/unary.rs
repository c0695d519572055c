use super::functors::UnaryOp;
use super::Expr;

/// Elementwise `op(x)`.
#[derive(Debug, Clone, Copy)]
pub struct Unary<E, F> {
    expr: E,
    op: F,
}

impl<E: Expr, F: UnaryOp<E::Elem>> Unary<E, F> {
    pub fn new(expr: E, op: F) -> Self {
        Self { expr, op }
    }
}

impl<E: Expr, F: UnaryOp<E::Elem>> Expr for Unary<E, F> {
    type Elem = E::Elem;
    type Kind = E::Kind;

    const SIZE: Option<usize> = E::SIZE;
    const ROWS: Option<usize> = E::ROWS;
    const COLS: Option<usize> = E::COLS;

    #[inline]
    fn size(&self) -> usize {
        self.expr.size()
    }

    #[inline]
    fn num_rows(&self) -> usize {
        self.expr.num_rows()
    }

    #[inline]
    fn num_cols(&self) -> usize {
        self.expr.num_cols()
    }

    #[inline]
    fn eval(&self, i: usize) -> E::Elem {
        self.op.apply(self.expr.eval(i))
    }

    #[inline]
    fn eval_at(&self, row: usize, col: usize) -> E::Elem {
        self.op.apply(self.expr.eval_at(row, col))
    }
}
