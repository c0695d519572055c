use super::functors::BinaryOp;
use super::Expr;

/// An operand combined with a scalar: `op(value, x)` or `op(x, value)`.
///
/// The side is kept so that element types whose product does not commute
/// evaluate in the order written.
#[derive(Debug, Clone, Copy)]
pub struct Scale<E: Expr, F> {
    value: E::Elem,
    expr: E,
    op: F,
    from_left: bool,
}

impl<E: Expr, F: BinaryOp<E::Elem>> Scale<E, F> {
    /// `value op expr`
    pub fn left(value: E::Elem, expr: E, op: F) -> Self {
        Self {
            value,
            expr,
            op,
            from_left: true,
        }
    }

    /// `expr op value`
    pub fn right(expr: E, value: E::Elem, op: F) -> Self {
        Self {
            value,
            expr,
            op,
            from_left: false,
        }
    }

    #[inline]
    fn combine(&self, x: E::Elem) -> E::Elem {
        if self.from_left {
            self.op.apply(self.value, x)
        } else {
            self.op.apply(x, self.value)
        }
    }
}

impl<E: Expr, F: BinaryOp<E::Elem>> Expr for Scale<E, F> {
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
        self.combine(self.expr.eval(i))
    }

    #[inline]
    fn eval_at(&self, row: usize, col: usize) -> E::Elem {
        self.combine(self.expr.eval_at(row, col))
    }
}
