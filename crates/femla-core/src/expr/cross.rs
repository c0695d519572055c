use super::{Expr, VectorKind};
use crate::error::{fatal, LinalgError, Result};

/// Cross product of two 3-vectors.
#[derive(Debug, Clone, Copy)]
pub struct Cross<A, B> {
    lhs: A,
    rhs: B,
}

impl<A, B> Cross<A, B>
where
    A: Expr<Kind = VectorKind>,
    B: Expr<Elem = A::Elem, Kind = VectorKind>,
{
    pub fn try_new(lhs: A, rhs: B) -> Result<Self> {
        for n in [lhs.size(), rhs.size()] {
            if n != 3 {
                return Err(LinalgError::SizeMismatch {
                    context: "cross product",
                    expected: 3,
                    got: n,
                });
            }
        }
        Ok(Self { lhs, rhs })
    }

    #[track_caller]
    pub fn new(lhs: A, rhs: B) -> Self {
        Self::try_new(lhs, rhs).unwrap_or_else(|e| fatal(e))
    }
}

impl<A, B> Expr for Cross<A, B>
where
    A: Expr<Kind = VectorKind>,
    B: Expr<Elem = A::Elem, Kind = VectorKind>,
{
    type Elem = A::Elem;
    type Kind = VectorKind;

    const SIZE: Option<usize> = Some(3);
    const ROWS: Option<usize> = Some(3);
    const COLS: Option<usize> = Some(1);

    #[inline]
    fn size(&self) -> usize {
        3
    }

    #[inline]
    fn eval(&self, i: usize) -> A::Elem {
        let (j, k) = ((i + 1) % 3, (i + 2) % 3);
        self.lhs.eval(j) * self.rhs.eval(k) - self.lhs.eval(k) * self.rhs.eval(j)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cross_basis() {
        let x = [1, 0, 0];
        let y = [0, 1, 0];
        let z = Cross::new(&x[..], &y[..]);
        assert_eq!([z.eval(0), z.eval(1), z.eval(2)], [0, 0, 1]);
        let back = Cross::new(&y[..], &x[..]);
        assert_eq!(back.eval(2), -1);
    }

    #[test]
    fn test_cross_general() {
        let a = [1.0, 2.0, 3.0];
        let b = [4.0, 5.0, 6.0];
        let c = Cross::new(&a[..], &b[..]);
        assert_eq!([c.eval(0), c.eval(1), c.eval(2)], [-3.0, 6.0, -3.0]);
    }

    #[test]
    fn test_cross_needs_three() {
        let a = [1.0, 2.0];
        let b = [4.0, 5.0, 6.0];
        assert!(Cross::try_new(&a[..], &b[..]).is_err());
    }
}
