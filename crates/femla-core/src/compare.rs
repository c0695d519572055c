//! Tolerance-aware comparison of expressions.
//!
//! Elements are compared with [`Scalar::approx_eq`]: exact for integers,
//! machine epsilon (scaled by the magnitude) for floats. Operands of different
//! shape are never equal and have no order.

use core::cmp::Ordering;

use crate::expr::Expr;
use crate::Scalar;

fn same_shape<A, B>(a: &A, b: &B) -> bool
where
    A: Expr + ?Sized,
    B: Expr + ?Sized,
{
    a.num_rows() == b.num_rows() && a.num_cols() == b.num_cols()
}

/// Every element of `a` equals the one of `b` within tolerance.
pub fn approx_eq<A, B>(a: &A, b: &B) -> bool
where
    A: Expr + ?Sized,
    B: Expr<Elem = A::Elem> + ?Sized,
{
    same_shape(a, b) && (0..a.size()).all(|i| a.eval(i).approx_eq(b.eval(i)))
}

/// Order of the first element pair that differs beyond tolerance; `Equal` if
/// there is none, `None` if the shapes differ or that pair is unordered.
pub fn approx_cmp<A, B>(a: &A, b: &B) -> Option<Ordering>
where
    A: Expr + ?Sized,
    B: Expr<Elem = A::Elem> + ?Sized,
{
    if !same_shape(a, b) {
        return None;
    }
    for i in 0..a.size() {
        let (x, y) = (a.eval(i), b.eval(i));
        if !x.approx_eq(y) {
            return x.partial_cmp(&y);
        }
    }
    Some(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approx_eq_float_tolerance() {
        let a = [0.1 + 0.2, 1.0];
        let b = [0.3, 1.0];
        assert!(approx_eq(&a[..], &b[..]));
        let c = [0.3001, 1.0];
        assert!(!approx_eq(&a[..], &c[..]));
    }

    #[test]
    fn test_different_sizes() {
        let a = [1, 2, 3];
        let b = [1, 2];
        assert!(!approx_eq(&a[..], &b[..]));
        assert_eq!(approx_cmp(&a[..], &b[..]), None);
    }

    #[test]
    fn test_first_difference_decides() {
        let a = [1, 5, 0];
        let b = [1, 4, 9];
        assert_eq!(approx_cmp(&a[..], &b[..]), Some(Ordering::Greater));
        assert_eq!(approx_cmp(&b[..], &a[..]), Some(Ordering::Less));
        assert_eq!(approx_cmp(&a[..], &a[..]), Some(Ordering::Equal));
    }

    #[test]
    fn test_nan_is_unordered() {
        let a = [f64::NAN];
        let b = [1.0];
        assert!(!approx_eq(&a[..], &b[..]));
        assert_eq!(approx_cmp(&a[..], &b[..]), None);
    }
}
