//! End-to-end scenarios across containers, expressions and reductions.

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod integration_tests {
    use std::panic::{self, AssertUnwindSafe};

    use crate::assign::AddTo;
    use crate::config;
    use crate::expr::mat_vec_buffered;
    use crate::linalg::{cross, dot, one_norm, prod, sum, two_norm};
    use crate::prelude::*;

    #[test]
    fn test_ones_vector_reductions() {
        let v = Vector::from_elem(3, 1.0);
        assert_eq!(sum(&v), 3.0);
        assert_eq!(one_norm(&v), 3.0);
        assert_eq!(prod(&v), 1.0);
        assert_eq!(two_norm(&v), 3.0_f64.sqrt());
    }

    #[test]
    fn test_matrix_times_vector() {
        let m = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]);
        let x = Vector::from_elem(2, 1.0);
        let y = Vector::from_expr(&(&m * &x));
        assert_eq!(y.as_slice(), &[3.0, 7.0]);

        let mut z = Vector::new(2);
        z.assign_with(&(&m * &x), AddTo);
        z.assign_with(&(&m * &x), AddTo);
        assert_eq!(z.as_slice(), &[6.0, 14.0]);
    }

    #[test]
    fn test_in_place_product_through_buffer() {
        let m = Matrix::from_rows(&[[0.0, 1.0], [1.0, 0.0]]);
        let mut x = Vector::from_slice(&[2.0, 5.0]);
        x.assign(&mat_vec_buffered(&m, &x));
        assert_eq!(x.as_slice(), &[5.0, 2.0]);
    }

    #[test]
    #[should_panic(expected = "shape mismatch in matrix assignment")]
    fn test_static_matrix_rejects_other_shape() {
        let mut s = StaticMatrix::<f64, 3, 3>::default();
        let m = Matrix::<f64>::new(2, 2);
        s.assign(&m);
    }

    #[test]
    fn test_static_matrix_try_assign_reports_shapes() {
        let mut s = StaticMatrix::<f64, 3, 3>::default();
        let m = Matrix::<f64>::new(2, 2);
        let err = s.try_assign(&m).unwrap_err();
        assert_eq!(
            err,
            LinalgError::ShapeMismatch {
                context: "matrix assignment",
                lhs: (3, 3),
                rhs: (2, 2),
            }
        );
        assert_eq!(s.as_slice(), &[0.0; 9]);
    }

    #[test]
    fn test_set_diag_identity() {
        let mut m = Matrix::<f64>::square(3);
        m.set_diag(1.0);
        let x = Vector::from_slice(&[4.0, -1.0, 2.5]);
        let y = Vector::from_expr(&(&m * &x));
        assert_eq!(y, x);

        let mut rect = Matrix::<f64>::new(2, 3);
        assert!(matches!(
            rect.try_set_diag(1.0),
            Err(LinalgError::NotSquare { rows: 2, cols: 3 })
        ));
    }

    #[test]
    fn test_mixed_storage_expression() {
        let a = StaticVector::<f64, 3>::from_slice(&[1.0, 2.0, 3.0]);
        let b = HybridVector::<f64, 8>::from_slice(&[1.0, 1.0, 1.0]);
        let c = Vector::from_slice(&[0.5, 0.5, 0.5]);
        let r = Vector::from_expr(&(&a * 2.0_f64 - &b + &c / 0.5_f64));
        assert_eq!(r.as_slice(), &[2.0, 4.0, 6.0]);
        assert_eq!(r, &a * 2.0_f64);
        assert!(r > a);
    }

    #[test]
    fn test_compound_assignment_operators() {
        let a = Vector::from_slice(&[1, 2, 3]);
        let mut v = Vector::from_slice(&[10, 20, 30]);
        v += &a;
        v -= &(&a * 2_i32);
        v *= 3_i32;
        assert_eq!(v.as_slice(), &[27, 54, 81]);
        v /= 27_i32;
        assert_eq!(v.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn test_matrix_expressions() {
        let a = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]);
        let b = Matrix::from_elem(2, 2, 1.0);
        let c = Matrix::from_expr(&(-&a + &b * 3.0_f64));
        assert_eq!(c[0], [2.0, 1.0]);
        assert_eq!(c[(1, 0)], 0.0);
        assert_eq!(c[(1, 1)], -1.0);
        assert_eq!(c.shape(), (2, 2));
    }

    #[test]
    fn test_dot_operator_and_cross() {
        let a = Vector::from_slice(&[1.0, 2.0, 3.0]);
        let b = Vector::from_slice(&[4.0, 5.0, 6.0]);
        let d: f64 = (&a * &b).into();
        assert_eq!(d, 32.0);
        assert_eq!(d, dot(&a, &b));

        let c = Vector::from_expr(&cross(&a, &b));
        assert_eq!(c.as_slice(), &[-3.0, 6.0, -3.0]);
        assert_eq!(dot(&c, &a), 0.0);
        assert_eq!(dot(&c, &b), 0.0);
    }

    #[test]
    fn test_resize_behaviour() {
        let mut v = Vector::from_slice(&[1.0, 2.0, 3.0, 4.0]);
        v.resize(2);
        assert_eq!(v.as_slice(), &[1.0, 2.0]);
        assert!(v.capacity() >= 4);
        v.resize(10);
        assert_eq!(v.len(), 10);

        let mut h = HybridVector::<f64, 4>::new(2);
        assert!(matches!(
            h.try_resize(5),
            Err(LinalgError::CapacityExceeded {
                requested: 5,
                capacity: 4
            })
        ));
        assert_eq!(h.len(), 2);

        let mut s = StaticVector::<f64, 3>::default();
        assert!(s.try_resize(3).is_ok());
        assert!(matches!(
            s.try_resize(2),
            Err(LinalgError::FixedSize {
                size: 3,
                requested: 2
            })
        ));
    }

    #[test]
    fn test_geometry_sized_containers() {
        assert_eq!(FixVec::<f64, geo::Edge>::new(3).len(), 6);
        assert_eq!(FixVec::<f64, geo::Face>::new(3).len(), 4);
        assert_eq!(FixVec::<f64, geo::Vertex>::new(0).len(), 1);
        assert_eq!(FixVec::<f64, geo::Projection>::new(2).len(), 4);
        assert_eq!(DimVec::<f64>::new(2).len(), 3);

        let m = DimMat::<f64>::new(3, 2);
        assert_eq!(m.shape(), (4, 3));

        assert!(matches!(
            FixVec::<f64, geo::Center>::try_new(0),
            Err(LinalgError::InvalidGeometry {
                kind: GeoIndex::Center,
                dim: 0
            })
        ));
        assert!(FixVec::<f64, geo::Edge>::try_new(4).is_err());
    }

    #[cfg(feature = "fixed-size")]
    #[test]
    fn test_geometry_containers_are_inline() {
        let v = FixVec::<f64, geo::Edge>::new(1);
        assert_eq!(v.len(), 1);
        assert_eq!(v.capacity(), 6);
        assert_eq!(v.memory_usage(), core::mem::size_of_val(&v));
    }

    #[test]
    fn test_world_vector_follows_config() {
        let dim = config::world_dim();
        let w = WorldVector::<f64>::new(1);
        assert_eq!(w.len(), dim);
        let m = WorldMatrix::<f64>::new(1, 1);
        assert_eq!(m.shape(), (dim, dim));
    }

    #[test]
    fn test_fatal_errors_unwind() {
        let result = panic::catch_unwind(|| {
            let v = Vector::<f64>::new(2);
            v.at(5)
        });
        assert!(result.is_err());

        let a = Vector::from_slice(&[1.0, 2.0]);
        let b = Vector::from_slice(&[1.0, 2.0, 3.0]);
        let result = panic::catch_unwind(AssertUnwindSafe(|| Vector::from_expr(&(&a + &b))));
        assert!(result.is_err());
        assert!(Vector::try_from_expr(&a).is_ok());
    }

    #[test]
    fn test_tolerant_equality() {
        let a = Vector::from_slice(&[0.1 + 0.2, 1.0]);
        let b = Vector::from_slice(&[0.3, 1.0]);
        assert_eq!(a, b);
        assert_ne!(a, Vector::from_slice(&[0.3, 1.0, 0.0]));
    }
}
