//! Named vector and matrix types.
//!
//! Geometry-sized types take the spatial dimension as their size argument:
//! `FixVec::<f64, geo::Vertex>::new(2)` has 3 elements.

use crate::size_policy::{geo, DefaultSize, FixedSize, GeoKind};
use crate::storage::{DynamicStorage, HybridStorage, StaticStorage};

use super::{MatrixBase, VectorBase};

/// Heap vector with a run-time size.
pub type Vector<T> = VectorBase<DynamicStorage<T>, DefaultSize>;

/// Heap vector whose buffer starts on a cache line.
pub type AlignedVector<T> = VectorBase<DynamicStorage<T, true>, DefaultSize>;

/// Inline vector of exactly `N` elements.
pub type StaticVector<T, const N: usize> = VectorBase<StaticStorage<T, N>, DefaultSize>;

/// Inline vector of at most `N` elements.
pub type HybridVector<T, const N: usize> = VectorBase<HybridStorage<T, N>, DefaultSize>;

/// Vector with one entry per `G` entity of an element of a given dimension.
pub type FixVec<T, G> = VectorBase<<G as GeoKind>::VecStorage<T>, FixedSize<G>>;

/// Vector in ambient space.
pub type WorldVector<T> = FixVec<T, geo::World>;

/// Barycentric coordinates: one entry per vertex of the element.
pub type DimVec<T> = FixVec<T, geo::Parts>;

/// Heap matrix with a run-time shape.
pub type Matrix<T> = MatrixBase<DynamicStorage<T>, DefaultSize>;

/// Inline `R x C` matrix.
pub type StaticMatrix<T, const R: usize, const C: usize> =
    MatrixBase<StaticStorage<T, R, C>, DefaultSize>;

/// Inline matrix of at most `R * C` elements.
pub type HybridMatrix<T, const R: usize, const C: usize> =
    MatrixBase<HybridStorage<T, R, C>, DefaultSize>;

/// Square matrix with one row and one column per `G` entity.
pub type FixMat<T, G> = MatrixBase<<G as GeoKind>::MatStorage<T>, FixedSize<G>>;

/// Ambient-space square matrix.
pub type WorldMatrix<T> = FixMat<T, geo::World>;

pub type DimMat<T> = FixMat<T, geo::Parts>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config;
    use crate::expr::{Expr, MatrixKind, VectorKind};

    fn assert_vector<E: Expr<Kind = VectorKind>>(_: &E) {}
    fn assert_matrix<E: Expr<Kind = MatrixKind>>(_: &E) {}

    #[test]
    fn test_geometry_vectors() {
        let v = FixVec::<f64, geo::Vertex>::new(2);
        assert_eq!(v.len(), 3);
        let e = FixVec::<f64, geo::Edge>::new(3);
        assert_eq!(e.len(), 6);
        let w = WorldVector::<f64>::new(1);
        assert_eq!(w.len(), config::world_dim());
        let d = DimVec::<i32>::new(2);
        assert_eq!(d.len(), 3);
        assert_eq!(DimVec::<f64>::new(0).len(), 1);
        assert_vector(&v);
        assert!(FixVec::<f64, geo::Center>::try_new(0).is_err());
    }

    #[test]
    fn test_geometry_matrices() {
        let m = FixMat::<f64, geo::Parts>::new(2, 2);
        assert_eq!(m.shape(), (3, 3));
        let w = WorldMatrix::<f32>::new(0, 0);
        assert_eq!(w.num_rows(), config::world_dim());
        assert_matrix(&w);
        assert_eq!(DimMat::<f64>::square(3).len(), 16);
        assert_eq!(DimMat::<f64>::new(1, 2).shape(), (2, 3));
    }

    #[test]
    fn test_geometry_resize() {
        let mut v = FixVec::<f64, geo::Vertex>::new(1);
        assert_eq!(v.len(), 2);
        v.resize(3);
        assert_eq!(v.len(), 4);
    }

    #[cfg(feature = "fixed-size")]
    #[test]
    fn test_fixed_size_is_inline() {
        let v = FixVec::<f64, geo::Edge>::new(1);
        assert_eq!(v.capacity(), crate::geometry::MAX_EDGE);
    }

    #[test]
    fn test_aligned_vector() {
        let mut v = AlignedVector::<f64>::from_slice(&[1.0, 2.0, 3.0]);
        v *= 2.0_f64;
        assert_eq!(v.as_slice(), &[2.0, 4.0, 6.0]);
        assert_eq!(v.as_slice().as_ptr() as usize % crate::storage::CACHE_LINE, 0);
    }
}
