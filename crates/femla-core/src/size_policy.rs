//! Size policies: map a requested count to the size a container really gets.
//!
//! A policy is evaluated once, when a container is built or resized. Keeping
//! it separate from the storage lets the same buffer type back ordinary,
//! constant-size and geometry-sized containers.

use core::fmt::Debug;
use core::marker::PhantomData;

use crate::error::Result;
use crate::geometry::{self, GeoIndex};
use crate::storage::Storage;
use crate::Scalar;

/// `eval(requested) -> effective size`.
pub trait SizePolicy: 'static {
    fn eval(requested: usize) -> usize;

    fn try_eval(requested: usize) -> Result<usize> {
        Ok(Self::eval(requested))
    }
}

/// Identity: the container gets exactly what was asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DefaultSize;

impl SizePolicy for DefaultSize {
    #[inline]
    fn eval(requested: usize) -> usize {
        requested
    }
}

/// Always `N`, whatever was asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StaticSize<const N: usize>;

impl<const N: usize> SizePolicy for StaticSize<N> {
    #[inline]
    fn eval(_requested: usize) -> usize {
        N
    }
}

/// Interprets the requested count as a spatial dimension and returns the
/// number of `G` entities of a simplex of that dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedSize<G: GeoKind>(PhantomData<G>);

impl<G: GeoKind> SizePolicy for FixedSize<G> {
    #[inline]
    fn eval(dim: usize) -> usize {
        geometry::geometry_size(G::KIND, dim)
    }

    fn try_eval(dim: usize) -> Result<usize> {
        geometry::try_geometry_size(G::KIND, dim)
    }
}

/// Type-level geometry kind, see [`geo`].
///
/// Besides the runtime [`GeoIndex`] it picks the buffers of containers sized by
/// this kind: inline storage bounded by [`geometry::max_size`] with the
/// `fixed-size` feature, heap storage without.
pub trait GeoKind: Debug + Copy + Default + Eq + 'static {
    const KIND: GeoIndex;

    type VecStorage<T: Scalar>: Storage<Elem = T>;
    type MatStorage<T: Scalar>: Storage<Elem = T>;
}

macro_rules! geo_kinds {
    ($($(#[$meta:meta])* $name:ident => $max:ident;)*) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
            pub struct $name;

            impl GeoKind for $name {
                const KIND: crate::geometry::GeoIndex = crate::geometry::GeoIndex::$name;

                #[cfg(feature = "fixed-size")]
                type VecStorage<T: crate::Scalar> =
                    crate::storage::HybridStorage<T, { crate::geometry::$max }>;
                #[cfg(feature = "fixed-size")]
                type MatStorage<T: crate::Scalar> = crate::storage::HybridStorage<
                    T,
                    { crate::geometry::$max },
                    { crate::geometry::$max },
                >;

                #[cfg(not(feature = "fixed-size"))]
                type VecStorage<T: crate::Scalar> = crate::storage::DynamicStorage<T>;
                #[cfg(not(feature = "fixed-size"))]
                type MatStorage<T: crate::Scalar> = crate::storage::DynamicStorage<T>;
            }
        )*
    };
}

/// Marker types, one per [`GeoIndex`].
pub mod geo {
    use super::GeoKind;

    geo_kinds! {
        Center => MAX_CENTER;
        Vertex => MAX_VERTEX;
        Edge => MAX_EDGE;
        Face => MAX_FACE;
        Dimension => MAX_DIMENSION;
        Parts => MAX_PARTS;
        Neighbour => MAX_NEIGHBOUR;
        /// Ambient space dimension, see [`config`](crate::config).
        World => MAX_WORLD;
        Boundary => MAX_BOUNDARY;
        Projection => MAX_PROJECTION;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_identity() {
        assert_eq!(DefaultSize::eval(0), 0);
        assert_eq!(DefaultSize::eval(17), 17);
    }

    #[test]
    fn test_static_ignores_request() {
        assert_eq!(StaticSize::<4>::eval(0), 4);
        assert_eq!(StaticSize::<4>::eval(99), 4);
    }

    #[test]
    fn test_fixed_maps_dimension() {
        assert_eq!(FixedSize::<geo::Vertex>::eval(2), 3);
        assert_eq!(FixedSize::<geo::Edge>::eval(3), 6);
        assert_eq!(FixedSize::<geo::Parts>::eval(1), 2);
        assert_eq!(
            FixedSize::<geo::World>::eval(0),
            crate::config::world_dim()
        );
        assert!(FixedSize::<geo::Center>::try_eval(0).is_err());
        assert!(FixedSize::<geo::Vertex>::try_eval(4).is_err());
    }

    #[test]
    fn test_geo_storage_fits_every_dimension() {
        type Vs = <geo::Edge as GeoKind>::VecStorage<f64>;
        type Ms = <geo::Edge as GeoKind>::MatStorage<f64>;
        for d in 1..=geometry::MAX_DIM {
            let n = FixedSize::<geo::Edge>::eval(d);
            let s = Vs::with_size(n);
            assert_eq!(s.len(), n);
            let m = Ms::with_size(n * n);
            assert_eq!(m.len(), n * n);
        }
    }
}
