//! Geometry kinds and the counts they stand for.
//!
//! Mesh code sizes per-element arrays by an abstract [`GeoIndex`] plus the
//! element dimension instead of a literal count. The counts below are those of
//! a simplex (point, line, triangle, tetrahedron).
//!
//! | kind         | dim 0 | dim 1 | dim 2 | dim 3 |
//! |--------------|-------|-------|-------|-------|
//! | `Center`     | -     | 1     | 1     | 1     |
//! | `Vertex`     | 1     | 2     | 3     | 4     |
//! | `Edge`       | 0     | 1     | 3     | 6     |
//! | `Face`       | 0     | 0     | 1     | 4     |
//! | `Dimension`  | -     | 1     | 2     | 3     |
//! | `Parts`      | 1     | 2     | 3     | 4     |
//! | `Neighbour`  | -     | 2     | 3     | 4     |
//! | `Boundary`   | -     | 2     | 3     | 4     |
//! | `Projection` | -     | 3     | 4     | 5     |
//!
//! `World` ignores the dimension and returns the configured ambient dimension
//! ([`config::world_dim`](crate::config::world_dim)).

use serde::{Deserialize, Serialize};

use crate::config;
use crate::error::{fatal, LinalgError, Result};

/// Highest supported spatial dimension.
pub const MAX_DIM: usize = 3;

/// Abstract geometric entity used to size mesh-related containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeoIndex {
    /// The element interior (edge in 1d, face in 2d, cell in 3d).
    Center,
    Vertex,
    Edge,
    Face,
    /// The element dimension itself.
    Dimension,
    /// Vertices in 1d, edges in 2d, faces in 3d.
    Parts,
    Neighbour,
    /// Ambient space dimension.
    World,
    Boundary,
    /// Boundary projections plus the element projection.
    Projection,
}

impl GeoIndex {
    pub const ALL: [GeoIndex; 10] = [
        GeoIndex::Center,
        GeoIndex::Vertex,
        GeoIndex::Edge,
        GeoIndex::Face,
        GeoIndex::Dimension,
        GeoIndex::Parts,
        GeoIndex::Neighbour,
        GeoIndex::World,
        GeoIndex::Boundary,
        GeoIndex::Projection,
    ];

    /// Kinds that are meaningful for a zero-dimensional element.
    const fn allowed_in_dim0(self) -> bool {
        matches!(
            self,
            GeoIndex::Vertex | GeoIndex::Parts | GeoIndex::Edge | GeoIndex::Face
        )
    }

    /// Counts per dimension `0..=3`. `World` is not table-driven.
    const fn row(self) -> [usize; MAX_DIM + 1] {
        match self {
            GeoIndex::Center => [1, 1, 1, 1],
            GeoIndex::Vertex | GeoIndex::Parts | GeoIndex::Neighbour | GeoIndex::Boundary => {
                [1, 2, 3, 4]
            }
            GeoIndex::Edge => [0, 1, 3, 6],
            GeoIndex::Face => [0, 0, 1, 4],
            GeoIndex::Dimension => [0, 1, 2, 3],
            GeoIndex::Projection => [2, 3, 4, 5],
            GeoIndex::World => [MAX_DIM; MAX_DIM + 1],
        }
    }
}

/// Number of `kind` entities of a simplex of dimension `dim`.
pub fn try_geometry_size(kind: GeoIndex, dim: usize) -> Result<usize> {
    if kind == GeoIndex::World {
        return Ok(config::world_dim());
    }
    if dim > MAX_DIM || (dim == 0 && !kind.allowed_in_dim0()) {
        return Err(LinalgError::InvalidGeometry { kind, dim });
    }
    Ok(kind.row()[dim])
}

/// Like [`try_geometry_size`], treating an invalid request as fatal.
///
/// ```
/// use femla_core::geometry::{geometry_size, GeoIndex};
/// assert_eq!(geometry_size(GeoIndex::Vertex, 2), 3);
/// assert_eq!(geometry_size(GeoIndex::Edge, 3), 6);
/// ```
#[track_caller]
pub fn geometry_size(kind: GeoIndex, dim: usize) -> usize {
    try_geometry_size(kind, dim).unwrap_or_else(|e| fatal(e))
}

/// Upper bound of [`geometry_size`] over every dimension.
///
/// Used as the inline capacity of geometry-sized containers.
pub const fn max_size(kind: GeoIndex) -> usize {
    let row = kind.row();
    let mut best = 0;
    let mut d = 0;
    while d <= MAX_DIM {
        if row[d] > best {
            best = row[d];
        }
        d += 1;
    }
    best
}

pub const MAX_CENTER: usize = max_size(GeoIndex::Center);
pub const MAX_VERTEX: usize = max_size(GeoIndex::Vertex);
pub const MAX_EDGE: usize = max_size(GeoIndex::Edge);
pub const MAX_FACE: usize = max_size(GeoIndex::Face);
pub const MAX_DIMENSION: usize = max_size(GeoIndex::Dimension);
pub const MAX_PARTS: usize = max_size(GeoIndex::Parts);
pub const MAX_NEIGHBOUR: usize = max_size(GeoIndex::Neighbour);
pub const MAX_WORLD: usize = max_size(GeoIndex::World);
pub const MAX_BOUNDARY: usize = max_size(GeoIndex::Boundary);
pub const MAX_PROJECTION: usize = max_size(GeoIndex::Projection);
