//! `femla-core`: small dense vectors and matrices built on lazy expressions.
//!
//! Arithmetic on vectors and matrices builds expression trees that borrow
//! their operands. Nothing is computed until the tree is assigned into a
//! container or reduced to a scalar, so `a + b * 2.0` allocates no
//! temporaries.
//!
//! ```
//! use femla_core::prelude::*;
//! use femla_core::linalg::{sum, two_norm};
//!
//! let v = Vector::from_slice(&[1.0, 1.0, 1.0]);
//! assert_eq!(sum(&v), 3.0);
//! assert_eq!(two_norm(&v), 3.0_f64.sqrt());
//!
//! let m = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]);
//! let x = Vector::from_slice(&[1.0, 1.0]);
//! let mut y = Vector::new(2);
//! y.assign(&(&m * &x));
//! assert_eq!(y.as_slice(), &[3.0, 7.0]);
//! ```
//!
//! # Design
//!
//! - A container is a [`storage`] policy (static, hybrid or heap) plus a
//!   [`size_policy`] that turns the requested count into the real one.
//!   Geometry-sized containers ([`FixVec`](container::FixVec),
//!   [`WorldVector`](container::WorldVector), ...) take a spatial dimension.
//! - Expression nodes ([`expr`]) are generic over their operands and
//!   operation; evaluation is monomorphised with no dynamic dispatch.
//! - Precondition violations are reported two ways: `try_*` methods return
//!   [`LinalgError`], the plain methods and operators log the error and panic.

pub mod assign;
pub mod compare;
pub mod config;
pub mod container;
pub mod dtype;
pub mod error;
pub mod expr;
pub mod geometry;
pub mod linalg;
pub mod size_policy;
pub mod storage;

mod proptests;
#[cfg(test)]
mod tests;

// Re-export key types at crate root for convenience.
pub use dtype::{Float, Scalar};
pub use error::{LinalgError, Result};

/// Items intended for glob-import: `use femla_core::prelude::*;`
pub mod prelude {
    pub use crate::container::{
        AlignedVector, DimMat, DimVec, FixMat, FixVec, HybridMatrix, HybridVector, Matrix,
        MatrixBase, StaticMatrix, StaticVector, Vector, VectorBase, WorldMatrix, WorldVector,
    };
    pub use crate::dtype::{Float, Scalar};
    pub use crate::error::{LinalgError, Result};
    pub use crate::expr::{num_cols, num_rows, size, Expr};
    pub use crate::geometry::GeoIndex;
    pub use crate::size_policy::geo;
}
