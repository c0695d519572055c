//! Vectors and matrices: a storage policy plus a size policy, with
//! element access, assignment from expressions and scalar broadcast.

mod aliases;
mod display;
mod matrix;
mod vector;

pub use aliases::*;
pub use matrix::MatrixBase;
pub use vector::VectorBase;
