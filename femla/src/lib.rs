//! # Femla
//!
//! Small dense vectors and matrices for finite-element codes, evaluated
//! through lazy expression templates.
//!
//! One `use femla::prelude::*;` gives you the container aliases, the
//! expression trait and the geometry kinds.
//!
//! ```
//! use femla::prelude::*;
//!
//! let a = Vector::from_slice(&[1.0, 2.0]);
//! let b = Vector::from_slice(&[3.0, 4.0]);
//! let c = Vector::from_expr(&(&a + &b * 2.0_f64));
//! assert_eq!(c.as_slice(), &[7.0, 10.0]);
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Enables |
//! |---------|---------|
//! | `fixed-size` *(default)* | Inline storage for geometry-sized containers |

pub use femla_core as core;

/// Glob-import convenience: `use femla::prelude::*;`
pub mod prelude {
    pub use femla_core::prelude::*;
}
