use thiserror::Error;

use crate::geometry::GeoIndex;

/// All errors reported by `femla-core`.
///
/// Every variant is a precondition violation. The `try_*` entry points return
/// them; the plain entry points and operators treat them as fatal (see [`fatal`]).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinalgError {
    /// Target and source of an operation have different element counts.
    #[error("size mismatch in {context}: expected {expected}, got {got}")]
    SizeMismatch {
        context: &'static str,
        expected: usize,
        got: usize,
    },

    /// Operand shapes (rows, cols) are incompatible.
    #[error("shape mismatch in {context}: {lhs:?} vs {rhs:?}")]
    ShapeMismatch {
        context: &'static str,
        lhs: (usize, usize),
        rhs: (usize, usize),
    },

    /// The operation is only defined for square matrices.
    #[error("matrix must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    /// Static storage asked for a size other than its compile-time size.
    #[error("fixed-size storage of size {size} cannot be resized to {requested}")]
    FixedSize { size: usize, requested: usize },

    /// Hybrid storage asked for more elements than its inline capacity.
    #[error("requested size {requested} exceeds capacity {capacity}")]
    CapacityExceeded { requested: usize, capacity: usize },

    /// A checked accessor was used with an index outside the container.
    #[error("index {index:?} out of range for shape {shape:?}")]
    IndexOutOfBounds {
        index: (usize, usize),
        shape: (usize, usize),
    },

    /// Geometry lookup with an unsupported (kind, dimension) pair.
    #[error("invalid geometry request: {kind:?} in dimension {dim}")]
    InvalidGeometry { kind: GeoIndex, dim: usize },

    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// The process-wide configuration was already fixed with another value.
    #[error("configuration already in use with world_dim = {world_dim}")]
    ConfigFrozen { world_dim: usize },
}

/// Convenience alias used throughout `femla-core`.
pub type Result<T> = std::result::Result<T, LinalgError>;

/// Report a precondition violation and abort the current operation.
///
/// The error is logged before panicking so that it reaches the application log
/// even when the panic is caught further up.
#[cold]
#[track_caller]
pub(crate) fn fatal(err: LinalgError) -> ! {
    log::error!("{err}");
    panic!("{err}");
}
