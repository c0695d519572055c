//! Storage policies: the element buffers behind every container.
//!
//! | policy | capacity | logical size | grows past capacity |
//! |---|---|---|---|
//! | [`StaticStorage`] | compile time | = capacity | never (fatal) |
//! | [`HybridStorage`] | compile time | run time, `<= capacity` | never (fatal) |
//! | [`DynamicStorage`] | run time | run time, `<= capacity` | reallocates, contents lost |
//!
//! The containers only talk to a buffer through [`Storage`]: sizing, slices and
//! the two traversal primitives used by the assignment engine.

mod dynamic;
mod fixed;
mod hybrid;
mod raw;

use core::fmt;

pub use dynamic::DynamicStorage;
pub use fixed::StaticStorage;
pub use hybrid::HybridStorage;
pub use raw::CACHE_LINE;

use crate::assign::Assigner;
use crate::error::{fatal, Result};
use crate::expr::Expr;
use crate::Scalar;

/// A contiguous buffer of `Elem` with a logical size and a capacity.
///
/// Invariant: `len() <= capacity()`, and `as_slice()` covers exactly the first
/// `len()` elements.
pub trait Storage: Clone + fmt::Debug {
    type Elem: Scalar;

    /// Logical size when fixed at compile time.
    const SIZE: Option<usize>;
    /// Row count when fixed at compile time.
    const ROWS: Option<usize>;
    /// Column count when fixed at compile time.
    const COLS: Option<usize>;

    /// A buffer of logical size `size`, every element zero.
    fn try_with_size(size: usize) -> Result<Self>;

    fn with_size(size: usize) -> Self {
        Self::try_with_size(size).unwrap_or_else(|e| fatal(e))
    }

    /// Change the logical size.
    ///
    /// Elements below `min(old, new)` survive unless the buffer has to grow past
    /// its capacity.
    fn try_resize(&mut self, size: usize) -> Result<()>;

    fn resize(&mut self, size: usize) {
        self.try_resize(size).unwrap_or_else(|e| fatal(e));
    }

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn capacity(&self) -> usize;

    /// Bytes held by the buffer, inline and on the heap.
    fn memory_usage(&self) -> usize {
        core::mem::size_of::<Self>()
    }

    fn as_slice(&self) -> &[Self::Elem];

    fn as_mut_slice(&mut self) -> &mut [Self::Elem];

    /// Combine `src(i)` into element `i` for every logical index, ascending.
    ///
    /// The caller has checked `src.size() == self.len()`.
    fn assign_aux<E, A>(&mut self, src: &E, assigner: A)
    where
        E: Expr<Elem = Self::Elem> + ?Sized,
        A: Assigner<Self::Elem>,
    {
        for (i, x) in self.as_mut_slice().iter_mut().enumerate() {
            assigner.apply(x, src.eval(i));
        }
    }

    /// Apply `f` to every logical element in place.
    fn for_each_aux<F>(&mut self, f: F)
    where
        F: FnMut(&mut Self::Elem),
    {
        self.as_mut_slice().iter_mut().for_each(f);
    }
}
