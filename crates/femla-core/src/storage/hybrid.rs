use core::fmt;

use super::Storage;
use crate::error::{LinalgError, Result};
use crate::Scalar;

/// Inline buffer of capacity `R * C` with a run-time logical size.
///
/// Shrinking and growing within the capacity only moves the logical size;
/// there is no way to grow past it.
#[derive(Clone, Copy)]
pub struct HybridStorage<T: Scalar, const R: usize, const C: usize = 1> {
    data: [[T; C]; R],
    len: usize,
}

impl<T: Scalar, const R: usize, const C: usize> HybridStorage<T, R, C> {
    const NON_EMPTY: () = assert!(R * C > 0, "hybrid storage needs a positive capacity");

    pub const CAPACITY: usize = R * C;

    fn check(requested: usize) -> Result<()> {
        if requested <= Self::CAPACITY {
            Ok(())
        } else {
            Err(LinalgError::CapacityExceeded {
                requested,
                capacity: Self::CAPACITY,
            })
        }
    }
}

impl<T: Scalar, const R: usize, const C: usize> Storage for HybridStorage<T, R, C> {
    type Elem = T;

    const SIZE: Option<usize> = None;
    const ROWS: Option<usize> = None;
    const COLS: Option<usize> = None;

    fn try_with_size(size: usize) -> Result<Self> {
        let () = Self::NON_EMPTY;
        Self::check(size)?;
        Ok(Self {
            data: [[T::zero(); C]; R],
            len: size,
        })
    }

    fn try_resize(&mut self, size: usize) -> Result<()> {
        Self::check(size)?;
        self.len = size;
        Ok(())
    }

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn capacity(&self) -> usize {
        Self::CAPACITY
    }

    #[inline]
    fn as_slice(&self) -> &[T] {
        &self.data.as_flattened()[..self.len]
    }

    #[inline]
    fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data.as_flattened_mut()[..self.len]
    }
}

impl<T: Scalar, const R: usize, const C: usize> fmt::Debug for HybridStorage<T, R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HybridStorage")
            .field("capacity", &Self::CAPACITY)
            .field("data", &self.as_slice())
            .finish()
    }
}
