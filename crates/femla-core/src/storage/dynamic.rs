use core::fmt;
use core::mem;

use super::raw::{RawBuffer, CACHE_LINE};
use super::Storage;
use crate::assign::Assigner;
use crate::error::Result;
use crate::expr::Expr;
use crate::Scalar;

/// Heap buffer with a run-time size.
///
/// `ALIGNED = true` places the first element on a cache line. Growing past the
/// capacity reallocates and does not keep the old contents: the new buffer is
/// zero-filled. Copy the data out first if it is still needed.
#[derive(Clone)]
pub struct DynamicStorage<T: Scalar, const ALIGNED: bool = false> {
    buf: RawBuffer<T>,
    len: usize,
}

impl<T: Scalar, const ALIGNED: bool> Storage for DynamicStorage<T, ALIGNED> {
    type Elem = T;

    const SIZE: Option<usize> = None;
    const ROWS: Option<usize> = None;
    const COLS: Option<usize> = None;

    fn try_with_size(size: usize) -> Result<Self> {
        Ok(Self {
            buf: RawBuffer::zeroed(size, ALIGNED),
            len: size,
        })
    }

    fn try_resize(&mut self, size: usize) -> Result<()> {
        if size > self.buf.capacity() {
            log::trace!(
                "reallocating dynamic storage: capacity {} -> {size}",
                self.buf.capacity()
            );
            self.buf = RawBuffer::zeroed(size, ALIGNED);
        }
        self.len = size;
        Ok(())
    }

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    fn memory_usage(&self) -> usize {
        mem::size_of::<Self>() + self.buf.capacity() * mem::size_of::<T>()
    }

    #[inline]
    fn as_slice(&self) -> &[T] {
        self.buf.as_slice(self.len)
    }

    #[inline]
    fn as_mut_slice(&mut self) -> &mut [T] {
        self.buf.as_mut_slice(self.len)
    }

    fn assign_aux<E, A>(&mut self, src: &E, assigner: A)
    where
        E: Expr<Elem = T> + ?Sized,
        A: Assigner<T>,
    {
        if ALIGNED {
            debug_assert!(self.buf.is_aligned_to(CACHE_LINE));
        }
        for (i, x) in self.as_mut_slice().iter_mut().enumerate() {
            assigner.apply(x, src.eval(i));
        }
    }
}

impl<T: Scalar, const ALIGNED: bool> fmt::Debug for DynamicStorage<T, ALIGNED> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicStorage")
            .field("capacity", &self.capacity())
            .field("aligned", &ALIGNED)
            .field("data", &self.as_slice())
            .finish()
    }
}
