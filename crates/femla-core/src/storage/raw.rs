//! Owned heap buffer with a chosen alignment.

use std::alloc::{self, Layout};
use std::mem;
use std::ptr::{self, NonNull};

use crate::error::{fatal, LinalgError};
use crate::Scalar;

/// Alignment requested by aligned dynamic storage.
pub const CACHE_LINE: usize = 64;

/// `capacity` initialised elements on the heap.
///
/// Elements are `Copy`, so dropping the buffer only releases the memory.
pub(crate) struct RawBuffer<T: Scalar> {
    ptr: NonNull<T>,
    capacity: usize,
    layout: Layout,
}

impl<T: Scalar> RawBuffer<T> {
    /// Allocate `capacity` elements set to `T::zero()`.
    ///
    /// With `aligned` the first element sits on a [`CACHE_LINE`] boundary.
    pub(crate) fn zeroed(capacity: usize, aligned: bool) -> Self {
        let align = if aligned {
            CACHE_LINE.max(mem::align_of::<T>())
        } else {
            mem::align_of::<T>()
        };
        let layout = mem::size_of::<T>()
            .checked_mul(capacity)
            .and_then(|bytes| Layout::from_size_align(bytes, align).ok())
            .unwrap_or_else(|| {
                fatal(LinalgError::CapacityExceeded {
                    requested: capacity,
                    capacity: isize::MAX as usize / mem::size_of::<T>().max(1),
                })
            });

        if layout.size() == 0 {
            return Self {
                ptr: NonNull::dangling(),
                capacity,
                layout,
            };
        }

        // SAFETY: the layout has non-zero size.
        let raw = unsafe { alloc::alloc(layout) }.cast::<T>();
        let Some(ptr) = NonNull::new(raw) else {
            alloc::handle_alloc_error(layout);
        };
        for i in 0..capacity {
            // SAFETY: `i < capacity` and the allocation holds `capacity` elements.
            unsafe { ptr.as_ptr().add(i).write(T::zero()) };
        }
        Self {
            ptr,
            capacity,
            layout,
        }
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether the first element honours `align`. Empty buffers always do.
    pub(crate) fn is_aligned_to(&self, align: usize) -> bool {
        self.layout.size() == 0 || (self.ptr.as_ptr() as usize) % align == 0
    }

    #[inline]
    pub(crate) fn as_slice(&self, len: usize) -> &[T] {
        debug_assert!(len <= self.capacity);
        // SAFETY: the first `capacity` elements are initialised and `len <= capacity`.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), len) }
    }

    #[inline]
    pub(crate) fn as_mut_slice(&mut self, len: usize) -> &mut [T] {
        debug_assert!(len <= self.capacity);
        // SAFETY: as above, and `&mut self` guarantees exclusive access.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), len) }
    }
}

impl<T: Scalar> Clone for RawBuffer<T> {
    fn clone(&self) -> Self {
        let aligned = self.layout.align() >= CACHE_LINE;
        let copy = Self::zeroed(self.capacity, aligned);
        if self.capacity > 0 {
            // SAFETY: both buffers hold `capacity` initialised elements and are
            // distinct allocations.
            unsafe { ptr::copy_nonoverlapping(self.ptr.as_ptr(), copy.ptr.as_ptr(), self.capacity) };
        }
        copy
    }
}

impl<T: Scalar> Drop for RawBuffer<T> {
    fn drop(&mut self) {
        if self.layout.size() != 0 {
            // SAFETY: allocated in `zeroed` with exactly this layout.
            unsafe { alloc::dealloc(self.ptr.as_ptr().cast(), self.layout) };
        }
    }
}

// SAFETY: the buffer is uniquely owned, like a `Box<[T]>`.
unsafe impl<T: Scalar> Send for RawBuffer<T> {}
unsafe impl<T: Scalar> Sync for RawBuffer<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeroed_and_aligned() {
        let buf = RawBuffer::<f64>::zeroed(10, true);
        assert_eq!(buf.capacity(), 10);
        assert!(buf.is_aligned_to(CACHE_LINE));
        assert!(buf.as_slice(10).iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_empty_buffer() {
        let buf = RawBuffer::<i32>::zeroed(0, true);
        assert_eq!(buf.capacity(), 0);
        assert!(buf.as_slice(0).is_empty());
        assert!(buf.is_aligned_to(CACHE_LINE));
    }

    #[test]
    fn test_clone_copies_whole_capacity() {
        let mut a = RawBuffer::<u32>::zeroed(4, false);
        a.as_mut_slice(4).copy_from_slice(&[1, 2, 3, 4]);
        let b = a.clone();
        a.as_mut_slice(4)[0] = 9;
        assert_eq!(b.as_slice(4), &[1, 2, 3, 4]);
    }
}
