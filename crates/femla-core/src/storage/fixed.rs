use core::fmt;

use super::Storage;
use crate::assign::Assigner;
use crate::error::{LinalgError, Result};
use crate::expr::Expr;
use crate::Scalar;

/// Inline `R x C` buffer whose size never changes.
///
/// Vectors use `C = 1`. A zero-sized buffer is rejected when the type is
/// instantiated:
///
/// ```compile_fail
/// use femla_core::storage::{StaticStorage, Storage};
/// let _ = StaticStorage::<f64, 0>::with_size(0);
/// ```
#[derive(Clone, Copy, PartialEq)]
pub struct StaticStorage<T: Scalar, const R: usize, const C: usize = 1> {
    data: [[T; C]; R],
}

impl<T: Scalar, const R: usize, const C: usize> StaticStorage<T, R, C> {
    const NON_EMPTY: () = assert!(R * C > 0, "static storage needs a positive size");

    /// Total element count, `R * C`.
    pub const LEN: usize = R * C;

    pub fn from_rows(data: [[T; C]; R]) -> Self {
        let () = Self::NON_EMPTY;
        Self { data }
    }

    fn check(requested: usize) -> Result<()> {
        if requested == Self::LEN {
            Ok(())
        } else {
            Err(LinalgError::FixedSize {
                size: Self::LEN,
                requested,
            })
        }
    }
}

impl<T: Scalar, const R: usize, const C: usize> Storage for StaticStorage<T, R, C> {
    type Elem = T;

    const SIZE: Option<usize> = Some(R * C);
    const ROWS: Option<usize> = Some(R);
    const COLS: Option<usize> = Some(C);

    fn try_with_size(size: usize) -> Result<Self> {
        Self::check(size)?;
        Ok(Self::from_rows([[T::zero(); C]; R]))
    }

    fn try_resize(&mut self, size: usize) -> Result<()> {
        Self::check(size)
    }

    #[inline]
    fn len(&self) -> usize {
        Self::LEN
    }

    #[inline]
    fn capacity(&self) -> usize {
        Self::LEN
    }

    #[inline]
    fn as_slice(&self) -> &[T] {
        self.data.as_flattened()
    }

    #[inline]
    fn as_mut_slice(&mut self) -> &mut [T] {
        self.data.as_flattened_mut()
    }

    #[allow(clippy::needless_range_loop)]
    fn assign_aux<E, A>(&mut self, src: &E, assigner: A)
    where
        E: Expr<Elem = T> + ?Sized,
        A: Assigner<T>,
    {
        // Constant trip count, unrolled by the optimiser for small sizes.
        let flat = self.data.as_flattened_mut();
        for i in 0..Self::LEN {
            assigner.apply(&mut flat[i], src.eval(i));
        }
    }
}

impl<T: Scalar, const R: usize, const C: usize> fmt::Debug for StaticStorage<T, R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticStorage")
            .field("shape", &(R, C))
            .field("data", &self.as_slice())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_shape() {
        let s = StaticStorage::<f64, 2, 3>::with_size(6);
        assert_eq!(s.len(), 6);
        assert_eq!(s.capacity(), 6);
        assert_eq!(<StaticStorage<f64, 2, 3> as Storage>::ROWS, Some(2));
        assert_eq!(<StaticStorage<f64, 4> as Storage>::COLS, Some(1));
    }

    #[test]
    fn test_resize_same_size_is_noop() {
        let mut s = StaticStorage::<i32, 3>::from_rows([[1], [2], [3]]);
        s.resize(3);
        assert_eq!(s.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn test_resize_other_size_fails() {
        let mut s = StaticStorage::<i32, 3>::with_size(3);
        assert_eq!(
            s.try_resize(2),
            Err(LinalgError::FixedSize {
                size: 3,
                requested: 2
            })
        );
        assert!(StaticStorage::<i32, 3>::try_with_size(4).is_err());
    }

    #[test]
    #[should_panic(expected = "cannot be resized")]
    fn test_resize_beyond_is_fatal() {
        let mut s = StaticStorage::<f32, 2, 2>::with_size(4);
        s.resize(5);
    }

    #[test]
    fn test_row_major_flattening() {
        let s = StaticStorage::<u8, 2, 2>::from_rows([[1, 2], [3, 4]]);
        assert_eq!(s.as_slice(), &[1, 2, 3, 4]);
    }
}
