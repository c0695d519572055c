use core::cmp::Ordering;
use core::fmt;
use core::marker::PhantomData;
use core::ops::{AddAssign, DivAssign, Index, IndexMut, MulAssign, SubAssign};

use crate::assign::{self, AddTo, Assigner, DivBy, MulBy, Replace, SubFrom};
use crate::compare;
use crate::error::{fatal, LinalgError, Result};
use crate::expr::{Expr, VectorKind};
use crate::size_policy::{DefaultSize, SizePolicy};
use crate::storage::Storage;

/// A vector over storage `S` whose length is chosen by the size policy `P`.
///
/// Arithmetic on `&VectorBase` builds lazy expressions; they are evaluated
/// by [`assign`](Self::assign), the compound assignment operators or
/// [`from_expr`](Self::from_expr).
///
/// ```
/// use femla_core::prelude::*;
///
/// let a = Vector::from_slice(&[1.0, 2.0, 3.0]);
/// let b = Vector::from_slice(&[1.0, 1.0, 1.0]);
/// let mut c = Vector::new(3);
/// c.assign(&(&a + &b * 2.0));
/// assert_eq!(c.as_slice(), &[3.0, 4.0, 5.0]);
/// c -= &a;
/// assert_eq!(c.as_slice(), &[2.0, 2.0, 2.0]);
/// ```
///
/// An expression cannot read the vector it is assigned to:
///
/// ```compile_fail
/// use femla_core::prelude::*;
///
/// let m = Matrix::from_rows(&[[0.0, 1.0], [1.0, 0.0]]);
/// let mut x = Vector::from_slice(&[1.0, 2.0]);
/// x.assign(&(&m * &x));
/// ```
pub struct VectorBase<S: Storage, P: SizePolicy = DefaultSize> {
    storage: S,
    _policy: PhantomData<P>,
}

impl<S: Storage, P: SizePolicy> VectorBase<S, P> {
    fn from_storage(storage: S) -> Self {
        Self {
            storage,
            _policy: PhantomData,
        }
    }

    /// A zero vector of `P::eval(n)` elements.
    pub fn try_new(n: usize) -> Result<Self> {
        let size = P::try_eval(n)?;
        Ok(Self::from_storage(S::try_with_size(size)?))
    }

    #[track_caller]
    pub fn new(n: usize) -> Self {
        Self::try_new(n).unwrap_or_else(|e| fatal(e))
    }

    /// `P::eval(n)` copies of `value`.
    #[track_caller]
    pub fn from_elem(n: usize, value: S::Elem) -> Self {
        let mut v = Self::new(n);
        v.fill(value);
        v
    }

    /// Evaluate `expr` into a new vector of the same size.
    pub fn try_from_expr<E>(expr: &E) -> Result<Self>
    where
        E: Expr<Elem = S::Elem, Kind = VectorKind> + ?Sized,
    {
        let mut v = Self::from_storage(S::try_with_size(expr.size())?);
        v.try_assign(expr)?;
        Ok(v)
    }

    #[track_caller]
    pub fn from_expr<E>(expr: &E) -> Self
    where
        E: Expr<Elem = S::Elem, Kind = VectorKind> + ?Sized,
    {
        Self::try_from_expr(expr).unwrap_or_else(|e| fatal(e))
    }

    /// Copy of `values`.
    #[track_caller]
    pub fn from_slice(values: &[S::Elem]) -> Self {
        Self::from_expr(values)
    }

    // ------------------------------------------------------------------
    // Assignment
    // ------------------------------------------------------------------

    /// Combine `expr` into `self` with `assigner`. Sizes must match.
    pub fn try_assign_with<E, A>(&mut self, expr: &E, assigner: A) -> Result<()>
    where
        E: Expr<Elem = S::Elem, Kind = VectorKind> + ?Sized,
        A: Assigner<S::Elem>,
    {
        assign::assign_expr(&mut self.storage, expr, assigner, "vector assignment")
    }

    #[track_caller]
    pub fn assign_with<E, A>(&mut self, expr: &E, assigner: A)
    where
        E: Expr<Elem = S::Elem, Kind = VectorKind> + ?Sized,
        A: Assigner<S::Elem>,
    {
        self.try_assign_with(expr, assigner)
            .unwrap_or_else(|e| fatal(e));
    }

    pub fn try_assign<E>(&mut self, expr: &E) -> Result<()>
    where
        E: Expr<Elem = S::Elem, Kind = VectorKind> + ?Sized,
    {
        self.try_assign_with(expr, Replace)
    }

    /// Evaluate `expr` into `self`. Sizes must match.
    #[track_caller]
    pub fn assign<E>(&mut self, expr: &E)
    where
        E: Expr<Elem = S::Elem, Kind = VectorKind> + ?Sized,
    {
        self.assign_with(expr, Replace);
    }

    /// Element-wise copy of a vector of the same size.
    #[track_caller]
    pub fn copy_from<S2: Storage<Elem = S::Elem>, P2: SizePolicy>(
        &mut self,
        other: &VectorBase<S2, P2>,
    ) {
        self.assign(other);
    }

    /// Set every element to `value`.
    pub fn fill(&mut self, value: S::Elem) {
        assign::assign_scalar(&mut self.storage, value, Replace);
    }

    pub fn try_set_values(&mut self, values: &[S::Elem]) -> Result<()> {
        if values.len() != self.len() {
            return Err(LinalgError::SizeMismatch {
                context: "set_values",
                expected: self.len(),
                got: values.len(),
            });
        }
        self.storage.as_mut_slice().copy_from_slice(values);
        Ok(())
    }

    /// Overwrite every element from `values`, which must have `len()` entries.
    #[track_caller]
    pub fn set_values(&mut self, values: &[S::Elem]) {
        self.try_set_values(values).unwrap_or_else(|e| fatal(e));
    }

    // ------------------------------------------------------------------
    // Access
    // ------------------------------------------------------------------

    pub fn try_at(&self, i: usize) -> Result<S::Elem> {
        self.get(i).copied().ok_or(LinalgError::IndexOutOfBounds {
            index: (i, 0),
            shape: (self.len(), 1),
        })
    }

    /// Bounds-checked read.
    #[track_caller]
    pub fn at(&self, i: usize) -> S::Elem {
        self.try_at(i).unwrap_or_else(|e| fatal(e))
    }

    /// Bounds-checked write access.
    #[track_caller]
    pub fn at_mut(&mut self, i: usize) -> &mut S::Elem {
        let shape = (self.len(), 1);
        match self.storage.as_mut_slice().get_mut(i) {
            Some(x) => x,
            None => fatal(LinalgError::IndexOutOfBounds {
                index: (i, 0),
                shape,
            }),
        }
    }

    #[inline]
    pub fn get(&self, i: usize) -> Option<&S::Elem> {
        self.as_slice().get(i)
    }

    #[inline]
    pub fn get_mut(&mut self, i: usize) -> Option<&mut S::Elem> {
        self.storage.as_mut_slice().get_mut(i)
    }

    /// Element `i` without any bounds check.
    ///
    /// # Safety
    ///
    /// `i` must be less than `self.len()`.
    #[inline]
    pub unsafe fn get_unchecked(&self, i: usize) -> &S::Elem {
        // SAFETY: guaranteed by the caller.
        unsafe { self.as_slice().get_unchecked(i) }
    }

    #[inline]
    pub fn as_slice(&self) -> &[S::Elem] {
        self.storage.as_slice()
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [S::Elem] {
        self.storage.as_mut_slice()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, S::Elem> {
        self.as_slice().iter()
    }

    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, S::Elem> {
        self.storage.as_mut_slice().iter_mut()
    }

    // ------------------------------------------------------------------
    // Size
    // ------------------------------------------------------------------

    /// Resize to `P::eval(n)` elements, see [`Storage::try_resize`].
    ///
    /// Storage with a compile-time size gets `n` unchanged, so asking for any
    /// other size fails instead of being mapped back onto it.
    pub fn try_resize(&mut self, n: usize) -> Result<()> {
        let size = if S::SIZE.is_some() { n } else { P::try_eval(n)? };
        self.storage.try_resize(size)
    }

    #[track_caller]
    pub fn resize(&mut self, n: usize) {
        self.try_resize(n).unwrap_or_else(|e| fatal(e));
    }

    /// Exchange the contents of two vectors without copying elements one by one.
    pub fn swap(&mut self, other: &mut Self) {
        core::mem::swap(&mut self.storage, &mut other.storage);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// Bytes held by the vector.
    pub fn memory_usage(&self) -> usize {
        self.storage.memory_usage()
    }
}

impl<S: Storage, P: SizePolicy> Default for VectorBase<S, P> {
    /// Empty for run-time sized storage, zeros for static storage.
    fn default() -> Self {
        Self::from_storage(S::with_size(S::SIZE.unwrap_or(0)))
    }
}

impl<S: Storage, P: SizePolicy> Clone for VectorBase<S, P> {
    fn clone(&self) -> Self {
        Self::from_storage(self.storage.clone())
    }

    fn clone_from(&mut self, source: &Self) {
        self.storage.clone_from(&source.storage);
    }
}

impl<S: Storage, P: SizePolicy> fmt::Debug for VectorBase<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<S: Storage, P: SizePolicy, const N: usize> From<[S::Elem; N]> for VectorBase<S, P> {
    #[track_caller]
    fn from(values: [S::Elem; N]) -> Self {
        Self::from_slice(&values)
    }
}

// ======================================================================
// Expr
// ======================================================================

impl<S: Storage, P: SizePolicy> Expr for VectorBase<S, P> {
    type Elem = S::Elem;
    type Kind = VectorKind;

    const SIZE: Option<usize> = S::SIZE;
    const ROWS: Option<usize> = S::SIZE;
    const COLS: Option<usize> = Some(1);

    #[inline]
    fn size(&self) -> usize {
        self.storage.len()
    }

    #[inline]
    fn eval(&self, i: usize) -> S::Elem {
        self.storage.as_slice()[i]
    }
}

// ======================================================================
// Indexing and iteration
// ======================================================================

impl<S: Storage, P: SizePolicy> Index<usize> for VectorBase<S, P> {
    type Output = S::Elem;

    #[inline]
    fn index(&self, i: usize) -> &S::Elem {
        &self.as_slice()[i]
    }
}

impl<S: Storage, P: SizePolicy> IndexMut<usize> for VectorBase<S, P> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut S::Elem {
        &mut self.storage.as_mut_slice()[i]
    }
}

impl<'a, S: Storage, P: SizePolicy> IntoIterator for &'a VectorBase<S, P> {
    type Item = &'a S::Elem;
    type IntoIter = core::slice::Iter<'a, S::Elem>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, S: Storage, P: SizePolicy> IntoIterator for &'a mut VectorBase<S, P> {
    type Item = &'a mut S::Elem;
    type IntoIter = core::slice::IterMut<'a, S::Elem>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

// ======================================================================
// Compound assignment
// ======================================================================

macro_rules! impl_compound_expr {
    ($trait:ident, $method:ident, $assigner:expr) => {
        impl<S: Storage, P: SizePolicy, E> $trait<E> for VectorBase<S, P>
        where
            E: Expr<Elem = S::Elem, Kind = VectorKind>,
        {
            #[track_caller]
            fn $method(&mut self, rhs: E) {
                self.assign_with(&rhs, $assigner);
            }
        }
    };
}

impl_compound_expr!(AddAssign, add_assign, AddTo);
impl_compound_expr!(SubAssign, sub_assign, SubFrom);
impl_compound_expr!(MulAssign, mul_assign, MulBy);
impl_compound_expr!(DivAssign, div_assign, DivBy);

macro_rules! impl_compound_scalar {
    ($($s:ty),*) => {
        $(
            impl<S: Storage<Elem = $s>, P: SizePolicy> AddAssign<$s> for VectorBase<S, P> {
                fn add_assign(&mut self, rhs: $s) {
                    assign::assign_scalar(&mut self.storage, rhs, AddTo);
                }
            }

            impl<S: Storage<Elem = $s>, P: SizePolicy> SubAssign<$s> for VectorBase<S, P> {
                fn sub_assign(&mut self, rhs: $s) {
                    assign::assign_scalar(&mut self.storage, rhs, SubFrom);
                }
            }

            impl<S: Storage<Elem = $s>, P: SizePolicy> MulAssign<$s> for VectorBase<S, P> {
                fn mul_assign(&mut self, rhs: $s) {
                    assign::assign_scalar(&mut self.storage, rhs, MulBy);
                }
            }

            impl<S: Storage<Elem = $s>, P: SizePolicy> DivAssign<$s> for VectorBase<S, P> {
                fn div_assign(&mut self, rhs: $s) {
                    assign::assign_scalar(&mut self.storage, rhs, DivBy);
                }
            }
        )*
    };
}

impl_compound_scalar!(f32, f64, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

// ======================================================================
// Comparison
// ======================================================================

impl<S: Storage, P: SizePolicy, E> PartialEq<E> for VectorBase<S, P>
where
    E: Expr<Elem = S::Elem, Kind = VectorKind>,
{
    /// Element-wise equality up to the element type's tolerance.
    fn eq(&self, other: &E) -> bool {
        compare::approx_eq(self, other)
    }
}

impl<S: Storage, P: SizePolicy, E> PartialOrd<E> for VectorBase<S, P>
where
    E: Expr<Elem = S::Elem, Kind = VectorKind>,
{
    fn partial_cmp(&self, other: &E) -> Option<Ordering> {
        compare::approx_cmp(self, other)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use crate::prelude::*;
    use crate::size_policy::StaticSize;
    use crate::storage::StaticStorage;
    use crate::LinalgError;

    #[test]
    fn test_new_and_fill() {
        let v = Vector::<f64>::new(4);
        assert_eq!(v.len(), 4);
        assert!(v.iter().all(|&x| x == 0.0));
        let w = Vector::from_elem(3, 2.5);
        assert_eq!(w.as_slice(), &[2.5, 2.5, 2.5]);
        assert!(Vector::<i32>::default().is_empty());
    }

    #[test]
    fn test_static_vector() {
        let v = StaticVector::<i32, 3>::new(3);
        assert_eq!(v.len(), 3);
        assert!(StaticVector::<i32, 3>::try_new(2).is_err());
        let d = StaticVector::<i32, 3>::default();
        assert_eq!(d.len(), 3);
        let w = StaticVector::<i32, 3>::from([1, 2, 3]);
        assert_eq!(w[2], 3);
        let mut x = w.clone();
        assert!(x.try_resize(3).is_ok());
        assert_eq!(
            x.try_resize(5).unwrap_err(),
            LinalgError::FixedSize {
                size: 3,
                requested: 5
            }
        );
        assert_eq!(x.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn test_static_size_policy_does_not_hide_resize() {
        type Pinned = VectorBase<StaticStorage<i32, 3>, StaticSize<3>>;
        let mut v = Pinned::new(0);
        assert_eq!(v.len(), 3);
        assert!(matches!(
            v.try_resize(2),
            Err(LinalgError::FixedSize {
                size: 3,
                requested: 2
            })
        ));
        assert_eq!(v.len(), 3);
    }

    #[test]
    #[should_panic(expected = "fixed-size storage of size 3 cannot be resized to 5")]
    fn test_static_vector_resize_is_fatal() {
        let mut v = StaticVector::<f64, 3>::default();
        v.resize(5);
    }

    #[test]
    fn test_static_vector_rejects_other_sizes() {
        let v = Vector::from_slice(&[1, 2]);
        assert_eq!(
            StaticVector::<i32, 3>::try_from_expr(&v).unwrap_err(),
            LinalgError::FixedSize {
                size: 3,
                requested: 2
            }
        );
    }

    #[test]
    fn test_assign_operators() {
        let a = Vector::from_slice(&[1.0, 2.0, 3.0]);
        let mut v = Vector::from_elem(3, 1.0);
        v += &a;
        assert_eq!(v.as_slice(), &[2.0, 3.0, 4.0]);
        v -= &a * 2.0_f64;
        assert_eq!(v.as_slice(), &[0.0, -1.0, -2.0]);
        v *= 3.0_f64;
        assert_eq!(v.as_slice(), &[0.0, -3.0, -6.0]);
        v /= &a;
        assert_eq!(v.as_slice(), &[0.0, -1.5, -2.0]);
        v += 1.0_f64;
        assert_eq!(v.as_slice(), &[1.0, -0.5, -1.0]);
    }

    #[test]
    #[should_panic(expected = "size mismatch in vector assignment")]
    fn test_assign_size_mismatch_is_fatal() {
        let mut v = Vector::<f64>::new(3);
        v.assign(&Vector::<f64>::new(2));
    }

    #[test]
    fn test_checked_access() {
        let mut v = Vector::from_slice(&[10, 20, 30]);
        assert_eq!(v.at(1), 20);
        *v.at_mut(2) = 31;
        assert_eq!(v[2], 31);
        assert_eq!(v.get(3), None);
        assert!(matches!(
            v.try_at(3),
            Err(LinalgError::IndexOutOfBounds { index: (3, 0), .. })
        ));
        // SAFETY: 0 < len
        assert_eq!(unsafe { *v.get_unchecked(0) }, 10);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_at_out_of_range_is_fatal() {
        let v = Vector::from_slice(&[1.0]);
        let _ = v.at(1);
    }

    #[test]
    fn test_set_values() {
        let mut v = Vector::<u8>::new(3);
        v.set_values(&[7, 8, 9]);
        assert_eq!(v.as_slice(), &[7, 8, 9]);
        assert!(v.try_set_values(&[1]).is_err());
    }

    #[test]
    fn test_resize_and_swap() {
        let mut a = Vector::from_slice(&[1, 2, 3, 4]);
        a.resize(2);
        assert_eq!(a.as_slice(), &[1, 2]);
        assert_eq!(a.capacity(), 4);
        let mut b = Vector::from_slice(&[9]);
        a.swap(&mut b);
        assert_eq!(a.as_slice(), &[9]);
        assert_eq!(b.as_slice(), &[1, 2]);
    }

    #[test]
    fn test_hybrid_vector() {
        let mut v = HybridVector::<f32, 4>::new(2);
        assert_eq!(v.capacity(), 4);
        v.resize(4);
        assert_eq!(v.len(), 4);
        assert!(v.try_resize(5).is_err());
    }

    #[test]
    fn test_equality_and_order() {
        let a = Vector::from_slice(&[1.0, 2.0]);
        let b = Vector::from_slice(&[1.0, 2.0 + 1e-17]);
        let c = Vector::from_slice(&[1.0, 3.0]);
        assert_eq!(a, b);
        assert!(a != c);
        assert!(a < c);
        assert!(a != Vector::from_slice(&[1.0]));
        assert_eq!(a.partial_cmp(&Vector::from_slice(&[1.0])), None);
    }

    #[test]
    fn test_iteration() {
        let mut v = Vector::from_slice(&[1, 2, 3]);
        for x in &mut v {
            *x *= 10;
        }
        assert_eq!((&v).into_iter().copied().sum::<i32>(), 60);
    }
}
