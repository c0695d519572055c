use core::cmp::Ordering;
use core::fmt;
use core::marker::PhantomData;
use core::ops::{AddAssign, DivAssign, Index, IndexMut, MulAssign, SubAssign};

use crate::assign::{self, AddTo, Assigner, DivBy, MulBy, Replace, SubFrom};
use crate::compare;
use crate::error::{fatal, LinalgError, Result};
use crate::expr::{Expr, MatrixKind};
use crate::size_policy::{DefaultSize, SizePolicy};
use crate::storage::Storage;
use crate::Scalar;

/// A dense row-major matrix over storage `S`.
///
/// Element `(r, c)` lives at `r * num_cols() + c` of the storage and
/// `num_rows() * num_cols() == len()` always holds.
///
/// ```
/// use femla_core::prelude::*;
///
/// let m = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]);
/// let v = Vector::from_slice(&[1.0, 1.0]);
/// let w = Vector::from_expr(&(&m * &v));
/// assert_eq!(w.as_slice(), &[3.0, 7.0]);
/// assert_eq!(m[(1, 0)], 3.0);
/// ```
pub struct MatrixBase<S: Storage, P: SizePolicy = DefaultSize> {
    storage: S,
    rows: usize,
    cols: usize,
    _policy: PhantomData<P>,
}

impl<S: Storage, P: SizePolicy> MatrixBase<S, P> {
    fn check_static_shape(rows: usize, cols: usize) -> Result<()> {
        let fixed = (S::ROWS.unwrap_or(rows), S::COLS.unwrap_or(cols));
        if fixed != (rows, cols) {
            return Err(LinalgError::ShapeMismatch {
                context: "matrix construction",
                lhs: fixed,
                rhs: (rows, cols),
            });
        }
        Ok(())
    }

    /// A zero matrix of `P::eval(rows) x P::eval(cols)`.
    pub fn try_new(rows: usize, cols: usize) -> Result<Self> {
        let (rows, cols) = (P::try_eval(rows)?, P::try_eval(cols)?);
        Self::check_static_shape(rows, cols)?;
        Ok(Self {
            storage: S::try_with_size(rows * cols)?,
            rows,
            cols,
            _policy: PhantomData,
        })
    }

    #[track_caller]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::try_new(rows, cols).unwrap_or_else(|e| fatal(e))
    }

    /// A zero `n x n` matrix.
    #[track_caller]
    pub fn square(n: usize) -> Self {
        Self::new(n, n)
    }

    #[track_caller]
    pub fn from_elem(rows: usize, cols: usize, value: S::Elem) -> Self {
        let mut m = Self::new(rows, cols);
        m.fill(value);
        m
    }

    /// Evaluate a matrix expression into a new matrix of the same shape.
    pub fn try_from_expr<E>(expr: &E) -> Result<Self>
    where
        E: Expr<Elem = S::Elem, Kind = MatrixKind> + ?Sized,
    {
        let (rows, cols) = (expr.num_rows(), expr.num_cols());
        Self::check_static_shape(rows, cols)?;
        let mut m = Self {
            storage: S::try_with_size(rows * cols)?,
            rows,
            cols,
            _policy: PhantomData,
        };
        m.try_assign(expr)?;
        Ok(m)
    }

    #[track_caller]
    pub fn from_expr<E>(expr: &E) -> Self
    where
        E: Expr<Elem = S::Elem, Kind = MatrixKind> + ?Sized,
    {
        Self::try_from_expr(expr).unwrap_or_else(|e| fatal(e))
    }

    /// Build from row-major `values`, which must hold `rows * cols` elements.
    pub fn try_from_slice(rows: usize, cols: usize, values: &[S::Elem]) -> Result<Self> {
        let mut m = Self::try_new(rows, cols)?;
        m.try_set_values(values)?;
        Ok(m)
    }

    #[track_caller]
    pub fn from_slice(rows: usize, cols: usize, values: &[S::Elem]) -> Self {
        Self::try_from_slice(rows, cols, values).unwrap_or_else(|e| fatal(e))
    }

    /// Build from a list of rows.
    #[track_caller]
    pub fn from_rows<const C: usize>(rows: &[[S::Elem; C]]) -> Self {
        Self::from_slice(rows.len(), C, rows.as_flattened())
    }

    // ------------------------------------------------------------------
    // Assignment
    // ------------------------------------------------------------------

    /// Combine a matrix expression of the same shape into `self`.
    pub fn try_assign_with<E, A>(&mut self, expr: &E, assigner: A) -> Result<()>
    where
        E: Expr<Elem = S::Elem, Kind = MatrixKind> + ?Sized,
        A: Assigner<S::Elem>,
    {
        let src = (expr.num_rows(), expr.num_cols());
        if src != self.shape() {
            return Err(LinalgError::ShapeMismatch {
                context: "matrix assignment",
                lhs: self.shape(),
                rhs: src,
            });
        }
        assign::assign_expr(&mut self.storage, expr, assigner, "matrix assignment")
    }

    #[track_caller]
    pub fn assign_with<E, A>(&mut self, expr: &E, assigner: A)
    where
        E: Expr<Elem = S::Elem, Kind = MatrixKind> + ?Sized,
        A: Assigner<S::Elem>,
    {
        self.try_assign_with(expr, assigner)
            .unwrap_or_else(|e| fatal(e));
    }

    pub fn try_assign<E>(&mut self, expr: &E) -> Result<()>
    where
        E: Expr<Elem = S::Elem, Kind = MatrixKind> + ?Sized,
    {
        self.try_assign_with(expr, Replace)
    }

    #[track_caller]
    pub fn assign<E>(&mut self, expr: &E)
    where
        E: Expr<Elem = S::Elem, Kind = MatrixKind> + ?Sized,
    {
        self.assign_with(expr, Replace);
    }

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

    #[track_caller]
    pub fn set_values(&mut self, values: &[S::Elem]) {
        self.try_set_values(values).unwrap_or_else(|e| fatal(e));
    }

    /// Zero the matrix, then put `value` on the diagonal.
    pub fn try_set_diag(&mut self, value: S::Elem) -> Result<()> {
        if self.rows != self.cols {
            return Err(LinalgError::NotSquare {
                rows: self.rows,
                cols: self.cols,
            });
        }
        self.fill(S::Elem::zero());
        let n = self.cols;
        for i in 0..n {
            self.storage.as_mut_slice()[i * n + i] = value;
        }
        Ok(())
    }

    #[track_caller]
    pub fn set_diag(&mut self, value: S::Elem) {
        self.try_set_diag(value).unwrap_or_else(|e| fatal(e));
    }

    // ------------------------------------------------------------------
    // Access
    // ------------------------------------------------------------------

    fn offset(&self, row: usize, col: usize) -> Result<usize> {
        if row < self.rows && col < self.cols {
            Ok(row * self.cols + col)
        } else {
            Err(LinalgError::IndexOutOfBounds {
                index: (row, col),
                shape: self.shape(),
            })
        }
    }

    pub fn try_at(&self, row: usize, col: usize) -> Result<S::Elem> {
        let k = self.offset(row, col)?;
        Ok(self.as_slice()[k])
    }

    /// Bounds-checked read of `(row, col)`.
    #[track_caller]
    pub fn at(&self, row: usize, col: usize) -> S::Elem {
        self.try_at(row, col).unwrap_or_else(|e| fatal(e))
    }

    #[track_caller]
    pub fn at_mut(&mut self, row: usize, col: usize) -> &mut S::Elem {
        let k = self.offset(row, col).unwrap_or_else(|e| fatal(e));
        &mut self.storage.as_mut_slice()[k]
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&S::Elem> {
        let k = self.offset(row, col).ok()?;
        self.as_slice().get(k)
    }

    /// Element `(row, col)` without any bounds check.
    ///
    /// # Safety
    ///
    /// `row < num_rows()` and `col < num_cols()`.
    #[inline]
    pub unsafe fn get_unchecked(&self, row: usize, col: usize) -> &S::Elem {
        // SAFETY: guaranteed by the caller.
        unsafe { self.as_slice().get_unchecked(row * self.cols + col) }
    }

    /// Row `r` as a slice.
    #[inline]
    pub fn row(&self, r: usize) -> &[S::Elem] {
        &self.as_slice()[r * self.cols..(r + 1) * self.cols]
    }

    #[inline]
    pub fn row_mut(&mut self, r: usize) -> &mut [S::Elem] {
        let cols = self.cols;
        &mut self.storage.as_mut_slice()[r * cols..(r + 1) * cols]
    }

    /// Iterator over the rows.
    pub fn rows(&self) -> impl Iterator<Item = &[S::Elem]> + '_ {
        (0..self.rows).map(move |r| self.row(r))
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
    // Shape
    // ------------------------------------------------------------------

    /// Resize to `P::eval(rows) x P::eval(cols)`. Does nothing when the
    /// shape is unchanged. Storage with a compile-time shape skips the policy.
    pub fn try_resize(&mut self, rows: usize, cols: usize) -> Result<()> {
        let (rows, cols) = if S::SIZE.is_some() {
            (rows, cols)
        } else {
            (P::try_eval(rows)?, P::try_eval(cols)?)
        };
        if (rows, cols) == self.shape() {
            return Ok(());
        }
        Self::check_static_shape(rows, cols)?;
        self.storage.try_resize(rows * cols)?;
        self.rows = rows;
        self.cols = cols;
        Ok(())
    }

    #[track_caller]
    pub fn resize(&mut self, rows: usize, cols: usize) {
        self.try_resize(rows, cols).unwrap_or_else(|e| fatal(e));
    }

    pub fn swap(&mut self, other: &mut Self) {
        core::mem::swap(self, other);
    }

    #[inline]
    pub fn num_rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn num_cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
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
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    pub fn memory_usage(&self) -> usize {
        self.storage.memory_usage() + 2 * core::mem::size_of::<usize>()
    }
}

impl<S: Storage, P: SizePolicy> Default for MatrixBase<S, P> {
    fn default() -> Self {
        let (rows, cols) = (S::ROWS.unwrap_or(0), S::COLS.unwrap_or(0));
        Self {
            storage: S::with_size(rows * cols),
            rows,
            cols,
            _policy: PhantomData,
        }
    }
}

impl<S: Storage, P: SizePolicy> Clone for MatrixBase<S, P> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            rows: self.rows,
            cols: self.cols,
            _policy: PhantomData,
        }
    }
}

impl<S: Storage, P: SizePolicy> fmt::Debug for MatrixBase<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.rows()).finish()
    }
}

// ======================================================================
// Expr
// ======================================================================

impl<S: Storage, P: SizePolicy> Expr for MatrixBase<S, P> {
    type Elem = S::Elem;
    type Kind = MatrixKind;

    const SIZE: Option<usize> = S::SIZE;
    const ROWS: Option<usize> = S::ROWS;
    const COLS: Option<usize> = S::COLS;

    #[inline]
    fn size(&self) -> usize {
        self.storage.len()
    }

    #[inline]
    fn num_rows(&self) -> usize {
        self.rows
    }

    #[inline]
    fn num_cols(&self) -> usize {
        self.cols
    }

    #[inline]
    fn eval(&self, i: usize) -> S::Elem {
        self.storage.as_slice()[i]
    }

    #[inline]
    fn eval_at(&self, row: usize, col: usize) -> S::Elem {
        self.storage.as_slice()[row * self.cols + col]
    }
}

// ======================================================================
// Indexing
// ======================================================================

impl<S: Storage, P: SizePolicy> Index<(usize, usize)> for MatrixBase<S, P> {
    type Output = S::Elem;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &S::Elem {
        debug_assert!(col < self.cols, "column {col} out of range");
        &self.as_slice()[row * self.cols + col]
    }
}

impl<S: Storage, P: SizePolicy> IndexMut<(usize, usize)> for MatrixBase<S, P> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut S::Elem {
        debug_assert!(col < self.cols, "column {col} out of range");
        let cols = self.cols;
        &mut self.storage.as_mut_slice()[row * cols + col]
    }
}

/// `m[r]` is row `r`, so `m[r][c]` reads element `(r, c)`.
impl<S: Storage, P: SizePolicy> Index<usize> for MatrixBase<S, P> {
    type Output = [S::Elem];

    #[inline]
    fn index(&self, r: usize) -> &[S::Elem] {
        self.row(r)
    }
}

impl<S: Storage, P: SizePolicy> IndexMut<usize> for MatrixBase<S, P> {
    #[inline]
    fn index_mut(&mut self, r: usize) -> &mut [S::Elem] {
        self.row_mut(r)
    }
}

// ======================================================================
// Compound assignment
// ======================================================================

macro_rules! impl_compound_expr {
    ($trait:ident, $method:ident, $assigner:expr) => {
        impl<S: Storage, P: SizePolicy, E> $trait<E> for MatrixBase<S, P>
        where
            E: Expr<Elem = S::Elem, Kind = MatrixKind>,
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
            impl<S: Storage<Elem = $s>, P: SizePolicy> AddAssign<$s> for MatrixBase<S, P> {
                fn add_assign(&mut self, rhs: $s) {
                    assign::assign_scalar(&mut self.storage, rhs, AddTo);
                }
            }

            impl<S: Storage<Elem = $s>, P: SizePolicy> SubAssign<$s> for MatrixBase<S, P> {
                fn sub_assign(&mut self, rhs: $s) {
                    assign::assign_scalar(&mut self.storage, rhs, SubFrom);
                }
            }

            impl<S: Storage<Elem = $s>, P: SizePolicy> MulAssign<$s> for MatrixBase<S, P> {
                fn mul_assign(&mut self, rhs: $s) {
                    assign::assign_scalar(&mut self.storage, rhs, MulBy);
                }
            }

            impl<S: Storage<Elem = $s>, P: SizePolicy> DivAssign<$s> for MatrixBase<S, P> {
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

impl<S: Storage, P: SizePolicy, E> PartialEq<E> for MatrixBase<S, P>
where
    E: Expr<Elem = S::Elem, Kind = MatrixKind>,
{
    fn eq(&self, other: &E) -> bool {
        compare::approx_eq(self, other)
    }
}

impl<S: Storage, P: SizePolicy, E> PartialOrd<E> for MatrixBase<S, P>
where
    E: Expr<Elem = S::Elem, Kind = MatrixKind>,
{
    fn partial_cmp(&self, other: &E) -> Option<Ordering> {
        compare::approx_cmp(self, other)
    }
}
