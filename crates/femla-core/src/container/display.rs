//! `Display` for vectors and matrices: elements separated by single spaces,
//! one matrix row per line.

use core::fmt;

use super::{MatrixBase, VectorBase};
use crate::size_policy::SizePolicy;
use crate::storage::Storage;

fn write_row<T: fmt::Display>(f: &mut fmt::Formatter<'_>, row: &[T]) -> fmt::Result {
    for (i, v) in row.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{v}")?;
    }
    Ok(())
}

impl<S: Storage, P: SizePolicy> fmt::Display for VectorBase<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_row(f, self.as_slice())
    }
}

impl<S: Storage, P: SizePolicy> fmt::Display for MatrixBase<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.rows().enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            write_row(f, row)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn test_display_vector() {
        let v = Vector::from_slice(&[1, 2, 3]);
        assert_eq!(format!("{v}"), "1 2 3");
        assert_eq!(format!("{}", Vector::<f64>::new(0)), "");
    }

    #[test]
    fn test_display_matrix() {
        let m = Matrix::from_rows(&[[1.5, 2.0], [3.0, 4.0]]);
        assert_eq!(format!("{m}"), "1.5 2\n3 4");
    }
}
