//! The assignment engine.
//!
//! Every write of an expression into a container goes through [`assign_expr`]:
//! the sizes are checked once, then the storage walks its logical indices in
//! ascending order and combines `src(i)` into element `i` with an
//! [`Assigner`]. Scalar right-hand sides use [`assign_scalar`], which
//! broadcasts the value over the same traversal.

use crate::error::{LinalgError, Result};
use crate::expr::Expr;
use crate::storage::Storage;
use crate::Scalar;

/// How a source value is combined into a target element.
pub trait Assigner<T>: Copy {
    fn apply(&self, target: &mut T, value: T);
}

macro_rules! assigners {
    ($($(#[$meta:meta])* $name:ident => |$t:ident, $v:ident| $body:expr;)*) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
            pub struct $name;

            impl<T: Scalar> Assigner<T> for $name {
                #[inline(always)]
                fn apply(&self, $t: &mut T, $v: T) {
                    $body
                }
            }
        )*
    };
}

assigners! {
    /// `=`
    Replace => |t, v| *t = v;
    /// `+=`
    AddTo => |t, v| *t += v;
    /// `-=`
    SubFrom => |t, v| *t -= v;
    /// `*=`, elementwise.
    MulBy => |t, v| *t *= v;
    /// `/=`, elementwise.
    DivBy => |t, v| *t /= v;
}

/// Combine `src` into `target` element by element.
///
/// `context` names the calling operation in the error.
pub fn assign_expr<S, E, A>(
    target: &mut S,
    src: &E,
    assigner: A,
    context: &'static str,
) -> Result<()>
where
    S: Storage,
    E: Expr<Elem = S::Elem> + ?Sized,
    A: Assigner<S::Elem>,
{
    if target.len() != src.size() {
        return Err(LinalgError::SizeMismatch {
            context,
            expected: target.len(),
            got: src.size(),
        });
    }
    target.assign_aux(src, assigner);
    Ok(())
}

/// Combine the scalar `value` into every element of `target`.
pub fn assign_scalar<S, A>(target: &mut S, value: S::Elem, assigner: A)
where
    S: Storage,
    A: Assigner<S::Elem>,
{
    target.for_each_aux(|x| assigner.apply(x, value));
}
