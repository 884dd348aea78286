//! compile-time tagged indices and the per-iteration traits.
//!
//! [`Index<I>`] is a zero-sized value whose index lives in its type, so a
//! body can use it for further const instantiation (array lengths, const
//! generic arguments) and not just as a number.

use std::fmt;

/// zero-sized loop index tag.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Index<const I: i64>;

impl<const I: i64> Index<I> {
    /// the tagged index.
    pub const VALUE: i64 = I;

    /// the tagged index as a value.
    #[inline(always)]
    pub const fn value(self) -> i64 {
        I
    }
}

impl<const I: i64> From<Index<I>> for i64 {
    #[inline(always)]
    fn from(_: Index<I>) -> i64 {
        I
    }
}

impl<const I: i64> fmt::Debug for Index<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Index<{}>", I)
    }
}

/// per-iteration operation driven by [`static_for!`](crate::static_for).
///
/// `args` is forwarded untouched to every call.
///
/// ```rust
/// use unroller::{static_for, Body, Index, LoopDescriptor};
///
/// struct Scaled(Vec<i64>);
///
/// impl Body<i64> for Scaled {
///     fn call<const I: i64>(&mut self, _: Index<I>, factor: &mut i64) {
///         self.0.push(I * *factor);
///     }
/// }
///
/// let mut body = Scaled(Vec::new());
/// static_for!(LoopDescriptor::greater_than(10, 1), body, &mut 5);
/// assert_eq!(body.0, [50, 45, 40, 35, 30, 25, 20, 15, 10]);
/// ```
pub trait Body<Args: ?Sized = ()> {
    /// run one iteration for index `I`.
    fn call<const I: i64>(&mut self, index: Index<I>, args: &mut Args);
}

/// per-iteration operation driven by [`static_for_nested!`](crate::static_for_nested).
///
/// receives the inner index first, then the outer one.
pub trait NestedBody<Args: ?Sized = ()> {
    /// run one iteration for inner index `I` under outer index `O`.
    fn call<const I: i64, const O: i64>(
        &mut self,
        inner: Index<I>,
        outer: Index<O>,
        args: &mut Args,
    );
}

impl<Args: ?Sized, B: Body<Args> + ?Sized> Body<Args> for &mut B {
    #[inline(always)]
    fn call<const I: i64>(&mut self, index: Index<I>, args: &mut Args) {
        (**self).call(index, args)
    }
}

impl<Args: ?Sized, B: NestedBody<Args> + ?Sized> NestedBody<Args> for &mut B {
    #[inline(always)]
    fn call<const I: i64, const O: i64>(
        &mut self,
        inner: Index<I>,
        outer: Index<O>,
        args: &mut Args,
    ) {
        (**self).call(inner, outer, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_value() {
        assert_eq!(Index::<{ -3 }>::VALUE, -3);
        assert_eq!(Index::<7>.value(), 7);
        assert_eq!(i64::from(Index::<42>), 42);
        assert_eq!(std::mem::size_of::<Index<9>>(), 0);
        assert_eq!(format!("{:?}", Index::<5>), "Index<5>");
    }

    #[test]
    fn test_index_as_const_argument() {
        const N: i64 = 6;
        let table = [1u32; N as usize];
        assert_eq!(table.len() as i64, Index::<N>.value());
    }

    #[test]
    fn test_body_through_reference() {
        struct Sum(i64);
        impl Body for Sum {
            fn call<const I: i64>(&mut self, _: Index<I>, _: &mut ()) {
                self.0 += I;
            }
        }

        fn drive<B: Body>(mut body: B) {
            body.call(Index::<4>, &mut ());
            body.call(Index::<5>, &mut ());
        }

        let mut sum = Sum(0);
        drive(&mut sum);
        assert_eq!(sum.0, 9);
    }
}
