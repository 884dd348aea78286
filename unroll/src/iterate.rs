//! runtime iteration over loop descriptors.
//!
//! same visiting order as the unrolling macros, but a single loop body
//! instead of one block per index: the index reaches the operation as a
//! plain `i64`, so it cannot size arrays or pick const generics. use this
//! when the descriptor is only known at run time.
//!
//! nothing here guards against non-termination. descriptors that come from
//! input should go through [`LoopDescriptor::validate`] first.

use crate::descriptor::LoopDescriptor;
use std::iter::FusedIterator;

/// iterator over the indices a descriptor produces.
#[derive(Debug, Clone)]
pub struct Indices {
    cursor: LoopDescriptor,
}

impl Iterator for Indices {
    type Item = i64;

    #[inline]
    fn next(&mut self) -> Option<i64> {
        if !self.cursor.is_valid() {
            return None;
        }
        let index = self.cursor.current();
        self.cursor = self.cursor.next();
        Some(index)
    }
}

impl FusedIterator for Indices {}

impl LoopDescriptor {
    /// iterate from `current` until the comparator fails.
    #[inline]
    pub fn iter(self) -> Indices {
        Indices { cursor: self }
    }
}

impl IntoIterator for LoopDescriptor {
    type Item = i64;
    type IntoIter = Indices;

    #[inline]
    fn into_iter(self) -> Indices {
        self.iter()
    }
}

/// call `f(index, args)` for every index of `desc`, in order.
pub fn for_loop<A: ?Sized, F>(desc: LoopDescriptor, mut f: F, args: &mut A)
where
    F: FnMut(i64, &mut A),
{
    log::trace!("for_loop {}", desc);
    for index in desc {
        f(index, &mut *args);
    }
}

/// [`for_loop`] without forwarded arguments.
#[inline]
pub fn for_each<F: FnMut(i64)>(desc: LoopDescriptor, mut f: F) {
    for_loop(desc, |index, _: &mut ()| f(index), &mut ())
}

/// like [`for_each`], stopping at and returning the first error.
pub fn try_for_each<E, F>(desc: LoopDescriptor, f: F) -> Result<(), E>
where
    F: FnMut(i64) -> Result<(), E>,
{
    log::trace!("try_for_each {}", desc);
    desc.iter().try_for_each(f)
}

/// outer-major nested loop. `f` receives `(inner, outer, args)`.
///
/// the inner descriptor is reset to its start before every outer index.
pub fn nested_for_loop<A: ?Sized, F>(
    outer: LoopDescriptor,
    inner: LoopDescriptor,
    mut f: F,
    args: &mut A,
) where
    F: FnMut(i64, i64, &mut A),
{
    log::trace!("nested_for_loop outer={} inner={}", outer, inner);
    let inner = inner.reset();
    for o in outer {
        for i in inner {
            f(i, o, &mut *args);
        }
    }
}

/// [`nested_for_loop`] with a fallible body and no forwarded arguments.
pub fn try_nested_for_each<E, F>(
    outer: LoopDescriptor,
    inner: LoopDescriptor,
    mut f: F,
) -> Result<(), E>
where
    F: FnMut(i64, i64) -> Result<(), E>,
{
    let inner = inner.reset();
    for o in outer {
        for i in inner {
            f(i, o)?;
        }
    }
    Ok(())
}
