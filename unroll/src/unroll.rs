//! compile-time unrolling macros.
//!
//! the descriptor is evaluated in const items: its trip count and index
//! table are known before codegen, and the macro expands to one
//! straight-line block per slot. each block binds the current index as a
//! `const`, so the body can size arrays or pick const generics with it.
//!
//! slots come from a power-of-two grid (the capacity, 64 by default). slots
//! past the trip count still expand, bound to the last real index (0 when
//! the loop runs zero times), but sit behind a constant-false branch and are
//! removed. a descriptor that does not finish within the capacity is a
//! compile error, not a runaway expansion:
//!
//! ```compile_fail
//! use unroller::{static_for, LoopDescriptor};
//!
//! // step runs away from the bound: never terminates
//! static_for!(LoopDescriptor::less_than(0, 10).with_step(-1), |i| {
//!     let _ = i;
//! });
//! ```

/// unroll a loop described by a const [`LoopDescriptor`](crate::LoopDescriptor).
///
/// forms:
/// - `static_for!(DESC, |i| body)` binds `const i: i64` per iteration
/// - `static_for!(DESC, cap = N, |i| body)` with `N` in 1, 2, 4, .. 1024
/// - `static_for!(DESC, body, args)` calls a [`Body`](crate::Body) with
///   `Index<I>` tags and `args: &mut A` forwarded
/// - `static_for!(DESC, cap = N, body, args)`
///
/// ```rust
/// use unroller::{static_for, LoopDescriptor};
///
/// let mut lens = Vec::new();
/// static_for!(LoopDescriptor::less_than(1, 5), |n| {
///     let row = [0u8; n as usize];
///     lens.push(row.len());
/// });
/// assert_eq!(lens, [1, 2, 3, 4]);
/// ```
///
/// the body is pasted inline: `?`, `return` and panics leave the
/// enclosing function exactly as they would from a hand-written block.
///
/// `DESC` must be a constant expression. it is evaluated in a const item,
/// so it can name consts and call `const fn`s, but not locals or the
/// enclosing function's generic parameters; inside generic code use
/// [`for_loop`](crate::for_loop) instead:
///
/// ```compile_fail,E0401
/// use unroller::{static_for, LoopDescriptor};
///
/// fn sum_to<const N: i64>() -> i64 {
///     let mut sum = 0;
///     static_for!(LoopDescriptor::less_than(0, N), |i| sum += i);
///     sum
/// }
/// ```
///
/// every slot is compiled even when it does not run. a loop that runs
/// zero times compiles its body with `i = 0`, so the body has to accept 0:
///
/// ```rust
/// use unroller::{static_for, LoopDescriptor};
///
/// let mut calls = 0;
/// static_for!(LoopDescriptor::less_than(-5, -10), |n| {
///     let block = [0u8; n as usize];
///     calls += block.len() + 1;
/// });
/// assert_eq!(calls, 0);
/// ```
#[macro_export]
macro_rules! static_for {
    // one slot
    (@grid [] $off:expr; $i:ident => $body:expr) => {{
        const __SLOT: usize = $off;
        if __SLOT < __TRIPS {
            #[allow(non_upper_case_globals, dead_code)]
            const $i: i64 = __TABLE[__SLOT];
            let _ = $body;
        }
    }};
    // halve by the leading weight
    (@grid [$w:tt $($rest:tt)*] $off:expr; $i:ident => $body:expr) => {{
        $crate::static_for!(@grid [$($rest)*] $off; $i => $body);
        $crate::static_for!(@grid [$($rest)*] $off + $w; $i => $body);
    }};

    (@slots 1; $i:ident => $body:expr) => { $crate::static_for!(@grid [] 0usize; $i => $body) };
    (@slots 2; $i:ident => $body:expr) => { $crate::static_for!(@grid [1] 0usize; $i => $body) };
    (@slots 4; $i:ident => $body:expr) => { $crate::static_for!(@grid [2 1] 0usize; $i => $body) };
    (@slots 8; $i:ident => $body:expr) => { $crate::static_for!(@grid [4 2 1] 0usize; $i => $body) };
    (@slots 16; $i:ident => $body:expr) => { $crate::static_for!(@grid [8 4 2 1] 0usize; $i => $body) };
    (@slots 32; $i:ident => $body:expr) => { $crate::static_for!(@grid [16 8 4 2 1] 0usize; $i => $body) };
    (@slots 64; $i:ident => $body:expr) => { $crate::static_for!(@grid [32 16 8 4 2 1] 0usize; $i => $body) };
    (@slots 128; $i:ident => $body:expr) => { $crate::static_for!(@grid [64 32 16 8 4 2 1] 0usize; $i => $body) };
    (@slots 256; $i:ident => $body:expr) => { $crate::static_for!(@grid [128 64 32 16 8 4 2 1] 0usize; $i => $body) };
    (@slots 512; $i:ident => $body:expr) => { $crate::static_for!(@grid [256 128 64 32 16 8 4 2 1] 0usize; $i => $body) };
    (@slots 1024; $i:ident => $body:expr) => { $crate::static_for!(@grid [512 256 128 64 32 16 8 4 2 1] 0usize; $i => $body) };
    (@slots $cap:tt; $i:ident => $body:expr) => {
        compile_error!(concat!("static_for! capacity must be a power of two in 1..=1024, got ", stringify!($cap)))
    };

    // closure form
    ($desc:expr, |$i:ident| $body:expr) => {
        $crate::static_for!($desc, cap = 64, |$i| $body)
    };
    ($desc:expr, cap = $cap:tt, |$i:ident| $body:expr) => {{
        const __LOOP: $crate::LoopDescriptor = $desc;
        const __TRIPS: usize = __LOOP.unrolled_len($cap);
        const __TABLE: [i64; $cap] = __LOOP.indices::<$cap>();
        $crate::static_for!(@slots $cap; $i => $body);
    }};

    // Body form
    ($desc:expr, cap = $cap:tt, $body:expr, $args:expr) => {{
        let __body = &mut $body;
        let __args = $args;
        $crate::static_for!($desc, cap = $cap, |__index| {
            $crate::Body::call(&mut *__body, $crate::Index::<{ __index }>, &mut *__args)
        });
    }};
    ($desc:expr, $body:expr, $args:expr) => {
        $crate::static_for!($desc, cap = 64, $body, $args)
    };
}

/// unroll `start..end` (`<`), step defaults to +1.
///
/// `static_for_lt!(start, end, |i| body)` or
/// `static_for_lt!(start, end, step, |i| body)`.
#[macro_export]
macro_rules! static_for_lt {
    ($start:expr, $end:expr, |$i:ident| $body:expr) => {
        $crate::static_for!($crate::LoopDescriptor::less_than($start, $end), |$i| $body)
    };
    ($start:expr, $end:expr, $step:expr, |$i:ident| $body:expr) => {
        $crate::static_for!(
            $crate::LoopDescriptor::less_than($start, $end).with_step($step),
            |$i| $body
        )
    };
}

/// unroll `start..=end` (`<=`), step defaults to +1.
#[macro_export]
macro_rules! static_for_le {
    ($start:expr, $end:expr, |$i:ident| $body:expr) => {
        $crate::static_for!($crate::LoopDescriptor::less_equal($start, $end), |$i| $body)
    };
    ($start:expr, $end:expr, $step:expr, |$i:ident| $body:expr) => {
        $crate::static_for!(
            $crate::LoopDescriptor::less_equal($start, $end).with_step($step),
            |$i| $body
        )
    };
}

/// unroll down to, not including, `end` (`>`), step defaults to -1.
///
/// ```rust
/// use unroller::static_for_gt;
///
/// let mut seen = Vec::new();
/// static_for_gt!(10, 1, |i| seen.push(i));
/// assert_eq!(seen, [10, 9, 8, 7, 6, 5, 4, 3, 2]);
/// ```
#[macro_export]
macro_rules! static_for_gt {
    ($start:expr, $end:expr, |$i:ident| $body:expr) => {
        $crate::static_for!($crate::LoopDescriptor::greater_than($start, $end), |$i| $body)
    };
    ($start:expr, $end:expr, $step:expr, |$i:ident| $body:expr) => {
        $crate::static_for!(
            $crate::LoopDescriptor::greater_than($start, $end).with_step($step),
            |$i| $body
        )
    };
}

/// unroll down to and including `end` (`>=`), step defaults to -1.
#[macro_export]
macro_rules! static_for_ge {
    ($start:expr, $end:expr, |$i:ident| $body:expr) => {
        $crate::static_for!($crate::LoopDescriptor::greater_equal($start, $end), |$i| $body)
    };
    ($start:expr, $end:expr, $step:expr, |$i:ident| $body:expr) => {
        $crate::static_for!(
            $crate::LoopDescriptor::greater_equal($start, $end).with_step($step),
            |$i| $body
        )
    };
}

/// unroll while the index equals `end` (`==`), step defaults to +1.
#[macro_export]
macro_rules! static_for_eq {
    ($start:expr, $end:expr, |$i:ident| $body:expr) => {
        $crate::static_for!($crate::LoopDescriptor::equal_to($start, $end), |$i| $body)
    };
    ($start:expr, $end:expr, $step:expr, |$i:ident| $body:expr) => {
        $crate::static_for!(
            $crate::LoopDescriptor::equal_to($start, $end).with_step($step),
            |$i| $body
        )
    };
}

/// unroll two nested loops, outer-major.
///
/// the inner descriptor is reset to its start for every outer index. the
/// body sees the inner index first: `|i, o| body`, or a
/// [`NestedBody`](crate::NestedBody) called with `(Index<I>, Index<O>, args)`.
/// capacity defaults to 16 per level; `cap = N` sets both.
///
/// ```rust
/// use unroller::{static_for_nested, LoopDescriptor};
///
/// let mut pairs = Vec::new();
/// static_for_nested!(
///     LoopDescriptor::less_than(0, 2),
///     LoopDescriptor::greater_than(2, 0),
///     |i, o| pairs.push((i, o))
/// );
/// assert_eq!(pairs, [(2, 0), (1, 0), (2, 1), (1, 1)]);
/// ```
#[macro_export]
macro_rules! static_for_nested {
    ($outer:expr, $inner:expr, |$i:ident, $o:ident| $body:expr) => {
        $crate::static_for_nested!($outer, $inner, cap = 16, |$i, $o| $body)
    };
    ($outer:expr, $inner:expr, cap = $cap:tt, |$i:ident, $o:ident| $body:expr) => {
        $crate::static_for!($outer, cap = $cap, |$o| {
            $crate::static_for!($crate::LoopDescriptor::reset($inner), cap = $cap, |$i| $body)
        })
    };
    ($outer:expr, $inner:expr, cap = $cap:tt, $body:expr, $args:expr) => {{
        let __body = &mut $body;
        let __args = $args;
        $crate::static_for_nested!($outer, $inner, cap = $cap, |__inner, __outer| {
            $crate::NestedBody::call(
                &mut *__body,
                $crate::Index::<{ __inner }>,
                $crate::Index::<{ __outer }>,
                &mut *__args,
            )
        });
    }};
    ($outer:expr, $inner:expr, $body:expr, $args:expr) => {
        $crate::static_for_nested!($outer, $inner, cap = 16, $body, $args)
    };
}
