//! # unroller - compile-time loop unrolling over loop descriptors
//!
//! a loop is described by a [`LoopDescriptor`]: start, end, step, a
//! comparator and an advance operation. descriptors are `const`, so the
//! macros below resolve the whole index sequence at compile time and emit
//! one block per index, each seeing the index as a constant.
//!
//! ## which api
//!
//! | need | use |
//! |------|-----|
//! | index as a const (array sizes, const generics) | [`static_for!`] and friends |
//! | two nested loops | [`static_for_nested!`] |
//! | descriptor only known at run time | [`for_loop`], [`for_each`], [`LoopDescriptor::iter`] |
//!
//! ## usage
//!
//! ```rust
//! use unroller::{static_for, static_for_le, Advance, Compare, LoopDescriptor};
//!
//! let mut sum = 0;
//! static_for_le!(1, 20, |i| sum += i);
//! assert_eq!(sum, 210);
//!
//! // powers of two: advance multiplies instead of adds
//! const POWERS: LoopDescriptor = LoopDescriptor::new(1, 64, 2, Compare::LessEqual, Advance::Mul);
//! let mut sizes = Vec::new();
//! static_for!(POWERS, |n| {
//!     let block = [0u8; n as usize];
//!     sizes.push(block.len());
//! });
//! assert_eq!(sizes, [1, 2, 4, 8, 16, 32, 64]);
//! ```
//!
//! ## termination
//!
//! the step has to move toward the bound the comparator checks. the macros
//! refuse (at compile time) descriptors that stall, overflow, or outrun the
//! unroll capacity; the runtime api trusts the caller, see
//! [`LoopDescriptor::validate`].
//!
//! ## recursion limit
//!
//! nesting several unrolled loops inside each other multiplies expansion
//! depth. if rustc asks for it, add to your crate root:
//! ```rust,ignore
//! #![recursion_limit = "256"]
//! ```

#![warn(missing_docs)]

pub mod descriptor;
pub mod error;
pub mod iterate;
pub mod tagged;

// unrolling macros
#[macro_use]
mod unroll;


pub use descriptor::{Advance, Compare, LoopDescriptor};
pub use error::{LoopError, ParseOpError};
pub use iterate::{for_each, for_loop, nested_for_loop, try_for_each, try_nested_for_each, Indices};
pub use tagged::{Body, Index, NestedBody};

// macros are already exported at crate root via #[macro_export]
