//! error types for loop descriptors.
//!
//! the unrolling macros never see these at run time: a descriptor that
//! fails [`LoopDescriptor::count_within`](crate::LoopDescriptor::count_within)
//! inside a const item aborts compilation instead. the runtime api and
//! [`LoopDescriptor::validate`](crate::LoopDescriptor::validate) hand them
//! back to the caller.

use thiserror::Error;

/// reasons a loop descriptor cannot be driven to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum LoopError {
    /// advancing a valid index produced the same index again.
    #[error("loop stalls at index {index}: advancing leaves it unchanged")]
    Stalled {
        /// index the loop is stuck on.
        index: i64,
    },

    /// advancing overflowed `i64` (or divided by zero).
    #[error("advancing index {index} by step {step} overflows")]
    Overflow {
        /// last index before the overflow.
        index: i64,
        /// step that could not be applied.
        step: i64,
    },

    /// the descriptor was still valid after `limit` iterations.
    #[error("loop does not terminate within {limit} iterations")]
    ExceedsLimit {
        /// iteration budget that was exhausted.
        limit: usize,
    },
}

/// error returned when parsing a comparator or advance operation by name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} operation: {value:?}")]
pub struct ParseOpError {
    kind: &'static str,
    value: String,
}

impl ParseOpError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }

    /// which operation family failed to parse ("comparator" or "advance").
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// the rejected input.
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// result alias for descriptor operations.
pub type Result<T> = std::result::Result<T, LoopError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            LoopError::Stalled { index: 3 }.to_string(),
            "loop stalls at index 3: advancing leaves it unchanged"
        );
        assert_eq!(
            LoopError::ExceedsLimit { limit: 64 }.to_string(),
            "loop does not terminate within 64 iterations"
        );
    }

    #[test]
    fn test_parse_error_accessors() {
        let err = ParseOpError::new("comparator", "~");
        assert_eq!(err.kind(), "comparator");
        assert_eq!(err.value(), "~");
        assert_eq!(err.to_string(), "unknown comparator operation: \"~\"");
    }
}
