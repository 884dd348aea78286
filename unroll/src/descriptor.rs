//! loop descriptors.
//!
//! a [`LoopDescriptor`] is an immutable value describing one linear index
//! sequence: where it starts, where it stops, how far each step moves and
//! which comparator / advance pair drives it. every operation is a
//! `const fn`, so a descriptor written in a const item is fully resolved
//! by the compiler; the unrolling macros rely on that.
//!
//! ```rust
//! use unroller::{Advance, Compare, LoopDescriptor};
//!
//! const POWERS: LoopDescriptor = LoopDescriptor::new(1, 64, 2, Compare::LessEqual, Advance::Mul);
//! const TABLE: [i64; 7] = POWERS.indices::<7>();
//! assert_eq!(TABLE, [1, 2, 4, 8, 16, 32, 64]);
//! ```

use crate::error::{LoopError, ParseOpError, Result};
use std::fmt;
use std::str::FromStr;

/// predicate over `(current, end)` deciding whether iteration continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Compare {
    /// `current < end`
    Less,
    /// `current <= end`
    LessEqual,
    /// `current > end`
    Greater,
    /// `current >= end`
    GreaterEqual,
    /// `current == end`
    Equal,
    /// `current != end`
    NotEqual,
}

impl Compare {
    /// evaluate the comparator.
    #[inline(always)]
    pub const fn holds(self, current: i64, end: i64) -> bool {
        match self {
            Compare::Less => current < end,
            Compare::LessEqual => current <= end,
            Compare::Greater => current > end,
            Compare::GreaterEqual => current >= end,
            Compare::Equal => current == end,
            Compare::NotEqual => current != end,
        }
    }

    /// step used by the named constructors: -1 for descending comparators.
    #[inline]
    pub const fn default_step(self) -> i64 {
        match self {
            Compare::Greater | Compare::GreaterEqual => -1,
            _ => 1,
        }
    }

    /// operator as written in a `for` header, e.g. `"<="`.
    pub const fn symbol(self) -> &'static str {
        match self {
            Compare::Less => "<",
            Compare::LessEqual => "<=",
            Compare::Greater => ">",
            Compare::GreaterEqual => ">=",
            Compare::Equal => "==",
            Compare::NotEqual => "!=",
        }
    }
}

impl fmt::Display for Compare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Compare {
    type Err = ParseOpError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lt" | "<" | "less" => Ok(Compare::Less),
            "le" | "<=" | "less_equal" => Ok(Compare::LessEqual),
            "gt" | ">" | "greater" => Ok(Compare::Greater),
            "ge" | ">=" | "greater_equal" => Ok(Compare::GreaterEqual),
            "eq" | "==" | "equal" => Ok(Compare::Equal),
            "ne" | "!=" | "not_equal" => Ok(Compare::NotEqual),
            _ => Err(ParseOpError::new("comparator", s)),
        }
    }
}

/// operation mapping `(current, step)` to the next index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Advance {
    /// `current + step`
    Add,
    /// `current - step`
    Sub,
    /// `current * step`
    Mul,
    /// `current / step`
    Div,
}

impl Advance {
    /// total advance: arithmetic wraps, division by zero keeps the index.
    #[inline(always)]
    pub const fn apply(self, current: i64, step: i64) -> i64 {
        match self {
            Advance::Add => current.wrapping_add(step),
            Advance::Sub => current.wrapping_sub(step),
            Advance::Mul => current.wrapping_mul(step),
            Advance::Div => {
                if step == 0 {
                    current
                } else {
                    current.wrapping_div(step)
                }
            }
        }
    }

    /// `None` on overflow or division by zero.
    #[inline]
    pub const fn checked_apply(self, current: i64, step: i64) -> Option<i64> {
        match self {
            Advance::Add => current.checked_add(step),
            Advance::Sub => current.checked_sub(step),
            Advance::Mul => current.checked_mul(step),
            Advance::Div => current.checked_div(step),
        }
    }

    /// operator symbol, e.g. `"*"`.
    pub const fn symbol(self) -> &'static str {
        match self {
            Advance::Add => "+",
            Advance::Sub => "-",
            Advance::Mul => "*",
            Advance::Div => "/",
        }
    }
}

impl fmt::Display for Advance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Advance {
    type Err = ParseOpError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "add" | "+" | "plus" => Ok(Advance::Add),
            "sub" | "-" | "minus" => Ok(Advance::Sub),
            "mul" | "*" | "multiplies" => Ok(Advance::Mul),
            "div" | "/" | "divides" => Ok(Advance::Div),
            _ => Err(ParseOpError::new("advance", s)),
        }
    }
}

/// immutable description of one linear iteration sequence.
///
/// stepping never mutates: [`next`](Self::next) and [`reset`](Self::reset)
/// return new descriptors, and only `current` ever differs between a
/// descriptor and the ones derived from it.
///
/// termination is the caller's obligation. the step direction has to agree
/// with the comparator's sense; `less_than(0, 10).with_step(-1)` never
/// becomes invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoopDescriptor {
    current: i64,
    end: i64,
    step: i64,
    start: i64,
    compare: Compare,
    advance: Advance,
}

impl LoopDescriptor {
    /// create a descriptor positioned at `start`.
    #[inline]
    pub const fn new(start: i64, end: i64, step: i64, compare: Compare, advance: Advance) -> Self {
        Self {
            current: start,
            end,
            step,
            start,
            compare,
            advance,
        }
    }

    const fn counting(start: i64, end: i64, compare: Compare) -> Self {
        Self::new(start, end, compare.default_step(), compare, Advance::Add)
    }

    /// `start..end` counting up by one.
    pub const fn less_than(start: i64, end: i64) -> Self {
        Self::counting(start, end, Compare::Less)
    }

    /// `start..=end` counting up by one.
    pub const fn less_equal(start: i64, end: i64) -> Self {
        Self::counting(start, end, Compare::LessEqual)
    }

    /// from `start` down to, not including, `end`.
    pub const fn greater_than(start: i64, end: i64) -> Self {
        Self::counting(start, end, Compare::Greater)
    }

    /// from `start` down to and including `end`.
    pub const fn greater_equal(start: i64, end: i64) -> Self {
        Self::counting(start, end, Compare::GreaterEqual)
    }

    /// runs while the index equals `end`.
    pub const fn equal_to(start: i64, end: i64) -> Self {
        Self::counting(start, end, Compare::Equal)
    }

    /// replace the step, keeping everything else.
    #[inline]
    pub const fn with_step(self, step: i64) -> Self {
        Self { step, ..self }
    }

    /// `compare(current, end)`.
    #[inline(always)]
    pub const fn is_valid(self) -> bool {
        self.compare.holds(self.current, self.end)
    }

    /// descriptor with `current` advanced by one step.
    ///
    /// legal on an invalid descriptor; the result is simply another
    /// descriptor the caller is expected to test with [`is_valid`](Self::is_valid).
    #[inline(always)]
    #[allow(clippy::should_implement_trait)]
    pub const fn next(self) -> Self {
        Self {
            current: self.advance.apply(self.current, self.step),
            ..self
        }
    }

    /// descriptor with `current` back at `start`.
    #[inline(always)]
    pub const fn reset(self) -> Self {
        Self {
            current: self.start,
            ..self
        }
    }

    /// like [`next`](Self::next) but reports overflow instead of wrapping.
    pub const fn try_next(self) -> Result<Self> {
        match self.advance.checked_apply(self.current, self.step) {
            Some(current) => Ok(Self { current, ..self }),
            None => Err(LoopError::Overflow {
                index: self.current,
                step: self.step,
            }),
        }
    }

    /// index this descriptor is positioned at.
    #[inline]
    pub const fn current(self) -> i64 {
        self.current
    }

    /// bound the comparator checks against.
    #[inline]
    pub const fn end(self) -> i64 {
        self.end
    }

    /// operand handed to the advance operation.
    #[inline]
    pub const fn step(self) -> i64 {
        self.step
    }

    /// index [`reset`](Self::reset) returns to.
    #[inline]
    pub const fn start(self) -> i64 {
        self.start
    }

    /// continuation predicate.
    #[inline]
    pub const fn compare(self) -> Compare {
        self.compare
    }

    /// step operation.
    #[inline]
    pub const fn advance(self) -> Advance {
        self.advance
    }

    /// number of indices produced from `current` on, if at most `limit`.
    pub const fn count_within(self, limit: usize) -> Result<usize> {
        let mut cursor = self;
        let mut count = 0;
        while cursor.is_valid() {
            if count == limit {
                return Err(LoopError::ExceedsLimit { limit });
            }
            let next = match cursor.try_next() {
                Ok(next) => next,
                Err(err) => return Err(err),
            };
            if next.current == cursor.current {
                return Err(LoopError::Stalled {
                    index: cursor.current,
                });
            }
            cursor = next;
            count += 1;
        }
        Ok(count)
    }

    /// trip count for an unrolling of `cap` slots.
    ///
    /// panics when the descriptor does not fit; evaluated in a const item
    /// that panic is a compile error.
    pub const fn unrolled_len(self, cap: usize) -> usize {
        match self.count_within(cap) {
            Ok(count) => count,
            Err(LoopError::Stalled { .. }) => {
                panic!("loop descriptor stalls: advancing leaves the index unchanged")
            }
            Err(LoopError::Overflow { .. }) => {
                panic!("loop descriptor overflows i64 while advancing")
            }
            Err(LoopError::ExceedsLimit { .. }) => {
                panic!("loop descriptor does not terminate within the unroll capacity")
            }
        }
    }

    /// the first `N` indices produced, padded with the last one produced.
    ///
    /// an empty sequence pads with 0: no index was produced, and 0 sizes an
    /// empty array. unrolled slots past the trip count are still compiled
    /// with their padded value.
    pub const fn indices<const N: usize>(self) -> [i64; N] {
        let mut out = [0; N];
        let mut cursor = self;
        let mut last = 0;
        let mut k = 0;
        while k < N && cursor.is_valid() {
            last = cursor.current;
            out[k] = last;
            cursor = cursor.next();
            k += 1;
        }
        while k < N {
            out[k] = last;
            k += 1;
        }
        out
    }

    /// runtime termination check for descriptors built from input.
    pub fn validate(&self, limit: usize) -> Result<usize> {
        match self.count_within(limit) {
            Ok(count) => Ok(count),
            Err(err) => {
                log::debug!("rejecting loop {}: {}", self, err);
                Err(err)
            }
        }
    }
}

impl fmt::Display for LoopDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[i = {}; i {} {}; i = i {} {}] at {}",
            self.start, self.compare, self.end, self.advance, self.step, self.current
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_constructors() {
        let lt = LoopDescriptor::less_than(0, 10);
        assert_eq!(lt.compare(), Compare::Less);
        assert_eq!(lt.advance(), Advance::Add);
        assert_eq!(lt.step(), 1);

        let gt = LoopDescriptor::greater_than(10, 1);
        assert_eq!(gt.step(), -1);
        assert_eq!(LoopDescriptor::greater_equal(10, 1).step(), -1);
        assert_eq!(LoopDescriptor::equal_to(3, 3).step(), 1);
        assert_eq!(LoopDescriptor::less_equal(0, 10).with_step(2).step(), 2);
    }

    #[test]
    fn test_is_valid() {
        assert!(LoopDescriptor::less_than(0, 1).is_valid());
        assert!(!LoopDescriptor::less_than(1, 1).is_valid());
        assert!(LoopDescriptor::less_equal(1, 1).is_valid());
        assert!(!LoopDescriptor::less_than(5, 1).is_valid());
        assert!(LoopDescriptor::equal_to(4, 4).is_valid());
    }

    #[test]
    fn test_next_keeps_fixed_fields() {
        let initial = LoopDescriptor::new(3, -40, -7, Compare::Greater, Advance::Add);
        let mut cursor = initial;
        for n in 1..=20 {
            cursor = cursor.next();
            assert_eq!(cursor.current(), 3 - 7 * n);
            assert_eq!(cursor.start(), initial.start());
            assert_eq!(cursor.end(), initial.end());
            assert_eq!(cursor.step(), initial.step());
            assert_eq!(cursor.compare(), initial.compare());
            assert_eq!(cursor.advance(), initial.advance());
        }
    }

    #[test]
    fn test_reset_returns_initial() {
        let initial = LoopDescriptor::new(1, 64, 2, Compare::LessEqual, Advance::Mul);
        let mut cursor = initial;
        for _ in 0..10 {
            cursor = cursor.next();
            assert_eq!(cursor.reset(), initial);
        }
    }

    #[test]
    fn test_next_past_end() {
        let done = LoopDescriptor::less_than(9, 10).next();
        assert!(!done.is_valid());
        assert!(!done.next().is_valid());
        assert_eq!(done.next().current(), 11);
    }

    #[test]
    fn test_advance_ops() {
        assert_eq!(Advance::Add.apply(5, 2), 7);
        assert_eq!(Advance::Sub.apply(5, 2), 3);
        assert_eq!(Advance::Mul.apply(5, 2), 10);
        assert_eq!(Advance::Div.apply(5, 2), 2);
        assert_eq!(Advance::Div.apply(5, 0), 5);
        assert_eq!(Advance::Add.apply(i64::MAX, 1), i64::MIN);
        assert_eq!(Advance::Add.checked_apply(i64::MAX, 1), None);
        assert_eq!(Advance::Div.checked_apply(5, 0), None);
    }

    #[test]
    fn test_count_within() {
        assert_eq!(LoopDescriptor::less_equal(1, 20).count_within(64), Ok(20));
        assert_eq!(LoopDescriptor::greater_than(10, 1).count_within(64), Ok(9));
        assert_eq!(LoopDescriptor::less_than(5, 1).count_within(64), Ok(0));
        assert_eq!(LoopDescriptor::equal_to(2, 2).count_within(64), Ok(1));
        assert_eq!(
            LoopDescriptor::new(1, 64, 2, Compare::LessEqual, Advance::Mul).count_within(64),
            Ok(7)
        );
    }

    #[test]
    fn test_count_within_errors() {
        assert_eq!(
            LoopDescriptor::less_than(0, 10).with_step(0).count_within(64),
            Err(LoopError::Stalled { index: 0 })
        );
        assert_eq!(
            LoopDescriptor::new(0, 64, 2, Compare::LessEqual, Advance::Mul).count_within(64),
            Err(LoopError::Stalled { index: 0 })
        );
        assert_eq!(
            LoopDescriptor::less_than(0, 10).with_step(-1).count_within(32),
            Err(LoopError::ExceedsLimit { limit: 32 })
        );
        assert_eq!(
            LoopDescriptor::less_than(0, 100).count_within(99),
            Err(LoopError::ExceedsLimit { limit: 99 })
        );
        assert_eq!(
            LoopDescriptor::less_equal(i64::MAX - 1, i64::MAX).count_within(8),
            Err(LoopError::Overflow {
                index: i64::MAX,
                step: 1
            })
        );
    }

    #[test]
    fn test_indices_padding() {
        const DESC: LoopDescriptor = LoopDescriptor::less_than(0, 3);
        const TABLE: [i64; 6] = DESC.indices::<6>();
        assert_eq!(TABLE, [0, 1, 2, 2, 2, 2]);

        let empty = LoopDescriptor::less_than(5, 1).indices::<3>();
        assert_eq!(empty, [0, 0, 0]);

        let below_zero = LoopDescriptor::less_than(-5, -10).indices::<2>();
        assert_eq!(below_zero, [0, 0]);

        let truncated = LoopDescriptor::less_than(0, 100).indices::<4>();
        assert_eq!(truncated, [0, 1, 2, 3]);
    }

    #[test]
    fn test_unrolled_len() {
        const LEN: usize = LoopDescriptor::greater_equal(4, 0).unrolled_len(8);
        assert_eq!(LEN, 5);
    }

    #[test]
    #[should_panic(expected = "does not terminate within the unroll capacity")]
    fn test_unrolled_len_overflowing_capacity() {
        LoopDescriptor::less_than(0, 100).unrolled_len(16);
    }

    #[test]
    fn test_validate() {
        assert_eq!(LoopDescriptor::less_than(0, 10).validate(10), Ok(10));
        assert!(LoopDescriptor::greater_than(0, 10).with_step(1).validate(10).is_ok());
        assert!(LoopDescriptor::less_than(0, 10).with_step(0).validate(10).is_err());
    }

    #[test]
    fn test_parse_ops() {
        assert_eq!("le".parse::<Compare>(), Ok(Compare::LessEqual));
        assert_eq!(" >= ".parse::<Compare>(), Ok(Compare::GreaterEqual));
        assert_eq!("NE".parse::<Compare>(), Ok(Compare::NotEqual));
        assert_eq!("*".parse::<Advance>(), Ok(Advance::Mul));
        assert_eq!("divides".parse::<Advance>(), Ok(Advance::Div));
        assert!("<>".parse::<Compare>().is_err());
        assert_eq!("pow".parse::<Advance>().unwrap_err().kind(), "advance");
    }

    #[test]
    fn test_display() {
        let desc = LoopDescriptor::greater_than(10, 1);
        assert_eq!(desc.to_string(), "[i = 10; i > 1; i = i + -1] at 10");
        assert_eq!(desc.next().to_string(), "[i = 10; i > 1; i = i + -1] at 9");
    }
}
