//! The `(failures, total)` tally every provider returns.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::Serialize;

/// An immutable pass/fail tally with `failures <= total`.
///
/// Tallies combine by field-wise addition; [`TestResult::ZERO`] is the identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct TestResult {
    failures: usize,
    total: usize,
}

impl TestResult {
    pub const ZERO: TestResult = TestResult {
        failures: 0,
        total: 0,
    };

    /// Build a tally, or `None` if it would have more failures than tests.
    pub fn new(failures: usize, total: usize) -> Option<Self> {
        (failures <= total).then_some(Self { failures, total })
    }

    /// `total` tests, all passing.
    pub fn passed(total: usize) -> Self {
        Self { failures: 0, total }
    }

    pub fn failures(&self) -> usize {
        self.failures
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_passing(&self) -> bool {
        self.failures == 0
    }

    /// The tally after one more attempted test.
    #[must_use]
    pub fn record(self, passed: bool) -> Self {
        Self {
            failures: self.failures + usize::from(!passed),
            total: self.total + 1,
        }
    }

    #[must_use]
    pub fn combine(self, other: Self) -> Self {
        Self {
            failures: self.failures + other.failures,
            total: self.total + other.total,
        }
    }
}

impl Add for TestResult {
    type Output = TestResult;

    fn add(self, rhs: Self) -> Self::Output {
        self.combine(rhs)
    }
}

impl AddAssign for TestResult {
    fn add_assign(&mut self, rhs: Self) {
        *self = self.combine(rhs);
    }
}

impl Sum for TestResult {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::combine)
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failures out of {} tests", self.failures, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_more_failures_than_tests() {
        assert!(TestResult::new(3, 2).is_none());
        assert_eq!(TestResult::new(2, 2).unwrap().failures(), 2);
    }

    #[test]
    fn test_record() {
        let r = TestResult::ZERO.record(true).record(false).record(true);
        assert_eq!(r, TestResult::new(1, 3).unwrap());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            TestResult::new(2, 15).unwrap().to_string(),
            "2 failures out of 15 tests"
        );
    }
}
