//! Money value object in whole rupees.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An amount in whole Indian rupees.
///
/// Fee tables and legal ranges are all expressed in whole rupees, so the
/// engine works in integers and rounds only where a percentage is applied.
/// Arithmetic is checked: an overflowing total is `None`, never a clamped
/// value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Self = Self(0);

    pub const fn rupees(amount: u64) -> Self {
        Self(amount)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn checked_times(self, count: u64) -> Option<Money> {
        self.0.checked_mul(count).map(Self)
    }

    /// Multiplies by a count, stopping at the largest amount.
    ///
    /// Only for per-meeting figures whose totals are checked elsewhere.
    pub fn saturating_times(self, count: u64) -> Money {
        Self(self.0.saturating_mul(count))
    }

    /// Sums `amounts`, or `None` if the total does not fit.
    pub fn checked_sum(amounts: impl IntoIterator<Item = Money>) -> Option<Money> {
        amounts
            .into_iter()
            .try_fold(Money::ZERO, |total, amount| total.checked_add(amount))
    }
}

/// Renders with Indian digit grouping: `₹1,04,000`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.to_string();
        if digits.len() <= 3 {
            return write!(f, "₹{}", digits);
        }

        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut groups = Vec::new();
        let mut end = head.len();
        while end > 2 {
            groups.push(&head[end - 2..end]);
            end -= 2;
        }
        groups.push(&head[..end]);
        groups.reverse();

        write!(f, "₹{},{}", groups.join(","), tail)
    }
}
