use std::fmt;

use rust_decimal::prelude::*;
use serde::Serialize;

pub const NUM_DECIMAL_PLACES: u32 = 2;

/// A non-negative currency amount, always carried at cent precision.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

impl From<u64> for Money {
    fn from(dollars: u64) -> Self {
        let mut decimal = Decimal::from(dollars);
        decimal.rescale(NUM_DECIMAL_PLACES);
        Money(decimal)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// Adds `other`, clamping at the largest representable amount.
    #[must_use]
    pub fn saturating_add(self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }

    /// Applies a non-negative `rate` (e.g. `0.03` for a 3% commission side).
    /// Negative rates are treated as zero.
    #[must_use]
    pub fn scaled(self, rate: Decimal) -> Money {
        let mut scaled = self.0.saturating_mul(rate.max(Decimal::ZERO));
        scaled.rescale(NUM_DECIMAL_PLACES);
        Money(scaled)
    }
}
