use anyhow::Context;
use rust_decimal::{prelude::ToPrimitive, Decimal, RoundingStrategy};
use serde_with::DeserializeFromStr;

use std::{
    fmt::{Debug, Display},
    str::FromStr,
};

/// Represents an amount of money.
///
/// The amount is stored as an exact [`Decimal`], keeping every digit of the
/// input, so sums are exact. The [`Display`] implementation rounds to 2
/// decimal places (midpoints away from zero) and honours width and
/// alignment flags.
#[derive(Clone, Copy, Default, DeserializeFromStr, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// Adds two amounts, returning `None` if the result can't be represented.
    #[must_use]
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Returns this amount as a percentage of `total`.
    ///
    /// Returns `None` when `total` is zero, since no share is defined.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sales_summary::Money;
    /// let part: Money = "25.00".parse().unwrap();
    /// let total: Money = "75.00".parse().unwrap();
    /// let share = part.share_of(total).unwrap();
    /// assert_eq!(format!("{share:.2}"), "33.33");
    /// assert_eq!(part.share_of(Money::ZERO), None);
    /// ```
    #[must_use]
    pub fn share_of(self, total: Money) -> Option<f64> {
        if total.is_zero() {
            return None;
        }
        Some(self.0.to_f64()? / total.0.to_f64()? * 100.0)
    }
}

impl Debug for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        if rounded.is_zero() {
            rounded = Decimal::ZERO;
        }
        rounded.rescale(2);
        f.pad(&rounded.to_string())
    }
}

impl FromStr for Money {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let text = s.trim();
        let amount = if text.contains(['e', 'E']) {
            Decimal::from_scientific(text)
        } else {
            Decimal::from_str(text)
        };
        amount
            .map(Self)
            .with_context(|| format!("invalid amount {s:?}: not a decimal number"))
    }
}
