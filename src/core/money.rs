//! Monetary amounts and accepted coins.
//!
//! Amounts are stored as whole fils (1 BD = 1000 fils) so that change
//! calculation is exact: paying 1.0 BD for a 0.7 BD drink returns exactly
//! 0.3 BD.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};

/// Number of fils in one BD.
pub const FILS_PER_BD: u32 = 1000;

/// A non-negative amount of BD, held in fils.
///
/// # Example
///
/// ```rust
/// use coffee_machine::core::Money;
///
/// let paid = Money::from_fils(1000);
/// let price = Money::from_fils(700);
///
/// assert_eq!(paid.saturating_sub(price), Money::from_fils(300));
/// assert_eq!(paid.saturating_sub(price).to_string(), "0.3");
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(u32);

impl Money {
    /// Zero BD.
    pub const ZERO: Money = Money(0);

    /// Create an amount from whole fils.
    pub const fn from_fils(fils: u32) -> Self {
        Money(fils)
    }

    /// The amount in fils.
    pub const fn fils(self) -> u32 {
        self.0
    }

    /// The amount in BD as a float, for display collaborators.
    pub fn as_bd(self) -> f64 {
        f64::from(self.0) / f64::from(FILS_PER_BD)
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Difference clamped at zero. Amounts never go negative.
    pub fn saturating_sub(self, other: Money) -> Money {
        Money(self.0.saturating_sub(other.0))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        *self = *self + rhs;
    }
}

/// Prints BD with trailing zeros trimmed, keeping at least one decimal.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / FILS_PER_BD;
        let fraction = format!("{:03}", self.0 % FILS_PER_BD);
        let trimmed = fraction.trim_end_matches('0');
        if trimmed.is_empty() {
            write!(f, "{whole}.0")
        } else {
            write!(f, "{whole}.{trimmed}")
        }
    }
}

/// Coin denominations the acceptor takes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Coin {
    /// 0.1 BD
    Tenth,
    /// 0.5 BD
    Half,
    /// 1.0 BD
    Whole,
}

impl Coin {
    pub const ALL: [Coin; 3] = [Coin::Tenth, Coin::Half, Coin::Whole];

    pub fn value(self) -> Money {
        match self {
            Self::Tenth => Money::from_fils(100),
            Self::Half => Money::from_fils(500),
            Self::Whole => Money::from_fils(1000),
        }
    }

    /// Match a parsed numeric entry against the denominations.
    ///
    /// The comparison is exact: `0.10` and `0.1` are the same coin, but
    /// `0.1000001` is not a coin at all.
    pub fn from_bd(value: f64) -> Option<Coin> {
        Self::ALL
            .into_iter()
            .find(|coin| coin.value().as_bd() == value)
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} BD", self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_trims_trailing_zeros() {
        assert_eq!(Money::from_fils(300).to_string(), "0.3");
        assert_eq!(Money::from_fils(1000).to_string(), "1.0");
        assert_eq!(Money::from_fils(750).to_string(), "0.75");
        assert_eq!(Money::from_fils(1205).to_string(), "1.205");
        assert_eq!(Money::ZERO.to_string(), "0.0");
    }

    #[test]
    fn saturating_sub_never_goes_negative() {
        let small = Money::from_fils(100);
        let large = Money::from_fils(500);

        assert_eq!(small.saturating_sub(large), Money::ZERO);
        assert_eq!(large.saturating_sub(small), Money::from_fils(400));
    }

    #[test]
    fn add_accumulates() {
        let mut total = Money::ZERO;
        total += Coin::Tenth.value();
        total += Coin::Half.value();
        total += Coin::Whole.value();

        assert_eq!(total, Money::from_fils(1600));
    }

    #[test]
    fn from_bd_accepts_only_denominations() {
        assert_eq!(Coin::from_bd(0.1), Some(Coin::Tenth));
        assert_eq!(Coin::from_bd(0.5), Some(Coin::Half));
        assert_eq!(Coin::from_bd(1.0), Some(Coin::Whole));

        assert_eq!(Coin::from_bd(0.3), None);
        assert_eq!(Coin::from_bd(0.0), None);
        assert_eq!(Coin::from_bd(-0.5), None);
        assert_eq!(Coin::from_bd(2.0), None);
        assert_eq!(Coin::from_bd(f64::NAN), None);
    }

    #[test]
    fn as_bd_matches_literal_values() {
        assert_eq!(Coin::Tenth.value().as_bd(), 0.1);
        assert_eq!(Coin::Half.value().as_bd(), 0.5);
        assert_eq!(Coin::Whole.value().as_bd(), 1.0);
    }

    #[test]
    fn money_serializes_as_fils() {
        let json = serde_json::to_string(&Money::from_fils(700)).unwrap();
        assert_eq!(json, "700");

        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Money::from_fils(700));
    }
}
