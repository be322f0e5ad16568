//! The drink catalog.

use super::money::Money;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Drinks the machine can dispense.
///
/// The catalog is fixed: each variant carries its display name and price.
///
/// # Example
///
/// ```rust
/// use coffee_machine::core::{Drink, Money};
///
/// assert_eq!(Drink::Espresso.price(), Money::from_fils(500));
/// assert_eq!(Drink::Latte.name(), "Coffee Latte");
/// assert_eq!("latte".parse::<Drink>(), Ok(Drink::Latte));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Drink {
    Espresso,
    Latte,
}

/// Identifier the presentation layer uses to pick a drink.
pub type DrinkId = Drink;

impl Drink {
    pub const CATALOG: [Drink; 2] = [Drink::Espresso, Drink::Latte];

    /// Name shown to the customer.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Espresso => "Espresso",
            Self::Latte => "Coffee Latte",
        }
    }

    pub fn price(&self) -> Money {
        match self {
            Self::Espresso => Money::from_fils(500),
            Self::Latte => Money::from_fils(700),
        }
    }

    /// Stable identifier, as accepted by `FromStr`.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Espresso => "espresso",
            Self::Latte => "latte",
        }
    }
}

impl fmt::Display for Drink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a drink identifier is not in the catalog.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("Unknown drink '{0}'")]
pub struct UnknownDrink(pub String);

impl FromStr for Drink {
    type Err = UnknownDrink;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::CATALOG
            .into_iter()
            .find(|drink| drink.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownDrink(wanted.to_string()))
    }
}
