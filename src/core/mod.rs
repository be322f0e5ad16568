//! Core value types of the coffee machine.
//!
//! This module contains the pure data the transaction machine works with:
//! - Machine states and the actions each one enables
//! - The drink catalog
//! - Money and accepted coins
//! - Bounded transition history
//!
//! Nothing in here performs I/O or touches a timer.

mod drink;
mod history;
mod money;
mod state;

pub use drink::{Drink, DrinkId, UnknownDrink};
pub use history::{StateHistory, StateTransition, Trigger};
pub use money::{Coin, Money, FILS_PER_BD};
pub use state::{ActionAvailability, MachineState};
