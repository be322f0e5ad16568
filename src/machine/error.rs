//! Errors a machine event can be rejected with.

use crate::core::{MachineState, UnknownDrink};
use serde::Serialize;
use thiserror::Error;

/// Reasons an event was rejected.
///
/// Every variant is recoverable: a rejected event leaves the machine in the
/// state it was in, and the display text is the variant's `Display`.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum MachineError {
    /// Coin entry was not a number.
    #[error("Invalid input. Please enter a number.")]
    InvalidInput { input: String },

    /// Coin entry was a number but not an accepted denomination.
    #[error("Invalid coin. Please insert 0.5, 1.0, or 0.1 BD.")]
    InvalidCoin { input: String },

    /// A drink was selected while ingredients are depleted.
    #[error("Not enough ingredients. Please refill.")]
    ResourceUnavailable,

    /// The event is not accepted in the current state.
    #[error("Cannot {action} while the machine is {state}.")]
    ActionUnavailable {
        action: &'static str,
        state: MachineState,
    },

    /// The drink identifier is not in the catalog.
    #[error("Unknown drink '{name}'.")]
    UnknownDrink { name: String },
}

impl From<UnknownDrink> for MachineError {
    fn from(err: UnknownDrink) -> Self {
        MachineError::UnknownDrink { name: err.0 }
    }
}
