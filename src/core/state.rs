//! Machine states and the actions each one allows.
//!
//! Both are plain values: the availability of every action is a pure
//! function of the state, so presentation collaborators can derive button
//! enablement without asking the machine anything else.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Top-level state of the coffee machine.
///
/// No state is terminal. `Off` is where the machine starts and where it
/// returns whenever power is toggled off.
///
/// # Example
///
/// ```rust
/// use coffee_machine::core::MachineState;
///
/// let state = MachineState::AwaitingPayment;
/// assert_eq!(state.name(), "AwaitingPayment");
/// assert!(state.is_powered());
/// assert!(state.actions().insert_coin);
/// assert!(!state.actions().select_drink);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash, Serialize, Deserialize)]
pub enum MachineState {
    /// Powered down. Only the power button responds.
    #[default]
    Off,
    /// Powered, no drink chosen.
    Idle,
    /// A drink is chosen and coins are being collected.
    AwaitingPayment,
}

impl MachineState {
    /// Name for display and logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Off => "Off",
            Self::Idle => "Idle",
            Self::AwaitingPayment => "AwaitingPayment",
        }
    }

    pub fn is_powered(&self) -> bool {
        !matches!(self, Self::Off)
    }

    /// Which inputs the presentation layer should enable in this state.
    pub fn actions(&self) -> ActionAvailability {
        match self {
            Self::Off => ActionAvailability {
                power: true,
                select_drink: false,
                insert_coin: false,
                refill: false,
            },
            Self::Idle => ActionAvailability {
                power: true,
                select_drink: true,
                insert_coin: false,
                refill: true,
            },
            Self::AwaitingPayment => ActionAvailability {
                power: true,
                select_drink: false,
                insert_coin: true,
                refill: true,
            },
        }
    }
}

impl fmt::Display for MachineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Button availability flags derived from a [`MachineState`].
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ActionAvailability {
    pub power: bool,
    pub select_drink: bool,
    pub insert_coin: bool,
    pub refill: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_name_returns_correct_value() {
        assert_eq!(MachineState::Off.name(), "Off");
        assert_eq!(MachineState::Idle.name(), "Idle");
        assert_eq!(MachineState::AwaitingPayment.name(), "AwaitingPayment");
    }

    #[test]
    fn only_off_is_unpowered() {
        assert!(!MachineState::Off.is_powered());
        assert!(MachineState::Idle.is_powered());
        assert!(MachineState::AwaitingPayment.is_powered());
    }

    #[test]
    fn off_disables_everything_but_power() {
        let actions = MachineState::Off.actions();
        assert!(actions.power);
        assert!(!actions.select_drink);
        assert!(!actions.insert_coin);
        assert!(!actions.refill);
    }

    #[test]
    fn idle_enables_selection_and_refill() {
        let actions = MachineState::Idle.actions();
        assert!(actions.select_drink);
        assert!(actions.refill);
        assert!(!actions.insert_coin);
    }

    #[test]
    fn awaiting_payment_enables_coin_insert() {
        let actions = MachineState::AwaitingPayment.actions();
        assert!(actions.insert_coin);
        assert!(!actions.select_drink);
    }

    #[test]
    fn default_state_is_off() {
        assert_eq!(MachineState::default(), MachineState::Off);
    }

    #[test]
    fn state_serializes_correctly() {
        let state = MachineState::AwaitingPayment;
        let json = serde_json::to_string(&state).unwrap();
        let deserialized: MachineState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
    }
}
