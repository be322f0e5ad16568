//! Inbound events and outbound outcomes exchanged with the presentation layer.

use crate::core::{ActionAvailability, Drink, DrinkId, MachineState, Money, Trigger};
use crate::machine::error::MachineError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// User intents the presentation layer sends into the machine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MachineEvent {
    PowerToggle,
    SelectDrink(DrinkId),
    /// Drink identifier as typed, resolved against the catalog.
    SelectDrinkNamed(String),
    /// Raw coin entry, exactly as typed.
    InsertCoin(String),
    Refill,
}

impl MachineEvent {
    pub fn trigger(&self) -> Trigger {
        match self {
            Self::PowerToggle => Trigger::PowerToggle,
            Self::SelectDrink(_) | Self::SelectDrinkNamed(_) => Trigger::SelectDrink,
            Self::InsertCoin(_) => Trigger::InsertCoin,
            Self::Refill => Trigger::Refill,
        }
    }
}

/// Modal notifications, shown on top of the regular status line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notification {
    /// Full payment reached: the drink is dispensed and change returned.
    ChangeReturned { drink: Drink, change: Money },
    /// The machine cleared its session after sitting idle.
    InactivityReset,
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChangeReturned { drink, change } if change.is_zero() => {
                write!(f, "Enjoy your {drink}. No change to return.")
            }
            Self::ChangeReturned { drink, change } => {
                write!(f, "Enjoy your {drink}. Returning change: {change} BD.")
            }
            Self::InactivityReset => f.write_str("Returning to start state due to inactivity."),
        }
    }
}

/// Result of handling one event.
///
/// Carries everything a presentation layer needs to redraw: the new state,
/// whether the event was accepted, the status line, an optional modal and
/// the button availability derived from the state.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EventOutcome {
    pub trigger: Trigger,
    pub state: MachineState,
    pub result: Result<(), MachineError>,
    pub message: Option<String>,
    pub notification: Option<Notification>,
    pub actions: ActionAvailability,
}

impl EventOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    pub fn error(&self) -> Option<&MachineError> {
        self.result.as_ref().err()
    }

    /// Change handed back by this event, if it settled a payment.
    pub fn change(&self) -> Option<Money> {
        match &self.notification {
            Some(Notification::ChangeReturned { change, .. }) => Some(*change),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_maps_to_trigger() {
        assert_eq!(MachineEvent::PowerToggle.trigger(), Trigger::PowerToggle);
        assert_eq!(
            MachineEvent::SelectDrink(Drink::Latte).trigger(),
            Trigger::SelectDrink
        );
        assert_eq!(
            MachineEvent::InsertCoin("0.5".into()).trigger(),
            Trigger::InsertCoin
        );
        assert_eq!(
            MachineEvent::SelectDrinkNamed("latte".into()).trigger(),
            Trigger::SelectDrink
        );
        assert_eq!(MachineEvent::Refill.trigger(), Trigger::Refill);
    }

    #[test]
    fn change_notification_text() {
        let none = Notification::ChangeReturned {
            drink: Drink::Espresso,
            change: Money::ZERO,
        };
        assert_eq!(none.to_string(), "Enjoy your Espresso. No change to return.");

        let some = Notification::ChangeReturned {
            drink: Drink::Latte,
            change: Money::from_fils(300),
        };
        assert_eq!(
            some.to_string(),
            "Enjoy your Coffee Latte. Returning change: 0.3 BD."
        );
    }

    #[test]
    fn outcome_reports_change_and_error() {
        let outcome = EventOutcome {
            trigger: Trigger::InsertCoin,
            state: MachineState::Idle,
            result: Ok(()),
            message: Some("Dispensing Espresso".into()),
            notification: Some(Notification::ChangeReturned {
                drink: Drink::Espresso,
                change: Money::from_fils(500),
            }),
            actions: MachineState::Idle.actions(),
        };
        assert!(outcome.is_ok());
        assert!(outcome.error().is_none());
        assert_eq!(outcome.change(), Some(Money::from_fils(500)));
    }

    #[test]
    fn outcome_serializes_for_presentation() {
        let outcome = EventOutcome {
            trigger: Trigger::SelectDrink,
            state: MachineState::Idle,
            result: Err(MachineError::ResourceUnavailable),
            message: Some(MachineError::ResourceUnavailable.to_string()),
            notification: None,
            actions: MachineState::Idle.actions(),
        };

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["state"], "Idle");
        assert_eq!(json["result"]["Err"], "ResourceUnavailable");
        assert_eq!(json["actions"]["select_drink"], true);
    }
}
