//! The transaction machine: power, selection, payment and inactivity reset.

use crate::config::MachineConfig;
use crate::core::{
    ActionAvailability, Coin, Drink, DrinkId, MachineState, Money, StateHistory, StateTransition,
    Trigger,
};
use crate::machine::error::MachineError;
use crate::machine::event::{EventOutcome, MachineEvent, Notification};
use crate::machine::timer::{InactivityTimer, ManualTimer};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, warn};

const PROMPT_POWER: &str = "Press Power to Start";
const PROMPT_SELECT: &str = "Select a drink";
const REFILLED: &str = "Ingredients have been refilled.";

/// A purchase in progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Session {
    pub drink: Drink,
    pub inserted: Money,
}

/// Internal phase. The session lives inside `AwaitingPayment`, so it cannot
/// outlive that state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Off,
    Idle,
    AwaitingPayment(Session),
}

impl Phase {
    fn state(&self) -> MachineState {
        match self {
            Self::Off => MachineState::Off,
            Self::Idle => MachineState::Idle,
            Self::AwaitingPayment(_) => MachineState::AwaitingPayment,
        }
    }
}

/// Serializable view of the machine for presentation collaborators.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MachineSnapshot {
    pub state: MachineState,
    pub selected_drink: Option<Drink>,
    pub inserted: Money,
    pub resources_available: bool,
    pub last_activity: DateTime<Utc>,
    pub actions: ActionAvailability,
}

/// Coffee machine transaction core.
///
/// Handles one event at a time and never fails outright: every handler
/// returns an [`EventOutcome`] describing the new state and whether the
/// event was accepted. Rejected events change nothing but the message and
/// the timer.
///
/// # Example
///
/// ```rust
/// use coffee_machine::config::MachineConfig;
/// use coffee_machine::core::{Drink, MachineState, Money};
/// use coffee_machine::machine::TransactionMachine;
///
/// let mut machine = TransactionMachine::new(&MachineConfig::default());
///
/// machine.power_toggle();
/// machine.select_drink(Drink::Latte);
/// let outcome = machine.insert_coin("1.0");
///
/// assert_eq!(outcome.state, MachineState::Idle);
/// assert_eq!(outcome.change(), Some(Money::from_fils(300)));
/// ```
#[derive(Debug)]
pub struct TransactionMachine<T = ManualTimer> {
    phase: Phase,
    resources_available: bool,
    last_activity: DateTime<Utc>,
    inactivity_timeout: Duration,
    timer: T,
    history: StateHistory,
}

impl TransactionMachine<ManualTimer> {
    /// Create a powered-off machine with a [`ManualTimer`].
    pub fn new(config: &MachineConfig) -> Self {
        Self::with_timer(config, ManualTimer::default())
    }
}

impl<T: InactivityTimer> TransactionMachine<T> {
    /// Create a powered-off machine driving the given timer.
    ///
    /// Ingredients start out available.
    pub fn with_timer(config: &MachineConfig, mut timer: T) -> Self {
        timer.disarm();
        Self {
            phase: Phase::Off,
            resources_available: true,
            last_activity: Utc::now(),
            inactivity_timeout: config.inactivity_timeout(),
            timer,
            history: StateHistory::with_limit(config.history_limit),
        }
    }

    pub fn state(&self) -> MachineState {
        self.phase.state()
    }

    pub fn session(&self) -> Option<Session> {
        match self.phase {
            Phase::AwaitingPayment(session) => Some(session),
            _ => None,
        }
    }

    pub fn selected_drink(&self) -> Option<Drink> {
        self.session().map(|s| s.drink)
    }

    /// Amount inserted towards the current drink. Zero outside a session.
    pub fn inserted(&self) -> Money {
        self.session().map_or(Money::ZERO, |s| s.inserted)
    }

    pub fn resources_available(&self) -> bool {
        self.resources_available
    }

    pub fn last_activity(&self) -> DateTime<Utc> {
        self.last_activity
    }

    pub fn inactivity_timeout(&self) -> Duration {
        self.inactivity_timeout
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    pub fn snapshot(&self) -> MachineSnapshot {
        let state = self.state();
        MachineSnapshot {
            state,
            selected_drink: self.selected_drink(),
            inserted: self.inserted(),
            resources_available: self.resources_available,
            last_activity: self.last_activity,
            actions: state.actions(),
        }
    }

    /// Dispatch an inbound event to its handler.
    pub fn handle(&mut self, event: MachineEvent) -> EventOutcome {
        match event {
            MachineEvent::PowerToggle => self.power_toggle(),
            MachineEvent::SelectDrink(drink) => self.select_drink(drink),
            MachineEvent::SelectDrinkNamed(raw) => self.select_drink_named(&raw),
            MachineEvent::InsertCoin(raw) => self.insert_coin(&raw),
            MachineEvent::Refill => self.refill(),
        }
    }

    /// Off → Idle, or Idle/AwaitingPayment → Off.
    ///
    /// Powering off drops any session and cancels the pending timeout.
    /// Ingredient availability is left alone.
    pub fn power_toggle(&mut self) -> EventOutcome {
        let from = self.state();
        let message = if self.phase == Phase::Off {
            self.phase = Phase::Idle;
            PROMPT_SELECT
        } else {
            if let Some(session) = self.session() {
                info!(
                    drink = %session.drink,
                    inserted = %session.inserted,
                    "session abandoned by power off"
                );
            }
            self.phase = Phase::Off;
            PROMPT_POWER
        };
        self.accept(Trigger::PowerToggle, from, message.to_string(), None)
    }

    /// Choose a drink. Only valid while Idle with ingredients available.
    pub fn select_drink(&mut self, drink: DrinkId) -> EventOutcome {
        let from = self.state();
        if from != MachineState::Idle {
            return self.unavailable(Trigger::SelectDrink, "select a drink");
        }
        if !self.resources_available {
            return self.reject(Trigger::SelectDrink, MachineError::ResourceUnavailable);
        }

        self.phase = Phase::AwaitingPayment(Session {
            drink,
            inserted: Money::ZERO,
        });
        let message = format!("Insert money for {drink}");
        self.accept(Trigger::SelectDrink, from, message, None)
    }

    /// Choose a drink by its identifier, e.g. `"espresso"`.
    pub fn select_drink_named(&mut self, raw: &str) -> EventOutcome {
        match raw.parse::<Drink>() {
            Ok(drink) => self.select_drink(drink),
            Err(err) => self.reject(Trigger::SelectDrink, err.into()),
        }
    }

    /// Insert a coin given as raw text.
    ///
    /// Once the inserted total reaches the price the drink is dispensed,
    /// change is returned in the same step and the machine goes back to Idle.
    pub fn insert_coin(&mut self, raw: &str) -> EventOutcome {
        let from = self.state();
        let Phase::AwaitingPayment(mut session) = self.phase else {
            return self.unavailable(Trigger::InsertCoin, "insert a coin");
        };
        let coin = match parse_coin(raw) {
            Ok(coin) => coin,
            Err(err) => return self.reject(Trigger::InsertCoin, err),
        };

        session.inserted += coin.value();
        let price = session.drink.price();
        if session.inserted >= price {
            let change = session.inserted.saturating_sub(price);
            self.phase = Phase::Idle;
            info!(
                drink = %session.drink,
                paid = %session.inserted,
                change = %change,
                "drink dispensed"
            );
            let message = format!("Dispensing {}", session.drink);
            let notification = Notification::ChangeReturned {
                drink: session.drink,
                change,
            };
            self.accept(Trigger::InsertCoin, from, message, Some(notification))
        } else {
            self.phase = Phase::AwaitingPayment(session);
            debug!(coin = %coin, inserted = %session.inserted, "coin accepted");
            let message = format!("Inserted {} BD. Continue inserting.", session.inserted);
            self.accept(Trigger::InsertCoin, from, message, None)
        }
    }

    /// Restock ingredients. Valid in any powered state; idempotent.
    pub fn refill(&mut self) -> EventOutcome {
        let from = self.state();
        if !from.is_powered() {
            return self.unavailable(Trigger::Refill, "refill ingredients");
        }
        self.resources_available = true;
        info!("ingredients refilled");
        self.accept(Trigger::Refill, from, REFILLED.to_string(), None)
    }

    /// Clear the machine after the inactivity window elapsed.
    ///
    /// Returns `None` when there is nothing to time out: the machine is off
    /// or the timer was disarmed before this fired. Otherwise the session is
    /// dropped, the machine returns to Idle showing the start prompt and
    /// ingredients are marked unavailable until the next refill.
    pub fn on_inactivity_timeout(&mut self) -> Option<EventOutcome> {
        let from = self.state();
        if !from.is_powered() || !self.timer.is_armed() {
            debug!(state = %from, "stale inactivity timeout ignored");
            return None;
        }

        self.timer.disarm();
        self.phase = Phase::Idle;
        self.resources_available = false;
        self.record(from, Trigger::InactivityTimeout);
        warn!(
            from = %from,
            timeout_ms = u64::try_from(self.inactivity_timeout.as_millis()).unwrap_or(u64::MAX),
            "inactivity timeout, session cleared and ingredients revoked"
        );

        Some(self.outcome(
            Trigger::InactivityTimeout,
            Ok(()),
            Some(PROMPT_POWER.to_string()),
            Some(Notification::InactivityReset),
        ))
    }

    fn accept(
        &mut self,
        trigger: Trigger,
        from: MachineState,
        message: String,
        notification: Option<Notification>,
    ) -> EventOutcome {
        self.last_activity = Utc::now();
        self.record(from, trigger);
        self.rearm_timer();
        self.outcome(trigger, Ok(()), Some(message), notification)
    }

    fn reject(&mut self, trigger: Trigger, err: MachineError) -> EventOutcome {
        warn!(trigger = %trigger, state = %self.state(), error = %err, "event rejected");
        if self.state().is_powered() {
            self.last_activity = Utc::now();
        }
        self.rearm_timer();
        let message = err.to_string();
        self.outcome(trigger, Err(err), Some(message), None)
    }

    fn unavailable(&mut self, trigger: Trigger, action: &'static str) -> EventOutcome {
        let state = self.state();
        self.reject(trigger, MachineError::ActionUnavailable { action, state })
    }

    /// Disarm, then arm again if still powered.
    fn rearm_timer(&mut self) {
        self.timer.disarm();
        if self.state().is_powered() {
            self.timer.arm(self.inactivity_timeout);
        } else {
            debug!("inactivity timer cancelled");
        }
    }

    fn record(&mut self, from: MachineState, trigger: Trigger) {
        let to = self.state();
        if from == to && trigger != Trigger::InactivityTimeout {
            return;
        }
        info!(from = %from, to = %to, trigger = %trigger, "state transition");
        self.history = self.history.record(StateTransition {
            from,
            to,
            trigger,
            timestamp: Utc::now(),
        });
    }

    fn outcome(
        &self,
        trigger: Trigger,
        result: Result<(), MachineError>,
        message: Option<String>,
        notification: Option<Notification>,
    ) -> EventOutcome {
        let state = self.state();
        EventOutcome {
            trigger,
            state,
            result,
            message,
            notification,
            actions: state.actions(),
        }
    }
}

/// Parse raw coin entry: non-numbers are `InvalidInput`, numbers that are
/// not a denomination are `InvalidCoin`.
fn parse_coin(raw: &str) -> Result<Coin, MachineError> {
    let value: f64 = raw.trim().parse().map_err(|_| MachineError::InvalidInput {
        input: raw.to_string(),
    })?;
    Coin::from_bd(value).ok_or_else(|| MachineError::InvalidCoin {
        input: raw.to_string(),
    })
}
