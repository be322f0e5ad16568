//! State transition history tracking.
//!
//! Keeps a bounded, ordered log of the state changes the machine went
//! through. Recording returns a new history and leaves the old one intact.

use super::state::MachineState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

/// What caused a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trigger {
    PowerToggle,
    SelectDrink,
    InsertCoin,
    Refill,
    InactivityTimeout,
}

impl Trigger {
    pub fn name(&self) -> &'static str {
        match self {
            Self::PowerToggle => "power_toggle",
            Self::SelectDrink => "select_drink",
            Self::InsertCoin => "insert_coin",
            Self::Refill => "refill",
            Self::InactivityTimeout => "inactivity_timeout",
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Record of a single state transition.
///
/// # Example
///
/// ```rust
/// use coffee_machine::core::{MachineState, StateTransition, Trigger};
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: MachineState::Off,
///     to: MachineState::Idle,
///     trigger: Trigger::PowerToggle,
///     timestamp: Utc::now(),
/// };
/// assert_eq!(transition.trigger.name(), "power_toggle");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateTransition {
    /// The state being transitioned from
    pub from: MachineState,
    /// The state being transitioned to
    pub to: MachineState,
    /// The event that caused the move
    pub trigger: Trigger,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
}

/// Bounded, ordered history of state transitions.
///
/// Once `limit` transitions are held, recording another drops the oldest.
/// A limit of zero keeps nothing.
///
/// # Example
///
/// ```rust
/// use coffee_machine::core::{MachineState, StateHistory, StateTransition, Trigger};
/// use chrono::Utc;
///
/// let history = StateHistory::with_limit(8);
///
/// let history = history.record(StateTransition {
///     from: MachineState::Off,
///     to: MachineState::Idle,
///     trigger: Trigger::PowerToggle,
///     timestamp: Utc::now(),
/// });
///
/// let history = history.record(StateTransition {
///     from: MachineState::Idle,
///     to: MachineState::AwaitingPayment,
///     trigger: Trigger::SelectDrink,
///     timestamp: Utc::now(),
/// });
///
/// let path = history.get_path();
/// assert_eq!(path, vec![MachineState::Off, MachineState::Idle, MachineState::AwaitingPayment]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StateHistory {
    limit: usize,
    transitions: VecDeque<StateTransition>,
}

impl Default for StateHistory {
    fn default() -> Self {
        Self::with_limit(Self::DEFAULT_LIMIT)
    }
}

impl StateHistory {
    pub const DEFAULT_LIMIT: usize = 64;

    /// Create an empty history holding at most `limit` transitions.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit,
            transitions: VecDeque::with_capacity(limit.min(Self::DEFAULT_LIMIT)),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Record a transition, returning a new history.
    ///
    /// The existing history is not modified.
    pub fn record(&self, transition: StateTransition) -> Self {
        let mut transitions = self.transitions.clone();
        if self.limit > 0 {
            if transitions.len() == self.limit {
                transitions.pop_front();
            }
            transitions.push_back(transition);
        }
        Self {
            limit: self.limit,
            transitions,
        }
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` state of the oldest retained transition followed
    /// by the `to` state of each transition.
    pub fn get_path(&self) -> Vec<MachineState> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.front() {
            path.push(first.from);
        }
        path.extend(self.transitions.iter().map(|t| t.to));
        path
    }

    /// Time between the oldest and newest retained transitions.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.front()?, self.transitions.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn last(&self) -> Option<&StateTransition> {
        self.transitions.back()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Iterate over retained transitions, oldest first.
    pub fn transitions(&self) -> impl Iterator<Item = &StateTransition> {
        self.transitions.iter()
    }
}
