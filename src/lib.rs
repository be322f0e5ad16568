//! Coffee machine: the transaction core of a vending-style coffee machine.
//!
//! The crate follows a "pure core, imperative shell" split. The core
//! [`TransactionMachine`] is a synchronous value that owns all machine state
//! and turns events into outcomes. The [`runtime`] shell drives it from a
//! single tokio task so that user events and the inactivity timeout are
//! applied one at a time.
//!
//! # Core Concepts
//!
//! - **State**: `Off`, `Idle` or `AwaitingPayment`, each with derived button availability
//! - **Session**: the chosen drink and the money inserted so far
//! - **Inactivity timeout**: clears the session and revokes ingredients
//! - **History**: bounded log of state transitions
//!
//! # Example
//!
//! ```rust
//! use coffee_machine::config::MachineConfig;
//! use coffee_machine::core::{Drink, MachineState, Money};
//! use coffee_machine::machine::{MachineError, TransactionMachine};
//!
//! let mut machine = TransactionMachine::new(&MachineConfig::default());
//! machine.power_toggle();
//! machine.select_drink(Drink::Espresso);
//!
//! let outcome = machine.insert_coin("0.3");
//! assert!(matches!(outcome.error(), Some(MachineError::InvalidCoin { .. })));
//!
//! let outcome = machine.insert_coin("0.1");
//! assert_eq!(outcome.state, MachineState::AwaitingPayment);
//! assert_eq!(machine.inserted(), Money::from_fils(100));
//! ```

pub mod config;
pub mod core;
pub mod machine;
pub mod runtime;

// Re-export commonly used types
pub use config::MachineConfig;
pub use crate::core::{Drink, MachineState, Money};
pub use machine::{EventOutcome, MachineError, MachineEvent, Notification, TransactionMachine};
pub use runtime::{MachineHandle, MachineRuntime};
