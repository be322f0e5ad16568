//! The coffee machine transaction core.
//!
//! [`TransactionMachine`] owns every piece of mutable state: the current
//! phase, the in-progress session, ingredient availability and the
//! inactivity timer handle. Presentation collaborators drive it with
//! [`MachineEvent`]s and redraw from the returned [`EventOutcome`]s.
//!
//! # State machine
//!
//! ```text
//! Off --power--> Idle
//! Idle --power--> Off
//! Idle --select (ingredients ok)--> AwaitingPayment
//! Idle --select (no ingredients)--> Idle (error)
//! AwaitingPayment --coin (underpaid)--> AwaitingPayment
//! AwaitingPayment --coin (paid in full)--> Idle (dispense + change)
//! AwaitingPayment --power--> Off
//! Idle | AwaitingPayment --timeout--> Idle (ingredients revoked)
//! ```
//!
//! Everything here is synchronous. The [`runtime`](crate::runtime) module
//! wraps the machine in a tokio task that serializes events with timer
//! expiry.

mod error;
mod event;
mod timer;
mod transaction;

pub use error::MachineError;
pub use event::{EventOutcome, MachineEvent, Notification};
pub use timer::{DeadlineTimer, InactivityTimer, ManualTimer};
pub use transaction::{MachineSnapshot, Session, TransactionMachine};
