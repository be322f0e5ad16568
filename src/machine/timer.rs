//! Inactivity timer collaborators.
//!
//! The machine owns exactly one timer handle. It disarms and rearms the
//! handle at the end of every event it handles while powered, so there is
//! never more than one pending timeout.

use std::time::Duration;
use tokio::time::Instant;

/// Single-shot timer the machine arms after each event.
///
/// An implementation fires the inactivity timeout at most once per `arm`,
/// and never after `disarm`.
pub trait InactivityTimer {
    /// Schedule a timeout `duration` from now, replacing any pending one.
    fn arm(&mut self, duration: Duration);

    /// Cancel the pending timeout, if any.
    fn disarm(&mut self);

    fn is_armed(&self) -> bool;
}

/// Timer that only records what it was asked to do.
///
/// Used when the embedder drives time itself and calls
/// [`TransactionMachine::on_inactivity_timeout`](crate::machine::TransactionMachine::on_inactivity_timeout)
/// directly.
///
/// # Example
///
/// ```rust
/// use coffee_machine::machine::{InactivityTimer, ManualTimer};
/// use std::time::Duration;
///
/// let mut timer = ManualTimer::default();
/// timer.arm(Duration::from_secs(300));
/// assert_eq!(timer.armed_for(), Some(Duration::from_secs(300)));
///
/// timer.disarm();
/// assert!(!timer.is_armed());
/// assert_eq!(timer.arm_count(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ManualTimer {
    armed_for: Option<Duration>,
    arm_count: usize,
}

impl ManualTimer {
    /// Duration of the pending timeout.
    pub fn armed_for(&self) -> Option<Duration> {
        self.armed_for
    }

    /// How many times the timer has been armed since creation.
    pub fn arm_count(&self) -> usize {
        self.arm_count
    }
}

impl InactivityTimer for ManualTimer {
    fn arm(&mut self, duration: Duration) {
        self.armed_for = Some(duration);
        self.arm_count += 1;
    }

    fn disarm(&mut self) {
        self.armed_for = None;
    }

    fn is_armed(&self) -> bool {
        self.armed_for.is_some()
    }
}

/// Timer backed by a tokio deadline.
///
/// Does not spawn anything: the runtime loop reads [`deadline`](Self::deadline)
/// and sleeps until it alongside the event mailbox.
#[derive(Clone, Debug, Default)]
pub struct DeadlineTimer {
    deadline: Option<Instant>,
}

impl DeadlineTimer {
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}

impl InactivityTimer for DeadlineTimer {
    fn arm(&mut self, duration: Duration) {
        self.deadline = Some(Instant::now() + duration);
    }

    fn disarm(&mut self) {
        self.deadline = None;
    }

    fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }
}
