//! Cloneable handle for talking to a running machine.

use crate::core::DrinkId;
use crate::machine::{EventOutcome, MachineEvent, MachineSnapshot};
use thiserror::Error;
use tokio::sync::{broadcast, mpsc, oneshot};

/// Errors from the runtime channel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error("machine runtime has stopped")]
    Closed,
}

#[derive(Debug)]
pub(crate) enum Command {
    Event {
        event: MachineEvent,
        reply: oneshot::Sender<EventOutcome>,
    },
    Snapshot {
        reply: oneshot::Sender<MachineSnapshot>,
    },
    Shutdown,
}

/// Address of a [`MachineRuntime`](super::MachineRuntime).
///
/// Every request goes through the runtime's single mailbox, so requests from
/// any number of clones are applied one at a time in arrival order.
#[derive(Clone, Debug)]
pub struct MachineHandle {
    commands: mpsc::Sender<Command>,
    notifications: broadcast::Sender<EventOutcome>,
}

impl MachineHandle {
    pub(crate) fn new(
        commands: mpsc::Sender<Command>,
        notifications: broadcast::Sender<EventOutcome>,
    ) -> Self {
        Self {
            commands,
            notifications,
        }
    }

    /// Send an event and wait for its outcome.
    pub async fn send(&self, event: MachineEvent) -> Result<EventOutcome, RuntimeError> {
        let (reply, outcome) = oneshot::channel();
        self.commands
            .send(Command::Event { event, reply })
            .await
            .map_err(|_| RuntimeError::Closed)?;
        outcome.await.map_err(|_| RuntimeError::Closed)
    }

    pub async fn power_toggle(&self) -> Result<EventOutcome, RuntimeError> {
        self.send(MachineEvent::PowerToggle).await
    }

    pub async fn select_drink(&self, drink: DrinkId) -> Result<EventOutcome, RuntimeError> {
        self.send(MachineEvent::SelectDrink(drink)).await
    }

    pub async fn select_drink_named(
        &self,
        name: impl Into<String>,
    ) -> Result<EventOutcome, RuntimeError> {
        self.send(MachineEvent::SelectDrinkNamed(name.into())).await
    }

    pub async fn insert_coin(&self, raw: impl Into<String>) -> Result<EventOutcome, RuntimeError> {
        self.send(MachineEvent::InsertCoin(raw.into())).await
    }

    pub async fn refill(&self) -> Result<EventOutcome, RuntimeError> {
        self.send(MachineEvent::Refill).await
    }

    /// Current view of the machine.
    pub async fn snapshot(&self) -> Result<MachineSnapshot, RuntimeError> {
        let (reply, snapshot) = oneshot::channel();
        self.commands
            .send(Command::Snapshot { reply })
            .await
            .map_err(|_| RuntimeError::Closed)?;
        snapshot.await.map_err(|_| RuntimeError::Closed)
    }

    /// Receive outcomes nobody asked for, i.e. inactivity resets.
    ///
    /// Only outcomes produced after this call are delivered.
    pub fn subscribe(&self) -> broadcast::Receiver<EventOutcome> {
        self.notifications.subscribe()
    }

    /// Ask the runtime to stop once the events queued before this are done.
    pub async fn shutdown(&self) -> Result<(), RuntimeError> {
        self.commands
            .send(Command::Shutdown)
            .await
            .map_err(|_| RuntimeError::Closed)
    }
}
