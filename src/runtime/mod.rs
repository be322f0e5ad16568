//! Tokio runtime shell around the transaction machine.
//!
//! One task owns the [`TransactionMachine`] and waits on two things at once:
//! the command mailbox and the inactivity deadline. Because both are handled
//! by the same task, a timeout can never interleave with half an event.
//! When a command and an expired deadline are ready together, the command
//! wins and rearms the timer.
//!
//! # Example
//!
//! ```rust
//! use coffee_machine::config::MachineConfig;
//! use coffee_machine::core::{Drink, MachineState};
//! use coffee_machine::runtime::MachineRuntime;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), coffee_machine::runtime::RuntimeError> {
//! let (handle, task) = MachineRuntime::spawn(MachineConfig::default());
//!
//! handle.power_toggle().await?;
//! handle.select_drink(Drink::Espresso).await?;
//! let outcome = handle.insert_coin("0.5").await?;
//! assert_eq!(outcome.state, MachineState::Idle);
//!
//! handle.shutdown().await?;
//! let machine = task.await.unwrap();
//! assert_eq!(machine.state(), MachineState::Idle);
//! # Ok(())
//! # }
//! ```

mod handle;

pub use handle::{MachineHandle, RuntimeError};

use crate::config::MachineConfig;
use crate::machine::{DeadlineTimer, EventOutcome, TransactionMachine};
use handle::Command;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info};

/// The machine as driven by the runtime.
pub type RuntimeMachine = TransactionMachine<DeadlineTimer>;

/// Single task serializing events and inactivity timeouts.
pub struct MachineRuntime {
    machine: RuntimeMachine,
    commands: mpsc::Receiver<Command>,
    notifications: broadcast::Sender<EventOutcome>,
}

impl MachineRuntime {
    /// Spawn the runtime on the current tokio runtime.
    ///
    /// The join handle resolves to the machine once the runtime stops, which
    /// happens on [`MachineHandle::shutdown`] or when every handle is dropped.
    pub fn spawn(config: MachineConfig) -> (MachineHandle, JoinHandle<RuntimeMachine>) {
        let (command_tx, command_rx) = mpsc::channel(config.mailbox_capacity.max(1));
        let (notification_tx, _) = broadcast::channel(config.notification_capacity.max(1));

        let runtime = MachineRuntime {
            machine: TransactionMachine::with_timer(&config, DeadlineTimer::default()),
            commands: command_rx,
            notifications: notification_tx.clone(),
        };
        let task = tokio::spawn(runtime.run());

        (MachineHandle::new(command_tx, notification_tx), task)
    }

    async fn run(mut self) -> RuntimeMachine {
        info!(
            timeout_ms = u64::try_from(self.machine.inactivity_timeout().as_millis())
                .unwrap_or(u64::MAX),
            "coffee machine runtime started"
        );

        loop {
            let deadline = self.machine.timer().deadline();
            tokio::select! {
                biased;

                command = self.commands.recv() => match command {
                    Some(Command::Shutdown) | None => break,
                    Some(command) => self.dispatch(command),
                },
                () = sleep_until(deadline) => self.expire(),
            }
        }

        info!(state = %self.machine.state(), "coffee machine runtime stopped");
        self.machine
    }

    fn dispatch(&mut self, command: Command) {
        match command {
            Command::Event { event, reply } => {
                let outcome = self.machine.handle(event);
                if reply.send(outcome).is_err() {
                    debug!("event requester went away before the outcome was ready");
                }
            }
            Command::Snapshot { reply } => {
                let _ = reply.send(self.machine.snapshot());
            }
            Command::Shutdown => {}
        }
    }

    fn expire(&mut self) {
        if let Some(outcome) = self.machine.on_inactivity_timeout() {
            // No subscribers is not an error.
            let _ = self.notifications.send(outcome);
        }
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
