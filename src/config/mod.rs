//! Machine configuration.
//!
//! Configuration is plain serde data. Every field has a default, so an empty
//! JSON object is a valid configuration. Validation uses Stillwater's
//! `Validation` to report every broken rule in one pass.
//!
//! # Example
//!
//! ```rust
//! use coffee_machine::config::MachineConfig;
//! use std::time::Duration;
//!
//! let config = MachineConfig::from_json(r#"{ "inactivity_timeout_ms": 60000 }"#).unwrap();
//! assert_eq!(config.inactivity_timeout(), Duration::from_secs(60));
//! assert_eq!(config.history_limit, 64);
//! ```

pub mod builder;
pub mod error;

pub use builder::MachineConfigBuilder;
pub use error::{ConfigError, ConfigViolation};

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Five minutes.
pub const DEFAULT_INACTIVITY_TIMEOUT_MS: u64 = 300_000;
pub const DEFAULT_HISTORY_LIMIT: usize = 64;
pub const DEFAULT_MAILBOX_CAPACITY: usize = 32;
pub const DEFAULT_NOTIFICATION_CAPACITY: usize = 16;

/// Settings for a transaction machine and its runtime.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Idle window after which an in-progress session is cleared.
    pub inactivity_timeout_ms: u64,
    /// Number of state transitions kept in history.
    pub history_limit: usize,
    /// Pending events the runtime mailbox holds before senders wait.
    pub mailbox_capacity: usize,
    /// Unsolicited outcomes buffered per subscriber.
    pub notification_capacity: usize,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            inactivity_timeout_ms: DEFAULT_INACTIVITY_TIMEOUT_MS,
            history_limit: DEFAULT_HISTORY_LIMIT,
            mailbox_capacity: DEFAULT_MAILBOX_CAPACITY,
            notification_capacity: DEFAULT_NOTIFICATION_CAPACITY,
        }
    }
}

impl MachineConfig {
    pub fn builder() -> MachineConfigBuilder {
        MachineConfigBuilder::new()
    }

    pub fn inactivity_timeout(&self) -> Duration {
        Duration::from_millis(self.inactivity_timeout_ms)
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: MachineConfig = serde_json::from_str(json)?;
        config.validated()
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check every rule, accumulating ALL violations.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ConfigViolation>> {
        let checks = vec![
            check(self.inactivity_timeout_ms > 0, ConfigViolation::ZeroTimeout),
            check(
                self.mailbox_capacity > 0,
                ConfigViolation::ZeroMailboxCapacity,
            ),
            check(
                self.notification_capacity > 0,
                ConfigViolation::ZeroNotificationCapacity,
            ),
        ];

        Validation::all_vec(checks).map(|_| ())
    }

    /// Return the configuration if it is valid.
    pub fn validated(self) -> Result<Self, ConfigError> {
        match self.validate() {
            Validation::Success(()) => Ok(self),
            Validation::Failure(violations) => Err(ConfigError::Invalid(
                violations.iter().cloned().collect(),
            )),
        }
    }
}

fn check(ok: bool, violation: ConfigViolation) -> Validation<(), NonEmptyVec<ConfigViolation>> {
    if ok {
        Validation::success(())
    } else {
        Validation::fail(violation)
    }
}
