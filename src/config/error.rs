//! Configuration errors.

use thiserror::Error;

/// A single rule a configuration breaks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigViolation {
    #[error("inactivity timeout must be greater than zero")]
    ZeroTimeout,

    #[error("mailbox capacity must be greater than zero")]
    ZeroMailboxCapacity,

    #[error("notification capacity must be greater than zero")]
    ZeroNotificationCapacity,
}

/// Errors that can occur when loading or building a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// Every violated rule, not just the first.
    #[error("invalid configuration: {}", join(.0))]
    Invalid(Vec<ConfigViolation>),
}

fn join(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
