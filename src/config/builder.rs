//! Builder API for machine configuration.

use crate::config::error::ConfigError;
use crate::config::MachineConfig;
use std::time::Duration;

/// Fluent builder for [`MachineConfig`].
///
/// Starts from the defaults; `build` validates and reports every violation.
///
/// # Example
///
/// ```rust
/// use coffee_machine::config::MachineConfig;
/// use std::time::Duration;
///
/// let config = MachineConfig::builder()
///     .inactivity_timeout(Duration::from_secs(30))
///     .history_limit(10)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.inactivity_timeout_ms, 30_000);
/// ```
#[derive(Clone, Debug, Default)]
pub struct MachineConfigBuilder {
    config: MachineConfig,
}

impl MachineConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the inactivity window. Sub-millisecond precision is dropped.
    pub fn inactivity_timeout(mut self, duration: Duration) -> Self {
        self.config.inactivity_timeout_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn history_limit(mut self, limit: usize) -> Self {
        self.config.history_limit = limit;
        self
    }

    pub fn mailbox_capacity(mut self, capacity: usize) -> Self {
        self.config.mailbox_capacity = capacity;
        self
    }

    pub fn notification_capacity(mut self, capacity: usize) -> Self {
        self.config.notification_capacity = capacity;
        self
    }

    /// Build the configuration.
    /// Returns an error listing every violated rule.
    pub fn build(self) -> Result<MachineConfig, ConfigError> {
        self.config.validated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigViolation;

    #[test]
    fn builder_starts_from_defaults() {
        let config = MachineConfigBuilder::new().build().unwrap();
        assert_eq!(config, MachineConfig::default());
    }

    #[test]
    fn fluent_api_sets_fields() {
        let config = MachineConfigBuilder::new()
            .inactivity_timeout(Duration::from_millis(1500))
            .history_limit(3)
            .mailbox_capacity(4)
            .notification_capacity(5)
            .build()
            .unwrap();

        assert_eq!(config.inactivity_timeout_ms, 1500);
        assert_eq!(config.history_limit, 3);
        assert_eq!(config.mailbox_capacity, 4);
        assert_eq!(config.notification_capacity, 5);
    }

    #[test]
    fn builder_reports_all_violations() {
        let result = MachineConfigBuilder::new()
            .inactivity_timeout(Duration::from_micros(10))
            .mailbox_capacity(0)
            .build();

        match result {
            Err(ConfigError::Invalid(violations)) => {
                assert_eq!(
                    violations,
                    vec![
                        ConfigViolation::ZeroTimeout,
                        ConfigViolation::ZeroMailboxCapacity
                    ]
                );
            }
            other => panic!("Expected Invalid, got {other:?}"),
        }
    }
}
