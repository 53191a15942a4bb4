//! Membership verification timing.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tek_core::limits::MEMBERSHIP_NUMBER_LEN;

use crate::ConfigError;

const fn default_debounce_ms() -> u64 {
    800
}

const fn default_lookup_timeout_secs() -> u64 {
    10
}

const fn default_membership_number_len() -> usize {
    MEMBERSHIP_NUMBER_LEN
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RosterConfig {
    /// Quiet period after a membership number edit before it is looked up.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Upper bound on a single membership lookup.
    #[serde(default = "default_lookup_timeout_secs")]
    pub lookup_timeout_secs: u64,

    /// Must equal the fixed membership number length.
    #[serde(default = "default_membership_number_len")]
    pub membership_number_len: usize,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            lookup_timeout_secs: default_lookup_timeout_secs(),
            membership_number_len: default_membership_number_len(),
        }
    }
}

impl RosterConfig {
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    #[must_use]
    pub const fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.lookup_timeout_secs)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.debounce_ms == 0 {
            return Err(ConfigError::invalid("roster.debounce_ms", "must be greater than 0"));
        }
        if self.lookup_timeout_secs == 0 {
            return Err(ConfigError::invalid(
                "roster.lookup_timeout_secs",
                "must be greater than 0",
            ));
        }
        if self.membership_number_len != MEMBERSHIP_NUMBER_LEN {
            return Err(ConfigError::invalid(
                "roster.membership_number_len",
                format!("membership numbers are {MEMBERSHIP_NUMBER_LEN} characters"),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = RosterConfig::default();
        assert_eq!(config.debounce(), Duration::from_millis(800));
        assert_eq!(config.lookup_timeout(), Duration::from_secs(10));
        assert_eq!(config.membership_number_len, 7);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_debounce_is_rejected() {
        let config = RosterConfig {
            debounce_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn membership_length_is_fixed() {
        let config = RosterConfig {
            membership_number_len: 8,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
