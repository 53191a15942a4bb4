//! General application configuration.

use serde::{Deserialize, Serialize};
use tek_core::limits::{ADMIN_WEIGHT_MAX, DEFAULT_ADMIN_WEIGHT};

use crate::ConfigError;

/// Default leaderboard size.
const fn default_limit() -> u32 {
    5
}

const fn default_admin_weight() -> u8 {
    DEFAULT_ADMIN_WEIGHT
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Default result limit for `top-teams` and list commands.
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// Weight of evaluations whose admin no longer exists.
    #[serde(default = "default_admin_weight")]
    pub default_admin_weight: u8,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            default_admin_weight: default_admin_weight(),
        }
    }
}

impl GeneralConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.default_admin_weight > ADMIN_WEIGHT_MAX {
            return Err(ConfigError::invalid(
                "general.default_admin_weight",
                format!("must be at most {ADMIN_WEIGHT_MAX}"),
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
        let config = GeneralConfig::default();
        assert_eq!(config.default_limit, 5);
        assert_eq!(config.default_admin_weight, 10);
    }
}
