//! Goal tracking configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::clock::DEFAULT_CUTOFF_HOUR;

/// Goal tracking configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TrackingConfig {
    /// Local hour at which one period ends and the next begins.
    #[serde(default = "default_cutoff_hour")]
    pub cutoff_hour: u32,
}

impl TrackingConfig {
    /// Validate tracking configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.cutoff_hour > 23 {
            return Err(ValidationError::InvalidCutoffHour);
        }
        Ok(())
    }
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            cutoff_hour: default_cutoff_hour(),
        }
    }
}

fn default_cutoff_hour() -> u32 {
    DEFAULT_CUTOFF_HOUR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracking_config_defaults_to_four() {
        let config = TrackingConfig::default();
        assert_eq!(config.cutoff_hour, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn out_of_range_cutoff_hour_is_rejected() {
        let config = TrackingConfig { cutoff_hour: 24 };
        assert!(config.validate().is_err());
    }
}
