//! Configuration for the matching engine

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the matching engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Maximum candidates matched concurrently
    pub max_concurrency: usize,

    /// Maximum time for a single remote directory call (seconds).
    /// Expiry inside per-candidate matching is treated like any other
    /// recoverable per-unit failure.
    pub call_timeout_secs: u64,

    /// Candidate contact types used when a request names none
    pub default_contact_types: Vec<String>,
}

impl EngineConfig {
    /// Get the per-call timeout as a Duration
    pub fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.call_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_concurrency == 0 {
            return Err("max_concurrency must be greater than 0".to_string());
        }
        if self.call_timeout_secs == 0 {
            return Err("call_timeout_secs must be greater than 0".to_string());
        }
        if self.default_contact_types.is_empty() {
            return Err("default_contact_types must not be empty".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_concurrency: 8,
            call_timeout_secs: 10,
            default_contact_types: vec!["Individual".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let mut config = EngineConfig::default();
        config.max_concurrency = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_contact_types_rejected() {
        let mut config = EngineConfig::default();
        config.default_contact_types.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = EngineConfig::default();
        let toml_str = config.to_toml().unwrap();
        let parsed = EngineConfig::from_toml(&toml_str).unwrap();

        assert_eq!(config.max_concurrency, parsed.max_concurrency);
        assert_eq!(config.call_timeout_secs, parsed.call_timeout_secs);
        assert_eq!(config.default_contact_types, parsed.default_contact_types);
    }
}
