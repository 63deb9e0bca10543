use crate::error::{SimError, SimResult};
use crate::types::{MeterName, METER_MAX, METER_MIN};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// History entries kept when the config does not say otherwise.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MeterConfig {
    pub name:    MeterName,
    /// HUD label, e.g. "İtibar".
    pub label:   String,
    /// Starting value [0, 100].
    pub default: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameConfig {
    /// Maximum number of history entries retained; oldest are dropped.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    pub meters: Vec<MeterConfig>,
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

impl GameConfig {
    /// Load from the data/ directory.
    /// In tests, use GameConfig::default_test().
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let path = format!("{data_dir}/game_config.json");
        let content = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: GameConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configs the engine cannot run with.
    pub fn validate(&self) -> SimResult<()> {
        if self.history_limit == 0 {
            return Err(invalid("history_limit must be at least 1"));
        }
        if self.meters.is_empty() {
            return Err(invalid("at least one meter is required"));
        }
        let mut seen = HashSet::new();
        for meter in &self.meters {
            if meter.name.trim().is_empty() {
                return Err(invalid("meter name must not be empty"));
            }
            if !seen.insert(meter.name.as_str()) {
                return Err(invalid(format!("duplicate meter '{}'", meter.name)));
            }
            if !(METER_MIN..=METER_MAX).contains(&meter.default) {
                return Err(invalid(format!(
                    "meter '{}' default {} outside [{METER_MIN}, {METER_MAX}]",
                    meter.name, meter.default
                )));
            }
        }
        Ok(())
    }

    pub fn has_meter(&self, name: &str) -> bool {
        self.meters.iter().any(|m| m.name == name)
    }

    /// Config with hardcoded defaults for use in unit tests:
    /// a single reputation meter starting at 60.
    pub fn default_test() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            meters: vec![MeterConfig {
                name:    "reputation".into(),
                label:   "İtibar".into(),
                default: 60.0,
            }],
        }
    }
}

fn invalid(reason: impl Into<String>) -> SimError {
    SimError::InvalidConfig { reason: reason.into() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_test_is_valid() {
        GameConfig::default_test().validate().unwrap();
    }

    #[test]
    fn history_limit_defaults_when_absent() {
        let config: GameConfig = serde_json::from_str(
            r#"{ "meters": [{ "name": "reputation", "label": "İtibar", "default": 60 }] }"#,
        )
        .unwrap();
        assert_eq!(config.history_limit, DEFAULT_HISTORY_LIMIT);
    }

    #[test]
    fn rejects_duplicate_and_out_of_range_meters() {
        let mut config = GameConfig::default_test();
        config.meters.push(config.meters[0].clone());
        assert!(matches!(config.validate(), Err(SimError::InvalidConfig { .. })));

        let mut config = GameConfig::default_test();
        config.meters[0].default = 101.0;
        assert!(matches!(config.validate(), Err(SimError::InvalidConfig { .. })));

        let mut config = GameConfig::default_test();
        config.history_limit = 0;
        assert!(matches!(config.validate(), Err(SimError::InvalidConfig { .. })));
    }
}
