// src/simulation/config.rs

use crate::error::{non_negative, positive, ConfigError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub periods: usize,
    /// Periods between placing an order and its arrival on-hand.
    pub lead_time: usize,
    /// Per-unit lost-sales penalty.
    pub underage_cost: f64,
    /// Per-unit holding cost on stock left after demand.
    pub overage_cost: f64,
    /// Per-unit value recovered from stock left at the horizon.
    pub salvage_cost: f64,
    /// Starting pipeline, slot 0 on-hand. Must have `lead_time + 1` entries.
    pub initial_inventory: Vec<i64>,
    /// Keep the per-period event log.
    pub log_data: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            periods: 52,
            lead_time: 1,
            underage_cost: 9.0,
            overage_cost: 1.0,
            salvage_cost: 0.0,
            initial_inventory: vec![0, 0],
            log_data: true,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("simulation periods", self.periods)?;
        non_negative("underage cost", self.underage_cost)?;
        non_negative("overage cost", self.overage_cost)?;
        non_negative("salvage cost", self.salvage_cost)?;

        let expected = self.lead_time + 1;
        if self.initial_inventory.len() != expected {
            return Err(ConfigError::InitialInventoryLength {
                lead_time: self.lead_time,
                expected,
                got: self.initial_inventory.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert_eq!(SimulationConfig::default().validate(), Ok(()));
    }

    #[test]
    fn pipeline_length_must_match_lead_time() {
        let config = SimulationConfig {
            lead_time: 2,
            ..SimulationConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InitialInventoryLength {
                lead_time: 2,
                expected: 3,
                got: 2
            })
        );
    }

    #[test]
    fn missing_json_fields_fall_back_to_defaults() {
        let config: SimulationConfig = serde_json::from_str(r#"{"periods": 10}"#).unwrap();
        assert_eq!(config.periods, 10);
        assert_eq!(config.lead_time, 1);
    }
}
