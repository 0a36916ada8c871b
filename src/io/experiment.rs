// src/io/experiment.rs

use crate::error::Result;
use crate::simulation::config::SimulationConfig;
use crate::strategy::solver::SolverConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A full run: the DP instance, the simulated system, and the demand seed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    pub solver: SolverConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub demand_seed: u64,
}

impl ExperimentConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.solver.validate()?;
        config.simulation.validate()?;
        Ok(config)
    }
}

/// Reads and validates an experiment file.
pub fn load_experiment<P: AsRef<Path>>(path: P) -> Result<ExperimentConfig> {
    let text = std::fs::read_to_string(path)?;
    ExperimentConfig::from_json(&text)
}
