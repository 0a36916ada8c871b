// src/model/cost.rs

use crate::error::{non_negative, positive, ConfigError};
use crate::model::demand::DemandModel;
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Expected single-period holding + lost-sales penalty cost for every state.
///
/// `G(x) = Σ_d π(d) · (h·max(x − d, 0) + p·max(d − x, 0))`
///
/// The cost does not depend on the order placed in the period, so it is
/// computed once and reused by every epoch of the recursion.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodCostTable {
    holding_cost: f64,
    penalty_cost: f64,
    costs: Vec<f64>,
}

impl PeriodCostTable {
    pub fn build(
        holding_cost: f64,
        penalty_cost: f64,
        demand: &DemandModel,
        max_x: usize,
    ) -> Result<Self, ConfigError> {
        let h = non_negative("holding cost", holding_cost)?;
        let p = non_negative("penalty cost", penalty_cost)?;
        let max_x = positive("state truncation", max_x)?;

        #[cfg(not(feature = "parallel"))]
        let costs: Vec<f64> = (0..max_x)
            .map(|x| {
                tracing::trace!(state = x + 1, of = max_x, "pre-calculating period cost");
                expected_period_cost(x, h, p, demand)
            })
            .collect();

        #[cfg(feature = "parallel")]
        let costs: Vec<f64> = (0..max_x)
            .into_par_iter()
            .map(|x| expected_period_cost(x, h, p, demand))
            .collect();

        debug!(states = max_x, "period cost table built");

        Ok(Self {
            holding_cost: h,
            penalty_cost: p,
            costs,
        })
    }

    /// Cost of state `x`. Panics if `x` is outside the state space.
    pub fn cost(&self, x: usize) -> f64 {
        self.costs[x]
    }

    pub fn get(&self, x: usize) -> Option<f64> {
        self.costs.get(x).copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.costs
    }

    pub fn len(&self) -> usize {
        self.costs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    pub fn holding_cost(&self) -> f64 {
        self.holding_cost
    }

    pub fn penalty_cost(&self) -> f64 {
        self.penalty_cost
    }

    /// First state of lowest cost (the newsvendor stocking point).
    pub fn minimizing_state(&self) -> usize {
        let mut best = 0;
        for (x, &c) in self.costs.iter().enumerate() {
            if c < self.costs[best] {
                best = x;
            }
        }
        best
    }
}

fn expected_period_cost(x: usize, h: f64, p: f64, demand: &DemandModel) -> f64 {
    demand
        .outcomes()
        .map(|(d, mass)| {
            let leftover = x.saturating_sub(d) as f64;
            let shortfall = d.saturating_sub(x) as f64;
            mass * (h * leftover + p * shortfall)
        })
        .sum()
}
