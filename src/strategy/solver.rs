// src/strategy/solver.rs

//! Finite-horizon backward induction for the lost-sales system with lead time 1.
//!
//! The state is the on-hand stock at the start of a period, which already
//! includes the order placed one period earlier. An order placed now only
//! shapes the next state:
//!
//! `x' = max(x − d, 0) + q`
//!
//! so the immediate cost `G(x)` is decision-independent and
//!
//! `V_t(x) = G(x) + min_q γ · Σ_d π(d) · V_{t+1}(max(x − d, 0) + q)`
//!
//! with `V_{T+1} ≡ 0` (no salvage, no terminal cost). Order quantities are
//! capped at `max_x − x − 1` so every successor stays inside the truncated
//! state space.

use crate::error::{non_negative, positive, ConfigError};
use crate::model::cost::PeriodCostTable;
use crate::model::demand::DemandModel;
use crate::strategy::policy_table::{PolicyRecord, PolicyTable};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Demand mass lost to truncation above which construction logs a warning.
pub const TRUNCATION_WARN_THRESHOLD: f64 = 1e-6;

/// Parameters of the dynamic program. All are required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Horizon length `T`.
    pub periods: usize,
    pub holding_cost: f64,
    /// Per-unit cost of a lost sale.
    pub penalty_cost: f64,
    /// γ in (0, 1].
    pub discount_factor: f64,
    /// Poisson rate λ of per-period demand.
    pub demand_rate: f64,
    /// Demand support is `0..demand_truncation`.
    pub demand_truncation: usize,
    /// State space is `0..state_truncation`.
    pub state_truncation: usize,
}

impl SolverConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("horizon", self.periods)?;
        positive("demand truncation", self.demand_truncation)?;
        positive("state truncation", self.state_truncation)?;
        non_negative("holding cost", self.holding_cost)?;
        non_negative("penalty cost", self.penalty_cost)?;
        non_negative("demand rate", self.demand_rate)?;
        validate_discount(self.discount_factor)?;
        Ok(())
    }
}

fn validate_discount(gamma: f64) -> Result<f64, ConfigError> {
    if gamma > 0.0 && gamma <= 1.0 {
        Ok(gamma)
    } else {
        Err(ConfigError::DiscountOutOfRange(gamma))
    }
}

#[derive(Debug, Clone)]
pub struct OptimalPolicySolver {
    periods: usize,
    discount_factor: f64,
    demand: DemandModel,
    costs: PeriodCostTable,
}

impl OptimalPolicySolver {
    /// Validates `config` and precomputes the demand masses and period costs.
    pub fn new(config: &SolverConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let demand = DemandModel::poisson(config.demand_rate, config.demand_truncation)?;
        let lost = demand.truncated_mass();
        if lost > TRUNCATION_WARN_THRESHOLD {
            warn!(
                lost_mass = lost,
                demand_truncation = config.demand_truncation,
                rate = config.demand_rate,
                "demand truncation discards noticeable probability mass"
            );
        }

        let costs = PeriodCostTable::build(
            config.holding_cost,
            config.penalty_cost,
            &demand,
            config.state_truncation,
        )?;

        Self::from_parts(config.periods, config.discount_factor, demand, costs)
    }

    /// Solver over an arbitrary demand model and cost table.
    pub fn from_parts(
        periods: usize,
        discount_factor: f64,
        demand: DemandModel,
        costs: PeriodCostTable,
    ) -> Result<Self, ConfigError> {
        let periods = positive("horizon", periods)?;
        let discount_factor = validate_discount(discount_factor)?;
        Ok(Self {
            periods,
            discount_factor,
            demand,
            costs,
        })
    }

    pub fn periods(&self) -> usize {
        self.periods
    }

    pub fn discount_factor(&self) -> f64 {
        self.discount_factor
    }

    pub fn demand(&self) -> &DemandModel {
        &self.demand
    }

    pub fn period_costs(&self) -> &PeriodCostTable {
        &self.costs
    }

    pub fn state_truncation(&self) -> usize {
        self.costs.len()
    }

    /// Runs the recursion from period `T` down to 1.
    pub fn solve(&self) -> PolicyTable {
        let max_x = self.state_truncation();
        info!(
            periods = self.periods,
            states = max_x,
            demand_support = self.demand.max_demand(),
            "starting backward induction"
        );

        // `next` holds V_{t+1}, `current` receives V_t; swapped after each epoch.
        let mut next = vec![0.0; max_x];
        let mut current = vec![0.0; max_x];
        let mut records = Vec::with_capacity(self.periods * max_x);

        for period in (1..=self.periods).rev() {
            let decisions = self.evaluate_epoch(&next);
            for (state, (order_quantity, expected_cost)) in decisions.into_iter().enumerate() {
                current[state] = expected_cost;
                records.push(PolicyRecord {
                    period,
                    state,
                    order_quantity,
                    expected_cost,
                });
            }
            std::mem::swap(&mut current, &mut next);
            debug!(period, "epoch complete");
        }

        let table = PolicyTable::new(self.periods, max_x, records);
        info!(
            records = table.len(),
            boundary_hits = table.boundary_hits(),
            "policy table complete"
        );
        table
    }

    /// Best `(q*, V_t(x))` for every state, in ascending state order.
    #[cfg(not(feature = "parallel"))]
    fn evaluate_epoch(&self, next: &[f64]) -> Vec<(u32, f64)> {
        (0..next.len())
            .map(|x| self.evaluate_state(x, next))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn evaluate_epoch(&self, next: &[f64]) -> Vec<(u32, f64)> {
        (0..next.len())
            .into_par_iter()
            .map(|x| self.evaluate_state(x, next))
            .collect()
    }

    fn evaluate_state(&self, x: usize, next: &[f64]) -> (u32, f64) {
        let immediate = self.costs.cost(x);
        let max_q = next.len() - x;
        let totals =
            (0..max_q).map(|q| immediate + self.discount_factor * self.future_cost(x, q, next));
        let (q, total) = select_first_minimum(totals);
        (q as u32, total)
    }

    /// `Σ_d π(d) · V_{t+1}(max(x − d, 0) + q)`, undiscounted.
    fn future_cost(&self, x: usize, q: usize, next: &[f64]) -> f64 {
        self.demand
            .outcomes()
            .map(|(d, mass)| mass * next[x.saturating_sub(d) + q])
            .sum()
    }
}

/// Index and value of the smallest cost. Ties keep the earliest index, so the
/// smallest order quantity wins.
pub fn select_first_minimum<I>(costs: I) -> (usize, f64)
where
    I: IntoIterator<Item = f64>,
{
    let mut best = (0, f64::INFINITY);
    for (i, cost) in costs.into_iter().enumerate() {
        if cost < best.1 {
            best = (i, cost);
        }
    }
    best
}
