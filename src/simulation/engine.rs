// src/simulation/engine.rs

use crate::error::{ConfigError, Error, Result};
use crate::model::pipeline::Pipeline;
use crate::simulation::config::SimulationConfig;
use crate::strategy::implementations::OrderRule;
use crate::strategy::traits::OrderPolicy;
use tracing::{debug, info};

/// Everything that happened in one period. The final row of a run is the
/// terminal adjustment, with zero order and demand.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodLog {
    /// 1-based period number.
    pub period: usize,
    pub starting_inventory: Pipeline,
    pub order: u32,
    pub post_order: Option<Pipeline>,
    pub demand: u32,
    /// On-hand after demand; negative values are lost sales.
    pub post_demand: i64,
    pub post_delivery: Option<Pipeline>,
    pub period_cost: f64,
}

/// Lost-sales inventory system with a fixed lead time, driven by an [`OrderRule`].
#[derive(Debug)]
pub struct InventorySimulation {
    config: SimulationConfig,
    rule: OrderRule,

    // states[t] is the pipeline at the start of period t, for t in 0..=T.
    states: Vec<Pipeline>,
    period_costs: Vec<f64>,
    log: Vec<PeriodLog>,
}

impl InventorySimulation {
    pub fn new(config: SimulationConfig, rule: OrderRule) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        if matches!(rule, OrderRule::Optimal(_)) && config.lead_time != 1 {
            return Err(ConfigError::LeadTimeMismatch(config.lead_time));
        }

        let mut sim = Self {
            config,
            rule,
            states: Vec::new(),
            period_costs: Vec::new(),
            log: Vec::new(),
        };
        sim.reset();
        Ok(sim)
    }

    /// Back to the initial inventory with no recorded costs.
    pub fn reset(&mut self) {
        self.states.clear();
        self.states
            .push(Pipeline::from_slots(self.config.initial_inventory.clone()));
        self.period_costs.clear();
        self.log.clear();
    }

    /// Runs the full horizon against `demand` and returns the total cost.
    ///
    /// Each call starts from the initial inventory.
    pub fn run(&mut self, demand: &[u32]) -> Result<f64> {
        let periods = self.config.periods;
        if demand.len() < periods {
            return Err(Error::DemandLength {
                expected: periods,
                got: demand.len(),
            });
        }
        self.reset();

        for (t, &d) in demand.iter().enumerate().take(periods) {
            self.step(t, d);
        }
        self.settle_horizon();

        let total = self.total_cost();
        info!(
            rule = self.rule.label(),
            periods,
            total_cost = total,
            "simulation complete"
        );
        Ok(total)
    }

    fn step(&mut self, t: usize, demand: u32) {
        let start = self.states[t].clone();

        // 1. Stocking decision, added to the end of the pipeline.
        let order = self.rule.calculate_order(t, &start);
        let mut working = start.clone();
        working.place_order(order);
        let post_order = working.clone();

        // 2. Demand hits on-hand stock; a negative level is the shortfall.
        let post_demand = working.apply_demand(demand);

        // 3. Underage on the shortfall, overage on what is left.
        let cost = if post_demand <= 0 {
            (post_demand as f64 * self.config.underage_cost).abs()
        } else {
            post_demand as f64 * self.config.overage_cost
        };
        self.period_costs.push(cost);

        // 4. Lost sales vanish, the pipeline moves one slot forward.
        let next = working.advance();

        debug!(
            period = t,
            order,
            demand,
            post_demand,
            cost,
            "period simulated"
        );

        if self.config.log_data {
            self.log.push(PeriodLog {
                period: t + 1,
                starting_inventory: start,
                order,
                post_order: Some(post_order),
                demand,
                post_demand,
                post_delivery: Some(next.clone()),
                period_cost: cost,
            });
        }
        self.states.push(next);
    }

    /// Holding on stock still in transit over the last `L` periods, minus
    /// the salvage value of everything left at the horizon.
    fn settle_horizon(&mut self) {
        let periods = self.config.periods;
        let lead_time = self.config.lead_time;
        let last = &self.states[periods];

        let in_transit_holding: i64 = last.slots()[..lead_time]
            .iter()
            .enumerate()
            .map(|(i, &units)| units * (lead_time - i) as i64)
            .sum();
        let cost = self.config.overage_cost * in_transit_holding as f64
            - self.config.salvage_cost * last.position() as f64;
        self.period_costs.push(cost);

        if self.config.log_data {
            self.log.push(PeriodLog {
                period: periods + 1,
                starting_inventory: last.clone(),
                order: 0,
                post_order: None,
                demand: 0,
                post_demand: 0,
                post_delivery: None,
                period_cost: cost,
            });
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn rule(&self) -> &OrderRule {
        &self.rule
    }

    /// Pipelines at the start of each period, the last one being the horizon.
    pub fn states(&self) -> &[Pipeline] {
        &self.states
    }

    /// Realised cost per period followed by the terminal adjustment.
    pub fn period_costs(&self) -> &[f64] {
        &self.period_costs
    }

    pub fn total_cost(&self) -> f64 {
        self.period_costs.iter().sum()
    }

    pub fn log(&self) -> &[PeriodLog] {
        &self.log
    }
}
