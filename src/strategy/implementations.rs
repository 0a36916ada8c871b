// src/strategy/implementations.rs

use crate::model::pipeline::Pipeline;
use crate::strategy::optimization::newsvendor_base_stock;
use crate::strategy::policy_table::PolicyTable;
use crate::strategy::traits::OrderPolicy;
use std::sync::Arc;

/// Gap between a target level and the inventory position, floored at zero.
fn order_up_to(level: u32, position: i64) -> u32 {
    let gap = i64::from(level) - position;
    if gap < 0 {
        0
    } else {
        gap as u32
    }
}

// =========================================================================
// 1. Constant Base Stock Policy ("Order-Up-To")
// =========================================================================

/// Raises the inventory position (on-hand plus in transit) to a fixed level.
/// If we are already above it, we order 0.
#[derive(Debug, Clone)]
pub struct ConstantBaseStock {
    level: u32,
}

impl ConstantBaseStock {
    pub fn new(level: u32) -> Self {
        Self { level }
    }

    /// Level from the Poisson newsvendor quantile over lead time plus one period.
    pub fn with_newsvendor_target(
        penalty_cost: f64,
        holding_cost: f64,
        demand_rate: f64,
        lead_time: usize,
    ) -> Self {
        Self::new(newsvendor_base_stock(
            penalty_cost,
            holding_cost,
            demand_rate,
            lead_time,
        ))
    }

    pub fn level(&self) -> u32 {
        self.level
    }
}

impl OrderPolicy for ConstantBaseStock {
    fn calculate_order(&self, _period: usize, pipeline: &Pipeline) -> u32 {
        order_up_to(self.level, pipeline.position())
    }
}

// =========================================================================
// 2. State-Dependent Base Stock Policy
// =========================================================================

/// Order-up-to level picked by the current on-hand stock.
///
/// `levels[k]` applies when `k` units are on hand; the last entry covers
/// everything above.
#[derive(Debug, Clone)]
pub struct StateDependentBaseStock {
    levels: Vec<u32>,
}

impl StateDependentBaseStock {
    pub fn new(levels: Vec<u32>) -> Self {
        Self { levels }
    }

    fn level_for(&self, on_hand: i64) -> u32 {
        let Some(last) = self.levels.len().checked_sub(1) else {
            return 0;
        };
        let index = (on_hand.max(0) as usize).min(last);
        self.levels[index]
    }
}

impl OrderPolicy for StateDependentBaseStock {
    fn calculate_order(&self, _period: usize, pipeline: &Pipeline) -> u32 {
        order_up_to(self.level_for(pipeline.on_hand()), pipeline.position())
    }
}

// =========================================================================
// 3. Fixed Quantity Policy
// =========================================================================

/// Orders the same amount every period regardless of stock.
#[derive(Debug, Clone)]
pub struct FixedQuantity {
    quantity: u32,
}

impl FixedQuantity {
    pub fn new(quantity: u32) -> Self {
        Self { quantity }
    }
}

impl OrderPolicy for FixedQuantity {
    fn calculate_order(&self, _period: usize, _pipeline: &Pipeline) -> u32 {
        self.quantity
    }
}

// =========================================================================
// 4. Optimal (Table-Driven) Policy
// =========================================================================

/// Replays a solved [`PolicyTable`].
///
/// Simulation period `t` (0-based) is decision epoch `t + 1` of the table.
/// On-hand stock above the truncated state space is looked up at the top
/// state. Periods past the solved horizon order nothing.
#[derive(Debug, Clone)]
pub struct OptimalTablePolicy {
    table: Arc<PolicyTable>,
}

impl OptimalTablePolicy {
    pub fn new(table: Arc<PolicyTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &PolicyTable {
        &self.table
    }
}

impl OrderPolicy for OptimalTablePolicy {
    fn calculate_order(&self, period: usize, pipeline: &Pipeline) -> u32 {
        let top = self.table.state_truncation().saturating_sub(1);
        let state = (pipeline.on_hand().max(0) as usize).min(top);
        self.table.order_quantity(period + 1, state).unwrap_or(0)
    }
}

// =========================================================================
// Closed set of rules used by the simulation
// =========================================================================

#[derive(Debug, Clone)]
pub enum OrderRule {
    ConstantBaseStock(ConstantBaseStock),
    StateDependentBaseStock(StateDependentBaseStock),
    FixedQuantity(FixedQuantity),
    Optimal(OptimalTablePolicy),
}

impl OrderRule {
    pub fn label(&self) -> &'static str {
        match self {
            OrderRule::ConstantBaseStock(_) => "CBS",
            OrderRule::StateDependentBaseStock(_) => "SDBS",
            OrderRule::FixedQuantity(_) => "FQ",
            OrderRule::Optimal(_) => "OPT",
        }
    }
}

impl OrderPolicy for OrderRule {
    fn calculate_order(&self, period: usize, pipeline: &Pipeline) -> u32 {
        match self {
            OrderRule::ConstantBaseStock(rule) => rule.calculate_order(period, pipeline),
            OrderRule::StateDependentBaseStock(rule) => rule.calculate_order(period, pipeline),
            OrderRule::FixedQuantity(rule) => rule.calculate_order(period, pipeline),
            OrderRule::Optimal(rule) => rule.calculate_order(period, pipeline),
        }
    }
}

impl From<ConstantBaseStock> for OrderRule {
    fn from(rule: ConstantBaseStock) -> Self {
        OrderRule::ConstantBaseStock(rule)
    }
}

impl From<StateDependentBaseStock> for OrderRule {
    fn from(rule: StateDependentBaseStock) -> Self {
        OrderRule::StateDependentBaseStock(rule)
    }
}

impl From<FixedQuantity> for OrderRule {
    fn from(rule: FixedQuantity) -> Self {
        OrderRule::FixedQuantity(rule)
    }
}

impl From<OptimalTablePolicy> for OrderRule {
    fn from(rule: OptimalTablePolicy) -> Self {
        OrderRule::Optimal(rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::solver::{OptimalPolicySolver, SolverConfig};

    #[test]
    fn constant_base_stock_counts_pipeline() {
        let rule = ConstantBaseStock::new(6);
        assert_eq!(rule.calculate_order(0, &Pipeline::from_slots(vec![2, 1])), 3);
        assert_eq!(rule.calculate_order(0, &Pipeline::from_slots(vec![7, 0])), 0);
    }

    #[test]
    fn state_dependent_levels_follow_on_hand() {
        let rule = StateDependentBaseStock::new(vec![5, 5, 4]);
        assert_eq!(rule.calculate_order(0, &Pipeline::from_slots(vec![0, 0])), 5);
        assert_eq!(rule.calculate_order(0, &Pipeline::from_slots(vec![2, 1])), 1);
        // Past the end of the table the last level applies.
        assert_eq!(rule.calculate_order(0, &Pipeline::from_slots(vec![3, 0])), 1);
        assert_eq!(
            StateDependentBaseStock::new(Vec::new()).calculate_order(0, &Pipeline::new(1)),
            0
        );
    }

    #[test]
    fn fixed_quantity_ignores_state() {
        let rule = OrderRule::from(FixedQuantity::new(5));
        assert_eq!(rule.calculate_order(3, &Pipeline::from_slots(vec![40, 0])), 5);
        assert_eq!(rule.label(), "FQ");
    }

    #[test]
    fn optimal_rule_reads_the_solved_table() {
        let config = SolverConfig {
            periods: 3,
            holding_cost: 1.0,
            penalty_cost: 9.0,
            discount_factor: 0.95,
            demand_rate: 2.0,
            demand_truncation: 10,
            state_truncation: 8,
        };
        let table = Arc::new(OptimalPolicySolver::new(&config).unwrap().solve());
        let rule = OrderRule::from(OptimalTablePolicy::new(table.clone()));

        for t in 0..3 {
            for x in 0..8 {
                let pipeline = Pipeline::from_slots(vec![x as i64, 0]);
                assert_eq!(
                    rule.calculate_order(t, &pipeline),
                    table.order_quantity(t + 1, x).unwrap()
                );
            }
        }
        let overflow = Pipeline::from_slots(vec![50, 0]);
        assert_eq!(rule.calculate_order(0, &overflow), table.order_quantity(1, 7).unwrap());
        assert_eq!(rule.calculate_order(3, &Pipeline::new(1)), 0);
    }

    #[test]
    fn newsvendor_target_uses_lead_time() {
        assert_eq!(ConstantBaseStock::with_newsvendor_target(9.0, 1.0, 2.0, 1).level(), 7);
    }
}
