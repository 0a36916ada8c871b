// src/strategy/policy_table.rs

use serde::Serialize;

/// One optimal decision produced by the backward recursion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PolicyRecord {
    pub period: usize,
    pub state: usize,
    pub order_quantity: u32,
    /// Optimal expected discounted cost from this period and state onward.
    pub expected_cost: f64,
}

/// Output of [`OptimalPolicySolver::solve`](crate::strategy::solver::OptimalPolicySolver::solve).
///
/// Records are stored in the order the recursion visits them: period
/// descending, then state ascending. Every `(period, state)` pair with
/// `period ∈ 1..=T` and `state ∈ 0..max_x` appears exactly once.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyTable {
    periods: usize,
    state_truncation: usize,
    records: Vec<PolicyRecord>,
}

impl PolicyTable {
    pub(crate) fn new(periods: usize, state_truncation: usize, records: Vec<PolicyRecord>) -> Self {
        debug_assert_eq!(records.len(), periods * state_truncation);
        Self {
            periods,
            state_truncation,
            records,
        }
    }

    pub fn records(&self) -> &[PolicyRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &PolicyRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn periods(&self) -> usize {
        self.periods
    }

    pub fn state_truncation(&self) -> usize {
        self.state_truncation
    }

    fn epoch(&self, period: usize) -> Option<&[PolicyRecord]> {
        if period == 0 || period > self.periods {
            return None;
        }
        let start = (self.periods - period) * self.state_truncation;
        Some(&self.records[start..start + self.state_truncation])
    }

    fn record(&self, period: usize, state: usize) -> Option<&PolicyRecord> {
        self.epoch(period)?.get(state)
    }

    pub fn order_quantity(&self, period: usize, state: usize) -> Option<u32> {
        self.record(period, state).map(|r| r.order_quantity)
    }

    pub fn expected_cost(&self, period: usize, state: usize) -> Option<f64> {
        self.record(period, state).map(|r| r.expected_cost)
    }

    /// `V_t` over all states, or `None` outside `1..=T`.
    pub fn value_function(&self, period: usize) -> Option<Vec<f64>> {
        self.epoch(period)
            .map(|epoch| epoch.iter().map(|r| r.expected_cost).collect())
    }

    /// `V_1`, the expected discounted cost of the whole horizon per starting state.
    pub fn initial_value_function(&self) -> Vec<f64> {
        self.value_function(1).unwrap_or_default()
    }

    /// Number of positive orders that fill the truncated state space to its
    /// top state. A large count means `max_x` is probably cutting off better orders.
    pub fn boundary_hits(&self) -> usize {
        self.records
            .iter()
            .filter(|r| {
                r.order_quantity > 0
                    && r.state + r.order_quantity as usize + 1 == self.state_truncation
            })
            .count()
    }
}
