//! End-to-end scenarios: solver output, and the solver driving the simulation.

use lost_sales_dp::io::demand::{generate_constant_demand, generate_poisson_demand};
use lost_sales_dp::{
    ConfigError, DemandModel, FixedQuantity, InventorySimulation, OptimalPolicySolver,
    OptimalTablePolicy, OrderRule, PeriodCostTable, SimulationConfig, SolverConfig,
};
use std::sync::Arc;

fn tiny() -> SolverConfig {
    SolverConfig {
        periods: 2,
        holding_cost: 1.0,
        penalty_cost: 9.0,
        discount_factor: 0.95,
        demand_rate: 2.0,
        demand_truncation: 6,
        state_truncation: 6,
    }
}

fn lead_time_one(periods: usize) -> SimulationConfig {
    SimulationConfig {
        periods,
        lead_time: 1,
        underage_cost: 9.0,
        overage_cost: 1.0,
        salvage_cost: 0.0,
        initial_inventory: vec![0, 0],
        log_data: false,
    }
}

#[test]
fn tiny_instance_is_deterministic_and_feasible() {
    let a = OptimalPolicySolver::new(&tiny()).unwrap().solve();
    let b = OptimalPolicySolver::new(&tiny()).unwrap().solve();
    assert_eq!(a.records(), b.records());
    assert_eq!(a.len(), 12);
    for r in a.iter() {
        assert!(r.state + (r.order_quantity as usize) < 6);
    }
    assert_eq!(a.initial_value_function().len(), 6);
}

#[test]
fn zero_demand_never_orders() {
    let config = SolverConfig {
        periods: 4,
        holding_cost: 2.0,
        penalty_cost: 9.0,
        discount_factor: 1.0,
        demand_rate: 0.0,
        demand_truncation: 5,
        state_truncation: 8,
    };
    let table = OptimalPolicySolver::new(&config).unwrap().solve();
    assert!(table.iter().all(|r| r.order_quantity == 0));

    // Stock just sits there and is held in every remaining period.
    for (x, v) in table.initial_value_function().iter().enumerate() {
        let expected = 2.0 * x as f64 * 4.0;
        assert!((v - expected).abs() < 1e-9, "V_1({x}) = {v}, expected {expected}");
    }
    for t in 1..=4 {
        let remaining = (4 - t + 1) as f64;
        assert!((table.expected_cost(t, 3).unwrap() - 2.0 * 3.0 * remaining).abs() < 1e-9);
    }
}

#[test]
fn equal_costs_keep_the_smallest_order() {
    // No holding or penalty cost: every order quantity costs exactly zero.
    let demand = DemandModel::poisson(2.0, 6).unwrap();
    let costs = PeriodCostTable::build(0.0, 0.0, &demand, 5).unwrap();
    let table = OptimalPolicySolver::from_parts(3, 0.9, demand, costs)
        .unwrap()
        .solve();
    assert!(table.iter().all(|r| r.order_quantity == 0 && r.expected_cost == 0.0));
}

#[test]
fn malformed_bounds_fail_before_solving() {
    let err = OptimalPolicySolver::new(&SolverConfig {
        state_truncation: 0,
        ..tiny()
    })
    .unwrap_err();
    assert_eq!(err, ConfigError::NonPositive { name: "state truncation" });
}

#[test]
fn zero_demand_zero_orders_costs_nothing_but_the_terminal_term() {
    let mut sim = InventorySimulation::new(lead_time_one(10), FixedQuantity::new(0).into()).unwrap();
    sim.run(&generate_constant_demand(10, 0)).unwrap();

    assert!(sim.period_costs()[..10].iter().all(|&c| c == 0.0));
    assert!(sim.states().iter().all(|p| p.on_hand() >= 0));
    assert_eq!(sim.total_cost(), 0.0);
}

#[test]
fn optimal_rule_needs_lead_time_one() {
    let table = Arc::new(OptimalPolicySolver::new(&tiny()).unwrap().solve());
    let config = SimulationConfig {
        lead_time: 2,
        initial_inventory: vec![0, 0, 0],
        ..lead_time_one(2)
    };
    let err = InventorySimulation::new(config, OptimalTablePolicy::new(table).into()).unwrap_err();
    assert_eq!(err, ConfigError::LeadTimeMismatch(2));
}

#[test]
fn simulated_optimal_cost_matches_the_value_function() {
    let periods = 5;
    let config = SolverConfig {
        periods,
        holding_cost: 1.0,
        penalty_cost: 9.0,
        discount_factor: 1.0,
        demand_rate: 2.0,
        demand_truncation: 16,
        state_truncation: 12,
    };
    let table = Arc::new(OptimalPolicySolver::new(&config).unwrap().solve());
    let expected = table.expected_cost(1, 0).unwrap();

    let rule: OrderRule = OptimalTablePolicy::new(table).into();
    let mut sim = InventorySimulation::new(lead_time_one(periods), rule).unwrap();

    let runs = 4_000;
    let mut sum = 0.0;
    for seed in 0..runs {
        sim.run(&generate_poisson_demand(periods, 2.0, seed)).unwrap();
        // The recursion has no terminal cost; drop the horizon adjustment.
        sum += sim.period_costs()[..periods].iter().sum::<f64>();
    }
    let mean = sum / runs as f64;
    assert!(
        (mean - expected).abs() < 0.05 * expected,
        "simulated {mean}, value function {expected}"
    );
}

#[test]
fn optimal_rule_beats_never_ordering() {
    let config = SolverConfig {
        periods: 30,
        holding_cost: 1.0,
        penalty_cost: 9.0,
        discount_factor: 1.0,
        demand_rate: 2.0,
        demand_truncation: 16,
        state_truncation: 12,
    };
    let table = Arc::new(OptimalPolicySolver::new(&config).unwrap().solve());
    let demand = generate_poisson_demand(30, 2.0, 99);

    let mut optimal =
        InventorySimulation::new(lead_time_one(30), OptimalTablePolicy::new(table).into()).unwrap();
    let mut idle =
        InventorySimulation::new(lead_time_one(30), FixedQuantity::new(0).into()).unwrap();

    assert!(optimal.run(&demand).unwrap() < idle.run(&demand).unwrap());
}
