use lost_sales_dp::io::{demand, experiment, reporting};
use lost_sales_dp::io::experiment::ExperimentConfig;
use lost_sales_dp::{
    ConstantBaseStock, FixedQuantity, InventorySimulation, OptimalPolicySolver, OptimalTablePolicy,
    OrderRule, SimulationConfig, SolverConfig, StateDependentBaseStock,
};
use std::env;
use std::process::ExitCode;
use std::sync::Arc;

fn default_experiment() -> ExperimentConfig {
    ExperimentConfig {
        solver: SolverConfig {
            periods: 20,
            holding_cost: 1.0,
            penalty_cost: 9.0,
            discount_factor: 0.95,
            demand_rate: 3.0,
            demand_truncation: 20,
            state_truncation: 25,
        },
        simulation: SimulationConfig {
            periods: 20,
            lead_time: 1,
            underage_cost: 9.0,
            overage_cost: 1.0,
            salvage_cost: 0.0,
            initial_inventory: vec![3, 0],
            log_data: true,
        },
        demand_seed: 42,
    }
}

fn run(config: ExperimentConfig) -> lost_sales_dp::Result<()> {
    // 1. SOLVE THE DYNAMIC PROGRAM
    let solver = OptimalPolicySolver::new(&config.solver)?;
    println!(
        "Demand mass lost to truncation: {:.3e}",
        solver.demand().truncated_mass()
    );
    let table = Arc::new(solver.solve());
    reporting::write_policy_table("optimal_policy.csv", &table)?;

    // 2. GENERATE DEMAND
    let sim_config = config.simulation;
    let demand_schedule = demand::generate_poisson_demand(
        sim_config.periods,
        config.solver.demand_rate,
        config.demand_seed,
    );
    println!("Demand Schedule generated: {:?}", demand_schedule);

    // 3. DEFINE THE ORDERING RULES TO COMPARE
    let newsvendor = ConstantBaseStock::with_newsvendor_target(
        sim_config.underage_cost,
        sim_config.overage_cost,
        config.solver.demand_rate,
        sim_config.lead_time,
    );
    let level = newsvendor.level();
    let mut rules: Vec<OrderRule> = vec![
        newsvendor.into(),
        // Hold back one unit when the shelf is already well stocked.
        StateDependentBaseStock::new(vec![level, level, level, level.saturating_sub(1)]).into(),
        FixedQuantity::new(config.solver.demand_rate.round() as u32).into(),
    ];
    if sim_config.lead_time == 1 {
        rules.push(OptimalTablePolicy::new(table.clone()).into());
    }

    // 4. RUN ONE SIMULATION PER RULE ON THE SAME DEMAND
    println!("\n=== Cost Analysis ===");
    for rule in rules {
        let label = rule.label();
        let mut sim = InventorySimulation::new(sim_config.clone(), rule)?;
        let total = sim.run(&demand_schedule)?;
        println!("{}: ${:.2}", label, total);
        if sim_config.log_data {
            reporting::write_simulation_log(format!("simulation_{}.csv", label), sim.log())?;
        }
    }

    println!("\nOptimal expected cost from each starting state (period 1):");
    for (x, v) in table.initial_value_function().iter().enumerate() {
        println!("  x = {:>2}: {:.2}", x, v);
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("lost_sales_dp=info")),
        )
        .init();

    println!("=== Lost-Sales Inventory: Optimal Policy vs Heuristics ===");

    let config = match env::args().nth(1) {
        Some(path) => match experiment::load_experiment(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading '{}': {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => default_experiment(),
    };

    match run(config) {
        Ok(()) => {
            println!("\nSimulation Complete.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
