//! Optimal ordering for a periodic-review, lost-sales inventory system.
//!
//! [`OptimalPolicySolver`] computes the exact finite-horizon policy for lead
//! time 1 by backward induction over a truncated state space.
//! [`InventorySimulation`] replays a system with any lead time under one of
//! the [`OrderRule`]s, including the solved policy table.

pub mod error;
pub mod io;
pub mod model;
pub mod simulation;
pub mod strategy;

pub use error::{ConfigError, Error, Result};
pub use model::cost::PeriodCostTable;
pub use model::demand::DemandModel;
pub use model::pipeline::Pipeline;
pub use simulation::config::SimulationConfig;
pub use simulation::engine::{InventorySimulation, PeriodLog};
pub use strategy::implementations::{
    ConstantBaseStock, FixedQuantity, OptimalTablePolicy, OrderRule, StateDependentBaseStock,
};
pub use strategy::policy_table::{PolicyRecord, PolicyTable};
pub use strategy::solver::{OptimalPolicySolver, SolverConfig};
pub use strategy::traits::OrderPolicy;
