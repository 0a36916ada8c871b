pub mod implementations;
pub mod optimization;
pub mod policy_table;
pub mod solver;
pub mod traits;
