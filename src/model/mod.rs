pub mod cost;
pub mod demand;
pub mod pipeline;
