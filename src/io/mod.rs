pub mod demand;
pub mod experiment;
pub mod reporting;
