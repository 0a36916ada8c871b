// src/strategy/traits.rs

use crate::model::pipeline::Pipeline;
use std::fmt::Debug;

/// Decides how much to order at the start of a period.
///
/// We require `Send` + `Sync` so policies can be shared across parallel
/// simulation runs.
pub trait OrderPolicy: Debug + Send + Sync {
    /// Order quantity for `period` (0-based) given the current pipeline.
    fn calculate_order(&self, period: usize, pipeline: &Pipeline) -> u32;
}
