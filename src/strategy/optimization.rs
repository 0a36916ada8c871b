// src/strategy/optimization.rs

//! Newsvendor helpers for heuristic base-stock levels.

use statrs::distribution::{DiscreteCDF, Poisson};

/// Calculates the Critical Ratio (target service level).
///
/// Formula: CR = PenaltyCost / (PenaltyCost + HoldingCost)
pub fn calculate_critical_ratio(penalty_cost: f64, holding_cost: f64) -> f64 {
    if penalty_cost + holding_cost == 0.0 {
        return 0.0;
    }
    penalty_cost / (penalty_cost + holding_cost)
}

/// Order-up-to level covering Poisson demand over the risk horizon.
///
/// The risk horizon is the lead time plus one review period, so demand over
/// it is Poisson with rate `(L + 1)·λ`. Returns the smallest `S` with
/// `P(D ≤ S) ≥ CR`.
pub fn newsvendor_base_stock(
    penalty_cost: f64,
    holding_cost: f64,
    rate: f64,
    lead_time: usize,
) -> u32 {
    let critical_ratio = calculate_critical_ratio(penalty_cost, holding_cost);
    let horizon_rate = rate * (lead_time + 1) as f64;

    let dist = match Poisson::new(horizon_rate) {
        Ok(dist) => dist,
        // Zero (or invalid) rate: nothing to cover.
        Err(_) => return 0,
    };

    // The CDF reaches any ratio < 1 well before the mean plus a wide margin.
    let cap = (horizon_rate + 20.0 * horizon_rate.sqrt() + 20.0).ceil() as u64;
    (0..=cap)
        .find(|&s| dist.cdf(s) >= critical_ratio)
        .unwrap_or(cap) as u32
}
