// src/io/demand.rs

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Poisson};

/// Generates a demand schedule where every period has the exact same demand.
pub fn generate_constant_demand(periods: usize, value: u32) -> Vec<u32> {
    vec![value; periods]
}

/// Draws i.i.d. Poisson(`rate`) demand, reproducible from `seed`.
///
/// A zero or invalid rate yields all-zero demand.
pub fn generate_poisson_demand(periods: usize, rate: f64, seed: u64) -> Vec<u32> {
    let poisson = match Poisson::new(rate) {
        Ok(poisson) => poisson,
        Err(_) => return vec![0; periods],
    };
    let mut rng = StdRng::seed_from_u64(seed);

    (0..periods)
        .map(|_| {
            let draw: f64 = poisson.sample(&mut rng);
            draw as u32
        })
        .collect()
}
