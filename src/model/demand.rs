// src/model/demand.rs

use crate::error::{non_negative, positive, ConfigError};
use statrs::distribution::{Discrete, Poisson};

/// Masses may overshoot 1 by this much through floating-point noise.
const MASS_TOLERANCE: f64 = 1e-9;

/// Truncated discrete demand distribution for a single period.
///
/// The support is `0..max_d`. Mass beyond `max_d - 1` is discarded, not
/// renormalised: callers pick `max_d` large enough that
/// [`truncated_mass`](Self::truncated_mass) is negligible. Nothing here
/// enforces that.
#[derive(Debug, Clone, PartialEq)]
pub struct DemandModel {
    rate: Option<f64>,
    pmf: Vec<f64>,
}

impl DemandModel {
    /// Poisson(`rate`) demand evaluated point-wise on `0..max_d`.
    ///
    /// A zero rate puts all mass on zero demand.
    pub fn poisson(rate: f64, max_d: usize) -> Result<Self, ConfigError> {
        let rate = non_negative("demand rate", rate)?;
        let max_d = positive("demand truncation", max_d)?;

        let pmf = if rate == 0.0 {
            let mut pmf = vec![0.0; max_d];
            pmf[0] = 1.0;
            pmf
        } else {
            let dist = Poisson::new(rate).map_err(|e| ConfigError::Distribution(e.to_string()))?;
            (0..max_d as u64).map(|d| dist.pmf(d)).collect()
        };

        Ok(Self {
            rate: Some(rate),
            pmf,
        })
    }

    /// Demand with explicit masses, `pmf[d]` being the probability of `d` units.
    pub fn from_pmf(pmf: Vec<f64>) -> Result<Self, ConfigError> {
        positive("demand truncation", pmf.len())?;
        for (index, &value) in pmf.iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidMass { index, value });
            }
        }
        let total: f64 = pmf.iter().sum();
        if total > 1.0 + MASS_TOLERANCE {
            return Err(ConfigError::MassExceedsOne(total));
        }
        Ok(Self { rate: None, pmf })
    }

    /// Support values and their masses, index-aligned.
    pub fn support_and_pmf(&self) -> (Vec<u32>, &[f64]) {
        (self.support().collect(), &self.pmf)
    }

    pub fn support(&self) -> impl Iterator<Item = u32> + '_ {
        (0..self.pmf.len()).map(|d| d as u32)
    }

    pub fn pmf(&self) -> &[f64] {
        &self.pmf
    }

    /// `(demand, probability)` pairs in ascending demand order.
    pub fn outcomes(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.pmf.iter().copied().enumerate()
    }

    /// The truncation bound `max_d`.
    pub fn max_demand(&self) -> usize {
        self.pmf.len()
    }

    /// Rate of the generating Poisson law, if the model came from one.
    pub fn rate(&self) -> Option<f64> {
        self.rate
    }

    pub fn retained_mass(&self) -> f64 {
        self.pmf.iter().sum()
    }

    /// Probability mass lost to truncation.
    pub fn truncated_mass(&self) -> f64 {
        (1.0 - self.retained_mass()).max(0.0)
    }

    pub fn mean(&self) -> f64 {
        self.outcomes().map(|(d, p)| d as f64 * p).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poisson_masses_match_closed_form() {
        let model = DemandModel::poisson(2.0, 4).unwrap();
        let e = (-2.0f64).exp();
        let expected = [e, 2.0 * e, 2.0 * e, 4.0 / 3.0 * e];
        for (got, want) in model.pmf().iter().zip(expected) {
            assert!((got - want).abs() < 1e-12, "{got} vs {want}");
        }
        let (support, pmf) = model.support_and_pmf();
        assert_eq!(support, vec![0, 1, 2, 3]);
        assert_eq!(pmf.len(), 4);
    }

    #[test]
    fn tail_mass_is_dropped_not_renormalised() {
        let model = DemandModel::poisson(5.0, 3).unwrap();
        assert!(model.retained_mass() < 0.2);
        assert!((model.retained_mass() + model.truncated_mass() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn wide_truncation_loses_negligible_mass() {
        let model = DemandModel::poisson(2.0, 20).unwrap();
        assert!(model.truncated_mass() < 1e-8);
        assert!((model.mean() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn zero_rate_is_degenerate_at_zero() {
        let model = DemandModel::poisson(0.0, 5).unwrap();
        assert_eq!(model.pmf(), &[1.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(model.truncated_mass(), 0.0);
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        assert!(matches!(
            DemandModel::poisson(-1.0, 5),
            Err(ConfigError::Negative { .. })
        ));
        assert!(matches!(
            DemandModel::poisson(1.0, 0),
            Err(ConfigError::NonPositive { .. })
        ));
        assert!(matches!(
            DemandModel::from_pmf(vec![0.7, 0.7]),
            Err(ConfigError::MassExceedsOne(_))
        ));
        assert!(matches!(
            DemandModel::from_pmf(vec![0.5, -0.1]),
            Err(ConfigError::InvalidMass { index: 1, .. })
        ));
        assert!(DemandModel::from_pmf(Vec::new()).is_err());
    }
}
