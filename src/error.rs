// src/error.rs

use thiserror::Error;

/// Invalid construction parameters. Raised before any computation starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{name} must be a positive integer")]
    NonPositive { name: &'static str },

    #[error("{name} must be finite and non-negative, got {value}")]
    Negative { name: &'static str, value: f64 },

    #[error("discount factor must lie in (0, 1], got {0}")]
    DiscountOutOfRange(f64),

    #[error("probability mass at demand {index} is invalid: {value}")]
    InvalidMass { index: usize, value: f64 },

    #[error("probability masses sum to {0}, which exceeds 1")]
    MassExceedsOne(f64),

    #[error("demand distribution rejected: {0}")]
    Distribution(String),

    #[error("initial inventory has {got} slots, lead time {lead_time} needs {expected}")]
    InitialInventoryLength {
        lead_time: usize,
        expected: usize,
        got: usize,
    },

    #[error("the optimal table policy is solved for lead time 1, simulation uses {0}")]
    LeadTimeMismatch(usize),
}

/// Everything the crate can fail with.
#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("demand sequence has {got} periods, simulation needs {expected}")]
    DemandLength { expected: usize, got: usize },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Checks that a cost or rate parameter is finite and `>= 0`.
pub(crate) fn non_negative(name: &'static str, value: f64) -> std::result::Result<f64, ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::Negative { name, value })
    }
}

/// Checks that a bound is at least one.
pub(crate) fn positive(name: &'static str, value: usize) -> std::result::Result<usize, ConfigError> {
    if value == 0 {
        Err(ConfigError::NonPositive { name })
    } else {
        Ok(value)
    }
}
