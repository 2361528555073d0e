//! Error type shared by the projection engine, plan loaders and report sinks

use thiserror::Error;

/// Fatal errors raised before any projection work is done, plus I/O failures
/// from the loading and export edges.
///
/// Numerical non-convergence is not an error: solvers return their best
/// estimate instead.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("investment period must be positive, got {0} years")]
    NonPositiveDuration(f64),

    #[error("investment period cannot exceed {max} years, got {years}")]
    DurationTooLong { years: f64, max: f64 },

    #[error("{field} must be a finite number, got {value}")]
    NonFiniteParameter { field: &'static str, value: f64 },

    #[error("monthly investment cannot be negative, got {0}")]
    NegativeContribution(f64),

    #[error("starting lumpsum cannot be negative, got {0}")]
    NegativeLumpsum(f64),

    #[error("net return ({0:.2}%) must be positive")]
    NonPositiveNetReturn(f64),

    #[error("target corpus is required and must be > 0, got {0}")]
    InvalidTarget(f64),

    #[error("cashflow dates must be in ascending order (entry {index} precedes its predecessor)")]
    UnsortedCashflows { index: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PlanError>;
