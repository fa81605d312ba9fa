//! Prime density estimation.
//!
//! The estimator runs one pass over a [`PolynomialStream`], classifies each
//! value with the trial-division oracle, and compares the observed density
//! with the Prime Number Theorem estimate 1/ln(x).
//!
//! These numbers are a heuristic comparison, not a statistical test.
//!
//! [`PolynomialStream`]: crate::sequence::PolynomialStream

mod comparison;
mod estimator;
mod report;
mod stats;

pub use comparison::Comparison;
pub use estimator::{analyze, DensityError, DensityEstimator};
pub use report::{DensityReport, UNDEFINED_RATIO};
pub use stats::RunStats;
