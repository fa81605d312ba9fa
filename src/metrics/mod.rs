//! Prometheus metrics for density runs.
//!
//! # Metrics Exposed
//!
//! ## Totals
//! - `prime_density_runs_total` - Completed runs
//! - `prime_density_values_scanned_total` - Positive sequence values classified
//! - `prime_density_primes_found_total` - Values classified as prime
//! - `prime_density_undefined_ratio_total` - Runs with an undefined theoretical density
//!
//! ## Latest Run
//! - `prime_density_last_actual_density` - Observed density
//! - `prime_density_last_theoretical_density` - 1/ln(x) estimate
//! - `prime_density_last_ratio` - Observed over theoretical (0 if undefined)
//! - `prime_density_last_run_seconds` - Scan duration
//!
//! With the `metrics` feature, [`MetricsServer`] exposes them over HTTP at
//! `/metrics`.
//!
//! # Example
//!
//! ```
//! use prime_density::{metrics::MetricsRegistry, DensityEstimator, Polynomial};
//!
//! let registry = MetricsRegistry::new().expect("Failed to create registry");
//! let report = DensityEstimator::new(Polynomial::euler(), 1000).run().unwrap();
//! registry.record(&report);
//!
//! assert!(registry.encode().unwrap().contains("prime_density_runs_total 1"));
//! ```

mod collector;
#[cfg(feature = "metrics")]
mod server;

pub use collector::{MetricsError, MetricsRegistry};
#[cfg(feature = "metrics")]
pub use server::{MetricsServer, MetricsServerConfig, ServerError};
