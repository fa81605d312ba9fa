//! Prime Density Analysis Library
//!
//! Measures how often a quadratic polynomial P(n) = a·n² + b·n + c hits
//! primes and compares the observed density with the Prime Number Theorem
//! estimate 1/ln(x).
//!
//! # Architecture
//!
//! A run is a linear pipeline:
//!
//! ```text
//! sequence → primality → density
//!  (values)    (oracle)   (counts, comparison, report)
//! ```
//!
//! The batch runner and metrics sit outside the pipeline and only consume
//! finished reports.
//!
//! # Design Principles
//!
//! - **Constant memory**: sequences are streamed, never materialized
//! - **Exact arithmetic**: integer polynomials are evaluated in `i128`, and
//!   ranges that cannot be represented exactly are rejected up front
//! - **No silent NaN**: an undefined theoretical density is reported as such
//! - **No statistical claims**: the ratio is a heuristic comparison
//!
//! # Example
//!
//! ```
//! use prime_density::{DensityEstimator, Polynomial};
//!
//! let euler = Polynomial::new(1.0, 1.0, 41.0).unwrap();
//! let report = DensityEstimator::new(euler, 10_000).run().unwrap();
//!
//! println!("{}", report);
//! assert!(report.comparison.ratio.unwrap() > 1.0);
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod batch;
pub mod config;
pub mod density;
pub mod metrics;
pub mod primality;
pub mod sequence;

// Re-export commonly used types at crate root
pub use batch::{BatchOutcome, BatchRunner};
pub use config::{AnalysisConfig, FileConfig, OutputFormat, PolynomialSpec};
pub use density::{analyze, Comparison, DensityError, DensityEstimator, DensityReport, RunStats};
pub use primality::{is_prime, PrimeSieve, TrialDivision};
pub use sequence::{Polynomial, PolynomialError, PolynomialStream, SequenceValue};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
