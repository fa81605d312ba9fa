//! Drives a stream through the primality oracle and aggregates the result.

use super::{comparison::Comparison, report::DensityReport, stats::RunStats};
use crate::sequence::{Polynomial, PolynomialError};
use chrono::Utc;
use std::time::Instant;
use thiserror::Error;

/// Errors from a density run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DensityError {
    /// The polynomial or its range was rejected.
    #[error("invalid polynomial: {0}")]
    Polynomial(#[from] PolynomialError),

    /// avg_magnitude ≤ 1, so 1/ln(x) has no meaningful value.
    #[error("theoretical density undefined for this range (average magnitude {avg_magnitude})")]
    UndefinedTheoreticalDensity {
        /// The a·(limit/2)² estimate that fell out of range.
        avg_magnitude: f64,
    },
}

/// Prime density estimator for one polynomial over `[0, search_limit)`.
///
/// Every call to [`run`](Self::run) is an independent pass with fresh
/// counters.
#[derive(Debug, Clone)]
pub struct DensityEstimator {
    polynomial: Polynomial,
    search_limit: u64,
}

impl DensityEstimator {
    /// Creates an estimator.
    pub fn new(polynomial: Polynomial, search_limit: u64) -> Self {
        Self {
            polynomial,
            search_limit,
        }
    }

    /// The sampled polynomial.
    pub fn polynomial(&self) -> &Polynomial {
        &self.polynomial
    }

    /// The domain bound.
    pub fn search_limit(&self) -> u64 {
        self.search_limit
    }

    /// Scans the sequence once and returns the report.
    ///
    /// Fails only if the range cannot be evaluated exactly. An empty
    /// sequence or an undefined ratio are reported in the result.
    pub fn run(&self) -> Result<DensityReport, DensityError> {
        let stream = self.polynomial.stream(self.search_limit)?;

        tracing::debug!(
            polynomial = %self.polynomial,
            search_limit = self.search_limit,
            "Starting density scan"
        );

        let mut stats = RunStats::default();
        let started_at = Utc::now();
        let t0 = Instant::now();

        for value in stream {
            stats.record(value.is_prime());
        }

        let elapsed = t0.elapsed();

        Ok(DensityReport {
            search_limit: self.search_limit,
            started_at,
            elapsed,
            polynomial: self.polynomial,
            comparison: Comparison::compute(&stats, self.polynomial.a(), self.search_limit),
            stats,
        })
    }
}

/// Estimates prime density along P(n) = a·n² + b·n + c for n < `search_limit`.
///
/// Logs the report and returns `(actual_density, ratio)`. The ratio is
/// `None` when the theoretical density is 0, which happens when
/// a·(search_limit/2)² ≤ 1.
///
/// ```
/// let (density, ratio) = prime_density::analyze(1.0, 1.0, 41.0, 1000).unwrap();
/// assert!(density > 0.5);
/// assert!(ratio.unwrap() > 1.0);
/// ```
pub fn analyze(
    a: f64,
    b: f64,
    c: f64,
    search_limit: u64,
) -> Result<(f64, Option<f64>), DensityError> {
    let polynomial = Polynomial::new(a, b, c)?;
    let report = DensityEstimator::new(polynomial, search_limit).run()?;
    report.log();
    Ok(report.summary())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::SequenceValue;
    use proptest::prelude::*;

    #[test]
    fn test_single_point_empty_run() {
        let (density, ratio) = analyze(1.0, 0.0, 0.0, 1).unwrap();
        assert_eq!(density, 0.0);
        // avg magnitude 0.25: undefined, not a panic
        assert_eq!(ratio, None);

        let report = DensityEstimator::new(Polynomial::new(1.0, 0.0, 0.0).unwrap(), 1)
            .run()
            .unwrap();
        assert_eq!(report.stats.total_count, 0);
    }

    #[test]
    fn test_zero_limit() {
        let report = DensityEstimator::new(Polynomial::euler(), 0).run().unwrap();
        assert_eq!(report.stats, RunStats::default());
        assert_eq!(report.comparison.actual_density, 0.0);
        assert_eq!(report.comparison.ratio, None);
    }

    #[test]
    fn test_euler_first_forty_all_prime() {
        let report = DensityEstimator::new(Polynomial::euler(), 40).run().unwrap();
        assert_eq!(report.stats.total_count, 40);
        assert_eq!(report.stats.prime_count, 40);
        assert_eq!(report.comparison.actual_density, 1.0);

        // n = 40 gives 41^2
        let report = DensityEstimator::new(Polynomial::euler(), 41).run().unwrap();
        assert_eq!(report.stats.prime_count, 40);
    }

    #[test]
    fn test_euler_beats_average() {
        let (density, ratio) = analyze(1.0, 1.0, 41.0, 10_000).unwrap();
        assert!(density > 0.4);
        assert!(ratio.unwrap() > 2.0);
    }

    #[test]
    fn test_squares_are_never_prime() {
        let (density, ratio) = analyze(1.0, 0.0, 0.0, 5000).unwrap();
        assert_eq!(density, 0.0);
        assert_eq!(ratio, Some(0.0));
    }

    #[test]
    fn test_degenerate_polynomials() {
        // All non-positive: empty, ratio undefined because a < 0
        let (density, ratio) = analyze(-1.0, 0.0, 0.0, 100).unwrap();
        assert_eq!((density, ratio), (0.0, None));

        // a = 0: constant prime sequence, avg magnitude 0
        let report = DensityEstimator::new(Polynomial::new(0.0, 0.0, 7.0).unwrap(), 100)
            .run()
            .unwrap();
        assert_eq!(report.stats.total_count, 100);
        assert_eq!(report.comparison.actual_density, 1.0);
        assert!(matches!(
            report.ratio_or_err(),
            Err(DensityError::UndefinedTheoreticalDensity { .. })
        ));
    }

    #[test]
    fn test_invalid_coefficients() {
        assert!(matches!(
            analyze(f64::NAN, 0.0, 0.0, 10),
            Err(DensityError::Polynomial(_))
        ));
        assert!(matches!(
            analyze(1.0, 0.0, 0.0, u64::MAX),
            Err(DensityError::Polynomial(PolynomialError::MagnitudeOverflow { .. }))
        ));
    }

    #[test]
    fn test_repeated_runs_identical() {
        let first = analyze(2.0, 3.0, 5.0, 3000).unwrap();
        let second = analyze(2.0, 3.0, 5.0, 3000).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_real_coefficients_counted() {
        // (n^2 + n) / 2 + 0.5 is never whole
        let report = DensityEstimator::new(Polynomial::new(0.5, 0.5, 0.5).unwrap(), 1000)
            .run()
            .unwrap();
        assert_eq!(report.stats.total_count, 1000);
        assert_eq!(report.stats.prime_count, 0);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_counts_match_stream(
            a in -20i64..20,
            b in -200i64..200,
            c in -2000i64..2000,
            limit in 0u64..500,
        ) {
            let polynomial = Polynomial::new(a as f64, b as f64, c as f64).unwrap();
            let report = DensityEstimator::new(polynomial, limit).run().unwrap();

            let values: Vec<SequenceValue> = polynomial.stream(limit).unwrap().collect();
            let primes = values.iter().filter(|v| v.is_prime()).count() as u64;
            prop_assert_eq!(report.stats.total_count, values.len() as u64);
            prop_assert_eq!(report.stats.prime_count, primes);

            let (density, ratio) = report.summary();
            prop_assert!((0.0..=1.0).contains(&density));
            if let Some(ratio) = ratio {
                prop_assert!(ratio.is_finite() && ratio >= 0.0);
            }
        }
    }
}
