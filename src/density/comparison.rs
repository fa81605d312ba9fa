//! Observed density vs. the Prime Number Theorem estimate.

use super::stats::RunStats;
use serde::Serialize;

/// Comparison of observed and expected prime density for a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Comparison {
    /// prime_count / total_count, 0 for an empty run.
    pub actual_density: f64,
    /// Rough typical magnitude of the sampled values, a·(limit/2)².
    pub avg_magnitude: f64,
    /// 1/ln(avg_magnitude), or 0 when avg_magnitude ≤ 1.
    pub theoretical_density: f64,
    /// actual / theoretical. `None` when the theoretical density is 0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratio: Option<f64>,
}

impl Comparison {
    /// Derives the comparison from final counters.
    ///
    /// `a` is the quadratic coefficient; the magnitude estimate ignores the
    /// lower-order terms.
    pub fn compute(stats: &RunStats, a: f64, search_limit: u64) -> Self {
        let actual_density = stats.actual_density();

        let half = search_limit as f64 / 2.0;
        let avg_magnitude = a * half * half;
        let theoretical_density = if avg_magnitude > 1.0 {
            1.0 / avg_magnitude.ln()
        } else {
            0.0
        };

        let ratio = if theoretical_density > 0.0 {
            Some(actual_density / theoretical_density)
        } else {
            None
        };

        Self {
            actual_density,
            avg_magnitude,
            theoretical_density,
            ratio,
        }
    }

    /// Returns true if the ratio could be computed.
    #[inline]
    pub fn is_defined(&self) -> bool {
        self.ratio.is_some()
    }
}
