//! Human-readable and serializable run reports.

use super::{comparison::Comparison, stats::RunStats, DensityError};
use crate::sequence::Polynomial;
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::fmt;
use std::time::Duration;

/// Text shown in place of the ratio when it cannot be computed.
pub const UNDEFINED_RATIO: &str = "theoretical density undefined for this range";

/// Result of one density run.
#[derive(Debug, Clone, Serialize)]
pub struct DensityReport {
    /// Domain bound: n ranged over `[0, search_limit)`.
    pub search_limit: u64,
    /// Wall-clock time the scan started.
    pub started_at: DateTime<Utc>,
    /// Duration of the scan.
    #[serde(rename = "elapsed_secs", serialize_with = "serialize_secs")]
    pub elapsed: Duration,
    /// Polynomial that was sampled.
    pub polynomial: Polynomial,
    /// Final counters.
    pub stats: RunStats,
    /// Density comparison derived from `stats`.
    pub comparison: Comparison,
}

impl DensityReport {
    /// The programmatic result: (actual density, ratio).
    pub fn summary(&self) -> (f64, Option<f64>) {
        (self.comparison.actual_density, self.comparison.ratio)
    }

    /// The ratio, or [`DensityError::UndefinedTheoreticalDensity`].
    pub fn ratio_or_err(&self) -> Result<f64, DensityError> {
        self.comparison
            .ratio
            .ok_or(DensityError::UndefinedTheoreticalDensity {
                avg_magnitude: self.comparison.avg_magnitude,
            })
    }

    /// One-line digest for logs: counts, actual density and ratio.
    pub fn summary_line(&self) -> String {
        let cmp = &self.comparison;
        let ratio = match cmp.ratio {
            Some(ratio) => format!("{:.2}x", ratio),
            None => "undefined".to_string(),
        };
        format!(
            "{}/{} prime, density {:.4}, ratio {}",
            group_thousands(self.stats.prime_count),
            group_thousands(self.stats.total_count),
            cmp.actual_density,
            ratio
        )
    }

    /// Emits the report as `info` events, one per line.
    pub fn log(&self) {
        for line in self.to_string().lines().filter(|l| !l.is_empty()) {
            tracing::info!("{}", line);
        }
        if !self.comparison.is_defined() {
            tracing::warn!(
                avg_magnitude = self.comparison.avg_magnitude,
                polynomial = %self.polynomial,
                "{}",
                UNDEFINED_RATIO
            );
        }
    }
}

impl fmt::Display for DensityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cmp = &self.comparison;
        writeln!(f)?;
        writeln!(f, "--- Results for {} ---", self.polynomial)?;
        writeln!(f, "Items Processed:     {}", group_thousands(self.stats.total_count))?;
        writeln!(f, "Primes Found:        {}", group_thousands(self.stats.prime_count))?;
        writeln!(f, "Execution Time:      {:.4} seconds", self.elapsed.as_secs_f64())?;
        writeln!(f, "Actual Density:      {:.4}", cmp.actual_density)?;
        writeln!(f, "Theoretical Density: {:.4}", cmp.theoretical_density)?;
        match cmp.ratio {
            Some(ratio) => writeln!(f, "Ratio:               {:.2}x higher than average", ratio),
            None => writeln!(f, "Ratio:               {}", UNDEFINED_RATIO),
        }
    }
}

fn serialize_secs<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(elapsed.as_secs_f64())
}

/// Formats an integer with comma thousands separators.
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(prime_count: u64, total_count: u64, a: f64, search_limit: u64) -> DensityReport {
        let stats = RunStats {
            prime_count,
            total_count,
        };
        DensityReport {
            polynomial: Polynomial::new(a, 1.0, 41.0).unwrap(),
            search_limit,
            started_at: Utc::now(),
            elapsed: Duration::from_millis(1234),
            comparison: Comparison::compute(&stats, a, search_limit),
            stats,
        }
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn test_text_report() {
        let text = report(5819, 10_000, 1.0, 10_000).to_string();
        assert!(text.contains("--- Results for P(n) = 1n^2 + 1n + 41 ---"));
        assert!(text.contains("Items Processed:     10,000"));
        assert!(text.contains("Primes Found:        5,819"));
        assert!(text.contains("Execution Time:      1.2340 seconds"));
        assert!(text.contains("Actual Density:      0.5819"));
        assert!(text.contains("x higher than average"));
    }

    #[test]
    fn test_text_report_comparison_lines() {
        // avg magnitude (2000/2)^2 = 1e6, 1/ln(1e6) = 0.07238
        let text = report(100, 1000, 1.0, 2000).to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines.contains(&"Actual Density:      0.1000"));
        assert!(lines.contains(&"Theoretical Density: 0.0724"));
        assert!(lines.contains(&"Ratio:               1.38x higher than average"));
    }

    #[test]
    fn test_summary_line() {
        assert_eq!(
            report(1234, 10_000, 1.0, 2000).summary_line(),
            "1,234/10,000 prime, density 0.1234, ratio 1.70x"
        );
        assert_eq!(
            report(0, 0, 0.0, 100).summary_line(),
            "0/0 prime, density 0.0000, ratio undefined"
        );
    }

    #[test]
    fn test_undefined_ratio_report() {
        let r = report(0, 0, 0.0, 100);
        assert!(r.to_string().contains(UNDEFINED_RATIO));
        assert!(matches!(
            r.ratio_or_err(),
            Err(DensityError::UndefinedTheoreticalDensity { .. })
        ));
        assert_eq!(r.summary(), (0.0, None));
    }

    #[test]
    fn test_toml_serialization() {
        let out = toml::to_string(&report(10, 100, 1.0, 1000)).unwrap();
        assert!(out.contains("search_limit = 1000"));
        assert!(out.contains("elapsed_secs = 1.234"));
        assert!(out.contains("prime_count = 10"));
        assert!(out.contains("ratio = "));

        let undefined = toml::to_string(&report(0, 0, 0.0, 100)).unwrap();
        assert!(!undefined.contains("ratio = "));
    }
}
