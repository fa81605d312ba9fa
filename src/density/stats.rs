//! Per-run accumulation.

use serde::Serialize;

/// Counters accumulated during one pass over a stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Values classified as prime.
    pub prime_count: u64,
    /// Values classified at all.
    pub total_count: u64,
}

impl RunStats {
    /// Records one classified value.
    #[inline]
    pub fn record(&mut self, prime: bool) {
        self.total_count += 1;
        if prime {
            self.prime_count += 1;
        }
    }

    /// Fraction of values that were prime, or 0 when nothing was counted.
    pub fn actual_density(&self) -> f64 {
        if self.total_count == 0 {
            return 0.0;
        }
        self.prime_count as f64 / self.total_count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_density_is_zero() {
        let stats = RunStats::default();
        assert_eq!(stats.actual_density(), 0.0);
    }

    #[test]
    fn test_record() {
        let mut stats = RunStats::default();
        for prime in [true, false, false, true] {
            stats.record(prime);
        }
        assert_eq!(stats.total_count, 4);
        assert_eq!(stats.prime_count, 2);
        assert_eq!(stats.actual_density(), 0.5);
    }
}
