//! Metrics collection and registry.

use crate::density::DensityReport;
use prometheus::{Encoder, Gauge, IntCounter, Registry, TextEncoder};
use thiserror::Error;

/// Errors that can occur during metrics operations.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// Registration or encoding failed.
    #[error("prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),
}

/// Prometheus metrics registry for density runs.
///
/// Cloning shares the underlying metrics, so a clone can be handed to the
/// HTTP exporter while the runner keeps recording.
#[derive(Clone)]
pub struct MetricsRegistry {
    registry: Registry,

    // Run totals
    runs_total: IntCounter,
    values_scanned_total: IntCounter,
    primes_found_total: IntCounter,
    undefined_ratio_total: IntCounter,

    // Latest run
    last_actual_density: Gauge,
    last_theoretical_density: Gauge,
    last_ratio: Gauge,
    last_run_seconds: Gauge,
}

impl MetricsRegistry {
    /// Creates a new metrics registry with all density metrics registered.
    pub fn new() -> Result<Self, MetricsError> {
        let registry = Registry::new();

        let runs_total = IntCounter::new(
            "prime_density_runs_total",
            "Total number of completed density runs",
        )?;
        let values_scanned_total = IntCounter::new(
            "prime_density_values_scanned_total",
            "Total positive sequence values classified",
        )?;
        let primes_found_total = IntCounter::new(
            "prime_density_primes_found_total",
            "Total sequence values classified as prime",
        )?;
        let undefined_ratio_total = IntCounter::new(
            "prime_density_undefined_ratio_total",
            "Runs whose theoretical density was undefined",
        )?;

        let last_actual_density = Gauge::new(
            "prime_density_last_actual_density",
            "Observed prime density of the latest run",
        )?;
        let last_theoretical_density = Gauge::new(
            "prime_density_last_theoretical_density",
            "Prime Number Theorem estimate 1/ln(x) of the latest run",
        )?;
        let last_ratio = Gauge::new(
            "prime_density_last_ratio",
            "Observed over theoretical density of the latest run (0 if undefined)",
        )?;
        let last_run_seconds = Gauge::new(
            "prime_density_last_run_seconds",
            "Wall-clock duration of the latest scan",
        )?;

        registry.register(Box::new(runs_total.clone()))?;
        registry.register(Box::new(values_scanned_total.clone()))?;
        registry.register(Box::new(primes_found_total.clone()))?;
        registry.register(Box::new(undefined_ratio_total.clone()))?;
        registry.register(Box::new(last_actual_density.clone()))?;
        registry.register(Box::new(last_theoretical_density.clone()))?;
        registry.register(Box::new(last_ratio.clone()))?;
        registry.register(Box::new(last_run_seconds.clone()))?;

        Ok(Self {
            registry,
            runs_total,
            values_scanned_total,
            primes_found_total,
            undefined_ratio_total,
            last_actual_density,
            last_theoretical_density,
            last_ratio,
            last_run_seconds,
        })
    }

    /// Records a finished run.
    pub fn record(&self, report: &DensityReport) {
        self.runs_total.inc();
        self.values_scanned_total.inc_by(report.stats.total_count);
        self.primes_found_total.inc_by(report.stats.prime_count);

        let cmp = &report.comparison;
        self.last_actual_density.set(cmp.actual_density);
        self.last_theoretical_density.set(cmp.theoretical_density);
        match cmp.ratio {
            Some(ratio) => self.last_ratio.set(ratio),
            None => {
                self.undefined_ratio_total.inc();
                self.last_ratio.set(0.0);
            }
        }
        self.last_run_seconds.set(report.elapsed.as_secs_f64());
    }

    /// Total runs recorded.
    pub fn runs(&self) -> u64 {
        self.runs_total.get()
    }

    /// Returns the underlying Prometheus registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Encodes all metrics in Prometheus text format.
    pub fn encode(&self) -> Result<String, MetricsError> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
