//! Sequential execution of several density runs.
//!
//! Each configured polynomial gets its own independent run. A stop flag is
//! checked between runs, never inside one, so every report covers the full
//! range it names.

use crate::config::{AnalysisConfig, PolynomialSpec};
use crate::density::{DensityError, DensityEstimator, DensityReport};
use crate::metrics::MetricsRegistry;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A finished run and the name it was configured under.
#[derive(Debug, Clone, Serialize)]
pub struct LabeledReport {
    /// Configured label or formula.
    pub label: String,
    /// The run result.
    pub report: DensityReport,
}

/// A run that could not start.
#[derive(Debug, Clone, Serialize)]
pub struct BatchFailure {
    /// Configured label or formula.
    pub label: String,
    /// Rendered error.
    pub error: String,
}

/// Outcome of a batch.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchOutcome {
    /// True if the stop flag ended the batch early.
    pub interrupted: bool,
    /// Runs rejected before scanning.
    pub failures: Vec<BatchFailure>,
    /// Completed runs, in configuration order.
    pub reports: Vec<LabeledReport>,
}

/// Runs each configured polynomial in turn.
pub struct BatchRunner {
    specs: Vec<PolynomialSpec>,
    search_limit: u64,
    stop: Arc<AtomicBool>,
    metrics: Option<MetricsRegistry>,
}

impl BatchRunner {
    /// Creates a runner for the configured polynomials.
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            specs: config.polynomials.clone(),
            search_limit: config.search_limit,
            stop: Arc::new(AtomicBool::new(false)),
            metrics: None,
        }
    }

    /// Records every completed run in `metrics`.
    pub fn with_metrics(mut self, metrics: MetricsRegistry) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Flag that, once set, prevents further runs from starting.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// Executes the batch.
    pub fn run(&self) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();

        for (i, spec) in self.specs.iter().enumerate() {
            if self.stop.load(Ordering::SeqCst) {
                tracing::warn!(
                    completed = i,
                    remaining = self.specs.len() - i,
                    "Batch interrupted"
                );
                outcome.interrupted = true;
                break;
            }

            let label = spec.display_name();
            match self.run_one(spec) {
                Ok(report) => {
                    tracing::info!(label = %label, "{}", report.summary_line());
                    if let Some(metrics) = &self.metrics {
                        metrics.record(&report);
                    }
                    outcome.reports.push(LabeledReport { label, report });
                }
                Err(e) => {
                    tracing::warn!(label = %label, error = %e, "Run failed");
                    outcome.failures.push(BatchFailure {
                        label,
                        error: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            completed = outcome.reports.len(),
            failed = outcome.failures.len(),
            "Batch finished"
        );
        outcome
    }

    fn run_one(&self, spec: &PolynomialSpec) -> Result<DensityReport, DensityError> {
        let polynomial = spec.to_polynomial()?;
        DensityEstimator::new(polynomial, self.search_limit).run()
    }
}
