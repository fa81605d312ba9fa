//! Prime Density Analysis CLI
//!
//! Runs one polynomial from command-line coefficients, or a batch from a
//! TOML configuration file, and prints the density reports.

use clap::Parser;
use prime_density::{
    config::{AnalysisConfig, FileConfig, OutputFormat, PolynomialSpec, DEFAULT_SEARCH_LIMIT},
    metrics::MetricsRegistry,
    BatchOutcome, BatchRunner,
};
use std::error::Error;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Compare prime density along P(n) = a*n^2 + b*n + c with 1/ln(x).
#[derive(Debug, Parser)]
#[command(name = "prime-density", version, about)]
struct Cli {
    /// Quadratic coefficient.
    #[arg(short, long, default_value_t = 1.0, allow_negative_numbers = true)]
    a: f64,

    /// Linear coefficient.
    #[arg(short, long, default_value_t = 1.0, allow_negative_numbers = true)]
    b: f64,

    /// Constant term.
    #[arg(short, long, default_value_t = 41.0, allow_negative_numbers = true)]
    c: f64,

    /// Sample n in [0, LIMIT).
    #[arg(short = 'n', long)]
    limit: Option<u64>,

    /// Run the polynomials listed in a TOML file instead.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Serve Prometheus metrics on this port until Ctrl-C.
    #[arg(long)]
    metrics_port: Option<u16>,
}

fn main() {
    // Initialize logging
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(rust_log.as_deref()))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// `RUST_LOG` directives when set and valid, `info` otherwise.
fn env_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    info!("Prime Density Analysis v{}", prime_density::VERSION);

    let mut config = match &cli.config {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig {
            analysis: AnalysisConfig {
                search_limit: DEFAULT_SEARCH_LIMIT,
                polynomials: vec![PolynomialSpec::new(cli.a, cli.b, cli.c)],
            },
            ..Default::default()
        },
    };
    if let Some(limit) = cli.limit {
        config.analysis.search_limit = limit;
    }
    if let Some(format) = cli.format {
        config.output.format = format;
    }
    if let Some(port) = cli.metrics_port {
        config.output.metrics_port = port;
    }
    config.analysis.validate()?;

    let metrics = MetricsRegistry::new()?;
    let runner = BatchRunner::new(&config.analysis).with_metrics(metrics.clone());
    install_interrupt_handler(runner.stop_handle())?;

    let exporter = start_exporter(config.output.metrics_port, metrics, runner.stop_handle())?;

    let outcome = runner.run();
    print_outcome(&outcome, config.output.format)?;

    if let Some(exporter) = exporter {
        exporter.wait();
    }

    if outcome.reports.is_empty() && !outcome.failures.is_empty() {
        return Err("no run completed".into());
    }
    Ok(())
}

/// First Ctrl-C stops the batch after the current run; a second one exits.
fn install_interrupt_handler(stop: Arc<AtomicBool>) -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(move || {
        if stop.swap(true, Ordering::SeqCst) {
            std::process::exit(130);
        }
        eprintln!("Interrupt received, stopping after the current run");
    })
}

fn print_outcome(outcome: &BatchOutcome, format: OutputFormat) -> Result<(), Box<dyn Error>> {
    match format {
        OutputFormat::Text => {
            for entry in &outcome.reports {
                println!("{}", entry.report);
            }
            for failure in &outcome.failures {
                eprintln!("{}: {}", failure.label, failure.error);
            }
            if outcome.interrupted {
                eprintln!("Batch interrupted before all runs completed");
            }
        }
        OutputFormat::Toml => print!("{}", toml::to_string(outcome)?),
    }
    Ok(())
}

#[cfg(feature = "metrics")]
struct Exporter {
    runtime: tokio::runtime::Runtime,
    task: tokio::task::JoinHandle<()>,
}

#[cfg(feature = "metrics")]
impl Exporter {
    fn wait(self) {
        info!("Serving metrics until Ctrl-C");
        if let Err(e) = self.runtime.block_on(self.task) {
            warn!("Metrics server task failed: {}", e);
        }
    }
}

#[cfg(feature = "metrics")]
fn start_exporter(
    port: u16,
    metrics: MetricsRegistry,
    stop: Arc<AtomicBool>,
) -> Result<Option<Exporter>, Box<dyn Error>> {
    use prime_density::metrics::{MetricsServer, MetricsServerConfig};
    use std::time::Duration;

    if port == 0 {
        return Ok(None);
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()?;

    let server = MetricsServer::new(MetricsServerConfig::with_port(port), metrics);
    let shutdown = async move {
        while !stop.load(Ordering::SeqCst) {
            tokio::time::sleep(Duration::from_millis(200)).await;
        }
    };
    let task = runtime.spawn(async move {
        if let Err(e) = server.run_until(shutdown).await {
            warn!("Metrics server stopped: {}", e);
        }
    });

    Ok(Some(Exporter { runtime, task }))
}

#[cfg(not(feature = "metrics"))]
struct Exporter;

#[cfg(not(feature = "metrics"))]
impl Exporter {
    fn wait(self) {}
}

#[cfg(not(feature = "metrics"))]
fn start_exporter(
    port: u16,
    _metrics: MetricsRegistry,
    _stop: Arc<AtomicBool>,
) -> Result<Option<Exporter>, Box<dyn Error>> {
    if port != 0 {
        warn!(port, "Built without the `metrics` feature; not serving metrics");
    }
    Ok(None)
}
