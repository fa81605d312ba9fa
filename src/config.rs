//! Analysis configuration.
//!
//! A run configuration names the polynomials to sample and the shared
//! search limit. Files are TOML:
//!
//! ```toml
//! [analysis]
//! search_limit = 100000
//!
//! [[analysis.polynomials]]
//! label = "euler"
//! a = 1
//! b = 1
//! c = 41
//!
//! [output]
//! format = "text"
//! metrics_port = 0
//! ```

use crate::sequence::{Polynomial, PolynomialError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default domain bound for each run.
pub const DEFAULT_SEARCH_LIMIT: u64 = 100_000;

/// One polynomial to analyze.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolynomialSpec {
    /// Name used in logs and batch output. Defaults to the formula.
    #[serde(default)]
    pub label: Option<String>,
    /// Quadratic coefficient.
    pub a: f64,
    /// Linear coefficient.
    #[serde(default)]
    pub b: f64,
    /// Constant term.
    #[serde(default)]
    pub c: f64,
}

impl PolynomialSpec {
    /// Creates an unlabeled spec.
    pub fn new(a: f64, b: f64, c: f64) -> Self {
        Self {
            label: None,
            a,
            b,
            c,
        }
    }

    /// Builds the validated polynomial.
    pub fn to_polynomial(&self) -> Result<Polynomial, PolynomialError> {
        Polynomial::new(self.a, self.b, self.c)
    }

    /// The label, or the formula when none was given.
    pub fn display_name(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => format!("P(n) = {}n^2 + {}n + {}", self.a, self.b, self.c),
        }
    }
}

/// Which polynomials to sample and how far.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Each run covers n in `[0, search_limit)`.
    pub search_limit: u64,
    /// Polynomials to analyze, in order.
    pub polynomials: Vec<PolynomialSpec>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            search_limit: DEFAULT_SEARCH_LIMIT,
            polynomials: vec![
                PolynomialSpec {
                    label: Some("euler".into()),
                    a: 1.0,
                    b: 1.0,
                    c: 41.0,
                },
                PolynomialSpec {
                    label: Some("squares-plus-one".into()),
                    a: 1.0,
                    b: 0.0,
                    c: 1.0,
                },
            ],
        }
    }
}

impl AnalysisConfig {
    /// Validates every polynomial.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.polynomials.is_empty() {
            return Err(ConfigError::NoPolynomials);
        }
        for (index, spec) in self.polynomials.iter().enumerate() {
            spec.to_polynomial()
                .map_err(|source| ConfigError::InvalidPolynomial { index, source })?;
        }
        Ok(())
    }
}

/// Rendering of results on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable report.
    #[default]
    Text,
    /// Machine-readable TOML.
    Toml,
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Stdout rendering.
    pub format: OutputFormat,
    /// Metrics server port (0 to disable).
    pub metrics_port: u16,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            metrics_port: 0,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// The polynomial list is empty.
    #[error("no polynomials configured")]
    NoPolynomials,
    /// An entry has non-finite coefficients.
    #[error("polynomial #{index}: {source}")]
    InvalidPolynomial {
        /// Position in the configured list.
        index: usize,
        /// Why the coefficients were rejected.
        source: PolynomialError,
    },
    /// The file could not be read.
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    /// The file is not valid TOML for this format.
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}

/// Full configuration file format.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    /// `[analysis]` section.
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// `[output]` section.
    #[serde(default)]
    pub output: OutputConfig,
}

impl FileConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        Self::from_toml(&content)
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: FileConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.analysis.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = FileConfig::default();
        assert!(config.analysis.validate().is_ok());
        assert_eq!(config.analysis.search_limit, DEFAULT_SEARCH_LIMIT);
        assert_eq!(config.output.format, OutputFormat::Text);
    }

    #[test]
    fn test_parse_full_file() {
        let config = FileConfig::from_toml(
            r#"
            [analysis]
            search_limit = 5000

            [[analysis.polynomials]]
            label = "euler"
            a = 1
            b = 1
            c = 41

            [[analysis.polynomials]]
            a = 4.0
            c = -1.5

            [output]
            format = "toml"
            metrics_port = 9100
            "#,
        )
        .unwrap();

        assert_eq!(config.analysis.search_limit, 5000);
        assert_eq!(config.analysis.polynomials.len(), 2);
        assert_eq!(config.analysis.polynomials[0].display_name(), "euler");
        assert_eq!(
            config.analysis.polynomials[1],
            PolynomialSpec::new(4.0, 0.0, -1.5)
        );
        assert_eq!(
            config.analysis.polynomials[1].display_name(),
            "P(n) = 4n^2 + 0n + -1.5"
        );
        assert_eq!(config.output.format, OutputFormat::Toml);
        assert_eq!(config.output.metrics_port, 9100);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = FileConfig::from_toml("").unwrap();
        assert_eq!(config.analysis.polynomials.len(), 2);
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let config = FileConfig::from_toml("[analysis]\nsearch_limit = 42\n").unwrap();
        assert_eq!(config.analysis.search_limit, 42);
        assert_eq!(config.analysis.polynomials.len(), 2);
    }

    #[test]
    fn test_empty_polynomial_list_invalid() {
        let result = FileConfig::from_toml(
            r#"
            [analysis]
            search_limit = 10
            polynomials = []
            "#,
        );
        assert!(matches!(result, Err(ConfigError::NoPolynomials)));
    }

    #[test]
    fn test_non_finite_coefficient_invalid() {
        let result = FileConfig::from_toml(
            r#"
            [analysis]
            search_limit = 10

            [[analysis.polynomials]]
            a = nan
            "#,
        );
        assert!(matches!(
            result,
            Err(ConfigError::InvalidPolynomial { index: 0, .. })
        ));
    }

    #[test]
    fn test_malformed_file() {
        assert!(matches!(
            FileConfig::from_toml("[analysis"),
            Err(ConfigError::ParseError(_))
        ));
        assert!(matches!(
            FileConfig::from_file("/nonexistent/prime-density.toml"),
            Err(ConfigError::FileReadError(_))
        ));
    }
}
