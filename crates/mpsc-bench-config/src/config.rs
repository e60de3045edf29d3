// crates/mpsc-bench-config/src/config.rs
// ============================================================================
// Module: MPSC Bench Configuration
// Description: Configuration loading and validation for ingestion runs.
// Purpose: Provide strict config parsing with explicit harness parameters.
// Dependencies: mpsc-bench-core, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file. Every section has defaults, so an
//! empty file (or no file at all) yields a valid configuration. An explicitly
//! named file must exist; the default file name is only consulted when present.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use mpsc_bench_core::AggregatorConfig;
use mpsc_bench_core::CounterCatalog;
use mpsc_bench_core::DEFAULT_COUNTERS;
use mpsc_bench_core::DEFAULT_MEASUREMENT_WINDOW_SECS;
use mpsc_bench_core::DuplicatePolicy;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
pub const DEFAULT_CONFIG_NAME: &str = "mpsc-bench.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "MPSC_BENCH_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Default maximum size of a single artifact file in bytes.
pub(crate) const DEFAULT_MAX_FILE_BYTES: usize = 16 * 1024 * 1024;
/// Largest accepted artifact size limit in bytes.
pub(crate) const MAX_FILE_BYTES_LIMIT: usize = 1024 * 1024 * 1024;
/// Maximum number of recognized counters.
pub(crate) const MAX_COUNTER_METRICS: usize = 64;

// ============================================================================
// SECTION: Root Configuration
// ============================================================================

/// Ingestion run configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BenchConfig {
    /// Aggregation parameters.
    #[serde(default)]
    pub aggregate: AggregateConfig,
    /// Recognized hardware counters.
    #[serde(default)]
    pub counters: CountersConfig,
    /// Loader limits and toggles.
    #[serde(default)]
    pub ingest: IngestConfig,
}

impl BenchConfig {
    /// Loads configuration using the default resolution rules.
    ///
    /// Resolution order: `path`, then `MPSC_BENCH_CONFIG`, then
    /// `mpsc-bench.toml` in the working directory when it exists, then defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match resolve_path(path) {
            Some(resolved) => Self::load_file(&resolved),
            None => Ok(Self::default()),
        }
    }

    /// Loads and validates a specific configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file is unreadable or invalid.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let bytes = fs::read(path)
            .map_err(|err| ConfigError::Io(format!("{}: {err}", path.display())))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml_str(content)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the TOML is malformed or invalid.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.aggregate.validate()?;
        self.counters.validate()?;
        self.ingest.validate()?;
        Ok(())
    }

    /// Returns the aggregator parameters.
    #[must_use]
    pub const fn aggregator_config(&self) -> AggregatorConfig {
        AggregatorConfig {
            measurement_window_secs: self.aggregate.measurement_window_secs,
            duplicate_policy: self.aggregate.duplicate_policy,
        }
    }

    /// Returns the recognized counter catalog.
    #[must_use]
    pub fn counter_catalog(&self) -> CounterCatalog {
        CounterCatalog::new(self.counters.metrics.clone())
    }
}

// ============================================================================
// SECTION: Aggregate Configuration
// ============================================================================

/// Aggregation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AggregateConfig {
    /// Harness measurement window, in seconds.
    #[serde(default = "default_measurement_window_secs")]
    pub measurement_window_secs: f64,
    /// Duplicate-key resolution policy.
    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            measurement_window_secs: default_measurement_window_secs(),
            duplicate_policy: DuplicatePolicy::default(),
        }
    }
}

impl AggregateConfig {
    /// Validates aggregation parameters.
    fn validate(&self) -> Result<(), ConfigError> {
        let window = self.measurement_window_secs;
        if !window.is_finite() || window <= 0.0 {
            return Err(ConfigError::Invalid(
                "aggregate.measurement_window_secs must be a positive number".to_string(),
            ));
        }
        Ok(())
    }
}

/// Default measurement window.
const fn default_measurement_window_secs() -> f64 {
    DEFAULT_MEASUREMENT_WINDOW_SECS
}

// ============================================================================
// SECTION: Counter Configuration
// ============================================================================

/// Recognized hardware counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CountersConfig {
    /// Logical metric name to expected base event name.
    #[serde(default = "default_counter_metrics")]
    pub metrics: BTreeMap<String, String>,
}

impl Default for CountersConfig {
    fn default() -> Self {
        Self {
            metrics: default_counter_metrics(),
        }
    }
}

impl CountersConfig {
    /// Validates counter names.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.metrics.is_empty() {
            return Err(ConfigError::Invalid("counters.metrics must be non-empty".to_string()));
        }
        if self.metrics.len() > MAX_COUNTER_METRICS {
            return Err(ConfigError::Invalid("counters.metrics exceeds max entries".to_string()));
        }
        for (metric, event) in &self.metrics {
            if metric.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "counters.metrics names must be non-empty".to_string(),
                ));
            }
            if event.is_empty() || event.contains(':') || event.chars().any(char::is_whitespace) {
                return Err(ConfigError::Invalid(format!(
                    "counters.metrics.{metric} must be a bare event name without ':' or whitespace"
                )));
            }
        }
        Ok(())
    }
}

/// Default recognized counters.
fn default_counter_metrics() -> BTreeMap<String, String> {
    DEFAULT_COUNTERS
        .iter()
        .map(|(metric, event)| ((*metric).to_string(), (*event).to_string()))
        .collect()
}

// ============================================================================
// SECTION: Ingest Configuration
// ============================================================================

/// Loader limits and toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IngestConfig {
    /// Maximum size of a single artifact file, in bytes.
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: usize,
    /// Load zone-trace exports for directory inputs.
    #[serde(default = "default_true")]
    pub zone_traces: bool,
    /// Load hardware-counter dumps for directory inputs.
    #[serde(default = "default_true")]
    pub counters: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: default_max_file_bytes(),
            zone_traces: true,
            counters: true,
        }
    }
}

impl IngestConfig {
    /// Validates loader limits.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_file_bytes == 0 || self.max_file_bytes > MAX_FILE_BYTES_LIMIT {
            return Err(ConfigError::Invalid(format!(
                "ingest.max_file_bytes must be between 1 and {MAX_FILE_BYTES_LIMIT}"
            )));
        }
        Ok(())
    }
}

/// Default artifact size limit.
const fn default_max_file_bytes() -> usize {
    DEFAULT_MAX_FILE_BYTES
}

/// Serde default helper for enabled toggles.
const fn default_true() -> bool {
    true
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI, environment, or the default file name.
fn resolve_path(path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = path {
        return Some(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR)
        && !env_path.trim().is_empty()
    {
        return Some(PathBuf::from(env_path));
    }
    let default = PathBuf::from(DEFAULT_CONFIG_NAME);
    default.is_file().then_some(default)
}
