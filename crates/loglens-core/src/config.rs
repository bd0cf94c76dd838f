//! Configuration types for loglens.
//!
//! [`Config::load`] layers an optional `loglens.toml` in the working directory
//! and `LOGLENS__*` environment variables over the embedded defaults.
//! [`Config::defaults`] returns the same defaults without touching the
//! filesystem or environment (useful in tests).

use crate::error::{AnalysisError, Result};
use serde::Deserialize;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
seed = 42

[input]
path = "sample_logs.log"

[anomaly]
contamination = 0.05
trees         = 100
max_samples   = 256

[clustering]
clusters       = 3
max_iterations = 300

[report]
samples_per_cluster = 3
"#;

/// Name of the optional override file looked up in the working directory.
pub const CONFIG_FILE: &str = "loglens.toml";

/// Prefix for environment overrides, e.g. `LOGLENS__INPUT__PATH`.
pub const ENV_PREFIX: &str = "LOGLENS";

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level run configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Seed shared by the isolation forest and k-means.
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub anomaly: AnomalyConfig,
    #[serde(default)]
    pub clustering: ClusteringConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

/// `[input]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_path")]
    pub path: PathBuf,
}

/// `[anomaly]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct AnomalyConfig {
    /// Fraction of the corpus labelled anomalous.
    #[serde(default = "default_contamination")]
    pub contamination: f64,
    #[serde(default = "default_trees")]
    pub trees: usize,
    /// Upper bound on the records each tree is trained on.
    #[serde(default = "default_max_samples")]
    pub max_samples: usize,
}

/// `[clustering]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ClusteringConfig {
    #[serde(default = "default_clusters")]
    pub clusters: usize,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
}

/// `[report]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_samples_per_cluster")]
    pub samples_per_cluster: usize,
}

fn default_seed() -> u64 { 42 }
fn default_path() -> PathBuf { PathBuf::from("sample_logs.log") }
fn default_contamination() -> f64 { 0.05 }
fn default_trees() -> usize { 100 }
fn default_max_samples() -> usize { 256 }
fn default_clusters() -> usize { 3 }
fn default_max_iterations() -> usize { 300 }
fn default_samples_per_cluster() -> usize { 3 }

impl Default for InputConfig {
    fn default() -> Self {
        Self { path: default_path() }
    }
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self {
            contamination: default_contamination(),
            trees: default_trees(),
            max_samples: default_max_samples(),
        }
    }
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            clusters: default_clusters(),
            max_iterations: default_max_iterations(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            samples_per_cluster: default_samples_per_cluster(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load the layered configuration: embedded defaults, then
    /// `./loglens.toml` if present, then `LOGLENS__SECTION__KEY` variables.
    pub fn load() -> Result<Self> {
        let cfg: Self = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    /// Reject values no stage can run with.
    pub fn validate(&self) -> Result<()> {
        let c = self.anomaly.contamination;
        if !(c > 0.0 && c < 1.0) {
            return Err(AnalysisError::InvalidContamination(c));
        }
        if self.clustering.clusters == 0 {
            return Err(AnalysisError::InvalidClusterCount(0));
        }
        if self.anomaly.trees == 0 || self.anomaly.max_samples == 0 {
            return Err(AnalysisError::InvalidForestSize);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
