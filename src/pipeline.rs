//! Pipeline — runs every stage in order and emits progress markers.
//!
//! The report is rendered only once every stage has succeeded, so a failing
//! run never prints a partial report.

use anyhow::Context;
use loglens_core::anomaly::{self, AnomalyOutcome, IsolationForestParams};
use loglens_core::cluster::{self, Clustering, KMeansParams};
use loglens_core::config::Config;
use loglens_core::vectorizer::{self, TfidfModel};
use loglens_core::{parser, report, Corpus};
use std::io::Write;

/// Everything one run produces.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub corpus: Corpus,
    pub model: TfidfModel,
    pub anomalies: AnomalyOutcome,
    pub clustering: Clustering,
}

impl Analysis {
    /// Render the anomaly and clustering report.
    pub fn report(&self, config: &Config) -> String {
        report::render(
            &self.corpus,
            config.clustering.clusters,
            config.report.samples_per_cluster,
        )
    }
}

fn forest_params(config: &Config) -> IsolationForestParams {
    IsolationForestParams {
        trees: config.anomaly.trees,
        max_samples: config.anomaly.max_samples,
        seed: config.seed,
    }
}

fn kmeans_params(config: &Config) -> KMeansParams {
    KMeansParams {
        clusters: config.clustering.clusters,
        max_iterations: config.clustering.max_iterations,
        seed: config.seed,
    }
}

/// Read the configured input file and analyse it.
pub fn run<W: Write>(config: &Config, progress: &mut W) -> anyhow::Result<Analysis> {
    config.validate().context("invalid configuration")?;

    writeln!(progress, "Step 1: Parsing logs...")?;
    let corpus = parser::parse_file(&config.input.path).context("parsing stage failed")?;
    tracing::debug!(
        skipped = corpus.skipped_lines(),
        path = %config.input.path.display(),
        "lines not matching the syslog pattern were dropped"
    );
    writeln!(progress, "Parsed {} log lines.", corpus.len())?;

    analyze(corpus, config, progress)
}

/// Run the stages after parsing over an already-built corpus.
pub fn analyze<W: Write>(
    mut corpus: Corpus,
    config: &Config,
    progress: &mut W,
) -> anyhow::Result<Analysis> {
    writeln!(progress, "Step 2: Preprocessing text...")?;
    let model = vectorizer::vectorize(&mut corpus).context("vectorizing stage failed")?;

    writeln!(progress, "Step 3: Detecting Anomalies using Isolation Forest...")?;
    let anomalies = anomaly::annotate(
        &mut corpus,
        forest_params(config),
        config.anomaly.contamination,
    )
    .context("anomaly detection stage failed")?;

    writeln!(progress, "Step 4: Clustering logs with K-Means...")?;
    let clustering =
        cluster::annotate(&mut corpus, kmeans_params(config)).context("clustering stage failed")?;

    Ok(Analysis {
        corpus,
        model,
        anomalies,
        clustering,
    })
}
