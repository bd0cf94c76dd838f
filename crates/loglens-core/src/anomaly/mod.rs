//! Anomaly detection — scores every feature vector and labels the most
//! isolated fraction of the corpus.
//!
//! The notion of "anomalous" is relative to the corpus: exactly
//! `round(contamination × N)` records are labelled, whatever their absolute
//! scores.

pub mod isolation_forest;

pub use isolation_forest::{IsolationForest, IsolationForestParams};

use crate::error::{AnalysisError, Result};
use crate::types::{Corpus, FeatureMatrix};

/// Trait for anomaly scoring components.
pub trait AnomalyScorer {
    /// Score every row of `matrix`. Returns one score per row where higher
    /// means more anomalous.
    fn score(&self, matrix: &FeatureMatrix<'_>) -> Result<Vec<f64>>;
}

/// Scores and labels produced for one corpus.
#[derive(Debug, Clone, PartialEq)]
pub struct AnomalyOutcome {
    pub scores: Vec<f64>,
    pub labels: Vec<bool>,
}

impl AnomalyOutcome {
    pub fn anomaly_count(&self) -> usize {
        self.labels.iter().filter(|&&l| l).count()
    }
}

/// How many of `records` a contamination fraction selects.
pub fn anomaly_budget(records: usize, contamination: f64) -> usize {
    ((contamination * records as f64).round() as usize).min(records)
}

/// Label the `round(contamination × N)` highest scores. Ties go to the record
/// that comes first in the corpus.
pub fn label_top_fraction(scores: &[f64], contamination: f64) -> Result<Vec<bool>> {
    if !(contamination > 0.0 && contamination < 1.0) {
        return Err(AnalysisError::InvalidContamination(contamination));
    }

    let budget = anomaly_budget(scores.len(), contamination);
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]).then(a.cmp(&b)));

    let mut labels = vec![false; scores.len()];
    for &index in order.iter().take(budget) {
        labels[index] = true;
    }
    Ok(labels)
}

/// Score the corpus with `scorer` and return scores plus labels.
pub fn detect(
    scorer: &dyn AnomalyScorer,
    matrix: &FeatureMatrix<'_>,
    contamination: f64,
) -> Result<AnomalyOutcome> {
    let scores = scorer.score(matrix)?;
    let labels = label_top_fraction(&scores, contamination)?;
    Ok(AnomalyOutcome { scores, labels })
}

/// Run the isolation forest over a vectorized corpus and write `is_anomaly`
/// onto every record.
pub fn annotate(
    corpus: &mut Corpus,
    params: IsolationForestParams,
    contamination: f64,
) -> Result<AnomalyOutcome> {
    let outcome = {
        let matrix = corpus.feature_matrix()?;
        detect(&IsolationForest::new(params), &matrix, contamination)?
    };
    corpus.mark_anomalies(&outcome.labels)?;

    let found = outcome.anomaly_count();
    if found == 0 {
        tracing::warn!(
            records = corpus.len(),
            contamination,
            "contamination fraction selects no records"
        );
    }
    tracing::info!(anomalies = found, records = corpus.len(), "anomaly detection done");
    Ok(outcome)
}
