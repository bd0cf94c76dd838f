//! Error taxonomy for the analysis pipeline.
//!
//! Every variant is terminal for the run. Structural mismatches in the input
//! are not errors at all; the parser drops those lines.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by any pipeline stage.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The input file could not be opened or read.
    #[error("cannot read log file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A stage that needs at least one record was handed an empty corpus.
    #[error("corpus is empty; no input line matched the syslog pattern")]
    EmptyCorpus,

    /// Every message was empty or consisted only of stop words.
    #[error("empty vocabulary; messages contain only stop words or no terms")]
    EmptyVocabulary,

    /// Fewer records than requested clusters.
    #[error("cannot form {clusters} clusters from {records} records")]
    TooFewRecords { records: usize, clusters: usize },

    #[error("contamination must lie strictly between 0 and 1, got {0}")]
    InvalidContamination(f64),

    #[error("cluster count must be at least 1, got {0}")]
    InvalidClusterCount(usize),

    #[error("isolation forest needs at least one tree and one sample per tree")]
    InvalidForestSize,

    /// A record reached a model stage without a feature vector.
    #[error("record {index} has no feature vector; run the vectorizer first")]
    NotVectorized { index: usize },

    #[error("feature vectors are already attached to this corpus")]
    AlreadyVectorized,

    /// An annotation slice does not line up with the corpus.
    #[error("expected {expected} annotations, got {actual}")]
    RecordCountMismatch { expected: usize, actual: usize },

    #[error(transparent)]
    Config(#[from] config::ConfigError),
}

/// Result alias used throughout the core crate.
pub type Result<T> = std::result::Result<T, AnalysisError>;
