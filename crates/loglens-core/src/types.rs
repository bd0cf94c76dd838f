//! Core types for loglens-core.
//!
//! This module defines the data structures shared across all pipeline
//! stages: the parsed [`ParsedLine`], the annotated [`LogRecord`], the ordered
//! [`Corpus`], and the sparse feature representation ([`SparseVector`],
//! [`FeatureMatrix`]).

use crate::error::{AnalysisError, Result};
use crate::normalizer;

/// The four fields captured from one well-formed syslog line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    /// `Mon DD HH:MM:SS`, kept as text.
    pub timestamp: String,
    pub host: String,
    /// Process label, including any bracketed PID (`sshd[1234]`).
    pub process: String,
    pub message: String,
}

/// One record of the corpus, annotated in place by the downstream stages.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub timestamp: String,
    pub host: String,
    pub process: String,
    /// The message exactly as it appeared on the line.
    pub message: String,
    /// `message` with volatile values replaced by placeholders.
    pub clean_message: String,
    /// Set once by the vectorizer pass.
    pub feature_vector: Option<SparseVector>,
    /// Set by the anomaly detector.
    pub is_anomaly: Option<bool>,
    /// Set by the clusterer; always in `[0, k)`.
    pub cluster_id: Option<usize>,
}

impl LogRecord {
    /// Build a record from a parsed line, deriving `clean_message`.
    pub fn from_parsed(line: ParsedLine) -> Self {
        let clean_message = normalizer::normalize(&line.message);
        Self {
            timestamp: line.timestamp,
            host: line.host,
            process: line.process,
            message: line.message,
            clean_message,
            feature_vector: None,
            is_anomaly: None,
            cluster_id: None,
        }
    }
}

impl From<ParsedLine> for LogRecord {
    fn from(line: ParsedLine) -> Self {
        Self::from_parsed(line)
    }
}

// ---------------------------------------------------------------------------
// Sparse features
// ---------------------------------------------------------------------------

/// A sparse vector over the corpus vocabulary.
///
/// Indices are strictly increasing; absent indices are zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    indices: Vec<usize>,
    values: Vec<f64>,
}

impl SparseVector {
    /// Build from `(index, value)` pairs. Pairs are sorted by index and zero
    /// values are dropped; duplicate indices are summed.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (usize, f64)>) -> Self {
        let mut pairs: Vec<(usize, f64)> = pairs.into_iter().collect();
        pairs.sort_by_key(|&(i, _)| i);

        let mut indices: Vec<usize> = Vec::with_capacity(pairs.len());
        let mut values: Vec<f64> = Vec::with_capacity(pairs.len());
        for (index, value) in pairs {
            match indices.last() {
                Some(&last) if last == index => {
                    if let Some(v) = values.last_mut() {
                        *v += value;
                    }
                }
                _ => {
                    indices.push(index);
                    values.push(value);
                }
            }
        }

        let (indices, values): (Vec<usize>, Vec<f64>) = indices
            .into_iter()
            .zip(values)
            .filter(|&(_, v)| v != 0.0)
            .unzip();
        Self { indices, values }
    }

    /// Value at `index`, zero when absent.
    pub fn get(&self, index: usize) -> f64 {
        self.indices
            .binary_search(&index)
            .map(|pos| self.values[pos])
            .unwrap_or(0.0)
    }

    /// Iterate over the non-zero entries in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    /// Number of non-zero entries.
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn norm_squared(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum()
    }

    /// Dot product with a dense vector of at least `max index + 1` entries.
    pub fn dot_dense(&self, dense: &[f64]) -> f64 {
        self.iter().map(|(i, v)| v * dense[i]).sum()
    }

    /// Squared Euclidean distance to a dense point whose squared norm is
    /// already known.
    pub fn squared_distance_to(&self, dense: &[f64], dense_norm_squared: f64) -> f64 {
        (self.norm_squared() - 2.0 * self.dot_dense(dense) + dense_norm_squared).max(0.0)
    }
}

/// Borrowed view over every record's feature vector, in corpus order.
#[derive(Debug, Clone)]
pub struct FeatureMatrix<'a> {
    dimension: usize,
    rows: Vec<&'a SparseVector>,
}

impl<'a> FeatureMatrix<'a> {
    pub fn new(dimension: usize, rows: Vec<&'a SparseVector>) -> Self {
        Self { dimension, rows }
    }

    /// Vocabulary size shared by every row.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn rows(&self) -> &[&'a SparseVector] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> &'a SparseVector {
        self.rows[index]
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Corpus
// ---------------------------------------------------------------------------

/// The ordered sequence of records built once per run.
///
/// Records are never added, removed, or reordered after parsing; the
/// `attach_*` / `mark_*` / `assign_*` methods only annotate them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Corpus {
    records: Vec<LogRecord>,
    skipped_lines: usize,
    feature_dimension: Option<usize>,
}

impl Corpus {
    pub fn new(records: Vec<LogRecord>, skipped_lines: usize) -> Self {
        Self {
            records,
            skipped_lines,
            feature_dimension: None,
        }
    }

    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of input lines that did not match the syslog pattern.
    pub fn skipped_lines(&self) -> usize {
        self.skipped_lines
    }

    /// Normalized messages in corpus order.
    pub fn clean_messages(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.clean_message.as_str()).collect()
    }

    /// Attach one feature vector per record, all over a vocabulary of
    /// `dimension` terms. Vectors are attached once; a second call fails and
    /// leaves the existing vectors in place.
    pub fn attach_features(&mut self, dimension: usize, rows: Vec<SparseVector>) -> Result<()> {
        if self.feature_dimension.is_some() {
            return Err(AnalysisError::AlreadyVectorized);
        }
        check_len(self.records.len(), rows.len())?;
        for (record, row) in self.records.iter_mut().zip(rows) {
            record.feature_vector = Some(row);
        }
        self.feature_dimension = Some(dimension);
        Ok(())
    }

    /// Borrow the feature vectors as a matrix for the model stages.
    pub fn feature_matrix(&self) -> Result<FeatureMatrix<'_>> {
        if self.records.is_empty() {
            return Err(AnalysisError::EmptyCorpus);
        }
        let dimension = self
            .feature_dimension
            .ok_or(AnalysisError::NotVectorized { index: 0 })?;
        if dimension == 0 {
            return Err(AnalysisError::EmptyVocabulary);
        }
        let rows = self
            .records
            .iter()
            .enumerate()
            .map(|(index, r)| {
                r.feature_vector
                    .as_ref()
                    .ok_or(AnalysisError::NotVectorized { index })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(FeatureMatrix::new(dimension, rows))
    }

    pub fn mark_anomalies(&mut self, labels: &[bool]) -> Result<()> {
        check_len(self.records.len(), labels.len())?;
        for (record, &label) in self.records.iter_mut().zip(labels) {
            record.is_anomaly = Some(label);
        }
        Ok(())
    }

    pub fn assign_clusters(&mut self, cluster_ids: &[usize]) -> Result<()> {
        check_len(self.records.len(), cluster_ids.len())?;
        for (record, &id) in self.records.iter_mut().zip(cluster_ids) {
            record.cluster_id = Some(id);
        }
        Ok(())
    }

    /// Records labelled anomalous, in corpus order.
    pub fn anomalies(&self) -> impl Iterator<Item = &LogRecord> {
        self.records.iter().filter(|r| r.is_anomaly == Some(true))
    }

    /// Records assigned to `cluster_id`, in corpus order.
    pub fn cluster_members(&self, cluster_id: usize) -> impl Iterator<Item = &LogRecord> {
        self.records
            .iter()
            .filter(move |r| r.cluster_id == Some(cluster_id))
    }
}

fn check_len(expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(AnalysisError::RecordCountMismatch { expected, actual })
    }
}
