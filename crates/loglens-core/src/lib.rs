//! loglens-core — log triage core library.
//!
//! This crate exposes the pipeline stages as public modules, plus the shared
//! types used across all stages.
//!
//! # Architecture
//!
//! ```text
//! Parser ──► Normalizer ──► Vectorizer ──┬──► Anomaly ──┬──► Report
//!                                        └──► Cluster ──┘
//! ```
//!
//! Every stage consumes the complete output of the previous one. The corpus is
//! fixed after parsing; downstream stages only annotate it.

pub mod anomaly;
pub mod cluster;
pub mod config;
pub mod error;
pub mod normalizer;
pub mod parser;
pub mod report;
pub mod types;
pub mod vectorizer;

pub use error::{AnalysisError, Result};
pub use types::{Corpus, FeatureMatrix, LogRecord, ParsedLine, SparseVector};
