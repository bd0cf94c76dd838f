//! loglens — batch syslog triage.
//!
//! Reads one syslog file, surfaces the statistically unusual lines with an
//! isolation forest and groups the rest with k-means. The stages live in
//! [`loglens_core`]; this crate wires them together and drives the binary.
//!
//! # Architecture
//!
//! ```text
//! Parser ──► Normalizer ──► Vectorizer ──┬──► Anomaly ──┬──► Report
//!                                        └──► Cluster ──┘
//! ```
//!
//! Execution is single-threaded and strictly sequential. Any stage failure
//! aborts the run before the report is rendered.

pub mod pipeline;

pub use loglens_core::*;
