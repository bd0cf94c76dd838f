#![allow(dead_code)]
//! Test builders — ergonomic constructors for records, corpora and input
//! files.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use loglens_core::config::Config;
use loglens_core::{Corpus, LogRecord, ParsedLine};
use std::io::Write;

// ---------------------------------------------------------------------------
// RecordBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`LogRecord`] test fixtures.
pub struct RecordBuilder {
    timestamp: String,
    host: String,
    process: String,
    message: String,
}

impl RecordBuilder {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            timestamp: "Dec 10 06:55:01".to_string(),
            host: "server1".to_string(),
            process: "app".to_string(),
            message: message.into(),
        }
    }

    pub fn timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = timestamp.into();
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn process(mut self, process: impl Into<String>) -> Self {
        self.process = process.into();
        self
    }

    pub fn build(self) -> LogRecord {
        LogRecord::from_parsed(ParsedLine {
            timestamp: self.timestamp,
            host: self.host,
            process: self.process,
            message: self.message,
        })
    }
}

// ---------------------------------------------------------------------------
// Corpus helpers
// ---------------------------------------------------------------------------

/// Parse a slice of raw lines into a corpus.
pub fn corpus_from_lines<S: AsRef<str>>(lines: &[S]) -> Corpus {
    let content = lines
        .iter()
        .map(|l| l.as_ref())
        .collect::<Vec<_>>()
        .join("\n");
    loglens_core::parser::parse_str(&content)
}

/// Write `lines` to a temporary `.log` file. Keep the handle alive for as
/// long as the path is used.
pub fn write_log_file<S: AsRef<str>>(lines: &[S]) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".log")
        .tempfile()
        .expect("create temp log file");
    for line in lines {
        writeln!(file, "{}", line.as_ref()).expect("write temp log file");
    }
    file.flush().expect("flush temp log file");
    file
}

/// Built-in defaults pointed at `path`, with the given contamination.
pub fn config_for(path: &std::path::Path, contamination: f64) -> Config {
    let mut config = Config::defaults();
    config.input.path = path.to_path_buf();
    config.anomaly.contamination = contamination;
    config
}
