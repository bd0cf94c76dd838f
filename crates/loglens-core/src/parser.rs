//! Parser — turns raw syslog text into an ordered [`Corpus`].
//!
//! A line is accepted only when the whole trimmed line matches
//! `<Mon DD HH:MM:SS> <host> <process>: <message>`. Anything else is dropped
//! without error; the drop count is kept on the corpus.

use crate::error::{AnalysisError, Result};
use crate::types::{Corpus, LogRecord, ParsedLine};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

// timestamp, host, process (lazy: stops at the first ": "), message
static SYSLOG_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\w{3}\s+\d+\s\d+:\d+:\d+)\s(\w+)\s(.*?):\s(.*)$")
        .expect("syslog line pattern must compile")
});

/// Parse a single line. Returns `None` when it does not match the pattern.
pub fn parse_line(line: &str) -> Option<ParsedLine> {
    let caps = SYSLOG_LINE.captures(line.trim())?;
    Some(ParsedLine {
        timestamp: caps[1].to_string(),
        host: caps[2].to_string(),
        process: caps[3].to_string(),
        message: caps[4].to_string(),
    })
}

/// Parse every line of `content` into a corpus, normalizing messages on the
/// way in.
pub fn parse_str(content: &str) -> Corpus {
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for line in content.lines() {
        match parse_line(line) {
            Some(parsed) => records.push(LogRecord::from_parsed(parsed)),
            None => skipped += 1,
        }
    }

    tracing::debug!(
        parsed = records.len(),
        skipped,
        "parsed syslog content"
    );
    Corpus::new(records, skipped)
}

/// Read the whole file at `path` and parse it. Invalid UTF-8 is replaced
/// rather than rejected.
pub fn parse_file(path: &Path) -> Result<Corpus> {
    let bytes = std::fs::read(path).map_err(|source| AnalysisError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let content = String::from_utf8_lossy(&bytes);
    Ok(parse_str(&content))
}
