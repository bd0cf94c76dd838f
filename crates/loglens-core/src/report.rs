//! Reporter — renders the annotated corpus as plain text.
//!
//! Pure presentation: reads the corpus, never mutates it.

use crate::types::{Corpus, LogRecord};

const RULE_WIDTH: usize = 50;

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

fn push_banner(out: &mut String, title: &str) {
    let rule = "=".repeat(RULE_WIDTH);
    push_line(out, &rule);
    push_line(out, title);
    push_line(out, &rule);
}

/// Render the anomaly section followed by the clustering section.
pub fn render(corpus: &Corpus, clusters: usize, samples_per_cluster: usize) -> String {
    let mut out = render_anomalies(corpus);
    out.push('\n');
    out.push_str(&render_clusters(corpus, clusters, samples_per_cluster));
    out
}

/// Header with the anomaly count, then one table row per anomalous record.
pub fn render_anomalies(corpus: &Corpus) -> String {
    let anomalies: Vec<&LogRecord> = corpus.anomalies().collect();
    let mut out = String::new();

    push_banner(
        &mut out,
        &format!("🚨 ANOMALY REPORT: Found {} suspicious events", anomalies.len()),
    );

    if anomalies.is_empty() {
        push_line(&mut out, "No anomalies detected. System looks clean!");
        return out;
    }

    let ts_width = anomalies
        .iter()
        .map(|r| r.timestamp.chars().count())
        .chain(["Timestamp".len()])
        .max()
        .unwrap_or(0);
    let proc_width = anomalies
        .iter()
        .map(|r| r.process.chars().count())
        .chain(["Process".len()])
        .max()
        .unwrap_or(0);

    push_line(
        &mut out,
        &format!("{:<ts_width$}  {:<proc_width$}  Message", "Timestamp", "Process"),
    );
    for record in anomalies {
        push_line(
            &mut out,
            &format!(
                "{:<ts_width$}  {:<proc_width$}  {}",
                record.timestamp, record.process, record.message
            ),
        );
    }
    out
}

/// Up to `samples_per_cluster` raw messages for each of the `clusters`
/// clusters, in corpus order.
pub fn render_clusters(corpus: &Corpus, clusters: usize, samples_per_cluster: usize) -> String {
    let mut out = String::new();
    push_banner(&mut out, "📊 CLUSTERING REPORT (Grouping similar logs)");

    for cluster in 0..clusters {
        out.push('\n');
        push_line(&mut out, &format!("Cluster {cluster} Sample Logs:"));
        let mut samples = corpus.cluster_members(cluster).take(samples_per_cluster).peekable();
        if samples.peek().is_none() {
            push_line(&mut out, "(no records)");
        }
        for record in samples {
            push_line(&mut out, &record.message);
        }
    }
    out
}
