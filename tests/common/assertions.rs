//! Domain-specific assertion macros for loglens harnesses.
//!
//! These add context-rich failure messages that make it clear *which*
//! pipeline invariant was violated.

/// Assert that exactly the records at `$indices` are labelled anomalous.
///
/// ```rust
/// assert_anomalies_at!(corpus, [9]);
/// ```
#[macro_export]
macro_rules! assert_anomalies_at {
    ($corpus:expr, [$($index:expr),* $(,)?]) => {{
        let corpus: &loglens_core::Corpus = &$corpus;
        let expected: Vec<usize> = vec![$($index),*];
        let actual: Vec<usize> = corpus
            .records()
            .iter()
            .enumerate()
            .filter(|(_, r)| r.is_anomaly == Some(true))
            .map(|(i, _)| i)
            .collect();
        if actual != expected {
            panic!(
                "assert_anomalies_at! failed:\n  expected: {:?}\n  actual:   {:?}\n  messages: {:?}",
                expected,
                actual,
                actual
                    .iter()
                    .map(|&i| corpus.records()[i].message.as_str())
                    .collect::<Vec<_>>()
            );
        }
    }};
}

/// Assert that every record carries a cluster id below `$k` and that every
/// cluster has at least one member.
#[macro_export]
macro_rules! assert_cluster_coverage {
    ($corpus:expr, $k:expr) => {{
        let corpus: &loglens_core::Corpus = &$corpus;
        let k: usize = $k;
        let mut sizes = vec![0usize; k];
        for (i, record) in corpus.records().iter().enumerate() {
            match record.cluster_id {
                Some(id) if id < k => sizes[id] += 1,
                other => panic!(
                    "assert_cluster_coverage! failed: record {} has cluster_id {:?} (k = {})",
                    i, other, k
                ),
            }
        }
        if corpus.len() >= k && sizes.iter().any(|&s| s == 0) {
            panic!(
                "assert_cluster_coverage! failed: empty cluster with N = {} >= k = {}; sizes {:?}",
                corpus.len(),
                k,
                sizes
            );
        }
    }};
}
