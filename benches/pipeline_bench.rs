//! Pipeline stage benchmarks.
//!
//! Each stage runs once per input, so these track how each one scales with
//! corpus size rather than per-line latency.
//!
//! # Groups
//!
//! | Group | What it measures |
//! |-------|-----------------|
//! | `parse` | Regex parsing plus normalization of raw syslog text |
//! | `vectorize` | TF-IDF fit and transform over normalized messages |
//! | `isolation_forest` | Forest growth and scoring |
//! | `kmeans` | k-means++ seeding and refinement |
//! | `end_to_end` | Every stage after reading the file, plus report rendering |
//!
//! # Viewing results
//!
//! ```sh
//! cargo bench --bench pipeline_bench
//! open target/criterion/report/index.html
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use loglens::config::Config;
use loglens::pipeline;
use loglens_core::anomaly::{AnomalyScorer, IsolationForest, IsolationForestParams};
use loglens_core::cluster::{kmeans, KMeansParams};
use loglens_core::vectorizer::{vectorize, TfidfModel};
use loglens_core::{parser, Corpus};
use std::hint::black_box;

const SIZES: [usize; 3] = [100, 1_000, 10_000];

fn syslog_text(n: usize) -> String {
    let mut text = String::with_capacity(n * 96);
    for i in 0..n {
        let line = match i % 4 {
            0 => format!(
                "Dec 10 06:{:02}:{:02} server1 CRON[{}]: pam_unix(cron:session): session closed for user root\n",
                i / 60 % 60,
                i % 60,
                1000 + i
            ),
            1 => format!(
                "Dec 10 06:{:02}:{:02} server1 sshd[{}]: Failed password for invalid user guest from 10.0.{}.{} port {} ssh2\n",
                i / 60 % 60,
                i % 60,
                2000 + i,
                i % 255,
                (i * 7) % 255,
                40000 + i % 20000
            ),
            2 => format!(
                "Dec 10 06:{:02}:{:02} server1 systemd[1]: Started Session {} of user admin.\n",
                i / 60 % 60,
                i % 60,
                i
            ),
            _ if i % 97 == 3 => format!(
                "Dec 10 06:{:02}:{:02} server1 kernel: segfault at 0x{:x} ip 0x{:x} error 4\n",
                i / 60 % 60,
                i % 60,
                i * 4096,
                i * 13
            ),
            _ => format!(
                "Dec 10 06:{:02}:{:02} server1 nginx[812]: GET /api/v1/items/{} 200 {}ms\n",
                i / 60 % 60,
                i % 60,
                i,
                i % 900
            ),
        };
        text.push_str(&line);
    }
    text
}

fn vectorized(n: usize) -> Corpus {
    let mut corpus = parser::parse_str(&syslog_text(n));
    vectorize(&mut corpus).expect("bench corpus has a vocabulary");
    corpus
}

fn parse_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for n in SIZES {
        let text = syslog_text(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &text, |b, text| {
            b.iter(|| black_box(parser::parse_str(text)))
        });
    }
    group.finish();
}

fn vectorize_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("vectorize");
    for n in SIZES {
        let corpus = parser::parse_str(&syslog_text(n));
        let documents = corpus.clean_messages();
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &documents, |b, documents| {
            b.iter(|| {
                let model = TfidfModel::fit(documents).expect("vocabulary");
                black_box(model.transform_all(documents))
            })
        });
    }
    group.finish();
}

fn isolation_forest_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("isolation_forest");
    group.sample_size(10);
    let forest = IsolationForest::new(IsolationForestParams::default());
    for n in SIZES {
        let corpus = vectorized(n);
        let matrix = corpus.feature_matrix().expect("vectorized");
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &matrix, |b, matrix| {
            b.iter(|| black_box(forest.score(matrix).expect("score")))
        });
    }
    group.finish();
}

fn kmeans_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("kmeans");
    group.sample_size(10);
    for n in SIZES {
        let corpus = vectorized(n);
        let matrix = corpus.feature_matrix().expect("vectorized");
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &matrix, |b, matrix| {
            b.iter(|| black_box(kmeans(matrix, KMeansParams::default()).expect("kmeans")))
        });
    }
    group.finish();
}

fn end_to_end_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("end_to_end");
    group.sample_size(10);
    let config = Config::defaults();
    for n in SIZES {
        let text = syslog_text(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &text, |b, text| {
            b.iter(|| {
                let corpus = parser::parse_str(text);
                let analysis =
                    pipeline::analyze(corpus, &config, &mut std::io::sink()).expect("analysis");
                black_box(analysis.report(&config))
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    parse_bench,
    vectorize_bench,
    isolation_forest_bench,
    kmeans_bench,
    end_to_end_bench
);
criterion_main!(benches);
