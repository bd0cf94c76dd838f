//! Isolation forest over sparse feature vectors.
//!
//! Each tree is grown on a random subsample by splitting on a random feature
//! at a random threshold until a node holds one record or the depth limit is
//! hit. Records that are isolated after few splits score close to 1.

use super::AnomalyScorer;
use crate::error::{AnalysisError, Result};
use crate::types::{FeatureMatrix, SparseVector};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;

const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

/// Forest shape and seed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IsolationForestParams {
    pub trees: usize,
    /// Upper bound on the subsample each tree is grown on.
    pub max_samples: usize,
    pub seed: u64,
}

impl Default for IsolationForestParams {
    fn default() -> Self {
        Self {
            trees: 100,
            max_samples: 256,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        size: usize,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

#[derive(Debug, Clone)]
struct IsolationTree {
    root: Node,
}

impl IsolationTree {
    fn grow(rows: &[&SparseVector], sample: Vec<usize>, max_depth: usize, rng: &mut ChaCha8Rng) -> Self {
        Self {
            root: grow_node(rows, sample, 0, max_depth, rng),
        }
    }

    /// Depth at which `x` lands, plus the expected remaining depth of the
    /// leaf it lands in.
    fn path_length(&self, x: &SparseVector) -> f64 {
        let mut node = &self.root;
        let mut depth = 0usize;
        loop {
            match node {
                Node::Leaf { size } => return depth as f64 + average_path_length(*size),
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if x.get(*feature) <= *threshold { left } else { right };
                    depth += 1;
                }
            }
        }
    }
}

fn grow_node(
    rows: &[&SparseVector],
    sample: Vec<usize>,
    depth: usize,
    max_depth: usize,
    rng: &mut ChaCha8Rng,
) -> Node {
    if sample.len() <= 1 || depth >= max_depth {
        return Node::Leaf { size: sample.len() };
    }

    let candidates = splittable_features(rows, &sample);
    if candidates.is_empty() {
        // every record in the node is identical
        return Node::Leaf { size: sample.len() };
    }

    let (feature, min, max) = candidates[rng.random_range(0..candidates.len())];
    let threshold = rng.random_range(min..max);
    let (left, right): (Vec<usize>, Vec<usize>) = sample
        .into_iter()
        .partition(|&i| rows[i].get(feature) <= threshold);

    Node::Split {
        feature,
        threshold,
        left: Box::new(grow_node(rows, left, depth + 1, max_depth, rng)),
        right: Box::new(grow_node(rows, right, depth + 1, max_depth, rng)),
    }
}

/// Features that take more than one value within `sample`, with their range.
/// Ordered by feature index so the draw is reproducible.
fn splittable_features(rows: &[&SparseVector], sample: &[usize]) -> Vec<(usize, f64, f64)> {
    // feature -> (min, max, rows holding a non-zero value)
    let mut ranges: BTreeMap<usize, (f64, f64, usize)> = BTreeMap::new();
    for &i in sample {
        for (feature, value) in rows[i].iter() {
            let entry = ranges.entry(feature).or_insert((value, value, 0));
            entry.0 = entry.0.min(value);
            entry.1 = entry.1.max(value);
            entry.2 += 1;
        }
    }

    ranges
        .into_iter()
        .map(|(feature, (mut min, mut max, present))| {
            if present < sample.len() {
                min = min.min(0.0);
                max = max.max(0.0);
            }
            (feature, min, max)
        })
        .filter(|&(_, min, max)| min < max)
        .collect()
}

/// Average path length of an unsuccessful search in a binary search tree of
/// `n` nodes.
pub fn average_path_length(n: usize) -> f64 {
    match n {
        0 | 1 => 0.0,
        2 => 1.0,
        _ => {
            let n = n as f64;
            2.0 * ((n - 1.0).ln() + EULER_GAMMA) - 2.0 * (n - 1.0) / n
        }
    }
}

/// Isolation-forest scorer. The forest is grown inside [`AnomalyScorer::score`]
/// from the matrix it is asked to score.
#[derive(Debug, Clone)]
pub struct IsolationForest {
    params: IsolationForestParams,
}

impl IsolationForest {
    pub fn new(params: IsolationForestParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> IsolationForestParams {
        self.params
    }
}

impl AnomalyScorer for IsolationForest {
    fn score(&self, matrix: &FeatureMatrix<'_>) -> Result<Vec<f64>> {
        if matrix.is_empty() {
            return Err(AnalysisError::EmptyCorpus);
        }
        if matrix.dimension() == 0 {
            return Err(AnalysisError::EmptyVocabulary);
        }
        if self.params.trees == 0 || self.params.max_samples == 0 {
            return Err(AnalysisError::InvalidForestSize);
        }

        let rows = matrix.rows();
        let n = rows.len();
        let sample_size = self.params.max_samples.min(n);
        let max_depth = (sample_size as f64).log2().ceil() as usize;
        let mut rng = ChaCha8Rng::seed_from_u64(self.params.seed);

        let forest: Vec<IsolationTree> = (0..self.params.trees)
            .map(|_| {
                let sample = rand::seq::index::sample(&mut rng, n, sample_size).into_vec();
                IsolationTree::grow(rows, sample, max_depth, &mut rng)
            })
            .collect();

        let normaliser = average_path_length(sample_size);
        let scores = rows
            .iter()
            .map(|x| {
                let mean_path = forest.iter().map(|t| t.path_length(x)).sum::<f64>()
                    / forest.len() as f64;
                if normaliser == 0.0 {
                    0.5
                } else {
                    2f64.powf(-mean_path / normaliser)
                }
            })
            .collect();

        tracing::debug!(
            trees = forest.len(),
            sample_size,
            max_depth,
            "scored corpus with isolation forest"
        );
        Ok(scores)
    }
}
