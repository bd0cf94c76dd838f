//! Clusterer — seeded k-means over the sparse feature vectors.
//!
//! Centroids are seeded with k-means++ and refined by alternating
//! nearest-centroid assignment and mean recomputation until assignments stop
//! changing or the iteration cap is reached. A cluster that ends up empty is
//! re-seeded with the point farthest from its centroid, so every cluster is
//! non-empty whenever `N >= k`.

use crate::error::{AnalysisError, Result};
use crate::types::{Corpus, FeatureMatrix, SparseVector};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KMeansParams {
    pub clusters: usize,
    pub max_iterations: usize,
    pub seed: u64,
}

impl Default for KMeansParams {
    fn default() -> Self {
        Self {
            clusters: 3,
            max_iterations: 300,
            seed: 42,
        }
    }
}

/// Final assignment of every row.
#[derive(Debug, Clone, PartialEq)]
pub struct Clustering {
    /// Cluster id per row, in `[0, k)`.
    pub assignments: Vec<usize>,
    /// Dense centroids, one per cluster.
    pub centroids: Vec<Vec<f64>>,
    pub iterations: usize,
    pub converged: bool,
}

impl Clustering {
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.centroids.len()];
        for &c in &self.assignments {
            sizes[c] += 1;
        }
        sizes
    }
}

fn densify(v: &SparseVector, dimension: usize) -> Vec<f64> {
    let mut dense = vec![0.0; dimension];
    for (i, value) in v.iter() {
        dense[i] = value;
    }
    dense
}

fn norm_squared(dense: &[f64]) -> f64 {
    dense.iter().map(|x| x * x).sum()
}

/// k-means++: first centroid uniform, then each next one drawn with
/// probability proportional to its squared distance from the nearest chosen
/// centroid.
fn seed_centroids(matrix: &FeatureMatrix<'_>, k: usize, rng: &mut ChaCha8Rng) -> Vec<Vec<f64>> {
    let n = matrix.len();
    let dimension = matrix.dimension();
    let mut chosen: Vec<usize> = vec![rng.random_range(0..n)];
    let mut centroids = vec![densify(matrix.row(chosen[0]), dimension)];
    let mut nearest = vec![f64::INFINITY; n];

    while centroids.len() < k {
        let last = &centroids[centroids.len() - 1];
        let last_norm = norm_squared(last);
        for (i, d) in nearest.iter_mut().enumerate() {
            *d = d.min(matrix.row(i).squared_distance_to(last, last_norm));
        }

        let total: f64 = nearest.iter().sum();
        let next = if total > 0.0 {
            let mut target = rng.random::<f64>() * total;
            let mut pick = None;
            for (i, &d) in nearest.iter().enumerate() {
                if d > 0.0 {
                    pick = Some(i);
                    if target < d {
                        break;
                    }
                    target -= d;
                }
            }
            pick
        } else {
            None
        };
        // all remaining points coincide with a centroid: take the first unused row
        let next = next
            .or_else(|| (0..n).find(|i| !chosen.contains(i)))
            .unwrap_or(0);

        chosen.push(next);
        centroids.push(densify(matrix.row(next), dimension));
    }
    centroids
}

fn assign(matrix: &FeatureMatrix<'_>, centroids: &[Vec<f64>]) -> Vec<usize> {
    let norms: Vec<f64> = centroids.iter().map(|c| norm_squared(c)).collect();
    matrix
        .rows()
        .iter()
        .map(|x| {
            let mut best = 0;
            let mut best_distance = f64::INFINITY;
            for (c, centroid) in centroids.iter().enumerate() {
                let d = x.squared_distance_to(centroid, norms[c]);
                if d < best_distance {
                    best = c;
                    best_distance = d;
                }
            }
            best
        })
        .collect()
}

/// Move the farthest point of a multi-member cluster into each empty one.
fn relocate_empty(matrix: &FeatureMatrix<'_>, centroids: &mut [Vec<f64>], assignments: &mut [usize]) {
    let k = centroids.len();
    loop {
        let mut sizes = vec![0usize; k];
        for &c in assignments.iter() {
            sizes[c] += 1;
        }
        let Some(empty) = sizes.iter().position(|&s| s == 0) else {
            return;
        };

        let norms: Vec<f64> = centroids.iter().map(|c| norm_squared(c)).collect();
        let farthest = assignments
            .iter()
            .enumerate()
            .filter(|&(_, &c)| sizes[c] > 1)
            .map(|(i, &c)| (i, matrix.row(i).squared_distance_to(&centroids[c], norms[c])))
            .max_by(|a, b| a.1.total_cmp(&b.1).then(b.0.cmp(&a.0)));
        let Some((point, _)) = farthest else {
            // fewer points than clusters; nothing left to move
            return;
        };

        tracing::debug!(cluster = empty, point, "re-seeding empty cluster");
        assignments[point] = empty;
        centroids[empty] = densify(matrix.row(point), matrix.dimension());
    }
}

fn recompute(matrix: &FeatureMatrix<'_>, assignments: &[usize], centroids: &mut [Vec<f64>]) {
    let dimension = matrix.dimension();
    let mut sums = vec![vec![0.0; dimension]; centroids.len()];
    let mut counts = vec![0usize; centroids.len()];
    for (row, &c) in matrix.rows().iter().zip(assignments) {
        counts[c] += 1;
        for (i, value) in row.iter() {
            sums[c][i] += value;
        }
    }
    for ((centroid, sum), count) in centroids.iter_mut().zip(sums).zip(counts) {
        if count > 0 {
            *centroid = sum.into_iter().map(|s| s / count as f64).collect();
        }
    }
}

/// Partition every row of `matrix` into `params.clusters` groups.
pub fn kmeans(matrix: &FeatureMatrix<'_>, params: KMeansParams) -> Result<Clustering> {
    let k = params.clusters;
    if k == 0 {
        return Err(AnalysisError::InvalidClusterCount(0));
    }
    if matrix.is_empty() {
        return Err(AnalysisError::EmptyCorpus);
    }
    if matrix.dimension() == 0 {
        return Err(AnalysisError::EmptyVocabulary);
    }
    if matrix.len() < k {
        return Err(AnalysisError::TooFewRecords {
            records: matrix.len(),
            clusters: k,
        });
    }

    let mut rng = ChaCha8Rng::seed_from_u64(params.seed);
    let mut centroids = seed_centroids(matrix, k, &mut rng);
    let mut assignments = assign(matrix, &centroids);
    relocate_empty(matrix, &mut centroids, &mut assignments);

    let mut iterations = 0;
    let mut converged = false;
    while iterations < params.max_iterations {
        iterations += 1;
        recompute(matrix, &assignments, &mut centroids);
        let mut next = assign(matrix, &centroids);
        relocate_empty(matrix, &mut centroids, &mut next);
        if next == assignments {
            converged = true;
            break;
        }
        assignments = next;
    }

    tracing::debug!(iterations, converged, clusters = k, "k-means finished");
    Ok(Clustering {
        assignments,
        centroids,
        iterations,
        converged,
    })
}

/// Cluster a vectorized corpus and write `cluster_id` onto every record.
pub fn annotate(corpus: &mut Corpus, params: KMeansParams) -> Result<Clustering> {
    let clustering = {
        let matrix = corpus.feature_matrix()?;
        kmeans(&matrix, params)?
    };
    corpus.assign_clusters(&clustering.assignments)?;
    tracing::info!(sizes = ?clustering.cluster_sizes(), "clustering done");
    Ok(clustering)
}
