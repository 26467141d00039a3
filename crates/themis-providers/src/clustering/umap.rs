//! UMAP-style dimensionality reduction
//!
//! Builds a fuzzy k-nearest-neighbour graph under cosine distance, then
//! lays it out in `n_components` dimensions by stochastic gradient descent
//! with negative sampling. Randomness comes from a ChaCha8 generator seeded
//! with `ReductionParams::seed`, so a fixed seed gives identical output.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use themis_domain::error::{Error, Result};
use themis_domain::ports::providers::DimensionReducer;
use themis_domain::value_objects::{ReductionParams, Vector};
use tracing::debug;

use crate::constants::{
    UMAP_BANDWIDTH_ITERATIONS, UMAP_BANDWIDTH_TOLERANCE, UMAP_EPOCHS_LARGE, UMAP_EPOCHS_SMALL,
    UMAP_GRADIENT_CLIP, UMAP_INIT_RANGE, UMAP_LEARNING_RATE, UMAP_NEGATIVE_SAMPLE_RATE,
    UMAP_SMALL_INPUT_LIMIT,
};

/// Spread of the embedded points; fixed, `min_dist` is the tunable
const SPREAD: f32 = 1.0;

/// Neighbour-graph reducer implementing [`DimensionReducer`]
#[derive(Debug, Default, Clone, Copy)]
pub struct UmapReducer;

impl UmapReducer {
    /// Create a reducer
    pub fn new() -> Self {
        Self
    }
}

impl DimensionReducer for UmapReducer {
    fn reduce(&self, vectors: &[Vector], params: &ReductionParams) -> Result<Vec<Vector>> {
        validate(vectors, params)?;
        let n = vectors.len();
        let dim = params.n_components;
        if n == 0 {
            return Ok(Vec::new());
        }
        if n == 1 {
            return Ok(vec![vec![0.0; dim]]);
        }

        let k = params.n_neighbors.min(n - 1);
        let normalized: Vec<Vector> = vectors.iter().map(|v| l2_normalize(v)).collect();
        let knn = nearest_neighbors(&normalized, k);
        let edges = fuzzy_simplicial_set(&knn, k);
        let (a, b) = fit_ab(SPREAD, params.min_dist);
        let n_epochs = if n <= UMAP_SMALL_INPUT_LIMIT {
            UMAP_EPOCHS_SMALL
        } else {
            UMAP_EPOCHS_LARGE
        };
        debug!(points = n, k, edges = edges.len(), a, b, n_epochs, "Reducer graph built");

        let mut rng = ChaCha8Rng::seed_from_u64(params.seed);
        let mut embedding: Vec<f32> = (0..n * dim)
            .map(|_| rng.random_range(-UMAP_INIT_RANGE..UMAP_INIT_RANGE))
            .collect();

        optimize_layout(&mut embedding, dim, n, &edges, n_epochs, a, b, &mut rng);

        Ok(embedding.chunks(dim).map(<[f32]>::to_vec).collect())
    }
}

fn validate(vectors: &[Vector], params: &ReductionParams) -> Result<()> {
    if params.n_neighbors < 2 {
        return Err(Error::clustering("n_neighbors must be at least 2"));
    }
    if params.n_components == 0 {
        return Err(Error::clustering("n_components must be positive"));
    }
    if !(params.min_dist >= 0.0 && params.min_dist.is_finite()) {
        return Err(Error::clustering("min_dist must be a non-negative number"));
    }
    if let Some(first) = vectors.first() {
        let width = first.len();
        if vectors
            .iter()
            .any(|v| v.len() != width || v.iter().any(|x| !x.is_finite()))
        {
            return Err(Error::clustering(
                "Input vectors must share one dimension and be finite",
            ));
        }
    }
    Ok(())
}

fn l2_normalize(v: &[f32]) -> Vector {
    let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        v.iter().map(|x| x / norm).collect()
    } else {
        v.to_vec()
    }
}

/// `k` nearest neighbours of every point by cosine distance, self excluded
///
/// Inputs must be L2-normalised. Each row is sorted by ascending distance,
/// ties broken by index.
fn nearest_neighbors(normalized: &[Vector], k: usize) -> Vec<Vec<(usize, f32)>> {
    normalized
        .par_iter()
        .enumerate()
        .map(|(i, row)| {
            let mut distances: Vec<(usize, f32)> = normalized
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(j, other)| {
                    let dot: f32 = row.iter().zip(other).map(|(x, y)| x * y).sum();
                    (j, (1.0 - dot).max(0.0))
                })
                .collect();
            distances.sort_by(|x, y| {
                x.1.partial_cmp(&y.1)
                    .unwrap_or(Ordering::Equal)
                    .then(x.0.cmp(&y.0))
            });
            distances.truncate(k);
            distances
        })
        .collect()
}

/// Directed membership strengths, symmetrised with the fuzzy union
/// `w = w_ij + w_ji - w_ij * w_ji`
///
/// Returns both directions of every edge, in deterministic order.
fn fuzzy_simplicial_set(knn: &[Vec<(usize, f32)>], k: usize) -> Vec<(usize, usize, f32)> {
    let target = (k as f32).log2();
    let mean_distance = {
        let (sum, count) = knn
            .iter()
            .flatten()
            .fold((0.0f32, 0usize), |(s, c), &(_, d)| (s + d, c + 1));
        if count > 0 { sum / count as f32 } else { 0.0 }
    };

    let mut directed: BTreeMap<(usize, usize), f32> = BTreeMap::new();
    for (i, neighbors) in knn.iter().enumerate() {
        let rho = neighbors
            .iter()
            .map(|&(_, d)| d)
            .find(|&d| d > 0.0)
            .unwrap_or(0.0);
        let sigma = smooth_bandwidth(neighbors, rho, target, mean_distance);
        for &(j, d) in neighbors {
            let weight = if d - rho <= 0.0 || sigma == 0.0 {
                1.0
            } else {
                (-(d - rho) / sigma).exp()
            };
            directed.insert((i, j), weight);
        }
    }

    let mut symmetric: BTreeMap<(usize, usize), f32> = BTreeMap::new();
    for (&(i, j), &w_ij) in &directed {
        let w_ji = directed.get(&(j, i)).copied().unwrap_or(0.0);
        let weight = w_ij + w_ji - w_ij * w_ji;
        symmetric.insert((i, j), weight);
        symmetric.insert((j, i), weight);
    }
    symmetric
        .into_iter()
        .map(|((i, j), w)| (i, j, w))
        .collect()
}

/// Bandwidth `sigma` with `sum_j exp(-(d_j - rho) / sigma) = target`
fn smooth_bandwidth(neighbors: &[(usize, f32)], rho: f32, target: f32, mean_distance: f32) -> f32 {
    let mut lo = 0.0f32;
    let mut hi = f32::INFINITY;
    let mut mid = 1.0f32;

    for _ in 0..UMAP_BANDWIDTH_ITERATIONS {
        let psum: f32 = neighbors
            .iter()
            .map(|&(_, d)| {
                let gap = d - rho;
                if gap > 0.0 { (-gap / mid).exp() } else { 1.0 }
            })
            .sum();
        if (psum - target).abs() < UMAP_BANDWIDTH_TOLERANCE {
            break;
        }
        if psum > target {
            hi = mid;
            mid = (lo + hi) / 2.0;
        } else {
            lo = mid;
            mid = if hi.is_infinite() { mid * 2.0 } else { (lo + hi) / 2.0 };
        }
    }

    let own_mean = if neighbors.is_empty() {
        0.0
    } else {
        neighbors.iter().map(|&(_, d)| d).sum::<f32>() / neighbors.len() as f32
    };
    let floor = 1e-3 * if rho > 0.0 { own_mean } else { mean_distance };
    mid.max(floor)
}

/// Fit `1 / (1 + a * x^(2b))` to the target membership curve
///
/// The target is 1 below `min_dist` and `exp(-(x - min_dist) / spread)`
/// above, sampled on `[0, 3 * spread]`. Coarse-to-fine grid search on
/// least squares.
fn fit_ab(spread: f32, min_dist: f32) -> (f32, f32) {
    let samples: Vec<(f32, f32)> = (1..300)
        .map(|i| {
            let x = 3.0 * spread * i as f32 / 299.0;
            let y = if x < min_dist {
                1.0
            } else {
                (-(x - min_dist) / spread).exp()
            };
            (x, y)
        })
        .collect();
    let loss = |a: f32, b: f32| -> f32 {
        samples
            .iter()
            .map(|&(x, y)| {
                let fit = 1.0 / (1.0 + a * x.powf(2.0 * b));
                (fit - y) * (fit - y)
            })
            .sum()
    };

    let (mut a, mut b) = (1.5f32, 1.0f32);
    let (mut a_span, mut b_span) = (1.5f32, 0.9f32);
    for _ in 0..6 {
        let mut best = (loss(a, b), a, b);
        for ia in -10..=10 {
            for ib in -10..=10 {
                let ca = a + a_span * ia as f32 / 10.0;
                let cb = b + b_span * ib as f32 / 10.0;
                if ca <= 0.0 || cb <= 0.0 {
                    continue;
                }
                let l = loss(ca, cb);
                if l < best.0 {
                    best = (l, ca, cb);
                }
            }
        }
        a = best.1;
        b = best.2;
        a_span /= 4.0;
        b_span /= 4.0;
    }
    (a, b)
}

fn clip(value: f32) -> f32 {
    value.clamp(-UMAP_GRADIENT_CLIP, UMAP_GRADIENT_CLIP)
}

fn squared_distance(embedding: &[f32], dim: usize, i: usize, j: usize) -> f32 {
    (0..dim)
        .map(|d| {
            let diff = embedding[i * dim + d] - embedding[j * dim + d];
            diff * diff
        })
        .sum()
}

/// SGD over the edges: attraction along edges, repulsion from random points
#[allow(clippy::too_many_arguments)]
fn optimize_layout(
    embedding: &mut [f32],
    dim: usize,
    n: usize,
    edges: &[(usize, usize, f32)],
    n_epochs: usize,
    a: f32,
    b: f32,
    rng: &mut ChaCha8Rng,
) {
    let max_weight = edges.iter().map(|e| e.2).fold(0.0f32, f32::max);
    if max_weight <= 0.0 {
        return;
    }
    // Edges too weak to be sampled once over the whole run are dropped
    let edges: Vec<&(usize, usize, f32)> = edges
        .iter()
        .filter(|e| e.2 >= max_weight / n_epochs as f32)
        .collect();

    let epochs_per_sample: Vec<f32> = edges.iter().map(|e| max_weight / e.2).collect();
    let epochs_per_negative: Vec<f32> = epochs_per_sample
        .iter()
        .map(|e| e / UMAP_NEGATIVE_SAMPLE_RATE as f32)
        .collect();
    let mut next_sample = epochs_per_sample.clone();
    let mut next_negative = epochs_per_negative.clone();

    let mut alpha = UMAP_LEARNING_RATE;
    for epoch in 0..n_epochs {
        let epoch_f = epoch as f32;
        for (e, &&(head, tail, _)) in edges.iter().enumerate() {
            if next_sample[e] > epoch_f {
                continue;
            }

            let dist_sq = squared_distance(embedding, dim, head, tail);
            let coeff = if dist_sq > 0.0 {
                -2.0 * a * b * dist_sq.powf(b - 1.0) / (a * dist_sq.powf(b) + 1.0)
            } else {
                0.0
            };
            for d in 0..dim {
                let grad = clip(coeff * (embedding[head * dim + d] - embedding[tail * dim + d]));
                embedding[head * dim + d] += grad * alpha;
                embedding[tail * dim + d] -= grad * alpha;
            }
            next_sample[e] += epochs_per_sample[e];

            let n_negative = ((epoch_f - next_negative[e]) / epochs_per_negative[e]).max(0.0) as usize;
            for _ in 0..n_negative {
                let other = rng.random_range(0..n);
                if other == head {
                    continue;
                }
                let dist_sq = squared_distance(embedding, dim, head, other);
                let coeff = if dist_sq > 0.0 {
                    2.0 * b / ((0.001 + dist_sq) * (a * dist_sq.powf(b) + 1.0))
                } else {
                    0.0
                };
                for d in 0..dim {
                    let grad = if coeff > 0.0 {
                        clip(coeff * (embedding[head * dim + d] - embedding[other * dim + d]))
                    } else {
                        UMAP_GRADIENT_CLIP
                    };
                    embedding[head * dim + d] += grad * alpha;
                }
            }
            next_negative[e] += n_negative as f32 * epochs_per_negative[e];
        }
        alpha = UMAP_LEARNING_RATE * (1.0 - (epoch + 1) as f32 / n_epochs as f32);
    }
}
