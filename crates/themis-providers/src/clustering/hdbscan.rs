//! HDBSCAN density clustering
//!
//! Euclidean distances, core distance from the `min_samples`-th neighbour
//! (the point itself counted), a minimum spanning tree over mutual
//! reachability, single-linkage hierarchy, condensed tree pruned at
//! `min_cluster_size`, and excess-of-mass selection. The root is never
//! selected, so a dataset with no split is all noise.

use std::cmp::Ordering;
use std::collections::VecDeque;

use rayon::prelude::*;
use themis_domain::constants::NOISE_LABEL;
use themis_domain::error::{Error, Result};
use themis_domain::ports::providers::DensityClusterer;
use themis_domain::value_objects::{ClusterLabels, ClusteringParams, Vector};
use tracing::debug;

use crate::constants::HDBSCAN_LAMBDA_MAX;

/// HDBSCAN implementing [`DensityClusterer`]
#[derive(Debug, Default, Clone, Copy)]
pub struct HdbscanClusterer;

impl HdbscanClusterer {
    /// Create a clusterer
    pub fn new() -> Self {
        Self
    }
}

impl DensityClusterer for HdbscanClusterer {
    fn cluster(&self, points: &[Vector], params: &ClusteringParams) -> Result<ClusterLabels> {
        let min_cluster_size = params.min_cluster_size;
        if min_cluster_size < 2 {
            return Err(Error::clustering("min_cluster_size must be at least 2"));
        }
        if let Some(first) = points.first() {
            let width = first.len();
            if points
                .iter()
                .any(|p| p.len() != width || p.iter().any(|x| !x.is_finite()))
            {
                return Err(Error::clustering(
                    "Points must share one dimension and be finite",
                ));
            }
        }

        let n = points.len();
        if n < min_cluster_size {
            return Ok(ClusterLabels {
                labels: vec![NOISE_LABEL; n],
                relative_validity: None,
            });
        }

        let min_samples = params.effective_min_samples().min(n);
        let core = core_distances(points, min_samples);
        let mst = mutual_reachability_mst(points, &core);
        let hierarchy = single_linkage(n, &mst);
        let condensed = condense_tree(&hierarchy, n, min_cluster_size);
        let labels = select_and_label(&condensed, n);

        let n_clusters = labels.iter().copied().max().map_or(0, |m| (m + 1).max(0));
        let relative_validity = (n_clusters > 0).then(|| relative_validity(&mst, &labels));
        debug!(points = n, n_clusters, "HDBSCAN labelled points");

        Ok(ClusterLabels {
            labels,
            relative_validity,
        })
    }
}

fn euclidean(a: &[f32], b: &[f32]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = f64::from(*x) - f64::from(*y);
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

/// Distance to the `min_samples`-th nearest point, the point itself included
fn core_distances(points: &[Vector], min_samples: usize) -> Vec<f64> {
    points
        .par_iter()
        .map(|p| {
            let mut distances: Vec<f64> = points.iter().map(|q| euclidean(p, q)).collect();
            let kth = min_samples - 1;
            let (_, value, _) = distances
                .select_nth_unstable_by(kth, |a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
            *value
        })
        .collect()
}

/// An MST edge `(from, to, mutual reachability distance)`
type Edge = (usize, usize, f64);

/// Prim's algorithm over the dense mutual reachability graph
///
/// Edges are returned sorted by ascending weight (stable).
fn mutual_reachability_mst(points: &[Vector], core: &[f64]) -> Vec<Edge> {
    let n = points.len();
    let mut in_tree = vec![false; n];
    let mut best = vec![f64::INFINITY; n];
    let mut from = vec![0usize; n];
    let mut edges = Vec::with_capacity(n.saturating_sub(1));

    let mut current = 0;
    in_tree[0] = true;
    for _ in 1..n {
        for j in 0..n {
            if in_tree[j] {
                continue;
            }
            let reach = euclidean(&points[current], &points[j])
                .max(core[current])
                .max(core[j]);
            if reach < best[j] {
                best[j] = reach;
                from[j] = current;
            }
        }
        let mut next = usize::MAX;
        let mut next_weight = f64::INFINITY;
        for j in 0..n {
            if !in_tree[j] && (next == usize::MAX || best[j] < next_weight) {
                next = j;
                next_weight = best[j];
            }
        }
        in_tree[next] = true;
        edges.push((from[next], next, next_weight));
        current = next;
    }

    edges.sort_by(|a, b| a.2.partial_cmp(&b.2).unwrap_or(Ordering::Equal));
    edges
}

/// One single-linkage merge; node `n + i` is created by merge `i`
#[derive(Debug, Clone, Copy)]
struct Merge {
    left: usize,
    right: usize,
    distance: f64,
    size: usize,
}

struct UnionFind {
    parent: Vec<usize>,
    size: Vec<usize>,
    next_label: usize,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        let total = 2 * n - 1;
        Self {
            parent: (0..total).collect(),
            size: (0..total).map(|i| usize::from(i < n)).collect(),
            next_label: n,
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        while self.parent[x] != root {
            let next = self.parent[x];
            self.parent[x] = root;
            x = next;
        }
        root
    }

    fn union(&mut self, a: usize, b: usize) -> usize {
        let label = self.next_label;
        self.parent[a] = label;
        self.parent[b] = label;
        self.size[label] = self.size[a] + self.size[b];
        self.next_label += 1;
        label
    }
}

fn single_linkage(n: usize, mst: &[Edge]) -> Vec<Merge> {
    let mut uf = UnionFind::new(n);
    let mut merges = Vec::with_capacity(mst.len());
    for &(a, b, distance) in mst {
        let left = uf.find(a);
        let right = uf.find(b);
        let label = uf.union(left, right);
        merges.push(Merge {
            left,
            right,
            distance,
            size: uf.size[label],
        });
    }
    merges
}

/// Row of the condensed tree; `child < n` is a point, otherwise a cluster
#[derive(Debug, Clone, Copy)]
struct CondensedRow {
    parent: usize,
    child: usize,
    lambda: f64,
    size: usize,
}

fn node_size(hierarchy: &[Merge], n: usize, node: usize) -> usize {
    if node < n { 1 } else { hierarchy[node - n].size }
}

/// Every hierarchy node under `root`, root included, breadth first
fn descendants(hierarchy: &[Merge], n: usize, root: usize) -> Vec<usize> {
    let mut out = Vec::new();
    let mut queue = VecDeque::from([root]);
    while let Some(node) = queue.pop_front() {
        out.push(node);
        if node >= n {
            let merge = hierarchy[node - n];
            queue.push_back(merge.left);
            queue.push_back(merge.right);
        }
    }
    out
}

fn lambda_of(distance: f64) -> f64 {
    if distance > 0.0 {
        (1.0 / distance).min(HDBSCAN_LAMBDA_MAX)
    } else {
        HDBSCAN_LAMBDA_MAX
    }
}

/// Collapse the hierarchy: splits where both sides reach `min_cluster_size`
/// create clusters; smaller sides fall out as points
///
/// Cluster labels start at `n` (the root).
fn condense_tree(hierarchy: &[Merge], n: usize, min_cluster_size: usize) -> Vec<CondensedRow> {
    let root = 2 * n - 2;
    let mut relabel = vec![0usize; 2 * n - 1];
    relabel[root] = n;
    let mut next_label = n + 1;
    let mut ignore = vec![false; 2 * n - 1];
    let mut rows = Vec::new();

    for node in descendants(hierarchy, n, root) {
        if node < n || ignore[node] {
            continue;
        }
        let Merge {
            left,
            right,
            distance,
            ..
        } = hierarchy[node - n];
        let lambda = lambda_of(distance);
        let parent = relabel[node];
        let left_size = node_size(hierarchy, n, left);
        let right_size = node_size(hierarchy, n, right);

        let mut fall_out = |side: usize, rows: &mut Vec<CondensedRow>| {
            for sub in descendants(hierarchy, n, side) {
                if sub < n {
                    rows.push(CondensedRow {
                        parent,
                        child: sub,
                        lambda,
                        size: 1,
                    });
                }
                ignore[sub] = true;
            }
        };

        match (left_size >= min_cluster_size, right_size >= min_cluster_size) {
            (true, true) => {
                for (side, size) in [(left, left_size), (right, right_size)] {
                    relabel[side] = next_label;
                    rows.push(CondensedRow {
                        parent,
                        child: next_label,
                        lambda,
                        size,
                    });
                    next_label += 1;
                }
            }
            (false, false) => {
                fall_out(left, &mut rows);
                fall_out(right, &mut rows);
            }
            (false, true) => {
                relabel[right] = parent;
                fall_out(left, &mut rows);
            }
            (true, false) => {
                relabel[left] = parent;
                fall_out(right, &mut rows);
            }
        }
    }
    rows
}

/// Excess-of-mass selection over the condensed tree, then point labels
///
/// Selected clusters are numbered `0..` in label order; a point belongs to
/// the nearest selected cluster above it, or is noise.
fn select_and_label(rows: &[CondensedRow], n: usize) -> Vec<i64> {
    let n_clusters = rows
        .iter()
        .map(|r| r.parent.max(r.child))
        .filter(|&c| c >= n)
        .max()
        .map_or(1, |max| max - n + 1);

    let mut birth = vec![0.0f64; n_clusters];
    let mut cluster_parent = vec![usize::MAX; n_clusters];
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); n_clusters];
    let mut point_parent = vec![usize::MAX; n];
    for row in rows {
        if row.child >= n {
            let child = row.child - n;
            birth[child] = row.lambda;
            cluster_parent[child] = row.parent - n;
            children[row.parent - n].push(child);
        } else {
            point_parent[row.child] = row.parent - n;
        }
    }

    let mut stability = vec![0.0f64; n_clusters];
    for row in rows {
        let parent = row.parent - n;
        stability[parent] += (row.lambda - birth[parent]) * row.size as f64;
    }

    // Root (index 0) excluded
    let mut selected: Vec<bool> = (0..n_clusters).map(|c| c > 0).collect();
    for c in (1..n_clusters).rev() {
        let subtree: f64 = children[c].iter().map(|&child| stability[child]).sum();
        if subtree > stability[c] {
            selected[c] = false;
            stability[c] = subtree;
        } else {
            let mut stack = children[c].clone();
            while let Some(d) = stack.pop() {
                selected[d] = false;
                stack.extend(children[d].iter().copied());
            }
        }
    }

    let mut label_of = vec![NOISE_LABEL; n_clusters];
    let mut next = 0i64;
    for c in 1..n_clusters {
        if selected[c] {
            label_of[c] = next;
            next += 1;
        }
    }

    point_parent
        .iter()
        .map(|&start| {
            let mut c = start;
            while c != usize::MAX {
                if selected[c] {
                    return label_of[c];
                }
                c = cluster_parent[c];
            }
            NOISE_LABEL
        })
        .collect()
}

/// Density-based validity approximated on the mutual reachability MST
///
/// For each cluster: sparseness is its longest internal edge, separation
/// its shortest edge to another cluster. Clusters with no edge to another
/// cluster get a separation of twice the longest edge (or, with a single
/// cluster, twice the shortest noise edge). Scores are weighted by cluster
/// size over all points, noise included.
fn relative_validity(mst: &[Edge], labels: &[i64]) -> f64 {
    let n_clusters = labels.iter().copied().max().map_or(0, |m| (m + 1).max(0)) as usize;
    let mut cluster_size = vec![0usize; n_clusters];
    for &l in labels {
        if l >= 0 {
            cluster_size[l as usize] += 1;
        }
    }
    let total = labels.len() as f64;

    let mut sparseness = vec![0.0f64; n_clusters];
    let mut separation = vec![f64::INFINITY; n_clusters];
    let mut min_outlier_sep = f64::INFINITY;
    let mut max_distance = 0.0f64;

    for &(a, b, length) in mst {
        let (la, lb) = (labels[a], labels[b]);
        max_distance = max_distance.max(length);
        if la < 0 && lb < 0 {
            continue;
        }
        if la < 0 || lb < 0 {
            min_outlier_sep = min_outlier_sep.min(length);
            continue;
        }
        let (ia, ib) = (la as usize, lb as usize);
        if ia == ib {
            sparseness[ia] = sparseness[ia].max(length);
        } else {
            separation[ia] = separation[ia].min(length);
            separation[ib] = separation[ib].min(length);
        }
    }

    if min_outlier_sep.is_infinite() {
        min_outlier_sep = max_distance;
    }
    let correction = 2.0
        * if n_clusters > 1 {
            max_distance
        } else {
            min_outlier_sep
        };

    (0..n_clusters)
        .map(|c| {
            let sep = if separation[c].is_infinite() {
                correction
            } else {
                separation[c]
            };
            let denominator = sep.max(sparseness[c]);
            let validity = if denominator > 0.0 {
                (sep - sparseness[c]) / denominator
            } else {
                0.0
            };
            cluster_size[c] as f64 * validity / total
        })
        .sum()
}
