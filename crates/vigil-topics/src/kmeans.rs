//! Seeded k-means over a [`FeatureMatrix`].
//!
//! Initialization is k-means++ driven by a `ChaCha8` generator seeded from
//! [`KMeansParams::seed`], so the same matrix and parameters always yield the
//! same clusters. The run is repeated [`KMeansParams::restarts`] times and the
//! lowest-inertia result is kept.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use vigil_core::TopicCluster;

use crate::vectorizer::FeatureMatrix;

/// Tuning for a clustering run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KMeansParams {
    pub seed: u64,
    /// Independent initializations; the lowest-inertia run wins.
    pub restarts: usize,
    pub max_iterations: usize,
    /// Convergence threshold on total squared centroid shift, relative to the
    /// mean per-feature variance of the data.
    pub tolerance: f64,
    /// Terms reported per cluster.
    pub top_terms: usize,
}

impl Default for KMeansParams {
    fn default() -> Self {
        Self {
            seed: 42,
            restarts: 10,
            max_iterations: 300,
            tolerance: 1e-4,
            top_terms: 10,
        }
    }
}

/// Cluster with default parameters. See [`cluster_with`].
#[must_use]
pub fn cluster(matrix: &FeatureMatrix, k: usize) -> Vec<TopicCluster> {
    cluster_with(matrix, k, &KMeansParams::default())
}

/// Partition the rows of `matrix` into `min(k, rows)` clusters and describe
/// each by its highest-weighted centroid terms.
///
/// Returns an empty list when fewer than two clusters are possible or the
/// matrix has no features.
#[must_use]
pub fn cluster_with(matrix: &FeatureMatrix, k: usize, params: &KMeansParams) -> Vec<TopicCluster> {
    let points = matrix.rows();
    let k = k.min(points.len());
    if k < 2 || matrix.n_features() == 0 {
        tracing::debug!(
            requested = k,
            documents = points.len(),
            features = matrix.n_features(),
            "not enough data to cluster"
        );
        return Vec::new();
    }

    let Some(best) = fit(points, k, params) else {
        return Vec::new();
    };
    tracing::debug!(
        k,
        inertia = best.inertia,
        iterations = best.iterations,
        converged = best.converged,
        "k-means finished"
    );

    best.centroids
        .iter()
        .enumerate()
        .map(|(rank_index, centroid)| TopicCluster {
            rank_index,
            terms: top_terms(centroid, matrix.vocabulary(), params.top_terms),
        })
        .collect()
}

struct Fit {
    centroids: Vec<Vec<f64>>,
    inertia: f64,
    iterations: usize,
    converged: bool,
}

fn fit(points: &[Vec<f64>], k: usize, params: &KMeansParams) -> Option<Fit> {
    let mut rng = ChaCha8Rng::seed_from_u64(params.seed);
    let tolerance = scaled_tolerance(points, params.tolerance);

    let mut best: Option<Fit> = None;
    for _ in 0..params.restarts.max(1) {
        let run = lloyd(points, k, params.max_iterations, tolerance, &mut rng);
        if best.as_ref().is_none_or(|b| run.inertia < b.inertia) {
            best = Some(run);
        }
    }
    best
}

fn lloyd(
    points: &[Vec<f64>],
    k: usize,
    max_iterations: usize,
    tolerance: f64,
    rng: &mut ChaCha8Rng,
) -> Fit {
    let mut centroids = kmeans_plus_plus_init(points, k, rng);
    let mut assignments = vec![0_usize; points.len()];
    let mut iterations = 0;
    let mut converged = false;

    for _ in 0..max_iterations {
        iterations += 1;
        assign(points, &centroids, &mut assignments);
        let updated = update_centroids(points, &mut assignments, &centroids);
        let shift: f64 = centroids
            .iter()
            .zip(&updated)
            .map(|(old, new)| squared_distance(old, new))
            .sum();
        centroids = updated;
        if shift <= tolerance {
            converged = true;
            break;
        }
    }

    let inertia = assign(points, &centroids, &mut assignments);
    Fit {
        centroids,
        inertia,
        iterations,
        converged,
    }
}

fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// Nearest centroid per point (lowest index on ties). Returns the inertia.
fn assign(points: &[Vec<f64>], centroids: &[Vec<f64>], assignments: &mut [usize]) -> f64 {
    let mut inertia = 0.0;
    for (point, slot) in points.iter().zip(assignments.iter_mut()) {
        let mut best = (0, f64::INFINITY);
        for (j, centroid) in centroids.iter().enumerate() {
            let dist = squared_distance(point, centroid);
            if dist < best.1 {
                best = (j, dist);
            }
        }
        *slot = best.0;
        inertia += best.1;
    }
    inertia
}

/// k-means++: first centroid uniform, the rest sampled proportional to squared
/// distance from the nearest chosen centroid.
fn kmeans_plus_plus_init(points: &[Vec<f64>], k: usize, rng: &mut ChaCha8Rng) -> Vec<Vec<f64>> {
    let n = points.len();
    let mut chosen = Vec::with_capacity(k);
    chosen.push(rng.gen_range(0..n));
    let mut nearest = vec![f64::INFINITY; n];

    while chosen.len() < k {
        let last = &points[chosen[chosen.len() - 1]];
        for (d, point) in nearest.iter_mut().zip(points) {
            *d = d.min(squared_distance(point, last));
        }

        let total: f64 = nearest.iter().sum();
        let next = if total > 0.0 {
            let target = rng.gen_range(0.0..total);
            let mut cumulative = 0.0;
            nearest
                .iter()
                .position(|&d| {
                    cumulative += d;
                    cumulative > target
                })
                .unwrap_or_else(|| nearest.iter().rposition(|&d| d > 0.0).unwrap_or(n - 1))
        } else {
            // Every point coincides with a centroid already.
            (0..n).find(|i| !chosen.contains(i)).unwrap_or(0)
        };
        chosen.push(next);
    }

    chosen.into_iter().map(|i| points[i].clone()).collect()
}

/// Mean of each cluster's members. An empty cluster takes over the point
/// farthest from its centroid among clusters with more than one member.
fn update_centroids(
    points: &[Vec<f64>],
    assignments: &mut [usize],
    centroids: &[Vec<f64>],
) -> Vec<Vec<f64>> {
    let k = centroids.len();
    let dim = centroids.first().map_or(0, Vec::len);
    let mut sums = vec![vec![0.0; dim]; k];
    let mut counts = vec![0_usize; k];

    for (point, &cluster) in points.iter().zip(assignments.iter()) {
        counts[cluster] += 1;
        for (s, v) in sums[cluster].iter_mut().zip(point) {
            *s += v;
        }
    }

    for empty in 0..k {
        if counts[empty] > 0 {
            continue;
        }
        let donor = points
            .iter()
            .enumerate()
            .filter(|(i, _)| counts[assignments[*i]] > 1)
            .map(|(i, p)| (i, squared_distance(p, &centroids[assignments[i]])))
            .max_by(|a, b| a.1.total_cmp(&b.1).then_with(|| b.0.cmp(&a.0)));
        let Some((i, _)) = donor else { continue };

        let from = assignments[i];
        counts[from] -= 1;
        for (s, v) in sums[from].iter_mut().zip(&points[i]) {
            *s -= v;
        }
        assignments[i] = empty;
        counts[empty] = 1;
        sums[empty].clone_from(&points[i]);
    }

    sums.into_iter()
        .zip(counts)
        .zip(centroids)
        .map(|((mut sum, count), previous)| {
            if count == 0 {
                return previous.clone();
            }
            #[allow(clippy::cast_precision_loss)]
            let count = count as f64;
            for s in &mut sum {
                *s /= count;
            }
            sum
        })
        .collect()
}

fn scaled_tolerance(points: &[Vec<f64>], tolerance: f64) -> f64 {
    let dim = points.first().map_or(0, Vec::len);
    if dim == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let n = points.len() as f64;
    let mut variance_sum = 0.0;
    for d in 0..dim {
        let mean = points.iter().map(|p| p[d]).sum::<f64>() / n;
        variance_sum += points.iter().map(|p| (p[d] - mean).powi(2)).sum::<f64>() / n;
    }
    #[allow(clippy::cast_precision_loss)]
    let mean_variance = variance_sum / dim as f64;
    mean_variance * tolerance
}

/// Column indices by descending centroid weight, ties by column order.
fn top_terms(centroid: &[f64], vocabulary: &[String], limit: usize) -> Vec<String> {
    let mut order: Vec<usize> = (0..centroid.len()).collect();
    order.sort_by(|&a, &b| centroid[b].total_cmp(&centroid[a]).then(a.cmp(&b)));
    order
        .into_iter()
        .take(limit)
        .map(|i| vocabulary[i].clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::stopwords::StopWords;
    use crate::vectorizer::vectorize;

    fn corpus() -> Vec<String> {
        [
            "insulin pump glucose control",
            "glucose monitoring insulin dosing",
            "insulin glucose pump therapy",
            "tumor chemotherapy survival",
            "chemotherapy tumor response",
            "tumor survival chemotherapy outcomes",
        ]
        .iter()
        .map(ToString::to_string)
        .collect()
    }

    #[test]
    fn separates_obvious_groups() {
        let matrix = vectorize(corpus().as_slice(), 5000, &StopWords::english());
        let clusters = cluster(&matrix, 2);

        assert_eq!(clusters.len(), 2);
        let leads: Vec<&str> = clusters.iter().map(|c| c.terms[0].as_str()).collect();
        assert!(leads.iter().any(|t| ["insulin", "glucose"].contains(t)));
        assert!(leads.iter().any(|t| ["tumor", "chemotherapy"].contains(t)));
        for (i, c) in clusters.iter().enumerate() {
            assert_eq!(c.rank_index, i);
        }
    }

    #[test]
    fn same_seed_same_result() {
        let matrix = vectorize(corpus().as_slice(), 5000, &StopWords::english());
        assert_eq!(cluster(&matrix, 3), cluster(&matrix, 3));
    }

    #[test]
    fn k_is_clamped_to_document_count() {
        let docs = ["alpha beta", "gamma delta", "epsilon zeta"];
        let matrix = vectorize(&docs, 5000, &StopWords::none());
        assert_eq!(cluster(&matrix, 5).len(), 3);
    }

    #[test]
    fn single_document_is_not_clustered() {
        let matrix = vectorize(&["only one document"], 5000, &StopWords::none());
        assert!(cluster(&matrix, 5).is_empty());
    }

    #[test]
    fn empty_vocabulary_is_not_clustered() {
        let matrix = vectorize(&["", ""], 5000, &StopWords::none());
        assert!(cluster(&matrix, 2).is_empty());
    }

    #[test]
    fn term_lists_are_capped_by_vocabulary() {
        let docs = ["heart", "lung"];
        let matrix = vectorize(&docs, 5000, &StopWords::none());
        let clusters = cluster_with(
            &matrix,
            2,
            &KMeansParams {
                top_terms: 10,
                ..KMeansParams::default()
            },
        );
        assert!(clusters.iter().all(|c| c.terms.len() == 2));
    }

    #[test]
    fn duplicate_documents_still_fill_every_cluster() {
        let docs = ["same text", "same text", "same text"];
        let matrix = vectorize(&docs, 5000, &StopWords::none());
        let clusters = cluster(&matrix, 3);
        assert_eq!(clusters.len(), 3);
        assert!(clusters.iter().all(|c| c.terms.len() == 2));
    }

    #[test]
    fn top_terms_order_by_weight_then_column() {
        let vocab: Vec<String> = ["a", "b", "c"].iter().map(ToString::to_string).collect();
        assert_eq!(top_terms(&[0.1, 0.5, 0.5], &vocab, 2), ["b", "c"]);
    }
}
