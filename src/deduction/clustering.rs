//! @ai:module:intent Group agents by standardized performance features with seeded k-means
//! @ai:module:layer domain
//! @ai:module:public_api KMeans, KMeansFit, ClusteringError, standardize, feature_vector
//! @ai:module:stateless true

use crate::metrics::stats::{mean, std_dev};
use crate::metrics::AgentRecord;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

/// @ai:intent Numerical failures surfaced by clustering
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClusteringError {
    #[error("no points to cluster")]
    Empty,

    #[error("cluster count {k} is outside 1..={points}")]
    InvalidClusterCount { k: usize, points: usize },

    #[error("feature vectors have inconsistent dimensions")]
    RaggedFeatures,

    #[error("non-finite feature value for point {0}")]
    NonFinite(usize),
}

/// @ai:intent Feature vector [accuracy, latency, tokens, consistency]
/// @ai:effects pure
pub fn feature_vector(agent: &AgentRecord) -> Vec<f64> {
    let m = &agent.metrics;
    vec![m.accuracy_pct, m.latency_avg, m.tokens_avg, m.consistency]
}

/// @ai:intent Scale every column to zero mean and unit variance
/// @ai:post constant columns become all zeros
/// @ai:effects pure
pub fn standardize(points: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let dims = points.first().map(Vec::len).unwrap_or(0);
    let mut scaled = points.to_vec();

    for d in 0..dims {
        let column: Vec<f64> = points.iter().map(|p| p[d]).collect();
        let m = mean(&column);
        let s = std_dev(&column);
        let scale = if s == 0.0 { 1.0 } else { s };

        for row in scaled.iter_mut() {
            row[d] = (row[d] - m) / scale;
        }
    }

    scaled
}

/// @ai:intent Result of a k-means fit
#[derive(Debug, Clone, PartialEq)]
pub struct KMeansFit {
    /// Cluster id per input point; ids are numbered by first appearance
    pub labels: Vec<usize>,
    pub centers: Vec<Vec<f64>>,
    pub inertia: f64,
}

/// @ai:intent k-means with k-means++ seeding and several restarts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KMeans {
    pub k: usize,
    pub seed: u64,
    pub n_init: usize,
    pub max_iter: usize,
    pub tolerance: f64,
}

impl KMeans {
    pub fn new(k: usize, seed: u64) -> Self {
        Self {
            k,
            seed,
            n_init: 10,
            max_iter: 300,
            tolerance: 1e-4,
        }
    }

    /// @ai:intent Fit clusters, keeping the restart with the lowest inertia
    /// @ai:pre 1 <= k <= points.len(); all values finite
    /// @ai:post same seed and input give the same labels and centers
    /// @ai:effects pure
    pub fn fit(&self, points: &[Vec<f64>]) -> Result<KMeansFit, ClusteringError> {
        validate(points, self.k)?;

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut best: Option<KMeansFit> = None;

        for _ in 0..self.n_init.max(1) {
            let fit = self.fit_once(points, &mut rng);
            let better = best.as_ref().map(|b| fit.inertia < b.inertia).unwrap_or(true);
            if better {
                best = Some(fit);
            }
        }

        best.map(relabel).ok_or(ClusteringError::Empty)
    }

    fn fit_once(&self, points: &[Vec<f64>], rng: &mut StdRng) -> KMeansFit {
        let mut centers = seed_centers(points, self.k, rng);
        let mut labels = assign(points, &centers);

        for _ in 0..self.max_iter {
            let updated = update_centers(points, &labels, &centers);
            let shift = centers
                .iter()
                .zip(&updated)
                .map(|(a, b)| squared_distance(a, b))
                .fold(0.0, f64::max);

            centers = updated;
            labels = assign(points, &centers);

            if shift <= self.tolerance {
                break;
            }
        }

        let inertia = points
            .iter()
            .zip(&labels)
            .map(|(p, &l)| squared_distance(p, &centers[l]))
            .sum();

        KMeansFit {
            labels,
            centers,
            inertia,
        }
    }
}

fn validate(points: &[Vec<f64>], k: usize) -> Result<(), ClusteringError> {
    let first = points.first().ok_or(ClusteringError::Empty)?;

    if k == 0 || k > points.len() {
        return Err(ClusteringError::InvalidClusterCount {
            k,
            points: points.len(),
        });
    }

    for (i, p) in points.iter().enumerate() {
        if p.len() != first.len() {
            return Err(ClusteringError::RaggedFeatures);
        }
        if p.iter().any(|v| !v.is_finite()) {
            return Err(ClusteringError::NonFinite(i));
        }
    }

    Ok(())
}

/// @ai:intent k-means++ seeding: spread initial centers proportionally to squared distance
/// @ai:effects pure
fn seed_centers(points: &[Vec<f64>], k: usize, rng: &mut StdRng) -> Vec<Vec<f64>> {
    let mut chosen = vec![rng.gen_range(0..points.len())];

    while chosen.len() < k {
        let weights: Vec<f64> = points
            .iter()
            .map(|p| {
                chosen
                    .iter()
                    .map(|&c| squared_distance(p, &points[c]))
                    .fold(f64::INFINITY, f64::min)
            })
            .collect();
        let total: f64 = weights.iter().sum();

        let next = if total > 0.0 {
            let target = rng.gen::<f64>() * total;
            let mut cumulative = 0.0;
            weights
                .iter()
                .position(|w| {
                    cumulative += w;
                    cumulative > target
                })
                .unwrap_or(points.len() - 1)
        } else {
            // all remaining points coincide with a center
            (0..points.len()).find(|i| !chosen.contains(i)).unwrap_or(0)
        };

        chosen.push(next);
    }

    chosen.into_iter().map(|i| points[i].clone()).collect()
}

/// Nearest center per point; ties go to the lower center index.
fn assign(points: &[Vec<f64>], centers: &[Vec<f64>]) -> Vec<usize> {
    points
        .iter()
        .map(|p| {
            let mut best = 0;
            let mut best_dist = f64::INFINITY;
            for (i, c) in centers.iter().enumerate() {
                let d = squared_distance(p, c);
                if d < best_dist {
                    best = i;
                    best_dist = d;
                }
            }
            best
        })
        .collect()
}

/// Empty clusters keep their previous center.
fn update_centers(points: &[Vec<f64>], labels: &[usize], previous: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let dims = previous.first().map(Vec::len).unwrap_or(0);
    let mut sums = vec![vec![0.0; dims]; previous.len()];
    let mut counts = vec![0usize; previous.len()];

    for (p, &l) in points.iter().zip(labels) {
        counts[l] += 1;
        for (s, v) in sums[l].iter_mut().zip(p) {
            *s += v;
        }
    }

    sums.into_iter()
        .zip(counts)
        .zip(previous)
        .map(|((sum, count), prev)| {
            if count == 0 {
                prev.clone()
            } else {
                sum.into_iter().map(|s| s / count as f64).collect()
            }
        })
        .collect()
}

/// @ai:intent Renumber clusters by order of first appearance among the points
/// @ai:effects pure
fn relabel(fit: KMeansFit) -> KMeansFit {
    let mut mapping: Vec<Option<usize>> = vec![None; fit.centers.len()];
    let mut next = 0;

    for &l in &fit.labels {
        if mapping[l].is_none() {
            mapping[l] = Some(next);
            next += 1;
        }
    }
    for slot in mapping.iter_mut().filter(|s| s.is_none()) {
        *slot = Some(next);
        next += 1;
    }

    let mut centers = vec![Vec::new(); fit.centers.len()];
    for (old, center) in fit.centers.into_iter().enumerate() {
        centers[mapping[old].unwrap_or(old)] = center;
    }

    KMeansFit {
        labels: fit
            .labels
            .iter()
            .map(|&l| mapping[l].unwrap_or(l))
            .collect(),
        centers,
        inertia: fit.inertia,
    }
}

fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_groups() -> Vec<Vec<f64>> {
        vec![
            vec![0.0, 0.0],
            vec![10.0, 10.0],
            vec![0.1, 0.2],
            vec![10.2, 9.9],
        ]
    }

    #[test]
    fn test_standardize_zero_mean_unit_variance() {
        let scaled = standardize(&[vec![1.0, 5.0], vec![3.0, 5.0]]);
        assert_eq!(scaled[0], vec![-1.0, 0.0]);
        assert_eq!(scaled[1], vec![1.0, 0.0]);
    }

    #[test]
    fn test_separates_obvious_groups() {
        let fit = KMeans::new(2, 42).fit(&two_groups()).unwrap();
        assert_eq!(fit.labels, vec![0, 1, 0, 1]);
        assert!((fit.centers[0][0] - 0.05).abs() < 1e-9);
        assert!((fit.centers[1][0] - 10.1).abs() < 1e-9);
    }

    #[test]
    fn test_fit_is_reproducible() {
        let points = vec![
            vec![1.0, 2.0],
            vec![1.5, 1.8],
            vec![5.0, 8.0],
            vec![8.0, 8.0],
            vec![1.0, 0.6],
            vec![9.0, 11.0],
        ];
        let model = KMeans::new(3, 42);
        assert_eq!(model.fit(&points).unwrap(), model.fit(&points).unwrap());
    }

    #[test]
    fn test_k_equals_points_gives_singletons() {
        let points = vec![vec![0.0], vec![5.0], vec![9.0]];
        let fit = KMeans::new(3, 42).fit(&points).unwrap();
        assert_eq!(fit.labels, vec![0, 1, 2]);
        assert!(fit.inertia.abs() < 1e-12);
    }

    #[test]
    fn test_identical_points_do_not_fail() {
        let points = vec![vec![1.0, 1.0]; 3];
        let fit = KMeans::new(2, 42).fit(&points).unwrap();
        assert_eq!(fit.labels, vec![0, 0, 0]);
        assert_eq!(fit.centers.len(), 2);
    }

    #[test]
    fn test_rejects_non_finite_values() {
        let points = vec![vec![1.0], vec![f64::NAN]];
        assert_eq!(
            KMeans::new(2, 42).fit(&points),
            Err(ClusteringError::NonFinite(1))
        );
    }

    #[test]
    fn test_rejects_invalid_k() {
        let points = vec![vec![1.0], vec![2.0]];
        assert!(matches!(
            KMeans::new(3, 42).fit(&points),
            Err(ClusteringError::InvalidClusterCount { k: 3, points: 2 })
        ));
        assert_eq!(KMeans::new(1, 42).fit(&[]), Err(ClusteringError::Empty));
    }
}
