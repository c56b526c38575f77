//! Trend clustering
//!
//! Standardizes three trend features over the records passed in, then runs
//! k-means (k-means++ seeding, Lloyd iterations, several restarts from one
//! seeded generator, lowest inertia wins).
//!
//! Cluster names are a heuristic. With `ClusterLabeling::Positional`, k-means
//! index 0 is called "High Impact Leaders" whether or not its members have
//! the highest impact, and the mapping can change whenever the input subset
//! changes. `ClusterLabeling::RankedByImpact` orders clusters by the mean of
//! the first feature before naming them.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::config::ClusteringConfig;
use crate::error::{Error, Result};
use crate::models::{ClusterAssignment, TrendRecord};

/// Display names, indexed by cluster id
pub const CLUSTER_NAMES: [&str; 4] = [
    "High Impact Leaders",
    "Emerging Opportunities",
    "Mainstream Adoption",
    "Niche Specialists",
];

/// Number of features a clustering run uses
pub const FEATURE_COUNT: usize = 3;

/// How cluster ids are mapped to display names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterLabeling {
    /// k-means index i gets `CLUSTER_NAMES[i]`
    #[default]
    Positional,
    /// Clusters sorted by descending mean of the first feature, then named
    RankedByImpact,
}

impl ClusterLabeling {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positional => "positional",
            Self::RankedByImpact => "ranked_by_impact",
        }
    }
}

impl std::str::FromStr for ClusterLabeling {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "positional" => Ok(Self::Positional),
            "ranked_by_impact" | "ranked" => Ok(Self::RankedByImpact),
            _ => Err(format!(
                "Unknown cluster labeling: {}. Available: positional, ranked_by_impact",
                s
            )),
        }
    }
}

impl std::fmt::Display for ClusterLabeling {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Numeric trend fields usable as clustering features
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendFeature {
    ImpactScore,
    MarketSizeBillion,
    AdoptionRate,
}

/// Impact, market size, adoption
pub const DEFAULT_FEATURES: [TrendFeature; FEATURE_COUNT] = [
    TrendFeature::ImpactScore,
    TrendFeature::MarketSizeBillion,
    TrendFeature::AdoptionRate,
];

impl TrendFeature {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ImpactScore => "impact_score",
            Self::MarketSizeBillion => "market_size_billion",
            Self::AdoptionRate => "adoption_rate",
        }
    }

    /// Feature value; non-finite values count as zero
    pub fn value(&self, trend: &TrendRecord) -> f64 {
        let v = match self {
            Self::ImpactScore => trend.impact_score,
            Self::MarketSizeBillion => trend.market_size_billion,
            Self::AdoptionRate => trend.adoption_rate,
        };
        if v.is_finite() {
            v
        } else {
            0.0
        }
    }
}

impl std::str::FromStr for TrendFeature {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "impact_score" | "impact" => Ok(Self::ImpactScore),
            "market_size_billion" | "market_size" => Ok(Self::MarketSizeBillion),
            "adoption_rate" | "adoption" => Ok(Self::AdoptionRate),
            _ => Err(format!("Unknown trend feature: {}", s)),
        }
    }
}

impl std::fmt::Display for TrendFeature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Summary of one cluster in original feature units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterProfile {
    pub cluster_id: usize,
    pub cluster_name: String,
    pub size: usize,
    /// Feature means, same order as `ClusterReport::features`
    pub feature_means: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterReport {
    pub features: Vec<TrendFeature>,
    pub labeling: ClusterLabeling,
    /// One entry per input trend, in input order
    pub assignments: Vec<ClusterAssignment>,
    /// Non-empty clusters, by cluster id
    pub profiles: Vec<ClusterProfile>,
    /// Within-cluster sum of squares in standardized units
    pub inertia: f64,
    pub iterations: usize,
}

impl ClusterReport {
    /// Number of distinct cluster labels actually used
    pub fn distinct_clusters(&self) -> usize {
        self.profiles.len()
    }
}

/// Result of a k-means fit
#[derive(Debug, Clone, PartialEq)]
pub struct KMeansFit {
    pub labels: Vec<usize>,
    pub centroids: Vec<Vec<f64>>,
    pub inertia: f64,
    pub iterations: usize,
}

/// Center each column to zero mean and scale to unit population variance.
/// Zero-variance columns are only centered.
pub fn standardize(rows: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let Some(first) = rows.first() else {
        return Vec::new();
    };
    let n = rows.len() as f64;
    let dims = first.len();

    let mut means = vec![0.0; dims];
    for row in rows {
        for (m, v) in means.iter_mut().zip(row) {
            *m += v / n;
        }
    }

    let mut scales = vec![0.0; dims];
    for row in rows {
        for d in 0..dims {
            scales[d] += (row[d] - means[d]).powi(2) / n;
        }
    }
    for s in scales.iter_mut() {
        *s = s.sqrt();
        if *s <= f64::EPSILON {
            *s = 1.0;
        }
    }

    rows.iter()
        .map(|row| {
            (0..dims)
                .map(|d| (row[d] - means[d]) / scales[d])
                .collect::<Vec<f64>>()
        })
        .collect()
}

fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum()
}

/// Index of the nearest centroid (lowest index on ties) and its distance
fn nearest(point: &[f64], centroids: &[Vec<f64>]) -> (usize, f64) {
    let mut best = (0, f64::INFINITY);
    for (i, c) in centroids.iter().enumerate() {
        let d = squared_distance(point, c);
        if d < best.1 {
            best = (i, d);
        }
    }
    best
}

/// k-means++ seeding
fn init_centroids<R: Rng + ?Sized>(points: &[Vec<f64>], k: usize, rng: &mut R) -> Vec<Vec<f64>> {
    let mut centroids = Vec::with_capacity(k);
    centroids.push(points[rng.gen_range(0..points.len())].clone());

    while centroids.len() < k {
        let weights: Vec<f64> = points.iter().map(|p| nearest(p, &centroids).1).collect();
        let total: f64 = weights.iter().sum();

        let index = if total > 0.0 {
            let mut target = rng.gen_range(0.0..total);
            let mut chosen = points.len() - 1;
            for (i, w) in weights.iter().enumerate() {
                if target < *w {
                    chosen = i;
                    break;
                }
                target -= w;
            }
            chosen
        } else {
            // every point already coincides with a centroid
            rng.gen_range(0..points.len())
        };
        centroids.push(points[index].clone());
    }

    centroids
}

fn lloyd(points: &[Vec<f64>], mut centroids: Vec<Vec<f64>>, max_iter: usize, tol: f64) -> KMeansFit {
    let k = centroids.len();
    let dims = points[0].len();
    let mut iterations = 0;

    for iter in 1..=max_iter {
        iterations = iter;
        let assigned: Vec<(usize, f64)> = points.iter().map(|p| nearest(p, &centroids)).collect();

        let mut sums = vec![vec![0.0; dims]; k];
        let mut counts = vec![0usize; k];
        for (p, (label, _)) in points.iter().zip(&assigned) {
            counts[*label] += 1;
            for d in 0..dims {
                sums[*label][d] += p[d];
            }
        }

        // Points ordered by distance to their centroid, farthest first
        let mut far: Vec<usize> = (0..points.len()).collect();
        far.sort_by(|a, b| assigned[*b].1.total_cmp(&assigned[*a].1));
        let mut far = far.into_iter().filter(|&i| assigned[i].1 > 0.0);

        let mut updated: Vec<Vec<f64>> = Vec::with_capacity(k);
        for c in 0..k {
            if counts[c] > 0 {
                updated.push(sums[c].iter().map(|s| s / counts[c] as f64).collect());
            } else if let Some(i) = far.next() {
                updated.push(points[i].clone());
            } else {
                updated.push(centroids[c].clone());
            }
        }

        let shift: f64 = centroids
            .iter()
            .zip(&updated)
            .map(|(old, new)| squared_distance(old, new))
            .sum();
        centroids = updated;

        if shift <= tol {
            break;
        }
    }

    let assigned: Vec<(usize, f64)> = points.iter().map(|p| nearest(p, &centroids)).collect();
    KMeansFit {
        labels: assigned.iter().map(|a| a.0).collect(),
        inertia: assigned.iter().map(|a| a.1).sum(),
        centroids,
        iterations,
    }
}

/// Run k-means `n_init` times and keep the lowest-inertia fit
pub fn kmeans<R: Rng + ?Sized>(
    points: &[Vec<f64>],
    k: usize,
    n_init: usize,
    max_iter: usize,
    tol: f64,
    rng: &mut R,
) -> Result<KMeansFit> {
    if points.is_empty() {
        return Err(Error::InvalidInput(
            "cannot cluster an empty record set".to_string(),
        ));
    }
    if k == 0 {
        return Err(Error::InvalidInput("cluster count must be positive".to_string()));
    }
    if points.len() < k {
        return Err(Error::InvalidInput(format!(
            "need at least {} records for {} clusters, got {}",
            k,
            k,
            points.len()
        )));
    }

    let mut best: Option<KMeansFit> = None;
    for _ in 0..n_init.max(1) {
        let initial = init_centroids(points, k, rng);
        let fit = lloyd(points, initial, max_iter.max(1), tol);
        if best.as_ref().map_or(true, |b| fit.inertia < b.inertia) {
            best = Some(fit);
        }
    }

    best.ok_or_else(|| Error::InvalidInput("k-means produced no fit".to_string()))
}

/// Cluster trends on the given features
pub fn cluster(
    trends: &[TrendRecord],
    features: &[TrendFeature],
    config: &ClusteringConfig,
) -> Result<ClusterReport> {
    if features.len() != FEATURE_COUNT {
        return Err(Error::InvalidInput(format!(
            "clustering needs exactly {} features, got {}",
            FEATURE_COUNT,
            features.len()
        )));
    }
    for (i, f) in features.iter().enumerate() {
        if features[..i].contains(f) {
            return Err(Error::InvalidInput(format!("duplicate feature: {}", f)));
        }
    }
    let k = config.clusters;
    if k == 0 || k > CLUSTER_NAMES.len() {
        return Err(Error::InvalidInput(format!(
            "cluster count must be between 1 and {}, got {}",
            CLUSTER_NAMES.len(),
            k
        )));
    }

    let raw: Vec<Vec<f64>> = trends
        .iter()
        .map(|t| features.iter().map(|f| f.value(t)).collect())
        .collect();
    let scaled = standardize(&raw);

    let mut rng = StdRng::seed_from_u64(config.seed);
    let fit = kmeans(
        &scaled,
        k,
        config.n_init,
        config.max_iter,
        config.tolerance,
        &mut rng,
    )?;

    // Feature means per k-means cluster, in original units
    let mut sizes = vec![0usize; k];
    let mut means = vec![vec![0.0; FEATURE_COUNT]; k];
    for (row, &label) in raw.iter().zip(&fit.labels) {
        sizes[label] += 1;
        for d in 0..FEATURE_COUNT {
            means[label][d] += row[d];
        }
    }
    for (mean, &size) in means.iter_mut().zip(&sizes) {
        if size > 0 {
            mean.iter_mut().for_each(|m| *m /= size as f64);
        }
    }

    // rank[c] = display id of k-means cluster c
    let rank: Vec<usize> = match config.labeling {
        ClusterLabeling::Positional => (0..k).collect(),
        ClusterLabeling::RankedByImpact => {
            let mut order: Vec<usize> = (0..k).collect();
            order.sort_by(|&a, &b| {
                (sizes[b] > 0)
                    .cmp(&(sizes[a] > 0))
                    .then(means[b][0].total_cmp(&means[a][0]))
            });
            let mut rank = vec![0; k];
            for (position, &c) in order.iter().enumerate() {
                rank[c] = position;
            }
            rank
        }
    };

    let assignments = trends
        .iter()
        .zip(&fit.labels)
        .map(|(t, &label)| ClusterAssignment {
            trend: t.name.clone(),
            cluster_id: rank[label],
            cluster_name: CLUSTER_NAMES[rank[label]].to_string(),
        })
        .collect();

    let mut profiles: Vec<ClusterProfile> = (0..k)
        .filter(|&c| sizes[c] > 0)
        .map(|c| ClusterProfile {
            cluster_id: rank[c],
            cluster_name: CLUSTER_NAMES[rank[c]].to_string(),
            size: sizes[c],
            feature_means: means[c].clone(),
        })
        .collect();
    profiles.sort_by_key(|p| p.cluster_id);

    if profiles.len() < k {
        tracing::warn!(
            requested = k,
            distinct = profiles.len(),
            "Fewer distinct points than clusters, some clusters are empty"
        );
    }
    tracing::debug!(
        records = trends.len(),
        clusters = profiles.len(),
        inertia = fit.inertia,
        iterations = fit.iterations,
        "Clustered trends"
    );

    Ok(ClusterReport {
        features: features.to_vec(),
        labeling: config.labeling,
        assignments,
        profiles,
        inertia: fit.inertia,
        iterations: fit.iterations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::models::TimeHorizon;
    use std::collections::HashSet;

    fn trend(name: &str, impact: f64, size: f64, adoption: f64) -> TrendRecord {
        TrendRecord {
            name: name.to_string(),
            impact_score: impact,
            time_horizon: TimeHorizon::Emerging,
            market_size_billion: size,
            adoption_rate: adoption,
            description: String::new(),
            key_players: vec![],
        }
    }

    /// Four tight, well separated groups of three
    fn grouped_trends() -> Vec<TrendRecord> {
        let centers = [
            (9.5, 250.0, 60.0),
            (8.0, 20.0, 10.0),
            (6.0, 150.0, 30.0),
            (7.0, 60.0, 80.0),
        ];
        let mut trends = Vec::new();
        for (g, (impact, size, adoption)) in centers.iter().enumerate() {
            for j in 0..3 {
                let jitter = j as f64 * 0.01;
                trends.push(trend(
                    &format!("g{}-{}", g, j),
                    impact + jitter,
                    size + jitter,
                    adoption + jitter,
                ));
            }
        }
        trends
    }

    #[test]
    fn test_standardize_zero_mean_unit_variance() {
        let rows = vec![vec![1.0, 5.0], vec![2.0, 5.0], vec![3.0, 5.0]];
        let scaled = standardize(&rows);

        let mean: f64 = scaled.iter().map(|r| r[0]).sum::<f64>() / 3.0;
        let var: f64 = scaled.iter().map(|r| r[0].powi(2)).sum::<f64>() / 3.0;
        assert!(mean.abs() < 1e-12);
        assert!((var - 1.0).abs() < 1e-12);
        // constant column only centered
        assert!(scaled.iter().all(|r| r[1] == 0.0));
    }

    #[test]
    fn test_separated_groups_recovered() {
        let trends = grouped_trends();
        let report = cluster(&trends, &DEFAULT_FEATURES, &ClusteringConfig::default()).unwrap();

        assert_eq!(report.assignments.len(), 12);
        assert_eq!(report.distinct_clusters(), 4);
        for group in report.assignments.chunks(3) {
            assert!(group.iter().all(|a| a.cluster_id == group[0].cluster_id));
        }
        let ids: HashSet<usize> = report.assignments.iter().map(|a| a.cluster_id).collect();
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn test_names_follow_ids() {
        let report = cluster(
            &catalog::trends(),
            &DEFAULT_FEATURES,
            &ClusteringConfig::default(),
        )
        .unwrap();

        for a in &report.assignments {
            assert!(a.cluster_id < 4);
            assert_eq!(a.cluster_name, CLUSTER_NAMES[a.cluster_id]);
        }
        assert_eq!(report.distinct_clusters(), 4);
        let total: usize = report.profiles.iter().map(|p| p.size).sum();
        assert_eq!(total, 20);
    }

    #[test]
    fn test_deterministic_for_same_seed() {
        let trends = catalog::trends();
        let config = ClusteringConfig::default();
        let a = cluster(&trends, &DEFAULT_FEATURES, &config).unwrap();
        let b = cluster(&trends, &DEFAULT_FEATURES, &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_ranked_labeling_orders_by_impact() {
        let config = ClusteringConfig {
            labeling: ClusterLabeling::RankedByImpact,
            ..ClusteringConfig::default()
        };
        let report = cluster(&grouped_trends(), &DEFAULT_FEATURES, &config).unwrap();

        let leaders = report
            .assignments
            .iter()
            .find(|a| a.trend == "g0-0")
            .unwrap();
        assert_eq!(leaders.cluster_name, "High Impact Leaders");

        let impacts: Vec<f64> = report.profiles.iter().map(|p| p.feature_means[0]).collect();
        assert!(impacts.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_duplicate_points_collapse() {
        let trends = vec![
            trend("a", 9.0, 100.0, 50.0),
            trend("b", 9.0, 100.0, 50.0),
            trend("c", 9.0, 100.0, 50.0),
            trend("d", 5.0, 10.0, 5.0),
            trend("e", 5.0, 10.0, 5.0),
        ];
        let report = cluster(&trends, &DEFAULT_FEATURES, &ClusteringConfig::default()).unwrap();

        assert_eq!(report.distinct_clusters(), 2);
        assert_eq!(report.assignments[0].cluster_id, report.assignments[2].cluster_id);
        assert_ne!(report.assignments[0].cluster_id, report.assignments[3].cluster_id);
    }

    #[test]
    fn test_too_few_records() {
        let err = cluster(&[], &DEFAULT_FEATURES, &ClusteringConfig::default()).unwrap_err();
        assert!(err.is_invalid_input());

        let trends = vec![trend("a", 1.0, 1.0, 1.0), trend("b", 2.0, 2.0, 2.0)];
        let err = cluster(&trends, &DEFAULT_FEATURES, &ClusteringConfig::default()).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_feature_validation() {
        let trends = catalog::trends();
        let config = ClusteringConfig::default();

        let two = [TrendFeature::ImpactScore, TrendFeature::AdoptionRate];
        assert!(cluster(&trends, &two, &config).is_err());

        let duplicated = [
            TrendFeature::ImpactScore,
            TrendFeature::ImpactScore,
            TrendFeature::AdoptionRate,
        ];
        assert!(cluster(&trends, &duplicated, &config).is_err());
    }

    #[test]
    fn test_fewer_clusters_configured() {
        let config = ClusteringConfig {
            clusters: 2,
            ..ClusteringConfig::default()
        };
        let report = cluster(&catalog::trends(), &DEFAULT_FEATURES, &config).unwrap();
        assert!(report.assignments.iter().all(|a| a.cluster_id < 2));
    }

    #[test]
    fn test_labeling_parse() {
        assert_eq!(
            "ranked-by-impact".parse::<ClusterLabeling>(),
            Ok(ClusterLabeling::RankedByImpact)
        );
        assert_eq!("positional".parse::<ClusterLabeling>(), Ok(ClusterLabeling::Positional));
        assert!("alpha".parse::<ClusterLabeling>().is_err());
    }
}
