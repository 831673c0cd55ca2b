//! Cluster statistics and metrics

use crate::cluster::ranking::rank_qualities;
use crate::cluster::{ClusterId, EdgeTally, Membership};
use crate::diagnostics::{Diagnostics, Warning};
use rayon::prelude::*;
use serde::Serialize;
use statrs::statistics::Statistics;
use std::collections::BTreeMap;

/// Averages are taken over clusters strictly larger than each of these sizes
pub const SIZE_BUCKETS: [usize; 3] = [1, 2, 3];

/// Density figures for one cluster
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterQuality {
    pub id: ClusterId,
    pub size: usize,
    pub edges: usize,
    pub max_possible_edges: u64,

    /// Percentage of possible edges present; unclamped
    pub completion: f64,
}

/// Edges a simple undirected graph on `size` vertices can hold
pub fn max_possible_edges(size: usize) -> u64 {
    let size = size as u64;
    size * size.saturating_sub(1) / 2
}

/// Completion percentage; a singleton is complete by convention
pub fn completion_percentage(size: usize, edges: usize) -> f64 {
    if size <= 1 {
        return 100.0;
    }
    edges as f64 * 100.0 / max_possible_edges(size) as f64
}

/// Compute quality rows for every sized cluster, in id order.
///
/// Clusters missing from `edges` have zero edges. A completion above 100%
/// is kept as is and reported through `diagnostics`.
pub fn cluster_qualities(
    sizes: &BTreeMap<ClusterId, usize>,
    edges: &EdgeTally,
    diagnostics: &mut Diagnostics,
) -> Vec<ClusterQuality> {
    let entries: Vec<(ClusterId, usize)> = sizes.iter().map(|(id, size)| (*id, *size)).collect();

    let qualities: Vec<ClusterQuality> = entries
        .par_iter()
        .map(|&(id, size)| {
            let edges = edges.get(&id).copied().unwrap_or(0);
            ClusterQuality {
                id,
                size,
                edges,
                max_possible_edges: max_possible_edges(size),
                completion: completion_percentage(size, edges),
            }
        })
        .collect();

    for quality in qualities.iter().filter(|q| q.completion > 100.0) {
        diagnostics.warn(Warning::CompletionExceedsFull {
            cluster: quality.id,
            size: quality.size,
            edges: quality.edges,
            completion: quality.completion,
        });
    }

    qualities
}

/// Average completion over clusters larger than a threshold
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizeBucket {
    pub min_size_exclusive: usize,
    pub clusters: usize,

    /// `None` when no cluster is large enough
    pub average_completion: Option<f64>,
}

/// Aggregate figures across all clusters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensitySummary {
    pub cluster_count: usize,
    pub trivial_count: usize,
    pub buckets: Vec<SizeBucket>,
}

impl DensitySummary {
    pub fn bucket(&self, min_size_exclusive: usize) -> Option<&SizeBucket> {
        self.buckets
            .iter()
            .find(|b| b.min_size_exclusive == min_size_exclusive)
    }
}

/// Mean completion per size bucket (unweighted by size or edges)
pub fn summarize(qualities: &[ClusterQuality], diagnostics: &mut Diagnostics) -> DensitySummary {
    let buckets = SIZE_BUCKETS
        .iter()
        .map(|&threshold| {
            let completions: Vec<f64> = qualities
                .iter()
                .filter(|q| q.size > threshold)
                .map(|q| q.completion)
                .collect();

            let average_completion = if completions.is_empty() {
                diagnostics.warn(Warning::EmptySizeBucket {
                    min_size_exclusive: threshold,
                });
                None
            } else {
                Some(completions.iter().mean())
            };

            SizeBucket {
                min_size_exclusive: threshold,
                clusters: completions.len(),
                average_completion,
            }
        })
        .collect();

    DensitySummary {
        cluster_count: qualities.len(),
        trivial_count: qualities.iter().filter(|q| q.size == 1).count(),
        buckets,
    }
}

/// Everything a report needs: ranked rows, aggregates and warnings
#[derive(Debug, Clone, Serialize)]
pub struct QualityReport {
    pub clusters: Vec<ClusterQuality>,
    pub summary: DensitySummary,
    pub warnings: Vec<Warning>,
}

/// Evaluate a membership against its per-cluster edge tally.
///
/// `diagnostics` carries warnings already raised while building the
/// membership; they lead the report's warning list.
pub fn assess(
    membership: &Membership,
    edges: &EdgeTally,
    mut diagnostics: Diagnostics,
) -> QualityReport {
    for (id, &count) in edges {
        if !membership.contains(id) {
            diagnostics.warn(Warning::EdgesForUnknownCluster {
                cluster: *id,
                edges: count,
            });
        }
    }

    let mut clusters = cluster_qualities(&membership.sizes(), edges, &mut diagnostics);
    rank_qualities(&mut clusters);

    let summary = summarize(&clusters, &mut diagnostics);
    for bucket in &summary.buckets {
        if let Some(average) = bucket.average_completion {
            log::info!(
                "Average cluster density for clusters of size greater than {}: {:.2}%",
                bucket.min_size_exclusive,
                average
            );
        }
    }

    QualityReport {
        clusters,
        summary,
        warnings: diagnostics.into_warnings(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sizes(entries: &[(i64, usize)]) -> BTreeMap<ClusterId, usize> {
        entries
            .iter()
            .map(|&(id, size)| (ClusterId::Real(id), size))
            .collect()
    }

    fn tally(entries: &[(i64, usize)]) -> EdgeTally {
        entries
            .iter()
            .map(|&(id, edges)| (ClusterId::Real(id), edges))
            .collect()
    }

    #[test]
    fn max_edges_for_small_sizes() {
        assert_eq!(max_possible_edges(0), 0);
        assert_eq!(max_possible_edges(1), 0);
        assert_eq!(max_possible_edges(2), 1);
        assert_eq!(max_possible_edges(5), 10);
    }

    #[test]
    fn triangle_missing_one_edge() {
        let completion = completion_percentage(3, 2);
        assert!((completion - 66.666_666).abs() < 1e-4);
        assert_eq!(format!("{:.2}", completion), "66.67");
    }

    #[test]
    fn singleton_is_always_complete() {
        assert_eq!(completion_percentage(1, 0), 100.0);
        assert_eq!(completion_percentage(1, 4), 100.0);
    }

    #[test]
    fn missing_tally_means_zero_edges() {
        let mut diagnostics = Diagnostics::new();
        let rows = cluster_qualities(&sizes(&[(1, 4)]), &EdgeTally::new(), &mut diagnostics);

        assert_eq!(rows[0].edges, 0);
        assert_eq!(rows[0].completion, 0.0);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn overfull_cluster_is_flagged_not_clamped() {
        let mut diagnostics = Diagnostics::new();
        let rows = cluster_qualities(&sizes(&[(1, 3)]), &tally(&[(1, 5)]), &mut diagnostics);

        assert!(rows[0].completion > 100.0);
        assert!(matches!(
            diagnostics.warnings(),
            [Warning::CompletionExceedsFull { edges: 5, size: 3, .. }]
        ));
    }

    #[test]
    fn bucket_averages_are_unweighted_means() {
        let mut diagnostics = Diagnostics::new();
        let rows = cluster_qualities(
            &sizes(&[(1, 2), (2, 3), (3, 4), (4, 1)]),
            &tally(&[(1, 1), (2, 0), (3, 3)]),
            &mut diagnostics,
        );
        let summary = summarize(&rows, &mut diagnostics);

        // Completions: size 2 => 100, size 3 => 0, size 4 => 50.
        let above_one = summary.bucket(1).unwrap();
        assert_eq!(above_one.clusters, 3);
        assert!((above_one.average_completion.unwrap() - 50.0).abs() < 1e-9);
        assert!((summary.bucket(2).unwrap().average_completion.unwrap() - 25.0).abs() < 1e-9);
        assert!((summary.bucket(3).unwrap().average_completion.unwrap() - 50.0).abs() < 1e-9);
        assert_eq!(summary.trivial_count, 1);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn empty_bucket_is_not_applicable() {
        let mut diagnostics = Diagnostics::new();
        let rows = cluster_qualities(&sizes(&[(1, 3)]), &tally(&[(1, 2)]), &mut diagnostics);
        let summary = summarize(&rows, &mut diagnostics);

        assert_eq!(summary.bucket(3).unwrap().average_completion, None);
        assert_eq!(summary.bucket(3).unwrap().clusters, 0);
        assert_eq!(
            diagnostics.warnings(),
            &[Warning::EmptySizeBucket {
                min_size_exclusive: 3
            }]
        );
    }

    #[test]
    fn assess_ranks_and_flags_unknown_clusters() {
        let mut membership = Membership::new();
        membership.extend(ClusterId::Real(1), [0, 1]);
        membership.extend(ClusterId::Real(2), [2, 3, 4]);
        membership.extend(ClusterId::Singleton(5), [5]);

        let report = assess(
            &membership,
            &tally(&[(1, 1), (2, 2), (9, 4)]),
            Diagnostics::new(),
        );

        let order: Vec<ClusterId> = report.clusters.iter().map(|q| q.id).collect();
        assert_eq!(
            order,
            vec![ClusterId::Real(2), ClusterId::Real(1), ClusterId::Singleton(5)]
        );
        assert_eq!(
            report.warnings[0],
            Warning::EdgesForUnknownCluster {
                cluster: ClusterId::Real(9),
                edges: 4
            }
        );
        assert_eq!(report.summary.cluster_count, 3);
    }
}
