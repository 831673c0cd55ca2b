//! Presentation order for clusters

use crate::cluster::metrics::ClusterQuality;
use crate::cluster::ClusterId;
use std::cmp::Reverse;
use std::collections::BTreeMap;

/// Cluster ids by descending size, ties by ascending id
pub fn rank_by_size(sizes: &BTreeMap<ClusterId, usize>) -> Vec<ClusterId> {
    let mut ids: Vec<ClusterId> = sizes.keys().copied().collect();
    ids.sort_by_key(|id| (Reverse(sizes[id]), *id));
    ids
}

/// Sort quality rows into the same order as [`rank_by_size`]
pub fn rank_qualities(rows: &mut [ClusterQuality]) {
    rows.sort_by_key(|row| (Reverse(row.size), row.id));
}
