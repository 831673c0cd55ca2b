//! Cluster analysis module

pub mod builder;
pub mod metrics;
pub mod ranking;

use crate::error::{QualityError, Result};
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Identifier of a cluster
///
/// Real ids come from the clustering tool. Singletons are synthesised for
/// vertices no real cluster covers and are keyed by the vertex, so vertex 0
/// never collides with a real cluster 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClusterId {
    Real(i64),
    Singleton(u32),
}

impl ClusterId {
    /// Numeric id as written in listings: singletons are negated vertex ids
    pub fn numeric(&self) -> i64 {
        match *self {
            ClusterId::Real(id) => id,
            ClusterId::Singleton(vertex) => -i64::from(vertex),
        }
    }

    pub fn is_singleton(&self) -> bool {
        matches!(self, ClusterId::Singleton(_))
    }

    fn sort_key(&self) -> (i64, u8) {
        match self {
            ClusterId::Singleton(_) => (self.numeric(), 0),
            ClusterId::Real(_) => (self.numeric(), 1),
        }
    }
}

impl Ord for ClusterId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl PartialOrd for ClusterId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClusterId::Real(id) => write!(f, "{}", id),
            ClusterId::Singleton(vertex) => write!(f, "-{}", vertex),
        }
    }
}

impl Serialize for ClusterId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Edges tallied per cluster; a missing entry means zero edges
pub type EdgeTally = BTreeMap<ClusterId, usize>;

/// Mapping from cluster id to its distinct member vertices
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Membership {
    clusters: BTreeMap<ClusterId, BTreeSet<u32>>,
}

impl Membership {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one vertex to a cluster, creating the cluster if needed
    pub fn add_vertex(&mut self, id: ClusterId, vertex: u32) {
        self.clusters.entry(id).or_default().insert(vertex);
    }

    /// Replace a cluster's members, returning the previous ones
    pub fn insert(&mut self, id: ClusterId, members: BTreeSet<u32>) -> Option<BTreeSet<u32>> {
        self.clusters.insert(id, members)
    }

    /// Union extra members into a cluster
    pub fn extend(&mut self, id: ClusterId, members: impl IntoIterator<Item = u32>) {
        self.clusters.entry(id).or_default().extend(members);
    }

    pub fn get(&self, id: &ClusterId) -> Option<&BTreeSet<u32>> {
        self.clusters.get(id)
    }

    pub fn contains(&self, id: &ClusterId) -> bool {
        self.clusters.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ClusterId, &BTreeSet<u32>)> {
        self.clusters.iter()
    }

    /// Member count per cluster
    pub fn sizes(&self) -> BTreeMap<ClusterId, usize> {
        self.clusters
            .iter()
            .map(|(id, members)| (*id, members.len()))
            .collect()
    }

    pub fn singleton_count(&self) -> usize {
        self.clusters.keys().filter(|id| id.is_singleton()).count()
    }

    pub fn max_vertex(&self) -> Option<u32> {
        self.clusters
            .values()
            .filter_map(|members| members.iter().next_back())
            .copied()
            .max()
    }

    /// Per-vertex flag telling whether any cluster contains it
    pub fn coverage(&self, vertex_count: usize) -> Result<Vec<bool>> {
        let mut covered = vec![false; vertex_count];
        for members in self.clusters.values() {
            for &vertex in members {
                match covered.get_mut(vertex as usize) {
                    Some(flag) => *flag = true,
                    None => {
                        return Err(QualityError::VertexOutOfRange {
                            vertex,
                            vertex_count,
                        })
                    }
                }
            }
        }
        Ok(covered)
    }
}
