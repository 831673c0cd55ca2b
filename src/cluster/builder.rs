//! Cluster membership construction from the clustering tools' records

use crate::cluster::{ClusterId, EdgeTally, Membership};
use crate::config::DuplicatePolicy;
use crate::data::{EdgeRecord, LoggedEdge, MembershipRecord};
use crate::diagnostics::{Diagnostics, Warning};
use crate::error::Result;
use std::collections::BTreeSet;

/// Folds edge-tagged records into membership plus a normalised edge log
pub struct EdgeClusterBuilder {
    membership: Membership,
    edge_log: Vec<LoggedEdge>,
}

/// Output of [`EdgeClusterBuilder::build`]
#[derive(Debug, Clone)]
pub struct EdgeClusters {
    pub membership: Membership,
    pub edge_log: Vec<LoggedEdge>,
}

impl EdgeClusterBuilder {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            membership: Membership::new(),
            edge_log: Vec::with_capacity(capacity),
        }
    }

    pub fn add_record(&mut self, record: &EdgeRecord) {
        let id = ClusterId::Real(record.cluster);
        self.membership.add_vertex(id, record.v1);
        self.membership.add_vertex(id, record.v2);

        self.edge_log.push(LoggedEdge {
            v1: record.v1,
            v2: record.v2,
            cluster: id,
        });
    }

    pub fn build(self) -> EdgeClusters {
        log::info!("{} edges were processed", self.edge_log.len());
        log::info!(
            "{} nontrivial clusters were identified",
            self.membership.len()
        );

        EdgeClusters {
            membership: self.membership,
            edge_log: self.edge_log,
        }
    }
}

/// Convenience wrapper over [`EdgeClusterBuilder`]
pub fn from_edge_records(records: &[EdgeRecord]) -> EdgeClusters {
    let mut builder = EdgeClusterBuilder::with_capacity(records.len());
    for record in records {
        builder.add_record(record);
    }
    builder.build()
}

/// Applies size-tagged records, resolving repeated ids by a policy
pub struct ListingBuilder {
    membership: Membership,
    policy: DuplicatePolicy,
    diagnostics: Diagnostics,
}

impl ListingBuilder {
    pub fn new(policy: DuplicatePolicy) -> Self {
        Self {
            membership: Membership::new(),
            policy,
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn add_record(&mut self, record: &MembershipRecord) {
        let mut members = BTreeSet::new();
        for &vertex in &record.members {
            if !members.insert(vertex) {
                self.diagnostics.warn(Warning::RepeatedMember {
                    cluster: record.id,
                    vertex,
                });
            }
        }

        if !self.membership.contains(&record.id) {
            self.membership.insert(record.id, members);
            return;
        }

        self.diagnostics
            .warn(Warning::DuplicateClusterId { cluster: record.id });
        match self.policy {
            DuplicatePolicy::LastWins => {
                self.membership.insert(record.id, members);
            }
            DuplicatePolicy::FirstWins => {}
            DuplicatePolicy::Merge => self.membership.extend(record.id, members),
        }
    }

    pub fn build(self) -> (Membership, Diagnostics) {
        log::info!("{} clusters were read", self.membership.len());
        (self.membership, self.diagnostics)
    }
}

/// Convenience wrapper over [`ListingBuilder`]
pub fn from_membership_records(
    records: &[MembershipRecord],
    policy: DuplicatePolicy,
) -> (Membership, Diagnostics) {
    let mut builder = ListingBuilder::new(policy);
    for record in records {
        builder.add_record(record);
    }
    builder.build()
}

/// Give every vertex in `0..vertex_count` that no cluster covers its own
/// singleton cluster. Returns how many were added.
pub fn synthesize_singletons(membership: &mut Membership, vertex_count: usize) -> Result<usize> {
    let covered = membership.coverage(vertex_count)?;

    let mut added = 0;
    for vertex in (0..vertex_count).filter(|&v| !covered[v]) {
        let vertex = vertex as u32;
        membership.insert(ClusterId::Singleton(vertex), BTreeSet::from([vertex]));
        added += 1;
    }

    log::info!("There are {} trivial clusters", added);
    Ok(added)
}

/// Count edge-log entries per cluster
pub fn count_cluster_edges(edge_log: &[LoggedEdge]) -> EdgeTally {
    let mut tally = EdgeTally::new();
    for edge in edge_log {
        *tally.entry(edge.cluster).or_insert(0) += 1;
    }
    tally
}

/// Listing records for a membership, one per cluster in id order
pub fn membership_records(membership: &Membership) -> Vec<MembershipRecord> {
    membership
        .iter()
        .map(|(id, members)| MembershipRecord {
            id: *id,
            members: members.iter().copied().collect(),
        })
        .collect()
}
