//! Non-fatal data-integrity warnings collected during a run

use crate::cluster::ClusterId;
use serde::Serialize;
use std::fmt;

/// A data-integrity condition that does not stop processing
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// The same cluster id appeared in more than one size-tagged record
    DuplicateClusterId { cluster: ClusterId },

    /// A vertex was listed more than once within one size-tagged record
    RepeatedMember { cluster: ClusterId, vertex: u32 },

    /// More edges were tallied than the members can form
    CompletionExceedsFull {
        cluster: ClusterId,
        size: usize,
        edges: usize,
        completion: f64,
    },

    /// No cluster fell into an averaging bucket
    EmptySizeBucket { min_size_exclusive: usize },

    /// Edge-log entries carry a cluster id with no membership record
    EdgesForUnknownCluster { cluster: ClusterId, edges: usize },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::DuplicateClusterId { cluster } => {
                write!(f, "multiple clusters found with the same id ({})", cluster)
            }
            Warning::RepeatedMember { cluster, vertex } => {
                write!(f, "cluster {} lists vertex {} more than once", cluster, vertex)
            }
            Warning::CompletionExceedsFull {
                cluster,
                size,
                edges,
                completion,
            } => write!(
                f,
                "cluster {} has {} edges among {} vertices ({:.2}% complete)",
                cluster, edges, size, completion
            ),
            Warning::EmptySizeBucket { min_size_exclusive } => write!(
                f,
                "no clusters of size greater than {}; average is not applicable",
                min_size_exclusive
            ),
            Warning::EdgesForUnknownCluster { cluster, edges } => write!(
                f,
                "{} edges are tagged with cluster {} which has no members",
                edges, cluster
            ),
        }
    }
}

/// Collector for warnings; each one is logged as it arrives
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn(&mut self, warning: Warning) {
        log::warn!("{}", warning);
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_in_arrival_order() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.warn(Warning::EmptySizeBucket { min_size_exclusive: 3 });
        diagnostics.warn(Warning::DuplicateClusterId {
            cluster: ClusterId::Real(7),
        });

        assert_eq!(diagnostics.warnings().len(), 2);
        assert_eq!(
            diagnostics.warnings()[1],
            Warning::DuplicateClusterId {
                cluster: ClusterId::Real(7)
            }
        );
    }

    #[test]
    fn singleton_ids_render_negative() {
        let warning = Warning::RepeatedMember {
            cluster: ClusterId::Singleton(0),
            vertex: 0,
        };
        assert_eq!(warning.to_string(), "cluster -0 lists vertex 0 more than once");
    }
}
