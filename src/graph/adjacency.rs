//! Adjacency-list graph representation

use crate::error::{QualityError, Result};
use serde::{Deserialize, Serialize};

/// Graph over vertices `0..vertex_count`, each with an ordered neighbor list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjacencyGraph {
    /// Neighbor sequence per vertex, in insertion order (parallel edges kept)
    adjacency: Vec<Vec<u32>>,

    /// Number of `add_edge` calls that succeeded
    edge_count: usize,

    /// Total adjacency entries across all vertices
    arc_count: usize,
}

impl AdjacencyGraph {
    /// Empty graph with `vertex_count` isolated vertices
    pub fn with_vertices(vertex_count: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); vertex_count],
            edge_count: 0,
            arc_count: 0,
        }
    }

    /// Insert `x -> y`, and `y -> x` as well when the edge is undirected
    pub fn add_edge(&mut self, x: u32, y: u32, directed: bool) -> Result<()> {
        self.check_vertex(x)?;
        self.check_vertex(y)?;

        self.adjacency[x as usize].push(y);
        self.arc_count += 1;

        if !directed {
            self.adjacency[y as usize].push(x);
            self.arc_count += 1;
        }

        self.edge_count += 1;
        Ok(())
    }

    fn check_vertex(&self, vertex: u32) -> Result<()> {
        if (vertex as usize) < self.adjacency.len() {
            Ok(())
        } else {
            Err(QualityError::VertexOutOfRange {
                vertex,
                vertex_count: self.adjacency.len(),
            })
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Logical edges: one per successful `add_edge`, directed or not
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Physical adjacency entries: an undirected edge contributes two
    pub fn arc_count(&self) -> usize {
        self.arc_count
    }

    /// Neighbors of `vertex`; empty when the vertex is out of range
    pub fn neighbors(&self, vertex: usize) -> &[u32] {
        self.adjacency.get(vertex).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn degree(&self, vertex: usize) -> usize {
        self.neighbors(vertex).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undirected_edge_mirrors_both_ways() {
        let mut graph = AdjacencyGraph::with_vertices(3);
        graph.add_edge(0, 1, false).unwrap();
        graph.add_edge(1, 2, false).unwrap();

        assert_eq!(graph.neighbors(1), &[0, 2]);
        assert_eq!(graph.degree(0), 1);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.arc_count(), 4);
    }

    #[test]
    fn directed_edge_is_one_arc() {
        let mut graph = AdjacencyGraph::with_vertices(2);
        graph.add_edge(0, 1, true).unwrap();

        assert_eq!(graph.neighbors(0), &[1]);
        assert!(graph.neighbors(1).is_empty());
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.arc_count(), 1);
    }

    #[test]
    fn parallel_edges_are_kept() {
        let mut graph = AdjacencyGraph::with_vertices(2);
        graph.add_edge(0, 1, false).unwrap();
        graph.add_edge(0, 1, false).unwrap();

        assert_eq!(graph.degree(0), 2);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn out_of_range_vertex_is_rejected() {
        let mut graph = AdjacencyGraph::with_vertices(2);
        let err = graph.add_edge(0, 2, false).unwrap_err();

        assert!(matches!(
            err,
            QualityError::VertexOutOfRange {
                vertex: 2,
                vertex_count: 2
            }
        ));
        assert_eq!(graph.arc_count(), 0);
    }

    #[test]
    fn unknown_vertex_has_no_neighbors() {
        let mut graph = AdjacencyGraph::with_vertices(2);
        graph.add_edge(0, 1, false).unwrap();

        assert!(graph.neighbors(2).is_empty());
        assert_eq!(graph.degree(usize::MAX), 0);
    }
}
