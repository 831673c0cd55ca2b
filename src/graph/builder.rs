//! Graph construction module

use crate::error::Result;
use crate::graph::AdjacencyGraph;

/// Builder that buffers edges until the vertex count is known
pub struct GraphBuilder {
    /// Vertex count fixed up front, if any
    declared_vertices: Option<usize>,

    /// Largest vertex id seen so far
    max_vertex: Option<u32>,

    /// Buffered edges in arrival order
    edges: Vec<(u32, u32)>,

    /// Whether edges are inserted as single arcs
    directed: bool,
}

impl GraphBuilder {
    /// Create a new graph builder with the given edge capacity
    pub fn with_capacity(capacity: usize, directed: bool) -> Self {
        Self {
            declared_vertices: None,
            max_vertex: None,
            edges: Vec::with_capacity(capacity),
            directed,
        }
    }

    /// Fix the vertex count instead of inferring it from the edges
    pub fn declared_vertices(mut self, vertex_count: usize) -> Self {
        self.declared_vertices = Some(vertex_count);
        self
    }

    /// Add an edge between two vertices
    pub fn add_edge(&mut self, x: u32, y: u32) {
        let larger = x.max(y);
        self.max_vertex = Some(self.max_vertex.map_or(larger, |m| m.max(larger)));
        self.edges.push((x, y));
    }

    /// Vertex count the built graph will have
    pub fn vertex_count(&self) -> usize {
        self.declared_vertices
            .unwrap_or_else(|| self.max_vertex.map_or(0, |m| m as usize + 1))
    }

    /// Build the adjacency graph; fails if an edge falls outside a declared range
    pub fn build(self) -> Result<AdjacencyGraph> {
        let mut graph = AdjacencyGraph::with_vertices(self.vertex_count());

        for (x, y) in self.edges {
            graph.add_edge(x, y, self.directed)?;
        }

        log::debug!(
            "Built graph with {} vertices, {} edges and {} arcs",
            graph.vertex_count(),
            graph.edge_count(),
            graph.arc_count()
        );

        Ok(graph)
    }
}
