//! Graph traversal and connected-component analysis

use crate::graph::AdjacencyGraph;
use serde::Serialize;
use std::collections::VecDeque;

/// Discovery state for traversals over one graph.
///
/// State belongs to the traversal, not the graph, so independent traversals
/// of the same graph never see each other's marks.
pub struct Traversal<'g> {
    graph: &'g AdjacencyGraph,
    discovered: Vec<bool>,
    processed: Vec<bool>,
}

impl<'g> Traversal<'g> {
    /// Fresh traversal context with every vertex undiscovered
    pub fn new(graph: &'g AdjacencyGraph) -> Self {
        let vertex_count = graph.vertex_count();
        Self {
            graph,
            discovered: vec![false; vertex_count],
            processed: vec![false; vertex_count],
        }
    }

    pub fn is_discovered(&self, vertex: usize) -> bool {
        self.discovered.get(vertex).copied().unwrap_or(false)
    }

    pub fn is_processed(&self, vertex: usize) -> bool {
        self.processed.get(vertex).copied().unwrap_or(false)
    }

    /// Breadth-first search from `start`.
    ///
    /// Returns every vertex newly discovered by this call, `start` first. If
    /// `start` was already discovered by an earlier call on this context the
    /// result is empty, as it is for a `start` outside the graph.
    pub fn breadth_first_component(&mut self, start: u32) -> Vec<u32> {
        let mut component = Vec::new();
        match self.discovered.get(start as usize) {
            Some(false) => {}
            _ => return component,
        }

        let mut queue = VecDeque::new();
        self.discovered[start as usize] = true;
        component.push(start);
        queue.push_back(start);

        while let Some(vertex) = queue.pop_front() {
            for &neighbor in self.graph.neighbors(vertex as usize) {
                if !self.discovered[neighbor as usize] {
                    self.discovered[neighbor as usize] = true;
                    component.push(neighbor);
                    queue.push_back(neighbor);
                }
            }
            self.processed[vertex as usize] = true;
        }

        component
    }
}

/// Enumerate components by launching a traversal from every undiscovered
/// vertex in ascending id order.
///
/// With `exclude_trivial`, single-vertex components are left out. For a
/// directed graph each component is the set reachable from its seed that no
/// earlier seed reached.
pub fn connected_components(graph: &AdjacencyGraph, exclude_trivial: bool) -> Vec<Vec<u32>> {
    let mut traversal = Traversal::new(graph);
    let mut components = Vec::new();

    for vertex in 0..graph.vertex_count() {
        if traversal.is_discovered(vertex) {
            continue;
        }
        let component = traversal.breadth_first_component(vertex as u32);
        if !exclude_trivial || component.len() > 1 {
            components.push(component);
        }
    }

    log::debug!(
        "Found {} components over {} vertices",
        components.len(),
        graph.vertex_count()
    );

    components
}

/// Overview of a component enumeration
#[derive(Debug, Clone, Serialize)]
pub struct ComponentSummary {
    pub vertex_count: usize,
    pub edge_count: usize,
    pub arc_count: usize,
    pub component_count: usize,
    pub trivial_excluded: bool,
    pub largest_component: usize,

    /// Component sizes, largest first
    pub sizes: Vec<usize>,
}

impl ComponentSummary {
    pub fn new(graph: &AdjacencyGraph, components: &[Vec<u32>], trivial_excluded: bool) -> Self {
        let mut sizes: Vec<usize> = components.iter().map(Vec::len).collect();
        sizes.sort_unstable_by(|a, b| b.cmp(a));

        Self {
            vertex_count: graph.vertex_count(),
            edge_count: graph.edge_count(),
            arc_count: graph.arc_count(),
            component_count: components.len(),
            trivial_excluded,
            largest_component: sizes.first().copied().unwrap_or(0),
            sizes,
        }
    }
}

/// Nontrivial components of which no vertex is marked in `covered`
pub fn uncovered_components(graph: &AdjacencyGraph, covered: &[bool]) -> Vec<Vec<u32>> {
    connected_components(graph, true)
        .into_iter()
        .filter(|component| {
            !component
                .iter()
                .any(|&v| covered.get(v as usize).copied().unwrap_or(false))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn undirected(vertex_count: usize, edges: &[(u32, u32)]) -> AdjacencyGraph {
        let mut graph = AdjacencyGraph::with_vertices(vertex_count);
        for &(x, y) in edges {
            graph.add_edge(x, y, false).unwrap();
        }
        graph
    }

    #[test]
    fn component_includes_start_vertex() {
        let graph = undirected(4, &[(0, 1), (1, 2)]);
        let mut traversal = Traversal::new(&graph);

        let component = traversal.breadth_first_component(1);
        assert_eq!(component[0], 1);
        assert_eq!(component.len(), 3);
        assert!(traversal.is_processed(0) && traversal.is_processed(2));
        assert!(!traversal.is_discovered(3));
    }

    #[test]
    fn rediscovering_returns_nothing() {
        let graph = undirected(2, &[(0, 1)]);
        let mut traversal = Traversal::new(&graph);

        traversal.breadth_first_component(0);
        assert!(traversal.breadth_first_component(1).is_empty());
    }

    #[test]
    fn start_outside_graph_finds_nothing() {
        let graph = undirected(3, &[(0, 1)]);
        let mut traversal = Traversal::new(&graph);

        assert!(traversal.breadth_first_component(3).is_empty());
        assert!(traversal.breadth_first_component(u32::MAX).is_empty());
        assert!(!traversal.is_discovered(3));
        assert_eq!(traversal.breadth_first_component(2), vec![2]);
    }

    #[test]
    fn separate_contexts_do_not_interfere() {
        let graph = undirected(3, &[(0, 1)]);
        let mut first = Traversal::new(&graph);
        let mut second = Traversal::new(&graph);

        assert_eq!(first.breadth_first_component(0).len(), 2);
        assert_eq!(second.breadth_first_component(1).len(), 2);
    }

    #[test]
    fn components_partition_vertices() {
        let graph = undirected(7, &[(0, 1), (1, 2), (4, 5), (5, 4)]);
        let components = connected_components(&graph, false);

        assert_eq!(components.len(), 4);
        let mut all: Vec<u32> = components.iter().flatten().copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..7).collect::<Vec<u32>>());
    }

    #[test]
    fn trivial_components_can_be_excluded() {
        let graph = undirected(5, &[(0, 1), (3, 4)]);
        let components = connected_components(&graph, true);

        assert_eq!(components.len(), 2);
        assert!(components.iter().all(|c| c.len() > 1));
    }

    #[test]
    fn directed_reach_follows_arcs_only() {
        let mut graph = AdjacencyGraph::with_vertices(3);
        graph.add_edge(1, 0, true).unwrap();
        graph.add_edge(1, 2, true).unwrap();

        // Seed 0 reaches nothing; seed 1 then picks up 1 and 2.
        let components = connected_components(&graph, false);
        assert_eq!(components, vec![vec![0], vec![1, 2]]);
    }

    #[test]
    fn summary_orders_sizes_descending() {
        let graph = undirected(6, &[(0, 1), (2, 3), (3, 4)]);
        let components = connected_components(&graph, false);
        let summary = ComponentSummary::new(&graph, &components, false);

        assert_eq!(summary.sizes, vec![3, 2, 1]);
        assert_eq!(summary.largest_component, 3);
        assert_eq!(summary.arc_count, 6);
    }

    #[test]
    fn uncovered_components_skip_clustered_ones() {
        let graph = undirected(6, &[(0, 1), (2, 3), (4, 5)]);
        let covered = vec![true, false, false, false, false, true];

        let uncovered = uncovered_components(&graph, &covered);
        assert_eq!(uncovered, vec![vec![2, 3]]);
    }
}
