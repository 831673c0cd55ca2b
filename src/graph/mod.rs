//! Graph representation and algorithms module

pub mod adjacency;
pub mod builder;
pub mod algorithms;

pub use adjacency::AdjacencyGraph;
pub use algorithms::{connected_components, Traversal};
pub use builder::GraphBuilder;
