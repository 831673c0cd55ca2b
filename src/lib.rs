//! Core library functions for the cluster quality evaluator

pub mod cluster;
pub mod config;
pub mod data;
pub mod diagnostics;
pub mod error;
pub mod graph;
pub mod storage;

pub use cluster::metrics::{assess, ClusterQuality, DensitySummary, QualityReport};
pub use cluster::{ClusterId, EdgeTally, Membership};
pub use config::{Config, DuplicatePolicy};
pub use diagnostics::{Diagnostics, Warning};
pub use error::{QualityError, RecordError, Result};
pub use graph::AdjacencyGraph;
