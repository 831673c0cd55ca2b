//! Configuration management for the cluster quality evaluator

use clap::ValueEnum;
use std::path::{Path, PathBuf};

/// What to do when a cluster listing repeats an id
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum DuplicatePolicy {
    /// The later record replaces the earlier one
    #[default]
    LastWins,
    /// The earlier record is kept
    FirstWins,
    /// Member sets are unioned
    Merge,
}

/// Run configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Declared vertex count; inferred from the inputs when absent
    pub vertex_count: Option<usize>,

    /// Whether graph edges are single arcs
    pub directed: bool,

    /// Resolution for repeated cluster ids in listings
    pub duplicate_policy: DuplicatePolicy,

    /// Directory all artifacts are written to
    pub output_dir: PathBuf,

    /// Worker threads for parallel steps (0 = use all available cores)
    pub threads: usize,

    /// Per-cluster edge log (`v1\tv2\tcluster`)
    pub edge_log_file: String,

    /// Membership listing (`Cluster ID:<id>\t<v>, ...`)
    pub membership_file: String,

    /// Fixed-width text report
    pub report_file: String,

    /// Machine-readable summary
    pub summary_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vertex_count: None,
            directed: false,
            duplicate_policy: DuplicatePolicy::LastWins,
            output_dir: PathBuf::from("quality_results"),
            threads: 0,
            edge_log_file: "cluster_edges.tsv".to_string(),
            membership_file: "clusters.tsv".to_string(),
            report_file: "stats.txt".to_string(),
            summary_file: "summary.json".to_string(),
        }
    }
}

impl Config {
    /// Create a new configuration with custom values, keeping default file names
    pub fn new(
        vertex_count: Option<usize>,
        directed: bool,
        duplicate_policy: DuplicatePolicy,
        output_dir: impl AsRef<Path>,
    ) -> Self {
        Self {
            vertex_count,
            directed,
            duplicate_policy,
            output_dir: output_dir.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    /// Prefix the report and summary names, e.g. `bc_stats.txt`
    pub fn with_report_prefix(mut self, prefix: &str) -> Self {
        self.report_file = format!("{}_{}", prefix, self.report_file);
        self.summary_file = format!("{}_{}", prefix, self.summary_file);
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Resolved worker count, falling back to the number of cores
    pub fn worker_threads(&self) -> usize {
        if self.threads > 0 {
            self.threads
        } else {
            num_cpus::get()
        }
    }

    pub fn edge_log_path(&self) -> PathBuf {
        self.output_dir.join(&self.edge_log_file)
    }

    pub fn membership_path(&self) -> PathBuf {
        self.output_dir.join(&self.membership_file)
    }

    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join(&self.report_file)
    }

    pub fn summary_path(&self) -> PathBuf {
        self.output_dir.join(&self.summary_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_prefix_keeps_artifact_names() {
        let config = Config::new(Some(10), false, DuplicatePolicy::Merge, "out")
            .with_report_prefix("bc");

        assert_eq!(config.report_path(), Path::new("out/bc_stats.txt"));
        assert_eq!(config.summary_path(), Path::new("out/bc_summary.json"));
        assert_eq!(config.edge_log_path(), Path::new("out/cluster_edges.tsv"));
        assert_eq!(config.vertex_count, Some(10));
    }

    #[test]
    fn thread_count_falls_back_to_cores() {
        let config = Config::default();
        assert_eq!(config.threads, 0);
        assert_eq!(config.worker_threads(), num_cpus::get());

        let config = config.with_threads(3);
        assert_eq!(config.worker_threads(), 3);
    }
}
