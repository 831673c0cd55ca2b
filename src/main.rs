use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cluster_quality::cluster::builder::{
    count_cluster_edges, from_edge_records, from_membership_records, synthesize_singletons,
};
use cluster_quality::data::loader;
use cluster_quality::graph::algorithms::{
    connected_components, uncovered_components, ComponentSummary,
};
use cluster_quality::{assess, storage, AdjacencyGraph, Config, DuplicatePolicy, Membership};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[clap(
    name = "cluster-quality",
    about = "Evaluate how densely connected the clusters of a graph clustering are"
)]
struct Cli {
    /// Output directory for results
    #[clap(long, global = true, default_value = "quality_results")]
    output_dir: PathBuf,

    /// How to resolve a cluster id listed more than once
    #[clap(long, global = true, value_enum, default_value = "last-wins")]
    duplicate_policy: DuplicatePolicy,

    /// Number of worker threads (0 = use all available cores)
    #[clap(long, global = true, default_value = "0")]
    threads: usize,

    /// Verbose logging
    #[clap(long, short, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate edge-tagged clusters (cluster, v1, v2 per line)
    Bc {
        /// Edge-tagged cluster file
        #[clap(long)]
        input: PathBuf,

        /// Number of vertices in the graph (inferred when omitted)
        #[clap(long)]
        vertices: Option<usize>,

        /// Graph edge file; fixes the vertex count and checks coverage
        #[clap(long)]
        graph: Option<PathBuf>,
    },

    /// Evaluate a cluster listing against a per-cluster edge log
    Mcl {
        /// Cluster listing (`Cluster ID:<id>\t<v>, ...`)
        #[clap(long)]
        clusters: PathBuf,

        /// Edge log (`v1\tv2\tcluster`)
        #[clap(long)]
        edges: PathBuf,

        /// Number of vertices; uncovered vertices become singletons
        #[clap(long)]
        vertices: Option<usize>,

        /// Graph edge file; fixes the vertex count and checks coverage
        #[clap(long)]
        graph: Option<PathBuf>,
    },

    /// Enumerate the connected components of a graph edge file
    Components {
        /// Graph edge file (`v1\tv2`)
        #[clap(long)]
        graph: PathBuf,

        /// Treat edges as directed arcs
        #[clap(long)]
        directed: bool,

        /// Number of vertices (inferred when omitted)
        #[clap(long)]
        vertices: Option<usize>,

        /// Leave out single-vertex components
        #[clap(long)]
        nontrivial: bool,
    },
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Cli::parse();

    // Configure logging
    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    log::info!("Output: {}", args.output_dir.display());

    match args.command {
        Command::Bc {
            input,
            vertices,
            graph,
        } => {
            let graph = load_optional_graph(graph.as_deref(), vertices)?;
            let vertices = graph.as_ref().map(AdjacencyGraph::vertex_count).or(vertices);
            let config = Config::new(vertices, false, args.duplicate_policy, &args.output_dir)
                .with_report_prefix("bc")
                .with_threads(args.threads);
            run_bc(&config, &input, graph.as_ref())
        }
        Command::Mcl {
            clusters,
            edges,
            vertices,
            graph,
        } => {
            let graph = load_optional_graph(graph.as_deref(), vertices)?;
            let vertices = graph.as_ref().map(AdjacencyGraph::vertex_count).or(vertices);
            let config = Config::new(vertices, false, args.duplicate_policy, &args.output_dir)
                .with_report_prefix("mcl")
                .with_threads(args.threads);
            run_mcl(&config, &clusters, &edges, graph.as_ref())
        }
        Command::Components {
            graph,
            directed,
            vertices,
            nontrivial,
        } => {
            let config = Config::new(vertices, directed, args.duplicate_policy, &args.output_dir)
                .with_threads(args.threads);
            run_components(&config, &graph, nontrivial)
        }
    }?;

    log::info!("Analysis complete. Results saved to {}", args.output_dir.display());

    Ok(())
}

fn init_thread_pool(config: &Config) -> Result<()> {
    let num_threads = config.worker_threads();

    log::info!("Using {} worker threads", num_threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()?;

    Ok(())
}

fn load_optional_graph(
    path: Option<&Path>,
    vertices: Option<usize>,
) -> Result<Option<AdjacencyGraph>> {
    path.map(|path| loader::load_graph(path, false, vertices))
        .transpose()
        .context("loading graph")
}

/// Log nontrivial graph components that no cluster touches
fn report_coverage(graph: &AdjacencyGraph, membership: &Membership) -> Result<()> {
    let covered = membership.coverage(graph.vertex_count())?;
    let uncovered = uncovered_components(graph, &covered);
    let vertices: usize = uncovered.iter().map(Vec::len).sum();

    log::info!(
        "{} nontrivial graph components ({} vertices) contain no clustered vertex",
        uncovered.len(),
        vertices
    );
    Ok(())
}

fn run_bc(config: &Config, input: &Path, graph: Option<&AdjacencyGraph>) -> Result<()> {
    init_thread_pool(config)?;
    let records = loader::load_edge_records(input, config.vertex_count)?;
    let built = from_edge_records(&records);
    let mut membership = built.membership;

    let vertex_count = config
        .vertex_count
        .unwrap_or_else(|| membership.max_vertex().map_or(0, |v| v as usize + 1));

    if let Some(graph) = graph {
        report_coverage(graph, &membership)?;
    }
    synthesize_singletons(&mut membership, vertex_count)?;

    storage::write_edge_log(&config.edge_log_path(), &built.edge_log)?;
    storage::write_membership_listing(&config.membership_path(), &membership)?;

    let edge_counts = count_cluster_edges(&built.edge_log);
    let report = assess(&membership, &edge_counts, Default::default());

    storage::write_report(&config.report_path(), &report)?;
    storage::save_summary(&config.summary_path(), &report)?;

    Ok(())
}

fn run_mcl(
    config: &Config,
    clusters: &Path,
    edges: &Path,
    graph: Option<&AdjacencyGraph>,
) -> Result<()> {
    init_thread_pool(config)?;
    let edge_log = loader::load_edge_log(edges, config.vertex_count)?;
    let records = loader::load_membership_records(clusters, config.vertex_count)?;

    let (mut membership, diagnostics) =
        from_membership_records(&records, config.duplicate_policy);

    if let Some(graph) = graph {
        report_coverage(graph, &membership)?;
    }
    if let Some(vertex_count) = config.vertex_count {
        synthesize_singletons(&mut membership, vertex_count)?;
    }

    let edge_counts = count_cluster_edges(&edge_log);
    let report = assess(&membership, &edge_counts, diagnostics);

    storage::write_report(&config.report_path(), &report)?;
    storage::save_summary(&config.summary_path(), &report)?;

    Ok(())
}

fn run_components(config: &Config, path: &Path, nontrivial: bool) -> Result<()> {
    init_thread_pool(config)?;
    let graph = loader::load_graph(path, config.directed, config.vertex_count)?;
    let components = connected_components(&graph, nontrivial);
    let summary = ComponentSummary::new(&graph, &components, nontrivial);

    log::info!(
        "Found {} components; largest has {} vertices",
        summary.component_count,
        summary.largest_component
    );

    storage::save_components(&config.output_dir.join("components.json"), &summary)?;

    Ok(())
}
