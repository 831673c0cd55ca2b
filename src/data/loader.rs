//! Whole-file loaders for cluster, edge-log and graph files

use crate::data::records::{
    parse_edge_record, parse_graph_edge, parse_logged_edge, parse_membership_record, EdgeRecord,
    LoggedEdge, MembershipRecord,
};
use crate::error::{QualityError, RecordError, Result};
use crate::graph::{AdjacencyGraph, GraphBuilder};
use std::fs;
use std::path::Path;

/// Read a file in full and parse every non-blank line, tagging each record
/// with its 1-based line number
fn parse_lines<T>(
    path: &Path,
    parse: impl Fn(&str) -> std::result::Result<T, RecordError>,
) -> Result<Vec<(usize, T)>> {
    let contents = fs::read_to_string(path).map_err(|source| QualityError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            parse(line)
                .map(|record| (idx + 1, record))
                .map_err(|source| QualityError::record(path, idx + 1, source))
        })
        .collect()
}

fn check_range(
    path: &Path,
    line: usize,
    vertex: u32,
    vertex_count: Option<usize>,
) -> Result<()> {
    match vertex_count {
        Some(n) if vertex as usize >= n => Err(QualityError::record(
            path,
            line,
            RecordError::VertexOutOfRange {
                vertex,
                vertex_count: n,
            },
        )),
        _ => Ok(()),
    }
}

/// Load edge-tagged cluster records
pub fn load_edge_records(path: &Path, vertex_count: Option<usize>) -> Result<Vec<EdgeRecord>> {
    log::info!("Reading edge-tagged clusters: {}", path.display());

    let records = parse_lines(path, parse_edge_record)?;
    for (line, record) in &records {
        check_range(path, *line, record.v1, vertex_count)?;
        check_range(path, *line, record.v2, vertex_count)?;
    }

    Ok(records.into_iter().map(|(_, record)| record).collect())
}

/// Load size-tagged membership records
pub fn load_membership_records(
    path: &Path,
    vertex_count: Option<usize>,
) -> Result<Vec<MembershipRecord>> {
    log::info!("Reading cluster listing: {}", path.display());

    let records = parse_lines(path, parse_membership_record)?;
    for (line, record) in &records {
        for &vertex in &record.members {
            check_range(path, *line, vertex, vertex_count)?;
        }
    }

    Ok(records.into_iter().map(|(_, record)| record).collect())
}

/// Load a per-cluster edge log
pub fn load_edge_log(path: &Path, vertex_count: Option<usize>) -> Result<Vec<LoggedEdge>> {
    log::info!("Reading cluster edge log: {}", path.display());

    let edges = parse_lines(path, parse_logged_edge)?;
    for (line, edge) in &edges {
        check_range(path, *line, edge.v1, vertex_count)?;
        check_range(path, *line, edge.v2, vertex_count)?;
    }

    Ok(edges.into_iter().map(|(_, edge)| edge).collect())
}

/// Load a tab-delimited edge file into a graph
///
/// Without a declared vertex count the graph spans `0..=max id`.
pub fn load_graph(
    path: &Path,
    directed: bool,
    vertex_count: Option<usize>,
) -> Result<AdjacencyGraph> {
    log::info!("Reading graph edges: {}", path.display());

    let edges = parse_lines(path, parse_graph_edge)?;
    let mut builder = GraphBuilder::with_capacity(edges.len(), directed);
    if let Some(n) = vertex_count {
        builder = builder.declared_vertices(n);
    }

    for (line, (x, y)) in edges {
        check_range(path, line, x, vertex_count)?;
        check_range(path, line, y, vertex_count)?;
        builder.add_edge(x, y);
    }

    let graph = builder.build()?;
    log::info!(
        "Loaded graph with {} vertices and {} edges",
        graph.vertex_count(),
        graph.edge_count()
    );

    Ok(graph)
}
