//! Results persistence module

use crate::cluster::builder::membership_records;
use crate::cluster::metrics::QualityReport;
use crate::cluster::Membership;
use crate::data::LoggedEdge;
use crate::graph::algorithms::ComponentSummary;
use anyhow::{Context, Result};
use serde_json::{json, to_string_pretty};
use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

const RULE: &str = "--------------------------------------------------------------";

fn create(path: &Path) -> Result<BufWriter<File>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    Ok(BufWriter::new(file))
}

/// Write the per-cluster edge log, one `v1\tv2\tcluster` line per edge
pub fn write_edge_log(path: &Path, edges: &[LoggedEdge]) -> Result<()> {
    log::info!("Saving {} cluster edges to {}", edges.len(), path.display());

    let mut writer = create(path)?;
    for edge in edges {
        writeln!(writer, "{}", edge.to_line())?;
    }
    writer.flush()?;

    Ok(())
}

/// Write the membership listing, one `Cluster ID:<id>\t<v>, ...` line per cluster
///
/// Real clusters come first, then the synthetic singletons in vertex order.
pub fn write_membership_listing(path: &Path, membership: &Membership) -> Result<()> {
    log::info!("Saving {} clusters to {}", membership.len(), path.display());

    let (singletons, real): (Vec<_>, Vec<_>) = membership_records(membership)
        .into_iter()
        .partition(|record| record.id.is_singleton());

    let mut writer = create(path)?;
    for record in real.iter().chain(singletons.iter().rev()) {
        writeln!(writer, "{}", record.to_line())?;
    }
    writer.flush()?;

    Ok(())
}

/// Render the fixed-width report table followed by the bucket averages
pub fn format_report(report: &QualityReport) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{:<20}{:<10}{:<20}{:<15}",
        "Cluster ID", "Size", "Number of Edges", "Completion %"
    );
    let _ = writeln!(out, "{}", RULE);

    for row in &report.clusters {
        let completion = format!("{:.2}%", row.completion);
        let _ = writeln!(
            out,
            "{:<20}{:<10}{:<20}{:<15}",
            row.id.to_string(),
            row.size,
            row.edges,
            completion
        );
    }

    let _ = writeln!(out);
    for bucket in &report.summary.buckets {
        let average = match bucket.average_completion {
            Some(average) => format!("{:.2}%", average),
            None => "not applicable".to_string(),
        };
        let _ = writeln!(
            out,
            "Average cluster density for clusters of size greater than {}: {}",
            bucket.min_size_exclusive, average
        );
    }

    if !report.warnings.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Warnings:");
        for warning in &report.warnings {
            let _ = writeln!(out, "  {}", warning);
        }
    }

    out
}

/// Write the text report
pub fn write_report(path: &Path, report: &QualityReport) -> Result<()> {
    log::info!("Saving report for {} clusters to {}", report.clusters.len(), path.display());

    let mut writer = create(path)?;
    writer.write_all(format_report(report).as_bytes())?;
    writer.flush()?;

    Ok(())
}

/// Save the machine-readable summary of a quality report
pub fn save_summary(path: &Path, report: &QualityReport) -> Result<()> {
    log::info!("Saving summary information to {}", path.display());

    let summary = json!({
        "cluster_stats": {
            "cluster_count": report.summary.cluster_count,
            "trivial_cluster_count": report.summary.trivial_count,
            "largest_cluster_size": report.clusters.first().map_or(0, |c| c.size),
            "size_buckets": report.summary.buckets,
        },
        "clusters": report.clusters,
        "warnings": report.warnings,
    });

    let mut writer = create(path)?;
    writer.write_all(to_string_pretty(&summary)?.as_bytes())?;
    writer.flush()?;

    Ok(())
}

/// Save a component enumeration
pub fn save_components(path: &Path, summary: &ComponentSummary) -> Result<()> {
    log::info!("Saving component statistics to {}", path.display());

    let mut writer = create(path)?;
    writer.write_all(to_string_pretty(summary)?.as_bytes())?;
    writer.flush()?;

    Ok(())
}
