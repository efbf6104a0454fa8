//! Implementation of `wgraph inspect <file>`.
//!
//! Prints summary statistics of the loaded graph:
//! - group name
//! - node and edge counts
//! - sources (only outgoing edges), sinks (only incoming edges) and isolated
//!   nodes
//!
//! In `--format json` mode a single JSON object is emitted to stdout.
//! In human mode, aligned key/value lines are printed.
//!
//! Exit codes: 0 = success, 2 = load failure.
use serde::Serialize;
use wgraph_core::{Group, WeightedGraph};

use crate::OutputFormat;
use crate::cmd::{stdout_error, write_json};
use crate::error::CliError;

/// Statistics gathered from a loaded graph.
#[derive(Debug, Serialize)]
pub struct InspectStats {
    /// Name of the weight group.
    pub group: String,
    /// Total number of nodes.
    pub node_count: usize,
    /// Total number of edges.
    pub edge_count: usize,
    /// Nodes with outgoing but no incoming edges.
    pub sources: Vec<String>,
    /// Nodes with incoming but no outgoing edges.
    pub sinks: Vec<String>,
    /// Nodes with no edges at all.
    pub isolated: Vec<String>,
}

impl InspectStats {
    /// Computes statistics from a loaded graph.
    ///
    /// # Errors
    ///
    /// Propagates adjacency lookup failures; none occur on a loaded graph.
    pub fn from_graph<G: Group>(graph: &WeightedGraph<G>) -> Result<Self, CliError> {
        let mut sources = Vec::new();
        let mut sinks = Vec::new();
        let mut isolated = Vec::new();

        for node in graph.nodes() {
            let has_out = !graph.children(node)?.is_empty();
            let has_in = !graph.parents(node)?.is_empty();
            match (has_in, has_out) {
                (false, true) => sources.push(node.to_owned()),
                (true, false) => sinks.push(node.to_owned()),
                (false, false) => isolated.push(node.to_owned()),
                (true, true) => {}
            }
        }

        Ok(Self {
            group: graph.group().name().to_owned(),
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            sources,
            sinks,
            isolated,
        })
    }
}

/// Runs the `inspect` command.
///
/// # Errors
///
/// Returns [`CliError::IoError`] if stdout can not be written.
pub fn run<G: Group>(graph: &WeightedGraph<G>, format: OutputFormat) -> Result<(), CliError> {
    let stats = InspectStats::from_graph(graph)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Human => print_human(&mut out, &stats),
        OutputFormat::Json => write_json(&mut out, &stats),
    }
    .map_err(|e| stdout_error(&e))
}

/// Writes inspect statistics in human-readable aligned format.
fn print_human<W: std::io::Write>(w: &mut W, stats: &InspectStats) -> std::io::Result<()> {
    writeln!(w, "group:     {}", stats.group)?;
    writeln!(w, "nodes:     {}", stats.node_count)?;
    writeln!(w, "edges:     {}", stats.edge_count)?;
    writeln!(w, "sources:   {}", list_or_none(&stats.sources))?;
    writeln!(w, "sinks:     {}", list_or_none(&stats.sinks))?;
    writeln!(w, "isolated:  {}", list_or_none(&stats.isolated))?;
    Ok(())
}

fn list_or_none(nodes: &[String]) -> String {
    if nodes.is_empty() {
        "-".to_owned()
    } else {
        nodes.join(", ")
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use wgraph_core::RealMultiplicative;

    use super::*;

    fn sample() -> WeightedGraph<RealMultiplicative> {
        WeightedGraph::from_adjacency(
            [
                ("A", vec![("B", 2.0)]),
                ("B", vec![("C", 4.0)]),
                ("C", vec![]),
                ("D", vec![]),
            ],
            RealMultiplicative,
        )
        .expect("valid graph")
    }

    #[test]
    fn classifies_sources_sinks_and_isolated_nodes() {
        let stats = InspectStats::from_graph(&sample()).expect("loaded graph");
        assert_eq!(stats.node_count, 4);
        assert_eq!(stats.edge_count, 2);
        assert_eq!(stats.sources, ["A"]);
        assert_eq!(stats.sinks, ["C"]);
        assert_eq!(stats.isolated, ["D"]);
    }

    #[test]
    fn human_output_lists_counts() {
        let stats = InspectStats::from_graph(&sample()).expect("loaded graph");
        let mut buf = Vec::new();
        print_human(&mut buf, &stats).expect("write");
        let text = String::from_utf8(buf).expect("utf8");
        assert!(text.contains("nodes:     4"), "{text}");
        assert!(text.contains("isolated:  D"), "{text}");
    }
}
