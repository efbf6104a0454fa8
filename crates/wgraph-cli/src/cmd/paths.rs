//! Implementation of `wgraph paths <file> <from> <to>`.
//!
//! Runs the bounded multi-visit search and prints the paths in discovery
//! order, which is breadth-first and therefore shortest first.
//!
//! Flags:
//! - `--max-visits <n>` (default 1): visit cap for every node.
//! - `--visits <node>=<n>` (repeatable): visit cap for one node.
//! - `--max-iterations <n>` (default 1000): search budget. When it runs out
//!   the paths found so far are printed and a warning is logged.
//! - `--max-paths <n>`: stop after `n` paths.
//! - `--weights`: also print the composed weight of each path.
//!
//! Output (human mode): one path per line, node labels separated by ` -> `,
//! followed by `: <weight>` with `--weights`.
//! Output (JSON mode): `{"paths": [{"nodes": [...], "weight": w}], "count": N,
//! "status": "...", "iterations": K}`.
//!
//! Exit codes: 0 = at least one path found, 1 = no path / node not found,
//! 2 = load failure.
use serde::Serialize;
use tracing::warn;
use wgraph_core::{
    Group, Path, SearchConfig, SearchStatus, WeightedGraph, find_paths, path_weight,
};

use crate::OutputFormat;
use crate::cmd::{render_weight, stdout_error, write_json};
use crate::error::CliError;

/// One reported path.
#[derive(Debug, Serialize)]
struct PathEntry<E> {
    nodes: Path,
    #[serde(skip_serializing_if = "Option::is_none")]
    weight: Option<E>,
}

/// The JSON document printed in `--format json` mode.
#[derive(Debug, Serialize)]
struct PathsReport<E> {
    paths: Vec<PathEntry<E>>,
    count: usize,
    status: SearchStatus,
    iterations: usize,
}

/// Builds the search configuration from the command-line flags.
///
/// Caps for nodes that are not in the graph are kept but logged, since they
/// are most likely typos.
pub fn search_config<G: Group>(
    graph: &WeightedGraph<G>,
    max_visits: usize,
    visits: &[(String, usize)],
    max_iterations: usize,
    max_paths: Option<usize>,
) -> SearchConfig {
    let mut config = SearchConfig::default()
        .with_max_visits(max_visits)
        .with_max_iterations(max_iterations);
    for (node, cap) in visits {
        if !graph.contains_node(node) {
            warn!(node = node.as_str(), "visit cap given for a node that is not in the graph");
        }
        config = config.with_node_max_visits(node.clone(), *cap);
    }
    config.max_paths = max_paths;
    config
}

/// Runs the `paths` command.
///
/// # Errors
///
/// - [`CliError::NodeNotFound`] if `from` or `to` is not in the graph.
/// - [`CliError::NoResults`] if the search found no path.
pub fn run<G>(
    graph: &WeightedGraph<G>,
    from: &str,
    to: &str,
    config: &SearchConfig,
    weights: bool,
    format: OutputFormat,
) -> Result<(), CliError>
where
    G: Group,
    G::Element: Serialize,
{
    let outcome = find_paths(graph, from, to, config)?;
    if outcome.paths.is_empty() {
        return Err(CliError::NoResults {
            detail: format!("no path from {from:?} to {to:?}"),
        });
    }

    let entries = outcome
        .paths
        .into_iter()
        .map(|path| -> Result<PathEntry<G::Element>, CliError> {
            let weight = if weights {
                path_weight(graph, path.nodes())?
            } else {
                None
            };
            Ok(PathEntry {
                nodes: path,
                weight,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Human => print_human(&mut out, &entries),
        OutputFormat::Json => write_json(
            &mut out,
            &PathsReport {
                count: entries.len(),
                paths: entries,
                status: outcome.status,
                iterations: outcome.iterations,
            },
        ),
    }
    .map_err(|e| stdout_error(&e))
}

/// Writes one path per line, node labels separated by ` -> `.
fn print_human<W, E>(w: &mut W, entries: &[PathEntry<E>]) -> std::io::Result<()>
where
    W: std::io::Write,
    E: Serialize + std::fmt::Debug,
{
    for entry in entries {
        match &entry.weight {
            Some(weight) => writeln!(w, "{}: {}", entry.nodes, render_weight(weight))?,
            None => writeln!(w, "{}", entry.nodes)?,
        }
    }
    Ok(())
}
