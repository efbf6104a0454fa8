//! Implementation of `wgraph cycles <file> [node]`.
//!
//! With a node, lists the cycles through it in discovery order (shortest
//! first). Without one, lists every cycle of the graph in canonical order.
//! Each cycle is printed closed and in canonical rotation, starting at its
//! smallest label: `A -> B -> C -> A`.
//!
//! Flags:
//! - `--max-cycles <n>`: stop after `n` cycles.
//! - `--max-iterations <n>` (default 1000): budget of each per-node search.
//!   When one runs out the cycles found so far are printed, a warning is
//!   logged and the JSON `status` is `iteration_limit_reached`.
//! - `--weights`: also print the composed weight around each cycle.
//!
//! An acyclic graph is not an error: nothing is printed in human mode and an
//! empty list in JSON mode.
//!
//! Output (JSON mode): `{"cycles": [{"nodes": [...], "weight": w}], "count": N,
//! "status": "..."}`.
//!
//! Exit codes: 0 = success, 1 = node not found, 2 = load failure.
use serde::Serialize;
use tracing::warn;
use wgraph_core::{
    Cycle, Group, SearchConfig, SearchStatus, WeightedGraph, cycles_through_with, cycles_with,
    path_weight,
};

use crate::OutputFormat;
use crate::cmd::{render_weight, stdout_error, write_json};
use crate::error::CliError;

/// One reported cycle.
#[derive(Debug, Serialize)]
struct CycleEntry<E> {
    #[serde(flatten)]
    cycle: Cycle,
    #[serde(skip_serializing_if = "Option::is_none")]
    weight: Option<E>,
}

/// The JSON document printed in `--format json` mode.
#[derive(Debug, Serialize)]
struct CyclesReport<E> {
    cycles: Vec<CycleEntry<E>>,
    count: usize,
    status: SearchStatus,
}

/// Runs the `cycles` command.
///
/// # Errors
///
/// Returns [`CliError::NodeNotFound`] if `node` is not in the graph.
pub fn run<G>(
    graph: &WeightedGraph<G>,
    node: Option<&str>,
    max_cycles: Option<usize>,
    max_iterations: usize,
    weights: bool,
    format: OutputFormat,
) -> Result<(), CliError>
where
    G: Group,
    G::Element: Serialize,
{
    let config = SearchConfig::default().with_max_iterations(max_iterations);
    let outcome = match node {
        Some(node) => {
            let mut config = config;
            config.max_paths = max_cycles;
            cycles_through_with(graph, node, &config)?
        }
        None => cycles_with(graph, &config)?,
    };
    let status = outcome.status;
    if outcome.is_truncated() {
        warn!(
            max_iterations,
            found = outcome.cycles.len(),
            "cycle search hit its iteration limit; the list is incomplete"
        );
    }

    let entries = outcome
        .cycles
        .into_iter()
        .take(max_cycles.unwrap_or(usize::MAX))
        .map(|cycle| -> Result<CycleEntry<G::Element>, CliError> {
            let weight = if weights {
                path_weight(graph, cycle.as_path().nodes())?
            } else {
                None
            };
            Ok(CycleEntry { cycle, weight })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Human => print_human(&mut out, &entries),
        OutputFormat::Json => write_json(
            &mut out,
            &CyclesReport {
                count: entries.len(),
                cycles: entries,
                status,
            },
        ),
    }
    .map_err(|e| stdout_error(&e))
}

/// Writes one closed cycle per line.
fn print_human<W, E>(w: &mut W, entries: &[CycleEntry<E>]) -> std::io::Result<()>
where
    W: std::io::Write,
    E: Serialize + std::fmt::Debug,
{
    for entry in entries {
        match &entry.weight {
            Some(weight) => writeln!(w, "{}: {}", entry.cycle, render_weight(weight))?,
            None => writeln!(w, "{}", entry.cycle)?,
        }
    }
    Ok(())
}
