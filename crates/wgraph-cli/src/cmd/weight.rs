//! Implementation of `wgraph weight <file> <node>...`.
//!
//! Composes the edge weights along the given node sequence in traversal
//! order. A single node weighs the group identity.
//!
//! Output (human mode): the weight as compact JSON, e.g. `3.25` or `[1,2,0]`.
//! Output (JSON mode): `{"path": [...], "weight": w}`.
//!
//! Exit codes: 0 = success, 1 = unknown node or missing edge, 2 = load
//! failure.
use std::io::Write as _;

use serde::Serialize;
use wgraph_core::{Group, WeightedGraph, path_weight};

use crate::OutputFormat;
use crate::cmd::{render_weight, stdout_error, write_json};
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct WeightReport<'a, E> {
    path: &'a [String],
    weight: E,
}

/// Runs the `weight` command.
///
/// # Errors
///
/// - [`CliError::NodeNotFound`] listing every unknown label.
/// - [`CliError::InvalidPath`] if two consecutive nodes are not connected.
/// - [`CliError::InvalidArgument`] if `nodes` is empty.
pub fn run<G>(
    graph: &WeightedGraph<G>,
    nodes: &[String],
    format: OutputFormat,
) -> Result<(), CliError>
where
    G: Group,
    G::Element: Serialize,
{
    let weight = path_weight(graph, nodes)?.ok_or_else(|| CliError::InvalidArgument {
        detail: "at least one node is required".to_owned(),
    })?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Human => writeln!(out, "{}", render_weight(&weight)),
        OutputFormat::Json => write_json(
            &mut out,
            &WeightReport {
                path: nodes,
                weight,
            },
        ),
    }
    .map_err(|e| stdout_error(&e))
}
