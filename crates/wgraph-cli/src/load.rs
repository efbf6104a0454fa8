//! Adjacency JSON → [`WeightedGraph`].
//!
//! The input is a JSON object of objects: `{"A": {"B": w, …}, "B": {}, …}`.
//! Every node must appear as an outer key, even if it has no outgoing edges.
//! Weights are deserialized as the selected group's element type and then
//! checked with [`Group::contains`].
use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use tracing::debug;
use wgraph_core::{Group, WeightedGraph};

use crate::error::CliError;

/// Parsed but not yet validated adjacency mapping.
type Adjacency<E> = BTreeMap<String, BTreeMap<String, E>>;

/// Parses `input` into a graph over `group`.
///
/// `source` labels the input in error messages.
///
/// # Errors
///
/// - [`CliError::ParseError`]: not a JSON object of objects, or a weight of
///   the wrong type.
/// - [`CliError::InvalidWeight`]: a weight outside the group.
/// - [`CliError::GraphBuildError`]: an edge to a node that is not an outer
///   key, or a self-loop.
pub fn parse_graph<G>(input: &str, source: &str, group: G) -> Result<WeightedGraph<G>, CliError>
where
    G: Group,
    G::Element: DeserializeOwned,
{
    let adjacency: Adjacency<G::Element> =
        serde_json::from_str(input).map_err(|e| CliError::ParseError {
            source: source.to_owned(),
            detail: e.to_string(),
        })?;

    check_weights(&adjacency, &group)?;

    let graph = WeightedGraph::from_adjacency(adjacency, group).map_err(|e| {
        CliError::GraphBuildError {
            detail: e.to_string(),
        }
    })?;
    debug!(
        source,
        group = graph.group().name(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "graph loaded"
    );
    Ok(graph)
}

fn check_weights<G: Group>(adjacency: &Adjacency<G::Element>, group: &G) -> Result<(), CliError> {
    for (start, targets) in adjacency {
        for (end, weight) in targets {
            if !group.contains(weight) {
                return Err(CliError::InvalidWeight {
                    start: start.clone(),
                    end: end.clone(),
                    detail: format!("{weight:?} is not an element of {}", group.name()),
                });
            }
        }
    }
    Ok(())
}
