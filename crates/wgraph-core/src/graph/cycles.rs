//! Cycle enumeration on top of [`find_paths`].
//!
//! A cycle through `node` is a search from `node` back to itself with that
//! node allowed two visits (leave, return) and every other node one. The
//! closed paths found are turned into [`Cycle`] values and deduplicated up to
//! rotation.
use std::collections::{BTreeSet, HashSet};

use tracing::debug;

use crate::graph::{GraphError, SearchConfig, SearchStatus, WeightedGraph, find_paths};
use crate::group::Group;
use crate::path::Cycle;

/// Cycles found by one enumeration, and how the underlying search ended.
///
/// A `status` of [`SearchStatus::IterationLimitReached`] means `cycles` may
/// be incomplete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleOutcome {
    /// The cycles, in discovery order for a single node and in canonical
    /// order for the whole graph.
    pub cycles: Vec<Cycle>,
    /// How the search ended. For the whole graph this is the most severe
    /// status over all per-node searches.
    pub status: SearchStatus,
}

impl CycleOutcome {
    /// Returns `true` if an iteration budget cut the enumeration short.
    pub fn is_truncated(&self) -> bool {
        self.status == SearchStatus::IterationLimitReached
    }

    /// Consumes the outcome, keeping only the cycles.
    pub fn into_cycles(self) -> Vec<Cycle> {
        self.cycles
    }
}

/// Cycles through `node` with the default caps: `node` twice, others once.
///
/// `max_cycles` bounds the number of closed paths collected; `None` collects
/// all of them. Cycles are returned in discovery order, i.e. shortest first.
///
/// # Errors
///
/// Returns [`GraphError::NodeNotFound`] if `node` is not in the graph.
pub fn cycles_through<G: Group>(
    graph: &WeightedGraph<G>,
    node: &str,
    max_cycles: Option<usize>,
) -> Result<CycleOutcome, GraphError> {
    let mut config = SearchConfig::default().with_node_max_visits(node, 2);
    config.max_paths = max_cycles;
    cycles_through_with(graph, node, &config)
}

/// Cycles through `node` under an explicit search configuration.
///
/// Raising `max_visits` lets other nodes repeat, which yields multi-visit
/// cycles such as `A → B → C → B → A`. If `config` sets no cap for `node`
/// itself, it is given a cap of 2; a cap below 2 finds nothing.
///
/// # Errors
///
/// Returns [`GraphError::NodeNotFound`] if `node` is not in the graph.
pub fn cycles_through_with<G: Group>(
    graph: &WeightedGraph<G>,
    node: &str,
    config: &SearchConfig,
) -> Result<CycleOutcome, GraphError> {
    let mut config = config.clone();
    config
        .node_max_visits
        .entry(node.to_owned())
        .or_insert(2);

    let outcome = find_paths(graph, node, node, &config)?;
    let mut seen: HashSet<Cycle> = HashSet::new();
    let mut found: Vec<Cycle> = Vec::new();
    for path in outcome.paths.iter().filter(|p| p.is_cycle()) {
        let cycle = Cycle::from_path(path)?;
        if seen.insert(cycle.clone()) {
            found.push(cycle);
        }
    }
    debug!(node, cycles = found.len(), status = ?outcome.status, "collected cycles");
    Ok(CycleOutcome {
        cycles: found,
        status: outcome.status,
    })
}

/// Every cycle of the graph: the union of [`cycles_through`] over all nodes,
/// in canonical order.
///
/// # Errors
///
/// Propagates adjacency lookup failures; none occur on a well-formed graph.
pub fn cycles<G: Group>(graph: &WeightedGraph<G>) -> Result<CycleOutcome, GraphError> {
    cycles_with(graph, &SearchConfig::default())
}

/// Every cycle of the graph, each per-node search running under `config`.
/// See [`cycles_through_with`] for how the search node's cap is set.
///
/// # Errors
///
/// Propagates adjacency lookup failures; none occur on a well-formed graph.
pub fn cycles_with<G: Group>(
    graph: &WeightedGraph<G>,
    config: &SearchConfig,
) -> Result<CycleOutcome, GraphError> {
    let mut all = BTreeSet::new();
    let mut status = SearchStatus::Exhausted;
    for node in graph.nodes() {
        let outcome = cycles_through_with(graph, node, config)?;
        status = most_severe(status, outcome.status);
        all.extend(outcome.cycles);
    }
    Ok(CycleOutcome {
        cycles: all.into_iter().collect(),
        status,
    })
}

/// Combines per-node statuses: a hit iteration budget outranks a hit path
/// limit, which outranks exhaustion.
fn most_severe(a: SearchStatus, b: SearchStatus) -> SearchStatus {
    let rank = |s: SearchStatus| match s {
        SearchStatus::Exhausted => 0,
        SearchStatus::PathLimitReached => 1,
        SearchStatus::IterationLimitReached => 2,
    };
    if rank(b) > rank(a) { b } else { a }
}
