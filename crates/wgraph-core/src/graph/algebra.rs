//! Weight folding along paths and the commutativity (path-independence) check.
//!
//! The check enumerates cycles with bounded searches. When a search runs out
//! of iterations the cycles it did not reach are never weighed, so a clean
//! result is only [`Commutativity::Holds`] if no search was truncated.
use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, warn};

use crate::graph::{
    GraphError, SearchConfig, SearchStatus, WeightedGraph, cycles_through_with, cycles_with,
};
use crate::group::Group;
use crate::path::Cycle;

/// Verdict of a commutativity check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Commutativity {
    /// Every cycle composes to the identity.
    Holds,
    /// At least one cycle does not compose to the identity.
    Violated,
    /// No violation among the cycles reached, but at least one cycle search
    /// hit its iteration budget.
    Inconclusive,
}

impl Commutativity {
    /// Returns `true` only for [`Commutativity::Holds`].
    pub fn holds(self) -> bool {
        self == Self::Holds
    }
}

/// Violating cycles of the reverse-completed graph, with the status of the
/// cycle enumeration that produced them.
#[derive(Debug, Clone)]
pub struct CommutativityReport<E> {
    /// Each violating cycle and the weight it composes to, in canonical
    /// cycle order.
    pub violations: Vec<(Cycle, E)>,
    /// Most severe status over the per-node cycle searches.
    pub status: SearchStatus,
}

impl<E> CommutativityReport<E> {
    /// Any violation is conclusive; otherwise a truncated enumeration is
    /// [`Commutativity::Inconclusive`].
    pub fn verdict(&self) -> Commutativity {
        if !self.violations.is_empty() {
            Commutativity::Violated
        } else if self.status == SearchStatus::IterationLimitReached {
            Commutativity::Inconclusive
        } else {
            Commutativity::Holds
        }
    }
}

/// Composes the edge weights along `nodes`, in traversal order.
///
/// - An empty sequence has no weight: `Ok(None)`.
/// - A single node has the group identity.
/// - Otherwise the weights of consecutive edges are left-folded with
///   [`Group::compose`] starting from the identity.
///
/// # Errors
///
/// - [`GraphError::NodeNotFound`] listing every unknown label.
/// - [`GraphError::InvalidPath`] naming the first consecutive pair with no
///   edge between them.
pub fn path_weight<G, S>(
    graph: &WeightedGraph<G>,
    nodes: &[S],
) -> Result<Option<G::Element>, GraphError>
where
    G: Group,
    S: AsRef<str>,
{
    if nodes.is_empty() {
        return Ok(None);
    }
    graph.require_nodes(nodes.iter().map(AsRef::as_ref))?;

    let weights = nodes
        .windows(2)
        .map(|pair| {
            let (start, end) = (pair[0].as_ref(), pair[1].as_ref());
            graph
                .weight(start, end)?
                .ok_or_else(|| GraphError::InvalidPath {
                    path: nodes.iter().map(|n| n.as_ref().to_owned()).collect(),
                    start: start.to_owned(),
                    end: end.to_owned(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Some(graph.group().fold(weights)))
}

/// Composed weight around `cycle`, starting at its canonical first node.
fn cycle_weight<G: Group>(
    graph: &WeightedGraph<G>,
    cycle: &Cycle,
) -> Result<G::Element, GraphError> {
    let closed = cycle.as_path();
    Ok(path_weight(graph, closed.nodes())?.unwrap_or_else(|| graph.group().identity()))
}

/// Cycles of the reverse-completed graph whose weight is not the identity,
/// under the default search limits.
///
/// The graph is first completed with [`WeightedGraph::with_reverse_edges`],
/// so a one-way edge `a → b` also contributes the round trip through its
/// inverse.
///
/// # Errors
///
/// Propagates adjacency lookup failures; none occur on a well-formed graph.
pub fn commutativity_violations<G: Group>(
    graph: &WeightedGraph<G>,
) -> Result<CommutativityReport<G::Element>, GraphError> {
    commutativity_violations_with(graph, &SearchConfig::default())
}

/// [`commutativity_violations`] with every per-node cycle search running
/// under `config`.
///
/// # Errors
///
/// Propagates adjacency lookup failures; none occur on a well-formed graph.
pub fn commutativity_violations_with<G: Group>(
    graph: &WeightedGraph<G>,
    config: &SearchConfig,
) -> Result<CommutativityReport<G::Element>, GraphError> {
    let complete = graph.with_reverse_edges();
    let group = complete.group();
    let identity = group.identity();

    let outcome = cycles_with(&complete, config)?;
    let mut violations = Vec::new();
    for cycle in outcome.cycles {
        let weight = cycle_weight(&complete, &cycle)?;
        if !group.elements_equal(&weight, &identity) {
            debug!(cycle = %cycle, weight = ?weight, "cycle does not compose to the identity");
            violations.push((cycle, weight));
        }
    }
    Ok(CommutativityReport {
        violations,
        status: outcome.status,
    })
}

/// Checks that every cycle of the reverse-completed graph composes to the
/// identity, i.e. accumulated weight between two nodes does not depend on
/// the route taken. Uses the default search limits.
///
/// Recomputed on every call.
///
/// # Errors
///
/// Propagates adjacency lookup failures; none occur on a well-formed graph.
pub fn is_commutative<G: Group>(graph: &WeightedGraph<G>) -> Result<Commutativity, GraphError> {
    is_commutative_with(graph, &SearchConfig::default())
}

/// [`is_commutative`] with every per-node cycle search running under
/// `config`. Stops at the first violating cycle.
///
/// # Errors
///
/// Propagates adjacency lookup failures; none occur on a well-formed graph.
pub fn is_commutative_with<G: Group>(
    graph: &WeightedGraph<G>,
    config: &SearchConfig,
) -> Result<Commutativity, GraphError> {
    let complete = graph.with_reverse_edges();
    let group = complete.group();
    let identity = group.identity();

    let mut weighed: HashSet<Cycle> = HashSet::new();
    let mut truncated = false;
    for node in complete.nodes() {
        let outcome = cycles_through_with(&complete, node, config)?;
        truncated |= outcome.is_truncated();
        for cycle in outcome.cycles {
            if weighed.contains(&cycle) {
                continue;
            }
            if !group.elements_equal(&cycle_weight(&complete, &cycle)?, &identity) {
                debug!(cycle = %cycle, "first cycle not composing to the identity");
                return Ok(Commutativity::Violated);
            }
            weighed.insert(cycle);
        }
    }

    if truncated {
        warn!(
            max_iterations = config.max_iterations,
            "commutativity is inconclusive: a cycle search hit its iteration limit"
        );
        Ok(Commutativity::Inconclusive)
    } else {
        Ok(Commutativity::Holds)
    }
}
