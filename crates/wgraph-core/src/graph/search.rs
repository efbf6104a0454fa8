//! Bounded multi-visit path enumeration.
//!
//! [`find_paths`] runs a breadth-first search over [`PathExplorer`] values.
//! Unlike a simple-path search, a node may be visited more than once, up to a
//! configurable cap, which is what makes cycle enumeration possible: search
//! from a node back to itself with that node's cap raised to 2.
//!
//! # Algorithm
//!
//! A FIFO queue is seeded with the one-node path `[start]`. Each iteration
//! pops the oldest explorer and:
//!
//! 1. counts one more visit to its current node;
//! 2. discards it if that count exceeds the node's cap;
//! 3. records its path if the current node is `end` and the path has at least
//!    one edge, then keeps going;
//! 4. extends the path by every child whose visit count is still below its
//!    cap, carrying the updated counts;
//! 5. enqueues each new explorer unless an identical one is already queued.
//!
//! Children are expanded in lexicographic order, so the discovery order is
//! deterministic and, being breadth-first, non-decreasing in path length.
//!
//! # Termination
//!
//! The search ends when the queue is empty, when `max_paths` results have been
//! found, or when `max_iterations` explorers have been processed. Hitting the
//! iteration limit is not an error: the paths found so far are returned with
//! [`SearchStatus::IterationLimitReached`] and a warning is logged.
//!
//! # Continuing past the target
//!
//! Reaching `end` does not stop expansion of that path. With raised caps the
//! search therefore also returns longer walks that pass through `end` more
//! than once. Callers that want only shortest paths should filter by
//! [`Path::edge_count`] or use [`SearchOutcome::shortest`].
use std::collections::{BTreeMap, HashSet, VecDeque};

use serde::Serialize;
use tracing::{debug, warn};

use crate::graph::{GraphError, PathExplorer, WeightedGraph};
use crate::group::Group;
use crate::path::Path;


/// Default cap on visits per node: every node at most once (simple paths).
pub const DEFAULT_MAX_VISITS: usize = 1;

/// Default budget of processed explorers before the search is truncated.
pub const DEFAULT_MAX_ITERATIONS: usize = 1_000;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Limits for [`find_paths`].
///
/// `SearchConfig::default()` allows each node once, processes at most
/// [`DEFAULT_MAX_ITERATIONS`] explorers, and returns every path found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Visit cap for nodes without a specific entry.
    pub max_visits: usize,
    /// Per-node visit caps overriding `max_visits`.
    ///
    /// A node capped at 0 is never stepped into: it is left out of the
    /// frontier instead of being queued and pruned. A start node capped at 0
    /// is pruned on its first visit, so the search finds nothing.
    pub node_max_visits: BTreeMap<String, usize>,
    /// Maximum number of explorers processed.
    pub max_iterations: usize,
    /// Stop once this many paths have been found; `None` for no limit.
    pub max_paths: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_visits: DEFAULT_MAX_VISITS,
            node_max_visits: BTreeMap::new(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
            max_paths: None,
        }
    }
}

impl SearchConfig {
    /// Sets the general visit cap.
    #[must_use]
    pub fn with_max_visits(mut self, max_visits: usize) -> Self {
        self.max_visits = max_visits;
        self
    }

    /// Sets the visit cap of a single node.
    #[must_use]
    pub fn with_node_max_visits(mut self, node: impl Into<String>, max_visits: usize) -> Self {
        self.node_max_visits.insert(node.into(), max_visits);
        self
    }

    /// Sets the iteration budget.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the maximum number of returned paths.
    #[must_use]
    pub fn with_max_paths(mut self, max_paths: usize) -> Self {
        self.max_paths = Some(max_paths);
        self
    }

    /// The visit cap that applies to `node`.
    pub fn max_visits_for(&self, node: &str) -> usize {
        self.node_max_visits
            .get(node)
            .copied()
            .unwrap_or(self.max_visits)
    }

    fn path_limit_reached(&self, found: usize) -> bool {
        self.max_paths.is_some_and(|limit| found >= limit)
    }
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Why a search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    /// Every reachable explorer was processed; the result is complete.
    Exhausted,
    /// `max_paths` results were found.
    PathLimitReached,
    /// The iteration budget ran out; the result is a partial, valid subset.
    IterationLimitReached,
}

/// Paths found by [`find_paths`], in discovery order, with the stop reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Discovered paths.
    pub paths: Vec<Path>,
    /// Why the search stopped.
    pub status: SearchStatus,
    /// Number of explorers processed.
    pub iterations: usize,
}

impl SearchOutcome {
    /// Returns `true` if the iteration budget cut the search short.
    pub fn is_truncated(&self) -> bool {
        self.status == SearchStatus::IterationLimitReached
    }

    /// The path with the fewest edges; the earliest discovered wins ties.
    pub fn shortest(&self) -> Option<&Path> {
        self.paths.iter().min_by_key(|p| p.edge_count())
    }

    /// Consumes the outcome, keeping only the paths.
    pub fn into_paths(self) -> Vec<Path> {
        self.paths
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Enumerates walks from `start` to `end` within the limits of `config`.
///
/// See the [module documentation](self) for the algorithm. With the default
/// configuration only simple paths are returned, and `start == end` yields no
/// path at all: a cycle through `start` needs its cap raised to at least 2.
/// A zero-edge path is never reported.
///
/// # Errors
///
/// Returns [`GraphError::NodeNotFound`] listing `start` and/or `end` if they
/// are not in the graph. No search work is done in that case.
pub fn find_paths<G: Group>(
    graph: &WeightedGraph<G>,
    start: &str,
    end: &str,
    config: &SearchConfig,
) -> Result<SearchOutcome, GraphError> {
    graph.require_nodes([start, end])?;
    debug!(
        start,
        end,
        max_visits = config.max_visits,
        max_iterations = config.max_iterations,
        "path search started"
    );

    let seed = PathExplorer::seed(start);
    let mut queued: HashSet<PathExplorer> = HashSet::from([seed.clone()]);
    let mut queue: VecDeque<PathExplorer> = VecDeque::from([seed]);
    let mut paths: Vec<Path> = Vec::new();
    let mut iterations: usize = 0;

    let status = loop {
        if config.path_limit_reached(paths.len()) {
            break SearchStatus::PathLimitReached;
        }
        if queue.is_empty() {
            break SearchStatus::Exhausted;
        }
        if iterations >= config.max_iterations {
            warn!(
                start,
                end,
                max_iterations = config.max_iterations,
                found = paths.len(),
                "path search hit its iteration limit, returning partial results"
            );
            break SearchStatus::IterationLimitReached;
        }
        let Some(explorer) = queue.pop_front() else {
            break SearchStatus::Exhausted;
        };
        queued.remove(&explorer);
        iterations += 1;

        let expansion = expand(graph, &explorer, end, config)?;
        if let Some(path) = expansion.found {
            paths.push(path);
        }
        for next in expansion.frontier {
            if !queued.contains(&next) {
                queued.insert(next.clone());
                queue.push_back(next);
            }
        }
    };

    debug!(
        start,
        end,
        iterations,
        found = paths.len(),
        ?status,
        "path search finished"
    );
    Ok(SearchOutcome {
        paths,
        status,
        iterations,
    })
}

/// Result of processing one explorer.
#[derive(Default)]
struct Expansion {
    found: Option<Path>,
    frontier: Vec<PathExplorer>,
}

/// Processes a single explorer: visit, prune, record, and branch.
fn expand<G: Group>(
    graph: &WeightedGraph<G>,
    explorer: &PathExplorer,
    end: &str,
    config: &SearchConfig,
) -> Result<Expansion, GraphError> {
    let current = explorer.current();
    let visitations = explorer.visited();
    let visits = visitations.get(current).copied().unwrap_or(0);

    if visits > config.max_visits_for(current) {
        return Ok(Expansion::default());
    }

    let found = (current == end && explorer.path().edge_count() > 0)
        .then(|| explorer.path().clone());

    let frontier = graph
        .children(current)?
        .into_iter()
        .filter(|child| {
            visitations.get(*child).copied().unwrap_or(0) < config.max_visits_for(child)
        })
        .map(|child| explorer.step(child, visitations.clone()))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Expansion { found, frontier })
}
