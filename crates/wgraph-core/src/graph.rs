//! Group-weighted directed graph built on `petgraph`, plus search algorithms.
//!
//! [`WeightedGraph`] wraps a `StableDiGraph` whose node weights are labels and
//! whose edge weights are group elements. A `label → NodeIndex` map gives O(1)
//! lookup by label. Indices stay valid after removals because `StableDiGraph`
//! tombstones rather than compacts.
//!
//! # Read accessors
//!
//! The search algorithms only use [`WeightedGraph::nodes`],
//! [`WeightedGraph::edges`], [`WeightedGraph::children`] and
//! [`WeightedGraph::parents`]. All of them return deterministically ordered
//! collections.
//!
//! # Mutation
//!
//! Every mutation comes in two forms: an in-place `&mut self` method
//! (`add_node`, `delete_edge`, …) and a `with_*`/`without_*` method returning a
//! modified copy that leaves `self` untouched.
//!
//! # Algorithms
//!
//! - [`search`]: bounded multi-visit path enumeration ([`find_paths`]).
//! - [`cycles`]: cycle enumeration through a node or over the whole graph.
//! - [`algebra`]: path weights and the commutativity check.
pub mod algebra;
pub mod cycles;
pub mod explorer;
pub mod search;

pub use algebra::{
    Commutativity, CommutativityReport, commutativity_violations, commutativity_violations_with,
    is_commutative, is_commutative_with, path_weight,
};
pub use cycles::{CycleOutcome, cycles, cycles_through, cycles_through_with, cycles_with};
pub use explorer::PathExplorer;
pub use search::{
    DEFAULT_MAX_ITERATIONS, DEFAULT_MAX_VISITS, SearchConfig, SearchOutcome, SearchStatus,
    find_paths,
};

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

use petgraph::Direction;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use thiserror::Error;

use crate::edge::WeightedEdge;
use crate::group::Group;
use crate::path::SequenceError;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors raised by graph construction, mutation, and queries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// One or more node labels are not in the graph.
    #[error("node(s) not found in the graph: {}", .0.join(", "))]
    NodeNotFound(Vec<String>),
    /// A node with this label already exists.
    #[error("node {0:?} already exists")]
    NodeAlreadyExists(String),
    /// An edge between these endpoints already exists.
    #[error("edge {start:?} -> {end:?} already exists")]
    EdgeAlreadyExists {
        /// Source node.
        start: String,
        /// Target node.
        end: String,
    },
    /// No edge connects these endpoints.
    #[error("edge {start:?} -> {end:?} not found")]
    EdgeNotFound {
        /// Source node.
        start: String,
        /// Target node.
        end: String,
    },
    /// An edge would start and end on the same node.
    #[error("edge would connect node {0:?} to itself")]
    SelfLoop(String),
    /// A path has a consecutive pair with no edge between them.
    #[error("the path {} is not a valid path in the graph: no edge {start:?} -> {end:?}", .path.join(" -> "))]
    InvalidPath {
        /// The full offending sequence.
        path: Vec<String>,
        /// Source of the first missing step.
        start: String,
        /// Target of the first missing step.
        end: String,
    },
    /// A node sequence violates the path or cycle invariants.
    #[error(transparent)]
    MalformedSequence(#[from] SequenceError),
}

// ---------------------------------------------------------------------------
// WeightedGraph
// ---------------------------------------------------------------------------

/// A directed graph whose edges are weighted by elements of the group `G`.
///
/// At most one edge connects an ordered pair of nodes, and no edge connects a
/// node to itself. Construct with [`WeightedGraph::new`] or
/// [`WeightedGraph::from_adjacency`].
pub struct WeightedGraph<G: Group> {
    graph: StableDiGraph<String, G::Element>,
    id_to_index: HashMap<String, NodeIndex>,
    group: Arc<G>,
}

impl<G: Group> WeightedGraph<G> {
    /// Creates an empty graph over `group`.
    pub fn new(group: G) -> Self {
        Self::with_group_handle(Arc::new(group))
    }

    fn with_group_handle(group: Arc<G>) -> Self {
        Self {
            graph: StableDiGraph::new(),
            id_to_index: HashMap::new(),
            group,
        }
    }

    /// Builds a graph from a nested `start → (end → weight)` mapping.
    ///
    /// The outer keys define the node set. Every inner key must also be an
    /// outer key.
    ///
    /// # Two-Pass Construction
    ///
    /// 1. **Node pass**: inserts every outer key as a node.
    /// 2. **Edge pass**: inserts every inner entry as an edge.
    ///
    /// # Errors
    ///
    /// - [`GraphError::NodeAlreadyExists`]: an outer key appears twice.
    /// - [`GraphError::NodeNotFound`]: an inner key is not an outer key.
    /// - [`GraphError::SelfLoop`]: a node maps to itself.
    /// - [`GraphError::EdgeAlreadyExists`]: an inner key repeats for the same
    ///   start node.
    pub fn from_adjacency<I, J, S, T>(adjacency: I, group: G) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (S, J)>,
        J: IntoIterator<Item = (T, G::Element)>,
        S: Into<String>,
        T: Into<String>,
    {
        let mut graph = Self::new(group);
        let mut pending: Vec<(String, J)> = Vec::new();

        // Pass 1: nodes.
        for (start, targets) in adjacency {
            let start = start.into();
            graph.add_node(start.clone())?;
            pending.push((start, targets));
        }

        // Pass 2: edges.
        for (start, targets) in pending {
            for (end, weight) in targets {
                graph.add_edge(start.clone(), end, weight)?;
            }
        }

        Ok(graph)
    }

    /// The group weighting this graph.
    pub fn group(&self) -> &G {
        &self.group
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns `true` if `node` is in the graph.
    pub fn contains_node(&self, node: &str) -> bool {
        self.id_to_index.contains_key(node)
    }

    fn index_of(&self, node: &str) -> Result<NodeIndex, GraphError> {
        self.id_to_index
            .get(node)
            .copied()
            .ok_or_else(|| GraphError::NodeNotFound(vec![node.to_owned()]))
    }

    fn label(&self, idx: NodeIndex) -> &str {
        self.graph.node_weight(idx).map_or("", String::as_str)
    }

    /// Fails with every label in `nodes` that is not in the graph.
    ///
    /// The reported labels are sorted and deduplicated.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] listing the unknown labels.
    pub fn require_nodes<'a, I>(&self, nodes: I) -> Result<(), GraphError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let missing: BTreeSet<&str> = nodes
            .into_iter()
            .filter(|n| !self.contains_node(n))
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(GraphError::NodeNotFound(
                missing.into_iter().map(str::to_owned).collect(),
            ))
        }
    }

    // -- read accessors -----------------------------------------------------

    /// All node labels, in lexicographic order.
    pub fn nodes(&self) -> BTreeSet<&str> {
        self.graph
            .node_indices()
            .map(|idx| self.label(idx))
            .collect()
    }

    /// All edges, ordered by `(start, end)`.
    pub fn edges(&self) -> Vec<WeightedEdge<G>> {
        let mut edges: Vec<WeightedEdge<G>> = self
            .graph
            .edge_references()
            .map(|e| self.edge_from_parts(e.source(), e.target(), e.weight()))
            .collect();
        edges.sort_by(|a, b| (a.start(), a.end()).cmp(&(b.start(), b.end())));
        edges
    }

    fn edge_from_parts(
        &self,
        source: NodeIndex,
        target: NodeIndex,
        weight: &G::Element,
    ) -> WeightedEdge<G> {
        WeightedEdge::from_trusted(
            self.label(source).to_owned(),
            self.label(target).to_owned(),
            weight.clone(),
            Arc::clone(&self.group),
        )
    }

    /// Returns the edge `start → end`, if present.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if either endpoint is unknown.
    pub fn edge(&self, start: &str, end: &str) -> Result<Option<WeightedEdge<G>>, GraphError> {
        Ok(self
            .weight(start, end)?
            .map(|w| WeightedEdge::from_trusted(start, end, w.clone(), Arc::clone(&self.group))))
    }

    /// Returns the weight of the edge `start → end`, if present.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if either endpoint is unknown.
    pub fn weight(&self, start: &str, end: &str) -> Result<Option<&G::Element>, GraphError> {
        self.require_nodes([start, end])?;
        let a = self.index_of(start)?;
        let b = self.index_of(end)?;
        Ok(self
            .graph
            .find_edge(a, b)
            .and_then(|e| self.graph.edge_weight(e)))
    }

    /// Targets of the outgoing edges of `node`, in lexicographic order.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if `node` is unknown.
    pub fn children(&self, node: &str) -> Result<BTreeSet<&str>, GraphError> {
        self.neighbours(node, Direction::Outgoing)
    }

    /// Sources of the incoming edges of `node`, in lexicographic order.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if `node` is unknown.
    pub fn parents(&self, node: &str) -> Result<BTreeSet<&str>, GraphError> {
        self.neighbours(node, Direction::Incoming)
    }

    fn neighbours(&self, node: &str, direction: Direction) -> Result<BTreeSet<&str>, GraphError> {
        let idx = self.index_of(node)?;
        Ok(self
            .graph
            .neighbors_directed(idx, direction)
            .map(|n| self.label(n))
            .collect())
    }

    // -- in-place mutation --------------------------------------------------

    /// Adds an isolated node.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeAlreadyExists`] if the label is taken.
    pub fn add_node(&mut self, node: impl Into<String>) -> Result<(), GraphError> {
        let node = node.into();
        if self.contains_node(&node) {
            return Err(GraphError::NodeAlreadyExists(node));
        }
        let idx = self.graph.add_node(node.clone());
        self.id_to_index.insert(node, idx);
        Ok(())
    }

    /// Removes a node together with every edge touching it.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if `node` is unknown.
    pub fn delete_node(&mut self, node: &str) -> Result<(), GraphError> {
        let idx = self.index_of(node)?;
        self.graph.remove_node(idx);
        self.id_to_index.remove(node);
        Ok(())
    }

    /// Adds the edge `start → end` with the given weight.
    ///
    /// # Errors
    ///
    /// - [`GraphError::NodeNotFound`]: an endpoint is unknown.
    /// - [`GraphError::SelfLoop`]: `start == end`.
    /// - [`GraphError::EdgeAlreadyExists`]: the endpoints are already connected
    ///   in this direction.
    pub fn add_edge(
        &mut self,
        start: impl Into<String>,
        end: impl Into<String>,
        weight: G::Element,
    ) -> Result<(), GraphError> {
        let start = start.into();
        let end = end.into();
        self.require_nodes([start.as_str(), end.as_str()])?;
        if start == end {
            return Err(GraphError::SelfLoop(start));
        }
        let a = self.index_of(&start)?;
        let b = self.index_of(&end)?;
        if self.graph.find_edge(a, b).is_some() {
            return Err(GraphError::EdgeAlreadyExists { start, end });
        }
        self.graph.add_edge(a, b, weight);
        Ok(())
    }

    /// Removes the edge `start → end`.
    ///
    /// # Errors
    ///
    /// - [`GraphError::NodeNotFound`]: an endpoint is unknown.
    /// - [`GraphError::EdgeNotFound`]: no such edge.
    pub fn delete_edge(&mut self, start: &str, end: &str) -> Result<(), GraphError> {
        self.require_nodes([start, end])?;
        let a = self.index_of(start)?;
        let b = self.index_of(end)?;
        let edge = self
            .graph
            .find_edge(a, b)
            .ok_or_else(|| GraphError::EdgeNotFound {
                start: start.to_owned(),
                end: end.to_owned(),
            })?;
        self.graph.remove_edge(edge);
        Ok(())
    }

    /// Adds the inverse of every edge whose reverse connection is missing.
    ///
    /// Existing reverse edges keep their own weight. The result has a return
    /// edge for every directed connection; this is the "complete" graph used by
    /// the commutativity check.
    pub fn add_reverse_edges(&mut self) {
        let missing: Vec<(NodeIndex, NodeIndex, G::Element)> = self
            .graph
            .edge_references()
            .filter(|e| self.graph.find_edge(e.target(), e.source()).is_none())
            .map(|e| (e.target(), e.source(), self.group.invert(e.weight())))
            .collect();
        for (a, b, weight) in missing {
            self.graph.add_edge(a, b, weight);
        }
    }

    // -- copy-on-write mutation ---------------------------------------------

    /// Returns a copy with `node` added. See [`WeightedGraph::add_node`].
    ///
    /// # Errors
    ///
    /// Same as [`WeightedGraph::add_node`].
    pub fn with_node(&self, node: impl Into<String>) -> Result<Self, GraphError> {
        let mut copy = self.clone();
        copy.add_node(node)?;
        Ok(copy)
    }

    /// Returns a copy with `node` and its edges removed. See
    /// [`WeightedGraph::delete_node`].
    ///
    /// # Errors
    ///
    /// Same as [`WeightedGraph::delete_node`].
    pub fn without_node(&self, node: &str) -> Result<Self, GraphError> {
        let mut copy = self.clone();
        copy.delete_node(node)?;
        Ok(copy)
    }

    /// Returns a copy with the edge added. See [`WeightedGraph::add_edge`].
    ///
    /// # Errors
    ///
    /// Same as [`WeightedGraph::add_edge`].
    pub fn with_edge(
        &self,
        start: impl Into<String>,
        end: impl Into<String>,
        weight: G::Element,
    ) -> Result<Self, GraphError> {
        let mut copy = self.clone();
        copy.add_edge(start, end, weight)?;
        Ok(copy)
    }

    /// Returns a copy with the edge removed. See [`WeightedGraph::delete_edge`].
    ///
    /// # Errors
    ///
    /// Same as [`WeightedGraph::delete_edge`].
    pub fn without_edge(&self, start: &str, end: &str) -> Result<Self, GraphError> {
        let mut copy = self.clone();
        copy.delete_edge(start, end)?;
        Ok(copy)
    }

    /// Returns a copy with the missing reverse edges added. See
    /// [`WeightedGraph::add_reverse_edges`].
    pub fn with_reverse_edges(&self) -> Self {
        let mut copy = self.clone();
        copy.add_reverse_edges();
        copy
    }
}

impl<G: Group> Clone for WeightedGraph<G> {
    fn clone(&self) -> Self {
        Self {
            graph: self.graph.clone(),
            id_to_index: self.id_to_index.clone(),
            group: Arc::clone(&self.group),
        }
    }
}

impl<G: Group> PartialEq for WeightedGraph<G> {
    fn eq(&self, other: &Self) -> bool {
        self.nodes() == other.nodes() && self.edges() == other.edges()
    }
}

impl<G: Group> fmt::Debug for WeightedGraph<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeightedGraph")
            .field("group", &self.group.name())
            .field("nodes", &self.nodes())
            .field("edges", &self.edges())
            .finish()
    }
}

impl<G: Group> fmt::Display for WeightedGraph<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nodes: Vec<&str> = self.nodes().into_iter().collect();
        writeln!(f, "Nodes: {{{}}}", nodes.join(", "))?;
        writeln!(f, "Edges:")?;
        for edge in self.edges() {
            writeln!(f, "{edge}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
