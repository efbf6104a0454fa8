//! Directed edges carrying a group-valued weight.
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::graph::GraphError;
use crate::group::Group;

/// A directed edge `start → end` weighted by an element of `G`.
///
/// The edge holds a shared handle to its group so that it can invert and
/// compare its own weight. Edges are immutable; graph mutations replace them.
///
/// Equality is "same endpoints and [`Group::elements_equal`] weights". Hashing
/// covers the endpoints only, which keeps it consistent with that equality.
pub struct WeightedEdge<G: Group> {
    start: String,
    end: String,
    weight: G::Element,
    group: Arc<G>,
}

impl<G: Group> WeightedEdge<G> {
    /// Creates an edge between two distinct nodes.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::SelfLoop`] if `start == end`.
    pub fn new(
        start: impl Into<String>,
        end: impl Into<String>,
        weight: G::Element,
        group: Arc<G>,
    ) -> Result<Self, GraphError> {
        let start = start.into();
        let end = end.into();
        if start == end {
            return Err(GraphError::SelfLoop(start));
        }
        Ok(Self {
            start,
            end,
            weight,
            group,
        })
    }

    /// Builds an edge whose endpoints are already known to differ.
    pub(crate) fn from_trusted(
        start: impl Into<String>,
        end: impl Into<String>,
        weight: G::Element,
        group: Arc<G>,
    ) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            weight,
            group,
        }
    }

    /// The source node.
    pub fn start(&self) -> &str {
        &self.start
    }

    /// The target node.
    pub fn end(&self) -> &str {
        &self.end
    }

    /// The edge weight.
    pub fn weight(&self) -> &G::Element {
        &self.weight
    }

    /// The group the weight belongs to.
    pub fn group(&self) -> &G {
        &self.group
    }

    /// Returns the reverse edge `end → start` weighted by the inverse element.
    pub fn inverse(&self) -> Self {
        Self {
            start: self.end.clone(),
            end: self.start.clone(),
            weight: self.group.invert(&self.weight),
            group: Arc::clone(&self.group),
        }
    }
}

impl<G: Group> Clone for WeightedEdge<G> {
    fn clone(&self) -> Self {
        Self {
            start: self.start.clone(),
            end: self.end.clone(),
            weight: self.weight.clone(),
            group: Arc::clone(&self.group),
        }
    }
}

impl<G: Group> PartialEq for WeightedEdge<G> {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start
            && self.end == other.end
            && self.group.elements_equal(&self.weight, &other.weight)
    }
}

impl<G: Group> Eq for WeightedEdge<G> {}

impl<G: Group> Hash for WeightedEdge<G> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.start.hash(state);
        self.end.hash(state);
    }
}

impl<G: Group> fmt::Debug for WeightedEdge<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeightedEdge")
            .field("start", &self.start)
            .field("end", &self.end)
            .field("weight", &self.weight)
            .finish_non_exhaustive()
    }
}

impl<G: Group> fmt::Display for WeightedEdge<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}: {:?}", self.start, self.end, self.weight)
    }
}
