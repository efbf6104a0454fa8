//! Node sequences produced by the search engine: [`Path`] and [`Cycle`].
//!
//! A [`Path`] is a non-empty walk with no two consecutive equal nodes. A
//! [`Cycle`] is a closed walk stored in open form (closing node dropped) and
//! compared up to rotation. Reversal is never folded away: group composition
//! is order-sensitive in general, so `a → b → c → a` and `a → c → b → a` are
//! distinct cycles.
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Serialize;
use thiserror::Error;

/// Ways in which a node sequence can fail to be a valid [`Path`] or [`Cycle`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    /// The sequence has no nodes.
    #[error("a path can not be empty")]
    Empty,
    /// Two consecutive entries name the same node.
    #[error("node {node:?} repeats consecutively at position {position}")]
    ConsecutiveDuplicate {
        /// The repeated node.
        node: String,
        /// Index of the second occurrence.
        position: usize,
    },
    /// A closed cycle sequence needs at least three entries (two edges).
    #[error("a cycle needs at least 3 nodes in its closed sequence, got {len}")]
    CycleTooShort {
        /// Length of the offending closed sequence.
        len: usize,
    },
    /// The closed sequence does not return to its starting node.
    #[error("a cycle must start and end on the same node, got {first:?} and {last:?}")]
    NotClosed {
        /// First node of the sequence.
        first: String,
        /// Last node of the sequence.
        last: String,
    },
}

fn check_consecutive(nodes: &[String]) -> Result<(), SequenceError> {
    match nodes.windows(2).position(|pair| pair[0] == pair[1]) {
        Some(i) => Err(SequenceError::ConsecutiveDuplicate {
            node: nodes[i].clone(),
            position: i + 1,
        }),
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Path
// ---------------------------------------------------------------------------

/// A walk through the graph, as an ordered sequence of node labels.
///
/// Invariants: non-empty, and no node immediately follows itself. The length
/// of a path is its number of edges, see [`Path::edge_count`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Path {
    nodes: Vec<String>,
}

impl Path {
    /// Builds a path from a sequence of node labels.
    ///
    /// # Errors
    ///
    /// - [`SequenceError::Empty`] if `nodes` is empty.
    /// - [`SequenceError::ConsecutiveDuplicate`] if a node follows itself.
    pub fn new<I, S>(nodes: I) -> Result<Self, SequenceError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let nodes: Vec<String> = nodes.into_iter().map(Into::into).collect();
        if nodes.is_empty() {
            return Err(SequenceError::Empty);
        }
        check_consecutive(&nodes)?;
        Ok(Self { nodes })
    }

    /// A zero-edge path sitting on `node`.
    pub(crate) fn from_single(node: &str) -> Self {
        Self {
            nodes: vec![node.to_owned()],
        }
    }

    /// Returns a new path with `node` appended.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::ConsecutiveDuplicate`] if `node` equals the
    /// current last node.
    pub fn extended(&self, node: &str) -> Result<Self, SequenceError> {
        if self.last() == node {
            return Err(SequenceError::ConsecutiveDuplicate {
                node: node.to_owned(),
                position: self.nodes.len(),
            });
        }
        let mut nodes = Vec::with_capacity(self.nodes.len() + 1);
        nodes.extend_from_slice(&self.nodes);
        nodes.push(node.to_owned());
        Ok(Self { nodes })
    }

    /// The node labels in traversal order.
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    /// Number of nodes in the sequence.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges traversed: one less than the number of nodes.
    pub fn edge_count(&self) -> usize {
        self.nodes.len() - 1
    }

    /// The first node.
    pub fn first(&self) -> &str {
        self.nodes.first().map_or("", String::as_str)
    }

    /// The last node.
    pub fn last(&self) -> &str {
        self.nodes.last().map_or("", String::as_str)
    }

    /// Returns `true` if the walk ends where it started.
    pub fn is_cycle(&self) -> bool {
        self.first() == self.last()
    }

    /// Iterates over consecutive `(from, to)` node pairs, one per edge.
    pub fn steps(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.nodes
            .windows(2)
            .map(|pair| (pair[0].as_str(), pair[1].as_str()))
    }

    /// Returns `true` if some node appears more than once.
    pub fn has_repeated_node(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.nodes.len());
        !self.nodes.iter().all(|n| seen.insert(n))
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.nodes.join(" -> "))
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

// ---------------------------------------------------------------------------
// Canonicalization
// ---------------------------------------------------------------------------

/// All rotations of `cycle`, starting with the identity rotation.
fn rotations(cycle: &[String]) -> Vec<Vec<String>> {
    (0..cycle.len()).map(|i| rotate(cycle, i)).collect()
}

fn rotate(cycle: &[String], start: usize) -> Vec<String> {
    let mut rotated = Vec::with_capacity(cycle.len());
    rotated.extend_from_slice(&cycle[start..]);
    rotated.extend_from_slice(&cycle[..start]);
    rotated
}

/// The rotation of `cycle` beginning at its smallest label.
///
/// When the smallest label occurs more than once (a multi-visit cycle), the
/// lexicographically smallest of the candidate rotations is chosen, so every
/// rotation of the same cycle maps to the same form.
fn canonical_rotation(cycle: &[String]) -> Vec<String> {
    let Some(smallest) = cycle.iter().min() else {
        return Vec::new();
    };
    let mut best: Option<Vec<String>> = None;
    for (i, _) in cycle.iter().enumerate().filter(|(_, n)| *n == smallest) {
        let candidate = rotate(cycle, i);
        if best.as_ref().is_none_or(|b| candidate < *b) {
            best = Some(candidate);
        }
    }
    best.unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Cycle
// ---------------------------------------------------------------------------

/// A closed walk, compared up to rotation.
///
/// Stored as the open sequence `[n0, …, nk-1]` meaning
/// `n0 → … → nk-1 → n0`, together with its canonical rotation. Equality,
/// hashing and ordering all use the canonical rotation.
#[derive(Debug, Clone, Serialize)]
pub struct Cycle {
    #[serde(skip)]
    nodes: Vec<String>,
    #[serde(rename = "nodes")]
    canonical: Vec<String>,
}

impl Cycle {
    /// Builds a cycle from a closed sequence whose first and last entries
    /// are the same node, e.g. `["a", "b", "c", "a"]`.
    ///
    /// # Errors
    ///
    /// - [`SequenceError::Empty`] if the sequence is empty.
    /// - [`SequenceError::CycleTooShort`] if it has fewer than three entries.
    /// - [`SequenceError::NotClosed`] if the first and last entries differ.
    /// - [`SequenceError::ConsecutiveDuplicate`] if a node follows itself.
    pub fn new<I, S>(closed: I) -> Result<Self, SequenceError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let path = Path::new(closed)?;
        Self::from_path(&path)
    }

    /// Builds a cycle from a [`Path`] that returns to its start.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Cycle::new`].
    pub fn from_path(path: &Path) -> Result<Self, SequenceError> {
        let len = path.node_count();
        if len < 3 {
            return Err(SequenceError::CycleTooShort { len });
        }
        if !path.is_cycle() {
            return Err(SequenceError::NotClosed {
                first: path.first().to_owned(),
                last: path.last().to_owned(),
            });
        }
        let nodes = path.nodes()[..len - 1].to_vec();
        Ok(Self::from_open_unchecked(nodes))
    }

    /// Builds a cycle from its open form, e.g. `["a", "b", "c"]` for
    /// `a → b → c → a`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Cycle::new`] applied to the closed sequence; in
    /// particular the last node may not equal the first.
    pub fn from_open<I, S>(open: I) -> Result<Self, SequenceError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut nodes: Vec<String> = open.into_iter().map(Into::into).collect();
        if let Some(first) = nodes.first().cloned() {
            nodes.push(first);
        }
        Self::new(nodes)
    }

    fn from_open_unchecked(nodes: Vec<String>) -> Self {
        let canonical = canonical_rotation(&nodes);
        Self { nodes, canonical }
    }

    /// The open sequence in the rotation it was built from.
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    /// The canonical rotation of the open sequence.
    pub fn canonical(&self) -> &[String] {
        &self.canonical
    }

    /// Every rotation of the open sequence, starting with the one the cycle
    /// was built from.
    pub fn equivalent_representations(&self) -> Vec<Vec<String>> {
        rotations(&self.nodes)
    }

    /// Number of edges in the cycle (equal to the number of distinct
    /// positions in the open sequence).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: a cycle has at least two edges.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns `true` if `node` lies on the cycle.
    pub fn contains(&self, node: &str) -> bool {
        self.nodes.iter().any(|n| n == node)
    }

    /// The closed walk in canonical rotation, e.g. `a → b → c → a`.
    pub fn as_path(&self) -> Path {
        let mut nodes = self.canonical.clone();
        if let Some(first) = self.canonical.first() {
            nodes.push(first.clone());
        }
        Path { nodes }
    }
}

impl PartialEq for Cycle {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl Eq for Cycle {}

impl Hash for Cycle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical.hash(state);
    }
}

impl PartialOrd for Cycle {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cycle {
    fn cmp(&self, other: &Self) -> Ordering {
        self.canonical.cmp(&other.canonical)
    }
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.as_path(), f)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
