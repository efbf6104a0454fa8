//! Search-frontier state for [`find_paths`](crate::graph::find_paths).
use std::collections::BTreeMap;

use crate::path::{Path, SequenceError};

/// An immutable frontier entry: a partial path plus per-node visit counts.
///
/// The counts record visits completed *before* the path's current (last)
/// node is processed. Explorers are plain values; advancing one produces new
/// explorers and never touches the original.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathExplorer {
    path: Path,
    visitations: BTreeMap<String, usize>,
}

impl PathExplorer {
    /// The seed explorer: a one-node path and no recorded visits.
    pub fn seed(start: &str) -> Self {
        Self {
            path: Path::from_single(start),
            visitations: BTreeMap::new(),
        }
    }

    /// The partial path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Visit counts recorded so far.
    pub fn visitations(&self) -> &BTreeMap<String, usize> {
        &self.visitations
    }

    /// The node at the tip of the path.
    pub fn current(&self) -> &str {
        self.path.last()
    }

    /// Visit counts after counting one more visit to the current node.
    pub fn visited(&self) -> BTreeMap<String, usize> {
        let mut visitations = self.visitations.clone();
        *visitations.entry(self.current().to_owned()).or_insert(0) += 1;
        visitations
    }

    /// A new explorer one step further along, at `node`, carrying
    /// `visitations`.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::ConsecutiveDuplicate`] if `node` is the
    /// current node.
    pub fn step(
        &self,
        node: &str,
        visitations: BTreeMap<String, usize>,
    ) -> Result<Self, SequenceError> {
        Ok(Self {
            path: self.path.extended(node)?,
            visitations,
        })
    }
}
