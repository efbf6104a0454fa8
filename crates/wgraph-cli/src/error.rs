/// CLI error types with associated exit codes.
///
/// [`CliError`] is the top-level error type for the `wgraph` binary. Every
/// variant maps to a stable exit code (1 or 2) via [`CliError::exit_code`]:
///
/// - Exit code **2**: input failure. The tool could not read, parse, or build
///   the graph at all, or the arguments are unusable. Nothing was computed.
/// - Exit code **1**: logical failure. The graph loaded but the query has a
///   well-defined negative answer (unknown node, no path, not commutative),
///   or no answer within the search budget.
use std::fmt;
use std::path::PathBuf;

use wgraph_core::GraphError;

// ---------------------------------------------------------------------------
// CliError
// ---------------------------------------------------------------------------

/// All error conditions that the `wgraph` CLI can produce.
#[derive(Debug)]
pub enum CliError {
    // --- Exit code 2: input failures ---
    /// A file argument could not be found on the filesystem.
    FileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// The process lacks permission to read a file.
    PermissionDenied {
        /// The path that could not be read.
        path: PathBuf,
    },

    /// The input exceeds the configured `--max-file-size` limit.
    FileTooLarge {
        /// `"-"` for stdin, or the filesystem path.
        source: String,
        /// The configured size limit in bytes.
        limit: u64,
        /// The actual size in bytes; `None` for stdin.
        actual: Option<u64>,
    },

    /// The input bytes are not valid UTF-8.
    InvalidUtf8 {
        /// `"-"` for stdin, or the filesystem path.
        source: String,
        /// The byte offset of the first invalid byte sequence.
        byte_offset: usize,
    },

    /// An I/O error occurred while reading from stdin.
    StdinReadError {
        /// The underlying I/O error message.
        detail: String,
    },

    /// A generic I/O error not covered by the more specific variants above.
    IoError {
        /// `"-"` for stdin, `"stdout"`, or the filesystem path.
        source: String,
        /// The underlying I/O error message.
        detail: String,
    },

    /// The input is not a JSON adjacency object with weights of the
    /// selected group's element type.
    ParseError {
        /// `"-"` for stdin, or the filesystem path.
        source: String,
        /// The deserializer's message.
        detail: String,
    },

    /// A weight parsed but is not an element of the selected group.
    InvalidWeight {
        /// Source node of the edge.
        start: String,
        /// Target node of the edge.
        end: String,
        /// Why the weight was rejected.
        detail: String,
    },

    /// The adjacency mapping does not describe a valid graph.
    GraphBuildError {
        /// The core's error message.
        detail: String,
    },

    /// A combination of arguments that can not be used together.
    InvalidArgument {
        /// What is wrong.
        detail: String,
    },

    // --- Exit code 1: logical failures ---
    /// One or more node labels are not in the graph.
    NodeNotFound {
        /// The unknown labels.
        nodes: Vec<String>,
    },

    /// The query ran but found nothing.
    NoResults {
        /// What was searched for.
        detail: String,
    },

    /// A node sequence is not a path of the graph.
    InvalidPath {
        /// The core's error message.
        detail: String,
    },

    /// Some cycle does not compose to the identity.
    ///
    /// The violations have already been printed.
    NotCommutative {
        /// Number of violating cycles.
        violations: usize,
    },

    /// No violating cycle was found, but a cycle search ran out of
    /// iterations, so some cycles were never checked.
    Inconclusive {
        /// The per-search iteration budget that was exhausted.
        max_iterations: usize,
    },

    /// Any other failure reported by the core while answering a query.
    QueryFailed {
        /// The core's error message.
        detail: String,
    },
}

impl CliError {
    /// Returns the process exit code for this error.
    ///
    /// - `2`: input failure (file not found, bad JSON, bad weight, …).
    /// - `1`: logical failure (unknown node, no results, not commutative, …).
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. }
            | Self::PermissionDenied { .. }
            | Self::FileTooLarge { .. }
            | Self::InvalidUtf8 { .. }
            | Self::StdinReadError { .. }
            | Self::IoError { .. }
            | Self::ParseError { .. }
            | Self::InvalidWeight { .. }
            | Self::GraphBuildError { .. }
            | Self::InvalidArgument { .. } => 2,

            Self::NodeNotFound { .. }
            | Self::NoResults { .. }
            | Self::InvalidPath { .. }
            | Self::NotCommutative { .. }
            | Self::Inconclusive { .. }
            | Self::QueryFailed { .. } => 1,
        }
    }

    /// Returns a human-readable error message suitable for printing to stderr.
    pub fn message(&self) -> String {
        match self {
            Self::FileNotFound { path } => {
                format!("error: file not found: {}", path.display())
            }
            Self::PermissionDenied { path } => {
                format!("error: permission denied: {}", path.display())
            }
            Self::FileTooLarge {
                source,
                limit,
                actual: Some(actual),
            } => {
                format!("error: file too large: {source} is {actual} bytes, limit is {limit} bytes")
            }
            Self::FileTooLarge {
                source,
                limit,
                actual: None,
            } => {
                format!("error: file too large: {source} exceeded limit of {limit} bytes")
            }
            Self::InvalidUtf8 {
                source,
                byte_offset,
            } => {
                format!(
                    "error: invalid UTF-8 in {source}: first invalid byte at offset {byte_offset}"
                )
            }
            Self::StdinReadError { detail } => {
                format!("error: failed to read stdin: {detail}")
            }
            Self::IoError { source, detail } => {
                format!("error: I/O error on {source}: {detail}")
            }
            Self::ParseError { source, detail } => {
                format!("error: could not parse {source}: {detail}")
            }
            Self::InvalidWeight { start, end, detail } => {
                format!("error: invalid weight on edge {start} -> {end}: {detail}")
            }
            Self::GraphBuildError { detail } => {
                format!("error: invalid graph: {detail}")
            }
            Self::InvalidArgument { detail } => {
                format!("error: {detail}")
            }
            Self::NodeNotFound { nodes } => {
                format!("error: node(s) not found: {}", nodes.join(", "))
            }
            Self::NoResults { detail } => {
                format!("error: no results: {detail}")
            }
            Self::InvalidPath { detail } => {
                format!("error: {detail}")
            }
            Self::NotCommutative { violations } => {
                format!("error: graph is not commutative: {violations} cycle(s) do not compose to the identity")
            }
            Self::Inconclusive { max_iterations } => {
                format!(
                    "error: commutativity is inconclusive: a cycle search hit the limit of \
                     {max_iterations} iterations; raise --max-iterations to search further"
                )
            }
            Self::QueryFailed { detail } => {
                format!("error: {detail}")
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for CliError {}

impl From<GraphError> for CliError {
    fn from(e: GraphError) -> Self {
        match e {
            GraphError::NodeNotFound(nodes) => Self::NodeNotFound { nodes },
            GraphError::InvalidPath { .. } => Self::InvalidPath {
                detail: e.to_string(),
            },
            GraphError::NodeAlreadyExists(_)
            | GraphError::EdgeAlreadyExists { .. }
            | GraphError::EdgeNotFound { .. }
            | GraphError::SelfLoop(_)
            | GraphError::MalformedSequence(_) => Self::QueryFailed {
                detail: e.to_string(),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
