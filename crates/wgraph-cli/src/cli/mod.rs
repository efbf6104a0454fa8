//! Clap CLI definition: root struct, subcommands, and shared argument types.
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// A CLI argument that is either a filesystem path or the stdin sentinel `"-"`.
///
/// Parsing `"-"` yields [`PathOrStdin::Stdin`]; anything else yields
/// [`PathOrStdin::Path`].
#[derive(Clone, Debug)]
pub enum PathOrStdin {
    /// Read from standard input.
    Stdin,
    /// Read from the given filesystem path.
    Path(PathBuf),
}

impl std::str::FromStr for PathOrStdin {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            Ok(PathOrStdin::Stdin)
        } else {
            Ok(PathOrStdin::Path(PathBuf::from(s)))
        }
    }
}

impl PathOrStdin {
    /// Label used in error messages: the path, or `-` for stdin.
    pub fn label(&self) -> String {
        match self {
            Self::Stdin => "-".to_owned(),
            Self::Path(path) => path.display().to_string(),
        }
    }
}

/// Output format for CLI commands.
///
/// `Human` prints plain text lines to stdout. `Json` prints a single JSON
/// object.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output (default).
    Human,
    /// A single pretty-printed JSON object.
    Json,
}

/// The group that edge weights in the input file belong to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum GroupKind {
    /// Non-zero real numbers under multiplication (default).
    RealMul,
    /// Real numbers under addition.
    RealAdd,
    /// 64-bit integers under wrapping addition.
    IntAdd,
    /// Real vectors of length `--dimension` under component-wise addition.
    VecAdd,
    /// Non-zero real vectors of length `--dimension` under component-wise
    /// multiplication.
    VecMul,
    /// Permutations of `0..--dimension` under composition.
    Perm,
}

impl GroupKind {
    /// Returns `true` if this group needs `--dimension`.
    pub fn needs_dimension(self) -> bool {
        matches!(self, Self::VecAdd | Self::VecMul | Self::Perm)
    }

    /// The flag value naming this group.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RealMul => "real-mul",
            Self::RealAdd => "real-add",
            Self::IntAdd => "int-add",
            Self::VecAdd => "vec-add",
            Self::VecMul => "vec-mul",
            Self::Perm => "perm",
        }
    }
}

/// Parses a `NODE=N` per-node visit cap.
pub fn parse_node_cap(s: &str) -> Result<(String, usize), String> {
    let (node, cap) = s
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NODE=N, got {s:?}"))?;
    if node.is_empty() {
        return Err(format!("missing node name in {s:?}"));
    }
    let cap = cap
        .parse::<usize>()
        .map_err(|e| format!("invalid visit count in {s:?}: {e}"))?;
    Ok((node.to_owned(), cap))
}

/// All top-level subcommands exposed by the `wgraph` binary.
#[derive(Subcommand)]
pub enum Command {
    /// Print summary statistics for a graph.
    Inspect {
        /// Path to an adjacency JSON file, or `-` for stdin.
        #[arg(value_name = "FILE")]
        file: PathOrStdin,
    },

    /// Enumerate paths between two nodes under visit limits.
    Paths {
        /// Path to an adjacency JSON file, or `-` for stdin.
        #[arg(value_name = "FILE")]
        file: PathOrStdin,
        /// Start node.
        #[arg(value_name = "FROM")]
        from: String,
        /// End node.
        #[arg(value_name = "TO")]
        to: String,
        /// How many times any node may be visited (default: 1, simple paths).
        #[arg(long, default_value = "1")]
        max_visits: usize,
        /// Visit cap for a single node, overriding `--max-visits` (repeatable).
        #[arg(long = "visits", value_name = "NODE=N", value_parser = parse_node_cap)]
        visits: Vec<(String, usize)>,
        /// Search iteration budget; the search stops with partial results
        /// once it is spent (default: 1000).
        #[arg(long, default_value = "1000")]
        max_iterations: usize,
        /// Stop after this many paths (default: unlimited).
        #[arg(long)]
        max_paths: Option<usize>,
        /// Also report the composed weight of each path.
        #[arg(long)]
        weights: bool,
    },

    /// List cycles through one node, or every cycle of the graph.
    Cycles {
        /// Path to an adjacency JSON file, or `-` for stdin.
        #[arg(value_name = "FILE")]
        file: PathOrStdin,
        /// Only list cycles through this node.
        #[arg(value_name = "NODE")]
        node: Option<String>,
        /// Stop after this many cycles (default: unlimited).
        #[arg(long)]
        max_cycles: Option<usize>,
        /// Iteration budget of each per-node cycle search (default: 1000).
        #[arg(long, default_value = "1000")]
        max_iterations: usize,
        /// Also report the composed weight of each cycle.
        #[arg(long)]
        weights: bool,
    },

    /// Compose the edge weights along a sequence of nodes.
    Weight {
        /// Path to an adjacency JSON file, or `-` for stdin.
        #[arg(value_name = "FILE")]
        file: PathOrStdin,
        /// Nodes of the path, in traversal order.
        #[arg(value_name = "NODE", num_args = 1.., required = true)]
        nodes: Vec<String>,
    },

    /// Check that every cycle composes to the identity.
    Commutative {
        /// Path to an adjacency JSON file, or `-` for stdin.
        #[arg(value_name = "FILE")]
        file: PathOrStdin,
        /// Iteration budget of each per-node cycle search; running out
        /// makes the answer inconclusive (default: 1000).
        #[arg(long, default_value = "1000")]
        max_iterations: usize,
    },
}

impl Command {
    /// The input file of the subcommand.
    pub fn file(&self) -> &PathOrStdin {
        match self {
            Self::Inspect { file }
            | Self::Paths { file, .. }
            | Self::Cycles { file, .. }
            | Self::Weight { file, .. }
            | Self::Commutative { file, .. } => file,
        }
    }
}

/// Root CLI struct for the `wgraph` binary.
///
/// All global flags are defined here and marked `global = true` so that clap
/// propagates them to every subcommand.
#[derive(Parser)]
#[command(
    name = "wgraph",
    version,
    about = "Group-weighted directed graph toolkit",
    long_about = "Searches and checks directed graphs whose edges are weighted by\n\
                  elements of a group. Input files are JSON objects mapping\n\
                  start node -> end node -> weight."
)]
pub struct Cli {
    /// Active subcommand.
    #[command(subcommand)]
    pub command: Command,

    /// Output format: human (default) or json.
    #[arg(long, short = 'f', default_value = "human", global = true)]
    pub format: OutputFormat,

    /// Group of the edge weights.
    #[arg(long, short = 'g', default_value = "real-mul", global = true)]
    pub group: GroupKind,

    /// Vector length or permutation degree for `vec-add`, `vec-mul` and
    /// `perm`.
    #[arg(long, short = 'd', global = true)]
    pub dimension: Option<usize>,

    /// Suppress all stderr output except errors (incompatible with `--verbose`).
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log search progress to stderr (incompatible with `--quiet`).
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Maximum input file size in bytes.
    ///
    /// Can also be set via the `WGRAPH_MAX_FILE_SIZE` environment variable.
    /// The CLI flag takes precedence over the environment variable.
    /// Default: 268435456 (256 MB).
    #[arg(
        long,
        global = true,
        env = "WGRAPH_MAX_FILE_SIZE",
        default_value = "268435456"
    )]
    pub max_file_size: u64,
}

impl Cli {
    /// Installs the stderr log subscriber.
    ///
    /// `RUST_LOG` wins when set. Otherwise `--verbose` logs at `debug`,
    /// `--quiet` at `error`, and the default is `warn`.
    pub fn init_logging(&self) {
        use tracing_subscriber::{EnvFilter, fmt};

        let level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
}
