#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod edge;
pub mod graph;
pub mod group;
pub mod path;

pub use edge::WeightedEdge;
pub use graph::{
    Commutativity, CommutativityReport, CycleOutcome, DEFAULT_MAX_ITERATIONS, DEFAULT_MAX_VISITS,
    GraphError, PathExplorer, SearchConfig, SearchOutcome, SearchStatus, WeightedGraph,
    commutativity_violations, commutativity_violations_with, cycles, cycles_through,
    cycles_through_with, cycles_with, find_paths, is_commutative, is_commutative_with,
    path_weight,
};
pub use group::{
    FnGroup, Group, IntegerAdditive, Permutations, RealAdditive, RealMultiplicative,
    VectorAdditive, VectorMultiplicative,
};
pub use path::{Cycle, Path, SequenceError};
