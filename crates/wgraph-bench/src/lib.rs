//! Random weighted graph generator and benchmark utilities for `wgraph-core`.
//!
//! Every generator is seeded, so a given [`GeneratorConfig`] always yields
//! the same graph.

pub mod generator;

pub use generator::{
    GeneratorConfig, SizeTier, generate_exchange_graph, generate_potential_graph, node_label,
};
