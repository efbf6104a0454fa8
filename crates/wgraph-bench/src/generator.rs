//! Seeded graph generators.
//!
//! - [`generate_exchange_graph`]: random real multiplicative weights, which
//!   almost never compose to the identity around a cycle.
//! - [`generate_potential_graph`]: integer weights derived from a random
//!   potential per node, so every cycle sums to zero and the graph is
//!   commutative by construction.
//!
//! Both share the same topology for a given config: each node gets up to
//! `out_degree` distinct random successors, never itself.

use std::collections::BTreeSet;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use wgraph_core::{GraphError, IntegerAdditive, RealMultiplicative, WeightedGraph};

/// Configuration for the graph generators.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Seed for the random number generator (deterministic).
    pub seed: u64,
    /// Number of nodes.
    pub num_nodes: usize,
    /// Number of successors drawn per node. Duplicate draws and self-loops
    /// are discarded, so the actual out-degree can be lower.
    pub out_degree: usize,
}

/// Predefined size tiers for benchmarking.
///
/// Cycle enumeration grows exponentially with density, so even `Large` is
/// small.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeTier {
    /// 8 nodes, out-degree 2.
    Small,
    /// 16 nodes, out-degree 3.
    Medium,
    /// 32 nodes, out-degree 4.
    Large,
}

impl SizeTier {
    /// Returns the default `GeneratorConfig` for this size tier.
    pub fn config(self, seed: u64) -> GeneratorConfig {
        let (num_nodes, out_degree) = match self {
            SizeTier::Small => (8, 2),
            SizeTier::Medium => (16, 3),
            SizeTier::Large => (32, 4),
        };
        GeneratorConfig {
            seed,
            num_nodes,
            out_degree,
        }
    }
}

/// Label of the `i`-th generated node. Zero-padded so that lexicographic and
/// numeric order agree.
pub fn node_label(i: usize) -> String {
    format!("n{i:04}")
}

/// Generates a graph over the non-zero reals with weights in `[0.5, 2.0)`.
///
/// # Errors
///
/// Propagates graph construction errors; the generated adjacency never
/// produces any.
pub fn generate_exchange_graph(
    config: &GeneratorConfig,
) -> Result<WeightedGraph<RealMultiplicative>, GraphError> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let topology = random_topology(&mut rng, config);

    let adjacency: Vec<_> = topology
        .into_iter()
        .enumerate()
        .map(|(i, targets)| {
            let edges: Vec<(String, f64)> = targets
                .into_iter()
                .map(|j| (node_label(j), rng.gen_range(0.5..2.0)))
                .collect();
            (node_label(i), edges)
        })
        .collect();
    WeightedGraph::from_adjacency(adjacency, RealMultiplicative)
}

/// Generates an integer graph where the weight of `a → b` is
/// `potential(b) - potential(a)`.
///
/// # Errors
///
/// Propagates graph construction errors; the generated adjacency never
/// produces any.
pub fn generate_potential_graph(
    config: &GeneratorConfig,
) -> Result<WeightedGraph<IntegerAdditive>, GraphError> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let topology = random_topology(&mut rng, config);
    let potentials: Vec<i64> = (0..config.num_nodes)
        .map(|_| rng.gen_range(-1_000..=1_000))
        .collect();

    let adjacency: Vec<_> = topology
        .into_iter()
        .enumerate()
        .map(|(i, targets)| {
            let edges: Vec<(String, i64)> = targets
                .into_iter()
                .map(|j| (node_label(j), potentials[j] - potentials[i]))
                .collect();
            (node_label(i), edges)
        })
        .collect();
    WeightedGraph::from_adjacency(adjacency, IntegerAdditive)
}

/// Successor indices of every node.
fn random_topology(rng: &mut StdRng, config: &GeneratorConfig) -> Vec<BTreeSet<usize>> {
    let n = config.num_nodes;
    (0..n)
        .map(|i| {
            if n < 2 {
                return BTreeSet::new();
            }
            (0..config.out_degree)
                .map(|_| rng.gen_range(0..n))
                .filter(|&j| j != i)
                .collect()
        })
        .collect()
}
