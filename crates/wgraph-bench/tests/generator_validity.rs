//! Tests that generated graphs are deterministic, well formed, and that the
//! potential generator is commutative across tiers and seeds.
#![allow(clippy::expect_used)]

use proptest::prelude::*;
use wgraph_bench::{
    GeneratorConfig, SizeTier, generate_exchange_graph, generate_potential_graph, node_label,
};
use wgraph_core::{
    Commutativity, Group, SearchConfig, WeightedGraph, is_commutative, is_commutative_with,
};

/// Enough iterations to exhaust every cycle search on a small-tier graph.
fn exhaustive() -> SearchConfig {
    SearchConfig::default().with_max_iterations(100_000)
}

fn edge_list<G: Group>(graph: &WeightedGraph<G>) -> Vec<(String, String, G::Element)> {
    graph
        .edges()
        .into_iter()
        .map(|e| (e.start().to_owned(), e.end().to_owned(), e.weight().clone()))
        .collect()
}

fn endpoints<G: Group>(graph: &WeightedGraph<G>) -> Vec<(String, String)> {
    graph
        .edges()
        .into_iter()
        .map(|e| (e.start().to_owned(), e.end().to_owned()))
        .collect()
}

#[test]
fn same_seed_yields_the_same_graph() {
    for tier in [SizeTier::Small, SizeTier::Medium, SizeTier::Large] {
        let a = generate_exchange_graph(&tier.config(7)).expect("builds");
        let b = generate_exchange_graph(&tier.config(7)).expect("builds");
        assert_eq!(edge_list(&a), edge_list(&b), "{tier:?}");
    }
}

#[test]
fn generators_share_topology() {
    let config = SizeTier::Medium.config(99);
    let exchange = generate_exchange_graph(&config).expect("builds");
    let potential = generate_potential_graph(&config).expect("builds");
    assert_eq!(endpoints(&exchange), endpoints(&potential));
}

#[test]
fn generated_graphs_are_well_formed() {
    for seed in [1, 42, 123, 999] {
        let config = SizeTier::Medium.config(seed);
        let graph = generate_exchange_graph(&config).expect("builds");
        assert_eq!(graph.node_count(), config.num_nodes);
        for i in 0..config.num_nodes {
            let label = node_label(i);
            let children = graph.children(&label).expect("known node");
            assert!(children.len() <= config.out_degree, "seed={seed} {label}");
            assert!(!children.contains(label.as_str()), "seed={seed} self loop");
        }
        for (_, _, weight) in edge_list(&graph) {
            assert!((0.5..2.0).contains(&weight), "seed={seed} weight={weight}");
        }
    }
}

#[test]
fn tiny_configs_build() {
    for num_nodes in [0, 1, 2] {
        let config = GeneratorConfig {
            seed: 3,
            num_nodes,
            out_degree: 4,
        };
        let graph = generate_potential_graph(&config).expect("builds");
        assert_eq!(graph.node_count(), num_nodes);
        if num_nodes < 2 {
            assert_eq!(graph.edge_count(), 0);
        }
    }
}

#[test]
fn potential_graphs_are_commutative() {
    for seed in [42, 123, 999, 7777, 54321] {
        let graph = generate_potential_graph(&SizeTier::Small.config(seed)).expect("builds");
        assert_eq!(
            is_commutative_with(&graph, &exhaustive()).expect("well formed"),
            Commutativity::Holds,
            "Small/seed={seed}"
        );
    }
    // Medium-tier cycle searches may run out of budget; they must never
    // turn up a violation.
    let graph = generate_potential_graph(&SizeTier::Medium.config(42)).expect("builds");
    assert_ne!(
        is_commutative(&graph).expect("well formed"),
        Commutativity::Violated,
        "Medium/seed=42"
    );
}

#[test]
fn perturbed_potential_graph_is_not_commutative() {
    let mut graph = generate_potential_graph(&SizeTier::Small.config(42)).expect("builds");
    let (start, end, weight) = edge_list(&graph)
        .into_iter()
        .next()
        .expect("has edges");

    if graph.weight(&end, &start).expect("known").is_none() {
        graph
            .add_edge(end.clone(), start.clone(), -weight)
            .expect("new edge");
    }
    assert_eq!(
        is_commutative_with(&graph, &exhaustive()).expect("well formed"),
        Commutativity::Holds
    );

    graph.delete_edge(&start, &end).expect("exists");
    graph.add_edge(start, end, weight + 1).expect("new edge");
    assert_eq!(
        is_commutative(&graph).expect("well formed"),
        Commutativity::Violated
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn any_seed_gives_a_commutative_potential_graph(seed in any::<u64>()) {
        let graph = generate_potential_graph(&SizeTier::Small.config(seed)).expect("builds");
        prop_assert_eq!(
            is_commutative_with(&graph, &exhaustive()).expect("well formed"),
            Commutativity::Holds
        );
    }
}
