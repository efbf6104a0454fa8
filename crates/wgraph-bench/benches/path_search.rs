//! Bounded path search and cycle enumeration benchmarks (`find_paths`,
//! `cycles_through`, `cycles`).
#![allow(clippy::expect_used)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use wgraph_bench::{SizeTier, generate_exchange_graph, node_label};
use wgraph_core::{
    RealMultiplicative, SearchConfig, WeightedGraph, cycles, cycles_through, find_paths,
};

struct Setup {
    graph: WeightedGraph<RealMultiplicative>,
    first: String,
    last: String,
}

fn setup(tier: SizeTier) -> Setup {
    let config = tier.config(42);
    let graph = generate_exchange_graph(&config).expect("builds");
    Setup {
        graph,
        first: node_label(0),
        last: node_label(config.num_nodes - 1),
    }
}

const TIERS: [(&str, SizeTier); 3] = [
    ("S", SizeTier::Small),
    ("M", SizeTier::Medium),
    ("L", SizeTier::Large),
];

fn bench_find_paths(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_paths");

    for (name, tier) in TIERS {
        let s = setup(tier);

        let simple = SearchConfig::default();
        group.bench_function(BenchmarkId::new("simple", name), |b| {
            b.iter(|| find_paths(&s.graph, &s.first, &s.last, &simple).expect("works"));
        });

        let revisiting = SearchConfig::default().with_max_visits(2);
        group.bench_function(BenchmarkId::new("max_visits_2", name), |b| {
            b.iter(|| find_paths(&s.graph, &s.first, &s.last, &revisiting).expect("works"));
        });

        let first_only = SearchConfig::default().with_max_paths(1);
        group.bench_function(BenchmarkId::new("first_path", name), |b| {
            b.iter(|| find_paths(&s.graph, &s.first, &s.last, &first_only).expect("works"));
        });
    }

    group.finish();
}

fn bench_cycles(c: &mut Criterion) {
    let mut group = c.benchmark_group("cycles");

    for (name, tier) in TIERS {
        let s = setup(tier);

        group.bench_function(BenchmarkId::new("through_node", name), |b| {
            b.iter(|| cycles_through(&s.graph, &s.first, None).expect("works"));
        });

        group.bench_function(BenchmarkId::new("whole_graph", name), |b| {
            b.iter(|| cycles(&s.graph).expect("works"));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_find_paths, bench_cycles);
criterion_main!(benches);
