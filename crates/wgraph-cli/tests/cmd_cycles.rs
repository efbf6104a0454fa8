//! Integration tests for `wgraph cycles`.
#![allow(clippy::expect_used)]

use std::path::PathBuf;
use std::process::{Command, Output};

/// Path to the compiled `wgraph` binary.
fn wgraph_bin() -> PathBuf {
    let mut path = std::env::current_exe().expect("current exe");
    // current_exe is something like …/deps/cmd_cycles-<hash>
    // The binary lives in the parent directory.
    path.pop();
    if path.ends_with("deps") {
        path.pop();
    }
    path.push("wgraph");
    path
}

/// Path to a shared fixture file.
fn fixture(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    // CARGO_MANIFEST_DIR is .../crates/wgraph-cli; fixtures are in tests/fixtures
    // relative to the workspace root.
    path.push("../../tests/fixtures");
    path.push(name);
    path
}

fn run(args: &[&str]) -> Output {
    Command::new(wgraph_bin())
        .args(args)
        .output()
        .expect("run wgraph cycles")
}

fn lines(out: &Output) -> Vec<String> {
    String::from_utf8_lossy(&out.stdout)
        .lines()
        .map(str::to_owned)
        .collect()
}

#[test]
fn cycles_of_the_whole_graph_in_canonical_order() {
    let file = fixture("exchange.json");
    let out = run(&["cycles", file.to_str().expect("path")]);
    assert!(out.status.success(), "exit code: {:?}", out.status.code());
    assert_eq!(
        lines(&out),
        [
            "A -> B -> C -> A",
            "A -> B -> C -> D -> E -> A",
            "A -> C -> A",
            "A -> C -> D -> E -> A",
            "C -> D -> E -> C",
        ]
    );
}

#[test]
fn cycles_through_node_in_discovery_order() {
    let file = fixture("exchange.json");
    let out = run(&["cycles", file.to_str().expect("path"), "A"]);
    assert!(out.status.success(), "exit code: {:?}", out.status.code());
    assert_eq!(
        lines(&out),
        [
            "A -> C -> A",
            "A -> B -> C -> A",
            "A -> C -> D -> E -> A",
            "A -> B -> C -> D -> E -> A",
        ]
    );
}

#[test]
fn cycles_max_cycles_truncates() {
    let file = fixture("exchange.json");
    let out = run(&["cycles", file.to_str().expect("path"), "A", "--max-cycles", "2"]);
    assert!(out.status.success(), "exit code: {:?}", out.status.code());
    assert_eq!(lines(&out).len(), 2);
}

#[test]
fn cycles_with_weights() {
    let file = fixture("balanced.json");
    let out = run(&["cycles", file.to_str().expect("path"), "A", "--weights"]);
    assert!(out.status.success(), "exit code: {:?}", out.status.code());
    assert_eq!(lines(&out), ["A -> B -> A: 1.0", "A -> B -> C -> A: 1.0"]);
}

#[test]
fn cycles_json_uses_canonical_nodes() {
    let file = fixture("unbalanced.json");
    let out = run(&["cycles", file.to_str().expect("path"), "B", "-f", "json"]);
    assert!(out.status.success(), "exit code: {:?}", out.status.code());
    let value: serde_json::Value =
        serde_json::from_slice(&out.stdout).expect("stdout is JSON");
    assert_eq!(value["count"], 1);
    assert_eq!(value["status"], "exhausted");
    assert_eq!(value["cycles"][0]["nodes"], serde_json::json!(["A", "B"]));
}

#[test]
fn cycles_acyclic_graph_prints_nothing() {
    let file = fixture("integers.json");
    let out = run(&["cycles", file.to_str().expect("path"), "-g", "int-add"]);
    assert!(out.status.success(), "exit code: {:?}", out.status.code());
    assert!(out.stdout.is_empty());
}

#[test]
fn cycles_unknown_node_exit_1() {
    let file = fixture("exchange.json");
    let out = run(&["cycles", file.to_str().expect("path"), "Q"]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn cycles_json_reports_a_spent_budget() {
    let file = fixture("ring-clique.json");
    let out = run(&[
        "cycles",
        file.to_str().expect("path"),
        "R00",
        "-g",
        "int-add",
        "--max-iterations",
        "10",
        "-f",
        "json",
    ]);
    assert!(out.status.success(), "exit code: {:?}", out.status.code());
    let value: serde_json::Value =
        serde_json::from_slice(&out.stdout).expect("stdout is JSON");
    assert_eq!(value["status"], "iteration_limit_reached");
}
