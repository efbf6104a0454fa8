//! Integration tests for `wgraph weight`.
#![allow(clippy::expect_used)]

use std::path::PathBuf;
use std::process::{Command, Output};

/// Path to the compiled `wgraph` binary.
fn wgraph_bin() -> PathBuf {
    let mut path = std::env::current_exe().expect("current exe");
    // current_exe is something like …/deps/cmd_weight-<hash>
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
        .expect("run wgraph weight")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).trim_end().to_owned()
}

#[test]
fn weight_composes_real_weights() {
    let file = fixture("balanced.json");
    let out = run(&["weight", file.to_str().expect("path"), "A", "B", "C"]);
    assert!(out.status.success(), "exit code: {:?}", out.status.code());
    assert_eq!(stdout(&out), "8.0");
}

#[test]
fn weight_of_single_node_is_identity() {
    let file = fixture("exchange.json");
    let out = run(&["weight", file.to_str().expect("path"), "C"]);
    assert!(out.status.success(), "exit code: {:?}", out.status.code());
    assert_eq!(stdout(&out), "1.0");
}

#[test]
fn weight_composes_integer_weights() {
    let file = fixture("integers.json");
    let out = run(&["weight", file.to_str().expect("path"), "a", "b", "c", "-g", "int-add"]);
    assert!(out.status.success(), "exit code: {:?}", out.status.code());
    assert_eq!(stdout(&out), "3");
}

#[test]
fn weight_composes_vector_weights() {
    let file = fixture("vectors.json");
    let out = run(&[
        "weight",
        file.to_str().expect("path"),
        "x",
        "y",
        "z",
        "x",
        "--group",
        "vec-add",
        "--dimension",
        "2",
    ]);
    assert!(out.status.success(), "exit code: {:?}", out.status.code());
    assert_eq!(stdout(&out), "[0.0,0.0]");
}

#[test]
fn weight_json_echoes_the_path() {
    let file = fixture("balanced.json");
    let out = run(&["weight", file.to_str().expect("path"), "A", "B", "-f", "json"]);
    assert!(out.status.success(), "exit code: {:?}", out.status.code());
    let value: serde_json::Value =
        serde_json::from_slice(&out.stdout).expect("stdout is JSON");
    assert_eq!(value["path"], serde_json::json!(["A", "B"]));
    assert_eq!(value["weight"], 2.0);
}

#[test]
fn weight_missing_edge_exit_1() {
    let file = fixture("exchange.json");
    let out = run(&["weight", file.to_str().expect("path"), "A", "D"]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("A -> D"), "stderr: {stderr}");
}

#[test]
fn weight_unknown_nodes_exit_1() {
    let file = fixture("exchange.json");
    let out = run(&["weight", file.to_str().expect("path"), "A", "Q", "P"]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("P, Q"), "stderr: {stderr}");
}

#[test]
fn weight_vector_group_without_dimension_exit_2() {
    let file = fixture("vectors.json");
    let out = run(&["weight", file.to_str().expect("path"), "x", "y", "-g", "vec-add"]);
    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("--dimension"), "stderr: {stderr}");
}
