//! Integration tests for `wgraph paths`.
#![allow(clippy::expect_used)]

use std::path::PathBuf;
use std::process::{Command, Output};

/// Path to the compiled `wgraph` binary.
fn wgraph_bin() -> PathBuf {
    let mut path = std::env::current_exe().expect("current exe");
    // current_exe is something like …/deps/cmd_paths-<hash>
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
        .expect("run wgraph paths")
}

fn lines(out: &Output) -> Vec<String> {
    String::from_utf8_lossy(&out.stdout)
        .lines()
        .map(str::to_owned)
        .collect()
}

// ---------------------------------------------------------------------------
// paths: human mode
// ---------------------------------------------------------------------------

#[test]
fn paths_simple_are_listed_shortest_first() {
    let file = fixture("exchange.json");
    let out = run(&["paths", file.to_str().expect("path"), "A", "D"]);
    assert!(out.status.success(), "exit code: {:?}", out.status.code());
    assert_eq!(lines(&out), ["A -> C -> D", "A -> B -> C -> D"]);
}

#[test]
fn paths_with_weights() {
    let file = fixture("balanced.json");
    let out = run(&["paths", file.to_str().expect("path"), "A", "C", "--weights"]);
    assert!(out.status.success(), "exit code: {:?}", out.status.code());
    assert_eq!(lines(&out), ["A -> B -> C: 8.0"]);
}

#[test]
fn paths_node_visit_cap_finds_cycles() {
    let file = fixture("exchange.json");
    let out = run(&["paths", file.to_str().expect("path"), "A", "A", "--visits", "A=2"]);
    assert!(out.status.success(), "exit code: {:?}", out.status.code());
    let found = lines(&out);
    assert_eq!(found.len(), 4, "stdout: {found:?}");
    assert_eq!(found[0], "A -> C -> A");
}

#[test]
fn paths_max_paths_keeps_the_first() {
    let file = fixture("exchange.json");
    let out = run(&["paths", file.to_str().expect("path"), "A", "D", "--max-paths", "1"]);
    assert!(out.status.success(), "exit code: {:?}", out.status.code());
    assert_eq!(lines(&out), ["A -> C -> D"]);
}

// ---------------------------------------------------------------------------
// paths: JSON mode
// ---------------------------------------------------------------------------

#[test]
fn paths_json_reports_status() {
    let file = fixture("exchange.json");
    let out = run(&["paths", file.to_str().expect("path"), "A", "D", "-f", "json"]);
    assert!(out.status.success(), "exit code: {:?}", out.status.code());
    let value: serde_json::Value =
        serde_json::from_slice(&out.stdout).expect("stdout is JSON");
    assert_eq!(value["count"], 2);
    assert_eq!(value["status"], "exhausted");
    assert_eq!(value["paths"][0]["nodes"], serde_json::json!(["A", "C", "D"]));
    assert!(value["paths"][0].get("weight").is_none());
}

#[test]
fn paths_json_reports_path_limit() {
    let file = fixture("exchange.json");
    let out = run(&[
        "paths",
        file.to_str().expect("path"),
        "A",
        "D",
        "--max-paths",
        "1",
        "--format",
        "json",
    ]);
    let value: serde_json::Value =
        serde_json::from_slice(&out.stdout).expect("stdout is JSON");
    assert_eq!(value["count"], 1);
    assert_eq!(value["status"], "path_limit_reached");
}

// ---------------------------------------------------------------------------
// paths: failures
// ---------------------------------------------------------------------------

#[test]
fn paths_start_equals_end_without_caps_finds_nothing() {
    let file = fixture("exchange.json");
    let out = run(&["paths", file.to_str().expect("path"), "A", "A"]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("no results"), "stderr: {stderr}");
}

#[test]
fn paths_unreachable_exit_1() {
    let file = fixture("integers.json");
    let out = run(&["paths", file.to_str().expect("path"), "a", "d", "-g", "int-add"]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn paths_unknown_node_exit_1() {
    let file = fixture("exchange.json");
    let out = run(&["paths", file.to_str().expect("path"), "A", "Z"]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("not found: Z"), "stderr: {stderr}");
}

#[test]
fn paths_malformed_visit_cap_exit_2() {
    let file = fixture("exchange.json");
    let out = run(&["paths", file.to_str().expect("path"), "A", "D", "--visits", "A"]);
    assert_eq!(out.status.code(), Some(2));
}
