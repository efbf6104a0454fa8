//! Implementation of `wgraph commutative <file>`.
//!
//! Completes the graph with the inverse of every one-way edge and checks that
//! every cycle composes to the group identity. Each violating cycle is listed
//! with the weight it composes to.
//!
//! Cycles are enumerated by bounded searches (`--max-iterations`, default
//! 1000, per start node). If a search runs out of budget before any violation
//! turns up, the answer is `inconclusive` rather than `commutative`.
//!
//! Output (human mode): `commutative`, `inconclusive`, or `not commutative`
//! followed by one `<cycle>: <weight>` line per violation.
//! Output (JSON mode): `{"commutative": bool, "verdict": "holds" | "violated" |
//! "inconclusive", "status": "...", "violations": [{"nodes": [...],
//! "weight": w}]}`.
//!
//! Exit codes: 0 = commutative, 1 = not commutative or inconclusive,
//! 2 = load failure.
use serde::Serialize;
use wgraph_core::{
    Commutativity, Cycle, Group, SearchConfig, SearchStatus, WeightedGraph,
    commutativity_violations_with,
};

use crate::OutputFormat;
use crate::cmd::{render_weight, stdout_error, write_json};
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct Violation<E> {
    #[serde(flatten)]
    cycle: Cycle,
    weight: E,
}

#[derive(Debug, Serialize)]
struct CommutativityReport<E> {
    commutative: bool,
    verdict: Commutativity,
    status: SearchStatus,
    violations: Vec<Violation<E>>,
}

/// Runs the `commutative` command.
///
/// The report is printed in every outcome.
///
/// # Errors
///
/// - [`CliError::NotCommutative`] (exit 1) if any cycle violates the
///   identity.
/// - [`CliError::Inconclusive`] (exit 1) if no violation was found but a
///   cycle search hit `max_iterations`.
pub fn run<G>(
    graph: &WeightedGraph<G>,
    max_iterations: usize,
    format: OutputFormat,
) -> Result<(), CliError>
where
    G: Group,
    G::Element: Serialize,
{
    let config = SearchConfig::default().with_max_iterations(max_iterations);
    let found = commutativity_violations_with(graph, &config)?;
    let verdict = found.verdict();
    let violations: Vec<Violation<G::Element>> = found
        .violations
        .into_iter()
        .map(|(cycle, weight)| Violation { cycle, weight })
        .collect();
    let count = violations.len();
    let report = CommutativityReport {
        commutative: verdict.holds(),
        verdict,
        status: found.status,
        violations,
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Human => print_human(&mut out, &report),
        OutputFormat::Json => write_json(&mut out, &report),
    }
    .map_err(|e| stdout_error(&e))?;

    match verdict {
        Commutativity::Holds => Ok(()),
        Commutativity::Violated => Err(CliError::NotCommutative { violations: count }),
        Commutativity::Inconclusive => Err(CliError::Inconclusive { max_iterations }),
    }
}

fn print_human<W, E>(w: &mut W, report: &CommutativityReport<E>) -> std::io::Result<()>
where
    W: std::io::Write,
    E: Serialize + std::fmt::Debug,
{
    match report.verdict {
        Commutativity::Holds => writeln!(w, "commutative"),
        Commutativity::Inconclusive => writeln!(w, "inconclusive"),
        Commutativity::Violated => {
            writeln!(w, "not commutative")?;
            for violation in &report.violations {
                writeln!(w, "{}: {}", violation.cycle, render_weight(&violation.weight))?;
            }
            Ok(())
        }
    }
}
