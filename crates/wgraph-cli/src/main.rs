mod cli;
mod cmd;
mod error;
mod io;
mod load;

use clap::Parser;
use serde::Serialize;
use serde::de::DeserializeOwned;
use wgraph_core::{
    Group, IntegerAdditive, Permutations, RealAdditive, RealMultiplicative, VectorAdditive,
    VectorMultiplicative,
};

pub use cli::{Cli, Command, GroupKind, OutputFormat, PathOrStdin};
use error::CliError;

fn main() {
    let cli = Cli::parse();
    cli.init_logging();

    if let Err(e) = run(&cli) {
        eprintln!("{e}");
        std::process::exit(e.exit_code());
    }
}

/// Picks the weight group and hands over to [`execute`].
fn run(cli: &Cli) -> Result<(), CliError> {
    let dimension = match (cli.dimension, cli.group.needs_dimension()) {
        (Some(d), _) => d,
        (None, false) => 0,
        (None, true) => {
            return Err(CliError::InvalidArgument {
                detail: format!("--dimension is required for --group {}", cli.group.as_str()),
            });
        }
    };

    match cli.group {
        GroupKind::RealMul => execute(cli, RealMultiplicative),
        GroupKind::RealAdd => execute(cli, RealAdditive),
        GroupKind::IntAdd => execute(cli, IntegerAdditive),
        GroupKind::VecAdd => execute(cli, VectorAdditive::new(dimension)),
        GroupKind::VecMul => execute(cli, VectorMultiplicative::new(dimension)),
        GroupKind::Perm => execute(cli, Permutations::new(dimension)),
    }
}

/// Loads the input graph over `group` and runs the subcommand on it.
fn execute<G>(cli: &Cli, group: G) -> Result<(), CliError>
where
    G: Group,
    G::Element: DeserializeOwned + Serialize,
{
    let source = cli.command.file();
    let input = io::read_input(source, cli.max_file_size)?;
    let graph = load::parse_graph(&input, &source.label(), group)?;

    match &cli.command {
        Command::Inspect { .. } => cmd::inspect::run(&graph, cli.format),
        Command::Paths {
            from,
            to,
            max_visits,
            visits,
            max_iterations,
            max_paths,
            weights,
            ..
        } => {
            let config = cmd::paths::search_config(
                &graph,
                *max_visits,
                visits,
                *max_iterations,
                *max_paths,
            );
            cmd::paths::run(&graph, from, to, &config, *weights, cli.format)
        }
        Command::Cycles {
            node,
            max_cycles,
            max_iterations,
            weights,
            ..
        } => cmd::cycles::run(
            &graph,
            node.as_deref(),
            *max_cycles,
            *max_iterations,
            *weights,
            cli.format,
        ),
        Command::Weight { nodes, .. } => cmd::weight::run(&graph, nodes, cli.format),
        Command::Commutative { max_iterations, .. } => {
            cmd::commutative::run(&graph, *max_iterations, cli.format)
        }
    }
}
