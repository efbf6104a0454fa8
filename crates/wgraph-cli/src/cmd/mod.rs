/// Command module for the `wgraph` CLI.
///
/// Each submodule implements one subcommand. Its `run` function takes the
/// loaded graph and the parsed arguments and returns `Ok(())` on success or a
/// [`crate::error::CliError`] on failure.
pub mod commutative;
pub mod cycles;
pub mod inspect;
pub mod paths;
pub mod weight;

use std::io::Write;

use serde::Serialize;

use crate::error::CliError;

/// Renders a group element as compact JSON, e.g. `2.5` or `[1.0,2.0]`.
pub(crate) fn render_weight<E: Serialize + std::fmt::Debug>(weight: &E) -> String {
    serde_json::to_string(weight).unwrap_or_else(|_| format!("{weight:?}"))
}

/// Writes `value` as pretty-printed JSON followed by a newline.
pub(crate) fn write_json<W: Write, T: Serialize>(w: &mut W, value: &T) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(std::io::Error::other)?;
    writeln!(w, "{json}")
}

/// Converts a failed write to stdout into a [`CliError`].
pub(crate) fn stdout_error(e: &std::io::Error) -> CliError {
    CliError::IoError {
        source: "stdout".to_owned(),
        detail: e.to_string(),
    }
}
