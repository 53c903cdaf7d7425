//! Command dispatch and handlers.

pub mod convert;

use crate::cli::Cli;

/// Dispatch parsed arguments to the conversion handler.
///
/// # Errors
///
/// Returns an error string if reading the input, converting it, or
/// writing the output fails.
pub fn dispatch(cli: &Cli) -> Result<(), String> {
    convert::run(cli.input.as_deref(), cli.output.as_deref(), cli.ast)
}
