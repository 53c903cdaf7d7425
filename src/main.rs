//! Binary entrypoint for the `htmldown` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    match htmldown::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
