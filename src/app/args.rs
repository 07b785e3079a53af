//! Command-line parsing with the probes' exit-code convention.

use std::process::ExitCode;

use clap::Parser;

use crate::config::Opt;

/// Parses the process arguments.
///
/// `--help` and `--version` print to stdout and yield `Err(ExitCode::SUCCESS)`.
/// Usage errors print to stderr and yield exit status 1, never clap's default 2.
pub fn parse_args() -> Result<Opt, ExitCode> {
    Opt::try_parse().map_err(|e| {
        if let Err(print_error) = e.print() {
            log::error!("Failed to print usage: {print_error}");
        }
        ExitCode::from(usage_exit_status(&e))
    })
}

fn usage_exit_status(error: &clap::Error) -> u8 {
    if error.use_stderr() {
        1
    } else {
        0
    }
}

#[cfg(test)]
fn parse_from<I, T>(args: I) -> Result<Opt, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Opt::try_parse_from(args)
}
