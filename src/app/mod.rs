//! Process-level entry points shared by the probe binaries.
//!
//! Each binary is a one-line `main` that hands its [`Probe`] to [`run_probe`]
//! (or calls [`run_composer`]). This module owns argument parsing, logger and
//! crypto initialisation, stdout handling and the mapping from errors to exit
//! status.

mod args;

use std::io::{self, Write};
use std::process::ExitCode;

use crate::config::Opt;
use crate::error_handling::ProbeError;
use crate::initialization::{init_crypto_provider, init_logger_with};
use crate::probes::Probe;

pub use args::parse_args;

/// Parses arguments and initialises process-wide state.
fn start(name: &str) -> Result<Opt, ExitCode> {
    let opt = parse_args()?;
    if let Err(e) = init_logger_with(opt.log_level.clone().into(), opt.log_format.clone()) {
        eprintln!("{name}: Failed to initialize logger: {e}");
        return Err(ExitCode::FAILURE);
    }
    init_crypto_provider();
    Ok(opt)
}

/// Runs `probe` as a complete program: parse arguments, print the report to
/// stdout and turn any failure into `<probe>: <error>` on stderr and exit status 1.
pub async fn run_probe(probe: Probe) -> ExitCode {
    let opt = match start(probe.binary_name()) {
        Ok(opt) => opt,
        Err(code) => return code,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = probe.run(&opt, &mut out).await;
    let flushed = out.flush().map_err(ProbeError::from);

    match result.and(flushed) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("{probe} failed: {e:?}");
            eprintln!("{probe}: {}", e.chain());
            exit_code(&e)
        }
    }
}

/// Runs every probe binary and prints the combined report.
pub async fn run_composer() -> ExitCode {
    const NAME: &str = "run_all";
    let opt = match start(NAME) {
        Ok(opt) => opt,
        Err(code) => return code,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match crate::compose::run_all(&opt, &mut out).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{NAME}: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn exit_code(error: &ProbeError) -> ExitCode {
    u8::try_from(error.exit_code()).map_or(ExitCode::FAILURE, ExitCode::from)
}
