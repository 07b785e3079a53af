//! Runs every probe binary in turn and concatenates their reports.

use std::env::consts::EXE_SUFFIX;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use strum::IntoEnumIterator;
use tokio::process::Command;

use crate::config::Opt;
use crate::probes::Probe;

const BLOCK_RULE: &str = "=================================================";
const BLOCK_TRAILER: &str = "\n\n\n\n\n\n";

/// Runs every probe found next to the current executable against `opt.url`.
///
/// # Errors
///
/// Returns an error if the executable's directory cannot be determined or
/// `out` cannot be written. A probe that fails to start is reported in-line.
pub async fn run_all<W: Write>(opt: &Opt, out: &mut W) -> Result<()> {
    let dir = probe_directory().context("Failed to locate probe binaries")?;
    log::debug!("Running probes from {}", dir.display());
    run_all_in(&dir, opt, out)
        .await
        .context("Failed to write combined report")
}

fn probe_directory() -> io::Result<PathBuf> {
    let exe = std::env::current_exe()?;
    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} has no parent directory", exe.display()),
        )
    })
}

/// Runs every probe binary in `dir`, in catalogue order, writing one block per probe.
///
/// Each block is a header line, a blank line, the probe's stdout followed by its
/// stderr, then six newlines.
pub async fn run_all_in<W: Write>(dir: &Path, opt: &Opt, out: &mut W) -> io::Result<()> {
    for probe in Probe::iter() {
        let name = probe.binary_name();
        write!(out, "// {name} {BLOCK_RULE}\n\n")?;

        let path = dir.join(format!("{name}{EXE_SUFFIX}"));
        match probe_command(&path, opt).output().await {
            Ok(output) => {
                log::info!("{name} finished with {}", output.status);
                out.write_all(&output.stdout)?;
                out.write_all(&output.stderr)?;
            }
            Err(e) => {
                log::warn!("Failed to spawn {}: {e}", path.display());
                write!(out, "Failed to run {name}")?;
            }
        }

        out.write_all(BLOCK_TRAILER.as_bytes())?;
        out.flush()?;
    }
    Ok(())
}

fn probe_command(path: &Path, opt: &Opt) -> Command {
    let mut command = Command::new(path);
    command
        .arg(&opt.url)
        .arg("--timeout-seconds")
        .arg(opt.timeout_seconds.to_string());
    if let Some(level) = opt.log_level.to_possible_value() {
        command.arg("--log-level").arg(level.get_name());
    }
    if let Some(format) = opt.log_format.to_possible_value() {
        command.arg("--log-format").arg(format.get_name());
    }
    command.kill_on_drop(true);
    command
}
