//! Status lines and `Location` targets along a redirect chain.

use std::io::{self, Write};

use crate::config::Opt;
use crate::error_handling::{InitializationError, ProbeError};
use crate::initialization::init_client;
use crate::transfer::{execute, RequestDescriptor, TraceEvent};

const LOCATION_PREFIX: &str = "location:";

/// Performs a GET that follows redirects and prints each hop's status line and
/// redirect target. The completion line is printed even when the request fails.
pub async fn run<W: Write>(opt: &Opt, out: &mut W) -> Result<(), ProbeError> {
    writeln!(out, "Performing request to: {}", opt.url)?;
    let result = print_chain(opt, out).await;
    writeln!(out, "\nRequest complete.")?;
    result
}

async fn print_chain<W: Write>(opt: &Opt, out: &mut W) -> Result<(), ProbeError> {
    let descriptor = RequestDescriptor::get(&opt.url)?
        .follow_redirects(true)
        .capture_headers(true);
    let client = init_client(opt).map_err(InitializationError::from)?;

    let mut sink = |event: TraceEvent<'_>| -> io::Result<()> {
        let TraceEvent::HeaderIn(line) = event else {
            return Ok(());
        };
        let line = String::from_utf8_lossy(line);
        if line.starts_with("HTTP/") {
            writeln!(out, "\n[Status] {}", line.trim_end())?;
        } else if let Some(target) = location_value(&line) {
            writeln!(out, "[Redirect] -> {target}")?;
        }
        Ok(())
    };
    let outcome = execute(&client, &descriptor, &mut sink, opt.timeout()).await?;
    log::info!(
        "{} reached {} after {} redirect(s)",
        opt.url,
        outcome.final_url,
        outcome.redirects
    );
    Ok(())
}

/// The trimmed value of a `Location` header line.
fn location_value(line: &str) -> Option<&str> {
    let prefix = line.get(..LOCATION_PREFIX.len())?;
    prefix
        .eq_ignore_ascii_case(LOCATION_PREFIX)
        .then(|| line[LOCATION_PREFIX.len()..].trim())
}
