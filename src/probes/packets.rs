//! HTTPS request rendered as a synthetic packet trace.

use std::io::Write;
use std::net::Ipv4Addr;
use std::time::Duration;

use tokio::time::Instant;

use crate::config::Opt;
use crate::dns::{extract_host, resolve_first_ipv4};
use crate::error_handling::{InitializationError, ProbeError};
use crate::initialization::{init_client, init_resolver};
use crate::trace::PacketTrace;
use crate::transfer::{execute, RequestDescriptor};

/// Resolves the target host, then performs one GET (following redirects) and
/// prints every trace event as a packet record.
///
/// Resolution and the transfer share one `--timeout-seconds` budget. A resolution
/// failure ends the probe before any record is written. A transfer failure is
/// reported in-line, followed by the completion line, and returned.
pub async fn run<W: Write>(opt: &Opt, out: &mut W) -> Result<(), ProbeError> {
    writeln!(out, "Performing HTTPS request to: {}", opt.url)?;

    let started = Instant::now();
    let host = extract_host(&opt.url);
    let resolver = init_resolver();
    let ip = resolve_first_ipv4(host, &resolver, opt.timeout()).await?;
    writeln!(out, "Resolved {host} to {ip}")?;

    let remaining = opt.timeout().saturating_sub(started.elapsed());
    let result = trace_transfer(opt, ip, remaining, out).await;
    if let Err(e) = &result {
        writeln!(out, "Transfer failed: {}", e.chain())?;
    }
    writeln!(out, "Request complete.")?;
    result
}

async fn trace_transfer<W: Write>(
    opt: &Opt,
    ip: Ipv4Addr,
    deadline: Duration,
    out: &mut W,
) -> Result<(), ProbeError> {
    let descriptor = RequestDescriptor::get(&opt.url)?
        .follow_redirects(true)
        .verbose(true)
        .capture_headers(true);
    let client = init_client(opt).map_err(InitializationError::from)?;

    let mut trace = PacketTrace::new(&mut *out, ip);
    let outcome = execute(&client, &descriptor, &mut trace, deadline).await?;
    log::info!(
        "{} answered {} after {} redirect(s); {} trace event(s)",
        outcome.final_url,
        outcome.status,
        outcome.redirects,
        trace.packets()
    );
    Ok(())
}
