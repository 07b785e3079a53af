//! IPv4 A records of the URL's host.

use std::io::Write;

use crate::config::Opt;
use crate::dns::{extract_host, resolve_ipv4_addresses};
use crate::error_handling::ProbeError;
use crate::initialization::init_resolver;

/// Prints every IPv4 address of the host named by `opt.url` (a URL or a bare hostname).
pub async fn run<W: Write>(opt: &Opt, out: &mut W) -> Result<(), ProbeError> {
    let host = extract_host(&opt.url);
    writeln!(out, "[DNS] Resolving {host}...")?;

    let resolver = init_resolver();
    match resolve_ipv4_addresses(host, &resolver, opt.timeout()).await {
        Ok(addresses) => {
            for ip in addresses {
                writeln!(out, "[DNS] A Record: {ip}")?;
            }
            Ok(())
        }
        Err(e) => {
            writeln!(out, "[DNS] Resolution failed")?;
            Err(e)
        }
    }
}
