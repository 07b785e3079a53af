//! IPv4 address resolution.

use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use hickory_resolver::TokioAsyncResolver;

use crate::error_handling::ProbeError;

/// Resolves a hostname to all of its IPv4 addresses, in resolver order.
///
/// # Errors
///
/// - `ProbeError::Resolution` if the host is empty, the lookup fails, or no IPv4
///   address is returned
/// - `ProbeError::ResolutionTimeout` if the lookup does not finish within `deadline`
pub async fn resolve_ipv4_addresses(
    host: &str,
    resolver: &TokioAsyncResolver,
    deadline: Duration,
) -> Result<Vec<Ipv4Addr>, ProbeError> {
    if host.is_empty() {
        return Err(ProbeError::Resolution {
            host: String::new(),
            source: None,
        });
    }

    log::debug!("Resolving {host} (deadline {}s)", deadline.as_secs());

    let lookup = match tokio::time::timeout(deadline, resolver.lookup_ip(host)).await {
        Ok(Ok(lookup)) => lookup,
        Ok(Err(e)) => {
            log::warn!("DNS lookup for {host} failed: {e}");
            return Err(ProbeError::Resolution {
                host: host.to_string(),
                source: Some(e),
            });
        }
        Err(_) => {
            return Err(ProbeError::ResolutionTimeout {
                host: host.to_string(),
                secs: deadline.as_secs(),
            });
        }
    };

    let addresses: Vec<Ipv4Addr> = lookup
        .iter()
        .filter_map(|ip| match ip {
            IpAddr::V4(v4) => Some(v4),
            IpAddr::V6(_) => None,
        })
        .collect();

    if addresses.is_empty() {
        return Err(ProbeError::Resolution {
            host: host.to_string(),
            source: None,
        });
    }

    log::debug!("Resolved {host} to {} IPv4 address(es)", addresses.len());
    Ok(addresses)
}

/// Resolves a hostname and returns the first IPv4 address.
///
/// # Errors
///
/// Same as [`resolve_ipv4_addresses`].
pub async fn resolve_first_ipv4(
    host: &str,
    resolver: &TokioAsyncResolver,
    deadline: Duration,
) -> Result<Ipv4Addr, ProbeError> {
    let addresses = resolve_ipv4_addresses(host, resolver, deadline).await?;
    // resolve_ipv4_addresses never returns an empty list
    addresses
        .into_iter()
        .next()
        .ok_or_else(|| ProbeError::Resolution {
            host: host.to_string(),
            source: None,
        })
}
