//! DNS resolver initialization.
//!
//! This module provides functions to initialize the DNS resolver with proper
//! timeout configuration.

use std::time::Duration;

use hickory_resolver::config::{LookupIpStrategy, ResolverConfig, ResolverOpts};
use hickory_resolver::system_conf::read_system_conf;
use hickory_resolver::TokioAsyncResolver;

use crate::config::{DNS_ATTEMPTS, DNS_TIMEOUT_SECS};

/// Initializes the DNS resolver for hostname lookups.
///
/// Uses the host's resolver configuration (`/etc/resolv.conf`, hosts file) so
/// results match what the operating system would return. Falls back to the
/// default configuration (Google DNS) when the system configuration cannot be read.
///
/// The resolver only returns IPv4 addresses and fails fast:
/// - per-query timeout of `DNS_TIMEOUT_SECS`
/// - `DNS_ATTEMPTS` attempts
/// - `ndots` of 0 so no search domains are appended
pub fn init_resolver() -> TokioAsyncResolver {
    let (config, mut opts) = match read_system_conf() {
        Ok(conf) => conf,
        Err(e) => {
            log::warn!("Failed to read system DNS configuration, using defaults: {e}");
            (ResolverConfig::default(), ResolverOpts::default())
        }
    };

    opts.timeout = Duration::from_secs(DNS_TIMEOUT_SECS);
    opts.attempts = DNS_ATTEMPTS;
    opts.ndots = 0;
    opts.ip_strategy = LookupIpStrategy::Ipv4Only;
    opts.use_hosts_file = true;

    TokioAsyncResolver::tokio(config, opts)
}
