//! Configuration constants.
//!
//! This module defines the deadlines, limits and labels shared by all probes.

// Network operation timeouts
/// Overall per-probe deadline in seconds, used when `--timeout-seconds` is not given.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// DNS query timeout in seconds (per attempt)
pub const DNS_TIMEOUT_SECS: u64 = 3;
/// Number of attempts the resolver makes per name server before failing
pub const DNS_ATTEMPTS: usize = 2;
/// TCP connection timeout in seconds
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 5;
/// TLS handshake timeout in seconds
pub const TLS_HANDSHAKE_TIMEOUT_SECS: u64 = 5;

/// Default port for HTTPS connections.
pub const HTTPS_PORT: u16 = 443;

/// Maximum number of redirect hops followed by the transfer layer.
pub const MAX_REDIRECTS: usize = 10;

/// User-Agent sent with every probe request.
pub const DEFAULT_USER_AGENT: &str = concat!("netprobe/", env!("CARGO_PKG_VERSION"));

/// Placeholder label for the local side of a synthetic packet.
pub const LOCAL_PEER_LABEL: &str = "LOCALHOST:random";

/// Redirect status codes followed when redirect following is enabled.
pub const REDIRECT_STATUS_CODES: &[u16] = &[301, 302, 303, 307, 308];

/// ALPN protocols offered by the TLS session probe, in preference order.
pub const ALPN_PROTOCOLS: &[&[u8]] = &[b"h2", b"http/1.1"];
