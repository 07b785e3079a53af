//! Host extraction and IPv4 resolution.
//!
//! Resolution here is independent of the transfer layer, which performs its own
//! lookup. Probes use these addresses for reporting and labeling only.

mod extract;
mod resolution;

// Re-export public API
pub use extract::extract_host;
pub use resolution::{resolve_first_ipv4, resolve_ipv4_addresses};
