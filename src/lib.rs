//! netprobe library: single-request HTTPS diagnostic probes
//!
//! Every probe performs one request against a URL and prints a plain-text report
//! about one aspect of it: DNS records, the certificate chain, the negotiated TLS
//! session, response headers, cookies, the redirect chain, the body, or a
//! synthetic packet trace of the whole exchange.
//!
//! # Example
//!
//! ```no_run
//! use netprobe::config::Opt;
//! use netprobe::probes::Probe;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! netprobe::initialization::init_crypto_provider();
//! let opt = Opt::for_url("https://example.com/");
//! let mut report = Vec::new();
//! Probe::Packets.run(&opt, &mut report).await?;
//! print!("{}", String::from_utf8_lossy(&report));
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. The probe binaries use the
//! current-thread flavour; nothing here spawns tasks.

#![warn(missing_docs)]

pub mod app;
pub mod compose;
pub mod config;
pub mod dns;
pub mod error_handling;
pub mod initialization;
pub mod probes;
pub mod tls;
pub mod trace;
pub mod transfer;

// Re-export public API
pub use config::Opt;
pub use error_handling::ProbeError;
pub use probes::Probe;

#[cfg(test)]
mod test_support;
