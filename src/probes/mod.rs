//! The probe catalogue.
//!
//! Each probe performs one request against the target URL and writes a plain-text
//! report to the supplied writer. Probes share no state; each call builds its own
//! client, resolver and trace context.

pub mod body;
pub mod certchain;
pub mod cookies;
pub mod dns;
pub mod header;
pub mod packets;
pub mod redirect;
pub mod tls;

use std::io::Write;

use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::config::{Opt, HTTPS_PORT};
use crate::dns::extract_host;
use crate::error_handling::ProbeError;

/// Every probe binary, in the order the run-all composer executes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Probe {
    /// IPv4 A records of the host
    Dns,
    /// Peer certificate chain
    Certchain,
    /// Negotiated TLS session parameters
    Tls,
    /// Response headers of a HEAD request
    Header,
    /// `Set-Cookie` response headers
    Cookies,
    /// Full response body
    HtmlBody,
    /// Status lines and targets along the redirect chain
    Redirect,
    /// Synthetic packet trace of the whole exchange
    Packets,
}

impl Probe {
    /// File name of the probe's executable (without platform suffix).
    pub fn binary_name(self) -> &'static str {
        self.into()
    }

    /// Runs the probe for `opt`, writing its report to `out`.
    ///
    /// # Errors
    ///
    /// Returns the probe's failure; the report written so far stays in `out`.
    pub async fn run<W: Write>(self, opt: &Opt, out: &mut W) -> Result<(), ProbeError> {
        match self {
            Probe::Dns => dns::run(opt, out).await,
            Probe::Certchain => certchain::run(opt, out).await,
            Probe::Tls => tls::run(opt, out).await,
            Probe::Header => header::run(opt, out).await,
            Probe::Cookies => cookies::run(opt, out).await,
            Probe::HtmlBody => body::run(opt, out).await,
            Probe::Redirect => redirect::run(opt, out).await,
            Probe::Packets => packets::run(opt, out).await,
        }
    }
}

/// Host and port for a direct TLS connection to the URL's server.
///
/// The port defaults to 443 whatever the scheme.
pub(crate) fn tls_target(url: &str) -> Result<(String, u16), ProbeError> {
    let parsed = url::Url::parse(url).map_err(|source| ProbeError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;
    let host = extract_host(url).to_string();
    Ok((host, parsed.port().unwrap_or(HTTPS_PORT)))
}
