//! HTTP client initialization.

use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::{Opt, TCP_CONNECT_TIMEOUT_SECS};

/// Initializes the HTTP client used by the transfer layer.
///
/// Creates a `reqwest::Client` configured with:
/// - Rustls TLS backend with TLS info capture (peer certificate per response)
/// - Redirects disabled, so the transfer layer can follow and trace each hop itself
/// - HTTP/1.1 only with title-cased header names, so traced header blocks match the wire
/// - Overall timeout from options and a fixed connect timeout
///
/// No default User-Agent is configured; the transfer layer sets every request
/// header explicitly.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(opt: &Opt) -> Result<reqwest::Client, reqwest::Error> {
    ClientBuilder::new()
        .use_rustls_tls()
        .tls_info(true)
        .redirect(reqwest::redirect::Policy::none())
        .timeout(opt.timeout())
        .connect_timeout(Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS))
        .http1_only()
        .http1_title_case_headers()
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_client_builds_with_defaults() {
        crate::initialization::init_crypto_provider();
        let opt = Opt::for_url("https://example.com/");
        assert!(init_client(&opt).is_ok());
    }
}
