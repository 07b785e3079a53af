//! Response header lines of a HEAD request.

use std::io::{self, Write};

use crate::config::Opt;
use crate::error_handling::{InitializationError, ProbeError};
use crate::initialization::init_client;
use crate::transfer::{execute, RequestDescriptor, TraceEvent};

/// Sends a HEAD request without following redirects and copies every response
/// header line, status line and terminating blank line included, to `out`.
pub async fn run<W: Write>(opt: &Opt, out: &mut W) -> Result<(), ProbeError> {
    let descriptor = RequestDescriptor::head(&opt.url)?.capture_headers(true);
    let client = init_client(opt).map_err(InitializationError::from)?;

    let mut sink = |event: TraceEvent<'_>| -> io::Result<()> {
        match event {
            TraceEvent::HeaderIn(line) => out.write_all(line),
            _ => Ok(()),
        }
    };
    let outcome = execute(&client, &descriptor, &mut sink, opt.timeout()).await?;
    log::info!("HEAD {} answered {}", outcome.final_url, outcome.status);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::local_server;
    use httptest::{matchers::request, responders::status_code, Expectation};

    #[tokio::test]
    async fn test_prints_header_block_verbatim() {
        crate::initialization::init_crypto_provider();
        let server = local_server();
        server.expect(
            Expectation::matching(request::method_path("HEAD", "/")).respond_with(
                status_code(200).append_header("X-Probe", "header"),
            ),
        );

        let mut out = Vec::new();
        run(&Opt::for_url(server.url_str("/")), &mut out)
            .await
            .unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("HTTP/1.1 200 OK\r\n"), "got {text:?}");
        assert!(text.contains("X-Probe: header\r\n"));
        assert!(text.ends_with("\r\n\r\n"));
    }

    #[tokio::test]
    async fn test_redirect_is_not_followed() {
        crate::initialization::init_crypto_provider();
        let server = local_server();
        server.expect(
            Expectation::matching(request::method_path("HEAD", "/old")).respond_with(
                status_code(301).append_header("Location", "/new"),
            ),
        );

        let mut out = Vec::new();
        run(&Opt::for_url(server.url_str("/old")), &mut out)
            .await
            .unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("HTTP/1.1 301 Moved Permanently\r\n"));
        assert!(text.contains("Location: /new\r\n"));
        assert_eq!(text.matches("HTTP/1.1").count(), 1);
    }
}
