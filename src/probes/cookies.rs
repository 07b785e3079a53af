//! `Set-Cookie` headers of a single GET response.

use std::io::{self, Write};

use crate::config::Opt;
use crate::error_handling::{InitializationError, ProbeError};
use crate::initialization::init_client;
use crate::transfer::{execute, RequestDescriptor, TraceEvent};

const SET_COOKIE_PREFIX: &str = "set-cookie:";

/// Performs a GET without following redirects and prints every `Set-Cookie`
/// header line. The completion line is printed even when the request fails.
pub async fn run<W: Write>(opt: &Opt, out: &mut W) -> Result<(), ProbeError> {
    writeln!(out, "Performing request to: {}\n", opt.url)?;
    let result = print_cookies(opt, out).await;
    writeln!(out, "\nRequest complete.")?;
    result
}

async fn print_cookies<W: Write>(opt: &Opt, out: &mut W) -> Result<(), ProbeError> {
    let descriptor = RequestDescriptor::get(&opt.url)?.capture_headers(true);
    let client = init_client(opt).map_err(InitializationError::from)?;

    let mut cookies = 0usize;
    let mut sink = |event: TraceEvent<'_>| -> io::Result<()> {
        if let TraceEvent::HeaderIn(line) = event {
            let line = String::from_utf8_lossy(line);
            if is_set_cookie(&line) {
                cookies += 1;
                writeln!(out, "[Cookie] {}", line.trim_end())?;
            }
        }
        Ok(())
    };
    execute(&client, &descriptor, &mut sink, opt.timeout()).await?;
    log::info!("{cookies} cookie(s) set by {}", opt.url);
    Ok(())
}

fn is_set_cookie(line: &str) -> bool {
    line.get(..SET_COOKIE_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(SET_COOKIE_PREFIX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::local_server;
    use httptest::{matchers::request, responders::status_code, Expectation};

    #[test]
    fn test_set_cookie_match_ignores_case() {
        assert!(is_set_cookie("Set-Cookie: a=1\r\n"));
        assert!(is_set_cookie("SET-COOKIE: a=1"));
        assert!(!is_set_cookie("Cookie: a=1"));
        assert!(!is_set_cookie("Set-Cookie2"));
        assert!(!is_set_cookie(""));
    }

    #[tokio::test]
    async fn test_prints_each_cookie() {
        crate::initialization::init_crypto_provider();
        let server = local_server();
        server.expect(
            Expectation::matching(request::method_path("GET", "/")).respond_with(
                status_code(200)
                    .append_header("Set-Cookie", "session=abc; Path=/")
                    .append_header("Set-Cookie", "theme=dark")
                    .append_header("Content-Type", "text/plain")
                    .body("ok\n"),
            ),
        );

        let url = server.url_str("/");
        let mut out = Vec::new();
        run(&Opt::for_url(url.clone()), &mut out).await.unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!(
                "Performing request to: {url}\n\n\
                 [Cookie] Set-Cookie: session=abc; Path=/\n\
                 [Cookie] Set-Cookie: theme=dark\n\
                 \nRequest complete.\n"
            )
        );
    }

    #[tokio::test]
    async fn test_failure_still_completes() {
        crate::initialization::init_crypto_provider();
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let url = format!("http://127.0.0.1:{port}/");

        let mut out = Vec::new();
        let err = run(&Opt::for_url(url), &mut out).await.unwrap_err();

        assert!(matches!(err, ProbeError::Transfer(_)), "unexpected error: {err}");
        assert!(String::from_utf8(out)
            .unwrap()
            .ends_with("\n\nRequest complete.\n"));
    }
}
