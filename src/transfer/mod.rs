//! Traced single-request transfers.
//!
//! The transfer layer wraps `reqwest` and reports what happens on the connection
//! to a [`TraceSink`]: informational text, the request head, each response header
//! line and each body chunk. Redirects are followed here rather than inside
//! `reqwest` so that every hop is traced.

mod event;
mod head;

use std::time::Duration;

use reqwest::header::{ACCEPT, HOST, LOCATION, USER_AGENT};
use reqwest::{Method, StatusCode};
use url::Url;

use crate::config::{DEFAULT_USER_AGENT, MAX_REDIRECTS, REDIRECT_STATUS_CODES};
use crate::error_handling::ProbeError;

pub use event::{Category, Direction, Discard, TraceEvent, TraceSink};
use head::{format_header_line, format_request_head, format_status_line};

/// What to request and which parts of the exchange to report.
///
/// Built once from the command line and not modified afterwards.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    url: Url,
    method: Method,
    follow_redirects: bool,
    verbose: bool,
    capture_headers: bool,
    capture_body: bool,
}

impl RequestDescriptor {
    /// A GET request for `url` with every feature flag off.
    ///
    /// # Errors
    ///
    /// Returns `ProbeError::InvalidUrl` if `url` does not parse.
    pub fn get(url: &str) -> Result<Self, ProbeError> {
        Self::new(url, Method::GET)
    }

    /// A HEAD request for `url`: headers only, no body is transferred.
    ///
    /// # Errors
    ///
    /// Returns `ProbeError::InvalidUrl` if `url` does not parse.
    pub fn head(url: &str) -> Result<Self, ProbeError> {
        Self::new(url, Method::HEAD)
    }

    fn new(url: &str, method: Method) -> Result<Self, ProbeError> {
        let url = Url::parse(url).map_err(|source| ProbeError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;
        Ok(Self {
            url,
            method,
            follow_redirects: false,
            verbose: false,
            capture_headers: false,
            capture_body: false,
        })
    }

    /// Follow 3xx responses carrying a `Location` header.
    pub fn follow_redirects(mut self, enabled: bool) -> Self {
        self.follow_redirects = enabled;
        self
    }

    /// Emit text and data events.
    pub fn verbose(mut self, enabled: bool) -> Self {
        self.verbose = enabled;
        self
    }

    /// Emit request and response header events.
    pub fn capture_headers(mut self, enabled: bool) -> Self {
        self.capture_headers = enabled;
        self
    }

    /// Keep the final response body in [`TransferOutcome::body`].
    pub fn capture_body(mut self, enabled: bool) -> Self {
        self.capture_body = enabled;
        self
    }
}

/// Result of a completed transfer.
#[derive(Debug, Clone)]
pub struct TransferOutcome {
    /// URL of the last request made.
    pub final_url: Url,
    /// Status of the last response.
    pub status: StatusCode,
    /// Number of redirects followed.
    pub redirects: usize,
    /// Body of the last response; empty unless body capture was requested.
    pub body: Vec<u8>,
}

/// Performs the transfer described by `descriptor`, reporting events to `sink`.
///
/// The whole transfer, redirects included, must finish within `deadline`.
///
/// # Errors
///
/// - `ProbeError::Transfer` for connection, TLS, protocol or body failures
/// - `ProbeError::TransferTimeout` if the deadline passes
/// - `ProbeError::TooManyRedirects` if more than `MAX_REDIRECTS` hops are needed
/// - `ProbeError::Output` if the sink fails
pub async fn execute<S>(
    client: &reqwest::Client,
    descriptor: &RequestDescriptor,
    sink: &mut S,
    deadline: Duration,
) -> Result<TransferOutcome, ProbeError>
where
    S: TraceSink + ?Sized,
{
    match tokio::time::timeout(deadline, perform(client, descriptor, sink)).await {
        Ok(result) => result,
        Err(_) => {
            log::warn!(
                "Transfer to {} timed out after {}s",
                descriptor.url,
                deadline.as_secs()
            );
            Err(ProbeError::TransferTimeout(deadline.as_secs()))
        }
    }
}

async fn perform<S>(
    client: &reqwest::Client,
    descriptor: &RequestDescriptor,
    sink: &mut S,
) -> Result<TransferOutcome, ProbeError>
where
    S: TraceSink + ?Sized,
{
    let mut current = descriptor.url.clone();
    let mut redirects = 0usize;

    loop {
        let host = current.host_str().unwrap_or_default().to_string();
        let request = build_request(client, descriptor.method.clone(), &current)?;
        // Reported only once the request has gone out
        let head = format_request_head(&request);

        log::debug!("{} {}", request.method(), current);
        let mut response = client.execute(request).await?;
        let status = response.status();

        if descriptor.verbose {
            trace_connection(sink, &host, &response)?;
            let text = format!("Sent {} request to {}\n", descriptor.method, current);
            sink.on_event(TraceEvent::Text(&text))?;
        }
        if descriptor.capture_headers {
            sink.on_event(TraceEvent::HeaderOut(head.as_bytes()))?;
            let status_line = format_status_line(response.version(), status);
            sink.on_event(TraceEvent::HeaderIn(status_line.as_bytes()))?;
            for (name, value) in response.headers() {
                let line = format_header_line(name, value);
                sink.on_event(TraceEvent::HeaderIn(line.as_bytes()))?;
            }
            sink.on_event(TraceEvent::HeaderIn(b"\r\n"))?;
        }

        let next = if descriptor.follow_redirects {
            redirect_target(&current, &response)
        } else {
            None
        };

        let mut body = Vec::new();
        if descriptor.method != Method::HEAD {
            while let Some(chunk) = response.chunk().await? {
                if descriptor.verbose {
                    sink.on_event(TraceEvent::DataIn(&chunk))?;
                }
                if descriptor.capture_body && next.is_none() {
                    body.extend_from_slice(&chunk);
                }
            }
        }

        match next {
            Some(next) => {
                if redirects >= MAX_REDIRECTS {
                    return Err(ProbeError::TooManyRedirects(MAX_REDIRECTS));
                }
                redirects += 1;
                if descriptor.verbose {
                    let text = format!("Issue another request to this URL: '{next}'\n");
                    sink.on_event(TraceEvent::Text(&text))?;
                }
                current = next;
            }
            None => {
                if descriptor.verbose {
                    let text = format!("Connection to {host} left intact\n");
                    sink.on_event(TraceEvent::Text(&text))?;
                }
                log::debug!("Transfer finished with {status} after {redirects} redirect(s)");
                return Ok(TransferOutcome {
                    final_url: current,
                    status,
                    redirects,
                    body,
                });
            }
        }
    }
}

/// Builds a request whose headers are all set explicitly, so the traced head
/// is exactly what goes on the wire.
fn build_request(
    client: &reqwest::Client,
    method: Method,
    url: &Url,
) -> Result<reqwest::Request, ProbeError> {
    let authority = &url[url::Position::BeforeHost..url::Position::AfterPort];
    let request = client
        .request(method, url.clone())
        .header(HOST, authority)
        .header(USER_AGENT, DEFAULT_USER_AGENT)
        .header(ACCEPT, "*/*")
        .build()?;
    Ok(request)
}

/// Emits text events describing the peer and, over TLS, its certificate.
fn trace_connection<S>(
    sink: &mut S,
    host: &str,
    response: &reqwest::Response,
) -> Result<(), ProbeError>
where
    S: TraceSink + ?Sized,
{
    if let Some(addr) = response.remote_addr() {
        let text = format!("Connected to {host} ({}) port {}\n", addr.ip(), addr.port());
        sink.on_event(TraceEvent::Text(&text))?;
    }

    let leaf = response
        .extensions()
        .get::<reqwest::tls::TlsInfo>()
        .and_then(|info| info.peer_certificate());
    if let Some(der) = leaf {
        match crate::tls::describe_certificate(der) {
            Ok(details) => {
                let text = format!(
                    "Server certificate:\n subject: {}\n issuer: {}\n expire date: {}\n",
                    details.subject, details.issuer, details.not_after
                );
                sink.on_event(TraceEvent::Text(&text))?;
            }
            Err(e) => log::debug!("Could not describe server certificate for {host}: {e:#}"),
        }
    }
    Ok(())
}

/// Returns the absolute redirect target if `response` is a redirect with a usable `Location`.
fn redirect_target(current: &Url, response: &reqwest::Response) -> Option<Url> {
    if !REDIRECT_STATUS_CODES.contains(&response.status().as_u16()) {
        return None;
    }
    let Some(location) = response.headers().get(LOCATION) else {
        log::warn!(
            "Redirect status {} for {} but no Location header",
            response.status(),
            current
        );
        return None;
    };
    let location = match location.to_str() {
        Ok(location) => location,
        Err(_) => {
            log::warn!("Non-ASCII Location header from {current}, not following");
            return None;
        }
    };
    match current.join(location) {
        Ok(next) => Some(next),
        Err(e) => {
            log::warn!("Cannot follow Location {location:?} from {current}: {e}");
            None
        }
    }
}
