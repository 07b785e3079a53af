//! Formatting of HTTP/1.1 heads for trace events.

use reqwest::header::{HeaderName, HeaderValue};
use reqwest::{StatusCode, Version};

/// Title-cases a header name the way it is written on the wire
/// (`content-type` becomes `Content-Type`).
pub(crate) fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = true;
    for c in name.chars() {
        if upper_next {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        upper_next = c == '-';
    }
    out
}

/// Formats the request head sent for `request` as one CRLF-delimited block.
pub(crate) fn format_request_head(request: &reqwest::Request) -> String {
    let url = request.url();
    let target = &url[url::Position::BeforePath..url::Position::AfterQuery];
    let mut head = format!(
        "{} {} {:?}\r\n",
        request.method(),
        target,
        request.version()
    );
    for (name, value) in request.headers() {
        head.push_str(&format_header_line(name, value));
    }
    head.push_str("\r\n");
    head
}

/// Formats a response status line, e.g. `HTTP/1.1 200 OK\r\n`.
pub(crate) fn format_status_line(version: Version, status: StatusCode) -> String {
    format!("{version:?} {status}\r\n")
}

/// Formats one header as `Name: value\r\n`.
pub(crate) fn format_header_line(name: &HeaderName, value: &HeaderValue) -> String {
    format!(
        "{}: {}\r\n",
        title_case(name.as_str()),
        String::from_utf8_lossy(value.as_bytes())
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case_header_names() {
        assert_eq!(title_case("content-type"), "Content-Type");
        assert_eq!(title_case("set-cookie"), "Set-Cookie");
        assert_eq!(title_case("x-request-id"), "X-Request-Id");
        assert_eq!(title_case("host"), "Host");
    }

    #[test]
    fn test_status_line_includes_reason() {
        assert_eq!(
            format_status_line(Version::HTTP_11, StatusCode::MOVED_PERMANENTLY),
            "HTTP/1.1 301 Moved Permanently\r\n"
        );
    }

    #[test]
    fn test_request_head_lists_headers_in_order() {
        let client = reqwest::Client::new();
        let request = client
            .get("http://example.com/a?b=c")
            .header(reqwest::header::HOST, "example.com")
            .header(reqwest::header::ACCEPT, "*/*")
            .build()
            .unwrap();
        assert_eq!(
            format_request_head(&request),
            "GET /a?b=c HTTP/1.1\r\nHost: example.com\r\nAccept: */*\r\n\r\n"
        );
    }
}
