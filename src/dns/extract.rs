//! Hostname extraction from loosely formed URLs.

/// Extracts the bare hostname from a URL or hostname string.
///
/// Strips, in order:
/// - everything up to and including `://` (if present)
/// - everything from the first `/`, `?` or `#`
/// - any `user:password@` prefix
/// - a trailing `:port`, and the brackets around an IPv6 literal
///
/// No further validation happens: a malformed input simply yields a host that
/// fails to resolve. An input with nothing left after stripping yields `""`.
///
/// # Examples
///
/// ```
/// use netprobe::dns::extract_host;
///
/// assert_eq!(extract_host("https://example.com/path"), "example.com");
/// assert_eq!(extract_host("example.com"), "example.com");
/// assert_eq!(extract_host("http://127.0.0.1:8080/"), "127.0.0.1");
/// ```
pub fn extract_host(url: &str) -> &str {
    let rest = match url.find("://") {
        Some(idx) => &url[idx + 3..],
        None => url,
    };

    let authority = rest
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();

    let host_port = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host)| host);

    if let Some(bracketed) = host_port.strip_prefix('[') {
        return bracketed.split(']').next().unwrap_or_default();
    }

    host_port
        .split_once(':')
        .map_or(host_port, |(host, _)| host)
}
