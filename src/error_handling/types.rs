//! Error type definitions.

use hickory_resolver::error::ResolveError;
use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Failed to initialize logger")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("Failed to build HTTP client")]
    HttpClientError(#[from] ReqwestError),
}

/// Failures surfaced while running a probe.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// The host could not be resolved to any IPv4 address.
    #[error("Failed to resolve host: {host}")]
    Resolution {
        host: String,
        #[source]
        source: Option<ResolveError>,
    },

    /// Name resolution did not finish before the deadline.
    #[error("DNS resolution for {host} timed out after {secs}s")]
    ResolutionTimeout { host: String, secs: u64 },

    /// The URL could not be parsed for the transfer.
    #[error("Invalid URL: {url}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The transfer layer reported a failure (connect, TLS, protocol, body).
    #[error("HTTP transfer failed")]
    Transfer(#[from] ReqwestError),

    /// The transfer did not finish before the deadline.
    #[error("Transfer timed out after {0}s")]
    TransferTimeout(u64),

    /// The redirect chain is longer than the hop limit.
    #[error("Maximum ({0}) redirects followed")]
    TooManyRedirects(usize),

    /// TCP connect or TLS handshake failure in the TLS session probes.
    #[error("TLS connection to {target} failed: {reason}")]
    Tls { target: String, reason: String },

    /// TCP connect or TLS handshake did not finish before its deadline.
    #[error("TLS connection to {target} timed out after {secs}s")]
    TlsTimeout { target: String, secs: u64 },

    /// A peer certificate could not be parsed.
    #[error("Failed to read peer certificate")]
    Certificate(#[from] anyhow::Error),

    /// Writing the report failed.
    #[error("Failed to write report")]
    Output(#[from] std::io::Error),

    /// Shared resources could not be initialized.
    #[error(transparent)]
    Initialization(#[from] InitializationError),
}

impl ProbeError {
    /// Process exit status for this error.
    ///
    /// Every failure exits with 1, whatever probe reports it.
    pub fn exit_code(&self) -> i32 {
        1
    }

    /// Renders the error followed by each of its sources, separated by `: `.
    pub fn chain(&self) -> String {
        let mut rendered = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            rendered.push_str(": ");
            rendered.push_str(&cause.to_string());
            source = cause.source();
        }
        rendered
    }

    /// Returns true if the failure happened before any request was sent.
    pub fn is_resolution_failure(&self) -> bool {
        matches!(
            self,
            ProbeError::Resolution { .. } | ProbeError::ResolutionTimeout { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_error_message_names_host() {
        let err = ProbeError::Resolution {
            host: "invalid.invalid.test".to_string(),
            source: None,
        };
        assert_eq!(err.to_string(), "Failed to resolve host: invalid.invalid.test");
        assert!(err.is_resolution_failure());
    }

    #[test]
    fn test_every_error_exits_with_one() {
        let errors = [
            ProbeError::ResolutionTimeout {
                host: "example.com".to_string(),
                secs: 3,
            },
            ProbeError::TransferTimeout(30),
            ProbeError::TooManyRedirects(10),
            ProbeError::Tls {
                target: "example.com:443".to_string(),
                reason: "handshake failure".to_string(),
            },
            ProbeError::Output(std::io::Error::other("closed")),
        ];
        for err in errors {
            assert_eq!(err.exit_code(), 1, "{err} should exit with 1");
        }
    }

    #[test]
    fn test_transfer_timeout_is_not_resolution_failure() {
        assert!(!ProbeError::TransferTimeout(5).is_resolution_failure());
    }

    #[test]
    fn test_invalid_url_message() {
        let source = url::Url::parse("not a url").unwrap_err();
        let err = ProbeError::InvalidUrl {
            url: "not a url".to_string(),
            source,
        };
        assert_eq!(err.to_string(), "Invalid URL: not a url");
        assert_eq!(
            err.chain(),
            "Invalid URL: not a url: relative URL without a base"
        );
    }

    #[test]
    fn test_chain_walks_nested_sources() {
        let err = ProbeError::from(InitializationError::HttpClientError(
            reqwest::Client::builder()
                .user_agent("bad\nagent")
                .build()
                .unwrap_err(),
        ));
        assert!(err.chain().starts_with("Failed to build HTTP client: "));
    }

    #[test]
    fn test_output_error_keeps_io_reason() {
        let err = ProbeError::from(std::io::Error::other("broken pipe"));
        assert_eq!(err.chain(), "Failed to write report: broken pipe");
    }
}
