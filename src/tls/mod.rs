//! TLS session inspection and certificate details.
//!
//! This module connects to TLS endpoints and reports what was negotiated:
//! - Protocol version and cipher suite (with its strength in bits)
//! - ALPN protocol
//! - The peer certificate chain, parsed into [`CertificateDetails`]
//!
//! Uses `tokio-rustls` for the handshake and `x509-parser` for certificate parsing.

mod extract;

use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, info};
use rustls::pki_types::{CertificateDer, ServerName};
use rustls::ProtocolVersion;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio_rustls::rustls::{ClientConfig, RootCertStore};
use tokio_rustls::TlsConnector;

use crate::config::{ALPN_PROTOCOLS, TCP_CONNECT_TIMEOUT_SECS, TLS_HANDSHAKE_TIMEOUT_SECS};
use crate::error_handling::ProbeError;

pub use extract::{describe_certificate, format_fingerprint, CertificateDetails};

/// Parameters negotiated during one TLS handshake.
#[derive(Debug, Clone)]
pub struct TlsSession {
    /// Protocol version in OpenSSL notation (`TLSv1.3`).
    pub protocol_version: Option<String>,
    /// Negotiated cipher suite name (`TLS13_AES_256_GCM_SHA384`).
    pub cipher_suite: Option<String>,
    /// Symmetric key strength of the cipher suite.
    pub cipher_bits: Option<u16>,
    /// ALPN protocol selected by the server.
    pub alpn_protocol: Option<String>,
    /// Peer certificate chain, leaf first.
    pub peer_certificates: Vec<CertificateDer<'static>>,
}

/// Performs a verified TLS handshake with `host:port` and returns the negotiated session.
///
/// The chain is verified against the Mozilla root program (`webpki-roots`), so an
/// untrusted or mismatched certificate is a handshake failure. When `offer_alpn`
/// is set the client offers `h2` and `http/1.1`.
///
/// # Errors
///
/// - `ProbeError::Tls` if the host is not a valid server name, or the TCP connect
///   or handshake fails
/// - `ProbeError::TlsTimeout` if the TCP connect or the handshake exceeds its deadline
pub async fn open_session(host: &str, port: u16, offer_alpn: bool) -> Result<TlsSession, ProbeError> {
    let target = format!("{host}:{port}");
    debug!("Opening TLS session with {target}");

    let mut root_store = RootCertStore::empty();
    root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

    let mut config = ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();
    if offer_alpn {
        config.alpn_protocols = ALPN_PROTOCOLS.iter().map(|p| p.to_vec()).collect();
    }

    let server_name = ServerName::try_from(host.to_string()).map_err(|e| {
        error!("Invalid server name {host}: {e}");
        ProbeError::Tls {
            target: target.clone(),
            reason: format!("invalid server name: {e}"),
        }
    })?;

    let sock = match tokio::time::timeout(
        Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS),
        TcpStream::connect((host, port)),
    )
    .await
    {
        Ok(Ok(sock)) => sock,
        Ok(Err(e)) => {
            error!("Failed to connect to {target}: {e}");
            return Err(ProbeError::Tls {
                target,
                reason: e.to_string(),
            });
        }
        Err(_) => {
            error!("TCP connection timeout for {target}");
            return Err(ProbeError::TlsTimeout {
                target,
                secs: TCP_CONNECT_TIMEOUT_SECS,
            });
        }
    };

    let connector = TlsConnector::from(Arc::new(config));
    let mut tls_stream = match tokio::time::timeout(
        Duration::from_secs(TLS_HANDSHAKE_TIMEOUT_SECS),
        connector.connect(server_name, sock),
    )
    .await
    {
        Ok(Ok(stream)) => stream,
        Ok(Err(e)) => {
            error!("TLS handshake failed for {target}: {e}");
            return Err(ProbeError::Tls {
                target,
                reason: e.to_string(),
            });
        }
        Err(_) => {
            error!("TLS handshake timeout for {target}");
            return Err(ProbeError::TlsTimeout {
                target,
                secs: TLS_HANDSHAKE_TIMEOUT_SECS,
            });
        }
    };

    let connection = tls_stream.get_ref().1;
    let cipher_suite = connection
        .negotiated_cipher_suite()
        .map(|cs| format!("{:?}", cs.suite()));
    let session = TlsSession {
        protocol_version: connection.protocol_version().map(protocol_name),
        cipher_bits: cipher_suite.as_deref().and_then(cipher_bits),
        cipher_suite,
        alpn_protocol: connection
            .alpn_protocol()
            .map(|p| String::from_utf8_lossy(p).into_owned()),
        peer_certificates: connection
            .peer_certificates()
            .map(|certs| certs.to_vec())
            .unwrap_or_default(),
    };

    if let Err(e) = tls_stream.shutdown().await {
        debug!("TLS shutdown for {target} failed: {e}");
    }

    info!(
        "TLS session with {target}: {} {} ({} certificate(s))",
        session.protocol_version.as_deref().unwrap_or("unknown"),
        session.cipher_suite.as_deref().unwrap_or("unknown"),
        session.peer_certificates.len()
    );
    Ok(session)
}

/// Maps a protocol version to OpenSSL notation.
fn protocol_name(version: ProtocolVersion) -> String {
    match version {
        ProtocolVersion::TLSv1_3 => "TLSv1.3".to_string(),
        ProtocolVersion::TLSv1_2 => "TLSv1.2".to_string(),
        ProtocolVersion::TLSv1_1 => "TLSv1.1".to_string(),
        ProtocolVersion::TLSv1_0 => "TLSv1".to_string(),
        other => format!("{other:?}"),
    }
}

/// Derives the symmetric key strength from a cipher suite name.
fn cipher_bits(suite: &str) -> Option<u16> {
    if suite.contains("AES_128") {
        Some(128)
    } else if suite.contains("AES_256") || suite.contains("CHACHA20") {
        Some(256)
    } else {
        None
    }
}
