//! Negotiated TLS session parameters and certificate fingerprints.

use std::io::Write;

use crate::config::Opt;
use crate::error_handling::ProbeError;
use crate::tls::{describe_certificate, open_session, CertificateDetails, TlsSession};

use super::tls_target;

/// Performs a handshake offering ALPN and prints what was negotiated.
pub async fn run<W: Write>(opt: &Opt, out: &mut W) -> Result<(), ProbeError> {
    writeln!(out, "Connecting to: {}", opt.url)?;

    let (host, port) = tls_target(&opt.url)?;
    let session = open_session(&host, port, true).await?;

    let chain = session
        .peer_certificates
        .iter()
        .map(|der| describe_certificate(der))
        .collect::<anyhow::Result<Vec<_>>>()?;
    write_session(out, &session, &chain)?;
    Ok(())
}

fn write_session<W: Write>(
    out: &mut W,
    session: &TlsSession,
    chain: &[CertificateDetails],
) -> std::io::Result<()> {
    writeln!(out, "\n[TLS Information]")?;
    writeln!(
        out,
        "  Protocol Version: {}",
        session.protocol_version.as_deref().unwrap_or("unknown")
    )?;
    if let Some(suite) = &session.cipher_suite {
        writeln!(out, "  Cipher Suite (full): {suite}")?;
        if let Some(bits) = session.cipher_bits {
            writeln!(out, "  Cipher Bits: {bits}")?;
        }
    }
    if let Some(alpn) = &session.alpn_protocol {
        writeln!(out, "  ALPN Protocol: {alpn}")?;
    }

    for (index, cert) in chain.iter().enumerate() {
        write_fingerprint_block(out, cert, index + 1)?;
    }

    if let Some(leaf) = chain.first() {
        writeln!(out, "Leaf certificate info:")?;
        write_fingerprint_block(out, leaf, 0)?;
    }
    Ok(())
}

fn write_fingerprint_block<W: Write>(
    out: &mut W,
    cert: &CertificateDetails,
    index: usize,
) -> std::io::Result<()> {
    writeln!(out, "Certificate {index}:")?;
    writeln!(out, "  Subject: {}", cert.subject)?;
    writeln!(out, "  Issuer: {}", cert.issuer)?;
    writeln!(out, "  SHA-256 Fingerprint: {}", cert.sha256_fingerprint)
}
