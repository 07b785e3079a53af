//! Peer certificate chain with per-certificate fields.

use std::io::Write;

use crate::config::Opt;
use crate::error_handling::ProbeError;
use crate::tls::{describe_certificate, open_session, CertificateDetails};

use super::tls_target;

/// Performs a verified handshake with the URL's server and prints its chain.
pub async fn run<W: Write>(opt: &Opt, out: &mut W) -> Result<(), ProbeError> {
    let (host, port) = tls_target(&opt.url)?;
    let session = open_session(&host, port, false).await?;

    let chain = session
        .peer_certificates
        .iter()
        .map(|der| describe_certificate(der))
        .collect::<anyhow::Result<Vec<_>>>()?;
    write_chain(out, &chain)?;
    Ok(())
}

fn write_chain<W: Write>(out: &mut W, chain: &[CertificateDetails]) -> std::io::Result<()> {
    if chain.is_empty() {
        return writeln!(out, "No SSL certificate information available.");
    }

    writeln!(out, "--- Certificate Chain ---")?;
    for (index, cert) in chain.iter().enumerate() {
        writeln!(out, "\nCertificate {}:", index + 1)?;
        writeln!(out, "  Subject: {}", cert.subject)?;
        writeln!(out, "  Issuer: {}", cert.issuer)?;
        writeln!(out, "  Version: {}", cert.version)?;
        writeln!(out, "  Serial Number: {}", cert.serial_number)?;
        writeln!(out, "  Signature Algorithm: {}", cert.signature_algorithm)?;
        writeln!(out, "  Public Key Algorithm: {}", cert.public_key_algorithm)?;
        writeln!(out, "  Start date: {}", cert.not_before)?;
        writeln!(out, "  Expire date: {}", cert.not_after)?;
        if !cert.subject_alternative_names.is_empty() {
            let names: Vec<String> = cert
                .subject_alternative_names
                .iter()
                .map(|name| format!("DNS:{name}"))
                .collect();
            writeln!(out, "  X509v3 Subject Alternative Name: {}", names.join(", "))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(subject: &str, sans: &[&str]) -> CertificateDetails {
        CertificateDetails {
            subject: subject.to_string(),
            issuer: "C=US, O=Example CA, CN=Example Root".to_string(),
            version: 3,
            serial_number: "0a:1b".to_string(),
            signature_algorithm: "sha256WithRSAEncryption".to_string(),
            public_key_algorithm: "RSA".to_string(),
            not_before: "Mon, 01 Jan 2024 00:00:00 +0000".to_string(),
            not_after: "Tue, 31 Dec 2024 23:59:59 +0000".to_string(),
            subject_alternative_names: sans.iter().map(|s| s.to_string()).collect(),
            sha256_fingerprint: "AA:BB".to_string(),
        }
    }

    #[test]
    fn test_empty_chain_message() {
        let mut out = Vec::new();
        write_chain(&mut out, &[]).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "No SSL certificate information available.\n"
        );
    }

    #[test]
    fn test_chain_is_numbered_from_one() {
        let mut out = Vec::new();
        write_chain(
            &mut out,
            &[
                sample("CN=example.com", &["example.com", "www.example.com"]),
                sample("CN=Example Intermediate", &[]),
            ],
        )
        .unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("--- Certificate Chain ---\n\nCertificate 1:\n  Subject: CN=example.com\n"));
        assert!(text.contains("\nCertificate 2:\n  Subject: CN=Example Intermediate\n"));
        assert!(text.contains("  X509v3 Subject Alternative Name: DNS:example.com, DNS:www.example.com\n"));
        assert_eq!(text.matches("X509v3 Subject Alternative Name").count(), 1);
        assert_eq!(text.matches("  Expire date: Tue, 31 Dec 2024 23:59:59 +0000\n").count(), 2);
    }
}
