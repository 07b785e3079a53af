//! Certificate extraction utilities.

use anyhow::{anyhow, Context, Result};
use sha2::{Digest, Sha256};
use x509_parser::extensions::{GeneralName, ParsedExtension};

/// Human-readable fields of one X.509 certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateDetails {
    /// Subject distinguished name.
    pub subject: String,
    /// Issuer distinguished name.
    pub issuer: String,
    /// X.509 version as printed by OpenSSL (1, 2 or 3).
    pub version: u32,
    /// Serial number as colon-separated hex.
    pub serial_number: String,
    /// Signature algorithm (`sha256WithRSAEncryption`).
    pub signature_algorithm: String,
    /// Subject public key algorithm (`RSA`, `ECDSA`).
    pub public_key_algorithm: String,
    /// Validity start in RFC 2822 form.
    pub not_before: String,
    /// Validity end in RFC 2822 form.
    pub not_after: String,
    /// DNS names from the Subject Alternative Name extension.
    pub subject_alternative_names: Vec<String>,
    /// SHA-256 digest of the DER encoding, colon-separated upper-case hex.
    pub sha256_fingerprint: String,
}

/// Parses a DER certificate into [`CertificateDetails`].
///
/// # Errors
///
/// Returns an error if the DER cannot be parsed or its validity dates cannot be
/// rendered.
pub fn describe_certificate(der: &[u8]) -> Result<CertificateDetails> {
    let (_, cert) = x509_parser::parse_x509_certificate(der)
        .map_err(|e| anyhow!("Failed to parse certificate: {e}"))?;
    let tbs_cert = &cert.tbs_certificate;

    let not_before = tbs_cert
        .validity
        .not_before
        .to_rfc2822()
        .map_err(|e| anyhow!("RFC2822 conversion error for not_before: {}", e))?;
    let not_after = tbs_cert
        .validity
        .not_after
        .to_rfc2822()
        .map_err(|e| anyhow!("RFC2822 conversion error for not_after: {}", e))?;

    let sans = extract_certificate_sans(&cert).context("Failed to read SAN extension")?;

    Ok(CertificateDetails {
        subject: tbs_cert.subject.to_string(),
        issuer: tbs_cert.issuer.to_string(),
        version: tbs_cert.version.0 + 1,
        serial_number: tbs_cert.raw_serial_as_string(),
        signature_algorithm: signature_algorithm_name(
            &cert.signature_algorithm.algorithm.to_string(),
        ),
        public_key_algorithm: key_algorithm_name(
            &tbs_cert.subject_pki.algorithm.algorithm.to_string(),
        ),
        not_before,
        not_after,
        subject_alternative_names: sans,
        sha256_fingerprint: format_fingerprint(&Sha256::digest(der)),
    })
}

/// Formats digest bytes as colon-separated upper-case hex (`AB:CD:...`).
pub fn format_fingerprint(digest: &[u8]) -> String {
    digest
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(":")
}

/// Maps a public key algorithm OID to its name; unknown OIDs are returned as-is.
fn key_algorithm_name(oid: &str) -> String {
    match oid {
        "1.2.840.113549.1.1.1" => "RSA".to_string(),
        "1.2.840.10045.2.1" => "ECDSA".to_string(),
        "1.3.101.112" => "Ed25519".to_string(),
        "1.3.101.113" => "Ed448".to_string(),
        _ => oid.to_string(),
    }
}

/// Maps a signature algorithm OID to its OpenSSL long name; unknown OIDs are returned as-is.
fn signature_algorithm_name(oid: &str) -> String {
    match oid {
        "1.2.840.113549.1.1.5" => "sha1WithRSAEncryption".to_string(),
        "1.2.840.113549.1.1.10" => "rsassaPss".to_string(),
        "1.2.840.113549.1.1.11" => "sha256WithRSAEncryption".to_string(),
        "1.2.840.113549.1.1.12" => "sha384WithRSAEncryption".to_string(),
        "1.2.840.113549.1.1.13" => "sha512WithRSAEncryption".to_string(),
        "1.2.840.10045.4.3.2" => "ecdsa-with-SHA256".to_string(),
        "1.2.840.10045.4.3.3" => "ecdsa-with-SHA384".to_string(),
        "1.2.840.10045.4.3.4" => "ecdsa-with-SHA512".to_string(),
        "1.3.101.112" => "ED25519".to_string(),
        _ => oid.to_string(),
    }
}

/// Extracts DNS names from the Subject Alternative Name extension.
///
/// IP addresses, e-mail addresses and other name forms are ignored.
pub(crate) fn extract_certificate_sans(
    cert: &x509_parser::certificate::X509Certificate<'_>,
) -> Result<Vec<String>> {
    let mut sans = Vec::new();

    for ext in cert.extensions() {
        if let ParsedExtension::SubjectAlternativeName(san) = ext.parsed_extension() {
            for general_name in &san.general_names {
                if let GeneralName::DNSName(dns_name) = general_name {
                    sans.push(dns_name.to_string());
                }
            }
        }
    }

    Ok(sans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_fingerprint_is_colon_separated_upper_hex() {
        assert_eq!(format_fingerprint(&[0x0a, 0xbc, 0xff]), "0A:BC:FF");
        assert_eq!(format_fingerprint(&[]), "");
    }

    #[test]
    fn test_sha256_fingerprint_length() {
        let digest = Sha256::digest(b"not a certificate");
        let formatted = format_fingerprint(&digest);
        // 32 bytes -> 32 pairs of hex digits and 31 separators
        assert_eq!(formatted.len(), 32 * 2 + 31);
    }

    #[test]
    fn test_describe_certificate_rejects_garbage() {
        let err = describe_certificate(b"definitely not DER").unwrap_err();
        assert!(err.to_string().contains("Failed to parse certificate"));
    }

    #[test]
    fn test_algorithm_names() {
        assert_eq!(key_algorithm_name("1.2.840.113549.1.1.1"), "RSA");
        assert_eq!(key_algorithm_name("1.2.3.4"), "1.2.3.4");
        assert_eq!(
            signature_algorithm_name("1.2.840.10045.4.3.2"),
            "ecdsa-with-SHA256"
        );
        assert_eq!(
            signature_algorithm_name("1.2.840.113549.1.1.11"),
            "sha256WithRSAEncryption"
        );
    }
}
