use std::path::Path;

use chrono::{DateTime, Utc};

use crate::core::errors::{Result, TrustctlError};
use crate::core::models::certificate::PublicKeyCertificate;
use crate::core::traits::certificate_parser::CertificateParser;

/// PEM tag a public key certificate must carry.
pub const CERTIFICATE_TAG: &str = "PUBLIC KEY CERTIFICATE";

/// Encapsulated header naming the start of the validity window.
pub const NOT_BEFORE_HEADER: &str = "Not-Before";

/// Encapsulated header naming the end of the validity window.
pub const NOT_AFTER_HEADER: &str = "Not-After";

/// Parses public key certificates from PEM blocks.
///
/// Expected shape: a single block tagged `PUBLIC KEY CERTIFICATE`,
/// with `Not-Before` and `Not-After` RFC 3339 headers and the raw key
/// material as the body.
///
/// ```text
/// -----BEGIN PUBLIC KEY CERTIFICATE-----
/// Not-Before: 2026-01-01T00:00:00Z
/// Not-After: 2027-01-01T00:00:00Z
///
/// <base64 key material>
/// -----END PUBLIC KEY CERTIFICATE-----
/// ```
pub struct PemCertificateParser;

impl PemCertificateParser {
    fn header_timestamp(pem: &pem::Pem, name: &str, path: &Path) -> Result<DateTime<Utc>> {
        let value = pem
            .headers()
            .get(name)
            .ok_or_else(|| parse_error(path, format!("missing {name} header")))?;

        DateTime::parse_from_rfc3339(value)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|e| parse_error(path, format!("invalid {name} timestamp '{value}': {e}")))
    }
}

impl CertificateParser for PemCertificateParser {
    fn parse(&self, path: &Path, content: &[u8]) -> Result<PublicKeyCertificate> {
        let pem = pem::parse(content).map_err(|e| parse_error(path, e.to_string()))?;

        if pem.tag() != CERTIFICATE_TAG {
            return Err(parse_error(
                path,
                format!("unexpected PEM tag '{}'", pem.tag()),
            ));
        }
        if pem.contents().is_empty() {
            return Err(parse_error(path, "certificate carries no key material".into()));
        }

        let not_before = Self::header_timestamp(&pem, NOT_BEFORE_HEADER, path)?;
        let not_after = Self::header_timestamp(&pem, NOT_AFTER_HEADER, path)?;
        if not_after < not_before {
            return Err(parse_error(
                path,
                "validity window ends before it starts".into(),
            ));
        }

        Ok(PublicKeyCertificate {
            public_key: pem.contents().to_vec(),
            not_before,
            not_after,
        })
    }
}

fn parse_error(path: &Path, detail: String) -> TrustctlError {
    TrustctlError::CertificateParse {
        path: path.to_path_buf(),
        detail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn encode(
        tag: &str,
        key: &[u8],
        not_before: Option<&str>,
        not_after: Option<&str>,
    ) -> String {
        // pem's HeaderMap::add rejects values containing ':', which every
        // RFC 3339 timestamp does, so splice the header lines in manually.
        let body = pem::encode(&pem::Pem::new(tag, key.to_vec()));
        let mut headers = String::new();
        if let Some(v) = not_before {
            headers.push_str(&format!("{NOT_BEFORE_HEADER}: {v}\r\n"));
        }
        if let Some(v) = not_after {
            headers.push_str(&format!("{NOT_AFTER_HEADER}: {v}\r\n"));
        }
        if headers.is_empty() {
            return body;
        }
        let (begin, rest) = body.split_once("\r\n").unwrap();
        format!("{begin}\r\n{headers}\r\n{rest}")
    }

    fn parse(content: &str) -> Result<PublicKeyCertificate> {
        PemCertificateParser.parse(Path::new("cert.pem"), content.as_bytes())
    }

    #[test]
    fn parses_a_complete_certificate() {
        let content = encode(
            CERTIFICATE_TAG,
            b"delegate key material",
            Some("2026-01-01T00:00:00Z"),
            Some("2027-01-01T00:00:00Z"),
        );

        let cert = parse(&content).unwrap();
        assert_eq!(cert.public_key, b"delegate key material");
        assert_eq!(
            cert.not_before,
            Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(
            cert.not_after,
            Utc.with_ymd_and_hms(2027, 1, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn rejects_non_pem_input() {
        let result = parse("definitely not a pem block");
        assert!(matches!(
            result,
            Err(TrustctlError::CertificateParse { .. })
        ));
    }

    #[test]
    fn rejects_wrong_tag() {
        let content = encode(
            "PRIVATE KEY",
            b"key",
            Some("2026-01-01T00:00:00Z"),
            Some("2027-01-01T00:00:00Z"),
        );
        let err = parse(&content).unwrap_err();
        assert!(err.to_string().contains("unexpected PEM tag"));
    }

    #[test]
    fn rejects_missing_validity_headers() {
        let content = encode(CERTIFICATE_TAG, b"key", None, Some("2027-01-01T00:00:00Z"));
        let err = parse(&content).unwrap_err();
        assert!(err.to_string().contains("missing Not-Before header"));

        let content = encode(CERTIFICATE_TAG, b"key", Some("2026-01-01T00:00:00Z"), None);
        let err = parse(&content).unwrap_err();
        assert!(err.to_string().contains("missing Not-After header"));
    }

    #[test]
    fn rejects_inverted_window() {
        let content = encode(
            CERTIFICATE_TAG,
            b"key",
            Some("2027-01-01T00:00:00Z"),
            Some("2026-01-01T00:00:00Z"),
        );
        assert!(parse(&content).is_err());
    }

    #[test]
    fn rejects_empty_key_material() {
        let content = encode(
            CERTIFICATE_TAG,
            b"",
            Some("2026-01-01T00:00:00Z"),
            Some("2027-01-01T00:00:00Z"),
        );
        assert!(parse(&content).is_err());
    }
}
