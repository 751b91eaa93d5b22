use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

/// Length of a key ID: a SHA256 digest rendered as lowercase hex.
pub const KEY_ID_LENGTH: usize = 64;

/// A parsed public key certificate: the raw key material plus the
/// window in which the issuer considers the key usable.
///
/// Produced by a `CertificateParser` adapter; the core never looks at
/// the encoding, only at the key bytes and the validity window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKeyCertificate {
    /// Raw public key material as carried by the certificate.
    pub public_key: Vec<u8>,
    /// Start of the validity window (inclusive).
    pub not_before: DateTime<Utc>,
    /// End of the validity window (inclusive).
    pub not_after: DateTime<Utc>,
}

impl PublicKeyCertificate {
    /// Deterministic identifier of the wrapped key: the SHA256 hex
    /// digest of the key material. Always `KEY_ID_LENGTH` characters.
    pub fn key_id(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.public_key);
        format!("{:x}", hasher.finalize())
    }

    /// Whether `now` falls inside the certificate's validity window.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.not_before && now <= self.not_after
    }
}
