use std::path::Path;

use crate::core::errors::Result;
use crate::core::models::certificate::PublicKeyCertificate;

/// Port for decoding certificate bytes into a public key certificate.
///
/// v0.3 only ships with the PEM parser in `adapters::parsers`; the
/// trait keeps the validator independent of the encoding.
pub trait CertificateParser {
    /// Parse raw file content into a `PublicKeyCertificate`.
    ///
    /// `path` is the file the bytes came from, for error context only;
    /// implementations must not touch the filesystem.
    fn parse(&self, path: &Path, content: &[u8]) -> Result<PublicKeyCertificate>;
}
