use std::path::PathBuf;

use chrono::{DateTime, Utc};

/// All domain errors for trustctl.
///
/// Each variant provides enough context to diagnose the issue
/// without needing a debugger.
#[derive(Debug, thiserror::Error)]
pub enum TrustctlError {
    #[error("{detail}")]
    Usage { detail: String },

    #[error(
        "Certificate file not found: {path}\n\n  \
         Check that the path is correct and the file exists."
    )]
    CertificateNotFound { path: PathBuf },

    #[error("Unable to read certificate file {path}: {detail}")]
    CertificateRead { path: PathBuf, detail: String },

    #[error(
        "Unable to parse a public key certificate from {path}: {detail}\n\n  \
         Expected a PEM block tagged PUBLIC KEY CERTIFICATE with \
         Not-Before and Not-After headers."
    )]
    CertificateParse { path: PathBuf, detail: String },

    #[error(
        "Invalid key ID derived from certificate: {key_id}\n\n  \
         Key IDs must be {expected}-character hex digests."
    )]
    MalformedKeyId { key_id: String, expected: usize },

    #[error(
        "Certificate is outside its validity window\n\n  \
         Valid from {not_before} until {not_after}, current time {now}.\n  \
         Obtain a current certificate for this key before delegating to it."
    )]
    CertificateOutsideValidity {
        not_before: DateTime<Utc>,
        not_after: DateTime<Utc>,
        now: DateTime<Utc>,
    },

    #[error(
        "Invalid delegation role name: '{role}'\n\n  \
         Delegation roles must live under the '{prefix}' namespace, \
         e.g. {prefix}releases."
    )]
    InvalidRole { role: String, prefix: &'static str },

    #[error("Invalid signing threshold {threshold}: must be at least 1")]
    InvalidThreshold { threshold: u32 },

    #[error(
        "Invalid Global Unique Name: '{gun}'\n\n  \
         A GUN must be a relative path-like name without '.' or '..' components."
    )]
    InvalidGun { gun: String },

    #[error("Failed to {operation} for \"{gun}\": {detail}")]
    Collaborator {
        gun: String,
        operation: &'static str,
        detail: String,
    },

    #[error("Trust store error: {detail}")]
    TrustStore { detail: String },

    #[error("Transport error contacting {server}: {detail}")]
    Transport { server: String, detail: String },

    #[error("Invalid configuration: {detail}")]
    InvalidConfig { detail: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TrustctlError>;
