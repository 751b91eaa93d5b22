use std::path::{Component, Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::core::errors::{Result, TrustctlError};
use crate::core::models::certificate::{KEY_ID_LENGTH, PublicKeyCertificate};
use crate::core::models::delegation_role::{DELEGATION_ROLE_PREFIX, DelegationRole};
use crate::core::traits::certificate_parser::CertificateParser;

/// A validated `delegation list` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    pub gun: String,
}

/// A validated `delegation remove` invocation.
///
/// `key_id` is carried for the confirmation message only; the removal
/// key is `role`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveRequest {
    pub gun: String,
    pub key_id: String,
    pub role: String,
}

/// A validated `delegation add` invocation, certificate already parsed
/// and inside its validity window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddRequest {
    pub gun: String,
    pub certificate: PublicKeyCertificate,
    pub key_id: String,
    pub role: String,
    pub threshold: u32,
    pub paths: Vec<String>,
}

/// Turns raw command arguments into validated requests.
///
/// Every check runs before anything touches the trust database, in a
/// fixed order returning the first failure: argument shape, then file
/// existence, readability, parseability, key-ID shape, certificate
/// window, and finally role-name shape. A failing request therefore
/// never stages partial state, and repeating it is side-effect-free.
pub struct RequestValidator<'a> {
    parser: &'a dyn CertificateParser,
}

impl<'a> RequestValidator<'a> {
    pub fn new(parser: &'a dyn CertificateParser) -> Self {
        Self { parser }
    }

    /// Validate a `list` invocation: exactly one argument, the GUN.
    pub fn validate_list(&self, args: &[String]) -> Result<ListRequest> {
        if args.len() != 1 {
            return Err(TrustctlError::Usage {
                detail: "please provide a Global Unique Name as the single argument to list"
                    .into(),
            });
        }
        let gun = args[0].clone();
        validate_gun(&gun)?;
        Ok(ListRequest { gun })
    }

    /// Validate a `remove` invocation: GUN, key ID, and role.
    pub fn validate_remove(&self, args: &[String]) -> Result<RemoveRequest> {
        if args.len() != 3 {
            return Err(TrustctlError::Usage {
                detail: "must specify the Global Unique Name, the key ID and the role \
                         of the delegation to remove"
                    .into(),
            });
        }
        let gun = args[0].clone();
        let key_id = args[1].clone();
        let role = args[2].clone();

        validate_gun(&gun)?;
        validate_role_name(&role)?;

        Ok(RemoveRequest { gun, key_id, role })
    }

    /// Validate an `add` invocation: GUN, certificate PEM path, role,
    /// and one or more delegation paths.
    pub fn validate_add(
        &self,
        args: &[String],
        threshold: u32,
        now: DateTime<Utc>,
    ) -> Result<AddRequest> {
        if args.len() < 4 {
            return Err(TrustctlError::Usage {
                detail: "must specify the Global Unique Name, the public key certificate \
                         path, the role of the delegation to add and a list of paths"
                    .into(),
            });
        }
        let gun = args[0].clone();
        let cert_path = PathBuf::from(&args[1]);
        let role = args[2].clone();
        let paths = args[3..].to_vec();

        validate_gun(&gun)?;
        validate_threshold(threshold)?;

        let certificate = self.validate_certificate_file(&cert_path)?;
        let key_id = certificate.key_id();
        validate_key_id(&key_id)?;
        validate_certificate_window(&certificate, now)?;
        validate_role_name(&role)?;

        Ok(AddRequest {
            gun,
            certificate,
            key_id,
            role,
            threshold,
            paths,
        })
    }

    /// Load and parse a certificate file, distinguishing missing,
    /// unreadable, and unparseable files.
    pub fn validate_certificate_file(&self, path: &Path) -> Result<PublicKeyCertificate> {
        if !path.exists() {
            return Err(TrustctlError::CertificateNotFound {
                path: path.to_path_buf(),
            });
        }
        let bytes = std::fs::read(path).map_err(|e| TrustctlError::CertificateRead {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;
        self.parser.parse(path, &bytes)
    }
}

/// Reject key IDs whose length differs from the fixed digest size,
/// independent of cryptographic validity.
pub fn validate_key_id(key_id: &str) -> Result<()> {
    if key_id.len() != KEY_ID_LENGTH {
        return Err(TrustctlError::MalformedKeyId {
            key_id: key_id.to_string(),
            expected: KEY_ID_LENGTH,
        });
    }
    Ok(())
}

/// Reject certificates whose validity window does not contain `now`.
pub fn validate_certificate_window(cert: &PublicKeyCertificate, now: DateTime<Utc>) -> Result<()> {
    if !cert.is_valid_at(now) {
        return Err(TrustctlError::CertificateOutsideValidity {
            not_before: cert.not_before,
            not_after: cert.not_after,
            now,
        });
    }
    Ok(())
}

/// Reject role names outside the reserved delegation namespace.
pub fn validate_role_name(role: &str) -> Result<()> {
    if !DelegationRole::is_valid_name(role) {
        return Err(TrustctlError::InvalidRole {
            role: role.to_string(),
            prefix: DELEGATION_ROLE_PREFIX,
        });
    }
    Ok(())
}

/// Reject thresholds below the minimum of one signing key.
pub fn validate_threshold(threshold: u32) -> Result<()> {
    if threshold < 1 {
        return Err(TrustctlError::InvalidThreshold { threshold });
    }
    Ok(())
}

/// Reject GUNs that are empty or would escape the trust directory when
/// used as a relative path.
pub fn validate_gun(gun: &str) -> Result<()> {
    let malformed = gun.is_empty()
        || Path::new(gun).components().any(|c| {
            !matches!(c, Component::Normal(part) if !part.is_empty())
        });
    if malformed {
        return Err(TrustctlError::InvalidGun {
            gun: gun.to_string(),
        });
    }
    Ok(())
}
