use std::path::Path;

use crate::core::errors::{Result, TrustctlError};
use crate::core::models::certificate::PublicKeyCertificate;
use crate::core::models::delegation_role::DelegationRole;
use crate::core::traits::collection::CollectionOpener;
use crate::core::traits::transport::Transport;

/// Stages delegation mutations through a `CollectionOpener` backend.
///
/// `list` opens the collection with a live refresh so the role set
/// reflects the latest remote signed state; `add` and `remove` open
/// local-only, because they are batched edits published later and must
/// work offline. No operation is ever retried: a failed fetch or stage
/// may indicate tampering or an inconsistent remote, not a transient
/// fault, so the error is wrapped with context and surfaced as-is.
pub struct DelegationService<O: CollectionOpener> {
    pub opener: O,
}

impl<O: CollectionOpener> DelegationService<O> {
    /// Enumerate the delegation roles for `gun`, refreshed from the
    /// remote trust server first.
    pub fn list(
        &self,
        trust_dir: &Path,
        gun: &str,
        transport: &dyn Transport,
    ) -> Result<Vec<DelegationRole>> {
        let collection = self
            .opener
            .open(trust_dir, gun, Some(transport))
            .map_err(|e| wrap(gun, "open the trusted collection", e))?;

        collection
            .delegation_roles()
            .map_err(|e| wrap(gun, "retrieve delegation roles", e))
    }

    /// Stage the addition of `role` with the given keys, paths, and
    /// threshold. Local-only; durable after the next publish.
    pub fn add(
        &self,
        trust_dir: &Path,
        gun: &str,
        role: &str,
        threshold: u32,
        keys: &[PublicKeyCertificate],
        paths: &[String],
    ) -> Result<()> {
        let mut collection = self
            .opener
            .open(trust_dir, gun, None)
            .map_err(|e| wrap(gun, "open the trusted collection", e))?;

        collection
            .add_delegation(role, threshold, keys, paths)
            .map_err(|e| wrap(gun, "add delegation", e))
    }

    /// Stage the removal of `role`. Local-only; durable after the next
    /// publish.
    pub fn remove(&self, trust_dir: &Path, gun: &str, role: &str) -> Result<()> {
        let mut collection = self
            .opener
            .open(trust_dir, gun, None)
            .map_err(|e| wrap(gun, "open the trusted collection", e))?;

        collection
            .remove_delegation(role)
            .map_err(|e| wrap(gun, "remove delegation", e))
    }
}

/// Attach GUN and operation context to a collaborator failure.
fn wrap(gun: &str, operation: &'static str, err: TrustctlError) -> TrustctlError {
    TrustctlError::Collaborator {
        gun: gun.to_string(),
        operation,
        detail: err.to_string(),
    }
}
