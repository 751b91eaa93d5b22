use std::path::Path;

use crate::core::errors::Result;
use crate::core::models::certificate::PublicKeyCertificate;
use crate::core::models::delegation_role::DelegationRole;
use crate::core::traits::transport::Transport;

/// Port for a single opened trusted collection.
///
/// Mutations are staged locally by the implementation; nothing becomes
/// durable or visible to other readers until a separate publish step
/// signs and uploads the new metadata. This crate never publishes.
pub trait TrustedCollection {
    /// The collection's delegation roles, in collaborator order.
    fn delegation_roles(&self) -> Result<Vec<DelegationRole>>;

    /// Stage the addition of a delegation: `role` gets the given keys,
    /// path constraints, and signing threshold.
    fn add_delegation(
        &mut self,
        role: &str,
        threshold: u32,
        keys: &[PublicKeyCertificate],
        paths: &[String],
    ) -> Result<()>;

    /// Stage the removal of the named delegation role.
    fn remove_delegation(&mut self, role: &str) -> Result<()>;
}

/// Port for opening (or creating) the trusted collection for a GUN.
///
/// Implementations live in `adapters::trust_store`. A `None` transport
/// means local-only: the collection is opened without refreshing from
/// the remote trust server.
pub trait CollectionOpener {
    fn open(
        &self,
        trust_dir: &Path,
        gun: &str,
        transport: Option<&dyn Transport>,
    ) -> Result<Box<dyn TrustedCollection>>;
}
