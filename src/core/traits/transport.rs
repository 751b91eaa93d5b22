use crate::core::errors::Result;
use crate::core::models::delegation_role::DelegationRole;

/// Port for fetching the latest signed delegation state from a remote
/// trust server.
///
/// Implementations live in `adapters::transport`. The remote server
/// address is part of the transport, not of the collection: passing no
/// transport to `CollectionOpener::open` means local-only operation.
pub trait Transport {
    /// Fetch the current delegation roles for `gun` from the remote.
    fn fetch_delegation_roles(&self, gun: &str) -> Result<Vec<DelegationRole>>;
}
