use serde::{Deserialize, Serialize};

/// Reserved namespace every delegation role must live under.
pub const DELEGATION_ROLE_PREFIX: &str = "targets/";

/// A named delegation inside a trusted collection: the set of keys
/// authorized to sign, the path prefixes they may sign for, and the
/// number of signatures required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegationRole {
    /// Role name, unique within the collection, e.g. `targets/releases`.
    pub name: String,
    /// IDs of the public keys authorized to sign for this role.
    pub key_ids: Vec<String>,
    /// Path prefixes this role is constrained to. Empty means the
    /// collection decides (typically: unconstrained).
    pub paths: Vec<String>,
    /// Minimum number of distinct keys that must sign.
    pub threshold: u32,
}

impl DelegationRole {
    /// Whether `name` is syntactically inside the reserved delegation
    /// namespace.
    pub fn is_valid_name(name: &str) -> bool {
        name.starts_with(DELEGATION_ROLE_PREFIX) && name.len() > DELEGATION_ROLE_PREFIX.len()
    }
}

impl std::fmt::Display for DelegationRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (threshold {})", self.name, self.threshold)
    }
}
