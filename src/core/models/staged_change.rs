use serde::{Deserialize, Serialize};

/// What a staged change does to the delegation tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StagedAction {
    Add,
    Remove,
}

impl std::fmt::Display for StagedAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StagedAction::Add => write!(f, "addition"),
            StagedAction::Remove => write!(f, "removal"),
        }
    }
}

/// A local, not-yet-published mutation to a collection's delegation
/// tree. Staged changes pile up in the changelist until a publish step
/// signs and uploads them; nothing here is visible to other readers of
/// the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagedChange {
    pub action: StagedAction,
    /// The delegation role this change targets.
    pub role: String,
    /// IDs of the keys being delegated to (empty for removals).
    #[serde(default)]
    pub key_ids: Vec<String>,
    /// Raw key material keyed by ID, hex-encoded, so the publish step
    /// can embed the keys in the signed metadata (empty for removals).
    #[serde(default)]
    pub keys: Vec<StagedKey>,
    /// Path constraints for the role (empty for removals).
    #[serde(default)]
    pub paths: Vec<String>,
    /// Signing threshold for additions; removals carry 0.
    #[serde(default)]
    pub threshold: u32,
    /// When this change was staged, UTC.
    pub staged_at: chrono::DateTime<chrono::Utc>,
}

/// A public key carried inside a staged addition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagedKey {
    pub key_id: String,
    /// Hex-encoded raw key material.
    pub public_key: String,
}
