use std::path::{Path, PathBuf};

use crate::core::errors::{Result, TrustctlError};
use crate::core::models::certificate::PublicKeyCertificate;
use crate::core::models::delegation_role::DelegationRole;
use crate::core::models::staged_change::{StagedAction, StagedChange, StagedKey};
use crate::core::services::request_validator::validate_gun;
use crate::core::traits::collection::{CollectionOpener, TrustedCollection};
use crate::core::traits::transport::Transport;

/// Cached copy of the last known signed delegation state.
const STATE_FILE: &str = "delegations.json";

/// Directory of pending changes, one JSON file per staged mutation.
const CHANGELIST_DIR: &str = "changelist";

/// File-backed trust store, one directory per GUN under the trust dir.
///
/// Layout:
/// ```text
/// <trust_dir>/<gun>/delegations.json       last refreshed signed state
/// <trust_dir>/<gun>/changelist/000000.json staged changes, in order
/// ```
///
/// Opening with a transport refreshes `delegations.json` from the
/// remote before anything is read; opening without one never touches
/// the network. Staged changes stay in the changelist until a publish
/// step consumes them; this adapter never publishes.
pub struct FileTrustStore;

impl CollectionOpener for FileTrustStore {
    fn open(
        &self,
        trust_dir: &Path,
        gun: &str,
        transport: Option<&dyn Transport>,
    ) -> Result<Box<dyn TrustedCollection>> {
        validate_gun(gun)?;

        let root = trust_dir.join(gun);
        std::fs::create_dir_all(root.join(CHANGELIST_DIR))?;

        let roles = match transport {
            Some(transport) => {
                let roles = transport.fetch_delegation_roles(gun)?;
                write_state(&root, &roles)?;
                roles
            }
            None => read_state(&root)?,
        };

        Ok(Box::new(FileCollection {
            gun: gun.to_string(),
            root,
            roles,
        }))
    }
}

struct FileCollection {
    gun: String,
    root: PathBuf,
    roles: Vec<DelegationRole>,
}

impl FileCollection {
    /// Staged changes in sequence order.
    fn staged_changes(&self) -> Result<Vec<StagedChange>> {
        let dir = self.root.join(CHANGELIST_DIR);
        let mut entries: Vec<PathBuf> = std::fs::read_dir(&dir)?
            .filter_map(|e| e.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .collect();
        entries.sort();

        let mut changes = Vec::with_capacity(entries.len());
        for path in entries {
            let content = std::fs::read_to_string(&path)?;
            let change: StagedChange =
                serde_json::from_str(&content).map_err(|e| TrustctlError::TrustStore {
                    detail: format!("corrupt staged change {}: {e}", path.display()),
                })?;
            changes.push(change);
        }
        Ok(changes)
    }

    fn stage(&self, sequence: usize, change: &StagedChange) -> Result<()> {
        let path = self
            .root
            .join(CHANGELIST_DIR)
            .join(format!("{sequence:06}.json"));
        let json =
            serde_json::to_string_pretty(change).map_err(|e| TrustctlError::TrustStore {
                detail: format!("failed to serialize staged change: {e}"),
            })?;
        std::fs::write(&path, json)?;
        Ok(())
    }
}

impl TrustedCollection for FileCollection {
    fn delegation_roles(&self) -> Result<Vec<DelegationRole>> {
        Ok(self.roles.clone())
    }

    fn add_delegation(
        &mut self,
        role: &str,
        threshold: u32,
        keys: &[PublicKeyCertificate],
        paths: &[String],
    ) -> Result<()> {
        let staged = self.staged_changes()?;
        if staged.iter().any(|c| c.role == role) {
            return Err(TrustctlError::TrustStore {
                detail: format!(
                    "a change for role {role} is already staged in \"{}\"; \
                     publish or discard it before staging another",
                    self.gun
                ),
            });
        }

        let change = StagedChange {
            action: StagedAction::Add,
            role: role.to_string(),
            key_ids: keys.iter().map(|k| k.key_id()).collect(),
            keys: keys
                .iter()
                .map(|k| StagedKey {
                    key_id: k.key_id(),
                    public_key: hex::encode(&k.public_key),
                })
                .collect(),
            paths: paths.to_vec(),
            threshold,
            staged_at: chrono::Utc::now(),
        };
        self.stage(staged.len(), &change)
    }

    fn remove_delegation(&mut self, role: &str) -> Result<()> {
        let staged = self.staged_changes()?;

        let known = self.roles.iter().any(|r| r.name == role)
            || staged
                .iter()
                .any(|c| c.role == role && c.action == StagedAction::Add);
        if !known {
            return Err(TrustctlError::TrustStore {
                detail: format!("no delegation role named {role} in \"{}\"", self.gun),
            });
        }
        if staged.iter().any(|c| c.role == role) {
            return Err(TrustctlError::TrustStore {
                detail: format!(
                    "a change for role {role} is already staged in \"{}\"; \
                     publish or discard it before staging another",
                    self.gun
                ),
            });
        }

        let change = StagedChange {
            action: StagedAction::Remove,
            role: role.to_string(),
            key_ids: Vec::new(),
            keys: Vec::new(),
            paths: Vec::new(),
            threshold: 0,
            staged_at: chrono::Utc::now(),
        };
        self.stage(staged.len(), &change)
    }
}

fn state_path(root: &Path) -> PathBuf {
    root.join(STATE_FILE)
}

fn read_state(root: &Path) -> Result<Vec<DelegationRole>> {
    let path = state_path(root);
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = std::fs::read_to_string(&path)?;
    serde_json::from_str(&content).map_err(|e| TrustctlError::TrustStore {
        detail: format!("corrupt delegation state {}: {e}", path.display()),
    })
}

fn write_state(root: &Path, roles: &[DelegationRole]) -> Result<()> {
    let json = serde_json::to_string_pretty(roles).map_err(|e| TrustctlError::TrustStore {
        detail: format!("failed to serialize delegation state: {e}"),
    })?;
    std::fs::write(state_path(root), json)?;
    Ok(())
}
