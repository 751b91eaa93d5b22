use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::core::errors::{Result, TrustctlError};

/// Default remote trust server, matching a locally running server.
pub const DEFAULT_REMOTE_SERVER: &str = "https://localhost:4443";

/// Resolved configuration for one command invocation.
///
/// Built once in `main` and passed explicitly into every operation;
/// there is deliberately no process-wide configuration accessor.
/// Precedence: command-line flag, then config file, then default.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding the local trust databases, one per GUN.
    pub trust_dir: PathBuf,
    /// Base URL of the remote trust server used for refreshes.
    pub remote_server: String,
}

/// On-disk shape of `~/.trustctl/config.toml`. Every field is optional
/// so a partial (or absent) file falls back to defaults.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    trust_dir: Option<PathBuf>,
    remote_server: Option<String>,
}

impl AppConfig {
    /// Resolve configuration from an optional explicit config file and
    /// command-line overrides.
    ///
    /// An explicitly passed `--config` file must exist and parse; the
    /// default config path is used only if present.
    pub fn load(
        config_path: Option<&Path>,
        trust_dir_flag: Option<&Path>,
        server_flag: Option<&str>,
    ) -> Result<Self> {
        let file = match config_path {
            Some(path) => Self::read_file(path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::read_file(&path)?,
                _ => ConfigFile::default(),
            },
        };

        let trust_dir = trust_dir_flag
            .map(Path::to_path_buf)
            .or(file.trust_dir)
            .unwrap_or_else(Self::default_trust_dir);

        let remote_server = server_flag
            .map(str::to_string)
            .or(file.remote_server)
            .unwrap_or_else(|| DEFAULT_REMOTE_SERVER.to_string());

        if remote_server.is_empty() {
            return Err(TrustctlError::InvalidConfig {
                detail: "remote_server must not be empty".into(),
            });
        }

        Ok(Self {
            trust_dir,
            remote_server,
        })
    }

    fn read_file(path: &Path) -> Result<ConfigFile> {
        if !path.exists() {
            return Err(TrustctlError::InvalidConfig {
                detail: format!("config file not found: {}", path.display()),
            });
        }
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| TrustctlError::InvalidConfig {
            detail: format!("failed to parse {}: {e}", path.display()),
        })
    }

    fn default_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".trustctl").join("config.toml"))
    }

    fn default_trust_dir() -> PathBuf {
        dirs::home_dir()
            .map(|home| home.join(".trustctl").join("trust"))
            .unwrap_or_else(|| PathBuf::from(".trustctl/trust"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_file_values() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        std::fs::write(
            &config_path,
            "trust_dir = \"/var/lib/trustctl\"\nremote_server = \"https://trust.internal\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load(
            Some(&config_path),
            Some(Path::new("/tmp/override")),
            None,
        )
        .unwrap();

        assert_eq!(cfg.trust_dir, PathBuf::from("/tmp/override"));
        assert_eq!(cfg.remote_server, "https://trust.internal");
    }

    #[test]
    fn missing_explicit_config_fails() {
        let result = AppConfig::load(Some(Path::new("/no/such/config.toml")), None, None);
        assert!(matches!(result, Err(TrustctlError::InvalidConfig { .. })));
    }

    #[test]
    fn unparseable_config_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        std::fs::write(&config_path, "trust_dir = [not toml").unwrap();

        let result = AppConfig::load(Some(&config_path), None, None);
        assert!(matches!(result, Err(TrustctlError::InvalidConfig { .. })));
    }

    #[test]
    fn partial_file_keeps_defaults_for_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        std::fs::write(&config_path, "trust_dir = \"/var/lib/trustctl\"\n").unwrap();

        let cfg = AppConfig::load(Some(&config_path), None, None).unwrap();
        assert_eq!(cfg.trust_dir, PathBuf::from("/var/lib/trustctl"));
        assert_eq!(cfg.remote_server, DEFAULT_REMOTE_SERVER);
    }
}
