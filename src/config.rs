use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::models::Author;
use crate::store::atomic_write;

pub const CONFIG_FILE: &str = "config.toml";
pub const DEFAULT_BASE_URL: &str = "https://api.jsonbin.io/v3";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub remote: RemoteConfig,
    pub network: NetworkConfig,
    pub profile: Author,
}

/// Static credentials for the shared remote document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub base_url: String,
    pub bin_id: String,
    pub master_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub online: bool,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            bin_id: String::new(),
            master_key: String::new(),
        }
    }
}

impl RemoteConfig {
    pub fn is_configured(&self) -> bool {
        !self.base_url.trim().is_empty()
            && !self.bin_id.trim().is_empty()
            && !self.master_key.trim().is_empty()
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self { online: true }
    }
}

impl Config {
    pub fn path(dir: &Path) -> PathBuf {
        dir.join(CONFIG_FILE)
    }

    /// Load `config.toml` from the data directory. Missing file means defaults.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = Self::path(dir);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn save(&self, dir: &Path) -> Result<()> {
        let path = Self::path(dir);
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        atomic_write(&path, content.as_bytes())
            .with_context(|| format!("Failed to write {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_expected_values() {
        let config = Config::default();
        assert_eq!(config.remote.base_url, DEFAULT_BASE_URL);
        assert!(config.remote.bin_id.is_empty());
        assert!(!config.remote.is_configured());
        assert!(config.network.online);
        assert_eq!(config.profile.handle, "@you");
    }

    #[test]
    fn load_with_no_config_file_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = Config::load(tmp.path()).unwrap();
        assert!(config.network.online);
        assert!(!config.remote.is_configured());
    }

    // Partial files only override what they name.
    #[test]
    fn load_reads_toml_file() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join(CONFIG_FILE),
            "[remote]\nbin_id = \"abc\"\nmaster_key = \"k\"\n\n[network]\nonline = false\n",
        )
        .unwrap();

        let config = Config::load(tmp.path()).unwrap();
        assert_eq!(config.remote.bin_id, "abc");
        assert_eq!(config.remote.base_url, DEFAULT_BASE_URL);
        assert!(config.remote.is_configured());
        assert!(!config.network.online);
        assert_eq!(config.profile.name, "You");
    }

    #[test]
    fn load_invalid_toml_fails() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(CONFIG_FILE), "[remote\n").unwrap();
        assert!(Config::load(tmp.path()).is_err());
    }

    #[test]
    fn save_then_load_keeps_values() {
        let tmp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.network.online = false;
        config.profile = Author::new("Ann", "@ann", "🐱");
        config.save(tmp.path()).unwrap();

        let loaded = Config::load(tmp.path()).unwrap();
        assert!(!loaded.network.online);
        assert_eq!(loaded.profile, Author::new("Ann", "@ann", "🐱"));
    }

    #[test]
    fn blank_credentials_are_not_configured() {
        let remote = RemoteConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            bin_id: "  ".to_string(),
            master_key: "k".to_string(),
        };
        assert!(!remote.is_configured());
    }
}
