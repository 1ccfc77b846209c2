//
//  bitbucket-deploy-keys
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/02.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Configuration File Management
//!
//! Manages the CLI's configuration stored in platform-specific locations:
//!
//! | Platform | Path |
//! |----------|------|
//! | Linux | `~/.config/bbdk/config.toml` |
//! | macOS | `~/Library/Application Support/bbdk/config.toml` |
//! | Windows | `%APPDATA%\bbdk\config.toml` |
//!
//! The configuration holds the default workspace and repository used when
//! the corresponding CLI flags are omitted:
//!
//! ```toml
//! [core]
//! default_workspace = "myteam"
//! default_repository = "backend"
//! ```

use std::path::{Path, PathBuf};

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// The root configuration structure.
///
/// # Example
///
/// ```rust
/// use bitbucket_deploy_keys::config::Config;
///
/// let mut config = Config::default();
/// config.set("default_workspace", "myteam".to_string());
/// assert_eq!(config.get("default_workspace"), Some("myteam".to_string()));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Core settings.
    #[serde(default)]
    pub core: CoreConfig,
}

/// Core configuration settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Workspace used when `--workspace` is not supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_workspace: Option<String>,

    /// Repository used when `--repository` is not supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_repository: Option<String>,
}

impl Config {
    /// Loads the configuration from the default location.
    ///
    /// A missing configuration file is not an error; defaults are used.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads the configuration from an explicit path.
    ///
    /// # Parameters
    ///
    /// * `path` - The configuration file to read
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Saves the configuration to the default location.
    ///
    /// Creates the directory structure if it doesn't exist and overwrites
    /// the existing configuration file completely.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Saves the configuration to an explicit path.
    ///
    /// # Parameters
    ///
    /// * `path` - The configuration file to write
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the path to the configuration file.
    ///
    /// The file may not exist; this only returns where it would be.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the platform configuration directory cannot be
    /// determined.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "bbdk")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Gets a core configuration value by key.
    ///
    /// # Supported Keys
    ///
    /// | Key | Field |
    /// |-----|-------|
    /// | `"default_workspace"` | `core.default_workspace` |
    /// | `"default_repository"` | `core.default_repository` |
    ///
    /// # Returns
    ///
    /// Returns `Some(value)` if the key exists and has a value, `None` for
    /// unknown keys or unset values.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "default_workspace" => self.core.default_workspace.clone(),
            "default_repository" => self.core.default_repository.clone(),
            _ => None,
        }
    }

    /// Sets a core configuration value by key.
    ///
    /// Changes are only persisted when [`Config::save`] is called.
    ///
    /// # Returns
    ///
    /// Returns `true` if the key is known and was set, `false` otherwise.
    pub fn set(&mut self, key: &str, value: String) -> bool {
        match key {
            "default_workspace" => {
                self.core.default_workspace = Some(value);
                true
            }
            "default_repository" => {
                self.core.default_repository = Some(value);
                true
            }
            _ => false,
        }
    }

    /// Unsets a core configuration value by key.
    ///
    /// # Returns
    ///
    /// Returns `true` if the key is known and was cleared, `false` otherwise.
    pub fn unset(&mut self, key: &str) -> bool {
        match key {
            "default_workspace" => {
                self.core.default_workspace = None;
                true
            }
            "default_repository" => {
                self.core.default_repository = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_roundtrip() {
        let mut config = Config::default();
        assert_eq!(config.get("default_workspace"), None);

        assert!(config.set("default_workspace", "myteam".to_string()));
        assert!(config.set("default_repository", "backend".to_string()));
        assert_eq!(config.get("default_workspace"), Some("myteam".to_string()));
        assert_eq!(config.get("default_repository"), Some("backend".to_string()));

        assert!(config.unset("default_workspace"));
        assert_eq!(config.get("default_workspace"), None);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let mut config = Config::default();
        assert!(!config.set("unknown", "value".to_string()));
        assert!(!config.unset("unknown"));
        assert_eq!(config.get("unknown"), None);
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = Config::default();
        config.set("default_workspace", "myteam".to_string());

        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.core.default_workspace.as_deref(), Some("myteam"));
        assert_eq!(parsed.core.default_repository, None);
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.set("default_repository", "backend".to_string());
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.core.default_repository.as_deref(), Some("backend"));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert!(loaded.core.default_workspace.is_none());
    }
}
