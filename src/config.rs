//! Engine configuration

use crate::form::Naming;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration shared by every binder of a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Prefix turning a declared field id into its DOM id
    pub id_prefix: String,
    /// Marker standing for the block index in repeated form blocks
    pub block_placeholder: String,
    /// Give up on a lookup after this long; unbounded when unset
    pub lookup_timeout_ms: Option<u64>,
    /// Drop lookup responses superseded by a newer change of the same master
    pub discard_stale_responses: bool,
    /// User agent for the HTTP transport
    pub user_agent: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let naming = Naming::default();
        Self {
            id_prefix: naming.id_prefix,
            block_placeholder: naming.block_placeholder,
            lookup_timeout_ms: None,
            discard_stale_responses: false,
            user_agent: None,
        }
    }
}

impl EngineConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "form-deps", "form-deps")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from the user config dir, or defaults
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from `path`; a missing file means defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: EngineConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the user config dir
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            self.save_to(&path)?;
        }
        Ok(())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn naming(&self) -> Naming {
        Naming {
            id_prefix: self.id_prefix.clone(),
            block_placeholder: self.block_placeholder.clone(),
        }
    }

    pub fn lookup_timeout(&self) -> Option<Duration> {
        self.lookup_timeout_ms.map(Duration::from_millis)
    }
}
