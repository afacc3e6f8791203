//! Engine and server configuration loading and validation

use anyhow::{Context, Result};
use groupscope_core::MatchOperator;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Lets a user edit selections of vocabularies owned by groups they are not in
    #[serde(default = "default_override_permission")]
    pub override_permission: String,

    /// Grants access to a group's taxonomy overview (checked inside the group)
    #[serde(default = "default_overview_permission")]
    pub overview_permission: String,

    /// Shows the add-vocabulary controls on the overview
    #[serde(default = "default_overview_controls_permission")]
    pub overview_controls_permission: String,

    /// Maximum autocomplete suggestions per query
    #[serde(default = "default_autocomplete_limit")]
    pub autocomplete_limit: usize,

    /// Match operator used when the field does not configure one
    #[serde(default)]
    pub default_match_operator: MatchOperator,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            override_permission: default_override_permission(),
            overview_permission: default_overview_permission(),
            overview_controls_permission: default_overview_controls_permission(),
            autocomplete_limit: default_autocomplete_limit(),
            default_match_operator: MatchOperator::default(),
        }
    }
}

/// Complete server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub engine: EngineConfig,

    pub dataset: DatasetSection,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSection {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

/// JSON dataset seeding the in-memory collaborators
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatasetSection {
    pub path: PathBuf,
}

fn default_override_permission() -> String { "group taxonomy widget see all groups".to_string() }
fn default_overview_permission() -> String { "access group_taxonomy overview".to_string() }
fn default_overview_controls_permission() -> String {
    "view control buttons on group taxonomy overview page".to_string()
}
fn default_autocomplete_limit() -> usize { 10 }
fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }
fn default_log_level() -> String { "info".to_string() }

impl ServerConfig {
    /// Load configuration from TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())
            .context("Failed to read configuration file")?;

        Self::from_toml(&contents)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: ServerConfig = toml::from_str(contents)
            .context("Failed to parse configuration file")?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Server port must be non-zero");
        }

        if self.engine.autocomplete_limit == 0 {
            anyhow::bail!("Autocomplete limit must be at least 1");
        }

        if self.engine.override_permission.trim().is_empty() {
            anyhow::bail!("Override permission name cannot be empty");
        }

        Ok(())
    }

    /// Dataset path resolved against the configuration file's directory
    pub fn dataset_path(&self, config_dir: Option<&Path>) -> PathBuf {
        if self.dataset.path.is_absolute() {
            self.dataset.path.clone()
        } else {
            config_dir
                .map(|dir| dir.join(&self.dataset.path))
                .unwrap_or_else(|| self.dataset.path.clone())
        }
    }
}
