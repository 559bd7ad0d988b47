//! Config service
//!
//! The config is a JSON file; the password never goes into it.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use nxrm_admin_core::client::ClientConfig;
use nxrm_admin_core::FeatureFlags;
use serde::{Deserialize, Serialize};

use crate::view::theme::Theme;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Server connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    /// Server root, e.g. `https://nexus.example.com`
    pub base_url: String,
    pub username: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ServerConfig {
    /// Host part of the base URL, used to key stored credentials
    pub fn host(&self) -> &str {
        let without_scheme = self
            .base_url
            .trim()
            .split_once("://")
            .map_or(self.base_url.trim(), |(_, rest)| rest);
        without_scheme
            .split(['/', '?', '#'])
            .next()
            .unwrap_or(without_scheme)
    }

    pub fn client_config(&self, password: String) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            username: self.username.clone(),
            password,
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

/// Application config
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    /// `None` runs the console on the demo data set
    pub server: Option<ServerConfig>,
    /// Mirror of the server's feature flags; `None` keeps the defaults
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_flags: Option<FeatureFlags>,
    pub theme: Theme,
}

impl AppConfig {
    /// Flags handed to the views
    pub fn flags(&self) -> FeatureFlags {
        self.feature_flags.unwrap_or_default()
    }

    /// Warning for a remote session running on default flags, which may hide
    /// server features such as cleanup preview or retain-N
    pub fn flags_warning(&self, demo: bool) -> Option<&'static str> {
        let remote = self.server.is_some() && !demo;
        (remote && self.feature_flags.is_none())
            .then_some("Feature flags not configured: set featureFlags to match the server")
    }
}

/// Config service trait
pub trait ConfigService: Send + Sync {
    /// Load the config, defaults when nothing is stored yet
    fn load(&self) -> Result<AppConfig>;

    /// Save the config
    fn save(&self, config: &AppConfig) -> Result<()>;
}

/// Config stored in a JSON file
pub struct FileConfigService {
    path: PathBuf,
}

impl FileConfigService {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// `<config dir>/nxrm-admin/config.json`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("nxrm-admin")
            .join("config.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigService for FileConfigService {
    fn load(&self) -> Result<AppConfig> {
        if !self.path.exists() {
            log::info!("No config at {}, using defaults", self.path.display());
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read config {}", self.path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config {}", self.path.display()))?;

        log::debug!("Loaded config from {}", self.path.display());
        Ok(config)
    }

    fn save(&self, config: &AppConfig) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        let content = serde_json::to_string_pretty(config)?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write config {}", self.path.display()))?;
        Ok(())
    }
}
