//! Configuration management for taskdesk
//!
//! This module handles loading, parsing, and validation of configuration files.

use crate::constants::{
    CONFIG_GENERATED, DEFAULT_AUTOSAVE_INTERVAL_SECONDS, DEFAULT_BASE_URL, DEFAULT_CSRF_TOKEN_ENV,
    DEFAULT_SAVE_DEBOUNCE_MILLIS, MAX_AUTOSAVE_INTERVAL_SECONDS, MAX_SAVE_DEBOUNCE_MILLIS,
};
use crate::controller::task_view::{SortMode, TaskFilter};
use crate::entities::WorkspaceId;
use crate::utils::datetime;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub ui: UiConfig,
    pub notes: NotesConfig,
    pub logging: LoggingConfig,
}

/// Connection to the REST API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the web application, e.g. "http://127.0.0.1:5000"
    pub base_url: String,
    /// CSRF token sent on mutating requests; takes precedence over `csrf_token_env`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csrf_token: Option<String>,
    /// Environment variable holding the CSRF token
    pub csrf_token_env: String,
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Status filter applied on startup
    pub default_filter: TaskFilter,
    /// Sort order applied on startup
    pub default_sort: SortMode,
    /// Enable mouse support
    pub mouse_enabled: bool,
}

/// Workspace notes editor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotesConfig {
    /// Workspace whose notes are edited
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<WorkspaceId>,
    /// Periodic autosave interval in seconds
    pub autosave_interval_seconds: u64,
    /// Delay after the last keystroke before saving, in milliseconds
    pub save_debounce_millis: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// Also write logs to a file under the data directory
    pub enabled: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            csrf_token: None,
            csrf_token_env: DEFAULT_CSRF_TOKEN_ENV.to_string(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_filter: TaskFilter::All,
            default_sort: SortMode::Manual,
            mouse_enabled: false,
        }
    }
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            workspace_id: None,
            autosave_interval_seconds: DEFAULT_AUTOSAVE_INTERVAL_SECONDS,
            save_debounce_millis: DEFAULT_SAVE_DEBOUNCE_MILLIS,
        }
    }
}

impl ApiConfig {
    /// The configured token, else the value of `csrf_token_env`
    pub fn resolve_csrf_token(&self) -> Option<String> {
        self.csrf_token
            .clone()
            .filter(|token| !token.is_empty())
            .or_else(|| std::env::var(&self.csrf_token_env).ok().filter(|token| !token.is_empty()))
    }
}

impl NotesConfig {
    pub fn autosave_interval(&self) -> Duration {
        Duration::from_secs(self.autosave_interval_seconds)
    }

    pub fn save_debounce(&self) -> Duration {
        Duration::from_millis(self.save_debounce_millis)
    }
}

impl Config {
    /// Load configuration from file or return defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::find_config_file()?;

        if let Some(path) = config_path {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Find configuration file in order of precedence
    fn find_config_file() -> Result<Option<PathBuf>> {
        // 1. Check current directory
        let current_dir_config = PathBuf::from("taskdesk.toml");
        if current_dir_config.exists() {
            return Ok(Some(current_dir_config));
        }

        // 2. Check XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("taskdesk").join("config.toml");
            if xdg_config.exists() {
                return Ok(Some(xdg_config));
            }
        }

        Ok(None)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let base_url = self.api.base_url.as_str();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            anyhow::bail!("base_url must start with http:// or https://, got '{}'", base_url);
        }

        if self.api.csrf_token_env.is_empty() {
            anyhow::bail!("csrf_token_env cannot be empty");
        }

        if self.notes.autosave_interval_seconds == 0 || self.notes.autosave_interval_seconds > MAX_AUTOSAVE_INTERVAL_SECONDS {
            anyhow::bail!(
                "autosave_interval_seconds must be between 1 and {}, got {}",
                MAX_AUTOSAVE_INTERVAL_SECONDS,
                self.notes.autosave_interval_seconds
            );
        }

        if self.notes.save_debounce_millis > MAX_SAVE_DEBOUNCE_MILLIS {
            anyhow::bail!(
                "save_debounce_millis cannot exceed {} ({} given)",
                MAX_SAVE_DEBOUNCE_MILLIS,
                self.notes.save_debounce_millis
            );
        }

        Ok(())
    }

    /// Generate default configuration file
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let config = Self::default();
        let toml_content = toml::to_string_pretty(&config).context("Failed to serialize default config")?;

        let header = format!(
            "# taskdesk Configuration File\n# Generated on {}\n\n",
            datetime::format_ymd(datetime::today())
        );

        let full_content = header + &toml_content;

        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        std::fs::write(&path, full_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        println!("{}: {}", CONFIG_GENERATED, path.as_ref().display());
        Ok(())
    }

    /// Get the XDG config directory path
    pub fn get_xdg_config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
            .map(|dir| dir.join("taskdesk"))
    }

    /// Get the default config file path
    pub fn get_default_config_path() -> Result<PathBuf> {
        Ok(Self::get_xdg_config_dir()?.join("config.toml"))
    }
}
