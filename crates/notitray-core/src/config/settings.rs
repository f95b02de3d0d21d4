use crate::{Error, Result};
use notitray_types::{DEFAULT_APP_NAME, DEFAULT_PAGE_SIZE};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub list: ListConfig,
}

impl Config {
    /// Load config from a JSON file, falling back to defaults when it is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or if
    /// the parsed values fail validation.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        super::validation::warn_unknown_fields(&content, "config.json");
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Write config as pretty JSON, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject values the client cannot work with.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` naming the offending field.
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(Error::Config("api.baseUrl must not be empty".to_string()));
        }
        if self.api.timeout_secs == 0 {
            return Err(Error::Config(
                "api.timeoutSecs must be positive".to_string(),
            ));
        }
        if self.list.page_size == 0 {
            return Err(Error::Config("list.pageSize must be positive".to_string()));
        }
        if self.list.default_app.is_empty() {
            return Err(Error::Config(
                "list.defaultApp must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Notifications API connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiConfig {
    /// Base URL of the LMS that serves `/api/notifications/`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout applied by the HTTP client
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Bearer token sent with every request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

fn default_base_url() -> String {
    "http://localhost:18000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            token: None,
        }
    }
}

/// List paging defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListConfig {
    /// App selected on startup and after a reset
    #[serde(default = "default_app")]
    pub default_app: String,

    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_app() -> String {
    DEFAULT_APP_NAME.to_string()
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            default_app: default_app(),
            page_size: default_page_size(),
        }
    }
}
