//! Configuration for chatblocks
//!
//! Everything has a default, so a missing file or a missing section falls back
//! to the public GitHub layout and the community awesome-mcp-servers list.

use crate::detect::config_snippet::{DocsLocator, DEFAULT_CONFIG_KEY};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReplyConfig {
    #[serde(default)]
    pub docs: DocsSection,
    #[serde(default)]
    pub directory: DirectorySection,
    #[serde(default)]
    pub http: HttpSection,
}

/// Where server documentation lives and what marks a config snippet
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocsSection {
    /// Raw-content host documentation is fetched from
    #[serde(default = "default_raw_host")]
    pub raw_host: String,
    /// Branch name used in derived documentation URLs
    #[serde(default = "default_branch")]
    pub branch: String,
    /// Documentation file at the repository root
    #[serde(default = "default_docs_file")]
    pub file: String,
    /// Top-level JSON key identifying a server registration snippet
    #[serde(default = "default_config_key")]
    pub config_key: String,
}

impl Default for DocsSection {
    fn default() -> Self {
        Self {
            raw_host: default_raw_host(),
            branch: default_branch(),
            file: default_docs_file(),
            config_key: default_config_key(),
        }
    }
}

/// Source of the server directory listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DirectorySection {
    /// Raw markdown of the directory listing
    #[serde(default = "default_directory_source")]
    pub source_url: String,
    /// Human-facing page of the directory, linked from replies
    #[serde(default = "default_directory_repo")]
    pub repo_url: String,
}

impl Default for DirectorySection {
    fn default() -> Self {
        Self {
            source_url: default_directory_source(),
            repo_url: default_directory_repo(),
        }
    }
}

/// Outbound HTTP settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HttpSection {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Per-request timeout; unset means requests never time out
    pub timeout_secs: Option<u64>,
}

impl Default for HttpSection {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: None,
        }
    }
}

impl HttpSection {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

fn default_raw_host() -> String {
    "https://raw.githubusercontent.com".to_string()
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_docs_file() -> String {
    "README.md".to_string()
}

fn default_config_key() -> String {
    DEFAULT_CONFIG_KEY.to_string()
}

fn default_directory_source() -> String {
    "https://raw.githubusercontent.com/punkpeye/awesome-mcp-servers/main/README.md".to_string()
}

fn default_directory_repo() -> String {
    "https://github.com/punkpeye/awesome-mcp-servers".to_string()
}

fn default_user_agent() -> String {
    format!("chatblocks/{}", env!("CARGO_PKG_VERSION"))
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ReplyConfig {
    /// Load configuration from a TOML file and validate it
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ReplyConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check field consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty("docs.branch", &self.docs.branch)?;
        require_non_empty("docs.file", &self.docs.file)?;
        require_non_empty("docs.config_key", &self.docs.config_key)?;
        require_http_url("docs.raw_host", &self.docs.raw_host)?;
        require_http_url("directory.source_url", &self.directory.source_url)?;

        if self.http.timeout_secs == Some(0) {
            return Err(ConfigError::InvalidConfig(
                "http.timeout_secs must be greater than zero when set".to_string(),
            ));
        }

        Ok(())
    }

    /// Documentation URL derivation settings
    pub fn docs_locator(&self) -> DocsLocator {
        DocsLocator {
            raw_host: self.docs.raw_host.clone(),
            branch: self.docs.branch.clone(),
            file: self.docs.file.clone(),
        }
    }
}

fn require_non_empty(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::InvalidConfig(format!(
            "{field} must not be empty"
        )));
    }
    Ok(())
}

fn require_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    match url::Url::parse(value) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
        _ => Err(ConfigError::InvalidConfig(format!(
            "{field} must be an http(s) URL, got '{value}'"
        ))),
    }
}
