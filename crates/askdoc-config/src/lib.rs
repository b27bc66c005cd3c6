//! Configuration management for askdoc.
//!
//! Parses `askdoc.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Secrets (`auth.api_key`, `notion.api_key`, `completion.api_key`) may also
//! be written as `base64:<data>`, which is decoded after expansion.
//!
//! Expanded fields:
//! - `server.host`
//! - `auth.api_key`
//! - `notion.api_key`
//! - `notion.database_id`
//! - `notion.base_url`
//! - `completion.api_key`
//! - `completion.base_url`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override completion model.
    pub model: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "askdoc.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Request authentication.
    pub auth: AuthConfig,
    /// Page-database configuration.
    pub notion: Option<NotionConfig>,
    /// Completion service configuration.
    pub completion: Option<CompletionConfig>,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 5050,
        }
    }
}

/// Request authentication configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Shared key expected in the `x-api-key` header. `None` or empty disables the check.
    pub api_key: Option<String>,
}

/// Page-database configuration.
#[derive(Debug, Deserialize)]
pub struct NotionConfig {
    /// Integration token.
    pub api_key: String,
    /// Database that conversation pages are created in.
    pub database_id: String,
    /// API base URL.
    #[serde(default = "default_notion_base_url")]
    pub base_url: String,
    /// `Notion-Version` header value.
    #[serde(default = "default_notion_api_version")]
    pub api_version: String,
    /// Title property of the database.
    #[serde(default = "default_title_property")]
    pub title_property: String,
    /// Date property of the database. Empty disables the date.
    #[serde(default = "default_date_property")]
    pub date_property: String,
    /// Emoji on the callout recording each question.
    #[serde(default = "default_question_emoji")]
    pub question_emoji: String,
}

impl NotionConfig {
    /// Validate that all required fields are properly set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any field is empty or has invalid format.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.api_key, "notion.api_key")?;
        require_non_empty(&self.database_id, "notion.database_id")?;
        require_non_empty(&self.base_url, "notion.base_url")?;
        require_http_url(&self.base_url, "notion.base_url")?;
        require_non_empty(&self.api_version, "notion.api_version")?;
        require_non_empty(&self.title_property, "notion.title_property")?;
        Ok(())
    }

    /// Date property name, or `None` when disabled.
    #[must_use]
    pub fn date_property(&self) -> Option<&str> {
        Some(self.date_property.as_str()).filter(|p| !p.is_empty())
    }
}

fn default_notion_base_url() -> String {
    "https://api.notion.com/v1".to_owned()
}

fn default_notion_api_version() -> String {
    "2022-06-28".to_owned()
}

fn default_title_property() -> String {
    "질문".to_owned()
}

fn default_date_property() -> String {
    "날짜".to_owned()
}

fn default_question_emoji() -> String {
    "🙋‍♀️".to_owned()
}

/// Completion service configuration.
#[derive(Debug, Deserialize)]
pub struct CompletionConfig {
    /// Secret API key.
    pub api_key: String,
    /// Model name.
    #[serde(default = "default_model")]
    pub model: String,
    /// API base URL.
    #[serde(default = "default_completion_base_url")]
    pub base_url: String,
}

impl CompletionConfig {
    /// Validate that all required fields are properly set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any field is empty or has invalid format.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.api_key, "completion.api_key")?;
        require_non_empty(&self.model, "completion.model")?;
        require_non_empty(&self.base_url, "completion.base_url")?;
        require_http_url(&self.base_url, "completion.base_url")?;
        Ok(())
    }
}

fn default_model() -> String {
    "gpt-4o".to_owned()
}

fn default_completion_base_url() -> String {
    "https://api.openai.com/v1".to_owned()
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`notion.api_key`").
        field: String,
        /// Error message (e.g., "${`NOTION_API_KEY`} not set").
        message: String,
    },
    /// Invalid `base64:` secret.
    #[error("Cannot decode {field}: {message}")]
    Decode {
        /// Config field path.
        field: String,
        /// Decoder error message.
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `askdoc.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let (Some(model), Some(completion)) = (&settings.model, &mut self.completion) {
            completion.model.clone_from(model);
        }
    }

    /// Get validated page-database configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the section is missing or invalid.
    pub fn require_notion(&self) -> Result<&NotionConfig, ConfigError> {
        let notion = self.notion.as_ref().ok_or_else(|| {
            ConfigError::Validation("[notion] section required in config".into())
        })?;
        notion.validate()?;
        Ok(notion)
    }

    /// Get validated completion configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the section is missing or invalid.
    pub fn require_completion(&self) -> Result<&CompletionConfig, ConfigError> {
        let completion = self.completion.as_ref().ok_or_else(|| {
            ConfigError::Validation("[completion] section required in config".into())
        })?;
        completion.validate()?;
        Ok(completion)
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::discover_from(&current)
    }

    /// Search for config file in `start` and its parents.
    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());

        // Validate configuration after loading
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Section-specific settings are validated on demand by
    /// [`Config::require_notion`] and [`Config::require_completion`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        // Port 0 is technically valid (OS assigns a random port), but it's
        // unlikely to be intentional in a config file
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        Ok(())
    }

    /// Expand environment variable references and decode secrets.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;

        // An empty key disables the check, e.g. `"${BACKEND_API_KEY:-}"` when unset.
        self.auth.api_key = self
            .auth
            .api_key
            .take()
            .map(|key| expand::resolve_secret(&key, "auth.api_key"))
            .transpose()?
            .filter(|key| !key.is_empty());

        if let Some(ref mut notion) = self.notion {
            notion.api_key = expand::resolve_secret(&notion.api_key, "notion.api_key")?;
            notion.database_id = expand::expand_env(&notion.database_id, "notion.database_id")?;
            notion.base_url = expand::expand_env(&notion.base_url, "notion.base_url")?;
        }

        if let Some(ref mut completion) = self.completion {
            completion.api_key = expand::resolve_secret(&completion.api_key, "completion.api_key")?;
            completion.base_url = expand::expand_env(&completion.base_url, "completion.base_url")?;
        }

        Ok(())
    }
}
