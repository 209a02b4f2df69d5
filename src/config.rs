//! Configuration management for Herald.
//!
//! Handles loading configuration from TOML files and environment variables,
//! with validation of the command prefix, allow-list and branding.

use crate::error::{BotError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// Environment variable that overrides the bot token from the config file.
pub const TOKEN_ENV_VAR: &str = "HERALD_TOKEN";

/// Main configuration structure for Herald.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Bot token from the platform's developer portal.
    #[serde(default)]
    pub token: String,

    /// Prefix that marks a chat message as a command (e.g. ".").
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Branding shown in embeds.
    #[serde(default)]
    pub brand: BrandConfig,

    /// Guild to register slash commands in; empty registers globally.
    #[serde(default)]
    pub guild_id: String,

    /// User ids allowed to run admin-only commands.
    #[serde(default)]
    pub authorized_ids: Vec<String>,

    /// Enables prefix (text) commands.
    #[serde(default = "default_true")]
    pub prefix_enabled: bool,

    /// Enables slash (interaction) commands.
    #[serde(default)]
    pub slash_enabled: bool,

    /// Removes slash commands from the platform when the bot shuts down.
    #[serde(default)]
    pub deregister_commands_after_restart: bool,
}

/// Display-only branding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandConfig {
    /// Bot display name.
    #[serde(default = "default_brand_name")]
    pub name: String,

    /// Icon URL used for thumbnails and footers.
    #[serde(default)]
    pub icon: String,
}

fn default_prefix() -> String {
    ".".to_string()
}

fn default_true() -> bool {
    true
}

fn default_brand_name() -> String {
    "Herald".to_string()
}

impl Default for BrandConfig {
    fn default() -> Self {
        Self {
            name: default_brand_name(),
            icon: String::new(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token: String::new(),
            prefix: default_prefix(),
            brand: BrandConfig::default(),
            guild_id: String::new(),
            authorized_ids: Vec::new(),
            prefix_enabled: true,
            slash_enabled: false,
            deregister_commands_after_restart: false,
        }
    }
}

/// Which dispatch paths are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandMode {
    /// Only prefix commands.
    Prefix,
    /// Only slash commands.
    Slash,
    /// Both prefix and slash commands.
    PrefixAndSlash,
    /// Nothing enabled; the bot connects but never dispatches.
    Disabled,
}

impl CommandMode {
    /// Returns the banner label for this mode.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Prefix => "Prefix",
            Self::Slash => "Slash",
            Self::PrefixAndSlash => "Prefix/Slash",
            Self::Disabled => "Disabled",
        }
    }
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("herald")
            .join("config.toml")
    }

    /// Loads configuration from an explicit path, or from [`Config::default_path`].
    ///
    /// Only the implicit default path may be absent, in which case the
    /// defaults are used. An explicit path must exist.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from_file(path);
        }

        let path = Self::default_path();
        if path.exists() {
            Self::load_from_file(&path)
        } else {
            Self::finish(Self::default())
        }
    }

    /// Loads configuration from a TOML file.
    ///
    /// A missing or unreadable file is a configuration error. The token may be
    /// supplied or overridden through `HERALD_TOKEN`. The result is validated.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            BotError::config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;
        Self::finish(Self::parse_toml(&content, path)?)
    }

    fn finish(mut config: Self) -> Result<Self> {
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parses configuration from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            BotError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })
    }

    /// Applies environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(token) = std::env::var(TOKEN_ENV_VAR) {
            if !token.is_empty() {
                self.token = token;
            }
        }
    }

    /// Checks the settings the router depends on.
    pub fn validate(&self) -> Result<()> {
        if self.prefix.is_empty() {
            return Err(BotError::config("prefix must not be empty"));
        }
        if self.prefix.chars().any(char::is_whitespace) {
            return Err(BotError::config(format!(
                "prefix '{}' must not contain whitespace",
                self.prefix
            )));
        }
        if let Some(id) = self.authorized_ids.iter().find(|id| id.trim().is_empty()) {
            return Err(BotError::config(format!(
                "authorized_ids contains a blank entry: '{id}'"
            )));
        }
        if !self.brand.icon.is_empty() {
            Url::parse(&self.brand.icon)
                .map_err(|e| BotError::config(format!("Invalid brand icon URL: {e}")))?;
        }
        Ok(())
    }

    /// Returns the active dispatch mode.
    pub fn mode(&self) -> CommandMode {
        match (self.prefix_enabled, self.slash_enabled) {
            (true, true) => CommandMode::PrefixAndSlash,
            (true, false) => CommandMode::Prefix,
            (false, true) => CommandMode::Slash,
            (false, false) => CommandMode::Disabled,
        }
    }

    /// Returns the guild to register slash commands in, if any.
    pub fn guild(&self) -> Option<&str> {
        if self.guild_id.is_empty() {
            None
        } else {
            Some(&self.guild_id)
        }
    }
}
