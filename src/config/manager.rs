use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::fs::atomic_write;
use crate::paths;
use crate::translation::{ModelConfig, Provider};

/// Primary language used when the config file does not set one.
pub const DEFAULT_PRIMARY_LANGUAGE: &str = "zh-cn";

/// Default settings in the `[lu]` section of config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LuConfig {
    /// Active provider (`openai`, `dashscope` or `custom`).
    pub provider: Option<String>,
    /// The user's home language: UI language and default target.
    pub primary_language: Option<String>,
    /// Connect and read timeout in seconds.
    pub timeout_secs: Option<u64>,
}

impl LuConfig {
    pub fn primary_language(&self) -> &str {
        self.primary_language
            .as_deref()
            .unwrap_or(DEFAULT_PRIMARY_LANGUAGE)
    }
}

/// Settings for one provider under `[models.<name>]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEntry {
    /// Model name.
    #[serde(default)]
    pub model: Option<String>,
    /// API key stored directly in config.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Environment variable name containing the API key.
    #[serde(default)]
    pub api_key_env: Option<String>,
    /// API base URL; required for `custom`.
    #[serde(default)]
    pub base_url: Option<String>,
}

impl ProviderEntry {
    /// Gets the API key, preferring environment variable over config file.
    pub fn get_api_key(&self) -> Option<String> {
        if let Some(env_var) = &self.api_key_env
            && let Ok(key) = std::env::var(env_var)
            && !key.is_empty()
        {
            return Some(key);
        }
        self.api_key.clone().filter(|key| !key.is_empty())
    }
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/lu/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Default settings.
    #[serde(default)]
    pub lu: LuConfig,
    /// Provider settings keyed by provider name.
    #[serde(default)]
    pub models: BTreeMap<String, ProviderEntry>,
}

impl ConfigFile {
    pub fn provider_entry(&self, provider: Provider) -> Option<&ProviderEntry> {
        self.models.get(provider.as_str())
    }
}

/// Resolved configuration after merging CLI arguments and config file.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Validated provider settings.
    pub model_config: ModelConfig,
    /// The user's primary language.
    pub primary_language: String,
    /// Connect and read timeout for provider requests.
    pub timeout: Duration,
}

/// CLI overrides that take precedence over config file values.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Provider name override.
    pub provider: Option<String>,
    /// Model name override.
    pub model: Option<String>,
}

/// Resolves configuration by merging CLI options with config file settings.
///
/// The provider defaults to `openai` and the model to the provider's default.
///
/// # Errors
///
/// Returns a [`crate::translation::ConfigError`] if the provider is unknown,
/// the API key is missing, or a `custom` provider has no base URL.
pub fn resolve_config(options: &ResolveOptions, config_file: &ConfigFile) -> Result<ResolvedConfig> {
    let provider: Provider = options
        .provider
        .as_deref()
        .or(config_file.lu.provider.as_deref())
        .unwrap_or(Provider::OpenAi.as_str())
        .parse()?;

    let entry = config_file
        .provider_entry(provider)
        .cloned()
        .unwrap_or_default();

    let model = options
        .model
        .clone()
        .or(entry.model.clone())
        .filter(|model| !model.trim().is_empty())
        .unwrap_or_else(|| provider.default_model().to_string());

    let model_config = ModelConfig {
        provider,
        model,
        api_key: entry.get_api_key().unwrap_or_default(),
        base_url: entry.base_url,
    };
    model_config.validate()?;

    let timeout = config_file
        .lu
        .timeout_secs
        .map_or(crate::translation::provider::DEFAULT_TIMEOUT, Duration::from_secs);

    Ok(ResolvedConfig {
        model_config,
        primary_language: config_file.lu.primary_language().to_string(),
        timeout,
    })
}

/// Manages loading and saving configuration files.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager.
    ///
    /// Configuration is stored at `$XDG_CONFIG_HOME/lu/config.toml`
    /// or `~/.config/lu/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(paths::config_dir()?.join("config.toml")))
    }

    /// Creates a manager for an explicit config file path.
    pub fn with_path(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn exists(&self) -> bool {
        self.config_path.is_file()
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        let config_file: ConfigFile = toml::from_str(&contents).with_context(|| {
            format!(
                "Failed to parse config file: {}",
                self.config_path.display()
            )
        })?;

        Ok(config_file)
    }

    pub fn save(&self, config: &ConfigFile) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;

        atomic_write(&self.config_path, &contents).with_context(|| {
            format!(
                "Failed to write config file: {}",
                self.config_path.display()
            )
        })?;

        Ok(())
    }

    pub fn load_or_default(&self) -> ConfigFile {
        self.load().unwrap_or_default()
    }
}
