//! Config command implementation.
//!
//! Manages the CLI configuration file. Configuration is stored in TOML at:
//! - Linux: `~/.config/elastic-agent/config.toml`
//! - macOS: `~/Library/Application Support/elastic-agent/config.toml`
//! - Windows: `%APPDATA%\elastic-agent\config.toml`
//!
//! A `--config <path>` flag on the CLI overrides the location.

use crate::actions::ConfigAction;
use anyhow::{Context, Result};
use elastic_agent_core::cli::{ExitCode, OutputFormat};
use elastic_agent_core::{FieldRule, ServerInfo};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Accepted values for `general.log_level`.
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// CLI configuration.
///
/// # Examples
///
/// ```toml
/// [general]
/// default_format = "pretty"
/// log_level = "info"
///
/// [server]
/// secure_site_url = "https://ci.example.com:8154/go"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub general: GeneralConfig,

    /// Fallback server info used when the command line provides none
    #[serde(default)]
    pub server: ServerConfig,
}

/// General configuration settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format (json, text, pretty)
    pub default_format: String,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_format: OutputFormat::default().as_str().to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Server section of the configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ServerConfig {
    /// Secure site URL of the Go server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secure_site_url: Option<String>,
}

impl Config {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a value is not one of its accepted values.
    pub fn validate(&self) -> Result<()> {
        self.general
            .default_format
            .parse::<OutputFormat>()
            .context("invalid general.default_format")?;

        if !LOG_LEVELS.contains(&self.general.log_level.as_str()) {
            anyhow::bail!(
                "invalid general.log_level '{}', must be one of: {}",
                self.general.log_level,
                LOG_LEVELS.join(", ")
            );
        }

        if let Some(message) =
            FieldRule::HttpsUrl.check("server.secure_site_url", self.server.secure_site_url.as_deref())
        {
            anyhow::bail!(message);
        }

        Ok(())
    }

    /// Output format used when `--format` is not given.
    #[must_use]
    pub fn output_format(&self) -> OutputFormat {
        self.general.default_format.parse().unwrap_or_default()
    }

    /// Server info built from the `[server]` section.
    #[must_use]
    pub fn server_info(&self) -> ServerInfo {
        ServerInfo {
            secure_site_url: self.server.secure_site_url.clone(),
            ..ServerInfo::default()
        }
    }
}

/// Returns the configuration file path, honoring an explicit override.
///
/// # Errors
///
/// Returns an error if no override is given and the platform config
/// directory cannot be determined.
pub fn config_path(override_path: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = override_path {
        return Ok(path.to_path_buf());
    }
    let config_dir = dirs::config_dir().context("failed to determine config directory")?;
    Ok(config_dir.join("elastic-agent").join("config.toml"))
}

/// Loads configuration from `path`, or returns defaults if it does not exist.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed, or validated.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        debug!("Config file {} not found, using defaults", path.display());
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config: Config = toml::from_str(&content)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;
    config.validate()?;

    Ok(config)
}

/// Saves configuration to `path`, creating parent directories.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or cannot be written.
pub fn save_config(config: &Config, path: &Path) -> Result<()> {
    config.validate()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create config directory")?;
    }

    let toml_str = toml::to_string_pretty(config).context("failed to serialize config")?;
    fs::write(path, toml_str).context("failed to write config file")?;

    debug!("Saved config to {}", path.display());
    Ok(())
}

fn get_config_value_by_key(config: &Config, key: &str) -> Option<String> {
    match key {
        "general.default_format" => Some(config.general.default_format.clone()),
        "general.log_level" => Some(config.general.log_level.clone()),
        "server.secure_site_url" => config.server.secure_site_url.clone(),
        _ => None,
    }
}

fn set_config_value_by_key(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "general.default_format" => config.general.default_format = value.to_lowercase(),
        "general.log_level" => config.general.log_level = value.to_lowercase(),
        "server.secure_site_url" => {
            config.server.secure_site_url =
                (!value.is_empty() && value != "none").then(|| value.to_string());
        }
        _ => anyhow::bail!("unknown configuration key: {key}"),
    }
    config.validate()
}

/// Initialization result.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct InitResult {
    /// Whether a new file was written
    pub created: bool,
    /// Status message
    pub message: String,
    /// Configuration file path
    pub path: String,
}

/// Configuration value result.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ConfigValue {
    /// Configuration key
    pub key: String,
    /// Configuration value, absent when unset
    pub value: Option<String>,
}

/// Runs the config command against the file at `path`.
///
/// # Errors
///
/// Returns an error if the configuration cannot be read, validated or written.
pub fn run(action: ConfigAction, path: &Path, output_format: OutputFormat) -> Result<ExitCode> {
    info!("Config action: {:?}", action);

    let formatted = match action {
        ConfigAction::Init => {
            let result = init_config(path)?;
            crate::formatters::format_output(&result, output_format)?
        }
        ConfigAction::Show => crate::formatters::format_output(&load_config(path)?, output_format)?,
        ConfigAction::Path => path.display().to_string(),
        ConfigAction::Get { key } => {
            let config = load_config(path)?;
            if !is_known_key(&key) {
                anyhow::bail!("unknown configuration key: {key}");
            }
            let value = get_config_value_by_key(&config, &key);
            crate::formatters::format_output(&ConfigValue { key, value }, output_format)?
        }
        ConfigAction::Set { key, value } => {
            let mut config = load_config(path)?;
            set_config_value_by_key(&mut config, &key, &value)?;
            save_config(&config, path)?;
            let value = get_config_value_by_key(&config, &key);
            crate::formatters::format_output(&ConfigValue { key, value }, output_format)?
        }
    };

    println!("{formatted}");
    Ok(ExitCode::SUCCESS)
}

fn is_known_key(key: &str) -> bool {
    matches!(
        key,
        "general.default_format" | "general.log_level" | "server.secure_site_url"
    )
}

/// Writes a default configuration unless one already exists.
fn init_config(path: &Path) -> Result<InitResult> {
    let path_str = path.display().to_string();
    if path.exists() {
        return Ok(InitResult {
            created: false,
            message: "configuration file already exists".to_string(),
            path: path_str,
        });
    }

    save_config(&Config::default(), path)?;
    Ok(InitResult {
        created: true,
        message: "configuration file created with default values".to_string(),
        path: path_str,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.output_format(), OutputFormat::Pretty);
        assert!(!config.server_info().has_secure_site_url());
    }

    #[test]
    fn test_validate_rejects_unknown_format() {
        let mut config = Config::default();
        config.general.default_format = "yaml".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_log_level() {
        let mut config = Config::default();
        config.general.log_level = "verbose".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("general.log_level"));
    }

    #[test]
    fn test_validate_rejects_plain_http_secure_site_url() {
        let mut config = Config::default();
        config.server.secure_site_url = Some("http://ci.example.com/go".to_string());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("server.secure_site_url"));
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load_config(&dir.path().join("missing.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.general.default_format = "json".to_string();
        config.server.secure_site_url = Some("https://ci.example.com:8154/go".to_string());
        save_config(&config, &path).unwrap();

        assert_eq!(load_config(&path).unwrap(), config);
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[server]\nsecure_site_url = \"https://ci.example.com/go\"\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.general, GeneralConfig::default());
        assert_eq!(
            config.server_info().secure_site_url(),
            Some("https://ci.example.com/go")
        );
    }

    #[test]
    fn test_set_and_clear_secure_site_url() {
        let mut config = Config::default();
        set_config_value_by_key(&mut config, "server.secure_site_url", "https://ci.example.com/go")
            .unwrap();
        assert!(config.server_info().has_secure_site_url());

        set_config_value_by_key(&mut config, "server.secure_site_url", "none").unwrap();
        assert_eq!(config.server.secure_site_url, None);
    }

    #[test]
    fn test_set_unknown_key() {
        let mut config = Config::default();
        let err = set_config_value_by_key(&mut config, "runtime.max_fuel", "1").unwrap_err();
        assert!(err.to_string().contains("unknown configuration key"));
    }

    #[test]
    fn test_config_path_override() {
        let path = config_path(Some(Path::new("/tmp/ea.toml"))).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/ea.toml"));
    }

    #[test]
    fn test_init_does_not_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        assert!(init_config(&path).unwrap().created);
        assert!(!init_config(&path).unwrap().created);
    }

    #[test]
    fn test_run_set_persists_value() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let action = ConfigAction::Set {
            key: "general.log_level".to_string(),
            value: "DEBUG".to_string(),
        };
        assert_eq!(run(action, &path, OutputFormat::Json).unwrap(), ExitCode::SUCCESS);
        assert_eq!(load_config(&path).unwrap().general.log_level, "debug");
    }
}
