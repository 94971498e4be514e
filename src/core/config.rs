//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → saved credentials → env vars → CLI flags.
//!
//! Config lives at `~/.tolk/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::deepl::Formality;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TolkConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub deepl: DeeplConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub source_language: Option<String>,
    pub target_language: Option<String>,
    pub formality: Option<Formality>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DeeplConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

/// Values given on the command line. `None` = not specified.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub source_language: Option<String>,
    pub target_language: Option<String>,
    pub formality: Option<Formality>,
}

// ============================================================================
// Resolved Config (concrete values)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub api_key: Option<String>,
    /// `None` lets the client pick the host from the key tier
    pub base_url: Option<String>,
    pub source_language: Option<String>,
    pub target_language: Option<String>,
    pub formality: Formality,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.tolk`, the directory for config and credentials.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".tolk"))
}

/// Returns the path to `~/.tolk/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.tolk/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `TolkConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<TolkConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(TolkConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<TolkConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(TolkConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: TolkConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: general={:?}, base_url={:?}", config.general, config.deepl.base_url);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# tolk configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → saved credentials → env vars → CLI flags.

# [general]
# source_language = "EN"             # Omit to let DeepL detect the language
# target_language = "DE"             # Or set TOLK_TARGET_LANGUAGE env var
# formality = "default"              # "less", "prefer_less", "default", "prefer_more", "more"

# [deepl]
# api_key = "..."                    # Or set DEEPL_API_KEY env var, or enter it on first start
# base_url = "https://api-free.deepl.com/v2"
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing:
/// defaults → config file → saved credentials → env vars → CLI.
pub fn resolve(
    config: &TolkConfig,
    stored_api_key: Option<String>,
    cli: &CliOverrides,
) -> ResolvedConfig {
    // API key: env → saved credentials → config
    let api_key = env_var("DEEPL_API_KEY")
        .or(stored_api_key)
        .or_else(|| config.deepl.api_key.clone())
        .filter(|k| !k.trim().is_empty());

    // Base URL: env → config → derived from key tier
    let base_url = env_var("DEEPL_BASE_URL").or_else(|| config.deepl.base_url.clone());

    // Target language: CLI → env → config
    let target_language = cli
        .target_language
        .clone()
        .or_else(|| env_var("TOLK_TARGET_LANGUAGE"))
        .or_else(|| config.general.target_language.clone());

    // Source language: CLI → config (None = auto-detect)
    let source_language = cli
        .source_language
        .clone()
        .or_else(|| config.general.source_language.clone());

    ResolvedConfig {
        api_key,
        base_url,
        source_language,
        target_language,
        formality: cli
            .formality
            .or(config.general.formality)
            .unwrap_or_default(),
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
