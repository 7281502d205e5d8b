//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.pubdash/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::{BackendConfig, PayloadStyle};
use crate::core::state::AfterPublish;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PubdashConfig {
    #[serde(default)]
    pub backend: BackendSection,
    #[serde(default)]
    pub list: ListSection,
    #[serde(default)]
    pub composer: ComposerSection,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BackendSection {
    pub base_url: Option<String>,
    pub publish_path: Option<String>,
    pub list_path: Option<String>,
    pub payload: Option<PayloadStyle>,
    pub publish_timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ListSection {
    pub page_size: Option<u32>,
    pub refresh_interval_secs: Option<u64>,
    pub auto_refresh: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ComposerSection {
    pub source: Option<String>,
    pub after_publish: Option<AfterPublish>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_PUBLISH_PATH: &str = "/publish";
pub const DEFAULT_LIST_PATH: &str = "/api/messages";
pub const DEFAULT_PUBLISH_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 10;
pub const DEFAULT_SOURCE: &str = "ui";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub backend: BackendConfig,
    pub page_size: u32,
    pub refresh_interval: Duration,
    pub auto_refresh: bool,
    pub source: String,
    pub after_publish: AfterPublish,
}

/// Values that came from command-line flags (None = not given).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub base_url: Option<String>,
    pub echo: bool,
    pub no_auto_refresh: bool,
    pub refresh_secs: Option<u64>,
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

/// Returns the path to `~/.pubdash/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".pubdash").join("config.toml"))
}

/// Load config from `~/.pubdash/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `PubdashConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<PubdashConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(PubdashConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<PubdashConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(PubdashConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: PubdashConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

fn generate_default_config(path: &Path) {
    let default_content = r#"# pubdash configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [backend]
# base_url = "http://localhost:5000"   # Or set PUBDASH_API_BASE
# publish_path = "/publish"            # "/api/messages" on newer backends
# list_path = "/api/messages"          # "/messages" on the original backend
# payload = "envelope"                 # "envelope" or "data"
# publish_timeout_secs = 15

# [list]
# page_size = 10
# refresh_interval_secs = 10
# auto_refresh = true

# [composer]
# source = "ui"
# after_publish = "reload"             # "reload" or "echo"
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &PubdashConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`], with the environment passed in.
pub fn resolve_with_env(
    config: &PubdashConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Base URL: CLI → env → config → default. Blank counts as unset.
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| env("PUBDASH_API_BASE"))
        .or_else(|| env("VITE_API_BASE"))
        .or_else(|| config.backend.base_url.clone())
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Payload style: env → config → default
    let payload_style = env("PUBDASH_PAYLOAD")
        .and_then(|s| match s.to_ascii_lowercase().as_str() {
            "envelope" => Some(PayloadStyle::Envelope),
            "data" => Some(PayloadStyle::Data),
            other => {
                warn!("Ignoring unknown PUBDASH_PAYLOAD value: {}", other);
                None
            }
        })
        .or(config.backend.payload)
        .unwrap_or_default();

    let backend = BackendConfig {
        base_url,
        publish_path: config
            .backend
            .publish_path
            .clone()
            .unwrap_or_else(|| DEFAULT_PUBLISH_PATH.to_string()),
        list_path: config
            .backend
            .list_path
            .clone()
            .unwrap_or_else(|| DEFAULT_LIST_PATH.to_string()),
        payload_style,
        publish_timeout: Duration::from_secs(
            config
                .backend
                .publish_timeout_secs
                .unwrap_or(DEFAULT_PUBLISH_TIMEOUT_SECS),
        ),
    };

    let refresh_secs = cli
        .refresh_secs
        .or(config.list.refresh_interval_secs)
        .unwrap_or(DEFAULT_REFRESH_INTERVAL_SECS)
        .max(1);

    let after_publish = if cli.echo {
        AfterPublish::Echo
    } else {
        config.composer.after_publish.unwrap_or_default()
    };

    ResolvedConfig {
        backend,
        page_size: config
            .list
            .page_size
            .unwrap_or(crate::core::listing::DEFAULT_PAGE_SIZE)
            .max(1),
        refresh_interval: Duration::from_secs(refresh_secs),
        auto_refresh: !cli.no_auto_refresh && config.list.auto_refresh.unwrap_or(true),
        source: config
            .composer
            .source
            .clone()
            .unwrap_or_else(|| DEFAULT_SOURCE.to_string()),
        after_publish,
    }
}
