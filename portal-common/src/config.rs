//! Bootstrap configuration loading and database path resolution
//!
//! Configuration is bootstrap-only: it is read once at startup and a restart
//! is required to pick up changes. Resolution priority:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. OS-dependent compiled default (fallback)

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, Deserialize)]
pub struct TomlConfig {
    /// Path to the SQLite content database (relative or absolute)
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Address the HTTP server binds to
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Search fan-out tuning (optional)
    #[serde(default)]
    pub search: SearchConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Search fan-out configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Upper bound for a single source lookup, in milliseconds.
    /// A source exceeding it contributes no records to the response.
    #[serde(default = "default_source_timeout_ms")]
    pub source_timeout_ms: u64,
}

fn default_port() -> u16 {
    5780
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_source_timeout_ms() -> u64 {
    5000
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            port: default_port(),
            bind_address: default_bind_address(),
            logging: LoggingConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            source_timeout_ms: default_source_timeout_ms(),
        }
    }
}

/// Load bootstrap configuration from a TOML file
///
/// A missing file is not fatal: a warning is logged and compiled defaults
/// are returned. A file that exists but cannot be parsed is a
/// configuration error.
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    if !path.exists() {
        warn!(
            "Config file not found at {}, using built-in defaults",
            path.display()
        );
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(path)?;
    let config: TomlConfig = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse TOML {} failed: {}", path.display(), e)))?;

    if config.search.source_timeout_ms == 0 {
        return Err(Error::Config(
            "search.source_timeout_ms must be greater than zero".to_string(),
        ));
    }

    info!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Default location of a module's TOML config file for the platform
///
/// Linux: `~/.config/portal/<module>.toml`, falling back to
/// `/etc/portal/<module>.toml` when only the system-wide file exists.
pub fn default_config_path(module_name: &str) -> PathBuf {
    let file_name = format!("{}.toml", module_name);
    let user_config = dirs::config_dir().map(|d| d.join("portal").join(&file_name));

    if cfg!(target_os = "linux") {
        if let Some(path) = &user_config {
            if path.exists() {
                return path.clone();
            }
        }
        let system_config = PathBuf::from("/etc/portal").join(&file_name);
        if system_config.exists() {
            return system_config;
        }
    }

    user_config.unwrap_or_else(|| PathBuf::from(file_name))
}

/// Resolve the content database path
///
/// Priority: command-line argument, then `env_var_name`, then
/// `database_path` from TOML, then the OS-dependent default.
pub fn resolve_database_path(
    cli_arg: Option<&Path>,
    env_var_name: &str,
    config: &TomlConfig,
) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(env_var_name) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Some(path) = &config.database_path {
        return path.clone();
    }

    // Priority 4: OS-dependent compiled default
    default_database_path()
}

/// OS-dependent default content database location
fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("portal").join("portal.db"))
        .unwrap_or_else(|| PathBuf::from("./portal_data/portal.db"))
}
