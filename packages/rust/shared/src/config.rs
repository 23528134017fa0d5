//! Application configuration for jobnote.
//!
//! User config lives at `~/.jobnote/jobnote.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{JobNoteError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "jobnote.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".jobnote";

// ---------------------------------------------------------------------------
// Config structs (matching jobnote.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Salary normalization constants.
    #[serde(default)]
    pub salary: SalaryConfig,

    /// Optional overrides for embedded data files.
    #[serde(default)]
    pub paths: PathsConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Directory notes are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Maximum number of technologies kept in `stack`.
    #[serde(default = "default_max_stack_items")]
    pub max_stack_items: usize,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            max_stack_items: default_max_stack_items(),
        }
    }
}

fn default_output_dir() -> String {
    ".".into()
}
fn default_max_stack_items() -> usize {
    6
}

/// `[salary]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryConfig {
    /// RUB per USD.
    #[serde(default = "default_usd_rate")]
    pub usd_rate: f64,

    /// RUB per EUR.
    #[serde(default = "default_eur_rate")]
    pub eur_rate: f64,

    /// Multiplier turning a gross amount into net.
    #[serde(default = "default_net_factor")]
    pub net_factor: f64,

    /// Rounding step for the normalized minimum.
    #[serde(default = "default_round_to")]
    pub round_to: u64,
}

impl Default for SalaryConfig {
    fn default() -> Self {
        Self {
            usd_rate: default_usd_rate(),
            eur_rate: default_eur_rate(),
            net_factor: default_net_factor(),
            round_to: default_round_to(),
        }
    }
}

fn default_usd_rate() -> f64 {
    85.0
}
fn default_eur_rate() -> f64 {
    100.0
}
fn default_net_factor() -> f64 {
    0.87
}
fn default_round_to() -> u64 {
    5000
}

/// `[paths]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Custom note template (Markdown with `{{field}}` placeholders).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,

    /// Custom technology alias table (TOML).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tech_stack: Option<String>,
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.jobnote/`).
pub fn config_dir() -> Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| JobNoteError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.jobnote/jobnote.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| JobNoteError::io(path, e))?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| {
        JobNoteError::config(format!("failed to parse {}: {e}", path.display()))
    })?;

    validate_config(&config)?;
    Ok(config)
}

/// Reject values that would make normalization meaningless.
pub fn validate_config(config: &AppConfig) -> Result<()> {
    if config.defaults.max_stack_items == 0 {
        return Err(JobNoteError::config("defaults.max_stack_items must be at least 1"));
    }
    if config.salary.round_to == 0 {
        return Err(JobNoteError::config("salary.round_to must be at least 1"));
    }
    let s = &config.salary;
    if !(s.usd_rate > 0.0 && s.eur_rate > 0.0 && s.net_factor > 0.0) {
        return Err(JobNoteError::config(
            "salary rates and net_factor must be positive",
        ));
    }
    Ok(())
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| JobNoteError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| JobNoteError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| JobNoteError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
