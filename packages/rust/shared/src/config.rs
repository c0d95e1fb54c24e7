//! Application configuration for invtag.
//!
//! User config lives at `~/.invtag/invtag.toml`.
//! CLI arguments override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{InvtagError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "invtag.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".invtag";

// ---------------------------------------------------------------------------
// Config structs (matching invtag.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Directory holding the master table and the reference exports.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// File name of the master inventory table within the data directory.
    #[serde(default = "default_table_file")]
    pub table_file: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            table_file: default_table_file(),
        }
    }
}

fn default_data_dir() -> String {
    "Data export_processed".into()
}
fn default_table_file() -> String {
    "020_all.csv".into()
}

impl AppConfig {
    /// Resolved path of the master inventory table.
    pub fn table_path(&self) -> PathBuf {
        Path::new(&self.defaults.data_dir).join(&self.defaults.table_file)
    }

    /// Resolved path of a reference export file within the data directory.
    pub fn reference_path(&self, file_name: &str) -> PathBuf {
        Path::new(&self.defaults.data_dir).join(file_name)
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.invtag/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| InvtagError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.invtag/invtag.toml`).
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
    let content = std::fs::read_to_string(path).map_err(|e| InvtagError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| InvtagError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| InvtagError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| InvtagError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| InvtagError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
