use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "linkdex";
const CONFIG_FILE: &str = "config.json";
const LINKS_FILE: &str = "links.json";
const USAGE_FILE: &str = "usage.json";

/// Application configuration stored in the app data directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Catalog file with the links to search (defaults to `links.json` in
    /// the app data directory)
    #[serde(default)]
    pub links_file: Option<PathBuf>,

    /// Usage store recording which links were picked for which terms
    /// (defaults to `usage.json` in the app data directory)
    #[serde(default)]
    pub usage_file: Option<PathBuf>,

    /// Maximum number of hits printed by `search`
    #[serde(default = "default_result_limit")]
    pub result_limit: usize,

    /// Fold link labels and search terms to lowercase
    #[serde(default = "default_case_insensitive")]
    pub case_insensitive: bool,
}

fn default_result_limit() -> usize {
    10
}

fn default_case_insensitive() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            links_file: None,
            usage_file: None,
            result_limit: default_result_limit(),
            case_insensitive: default_case_insensitive(),
        }
    }
}

impl AppConfig {
    /// Load config from the app data directory, or return default if not found
    pub fn load() -> Result<Self> {
        Self::load_from(&get_config_path()?)
    }

    /// Load config from an explicit file, or return default if it does not exist
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read config file {}", config_path.display()))?;
            let config: AppConfig = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file {}", config_path.display()))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to an explicit file
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .context("Failed to serialize config")?;
        fs::write(config_path, content)
            .context("Failed to write config file")?;
        Ok(())
    }

    /// Get the effective catalog path (resolves `None` to the app data default)
    pub fn effective_links_file(&self) -> Result<PathBuf> {
        match &self.links_file {
            Some(path) => Ok(path.clone()),
            None => Ok(get_app_data_dir()?.join(LINKS_FILE)),
        }
    }

    /// Get the effective usage store path (resolves `None` to the app data default)
    pub fn effective_usage_file(&self) -> Result<PathBuf> {
        match &self.usage_file {
            Some(path) => Ok(path.clone()),
            None => Ok(get_app_data_dir()?.join(USAGE_FILE)),
        }
    }
}

/// Get the path to the config file
pub fn get_config_path() -> Result<PathBuf> {
    let app_dir = get_app_data_dir()?;
    Ok(app_dir.join(CONFIG_FILE))
}

/// Get the application data directory
pub fn get_app_data_dir() -> Result<PathBuf> {
    let base = if cfg!(target_os = "macos") {
        dirs::home_dir()
            .map(|h| h.join("Library").join("Application Support"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
    } else {
        // Linux/Unix: use XDG_DATA_HOME or ~/.local/share
        dirs::data_dir()
    };

    let base = base.context("Could not determine app data directory")?;
    let app_dir = base.join(APP_NAME);

    fs::create_dir_all(&app_dir)?;
    Ok(app_dir)
}
