use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{GraphError, GraphResult};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "GRAPHKIT_CONFIG";

/// How reports are written to stdout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Column-aligned text dumps
    #[default]
    Text,
    /// JSON envelope per report
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub default_format: Option<OutputFormat>,

    /// Largest node count a description may declare
    #[serde(default)]
    pub node_limit: Option<usize>,
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
            return Some(PathBuf::from(path));
        }

        #[cfg(target_os = "macos")]
        {
            dirs::home_dir().map(|home| home.join(".config/graphkit/config.toml"))
        }
        #[cfg(target_os = "linux")]
        {
            dirs::config_dir().map(|config| config.join("graphkit/config.toml"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|config| config.join("graphkit\\config.toml"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }

    /// Load the user config, falling back to defaults when it is missing or invalid
    pub fn load() -> Self {
        if let Some(config_path) = Self::config_path() {
            if config_path.exists() {
                match Self::load_from(&config_path) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Ignoring config at {}: {}", config_path.display(), e)
                    }
                }
            }
        }
        Self::default()
    }

    pub fn load_from(path: &Path) -> GraphResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> GraphResult<Self> {
        toml::from_str(content).map_err(|e| GraphError::Config(e.to_string()))
    }

    pub fn effective_format(&self) -> OutputFormat {
        self.default_format.unwrap_or_default()
    }
}
