//! Configuration for corpusdb

use eyre::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Stream id the line-based populator assigns when no flag is given
    #[serde(default = "default_stream_id")]
    pub default_stream_id: u64,

    /// Sync database files to disk before closing them
    #[serde(default)]
    pub sync_on_finish: bool,
}

fn default_stream_id() -> u64 {
    crate::DEFAULT_STREAM_ID
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_stream_id: default_stream_id(),
            sync_on_finish: false,
        }
    }
}

impl Config {
    /// Load config from file, or use defaults
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_yaml::from_str(&content)?;
            return Ok(config);
        }

        // Try default locations
        let default_paths = [
            dirs::config_dir().map(|p| p.join("corpusdb").join("config.yml")),
            Some(PathBuf::from("corpusdb.yml")),
        ];

        for path in default_paths.iter().flatten() {
            if path.exists() {
                let content = std::fs::read_to_string(path)?;
                let config: Config = serde_yaml::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Config::default())
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
