//! Config file loading.

use crate::schema::VoxConfig;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tokio::fs;
use tracing::info;

/// Default config file name within the working directory.
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Resolve the config file path.
/// Priority: `VOXNOTE_CONFIG` env > `./config.yaml` > `~/.voxnote/config.yaml`
pub fn config_file_path() -> PathBuf {
    if let Ok(path) = std::env::var("VOXNOTE_CONFIG") {
        return PathBuf::from(path);
    }
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(home) = dirs::home_dir() {
        let candidate = home.join(".voxnote").join(CONFIG_FILE_NAME);
        if candidate.exists() {
            return candidate;
        }
    }
    local
}

/// Load and parse the config from disk.
pub async fn load_config(path: &std::path::Path) -> Result<VoxConfig> {
    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: VoxConfig = serde_yaml::from_str(&raw)
        .with_context(|| format!("Failed to parse config YAML at: {}", path.display()))?;

    info!(path = %path.display(), destinations = config.destinations.len(), "Loaded config");
    Ok(config)
}
