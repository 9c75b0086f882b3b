use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::paths::{DEFAULT_CHANGE_LOG_SUFFIX, DEFAULT_OUTPUT_SUFFIX};

/// Global configuration loaded from `~/.config/ezfix/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EzfixConfig {
    /// Appended to the input file stem when no output path is given.
    pub output_suffix: String,
    /// Appended to the input file stem when no change log path is given.
    pub change_log_suffix: String,
    /// Write a change log next to the input unless told otherwise.
    pub write_change_log: bool,
}

impl Default for EzfixConfig {
    fn default() -> Self {
        Self {
            output_suffix: DEFAULT_OUTPUT_SUFFIX.to_string(),
            change_log_suffix: DEFAULT_CHANGE_LOG_SUFFIX.to_string(),
            write_change_log: true,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("ezfix")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<EzfixConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = EzfixConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: EzfixConfig = toml::from_str(&data)?;
    Ok(cfg)
}
