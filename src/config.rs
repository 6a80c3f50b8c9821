use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Optional defaults for the non-destructive flags, read from
/// `<config-dir>/subs-match/config.toml`. A flag passed on the command
/// line always wins over the file.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub no_color: bool,
    pub preserve: bool,
    pub recursive: bool,
    pub skip_season: bool,
    pub quiet: bool,
    pub verbose: bool,
}

pub fn load_defaults() -> Result<FileConfig> {
    let config_path = get_config_path();
    if !config_path.exists() {
        return Ok(FileConfig::default());
    }
    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("failed to read config file {}", config_path.display()))?;
    toml::from_str(&config_content)
        .with_context(|| format!("invalid config file {}", config_path.display()))
}

fn get_config_dir_path() -> PathBuf {
    xdir::config()
        .map(|path| path.join("subs-match"))
        // If the standard path could not be found (e.g. `$HOME` is not set),
        // default to the current directory.
        .unwrap_or_default()
}

fn get_config_path() -> PathBuf {
    get_config_dir_path().join("config.toml")
}
