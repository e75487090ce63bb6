use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::cli::CliArgs;

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Config {
    pub version: u32,
    /// Repositories created within the last N days are queried.
    pub days_window: u32,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct UiConfig {
    pub show_avatar_url: bool,
    pub show_star_icon: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: 1,
            days_window: 10,
            ui: UiConfig::default(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_avatar_url: false,
            show_star_icon: true,
        }
    }
}

pub fn get_default_config_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("", "", "starfeed")
        .context("Failed to determine project directories")?;

    let config_dir = proj_dirs.config_dir();
    Ok(config_dir.join("starfeed.toml"))
}

impl Config {
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let path = match config_path {
            Some(p) => p,
            None => get_default_config_path()?,
        };

        if !path.exists() {
            let default_config = Config::default();
            // Create directory if it doesn't exist
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .context("Failed to create config directory")?;
            }
            default_config.save(&path)?;
            return Ok(default_config);
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .context("Failed to serialize config to TOML")?;

        fs::write(&path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }

    pub fn from_cli_and_file(cli_args: CliArgs, config_path: Option<PathBuf>) -> Result<Self> {
        let mut config = Self::load(config_path)?;

        // CLI args override config file
        if let Some(days) = cli_args.days {
            config.days_window = days;
        }

        Ok(config)
    }
}
