use std::path::PathBuf;

use derive_more::From;
use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod theme;

pub use theme::Theme;

#[derive(Debug, From, Error)]
pub enum ConfigError {
    #[error(
        "Failed to get configuration directory. Please specify the location using the `--config <path>` flag"
    )]
    NoDirectory,

    #[error("Failed to create config directory: {0}")]
    CreateDirectory(std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(Box<figment::Error>),
}

/// Settings merged from defaults, `settings.toml` and `TAPSTATS_*`
/// environment variables, in that order.
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub theme: Theme,
    /// Directory holding the per-player history files. Defaults to the
    /// trainer's `stats/` directory next to the working directory.
    pub stats_dir: Option<PathBuf>,
    /// Rolling-average window for the key speed plot.
    pub smoothness: usize,
    /// How many transitions the ranked views show.
    pub digraph_top: usize,
    /// How many trigrams the ranked view shows.
    pub trigram_top: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            stats_dir: None,
            smoothness: 1,
            digraph_top: 15,
            trigram_top: 20,
        }
    }
}

#[derive(Debug, Default)]
pub struct Config {
    pub settings: Settings,
}

impl Config {
    pub fn get(override_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        // Grab default configuration
        let mut settings = Figment::from(Serialized::defaults(Settings::default()));

        // Check for toml file location
        let config_dir = override_path
            .or_else(|| {
                ProjectDirs::from("com", "TapStats", "TapStats")
                    .map(|dirs| dirs.config_dir().to_path_buf())
            })
            .ok_or(ConfigError::NoDirectory)?;

        // Ensure path exists
        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir)?;
        }

        let mut settings_toml = config_dir.clone();
        settings_toml.push("settings.toml");

        if settings_toml.exists() {
            settings = settings.merge(Toml::file(settings_toml));
        }

        settings = settings.merge(Env::prefixed("TAPSTATS_"));

        let settings: Settings = settings.extract().map_err(Box::new)?;

        Ok(Self { settings })
    }

    /// Where the per-player history files live.
    pub fn stats_dir(&self) -> PathBuf {
        self.settings
            .stats_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("stats"))
    }
}
