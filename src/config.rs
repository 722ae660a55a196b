use crate::{CONFIG_DIRECTORY, DEFAULT_TICK_INTERVAL};
use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

const SETTINGS_FILENAME: &str = "config.toml";

/// User settings, read from `<config dir>/songdeck/config.toml`.
///
/// Missing keys fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where track files are looked up by name
    pub music_dir: PathBuf,
    pub playlist: Vec<String>,
    pub tick_interval_ms: u64,
    pub seek_step_percent: u8,
    /// `tracing` filter directive, overridden by `SONGDECK_LOG`
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            music_dir: dirs::audio_dir()
                .map(|dir| dir.join(CONFIG_DIRECTORY))
                .unwrap_or_else(|| PathBuf::from("music")),
            playlist: (1..=6).map(|i| format!("Song{i}")).collect(),
            tick_interval_ms: DEFAULT_TICK_INTERVAL.as_millis() as u64,
            seek_step_percent: 5,
            log_filter: String::from("info,songdeck=debug"),
        }
    }
}

impl Settings {
    /// Reads `path`, or writes the defaults there when the file is missing.
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::load_from_file(path);
        }

        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Could not create {}", dir.display()))?;
        }

        let settings = Settings::default();
        settings.save_to_file(path)?;
        Ok(settings)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file_str = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        let settings = toml::from_str::<Settings>(&file_str)
            .with_context(|| format!("Malformed settings file {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), contents)
            .with_context(|| format!("Could not write {}", path.as_ref().display()))?;
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    fn validate(&self) -> Result<()> {
        if self.playlist.is_empty() {
            return Err(anyhow!("The playlist in the settings file is empty"));
        }
        if self.tick_interval_ms == 0 {
            return Err(anyhow!("tick_interval_ms must be greater than zero"));
        }
        if !(1..=100).contains(&self.seek_step_percent) {
            return Err(anyhow!("seek_step_percent must be between 1 and 100"));
        }
        Ok(())
    }
}

pub fn settings_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(SETTINGS_FILENAME))
}

pub fn config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_DIRECTORY))
        .ok_or_else(|| anyhow!("Config folder not present on system!"))
}
