use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::game::FlashTiming;

pub const SETTINGS_FILE_NAME: &str = "settings.toml";
const APP_DIR_NAME: &str = "tile-recall";
const DATA_DIR_ENV: &str = "TILE_RECALL_DATA_DIR";
const DEBUG_ENV: &str = "TILE_RECALL_DEBUG";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Feedback delays, all in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Timings {
    pub flash_show_ms: u64,
    pub flash_hide_ms: u64,
    pub level_clear_pause_ms: u64,
    pub screen_flash_ms: u64,
    pub shake_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Timings {
            flash_show_ms: 100,
            flash_hide_ms: 750,
            level_clear_pause_ms: 500,
            screen_flash_ms: 300,
            shake_ms: 300,
        }
    }
}

impl Timings {
    pub fn flash(&self) -> FlashTiming {
        // A revert scheduled before the highlight would leave tiles lit.
        let show_after = Duration::from_millis(self.flash_show_ms);
        let hide_after = Duration::from_millis(self.flash_hide_ms).max(show_after);
        FlashTiming {
            show_after,
            hide_after,
        }
    }

    pub fn level_clear_pause(&self) -> Duration {
        Duration::from_millis(self.level_clear_pause_ms)
    }

    pub fn screen_flash(&self) -> Duration {
        Duration::from_millis(self.screen_flash_ms)
    }

    pub fn shake(&self) -> Duration {
        Duration::from_millis(self.shake_ms)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct FileSettings {
    debug: Option<bool>,
    timings: Timings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub debug: bool,
    pub timings: Timings,
}

impl Settings {
    /// Builds settings from defaults, an optional `settings.toml` body and an
    /// environment lookup, later sources winning.
    pub fn from_sources(
        default_data_dir: PathBuf,
        file_contents: Option<&str>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, SettingsError> {
        let file: FileSettings = match file_contents {
            Some(raw) => toml::from_str(raw)?,
            None => FileSettings::default(),
        };

        let mut settings = Settings {
            data_dir: default_data_dir,
            debug: file.debug.unwrap_or(false),
            timings: file.timings,
        };
        if let Some(dir) = env(DATA_DIR_ENV).filter(|v| !v.trim().is_empty()) {
            settings.data_dir = PathBuf::from(dir);
        }
        if let Some(value) = env(DEBUG_ENV) {
            settings.debug = flag_enabled(&value);
        }
        Ok(settings)
    }

    pub fn records_path(&self) -> PathBuf {
        self.data_dir.join(crate::records::RECORDS_FILE_NAME)
    }
}

pub fn flag_enabled(value: &str) -> bool {
    let v = value.trim().to_ascii_lowercase();
    matches!(v.as_str(), "1" | "true" | "yes" | "on")
}

/// `$XDG_CONFIG_HOME/tile-recall`, else `$HOME/.config/tile-recall`.
pub fn default_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("XDG_CONFIG_HOME")
        && !dir.trim().is_empty()
    {
        return PathBuf::from(dir).join(APP_DIR_NAME);
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".config").join(APP_DIR_NAME)
}

fn read_settings_file(path: &Path) -> Result<Option<String>, SettingsError> {
    match fs::read_to_string(path) {
        Ok(raw) => Ok(Some(raw)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// Loads settings from the process environment. Problems with the settings
/// file are logged and the defaults used instead.
pub fn load_settings(default_dir: PathBuf) -> Settings {
    let env = |key: &str| std::env::var(key).ok();
    let data_dir = env(DATA_DIR_ENV)
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or(default_dir);
    let path = data_dir.join(SETTINGS_FILE_NAME);

    let contents = read_settings_file(&path).unwrap_or_else(|err| {
        warn!(path = %path.display(), "ignoring settings file: {err}");
        None
    });
    Settings::from_sources(data_dir.clone(), contents.as_deref(), env).unwrap_or_else(|err| {
        warn!(path = %path.display(), "ignoring settings file: {err}");
        Settings {
            data_dir,
            debug: std::env::var(DEBUG_ENV).is_ok_and(|v| flag_enabled(&v)),
            timings: Timings::default(),
        }
    })
}
