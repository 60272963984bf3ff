//! Configuration file handling for the glyphclock terminal clock.
//!
//! The configuration lives in `config.toml` inside the platform config
//! directory. Every field has a default, so a partial file is valid.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use glyphclock_core::{ColorTheme, EffectKind, TimeFormat};
use glyphclock_effects::EffectTuning;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const APP_NAME: &str = "glyphclock";
const CONFIG_FILE: &str = "config.toml";
const LOG_FILE: &str = "glyphclock.log";

/// Frame rates outside this range are clamped.
pub const FPS_RANGE: std::ops::RangeInclusive<u32> = 1..=120;

/// Errors raised while reading or writing the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("no configuration directory found for this platform")]
    NoConfigDir,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: String,
    /// Log file; defaults to the platform data directory.
    pub file: Option<PathBuf>,
    /// Size above which the log is rotated at startup.
    pub max_bytes: u64,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            max_bytes: 10 * 1024 * 1024,
        }
    }
}

impl LogConfig {
    /// The configured log file, or the default location.
    pub fn path(&self) -> Option<PathBuf> {
        self.file.clone().or_else(default_log_path)
    }
}

/// Persisted application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub effect: EffectKind,
    pub time_format: TimeFormat,
    pub color_theme: ColorTheme,
    pub show_millis: bool,
    pub fps: u32,
    pub log: LogConfig,
    pub tuning: EffectTuning,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            effect: EffectKind::default(),
            time_format: TimeFormat::default(),
            color_theme: ColorTheme::default(),
            show_millis: false,
            fps: 30,
            log: LogConfig::default(),
            tuning: EffectTuning::default(),
        }
    }
}

impl Config {
    /// Load from the default location. A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        let path = config_path().ok_or(ConfigError::NoConfigDir)?;
        Self::load_from(&path)
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save to the default location and return the path written.
    pub fn save(&self) -> Result<PathBuf> {
        let path = config_path().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(io_err)
    }

    /// Delay between frames for the configured frame rate.
    pub fn frame_interval(&self) -> Duration {
        let fps = self.fps.clamp(*FPS_RANGE.start(), *FPS_RANGE.end());
        Duration::from_millis(1000 / u64::from(fps))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", APP_NAME)
}

/// Path of the configuration file.
pub fn config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

/// Default log file in the platform data directory.
pub fn default_log_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().join(LOG_FILE))
}
