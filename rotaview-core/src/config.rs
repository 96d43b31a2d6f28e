//! rotaview configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{RotaviewError, RotaviewResult};

static DEFAULT_SCHEDULE_PATH: &str = "rotation.json";
static DEFAULT_OVERRIDES_PATH: &str = "overrides.json";
static DEFAULT_REFRESH_INTERVAL: &str = "1m";

fn default_schedule_path() -> PathBuf {
    PathBuf::from(DEFAULT_SCHEDULE_PATH)
}

fn default_overrides_path() -> Option<PathBuf> {
    Some(PathBuf::from(DEFAULT_OVERRIDES_PATH))
}

fn default_refresh_interval() -> String {
    DEFAULT_REFRESH_INTERVAL.to_string()
}

/// Configuration at ~/.config/rotaview/config.toml, overridable with
/// `ROTAVIEW_*` environment variables (`ROTAVIEW_LAYOUT__PIXELS_PER_HOUR=80`).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    #[serde(default = "default_schedule_path")]
    pub schedule_path: PathBuf,

    #[serde(default = "default_overrides_path", skip_serializing_if = "Option::is_none")]
    pub overrides_path: Option<PathBuf>,

    /// How often `watch` reloads and re-renders (humantime, e.g. "1m", "30s")
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval: String,

    #[serde(default)]
    pub layout: LayoutConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            schedule_path: default_schedule_path(),
            overrides_path: default_overrides_path(),
            refresh_interval: default_refresh_interval(),
            layout: LayoutConfig::default(),
        }
    }
}

/// Timeline scale and labelling.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
    /// Vertical pixels per hour of the day
    pub pixels_per_hour: f64,
    /// Width of one column, in percent of the timeline width
    pub column_width_percent: f64,
    /// Long windows repeat their label every this many hour segments
    pub label_interval_hours: usize,
    /// Windows at least this long count as long
    pub long_window_hours: i64,
    /// Space kept above the current-time marker when scrolling to it
    pub scroll_padding_px: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            pixels_per_hour: 60.0,
            column_width_percent: 15.0,
            label_interval_hours: 4,
            long_window_hours: 24,
            scroll_padding_px: 200.0,
        }
    }
}

impl AppConfig {
    pub fn config_path() -> RotaviewResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| RotaviewError::Config("Could not determine config directory".into()))?
            .join("rotaview");

        Ok(config_dir.join("config.toml"))
    }

    /// Load ~/.config/rotaview/config.toml, creating a commented default on first run.
    pub fn load() -> RotaviewResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from an explicit file layered with the environment.
    pub fn load_from(path: &Path) -> RotaviewResult<Self> {
        Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(
                Environment::with_prefix("ROTAVIEW")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(|e| RotaviewError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| RotaviewError::Config(e.to_string()))
    }

    /// Schedule path with `~` expanded
    pub fn schedule_path(&self) -> PathBuf {
        expand(&self.schedule_path)
    }

    /// Overrides path with `~` expanded, if overrides are configured
    pub fn overrides_path(&self) -> Option<PathBuf> {
        self.overrides_path.as_deref().map(expand)
    }

    pub fn refresh_interval(&self) -> RotaviewResult<Duration> {
        humantime::parse_duration(&self.refresh_interval).map_err(|e| {
            RotaviewError::Config(format!(
                "Invalid refresh_interval '{}': {e}",
                self.refresh_interval
            ))
        })
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> RotaviewResult<()> {
        let defaults = LayoutConfig::default();
        let contents = format!(
            "\
# rotaview configuration

# Base rotation schedule:
# schedule_path = \"{DEFAULT_SCHEDULE_PATH}\"

# Optional overrides applied on top of the schedule:
# overrides_path = \"{DEFAULT_OVERRIDES_PATH}\"

# How often `rotaview watch` reloads:
# refresh_interval = \"{DEFAULT_REFRESH_INTERVAL}\"

# [layout]
# pixels_per_hour = {}
# column_width_percent = {}
# label_interval_hours = {}
# long_window_hours = {}
# scroll_padding_px = {}
",
            defaults.pixels_per_hour,
            defaults.column_width_percent,
            defaults.label_interval_hours,
            defaults.long_window_hours,
            defaults.scroll_padding_px,
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;

        Ok(())
    }

    pub fn to_toml(&self) -> RotaviewResult<String> {
        toml::to_string_pretty(self).map_err(|e| RotaviewError::Config(e.to_string()))
    }
}

fn expand(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}
