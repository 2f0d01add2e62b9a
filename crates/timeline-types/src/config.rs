//! Configuration loading for the podcast timeline.
//!
//! Layered config: defaults -> config file -> env vars -> CLI flags.
//! The default config file lives at ~/.config/podcast-timeline/config.toml.

use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::TimelineError;

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Path to the JSON data file backing the store
    #[serde(default = "default_data_path")]
    pub data_path: String,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Image shown when an event has no image and its episode no cover
    #[serde(default = "default_placeholder_image_url")]
    pub placeholder_image_url: String,

    /// Description length kept in hover tooltips
    #[serde(default = "default_tooltip_description_chars")]
    pub tooltip_description_chars: usize,

    /// Delay before a hover tooltip closes after the pointer leaves (ms)
    #[serde(default = "default_hover_dismiss_ms")]
    pub hover_dismiss_ms: u64,
}

fn default_data_path() -> String {
    ProjectDirs::from("", "", "podcast-timeline")
        .map(|p| p.data_local_dir().join("timeline.json"))
        .unwrap_or_else(|| PathBuf::from("./timeline.json"))
        .to_string_lossy()
        .to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_placeholder_image_url() -> String {
    "https://images.unsplash.com/photo-1526374965328-7f61d4dc18c5?w=400&h=400&fit=crop&crop=center"
        .to_string()
}

pub fn default_tooltip_description_chars() -> usize {
    80
}

pub fn default_hover_dismiss_ms() -> u64 {
    100
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            log_level: default_log_level(),
            placeholder_image_url: default_placeholder_image_url(),
            tooltip_description_chars: default_tooltip_description_chars(),
            hover_dismiss_ms: default_hover_dismiss_ms(),
        }
    }
}

impl Settings {
    /// Load settings with layered precedence:
    /// 1. Built-in defaults
    /// 2. Config file (~/.config/podcast-timeline/config.toml)
    /// 3. CLI-specified config file (optional)
    /// 4. Environment variables (TIMELINE_*)
    ///
    /// CLI flags should be applied by the caller after this returns.
    pub fn load(cli_config_path: Option<&str>) -> Result<Self, TimelineError> {
        let config_dir = ProjectDirs::from("", "", "podcast-timeline")
            .map(|p| p.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        let default_config_path = config_dir.join("config");

        let mut builder = Config::builder()
            .set_default("data_path", default_data_path())
            .map_err(|e| TimelineError::Config(e.to_string()))?
            .set_default("log_level", default_log_level())
            .map_err(|e| TimelineError::Config(e.to_string()))?
            .set_default("placeholder_image_url", default_placeholder_image_url())
            .map_err(|e| TimelineError::Config(e.to_string()))?
            .set_default(
                "tooltip_description_chars",
                default_tooltip_description_chars() as i64,
            )
            .map_err(|e| TimelineError::Config(e.to_string()))?
            .set_default("hover_dismiss_ms", default_hover_dismiss_ms() as i64)
            .map_err(|e| TimelineError::Config(e.to_string()))?
            .add_source(File::with_name(&default_config_path.to_string_lossy()).required(false));

        if let Some(path) = cli_config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // Format: TIMELINE_DATA_PATH, TIMELINE_HOVER_DISMISS_MS, ...
        // Nested keys use "__" so field names keep their underscores.
        builder = builder.add_source(
            Environment::with_prefix("TIMELINE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| TimelineError::Config(e.to_string()))?;

        let settings: Settings = config
            .try_deserialize()
            .map_err(|e| TimelineError::Config(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), TimelineError> {
        if self.data_path.trim().is_empty() {
            return Err(TimelineError::Config("data_path must not be empty".to_string()));
        }
        if self.tooltip_description_chars == 0 {
            return Err(TimelineError::Config(
                "tooltip_description_chars must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Expand ~ in data_path to the home directory
    pub fn expanded_data_path(&self) -> PathBuf {
        if let Some(rest) = self.data_path.strip_prefix("~/") {
            if let Some(base) = directories::BaseDirs::new() {
                return base.home_dir().join(rest);
            }
        }
        PathBuf::from(&self.data_path)
    }
}
