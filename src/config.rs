//! Application configuration management.
//!
//! This module handles the persistent configuration for waveedit: the editing
//! tunables (zoom step, click and edge thresholds, auto-scroll margin, parallel
//! scan threshold), the size of the terminal waveform rendering, and the log
//! level. Configuration is stored in the user's config directory (typically
//! ~/.config/waveedit/config.toml). Edited files keep the sample rate of their
//! source, so there is no rate setting.

use crate::constants::{DEFAULT_DISPLAY_HEIGHT, DEFAULT_DISPLAY_WIDTH};
use crate::editor::EditorSettings;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub editor: EditorSettings,
    #[serde(default = "default_display_width")]
    pub display_width: usize,
    #[serde(default = "default_display_height")]
    pub display_height: usize,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_display_width() -> usize {
    DEFAULT_DISPLAY_WIDTH
}

fn default_display_height() -> usize {
    DEFAULT_DISPLAY_HEIGHT
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Self {
            editor: EditorSettings::default(),
            display_width: default_display_width(),
            display_height: default_display_height(),
            log_level: default_log_level(),
        }
    }

    pub fn config_dir() -> Result<PathBuf, Box<dyn Error>> {
        // Check for XDG_CONFIG_HOME first (useful for testing)
        let config_dir = if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            PathBuf::from(xdg_config).join("waveedit")
        } else {
            dirs::config_dir()
                .ok_or("Unable to find config directory")?
                .join("waveedit")
        };
        Ok(config_dir)
    }

    pub fn config_path() -> Result<PathBuf, Box<dyn Error>> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    pub fn load() -> Result<Self, Box<dyn Error>> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Default::default());
        }

        let contents = fs::read_to_string(&config_path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<(), Box<dyn Error>> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        let config_path = Self::config_path()?;
        let toml_string = toml::to_string_pretty(self)?;
        fs::write(&config_path, toml_string)?;

        Ok(())
    }

    pub fn exists() -> Result<bool, Box<dyn Error>> {
        Ok(Self::config_path()?.exists())
    }

    /// Apply the same checks `set_value` applies per key to the whole file
    pub fn validate(&self) -> Result<(), Box<dyn Error>> {
        self.editor.validate()?;
        if self.display_width == 0 {
            return Err("display_width must be greater than zero".into());
        }
        if self.display_height == 0 {
            return Err("display_height must be greater than zero".into());
        }
        LevelFilter::from_str(&self.log_level).map_err(|_| {
            format!(
                "log_level must be one of off, error, warn, info, debug, trace (got '{}')",
                self.log_level
            )
        })?;
        Ok(())
    }

    /// Parsed `log_level`, falling back to `Warn` for unrecognised names
    pub fn level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(&self.log_level).unwrap_or(LevelFilter::Warn)
    }

    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        match key {
            "zoom_step" => {
                let mut editor = self.editor.clone();
                editor.zoom_step = parse(key, value)?;
                editor.validate()?;
                self.editor = editor;
            }
            "click_threshold_px" => self.editor.click_threshold_px = parse(key, value)?,
            "edge_grab_px" => self.editor.edge_grab_px = parse(key, value)?,
            "autoscroll_margin_px" => self.editor.autoscroll_margin_px = parse(key, value)?,
            "parallel_scan_threshold" => {
                self.editor.parallel_scan_threshold = parse(key, value)?;
            }
            "display_width" => self.display_width = parse_nonzero(key, value)?,
            "display_height" => self.display_height = parse_nonzero(key, value)?,
            "log_level" => {
                LevelFilter::from_str(value).map_err(|_| {
                    format!("log_level must be one of off, error, warn, info, debug, trace (got '{value}')")
                })?;
                self.log_level = value.to_lowercase();
            }
            _ => return Err(format!("Unknown configuration key: {key}").into()),
        }
        Ok(())
    }
}

fn parse<T: FromStr>(key: &str, value: &str) -> Result<T, Box<dyn Error>> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| format!("Invalid value for {key}: '{value}'").into())
}

fn parse_nonzero(key: &str, value: &str) -> Result<usize, Box<dyn Error>> {
    match parse::<usize>(key, value)? {
        0 => Err(format!("{key} must be greater than zero").into()),
        n => Ok(n),
    }
}
