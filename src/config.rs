// filepath: src/config.rs
//! Configuration handling for safe-area-canvas
//!
//! This file defines the configuration structure and provides
//! functionality to load and save configuration from/to files.
//! The SafeAreaConfig struct mirrors the controller's inspector options,
//! plus a `[preview]` device profile used by the preview binary.

use serde::{Deserialize, Serialize};
use std::{
    fmt, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::controller::{SafeAreaSettings, UpdateTiming};
use crate::geometry::{AxisMask, Rect, ScreenMetrics};
#[cfg(feature = "notch-simulator")]
use crate::notch::Orientation;
use crate::scene::{Color, DEFAULT_COVER_COLOR};

/// Device profile the preview binary lays out against
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    pub screen_width: f32,
    pub screen_height: f32,
    /// x, y, width, height
    pub safe_area: [f32; 4],
    /// Notch to simulate after the regular updates
    #[cfg(feature = "notch-simulator")]
    pub notch: Option<Orientation>,
    /// Number of tick / fixed-tick pairs to run
    pub ticks: u32,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            screen_width: 1080.0,
            screen_height: 2220.0,
            safe_area: [0.0, 102.0, 1080.0, 2016.0],
            #[cfg(feature = "notch-simulator")]
            notch: None,
            ticks: 1,
        }
    }
}

impl PreviewConfig {
    pub fn metrics(&self) -> ScreenMetrics {
        let [x, y, width, height] = self.safe_area;
        ScreenMetrics::new(
            self.screen_width,
            self.screen_height,
            Rect::new(x, y, width, height),
        )
    }
}

/// Configuration for the safe-area controller
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SafeAreaConfig {
    pub update_timing: UpdateTiming,
    pub safe_horizontal: bool,
    pub safe_vertical: bool,
    pub cover_unsafe_area: bool,
    /// Only used while `cover_unsafe_area` is on
    pub cover_color: Color,
    pub preview: PreviewConfig,
}

impl Default for SafeAreaConfig {
    fn default() -> Self {
        Self {
            update_timing: UpdateTiming::default(),
            safe_horizontal: true,
            safe_vertical: true,
            cover_unsafe_area: false,
            cover_color: DEFAULT_COVER_COLOR,
            preview: PreviewConfig::default(),
        }
    }
}

/// Problem found while validating a configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigIssue {
    pub message: String,
    pub is_error: bool,
}

impl ConfigIssue {
    fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: true,
        }
    }

    fn warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: false,
        }
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl SafeAreaConfig {
    /// Get the path to the configuration file
    pub fn get_config_path() -> PathBuf {
        let config_dir = if let Some(config_dir) = dirs::config_dir() {
            config_dir.join("safe-area-canvas")
        } else {
            PathBuf::from(".config/safe-area-canvas")
        };

        config_dir.join("config.toml")
    }

    /// Load configuration from file, returning default if not found
    pub fn load_from_file() -> Result<Self, Box<dyn std::error::Error>> {
        Self::load_from_path(&Self::get_config_path())
    }

    /// Load configuration from `path`, writing defaults there if it doesn't exist
    pub fn load_from_path(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        match fs::read_to_string(path) {
            Ok(content) => {
                let config: Self = toml::from_str(&content)?;
                Ok(config)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let default_config = Self::default();
                default_config.save_to_path(path)?;
                Ok(default_config)
            }
            Err(e) => Err(Box::new(e)),
        }
    }

    /// Save configuration to file
    pub fn save_to_file(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.save_to_path(&Self::get_config_path())
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        // Create the directory if it doesn't exist
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !Path::exists(parent) {
                fs::create_dir_all(parent)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;

        Ok(())
    }

    pub fn axes(&self) -> AxisMask {
        AxisMask {
            safe_horizontal: self.safe_horizontal,
            safe_vertical: self.safe_vertical,
        }
    }

    /// Cover color, if covering is enabled.
    pub fn effective_cover_color(&self) -> Option<Color> {
        self.cover_unsafe_area.then_some(self.cover_color)
    }

    pub fn settings(&self) -> SafeAreaSettings {
        SafeAreaSettings {
            update_timing: self.update_timing,
            axes: self.axes(),
            cover_unsafe_area: self.cover_unsafe_area,
            cover_color: self.effective_cover_color().unwrap_or(DEFAULT_COVER_COLOR),
        }
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        let preview = &self.preview;

        if !(preview.screen_width > 0.0 && preview.screen_height > 0.0) {
            issues.push(ConfigIssue::error(format!(
                "preview screen {}x{} must have a positive size",
                preview.screen_width, preview.screen_height
            )));
        }

        let [x, y, width, height] = preview.safe_area;
        if x < 0.0
            || y < 0.0
            || width < 0.0
            || height < 0.0
            || x + width > preview.screen_width
            || y + height > preview.screen_height
        {
            issues.push(ConfigIssue::warning(format!(
                "preview safe area {:?} lies outside the {}x{} screen and will be clamped",
                preview.safe_area, preview.screen_width, preview.screen_height
            )));
        }

        if !self.cover_unsafe_area && self.cover_color != DEFAULT_COVER_COLOR {
            issues.push(ConfigIssue::warning(
                "cover_color is ignored while cover_unsafe_area is off",
            ));
        }

        issues
    }
}
