// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language
//! - `[reveal]` - Scroll-reveal margin
//! - `[lightbox]` - Wheel zoom sensitivity
//! - `[layout]` - Gallery grid columns
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. `--config-dir` CLI flag or `ICED_FOLIO_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use iced_folio::config::{self, Config};
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! // Modify a setting
//! config.general.language = Some("fr".to_string());
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

const CONFIG_FILE: &str = "settings.toml";

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Scroll-reveal settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RevealConfig {
    /// Visibility margin above the viewport bottom.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<f32>,
}

/// Lightbox settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LightboxConfig {
    /// Zoom change per unit of wheel delta.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom_sensitivity: Option<f32>,
}

/// Page layout settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LayoutConfig {
    /// Number of gallery grid columns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gallery_columns: Option<u32>,
}

/// Root configuration, one struct per `settings.toml` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub reveal: RevealConfig,
    #[serde(default)]
    pub lightbox: LightboxConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
}

impl Config {
    /// Reveal margin, falling back to the default when unset or invalid.
    #[must_use]
    pub fn reveal_margin(&self) -> f32 {
        match self.reveal.margin {
            Some(margin) if margin.is_finite() && margin >= 0.0 => margin,
            _ => DEFAULT_REVEAL_MARGIN,
        }
    }

    /// Wheel zoom sensitivity, clamped to a usable range.
    #[must_use]
    pub fn zoom_sensitivity(&self) -> f32 {
        match self.lightbox.zoom_sensitivity {
            Some(value) if value.is_finite() && value > 0.0 => value.min(MAX_ZOOM_SENSITIVITY),
            _ => DEFAULT_ZOOM_SENSITIVITY,
        }
    }

    /// Gallery columns, clamped to the supported range.
    #[must_use]
    pub fn gallery_columns(&self) -> u32 {
        self.layout
            .gallery_columns
            .unwrap_or(DEFAULT_GALLERY_COLUMNS)
            .clamp(MIN_GALLERY_COLUMNS, MAX_GALLERY_COLUMNS)
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    paths::get_app_config_dir().map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the configuration from the default location.
///
/// Never fails: a missing file yields defaults, an unreadable or invalid one
/// yields defaults plus a warning describing the problem.
pub fn load() -> (Config, Option<String>) {
    let Some(path) = get_default_config_path() else {
        return (Config::default(), None);
    };
    if !path.exists() {
        return (Config::default(), None);
    }
    match load_from_path(&path) {
        Ok(config) => (config, None),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "falling back to default settings");
            (Config::default(), Some(err.to_string()))
        }
    }
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
