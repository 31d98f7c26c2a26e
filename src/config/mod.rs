// SPDX-License-Identifier: MPL-2.0
//! This module handles the configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[magnifier]` - Lens zoom, radius, shape and startup state
//!
//! Every field is optional; missing values fall back to [`defaults`].
//!
//! # Examples
//!
//! ```no_run
//! use magnify_glass::config;
//! use magnify_glass::domain::lens::LensShape;
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! // Modify a setting
//! config.magnifier.shape = Some(LensShape::Square);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;
pub mod paths;

pub use defaults::*;

use crate::domain::lens::{LensRadius, LensShape, ZoomRange, ZoomStep};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// Magnifier lens settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MagnifierConfig {
    /// Initial magnification.
    #[serde(default = "default_zoom_factor", skip_serializing_if = "Option::is_none")]
    pub zoom_factor: Option<f32>,

    /// Lens radius in pixels.
    #[serde(default = "default_lens_radius", skip_serializing_if = "Option::is_none")]
    pub lens_radius: Option<f32>,

    /// Lower zoom bound.
    #[serde(default = "default_min_zoom", skip_serializing_if = "Option::is_none")]
    pub min_zoom: Option<f32>,

    /// Upper zoom bound.
    #[serde(default = "default_max_zoom", skip_serializing_if = "Option::is_none")]
    pub max_zoom: Option<f32>,

    /// Zoom increment for wheel and keyboard.
    #[serde(default = "default_zoom_step", skip_serializing_if = "Option::is_none")]
    pub zoom_step: Option<f32>,

    /// Lens outline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<LensShape>,

    /// Whether the magnifier is enabled when the host starts.
    #[serde(default = "default_enabled_on_start", skip_serializing_if = "Option::is_none")]
    pub enabled_on_start: Option<bool>,
}

impl Default for MagnifierConfig {
    fn default() -> Self {
        Self {
            zoom_factor: default_zoom_factor(),
            lens_radius: default_lens_radius(),
            min_zoom: default_min_zoom(),
            max_zoom: default_max_zoom(),
            zoom_step: default_zoom_step(),
            shape: Some(LensShape::default()),
            enabled_on_start: default_enabled_on_start(),
        }
    }
}

impl MagnifierConfig {
    /// Zoom bounds with invalid combinations repaired.
    #[must_use]
    pub fn zoom_range(&self) -> ZoomRange {
        ZoomRange::new(
            self.min_zoom.unwrap_or(DEFAULT_MIN_ZOOM),
            self.max_zoom.unwrap_or(DEFAULT_MAX_ZOOM),
        )
    }

    #[must_use]
    pub fn lens_radius(&self) -> LensRadius {
        LensRadius::new(self.lens_radius.unwrap_or(DEFAULT_LENS_RADIUS))
    }

    #[must_use]
    pub fn zoom_step(&self) -> ZoomStep {
        ZoomStep::new(self.zoom_step.unwrap_or(DEFAULT_ZOOM_STEP))
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub magnifier: MagnifierConfig,
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_zoom_factor() -> Option<f32> {
    Some(DEFAULT_ZOOM_FACTOR)
}

fn default_lens_radius() -> Option<f32> {
    Some(DEFAULT_LENS_RADIUS)
}

fn default_min_zoom() -> Option<f32> {
    Some(DEFAULT_MIN_ZOOM)
}

fn default_max_zoom() -> Option<f32> {
    Some(DEFAULT_MAX_ZOOM)
}

fn default_zoom_step() -> Option<f32> {
    Some(DEFAULT_ZOOM_STEP)
}

fn default_enabled_on_start() -> Option<bool> {
    Some(true)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    return (
                        Config::default(),
                        Some(format!("failed to load {}: {}", path.display(), err)),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
