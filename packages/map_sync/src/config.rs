//! Map view configuration.
//!
//! The default view is embedded from `config/default.toml`; hosts can load
//! an override with [`MapViewConfig::load`].

use std::path::Path;

use regionscope_choropleth::Palette;
use serde::{Deserialize, Serialize};

use crate::MapSyncError;
use crate::style::{BaseStyle, StyleOverlay};

const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

/// A geographic point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
}

/// How the region layer is bound, styled, and framed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapViewConfig {
    /// Center restored on "reset view".
    pub center: LatLng,
    /// Zoom restored on "reset view".
    pub zoom: f64,
    /// Fit the whole layer on first display instead of using
    /// `center`/`zoom`.
    #[serde(default)]
    pub fit_initial_bounds: bool,
    /// Pixel padding `[x, y]` applied when fitting bounds.
    pub fit_padding: [u32; 2],
    /// Feature property names tried, in order, for the region code.
    pub code_keys: Vec<String>,
    /// Feature property holding the display name shown in tooltips.
    pub display_name_key: String,
    /// Fill colors per choropleth class.
    #[serde(default)]
    pub palette: Palette,
    /// Style every feature starts from.
    pub base_style: BaseStyle,
    /// Overlay for selected features.
    pub selected_style: StyleOverlay,
    /// Overlay for the feature under the pointer.
    pub hover_style: StyleOverlay,
}

impl MapViewConfig {
    /// Parses a config from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`MapSyncError::Config`] if the document is malformed or
    /// missing a required key.
    pub fn from_toml(toml_str: &str) -> Result<Self, MapSyncError> {
        Ok(toml::de::from_str(toml_str)?)
    }

    /// Reads and parses a config file.
    ///
    /// # Errors
    ///
    /// * [`MapSyncError::Io`] if the file cannot be read
    /// * [`MapSyncError::Config`] if the file is malformed
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MapSyncError> {
        let path = path.as_ref();
        let config = Self::from_toml(&std::fs::read_to_string(path)?)?;
        log::info!("Loaded map config from {}", path.display());
        Ok(config)
    }
}

impl Default for MapViewConfig {
    /// The embedded default view.
    ///
    /// # Panics
    ///
    /// Panics if the embedded config is malformed (this is a compile-time
    /// guarantee since the config is embedded).
    fn default() -> Self {
        Self::from_toml(DEFAULT_CONFIG)
            .unwrap_or_else(|e| panic!("Failed to parse default map config: {e}"))
    }
}
