#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Selection, hover, and choropleth synchronization for a region map layer.
//!
//! [`MapSync`] owns no rendering handles. It drives a [`RenderSurface`]
//! (the actual map widget) from the host's selection state and the active
//! metric's values, and turns pointer events back into
//! [`SelectionIntent`](regionscope_map_sync_models::SelectionIntent)s.
//!
//! Styling is a pure function of the feature's region code, the selection,
//! and the active metric's value and domain ([`style::compute_style`]), so
//! every input change simply restyles the whole layer.
//!
//! One ordering rule matters: selected borders must never end up hidden
//! under a neighbor that was hovered. Whenever the pointer leaves a
//! feature, every selected feature is raised back to the top.

pub mod config;
pub mod feature;
pub mod style;
pub mod surface;
pub mod sync;

pub use config::{LatLng, MapViewConfig};
pub use feature::{FeatureId, MapFeature, parse_features};
pub use style::{FeatureStyle, StyleOverlay};
pub use surface::{RecordingSurface, RenderSurface};
pub use sync::{MapInputs, MapSync};

use thiserror::Error;

/// Errors that can occur while loading map configuration or boundaries.
#[derive(Debug, Error)]
pub enum MapSyncError {
    /// I/O error reading a config file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The map view config was malformed.
    #[error("Map config error: {0}")]
    Config(#[from] toml::de::Error),

    /// A boundary file could not be parsed as `GeoJSON`.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),
}
