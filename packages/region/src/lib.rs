#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Region registry and snapshot loading.
//!
//! The [`registry`] holds the fixed set of selectable region codes and the
//! group (city) each belongs to, embedded at compile time. The
//! [`snapshot`] module loads the per-region statistics the rest of the
//! workspace computes over, and [`summary`] renders a selection for
//! display.

pub mod registry;
pub mod snapshot;
pub mod summary;

pub use registry::{RegionArea, RegionEntry, all_regions, group_of, regions_by_group};
pub use snapshot::Snapshot;
pub use summary::summarize_selection;

use thiserror::Error;

/// Errors that can occur while loading region data.
#[derive(Debug, Error)]
pub enum RegionError {
    /// I/O error reading a snapshot file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot JSON was malformed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Registry TOML was malformed.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// The same region code appeared twice in one snapshot.
    #[error("Duplicate region code: {code}")]
    DuplicateRegion {
        /// The repeated code.
        code: String,
    },
}
