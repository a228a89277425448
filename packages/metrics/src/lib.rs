#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Declarative metric catalog and per-region domain computation.
//!
//! The [`catalog::MetricCatalog`] is a fixed, ordered table of metric
//! descriptors built once at startup. Each descriptor pairs display
//! metadata with a pure [`extract::Extractor`] that reads one number out
//! of a [`Region`](regionscope_region_models::Region). The [`domain`]
//! module evaluates a metric across a region set and derives the
//! `[min, max]` range used for choropleth normalization.

pub mod catalog;
pub mod domain;
pub mod extract;
pub mod summary;

pub use catalog::{MetricCatalog, MetricDescriptor};
pub use domain::{compute_all, compute_for_regions};
pub use regionscope_metrics_models::{Domain, MetricFormat, MetricGroup, MetricResult};
pub use summary::summarize_metrics;

use thiserror::Error;

/// Errors that can occur during metric lookups.
#[derive(Debug, Error)]
pub enum MetricError {
    /// The requested metric id is not registered in the catalog.
    #[error("Unknown metric id: {id}")]
    NotFound {
        /// The id that was requested.
        id: String,
    },
}
