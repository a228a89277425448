#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! The recomputation cycle tying the workspace together.
//!
//! An [`Explorer`] holds one read-only region [`Snapshot`] and the metric
//! catalog. Every time the host's [`SelectionState`] changes, it rebuilds
//! the composite region, the per-metric results, and the map inputs from
//! scratch; nothing is patched incrementally.

pub mod comparison;

use std::collections::BTreeSet;

use regionscope_aggregate::combine;
use regionscope_map_sync::MapInputs;
use regionscope_map_sync_models::SelectionState;
use regionscope_metrics::{
    MetricCatalog, MetricError, MetricResult, compute_all, compute_for_regions,
};
use regionscope_region::{RegionError, Snapshot};
use regionscope_region_models::Region;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use thiserror::Error;

pub use comparison::{ComparisonEntry, MetricComparison};

/// Errors that can occur while recomputing explorer state.
#[derive(Debug, Error)]
pub enum ExplorerError {
    /// Metric lookup failed.
    #[error("Metric error: {0}")]
    Metric(#[from] MetricError),

    /// Region data could not be loaded.
    #[error("Region error: {0}")]
    Region(#[from] RegionError),
}

/// Which view the host is showing.
///
/// Only the comparison view colors the map by the active metric.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ExplorerView {
    /// Composite statistics of the selection.
    #[default]
    Dashboard,
    /// Per-region metric comparison.
    Compare,
}

/// A region snapshot together with the catalog used to read it.
#[derive(Debug, Clone)]
pub struct Explorer<'a> {
    catalog: &'a MetricCatalog,
    snapshot: Snapshot,
}

impl Explorer<'static> {
    /// Creates an explorer over the standard metric catalog.
    #[must_use]
    pub fn new(snapshot: Snapshot) -> Self {
        Self::with_catalog(MetricCatalog::global(), snapshot)
    }
}

impl<'a> Explorer<'a> {
    /// Creates an explorer over a custom metric catalog.
    #[must_use]
    pub const fn with_catalog(catalog: &'a MetricCatalog, snapshot: Snapshot) -> Self {
        Self { catalog, snapshot }
    }

    /// The metric catalog in use.
    #[must_use]
    pub const fn catalog(&self) -> &'a MetricCatalog {
        self.catalog
    }

    /// The loaded region snapshot.
    #[must_use]
    pub const fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Regions for the selected codes that have snapshot data, in code
    /// order.
    #[must_use]
    pub fn selected_regions(&self, selection: &BTreeSet<String>) -> Vec<Region> {
        self.snapshot.select(selection)
    }

    /// The composite of the selected regions, or `None` if no selected
    /// region has data.
    #[must_use]
    pub fn composite(&self, selection: &BTreeSet<String>) -> Option<Region> {
        combine(&self.selected_regions(selection))
    }

    /// Results for the compared metrics over every region in the snapshot,
    /// in catalog order.
    ///
    /// # Errors
    ///
    /// Returns [`ExplorerError::Metric`] if any id is not registered.
    pub fn metric_results(
        &self,
        metric_ids: &[String],
    ) -> Result<Vec<(String, MetricResult)>, ExplorerError> {
        Ok(compute_all(self.catalog, metric_ids, self.snapshot.regions())?)
    }

    /// The level-triggered map inputs for the current state.
    ///
    /// The map is colored by the active metric only in
    /// [`ExplorerView::Compare`]; otherwise it carries the selection alone.
    ///
    /// # Errors
    ///
    /// Returns [`ExplorerError::Metric`] if the active metric is not
    /// registered.
    pub fn map_inputs(
        &self,
        state: &SelectionState,
        view: ExplorerView,
    ) -> Result<MapInputs, ExplorerError> {
        let mut inputs = MapInputs {
            selection: state.selected().clone(),
            ..MapInputs::default()
        };

        if view != ExplorerView::Compare {
            return Ok(inputs);
        }
        let Some(metric_id) = state.active_metric() else {
            return Ok(inputs);
        };

        let result = compute_for_regions(self.catalog, metric_id, self.snapshot.regions())?;
        log::debug!("Coloring map by {metric_id}, domain {:?}", result.domain);

        inputs.active_metric = Some(metric_id.to_string());
        inputs.values = result.values_by_region;
        inputs.domain = result.domain;
        Ok(inputs)
    }
}
