//! Per-metric bar charts of individual regions.

use std::cmp::Ordering;

use regionscope_choropleth::{ColorClass, color_for};
use regionscope_map_sync_models::SelectionState;
use regionscope_metrics::{Domain, MetricResult};
use regionscope_region_models::Region;
use serde::{Deserialize, Serialize};

use crate::{Explorer, ExplorerError};

/// One bar of a comparison chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonEntry {
    /// Region code.
    pub code: String,
    /// `"<group> <code>"`.
    pub name: String,
    /// Raw metric value.
    pub value: Option<f64>,
    /// Value formatted for display.
    pub formatted: String,
    /// Fill bucket against the snapshot-wide domain.
    pub class: ColorClass,
}

/// A compared metric with its bars, largest value first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricComparison {
    /// Catalog id of the metric.
    pub metric_id: String,
    /// Display label.
    pub label: String,
    /// Min/max over the whole snapshot.
    pub domain: Option<Domain>,
    /// Bars, largest value first.
    pub entries: Vec<ComparisonEntry>,
}

impl Explorer<'_> {
    /// Builds one chart per compared metric, in catalog order.
    ///
    /// Bars cover the selected regions, or every region in the snapshot
    /// when nothing is selected. Missing values sort as zero. The domain
    /// always spans the whole snapshot so colors agree with the map.
    ///
    /// # Errors
    ///
    /// Returns [`ExplorerError::Metric`] if a compared metric is not
    /// registered.
    pub fn comparison(&self, state: &SelectionState) -> Result<Vec<MetricComparison>, ExplorerError> {
        let regions: Vec<&Region> = if state.selected().is_empty() {
            self.snapshot.regions().iter().collect()
        } else {
            self.snapshot
                .regions()
                .iter()
                .filter(|r| state.is_selected(&r.code))
                .collect()
        };

        self.metric_results(state.metric_ids())?
            .into_iter()
            .map(|(metric_id, result)| -> Result<MetricComparison, ExplorerError> {
                let descriptor = self.catalog.describe(&metric_id)?;
                Ok(MetricComparison {
                    entries: chart_entries(&regions, &result, |v| descriptor.format_value(v)),
                    label: descriptor.label.clone(),
                    domain: result.domain,
                    metric_id,
                })
            })
            .collect()
    }
}

fn chart_entries(
    regions: &[&Region],
    result: &MetricResult,
    format: impl Fn(Option<f64>) -> String,
) -> Vec<ComparisonEntry> {
    let mut entries: Vec<ComparisonEntry> = regions
        .iter()
        .map(|region| {
            let value = result.value_for(&region.code);
            ComparisonEntry {
                code: region.code.clone(),
                name: format!("{} {}", region.group, region.code),
                value,
                formatted: format(value),
                class: color_for(value, result.domain),
            }
        })
        .collect();

    entries.sort_by(|a, b| descending(a.value, b.value));
    entries
}

fn descending(a: Option<f64>, b: Option<f64>) -> Ordering {
    b.unwrap_or(0.0).total_cmp(&a.unwrap_or(0.0))
}
