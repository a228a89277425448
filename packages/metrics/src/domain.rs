//! Per-region metric evaluation and normalization domains.

use std::collections::BTreeSet;

use regionscope_metrics_models::{Domain, MetricResult};
use regionscope_region_models::{Region, numeric};

use crate::MetricError;
use crate::catalog::MetricCatalog;

/// Evaluates `metric_id` for every region and derives its domain.
///
/// Each region's value is recorded under its code; values that are absent
/// or non-finite are recorded as `None`. The domain spans the numeric
/// values and is `None` when there are none. Min/max are order
/// independent, so the result does not depend on iteration order.
///
/// # Errors
///
/// Returns [`MetricError::NotFound`] if `metric_id` is not registered.
pub fn compute_for_regions<'a>(
    catalog: &MetricCatalog,
    metric_id: &str,
    regions: impl IntoIterator<Item = &'a Region>,
) -> Result<MetricResult, MetricError> {
    let descriptor = catalog.describe(metric_id)?;
    let mut result = MetricResult::default();

    for region in regions {
        let value = numeric(descriptor.extract(region));
        if let Some(v) = value {
            result.domain = Some(result.domain.map_or_else(
                || Domain::new(v, v),
                |d| Domain::new(d.min.min(v), d.max.max(v)),
            ));
        }
        result.values_by_region.insert(region.code.clone(), value);
    }

    log::trace!(
        "Computed {metric_id} for {} regions, domain {:?}",
        result.values_by_region.len(),
        result.domain
    );

    Ok(result)
}

/// Evaluates several metrics over the same region set.
///
/// Results come back in catalog declaration order regardless of the order
/// of `metric_ids`; repeated ids are computed once.
///
/// # Errors
///
/// Returns [`MetricError::NotFound`] for the first unregistered id.
pub fn compute_all<S: AsRef<str>>(
    catalog: &MetricCatalog,
    metric_ids: &[S],
    regions: &[Region],
) -> Result<Vec<(String, MetricResult)>, MetricError> {
    let requested: BTreeSet<&str> = metric_ids.iter().map(AsRef::as_ref).collect();
    for id in &requested {
        catalog.describe(id)?;
    }

    catalog
        .all()
        .iter()
        .filter(|d| requested.contains(d.id.as_str()))
        .map(|d| Ok((d.id.clone(), compute_for_regions(catalog, &d.id, regions)?)))
        .collect()
}
