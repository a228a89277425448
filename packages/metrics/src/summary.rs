//! Human-readable summaries of a metric selection.

use std::collections::BTreeSet;

use regionscope_metrics_models::MetricGroup;

use crate::catalog::{MetricCatalog, MetricDescriptor};
use crate::extract::INDUSTRY_FAMILY;

/// Summarizes which metrics are selected, collapsing whole groups.
///
/// Groups appear in fixed display order and are joined with `"; "`. A
/// fully selected group renders as `"All <group>"`; the industry family
/// inside Economics & Labor collapses to `"All Industries"` or to the
/// bare industry names.
#[must_use]
pub fn summarize_metrics<S: AsRef<str>>(selected: &[S], catalog: &MetricCatalog) -> String {
    let selected: BTreeSet<&str> = selected
        .iter()
        .map(AsRef::as_ref)
        .filter(|id| catalog.contains(id))
        .collect();

    if selected.is_empty() {
        return "Select data metrics".to_string();
    }
    if selected.len() == catalog.len() {
        return "All Metrics".to_string();
    }

    let mut parts = Vec::new();

    for &group in MetricGroup::all() {
        let in_group: Vec<&MetricDescriptor> = catalog.in_group(group).collect();
        let chosen: Vec<&MetricDescriptor> = in_group
            .iter()
            .copied()
            .filter(|d| selected.contains(d.id.as_str()))
            .collect();

        if chosen.is_empty() {
            continue;
        }
        if chosen.len() == in_group.len() {
            parts.push(format!("All {group}"));
            continue;
        }

        if group == MetricGroup::EconomicsLabor {
            parts.push(summarize_with_industries(&in_group, &chosen));
        } else {
            parts.push(
                chosen
                    .iter()
                    .map(|d| d.label.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            );
        }
    }

    parts.join("; ")
}

fn is_industry(descriptor: &MetricDescriptor) -> bool {
    descriptor
        .extractor
        .family()
        .is_some_and(|(family, _)| family == INDUSTRY_FAMILY)
}

fn summarize_with_industries(
    in_group: &[&MetricDescriptor],
    chosen: &[&MetricDescriptor],
) -> String {
    let total_industries = in_group.iter().filter(|d| is_industry(d)).count();
    let (industries, others): (Vec<&MetricDescriptor>, Vec<&MetricDescriptor>) =
        chosen.iter().copied().partition(|d| is_industry(d));

    let mut sub_parts: Vec<String> = others.iter().map(|d| d.label.clone()).collect();

    if !industries.is_empty() {
        if industries.len() == total_industries {
            sub_parts.push("All Industries".to_string());
        } else {
            sub_parts.extend(
                industries
                    .iter()
                    .filter_map(|d| d.extractor.family().map(|(_, name)| name.to_string())),
            );
        }
    }

    sub_parts.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{INDUSTRIES, family_metric_id};

    fn catalog() -> &'static MetricCatalog {
        MetricCatalog::global()
    }

    #[test]
    fn empty_selection() {
        assert_eq!(
            summarize_metrics::<&str>(&[], catalog()),
            "Select data metrics"
        );
    }

    #[test]
    fn everything_selected() {
        let all: Vec<String> = catalog().all().iter().map(|d| d.id.clone()).collect();
        assert_eq!(summarize_metrics(&all, catalog()), "All Metrics");
    }

    #[test]
    fn whole_group_collapses() {
        let demographics: Vec<String> = catalog()
            .in_group(MetricGroup::Demographics)
            .map(|d| d.id.clone())
            .collect();
        let mut selected = demographics;
        selected.push("median_home_value".to_string());

        assert_eq!(
            summarize_metrics(&selected, catalog()),
            "All Demographics; Median Home Value"
        );
    }

    #[test]
    fn industries_collapse_within_economics() {
        let mut selected: Vec<String> = INDUSTRIES
            .iter()
            .map(|i| family_metric_id(INDUSTRY_FAMILY, i))
            .collect();
        selected.push("poverty_rate".to_string());

        assert_eq!(
            summarize_metrics(&selected, catalog()),
            "Poverty Rate (%), All Industries"
        );
    }

    #[test]
    fn partial_industries_use_short_names() {
        let selected = vec![
            family_metric_id(INDUSTRY_FAMILY, "Construction"),
            family_metric_id(INDUSTRY_FAMILY, "Information"),
        ];

        assert_eq!(
            summarize_metrics(&selected, catalog()),
            "Construction, Information"
        );
    }

    #[test]
    fn unknown_ids_are_ignored() {
        assert_eq!(
            summarize_metrics(&["bogus", "median_age"], catalog()),
            "Median Age"
        );
    }
}
