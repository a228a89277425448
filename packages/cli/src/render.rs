//! Plain-text rendering of explorer output.

use std::collections::BTreeSet;

use console::style;
use regionscope_choropleth::color_for;
use regionscope_explorer::{Explorer, ExplorerError, ExplorerView, MetricComparison};
use regionscope_map_sync::surface::Viewport;
use regionscope_map_sync::{MapSync, MapViewConfig, RecordingSurface};
use regionscope_map_sync_models::SelectionState;
use regionscope_metrics::{MetricCatalog, MetricGroup};
use regionscope_region::{regions_by_group, summarize_selection};
use regionscope_region_models::{CategoryShare, Region};

pub fn print_registry() {
    for (group, codes) in regions_by_group() {
        println!("{} ({})", style(group).bold(), codes.len());
        println!("  {}", codes.join(", "));
    }
}

pub fn print_catalog(catalog: &MetricCatalog) {
    for &group in MetricGroup::all() {
        println!("{}", style(group).bold());
        for descriptor in catalog.in_group(group) {
            println!("  {:<44} {}", descriptor.id, descriptor.label);
        }
    }
}

/// Prints the composite of `selection` the way the dashboard lays it out.
pub fn print_composite(explorer: &Explorer<'_>, selection: &BTreeSet<String>) {
    let codes: Vec<&String> = selection.iter().collect();
    println!("{}", style(summarize_selection(&codes)).bold());

    let Some(composite) = explorer.composite(selection) else {
        println!("No data for the selected regions.");
        return;
    };

    for &group in MetricGroup::all() {
        println!();
        println!("{}", style(group).bold().underlined());
        for descriptor in explorer.catalog().in_group(group) {
            if descriptor.extractor.family().is_some() {
                continue;
            }
            let value = descriptor.extract(&composite);
            println!("  {:<36} {}", descriptor.label, descriptor.format_value(value));
        }
        for (title, shares) in breakdowns(&composite, group) {
            print_breakdown(title, shares);
        }
    }
}

fn breakdowns(region: &Region, group: MetricGroup) -> Vec<(&'static str, &[CategoryShare])> {
    match group {
        MetricGroup::Demographics => vec![
            ("Gender", region.demographics.gender_distribution.as_slice()),
            ("Age", region.demographics.age_distribution.as_slice()),
            ("Race/Ethnicity", region.demographics.race_ethnicity.as_slice()),
        ],
        MetricGroup::EconomicsLabor => vec![
            ("Occupations", region.labor_force.occupation_mix.as_slice()),
            ("Industries", region.employment_by_industry.as_slice()),
        ],
        MetricGroup::HousingCommuting => vec![
            ("Year Built", region.housing.year_structure_built.as_slice()),
            ("Commute Mode", region.commuting.mode_share.as_slice()),
        ],
        MetricGroup::Education => vec![(
            "School Enrollment",
            region.education.school_enrollment.as_slice(),
        )],
    }
}

fn print_breakdown(title: &str, shares: &[CategoryShare]) {
    if shares.is_empty() {
        return;
    }
    println!("  {}", style(title).dim());
    for share in shares {
        println!("    {:<34} {:.1}", share.name, share.value);
    }
}

/// Lists every snapshot region with its value and fill for the active
/// metric.
///
/// # Errors
///
/// Returns [`ExplorerError::Metric`] if the active metric is unknown.
pub fn print_choropleth(
    explorer: &Explorer<'_>,
    state: &SelectionState,
    config: &MapViewConfig,
) -> Result<(), ExplorerError> {
    let inputs = explorer.map_inputs(state, ExplorerView::Compare)?;
    let Some(metric_id) = inputs.active_metric.as_deref() else {
        return Ok(());
    };
    let descriptor = explorer.catalog().describe(metric_id)?;

    println!("{}", style(&descriptor.label).bold());
    if let Some(domain) = inputs.domain {
        println!(
            "  range {} .. {}",
            descriptor.format_value(Some(domain.min)),
            descriptor.format_value(Some(domain.max))
        );
    }

    for region in explorer.snapshot().regions() {
        let value = inputs.values.get(&region.code).copied().flatten();
        let class = color_for(value, inputs.domain);
        let marker = if inputs.selection.contains(&region.code) {
            "*"
        } else {
            " "
        };
        println!(
            "{marker} {:<7} {:<16} {:>14}  {:<9} {}",
            region.code,
            region.group,
            descriptor.format_value(value),
            config.palette.color(class),
            class
        );
    }
    Ok(())
}

/// Prints what the map layer was asked to draw, bottom to top.
pub fn print_map(sync: &MapSync, surface: &RecordingSurface) {
    match surface.viewport() {
        Some(Viewport::Fit { bounds, padding }) => println!(
            "Viewport: fit [{:.4}, {:.4}] .. [{:.4}, {:.4}] padding {}x{}",
            bounds.min().x,
            bounds.min().y,
            bounds.max().x,
            bounds.max().y,
            padding[0],
            padding[1]
        ),
        Some(Viewport::View { center, zoom }) => {
            println!("Viewport: center {:.4}, {:.4} zoom {zoom}", center.lat, center.lon);
        }
        None => {}
    }

    for &id in surface.z_order() {
        let Some(feature) = sync.feature(id) else {
            continue;
        };
        let label = feature
            .tooltip()
            .unwrap_or_else(|| "(no region code)".to_string());
        let Some(feature_style) = surface.style(id) else {
            println!("{:>4} {label}", id.0);
            continue;
        };
        println!(
            "{:>4} {:<28} fill {:<9} stroke {:<9} weight {}",
            id.0, label, feature_style.fill_color, feature_style.color, feature_style.weight
        );
    }
}

pub fn print_comparison(charts: &[MetricComparison]) {
    for chart in charts {
        println!("{}", style(&chart.label).bold());
        for entry in &chart.entries {
            println!("  {:<24} {:>14}  {}", entry.name, entry.formatted, entry.class);
        }
        println!();
    }
}
