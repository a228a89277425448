//! Interactive menus for exploring a region snapshot.
//!
//! Holds one [`SelectionState`] for the session, the way a map host would,
//! and recomputes everything from it after each change.

use dialoguer::{MultiSelect, Select};
use regionscope_explorer::Explorer;
use regionscope_map_sync::MapViewConfig;
use regionscope_map_sync_models::SelectionState;
use regionscope_metrics::summarize_metrics;
use regionscope_region::{all_regions, summarize_selection};

use crate::render;

/// Runs the interactive menu loop until the user exits.
///
/// # Errors
///
/// Returns an error if a prompt fails or a metric lookup fails.
pub fn run(
    explorer: &Explorer<'_>,
    config: &MapViewConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut state = SelectionState::new();

    loop {
        let selected: Vec<&String> = state.selected().iter().collect();
        println!();
        println!("Regions: {}", summarize_selection(&selected));
        println!(
            "Metrics: {}",
            summarize_metrics(state.metric_ids(), explorer.catalog())
        );
        if let Some(active) = state.active_metric() {
            println!("Map colored by: {active}");
        }

        let items = &[
            "Pick regions",
            "Pick metrics to compare",
            "Choose map metric",
            "Show composite",
            "Compare regions",
            "Show choropleth",
            "Clear selection",
            "Exit",
        ];

        let choice = Select::new()
            .with_prompt("Region explorer")
            .items(items)
            .default(0)
            .interact()?;

        match choice {
            0 => pick_regions(&mut state)?,
            1 => pick_metrics(explorer, &mut state)?,
            2 => pick_active_metric(explorer, &mut state)?,
            3 => render::print_composite(explorer, state.selected()),
            4 => render::print_comparison(&explorer.comparison(&state)?),
            5 => {
                if state.active_metric().is_none() {
                    println!("Pick metrics to compare first.");
                } else {
                    render::print_choropleth(explorer, &state, config)?;
                }
            }
            6 => {
                state.clear();
                log::debug!("Selection cleared");
            }
            7 => {
                println!("Goodbye.");
                return Ok(());
            }
            _ => unreachable!(),
        }
    }
}

fn pick_regions(state: &mut SelectionState) -> Result<(), Box<dyn std::error::Error>> {
    let regions = all_regions();
    let labels: Vec<String> = regions
        .iter()
        .map(|r| format!("{} ({})", r.code, r.group))
        .collect();
    let defaults: Vec<bool> = regions.iter().map(|r| state.is_selected(&r.code)).collect();

    let picked = MultiSelect::new()
        .with_prompt("Regions (space=toggle, a=all, enter=confirm)")
        .items(&labels)
        .defaults(&defaults)
        .max_length(20)
        .interact()?;

    state.set_selected(picked.into_iter().map(|i| regions[i].code.clone()));
    Ok(())
}

fn pick_metrics(
    explorer: &Explorer<'_>,
    state: &mut SelectionState,
) -> Result<(), Box<dyn std::error::Error>> {
    let descriptors = explorer.catalog().all();
    let labels: Vec<String> = descriptors
        .iter()
        .map(|d| format!("{} ({})", d.label, d.group))
        .collect();
    let defaults: Vec<bool> = descriptors
        .iter()
        .map(|d| state.metric_ids().contains(&d.id))
        .collect();

    let picked = MultiSelect::new()
        .with_prompt("Metrics (space=toggle, a=all, enter=confirm)")
        .items(&labels)
        .defaults(&defaults)
        .max_length(20)
        .interact()?;

    state.set_metric_ids(picked.into_iter().map(|i| descriptors[i].id.clone()).collect());
    Ok(())
}

fn pick_active_metric(
    explorer: &Explorer<'_>,
    state: &mut SelectionState,
) -> Result<(), Box<dyn std::error::Error>> {
    let ids = state.metric_ids().to_vec();
    if ids.is_empty() {
        println!("Pick metrics to compare first.");
        return Ok(());
    }

    let labels: Vec<&str> = ids
        .iter()
        .map(|id| {
            explorer
                .catalog()
                .get(id)
                .map_or(id.as_str(), |d| d.label.as_str())
        })
        .collect();
    let current = state
        .active_metric()
        .and_then(|active| ids.iter().position(|id| id == active))
        .unwrap_or(0);

    let choice = Select::new()
        .with_prompt("Color the map by")
        .items(&labels)
        .default(current)
        .interact()?;

    state.set_active_metric(&ids[choice]);
    Ok(())
}
