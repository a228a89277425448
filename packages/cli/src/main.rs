#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the regional statistics explorer.
//!
//! Every subcommand runs one full recomputation cycle over a region
//! snapshot: select regions, combine them, compute metric domains, and
//! color the map. Without a subcommand the interactive menu starts.

mod interactive;
mod render;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use regionscope_explorer::{Explorer, ExplorerView};
use regionscope_map_sync::{MapSync, MapViewConfig, RecordingSurface, parse_features};
use regionscope_map_sync_models::SelectionState;
use regionscope_metrics::MetricCatalog;
use regionscope_region::Snapshot;

#[derive(Parser)]
#[command(name = "regionscope", about = "Regional statistics explorer")]
struct Cli {
    /// Region snapshot JSON file
    #[arg(long, env = "REGIONSCOPE_DATA", global = true)]
    data: Option<PathBuf>,
    /// Map view configuration TOML (defaults to the built-in configuration)
    #[arg(long, global = true)]
    map_config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the selectable regions by group
    Regions,
    /// List available metrics by group
    Metrics,
    /// Combine regions into one composite and print its statistics
    Combine {
        /// Comma-separated region codes (e.g., "85301,85302")
        #[arg(long, value_delimiter = ',', required = true)]
        regions: Vec<String>,
    },
    /// Color regions by a metric
    Choropleth {
        /// Metric id (e.g., "`median_household_income`")
        #[arg(long)]
        metric: String,
        /// `GeoJSON` boundaries to style. Without it, regions are listed
        /// from the snapshot.
        #[arg(long)]
        geojson: Option<PathBuf>,
        /// Comma-separated region codes to mark as selected
        #[arg(long, value_delimiter = ',')]
        regions: Vec<String>,
    },
    /// Compare regions across metrics
    Compare {
        /// Comma-separated metric ids
        #[arg(long, value_delimiter = ',', required = true)]
        metrics: Vec<String>,
        /// Comma-separated region codes. Compares every region if omitted.
        #[arg(long, value_delimiter = ',')]
        regions: Vec<String>,
    },
    /// Pick regions and a metric from menus
    Interactive,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let command = cli.command.unwrap_or(Commands::Interactive);
    match command {
        Commands::Regions => render::print_registry(),
        Commands::Metrics => render::print_catalog(MetricCatalog::global()),
        Commands::Combine { regions } => {
            let explorer = Explorer::new(load_snapshot(cli.data.as_deref())?);
            let selection: BTreeSet<String> = regions.into_iter().collect();
            render::print_composite(&explorer, &selection);
        }
        Commands::Choropleth {
            metric,
            geojson,
            regions,
        } => {
            let explorer = Explorer::new(load_snapshot(cli.data.as_deref())?);
            let config = load_map_config(cli.map_config.as_deref())?;

            let mut state = SelectionState::new();
            state.set_selected(regions);
            state.set_metric_ids(vec![metric]);

            match geojson {
                Some(path) => {
                    let features = parse_features(&std::fs::read_to_string(&path)?, &config)?;
                    log::info!("Loaded {} features from {}", features.len(), path.display());
                    let mut sync = MapSync::new(features, config);
                    let mut surface = RecordingSurface::with_features(sync.features().len());
                    sync.initial_view(&mut surface);
                    sync.apply_inputs(
                        explorer.map_inputs(&state, ExplorerView::Compare)?,
                        &mut surface,
                    );
                    render::print_map(&sync, &surface);
                }
                None => render::print_choropleth(&explorer, &state, &config)?,
            }
        }
        Commands::Compare { metrics, regions } => {
            let explorer = Explorer::new(load_snapshot(cli.data.as_deref())?);
            let mut state = SelectionState::new();
            state.set_selected(regions);
            state.set_metric_ids(metrics);
            render::print_comparison(&explorer.comparison(&state)?);
        }
        Commands::Interactive => {
            let explorer = Explorer::new(load_snapshot(cli.data.as_deref())?);
            let config = load_map_config(cli.map_config.as_deref())?;
            interactive::run(&explorer, &config)?;
        }
    }

    Ok(())
}

fn load_snapshot(path: Option<&Path>) -> Result<Snapshot, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Err("no region data: pass --data <file> or set REGIONSCOPE_DATA".into());
    };
    Ok(Snapshot::load(path)?)
}

fn load_map_config(path: Option<&Path>) -> Result<MapViewConfig, Box<dyn std::error::Error>> {
    Ok(match path {
        Some(path) => MapViewConfig::load(path)?,
        None => MapViewConfig::default(),
    })
}
