//! mapmark-validate - Offline checks for mapmark data files.
//!
//! Validates the mob location dataset, exercises the coordinate transform and
//! title parsing, and replays a captured client snapshot through the engine.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use clap::{Parser, Subcommand};
use mapmark_core::config::{default_config_path, load_config, load_config_from};
use mapmark_core::gathering::GatheringPointTable;
use mapmark_core::hunt::{MobLocationDataset, default_data_dir, load_dataset, locate_dataset};
use mapmark_core::{
    MapMetadata, MapPoint, Marker, MarkerEngine, MarkerList, OverlayKind, RefreshOutcome,
    SnapshotData, TriggerContext, ViewEvent, extract_sub_area, map_to_world, world_to_map,
};
use mapmark_types::RuleConfiguration;
use serde::Serialize;
use tracing_subscriber::filter::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Validate mapmark data and replay snapshots")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and validate a mob location dataset (file or install directory)
    Dataset { path: PathBuf },
    /// Print the sub-area label of a map title
    Title { text: String },
    /// Convert world x/z to map coordinates
    WorldToMap {
        #[arg(allow_negative_numbers = true)]
        x: f32,
        #[arg(allow_negative_numbers = true)]
        z: f32,
        #[command(flatten)]
        map: MapArgs,
    },
    /// Convert map coordinates to a world position
    MapToWorld {
        #[arg(allow_negative_numbers = true)]
        x: f32,
        #[arg(allow_negative_numbers = true)]
        y: f32,
        #[command(flatten)]
        map: MapArgs,
    },
    /// Run one trigger of each overlay against a captured snapshot
    Replay {
        #[arg(short, long)]
        snapshot: PathBuf,
        /// Mob location dataset; defaults to the install data directory
        #[arg(short, long)]
        dataset: Option<PathBuf>,
        /// Gathering point sheet export
        #[arg(short, long)]
        gathering: Option<PathBuf>,
        /// Configuration file; defaults to the platform config location
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print the effective configuration
    Config {
        /// Print the config file location instead
        #[arg(long)]
        path: bool,
    },
}

#[derive(clap::Args)]
struct MapArgs {
    #[arg(long, default_value_t = 100)]
    size_factor: u16,
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    offset_x: i16,
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    offset_y: i16,
}

impl MapArgs {
    fn metadata(&self) -> MapMetadata {
        MapMetadata::new(self.size_factor, self.offset_x, self.offset_y)
    }
}

#[derive(Serialize)]
struct ReplayReport {
    overlay: OverlayKind,
    outcome: String,
    markers: Vec<Marker>,
}

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    // If MAPMARK_LOG_PATH is set, append to that file
    if let Ok(path) = std::env::var("MAPMARK_LOG_PATH") {
        if let Ok(file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
        {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_ansi(false)
                .with_writer(file)
                .init();
            return;
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_logging();

    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Validation failed");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<(), String> {
    match command {
        Commands::Dataset { path } => check_dataset(&path),
        Commands::Title { text } => {
            match extract_sub_area(&text) {
                Some(label) => println!("{label:?}"),
                None => println!("(no sub-area)"),
            }
            Ok(())
        }
        Commands::WorldToMap { x, z, map } => {
            let point = world_to_map(x, z, &map.metadata()).map_err(|e| e.to_string())?;
            println!("{:.3} {:.3}", point.x, point.y);
            Ok(())
        }
        Commands::MapToWorld { x, y, map } => {
            let pos = map_to_world(MapPoint::new(x, y), &map.metadata()).map_err(|e| e.to_string())?;
            println!("{:.3} {:.3} {:.3}", pos.x, pos.y, pos.z);
            Ok(())
        }
        Commands::Replay {
            snapshot,
            dataset,
            gathering,
            config,
        } => replay(&snapshot, dataset.as_deref(), gathering.as_deref(), config.as_deref()),
        Commands::Config { path } => show_config(path),
    }
}

fn check_dataset(path: &Path) -> Result<(), String> {
    let file = if path.is_dir() {
        locate_dataset(path).map_err(|e| e.to_string())?
    } else {
        path.to_path_buf()
    };
    let dataset = MobLocationDataset::load(&file).map_err(|e| e.to_string())?;

    println!("{}", file.display());
    println!("  version:     {}", dataset.version);
    println!("  territories: {}", dataset.territories().len());
    println!("  mobs:        {}", dataset.mob_count());
    println!("  locations:   {}", dataset.location_count());
    Ok(())
}

fn replay(
    snapshot: &Path,
    dataset: Option<&Path>,
    gathering: Option<&Path>,
    config: Option<&Path>,
) -> Result<(), String> {
    let contents = std::fs::read_to_string(snapshot)
        .map_err(|e| format!("failed to read {}: {e}", snapshot.display()))?;
    let game: SnapshotData = serde_json::from_str(&contents)
        .map_err(|e| format!("invalid snapshot {}: {e}", snapshot.display()))?;

    let mob_locations = match dataset {
        Some(path) => Some(MobLocationDataset::load(path).map_err(|e| e.to_string())?),
        None => default_data_dir().and_then(|dir| load_dataset(&dir)),
    };
    let gathering_points = gathering
        .map(GatheringPointTable::load)
        .transpose()
        .map_err(|e| e.to_string())?;
    let config: RuleConfiguration = match config {
        Some(path) => load_config_from(path).map_err(|e| e.to_string())?,
        None => load_config(),
    };

    let mut engine = MarkerEngine::new(gathering_points.map(Arc::new), mob_locations.map(Arc::new));
    let ctx = TriggerContext::new(Instant::now(), &game, &config);

    let reports: Vec<ReplayReport> = OverlayKind::ALL
        .into_iter()
        .map(|overlay| {
            let mut sink = MarkerList::new();
            let outcome = engine.trigger(overlay, ViewEvent::PostSetup, &ctx, &mut sink);
            ReplayReport {
                overlay,
                outcome: describe(&outcome),
                markers: sink.markers().to_vec(),
            }
        })
        .collect();

    let json = serde_json::to_string_pretty(&reports).map_err(|e| e.to_string())?;
    println!("{json}");
    Ok(())
}

fn describe(outcome: &RefreshOutcome) -> String {
    match outcome {
        RefreshOutcome::Disabled => "disabled".to_string(),
        RefreshOutcome::Reset => "reset".to_string(),
        RefreshOutcome::Throttled => "throttled".to_string(),
        RefreshOutcome::Aborted(e) => format!("aborted: {e}"),
        RefreshOutcome::Unchanged => "unchanged".to_string(),
        RefreshOutcome::Emitted(count) => format!("emitted {count}"),
    }
}

fn show_config(path_only: bool) -> Result<(), String> {
    if path_only {
        let path = default_config_path().map_err(|e| e.to_string())?;
        println!("{}", path.display());
        return Ok(());
    }

    let config = load_config();
    let toml = toml::to_string_pretty(&config).map_err(|e| e.to_string())?;
    print!("{toml}");
    Ok(())
}
