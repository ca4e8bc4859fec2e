use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::watch;
use wl_sens::config::AppConfig;
use wl_sens::core::{FileCoordinator, UpdateManager};
use wl_sens_core::{activate, Registry, Sensor, SharedCoordinator};

/// wl-sens - Capability-gated sensors for WeatherLink stations
#[derive(Parser, Debug)]
#[command(name = "wl-sens")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Debug verbosity level (0=quiet, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0", global = true)]
    debug: u8,

    /// Config file to use instead of the default location
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every registered sensor and its requirements
    List,
    /// Read a snapshot once and print the active sensors
    Show {
        /// Snapshot file (defaults to the configured one)
        #[arg(value_name = "SNAPSHOT")]
        snapshot: Option<PathBuf>,
        /// Print readings as JSON
        #[arg(long)]
        json: bool,
    },
    /// Re-read the snapshot on every poll interval until interrupted
    Watch {
        /// Snapshot file (defaults to the configured one)
        #[arg(value_name = "SNAPSHOT")]
        snapshot: Option<PathBuf>,
        /// Print readings as JSON lines
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Level 0 (default): warn only
    // Level 1: info
    // Level 2: debug
    // Level 3+: trace
    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Allow RUST_LOG to override CLI setting
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    info!("Starting wl-sens v{}", env!("CARGO_PKG_VERSION"));

    let config = match &cli.config {
        Some(path) => AppConfig::load_from_path(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AppConfig::load().unwrap_or_else(|e| {
            warn!("Failed to load config, using defaults: {:#}", e);
            AppConfig::default()
        }),
    };

    let registry = wl_sens_sensors::builtin_registry()?;

    match cli.command {
        Command::List => list_sensors(registry),
        Command::Show { snapshot, json } => {
            let coordinator = open_coordinator(&config, snapshot)?;
            coordinator.refresh()?;
            let shared: SharedCoordinator = coordinator;
            print_readings(&activate(registry, &shared), json)
        }
        Command::Watch { snapshot, json } => watch_sensors(registry, &config, snapshot, json).await,
    }
}

fn open_coordinator(config: &AppConfig, snapshot: Option<PathBuf>) -> Result<Arc<FileCoordinator>> {
    let path = snapshot
        .or_else(|| config.station.snapshot_path.clone())
        .context("No snapshot file given and none configured")?;
    Ok(Arc::new(FileCoordinator::new(path, &config.station)))
}

fn list_sensors(registry: &Registry) -> Result<()> {
    for descriptor in registry.descriptors() {
        println!(
            "{:<28} {:<24} {}",
            descriptor.key(),
            descriptor.name(),
            descriptor.requirements()
        );
    }
    Ok(())
}

fn print_readings(sensors: &[Sensor], json: bool) -> Result<()> {
    let readings: Vec<_> = sensors.iter().map(Sensor::read).collect();

    if json {
        println!("{}", serde_json::to_string(&readings)?);
        return Ok(());
    }

    for reading in &readings {
        let value = match (&reading.value, reading.available) {
            (_, false) => "unavailable".to_string(),
            (Some(value), true) => value.to_string(),
            (None, true) => "-".to_string(),
        };
        println!(
            "{:<40} {} {}",
            reading.name,
            value,
            reading.unit.unwrap_or("")
        );
    }
    Ok(())
}

async fn watch_sensors(
    registry: &Registry,
    config: &AppConfig,
    snapshot: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let coordinator = open_coordinator(config, snapshot)?;
    // Sensors are gated on the first snapshot only
    coordinator.refresh()?;
    let shared: SharedCoordinator = coordinator.clone();
    let sensors = activate(registry, &shared);

    let manager = UpdateManager::new(coordinator, config.station.poll_interval());
    info!("Watching with a {:?} interval", manager.interval());

    let (tx, rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = tx.send(true);
        }
    });

    let refreshes = manager
        .run(rx, || {
            if let Err(e) = print_readings(&sensors, json) {
                warn!("Failed to print readings: {}", e);
            }
        })
        .await;

    info!("Stopped after {} refreshes", refreshes);
    Ok(())
}
