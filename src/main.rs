use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use grid_pursuit::game::{Cadence, GameConfig};
use grid_pursuit::modes::HumanMode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grid-pursuit")]
#[command(version, about = "Collect every item on the map before the cop catches you")]
struct Cli {
    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Layout file (overrides the config's map)
    #[arg(long)]
    map: Option<PathBuf>,

    /// Tick length in milliseconds
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Pursuer cadence as <moves>/<window>, e.g. 2/3
    #[arg(long)]
    cadence: Option<Cadence>,

    /// Write logs here; the terminal itself is taken by the game
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(map) = &self.map {
            config.map = Some(map.clone());
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_ms = tick_ms;
        }
        if let Some(cadence) = self.cadence {
            config.cadence = cadence;
        }

        config.validate()?;
        Ok(config)
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = cli.game_config()?;
    let layout = config.layout()?;

    tracing::info!(
        tick_ms = config.tick_ms,
        cadence = %config.cadence,
        map = ?config.map,
        "configuration loaded"
    );

    let mut human_mode = HumanMode::new(config, layout);
    human_mode.run().await?;

    Ok(())
}
