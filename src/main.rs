use anyhow::Result;
use clap::Parser;
use grid_snake::game::{GameConfig, GameEngine};
use grid_snake::logging::init_file_logging;
use grid_snake::modes::HumanMode;
use grid_snake::scores::{DEFAULT_SCORES_FILE, ScoreStore};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake in the terminal with a saved high-score list")]
struct Cli {
    /// Board side length in pixels
    #[arg(long, default_value = "400")]
    board_size: u32,

    /// Tile side length in pixels
    #[arg(long, default_value = "20")]
    grid_size: u32,

    /// Milliseconds between game ticks
    #[arg(long, default_value = "100")]
    tick_ms: u64,

    /// JSON game configuration; replaces the geometry and timing flags
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where saved scores are kept
    #[arg(long, default_value = DEFAULT_SCORES_FILE)]
    scores_file: PathBuf,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log verbosity (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: Level,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_file_logging(path, cli.log_level)?;
    }

    let config = match &cli.config {
        Some(path) => GameConfig::from_file(path)?,
        None => GameConfig {
            tick_interval_ms: cli.tick_ms,
            ..GameConfig::new(cli.board_size, cli.grid_size)
        },
    };
    config.validate()?;

    let engine = match cli.seed {
        Some(seed) => GameEngine::with_seed(config, seed),
        None => GameEngine::new(config),
    };
    let scores = ScoreStore::open(cli.scores_file);

    let mut human_mode = HumanMode::new(engine, scores);
    human_mode.run().await?;

    Ok(())
}
