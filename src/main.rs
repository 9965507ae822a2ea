use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use grid_snake::clock::FrameClock;
use grid_snake::term::{Keyboard, TermManager};
use grid_snake::{GameConfig, SnakeGame};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grid-snake")]
#[command(version, about = "Classic snake on a fixed grid, in the terminal")]
struct Cli {
    /// Seed for food placement (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file; the terminal itself is taken by the game
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = GameConfig::default();
    let mut game = SnakeGame::with_seed(config, cli.seed).context("failed to set up the game")?;

    let mut term = TermManager::new(game.grid()).context("failed to open the terminal")?;
    term.setup()?;

    let mut clock = FrameClock::new(game.config().frame_duration());
    let outcome = game.run(&mut term, &mut Keyboard, &mut clock);

    // The score goes to the normal screen, not the alternate one
    term.restore()?;

    if let Some(summary) = outcome?.summary() {
        println!("{}", summary);
    }

    Ok(())
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("failed to create log file {}", path.display()))?;
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
