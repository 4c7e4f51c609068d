use anyhow::{Context, Result};
use clap::Parser;
use snake_arcade::game::GameConfig;
use snake_arcade::modes::HumanMode;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Parser)]
#[command(name = "snake_arcade")]
#[command(version, about = "Single-screen arcade snake in the terminal")]
struct Cli {
    /// JSON file overriding the default game configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for food placement (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file; logging is off otherwise
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Logs go to a file because the terminal belongs to the game screen
fn init_tracing(path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .compact()
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_tracing(path)?;
    }

    let mut config = match &cli.config {
        Some(path) => GameConfig::from_json_file(path)?,
        None => GameConfig::default(),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    config.validate().context("Invalid game configuration")?;

    let mut human_mode = HumanMode::new(config);
    human_mode.run().await?;

    Ok(())
}
