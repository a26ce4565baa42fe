//! Fanorona CLI - Command-line interface
//!
//! Commands:
//! - show: Render a position
//! - moves: List legal moves for a position
//! - play: Interactive game on stdin
//! - selfplay: Seeded random self-play for exercising the engine

mod inspect_cmd;
mod play_cmd;
mod selfplay_cmd;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use fanorona_core::{Game, RulesConfig};

#[derive(Parser)]
#[command(name = "fanorona")]
#[command(about = "Fanorona rules engine")]
struct Cli {
    /// Rules config JSON file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Random seed for self-play
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a position
    Show(inspect_cmd::ShowArgs),
    /// List legal moves for a position
    Moves(inspect_cmd::MovesArgs),
    /// Play interactively, reading moves from stdin
    Play(play_cmd::PlayArgs),
    /// Play random games and report results
    Selfplay(selfplay_cmd::SelfPlayArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Show(args) => inspect_cmd::show(args, config),
        Commands::Moves(args) => inspect_cmd::moves(args, config),
        Commands::Play(args) => play_cmd::run(args, config),
        Commands::Selfplay(args) => selfplay_cmd::run(args, config, cli.seed),
    }
}

/// Rules from `--config`, or the defaults
fn load_config(path: Option<&std::path::Path>) -> Result<RulesConfig> {
    match path {
        Some(path) => {
            let config = RulesConfig::load(path)?;
            tracing::debug!("Loaded rules from {}: {:?}", path.display(), config);
            Ok(config)
        }
        None => Ok(RulesConfig::default()),
    }
}

/// Game from a position string, or the opening
pub(crate) fn load_game(position: Option<&str>, config: RulesConfig) -> Result<Game> {
    match position {
        Some(text) => Game::parse_position(text, config)
            .with_context(|| format!("Failed to parse position: {text}")),
        None => Ok(Game::with_config(config)),
    }
}
