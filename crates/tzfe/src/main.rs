//! tzfe - headless driver for the 2048 engine
//!
//! Loads a configuration, plays games against the engine with an automatic
//! move picker, and prints the outcome.

#![warn(missing_docs)]

mod cli;
mod config;
mod driver;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use config::DriverConfig;
use driver::run_game;
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Autoplay {
            dimension,
            seed,
            max_moves,
            strategy,
            json,
        } => run_autoplay(
            config.with_overrides(dimension, seed, max_moves, strategy),
            json,
        ),
        Command::Config => print_config(&config),
    }
}

/// Reads the config file if one was given, else uses defaults.
#[instrument]
fn load_config(path: Option<&std::path::Path>) -> Result<DriverConfig> {
    match path {
        Some(path) => DriverConfig::from_file(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => {
            debug!("No config file given, using defaults");
            Ok(DriverConfig::default())
        }
    }
}

/// Plays one game and prints the board or a JSON summary.
#[instrument(skip(config))]
fn run_autoplay(config: DriverConfig, json: bool) -> Result<()> {
    info!(
        dimension = *config.session().dimension(),
        strategy = %config.strategy(),
        "Starting autoplay"
    );

    let (summary, board) = run_game(&config).context("creating game session")?;

    if json {
        let text = serde_json::to_string_pretty(&summary).context("serializing summary")?;
        println!("{}", text);
    } else {
        println!("{}", board);
        let verdict = match (summary.won, summary.finished) {
            (true, _) => "won",
            (false, true) => "no more moves",
            (false, false) => "move limit reached",
        };
        println!(
            "{} after {} requests ({} strategy)",
            verdict,
            summary.requests,
            config.strategy()
        );
        if let Some(score) = summary.personal_best {
            println!("new personal best: {}", score);
        }
    }
    Ok(())
}

/// Prints the effective configuration.
fn print_config(config: &DriverConfig) -> Result<()> {
    let text = config.to_toml().context("rendering config")?;
    print!("{}", text);
    Ok(())
}
