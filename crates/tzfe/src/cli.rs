//! Command-line interface for tzfe.

use crate::driver::Strategy;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// tzfe - headless driver for the 2048 engine
#[derive(Parser, Debug)]
#[command(name = "tzfe")]
#[command(about = "Plays 2048 games against the tzfe engine", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play one game with an automatic move picker and print the result
    Autoplay {
        /// Board edge length (overrides the config file)
        #[arg(short, long)]
        dimension: Option<usize>,

        /// Random seed for the engine and the picker
        #[arg(short, long)]
        seed: Option<u64>,

        /// Stop after this many move requests
        #[arg(long)]
        max_moves: Option<u32>,

        /// How the next move is picked
        #[arg(long, value_enum)]
        strategy: Option<Strategy>,

        /// Print the summary as JSON instead of a board
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration as TOML
    Config,
}
