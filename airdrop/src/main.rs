// Copyright (c) 2024 Botho Foundation

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use airdrop::commands::{self, calculate::CalculateArgs};
use airdrop::config;

#[derive(Parser)]
#[command(name = "airdrop")]
#[command(about = "Auditable airdrop ticket draws from blockchain signatures", long_about = None)]
struct Cli {
    /// Path to config file (default: ~/.airdrop/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config file
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },

    /// List the available ticket algorithms
    Algorithms,

    /// Print the raw tickets one algorithm draws from a signature
    Tickets {
        /// Signature digits
        #[arg(short, long)]
        signature: String,

        /// Algorithm name
        #[arg(short, long)]
        algo: String,

        /// Print compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Draw tickets and tally the winners against a leaderboard
    Calculate {
        /// Signature digits
        #[arg(short, long)]
        signature: String,

        /// Leaderboard JSON file
        #[arg(short, long)]
        leaderboard: PathBuf,

        /// Algorithm to run; repeat for several (default: from config)
        #[arg(short, long = "algo")]
        algos: Vec<String>,

        /// Drop repeated tickets (Yes/No)
        #[arg(long)]
        deduplicate: Option<String>,

        /// Wrap tickets into the leaderboard range (Yes/No)
        #[arg(long)]
        always_winning: Option<String>,

        /// Write JSON to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate and display a leaderboard
    Leaderboard {
        /// Leaderboard JSON file
        #[arg(short, long)]
        leaderboard: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config_path = match cli.config {
        Some(path) => path,
        None => config::default_config_path()?,
    };

    match cli.command {
        Commands::Init { force } => commands::init::run(&config_path, force),
        Commands::Algorithms => commands::algorithms::run(),
        Commands::Tickets {
            signature,
            algo,
            compact,
        } => commands::tickets::run(&signature, &algo, !compact),
        Commands::Calculate {
            signature,
            leaderboard,
            algos,
            deduplicate,
            always_winning,
            output,
        } => commands::calculate::run(
            &config_path,
            CalculateArgs {
                signature,
                leaderboard,
                algorithms: algos,
                deduplicate,
                always_winning,
                output,
            },
        ),
        Commands::Leaderboard { leaderboard } => {
            commands::leaderboard::run(&config_path, &leaderboard)
        }
    }
}
