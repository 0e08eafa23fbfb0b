// Copyright (c) 2024 Botho Foundation

use anyhow::{bail, Result};
use std::path::Path;
use tracing::info;

use crate::config::Config;

/// Run the init command
pub fn run(config_path: &Path, force: bool) -> Result<()> {
    if Config::exists(config_path) && !force {
        bail!(
            "Config already exists at {}\nUse --force to overwrite it or a different --config path.",
            config_path.display()
        );
    }

    Config::default().save(config_path)?;

    info!("Config initialized at {}", config_path.display());
    println!("Config saved to: {}", config_path.display());
    println!("\nNext steps:");
    println!("  1. Edit [draw] distributions to choose algorithms");
    println!("  2. Run 'airdrop calculate --signature <digits> --leaderboard <file>'");

    Ok(())
}
