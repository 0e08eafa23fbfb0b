// Copyright (c) 2024 Botho Foundation

use anyhow::Result;
use std::path::Path;

use super::read_leaderboard;
use crate::config::Config;

/// Validate a leaderboard file and print it as a table
pub fn run(config_path: &Path, leaderboard_path: &Path) -> Result<()> {
    let config = Config::load_or_default(config_path)?;
    let leaderboard = read_leaderboard(leaderboard_path)?;
    let precision = config.output.precision as usize;

    println!(
        "{:<14} {:>20} {:>8} {:>10} {:>12} {:>12}",
        "User ID", "Boosted Amount", "Tickets", "Percent", "Ticket from", "Ticket to"
    );
    for entry in leaderboard.entries() {
        println!(
            "{:<14} {:>20.precision$} {:>8} {:>10.5} {:>12} {:>12}",
            entry.id,
            entry.display_amount(config.output.precision),
            entry.tickets.len(),
            entry.percent,
            entry.range.from,
            entry.range.to,
        );
    }
    println!();
    println!(
        "{} entries, last ticket {}",
        leaderboard.len(),
        leaderboard.last_bound()
    );

    Ok(())
}
