// Copyright (c) 2024 Botho Foundation

//! CLI command implementations.
//!
//! These modules implement the user-facing CLI commands and legitimately
//! use stdout for output.

#![allow(clippy::print_stdout)]

pub mod algorithms;
pub mod calculate;
pub mod init;
pub mod leaderboard;
pub mod tickets;

use airdrop_draw::Leaderboard;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Read and validate a leaderboard JSON file
pub fn read_leaderboard(path: &Path) -> Result<Leaderboard> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read leaderboard from {}", path.display()))?;

    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse leaderboard from {}", path.display()))
}

/// Render `value` as JSON, to `output` if given, otherwise to stdout
pub fn emit_json<T: Serialize>(value: &T, pretty: bool, output: Option<&Path>) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("Failed to serialize output")?;

    match output {
        Some(path) => fs::write(path, json + "\n")
            .with_context(|| format!("Failed to write output to {}", path.display())),
        None => {
            println!("{json}");
            Ok(())
        }
    }
}
