// Copyright (c) 2024 Botho Foundation

use airdrop_draw::{Algorithm, CalculationOptions};
use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration for airdrop draws
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub draw: DrawConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawConfig {
    /// Algorithms to run, in order. Repeats are run again.
    #[serde(default = "default_distributions")]
    pub distributions: Vec<String>,

    /// Drop tickets already drawn by this or an earlier algorithm
    #[serde(default)]
    pub deduplicate: bool,

    /// Wrap tickets above the leaderboard's last bound back into range
    #[serde(default)]
    pub always_winning: bool,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            distributions: default_distributions(),
            deduplicate: false,
            always_winning: false,
        }
    }
}

impl DrawConfig {
    pub fn options(&self) -> CalculationOptions {
        CalculationOptions {
            deduplicate: self.deduplicate,
            always_winning: self.always_winning,
        }
    }
}

fn default_distributions() -> Vec<String> {
    Algorithm::ALL.iter().map(|a| a.name().to_string()).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Pretty-print JSON output
    #[serde(default = "default_pretty")]
    pub pretty: bool,

    /// Asset precision used to display leaderboard amounts
    #[serde(default = "default_precision")]
    pub precision: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: default_pretty(),
            precision: default_precision(),
        }
    }
}

fn default_pretty() -> bool {
    true
}

fn default_precision() -> u32 {
    5
}

impl Config {
    /// Load config from a file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Load config from a file, or fall back to defaults if there is none
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if Self::exists(path) {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }

    /// Check if config file exists
    pub fn exists(path: &Path) -> bool {
        path.exists()
    }
}

/// Get the default data directory path
pub fn default_data_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(".airdrop"))
        .ok_or_else(|| anyhow!("Could not determine home directory"))
}

/// Get the default config file path
pub fn default_config_path() -> Result<PathBuf> {
    Ok(default_data_dir()?.join("config.toml"))
}

/// Parse a Yes/No flag as used by the leaderboard tooling.
///
/// Accepts `yes`/`no`, `true`/`false` and `1`/`0`, case-insensitive.
pub fn parse_yes_no(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" | "1" => Ok(true),
        "no" | "n" | "false" | "0" => Ok(false),
        other => bail!("Expected Yes or No, got {other:?}"),
    }
}
