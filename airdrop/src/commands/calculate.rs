// Copyright (c) 2024 Botho Foundation

use airdrop_draw::{execute_calculation, Signature, Summary};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::{emit_json, read_leaderboard};
use crate::config::{parse_yes_no, Config};

/// Arguments for the calculate command; unset values come from config
#[derive(Debug, Clone, Default)]
pub struct CalculateArgs {
    pub signature: String,
    pub leaderboard: PathBuf,
    pub algorithms: Vec<String>,
    pub deduplicate: Option<String>,
    pub always_winning: Option<String>,
    pub output: Option<PathBuf>,
}

/// Run the calculate command
pub fn run(config_path: &Path, args: CalculateArgs) -> Result<()> {
    let config = Config::load_or_default(config_path)?;

    let signature: Signature = args.signature.parse().context("Invalid signature")?;
    let leaderboard = read_leaderboard(&args.leaderboard)?;

    let distributions = if args.algorithms.is_empty() {
        config.draw.distributions.clone()
    } else {
        args.algorithms
    };

    let mut options = config.draw.options();
    if let Some(value) = args.deduplicate.as_deref() {
        options.deduplicate = parse_yes_no(value).context("Invalid --deduplicate")?;
    }
    if let Some(value) = args.always_winning.as_deref() {
        options.always_winning = parse_yes_no(value).context("Invalid --always-winning")?;
    }

    info!(
        digits = signature.len(),
        distributions = distributions.len(),
        deduplicate = options.deduplicate,
        always_winning = options.always_winning,
        entries = leaderboard.len(),
        "Running calculation"
    );

    let output = execute_calculation(&signature, &distributions, options, &leaderboard)?;

    for skipped in &output.skipped {
        warn!(distribution = %skipped.name, reason = %skipped.reason, "Distribution skipped");
    }
    for winner in &output.summary {
        log_winner(winner);
    }

    emit_json(&output, config.output.pretty, args.output.as_deref())
}

fn log_winner(winner: &Summary) {
    info!(
        id = %winner.id,
        qty = winner.qty,
        percent = %winner.percent,
        "Winner"
    );
}
