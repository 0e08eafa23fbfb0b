// Copyright (c) 2024 Botho Foundation

use airdrop_draw::{run_algorithm, Algorithm, Signature};
use anyhow::{Context, Result};
use tracing::info;

use super::emit_json;

/// Print the raw tickets drawn by one algorithm
pub fn run(signature: &str, algorithm: &str, pretty: bool) -> Result<()> {
    let signature: Signature = signature.parse().context("Invalid signature")?;
    let algorithm: Algorithm = algorithm.parse()?;

    let tickets = run_algorithm(algorithm, &signature)
        .with_context(|| format!("{algorithm} failed for a {} digit signature", signature.len()))?;

    info!(algorithm = %algorithm, tickets = tickets.len(), "Tickets drawn");
    emit_json(&tickets, pretty, None)
}
