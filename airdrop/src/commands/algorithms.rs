// Copyright (c) 2024 Botho Foundation

use airdrop_draw::Algorithm;
use anyhow::Result;

/// List the available algorithms
pub fn run() -> Result<()> {
    for algorithm in Algorithm::ALL {
        println!("{:<16} {}", algorithm.name(), algorithm.description());
    }
    Ok(())
}
