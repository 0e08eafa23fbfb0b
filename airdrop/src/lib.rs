// Copyright (c) 2024 Botho Foundation

//! Airdrop tool library.
//!
//! Configuration and command implementations for the `airdrop` binary. The
//! ticket draw itself lives in `airdrop-draw`.

#![deny(clippy::print_stdout)]

pub mod config;

// Re-export commands module for CLI binary
pub mod commands;
