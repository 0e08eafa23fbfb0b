// Copyright (c) 2024 Botho Foundation

//! Error types for ticket draws.

use thiserror::Error;

/// Errors that can occur while drawing or matching tickets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrawError {
    /// Chunk size is zero or longer than the digits being chunked.
    #[error("invalid chunk size {size} for {len} digits")]
    InvalidChunkSize { size: usize, len: usize },

    /// Signature is empty or contains a non-digit character.
    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    /// Digit string does not fit in a 64-bit ticket value.
    #[error("value overflow parsing {0:?}")]
    ValueOverflow(String),

    /// Algorithm name outside the fixed set.
    #[error("unrecognized algorithm: {0}")]
    UnrecognizedAlgorithm(String),

    /// Leaderboard cannot be used for matching or wrapping.
    #[error("invalid leaderboard: {0}")]
    InvalidLeaderboard(String),
}
