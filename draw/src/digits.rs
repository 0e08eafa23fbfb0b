// Copyright (c) 2024 Botho Foundation

//! Digit chunking and leading-zero-safe parsing.
//!
//! Every algorithm slices the signature into fixed-width digit chunks and
//! reads each chunk as a decimal integer. Leading zeros are stripped before
//! parsing so that `"010"` is always ten.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::DrawError;

/// A validated signature: a non-empty string of ASCII digits.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Signature(String);

impl Signature {
    /// Validate and wrap a digit string.
    pub fn new(digits: impl Into<String>) -> Result<Self, DrawError> {
        let digits = digits.into();
        if digits.is_empty() {
            return Err(DrawError::InvalidSignature("empty signature".to_string()));
        }
        if let Some(bad) = digits.chars().find(|c| !c.is_ascii_digit()) {
            return Err(DrawError::InvalidSignature(format!(
                "unexpected character {bad:?}"
            )));
        }
        Ok(Self(digits))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of digits.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Split into chunks of `size` digits, see [`chunk`].
    pub fn chunks(&self, size: usize) -> Result<Vec<&str>, DrawError> {
        chunk(&self.0, size)
    }
}

impl FromStr for Signature {
    type Err = DrawError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Signature {
    type Error = DrawError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Signature> for String {
    fn from(value: Signature) -> Self {
        value.0
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Split `digits` into consecutive chunks of exactly `size` characters.
///
/// A trailing remainder shorter than `size` is discarded. Fails when `size`
/// is zero or longer than `digits`.
pub fn chunk(digits: &str, size: usize) -> Result<Vec<&str>, DrawError> {
    if size == 0 || size > digits.len() {
        return Err(DrawError::InvalidChunkSize {
            size,
            len: digits.len(),
        });
    }
    if !digits.is_ascii() {
        return Err(DrawError::InvalidSignature(
            "non-ascii characters in digit string".to_string(),
        ));
    }

    let count = digits.len() / size;
    Ok((0..count)
        .map(|i| &digits[i * size..(i + 1) * size])
        .collect())
}

/// Parse a digit string after dropping its leading zeros.
///
/// An all-zero string parses to 0.
pub fn filter_parse_int(digits: &str) -> Result<u64, DrawError> {
    let significant = digits.trim_start_matches('0');

    significant.bytes().try_fold(0u64, |acc, b| {
        if !b.is_ascii_digit() {
            return Err(DrawError::InvalidSignature(format!(
                "non-digit in {digits:?}"
            )));
        }
        acc.checked_mul(10)
            .and_then(|v| v.checked_add(u64::from(b - b'0')))
            .ok_or_else(|| DrawError::ValueOverflow(digits.to_string()))
    })
}

/// Reverse the digit order of a chunk.
pub fn reverse_digits(digits: &str) -> String {
    digits.chars().rev().collect()
}
