// Copyright (c) 2024 Botho Foundation

//! Winner calculation over a leaderboard.
//!
//! Runs the chosen distributions over one signature, optionally removes
//! repeated tickets and wraps oversized tickets into the leaderboard's range,
//! then tallies the owners of every generated ticket.
//!
//! # Flow
//!
//! ```text
//! signature ──> algorithm 1 ──> dedup? ──> wrap? ──┐
//!           ──> algorithm 2 ──> dedup? ──> wrap? ──┼──> pool ──> match ──> summary
//!           ──> ...                                ┘
//! ```
//!
//! Dedup and the pool are order sensitive: each algorithm only drops tickets
//! already produced by the algorithms before it.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use tracing::{debug, info, warn};

use crate::algorithm::{run_algorithm, Algorithm};
use crate::digits::Signature;
use crate::leaderboard::Leaderboard;
use crate::{DrawError, Ticket};

/// Switches applied on top of the raw algorithm output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationOptions {
    /// Drop repeated tickets, within an algorithm and against earlier ones.
    #[serde(default)]
    pub deduplicate: bool,
    /// Wrap tickets above the last leaderboard bound back into range.
    #[serde(default)]
    pub always_winning: bool,
}

/// A winning ticket and the algorithm that drew it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinnerRecord {
    pub ticket: Ticket,
    pub algo: Algorithm,
}

/// A percentage with exactly five decimal places.
///
/// The share is computed as `part / whole * 100` in `f64` and then rounded
/// on the exact binary value of that double, with ties going up. This is the
/// rounding `Number.prototype.toFixed(5)` applies, so published percentages
/// can be reproduced from other tooling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Percent(u64);

impl Percent {
    const DECIMALS: u64 = 100_000;

    /// `part / whole * 100`, or zero for an empty pool.
    pub fn of(part: usize, whole: usize) -> Self {
        if whole == 0 {
            return Self(0);
        }
        Self::from_f64((part as f64 / whole as f64) * 100.0)
    }

    /// Round a non-negative finite value to five decimals; anything else is zero.
    pub fn from_f64(value: f64) -> Self {
        if !value.is_finite() || value <= 0.0 {
            return Self(0);
        }

        let bits = value.to_bits();
        let biased = ((bits >> 52) & 0x7ff) as i32;
        let fraction = bits & ((1u64 << 52) - 1);
        let (mantissa, exponent) = if biased == 0 {
            (fraction, -1074)
        } else {
            (fraction | (1u64 << 52), biased - 1075)
        };

        // value * 10^5 == mantissa * 10^5 * 2^exponent, below 2^70 before shifting
        let scaled = u128::from(mantissa) * u128::from(Self::DECIMALS);
        let rounded = if exponent >= 0 {
            1u128
                .checked_shl(exponent as u32)
                .and_then(|factor| scaled.checked_mul(factor))
                .unwrap_or(u128::MAX)
        } else {
            let shift = exponent.unsigned_abs();
            if shift >= 128 {
                0
            } else {
                let quotient = scaled >> shift;
                let remainder = scaled - (quotient << shift);
                if remainder >= 1u128 << (shift - 1) {
                    quotient + 1
                } else {
                    quotient
                }
            }
        };
        Self(u64::try_from(rounded).unwrap_or(u64::MAX))
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:05}", self.0 / Self::DECIMALS, self.0 % Self::DECIMALS)
    }
}

impl FromStr for Percent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (whole, frac) = s
            .split_once('.')
            .ok_or_else(|| format!("percent {s:?} has no decimal point"))?;
        if frac.len() != 5 {
            return Err(format!("percent {s:?} must have five decimals"));
        }
        let whole: u64 = whole.parse().map_err(|_| format!("bad percent {s:?}"))?;
        let frac: u64 = frac.parse().map_err(|_| format!("bad percent {s:?}"))?;
        whole
            .checked_mul(Self::DECIMALS)
            .and_then(|v| v.checked_add(frac))
            .map(Self)
            .ok_or_else(|| format!("percent {s:?} out of range"))
    }
}

impl Serialize for Percent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Percent {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Winners grouped under one leaderboard id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub id: String,
    /// Sorted ascending by ticket
    pub tickets: Vec<WinnerRecord>,
    pub qty: usize,
    /// Share of the whole ticket pool
    pub percent: Percent,
}

/// Tickets per algorithm, in first-run order.
///
/// Running the same algorithm twice keeps its original position and
/// replaces its tickets with the later run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GeneratedNumbers {
    entries: Vec<(Algorithm, Vec<Ticket>)>,
}

impl GeneratedNumbers {
    pub fn insert(&mut self, algorithm: Algorithm, tickets: Vec<Ticket>) {
        match self.entries.iter_mut().find(|(a, _)| *a == algorithm) {
            Some((_, existing)) => *existing = tickets,
            None => self.entries.push((algorithm, tickets)),
        }
    }

    pub fn get(&self, algorithm: Algorithm) -> Option<&[Ticket]> {
        self.entries
            .iter()
            .find(|(a, _)| *a == algorithm)
            .map(|(_, t)| t.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Algorithm, &[Ticket])> {
        self.entries.iter().map(|(a, t)| (*a, t.as_slice()))
    }

    /// Number of algorithms recorded.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for GeneratedNumbers {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (algorithm, tickets) in &self.entries {
            map.serialize_entry(algorithm, tickets)?;
        }
        map.end()
    }
}

/// A requested distribution that produced no tickets.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedDistribution {
    pub name: String,
    pub reason: String,
}

/// Result of [`execute_calculation`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationOutput {
    pub summary: Vec<Summary>,
    pub generated_numbers: GeneratedNumbers,
    /// Size of the whole ticket pool after dedup and wrap
    pub total_tickets: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedDistribution>,
}

/// Draw tickets for every distribution and tally the winners.
///
/// Unknown distribution names and algorithms whose chunking fails are
/// logged, listed in [`CalculationOutput::skipped`] and contribute nothing.
/// A leaderboard whose last bound is zero cannot be wrapped against and is
/// rejected when `always_winning` is set.
pub fn execute_calculation<S: AsRef<str>>(
    signature: &Signature,
    distributions: &[S],
    options: CalculationOptions,
    leaderboard: &Leaderboard,
) -> Result<CalculationOutput, DrawError> {
    let last_bound = leaderboard.last_bound();
    if options.always_winning && last_bound == 0 {
        return Err(DrawError::InvalidLeaderboard(
            "last range ends at 0, cannot wrap tickets".to_string(),
        ));
    }

    let mut skipped = Vec::new();
    let mut algorithms = Vec::with_capacity(distributions.len());
    for name in distributions {
        let name = name.as_ref();
        match name.parse::<Algorithm>() {
            Ok(algorithm) => algorithms.push(algorithm),
            Err(err) => {
                warn!(distribution = name, "Skipping unknown distribution");
                skipped.push(SkippedDistribution {
                    name: name.to_string(),
                    reason: err.to_string(),
                });
            }
        }
    }

    let raw = generate_all(&algorithms, signature);

    let mut generated = GeneratedNumbers::default();
    let mut pool: HashSet<Ticket> = HashSet::new();
    let mut total_tickets = 0usize;

    for (algorithm, result) in algorithms.iter().copied().zip(raw) {
        let mut tickets = match result {
            Ok(tickets) => tickets,
            Err(err) => {
                warn!(algorithm = %algorithm, error = %err, "Algorithm produced no tickets");
                skipped.push(SkippedDistribution {
                    name: algorithm.to_string(),
                    reason: err.to_string(),
                });
                Vec::new()
            }
        };

        if options.deduplicate {
            let mut seen = HashSet::with_capacity(tickets.len());
            tickets.retain(|t| seen.insert(*t) && !pool.contains(t));
        }

        if options.always_winning {
            for ticket in tickets.iter_mut() {
                *ticket = wrap_ticket(*ticket, last_bound);
            }
        }

        debug!(algorithm = %algorithm, tickets = tickets.len(), "Distribution drawn");

        total_tickets += tickets.len();
        if options.deduplicate {
            pool.extend(tickets.iter().copied());
        }
        generated.insert(algorithm, tickets);
    }

    let summary = tally_winners(&generated, leaderboard, total_tickets);

    info!(
        distributions = generated.len(),
        total_tickets = total_tickets,
        winners = summary.len(),
        "Calculation complete"
    );

    Ok(CalculationOutput {
        summary,
        generated_numbers: generated,
        total_tickets,
        skipped,
    })
}

/// Fold a ticket above `bound` back into `[0, bound)`.
///
/// Tickets at or below the bound pass through unchanged. `bound` must be non-zero.
pub fn wrap_ticket(ticket: Ticket, bound: Ticket) -> Ticket {
    if ticket <= bound {
        ticket
    } else {
        ticket % bound
    }
}

#[cfg(feature = "parallel")]
fn generate_all(
    algorithms: &[Algorithm],
    signature: &Signature,
) -> Vec<Result<Vec<Ticket>, DrawError>> {
    use rayon::prelude::*;

    algorithms
        .par_iter()
        .map(|&algorithm| run_algorithm(algorithm, signature))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn generate_all(
    algorithms: &[Algorithm],
    signature: &Signature,
) -> Vec<Result<Vec<Ticket>, DrawError>> {
    algorithms
        .iter()
        .map(|&algorithm| run_algorithm(algorithm, signature))
        .collect()
}

fn tally_winners(
    generated: &GeneratedNumbers,
    leaderboard: &Leaderboard,
    total_tickets: usize,
) -> Vec<Summary> {
    let mut groups: Vec<(String, Vec<WinnerRecord>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (algo, tickets) in generated.iter() {
        for &ticket in tickets {
            let Some(owner) = leaderboard.find_owner(ticket) else {
                continue;
            };
            let slot = *index.entry(owner.id.clone()).or_insert_with(|| {
                groups.push((owner.id.clone(), Vec::new()));
                groups.len() - 1
            });
            groups[slot].1.push(WinnerRecord { ticket, algo });
        }
    }

    groups
        .into_iter()
        .map(|(id, mut tickets)| {
            tickets.sort_by_key(|r| r.ticket);
            let qty = tickets.len();
            Summary {
                id,
                tickets,
                qty,
                percent: Percent::of(qty, total_tickets),
            }
        })
        .collect()
}
