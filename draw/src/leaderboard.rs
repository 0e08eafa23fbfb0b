// Copyright (c) 2024 Botho Foundation

//! Ranged ticket ownership.
//!
//! A leaderboard partitions the ticket number space into inclusive ranges,
//! one per owner. Ranges must be sorted and must not overlap, so any ticket
//! has at most one owner.

use serde::{Deserialize, Serialize};

use crate::{DrawError, Ticket};

/// An inclusive range of ticket numbers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketRange {
    pub from: Ticket,
    pub to: Ticket,
}

impl TicketRange {
    pub fn new(from: Ticket, to: Ticket) -> Self {
        Self { from, to }
    }

    pub fn contains(&self, ticket: Ticket) -> bool {
        self.from <= ticket && ticket <= self.to
    }
}

/// One owner's slice of the ticket space.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Owner account id
    pub id: String,
    /// Boosted amount held, in base units
    #[serde(default)]
    pub amount: f64,
    /// Ids of the on-chain tickets backing this entry
    #[serde(default)]
    pub tickets: Vec<String>,
    /// Ticket numbers owned
    pub range: TicketRange,
    /// Share of the whole ticket space
    #[serde(default)]
    pub percent: f64,
}

impl LeaderboardEntry {
    pub fn new(id: impl Into<String>, from: Ticket, to: Ticket) -> Self {
        Self {
            id: id.into(),
            amount: 0.0,
            tickets: Vec::new(),
            range: TicketRange::new(from, to),
            percent: 0.0,
        }
    }

    /// Amount scaled down by the asset precision.
    pub fn display_amount(&self, precision: u32) -> f64 {
        self.amount / 10f64.powi(precision as i32)
    }
}

/// A validated, non-empty leaderboard.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LeaderboardEntry>", into = "Vec<LeaderboardEntry>")]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// Validate entries: at least one, every range well formed, ranges
    /// ascending and disjoint.
    pub fn new(entries: Vec<LeaderboardEntry>) -> Result<Self, DrawError> {
        if entries.is_empty() {
            return Err(DrawError::InvalidLeaderboard("no entries".to_string()));
        }

        for entry in &entries {
            if entry.range.from > entry.range.to {
                return Err(DrawError::InvalidLeaderboard(format!(
                    "entry {} has range {}..={} with from > to",
                    entry.id, entry.range.from, entry.range.to
                )));
            }
        }

        for pair in entries.windows(2) {
            if pair[1].range.from <= pair[0].range.to {
                return Err(DrawError::InvalidLeaderboard(format!(
                    "range of {} overlaps or precedes range of {}",
                    pair[1].id, pair[0].id
                )));
            }
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a board built through [`Leaderboard::new`].
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Upper bound of the last range, used as the wrap modulus.
    pub fn last_bound(&self) -> Ticket {
        self.entries.last().map_or(0, |e| e.range.to)
    }

    /// Index of the entry whose range contains `ticket`.
    pub fn position(&self, ticket: Ticket) -> Option<usize> {
        let idx = self.entries.partition_point(|e| e.range.to < ticket);
        self.entries
            .get(idx)
            .filter(|e| e.range.contains(ticket))
            .map(|_| idx)
    }

    /// Entry whose range contains `ticket`.
    pub fn find_owner(&self, ticket: Ticket) -> Option<&LeaderboardEntry> {
        self.position(ticket).map(|idx| &self.entries[idx])
    }
}

impl TryFrom<Vec<LeaderboardEntry>> for Leaderboard {
    type Error = DrawError;

    fn try_from(entries: Vec<LeaderboardEntry>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<Leaderboard> for Vec<LeaderboardEntry> {
    fn from(board: Leaderboard) -> Self {
        board.entries
    }
}
