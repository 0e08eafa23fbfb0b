// Copyright (c) 2024 Botho Foundation

//! Deterministic airdrop ticket draws.
//!
//! A blockchain signature, read as a long string of decimal digits, is turned
//! into lottery ticket numbers by one or more selection algorithms. The tickets
//! are then matched against a leaderboard of ranged ticket ownership to find
//! the winners and their share of the draw.
//!
//! ## Algorithms
//!
//! | Name              | Picks                                          |
//! |-------------------|------------------------------------------------|
//! | `forward`         | one per nine digit chunk                       |
//! | `reverse`         | one per reversed nine digit chunk              |
//! | `pi`              | triangular pairs of chunk roots, times pi      |
//! | `reverse_pi`      | same pairing over reversed chunks              |
//! | `cubed`           | one per three digit chunk, cubed               |
//! | `avg_point_lines` | along lines from each point to the mean point  |
//! | `alien_blood`     | 999 down the z axis per six digit chunk        |
//! | `bouncing_ball`   | along a ball's bounce path between points      |
//!
//! ## Determinism
//!
//! There is no randomness and no hidden state: the same signature,
//! distributions, options and leaderboard always give the same output.
//! Geometric picks evaluate in a fixed order and truncate toward zero, and
//! percentages are computed with integer arithmetic.

pub mod algorithm;
pub mod calculation;
pub mod digits;
pub mod extract;
pub mod geometry;
pub mod leaderboard;

mod error;

/// A ticket number.
pub type Ticket = u64;

pub use algorithm::{run_algorithm, Algorithm};
pub use calculation::{
    execute_calculation, wrap_ticket, CalculationOptions, CalculationOutput, GeneratedNumbers,
    Percent, SkippedDistribution, Summary, WinnerRecord,
};
pub use digits::{chunk, filter_parse_int, Signature};
pub use error::DrawError;
pub use extract::{extract_tickets, PICK_INCREMENT};
pub use geometry::{Point3, Segment, MAX_DISTANCE_SQ};
pub use leaderboard::{Leaderboard, LeaderboardEntry, TicketRange};
