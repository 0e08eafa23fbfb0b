// Copyright (c) 2024 Botho Foundation

//! Ticket selection algorithms.
//!
//! Each algorithm turns a signature into an ordered sequence of ticket
//! numbers. The set is closed; [`run_algorithm`] is the single dispatcher.
//!
//! | Algorithm         | Chunking                | Range                        |
//! |-------------------|-------------------------|------------------------------|
//! | `forward`         | 9 digits                | 0 - 999,999,999              |
//! | `reverse`         | 9 digits, reversed      | 0 - 999,999,999              |
//! | `pi`              | 9 digits, pairwise      | triangular fan-out           |
//! | `reverse_pi`      | 9 digits reversed       | triangular fan-out           |
//! | `cubed`           | 3 digits                | 0 - 997,002,999              |
//! | `avg_point_lines` | 9 digits as points      | lines to the mean point      |
//! | `alien_blood`     | 6 digits as x/y         | 999 picks down the z axis    |
//! | `bouncing_ball`   | 9 digits as points      | picks along a bounce path    |

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::digits::{chunk, filter_parse_int, reverse_digits, Signature};
use crate::extract::{extract_tickets, PICK_INCREMENT};
use crate::geometry::{Point3, Segment, MAX_COORDINATE};
use crate::{DrawError, Ticket};

/// Width of the primary signature chunks.
pub const PRIMARY_CHUNK: usize = 9;

/// Selectable ticket algorithm.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    Forward,
    Reverse,
    #[serde(alias = "forward_pi")]
    Pi,
    ReversePi,
    Cubed,
    AvgPointLines,
    AlienBlood,
    BouncingBall,
}

impl Algorithm {
    /// Every algorithm, in table order.
    pub const ALL: [Algorithm; 8] = [
        Algorithm::Forward,
        Algorithm::Reverse,
        Algorithm::Pi,
        Algorithm::ReversePi,
        Algorithm::Cubed,
        Algorithm::AvgPointLines,
        Algorithm::AlienBlood,
        Algorithm::BouncingBall,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Forward => "forward",
            Algorithm::Reverse => "reverse",
            Algorithm::Pi => "pi",
            Algorithm::ReversePi => "reverse_pi",
            Algorithm::Cubed => "cubed",
            Algorithm::AvgPointLines => "avg_point_lines",
            Algorithm::AlienBlood => "alien_blood",
            Algorithm::BouncingBall => "bouncing_ball",
        }
    }

    /// Short human readable description.
    pub fn description(&self) -> &'static str {
        match self {
            Algorithm::Forward => "nine digit chunks read left to right",
            Algorithm::Reverse => "nine digit chunks read right to left",
            Algorithm::Pi => "pairwise root products of chunks scaled by pi",
            Algorithm::ReversePi => "pi pairing over reversed chunks",
            Algorithm::Cubed => "three digit chunks cubed",
            Algorithm::AvgPointLines => "picks along lines from each point to the mean point",
            Algorithm::AlienBlood => "999 picks burning straight down through each splatter",
            Algorithm::BouncingBall => "picks along the path of a ball bouncing between points",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = DrawError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "forward" => Ok(Algorithm::Forward),
            "reverse" => Ok(Algorithm::Reverse),
            "pi" | "forward_pi" => Ok(Algorithm::Pi),
            "reverse_pi" => Ok(Algorithm::ReversePi),
            "cubed" => Ok(Algorithm::Cubed),
            "avg_point_lines" => Ok(Algorithm::AvgPointLines),
            "alien_blood" => Ok(Algorithm::AlienBlood),
            "bouncing_ball" => Ok(Algorithm::BouncingBall),
            other => Err(DrawError::UnrecognizedAlgorithm(other.to_string())),
        }
    }
}

/// Run `algorithm` over `signature`.
///
/// Fails with [`DrawError::InvalidChunkSize`] when the signature is shorter
/// than the chunk width the algorithm needs.
pub fn run_algorithm(algorithm: Algorithm, signature: &Signature) -> Result<Vec<Ticket>, DrawError> {
    let digits = signature.as_str();
    match algorithm {
        Algorithm::Forward => forward(&chunk(digits, PRIMARY_CHUNK)?),
        Algorithm::Reverse => reverse(&chunk(digits, PRIMARY_CHUNK)?),
        Algorithm::Pi => forward_pi(&chunk(digits, PRIMARY_CHUNK)?),
        Algorithm::ReversePi => reverse_pi(&chunk(digits, PRIMARY_CHUNK)?),
        Algorithm::Cubed => cubed(digits),
        Algorithm::AvgPointLines => avg_point_lines(&chunk(digits, PRIMARY_CHUNK)?),
        Algorithm::AlienBlood => alien_blood(digits),
        Algorithm::BouncingBall => bouncing_ball(&chunk(digits, PRIMARY_CHUNK)?),
    }
}

/// One ticket per chunk.
pub fn forward(chunks: &[&str]) -> Result<Vec<Ticket>, DrawError> {
    chunks.iter().map(|c| filter_parse_int(c)).collect()
}

/// One ticket per digit-reversed chunk.
pub fn reverse(chunks: &[&str]) -> Result<Vec<Ticket>, DrawError> {
    chunks
        .iter()
        .map(|c| filter_parse_int(&reverse_digits(c)))
        .collect()
}

/// Triangular pairing of chunk square roots, scaled by pi.
pub fn forward_pi(chunks: &[&str]) -> Result<Vec<Ticket>, DrawError> {
    Ok(pi_pairs(&forward(chunks)?))
}

/// [`forward_pi`] over digit-reversed chunks.
pub fn reverse_pi(chunks: &[&str]) -> Result<Vec<Ticket>, DrawError> {
    Ok(pi_pairs(&reverse(chunks)?))
}

// For each i, pairs with every y in i..len-i, so later rows shrink from both ends.
fn pi_pairs(values: &[u64]) -> Vec<Ticket> {
    let roots: Vec<u64> = values.iter().map(|&v| (v as f64).sqrt() as u64).collect();
    let len = roots.len();

    let mut tickets = Vec::new();
    for i in 0..len {
        let end = len - i;
        if i >= end {
            break;
        }
        let current = roots[i];
        for &next in &roots[i..end] {
            tickets.push(((current * next) as f64 * PI) as u64);
        }
    }
    tickets
}

/// Each three digit chunk of the raw signature, cubed.
pub fn cubed(digits: &str) -> Result<Vec<Ticket>, DrawError> {
    chunk(digits, 3)?
        .into_iter()
        .map(|c| filter_parse_int(c).map(|v| v * v * v))
        .collect()
}

/// Lines from every chunk point to the mean point, with picks proportional
/// to each line's squared length.
pub fn avg_point_lines(chunks: &[&str]) -> Result<Vec<Ticket>, DrawError> {
    let points = chunks
        .iter()
        .map(|c| Point3::from_digits(c))
        .collect::<Result<Vec<_>, _>>()?;
    if points.is_empty() {
        return Ok(Vec::new());
    }

    let count = points.len() as f64;
    let (sx, sy, sz) = points
        .iter()
        .fold((0.0, 0.0, 0.0), |(x, y, z), p| (x + p.x, y + p.y, z + p.z));
    let mean = Point3::new(
        (sx / count).trunc(),
        (sy / count).trunc(),
        (sz / count).trunc(),
    );

    let tickets: Vec<Ticket> = points
        .iter()
        .flat_map(|p| {
            let line = Segment::new(*p, mean);
            extract_tickets(line.picks(), &line, PICK_INCREMENT)
        })
        .collect();

    debug!(lines = points.len(), tickets = tickets.len(), "avg_point_lines tickets chosen");
    Ok(tickets)
}

/// Every six digit chunk is an (x, y) splatter that burns from z = 0 to
/// z = 999, yielding 999 tickets per chunk.
pub fn alien_blood(digits: &str) -> Result<Vec<Ticket>, DrawError> {
    let hull_tiles = chunk(digits, 6)?;

    let mut tickets = Vec::with_capacity(hull_tiles.len() * 999);
    for tile in &hull_tiles {
        let fragments = chunk(tile, 3)?;
        let x = filter_parse_int(fragments[0])? as f64;
        let y = filter_parse_int(fragments[1])? as f64;

        let burn = Segment::new(Point3::new(x, y, 0.0), Point3::new(x, y, MAX_COORDINATE));
        tickets.extend(extract_tickets(999, &burn, PICK_INCREMENT));
    }

    debug!(
        hull_tiles = hull_tiles.len(),
        tickets = tickets.len(),
        "alien blood melted through the hull"
    );
    Ok(tickets)
}

/// Picks along the path of a ball travelling between chunk points.
///
/// The path starts at the second point. Whenever the next point is not
/// higher than the current one the ball first bounces on the floor at the
/// x/y midpoint. The path ends with the ball landing under its last point.
pub fn bouncing_ball(chunks: &[&str]) -> Result<Vec<Ticket>, DrawError> {
    let points = chunks
        .iter()
        .map(|c| Point3::from_digits(c))
        .collect::<Result<Vec<_>, _>>()?;

    let mut path = Vec::with_capacity(points.len() * 2);
    for pair in points.windows(2) {
        let (current, next) = (pair[0], pair[1]);
        if next.z <= current.z {
            path.push(current.floor_midpoint(&next));
        }
        path.push(next);
    }

    let Some(last) = path.last().copied() else {
        return Ok(Vec::new());
    };
    path.push(last.on_floor());

    let tickets: Vec<Ticket> = path
        .windows(2)
        .flat_map(|pair| {
            let line = Segment::new(pair[0], pair[1]);
            extract_tickets(line.picks(), &line, PICK_INCREMENT)
        })
        .collect();

    debug!(
        bounces = path.len().saturating_sub(2),
        tickets = tickets.len(),
        "ball finished bouncing"
    );
    Ok(tickets)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sig(digits: &str) -> Signature {
        Signature::new(digits).unwrap()
    }

    #[test]
    fn test_name_roundtrip() {
        for algo in Algorithm::ALL {
            assert_eq!(algo.name().parse::<Algorithm>().unwrap(), algo);
            assert_eq!(algo.to_string(), algo.name());
        }
        assert_eq!("forward_pi".parse::<Algorithm>().unwrap(), Algorithm::Pi);
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!(
            "lucky".parse::<Algorithm>(),
            Err(DrawError::UnrecognizedAlgorithm("lucky".to_string()))
        );
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Algorithm::AvgPointLines).unwrap();
        assert_eq!(json, "\"avg_point_lines\"");
        let algo: Algorithm = serde_json::from_str("\"forward_pi\"").unwrap();
        assert_eq!(algo, Algorithm::Pi);
    }

    #[test]
    fn test_forward_three_chunks() {
        let s = sig("000000045123456789987654321");
        let tickets = run_algorithm(Algorithm::Forward, &s).unwrap();
        assert_eq!(tickets, vec![45, 123_456_789, 987_654_321]);
    }

    #[test]
    fn test_forward_drops_partial_chunk() {
        let s = sig("1234567891234");
        assert_eq!(run_algorithm(Algorithm::Forward, &s).unwrap(), vec![123_456_789]);
    }

    #[test]
    fn test_reverse() {
        let s = sig("123456780000000001");
        let tickets = run_algorithm(Algorithm::Reverse, &s).unwrap();
        assert_eq!(tickets, vec![87_654_321, 100_000_000]);
    }

    #[test]
    fn test_pi_triangular_fanout() {
        // roots: 3, 2, 1
        let chunks = ["000000009", "000000004", "000000001"];
        let tickets = forward_pi(&chunks).unwrap();

        // i = 0 pairs with y = 0, 1, 2; i = 1 pairs with y = 1 only.
        let expected: Vec<u64> = [9.0, 6.0, 3.0, 4.0]
            .iter()
            .map(|v: &f64| (v * PI) as u64)
            .collect();
        assert_eq!(tickets, expected);
        assert_eq!(tickets, vec![28, 18, 9, 12]);
    }

    #[test]
    fn test_pi_fanout_count() {
        let s = sig(&"123456789".repeat(5));
        // rows of 5, 3, 1 pairs
        assert_eq!(run_algorithm(Algorithm::Pi, &s).unwrap().len(), 9);
    }

    #[test]
    fn test_reverse_pi_reverses_before_root() {
        let chunks = ["900000000"];
        // reversed -> 9, root 3, 3 * 3 * pi
        assert_eq!(reverse_pi(&chunks).unwrap(), vec![28]);
        // forward root of 900000000 is 30000
        assert_eq!(forward_pi(&chunks).unwrap(), vec![(900_000_000.0 * PI) as u64]);
    }

    #[test]
    fn test_cubed() {
        let tickets = cubed("00299910").unwrap();
        assert_eq!(tickets, vec![8, 997_002_999]);
    }

    #[test]
    fn test_alien_blood_999_per_chunk() {
        let s = sig("123456000999");
        let tickets = run_algorithm(Algorithm::AlienBlood, &s).unwrap();
        assert_eq!(tickets.len(), 2 * 999);

        let first = Segment::new(Point3::new(123.0, 456.0, 0.0), Point3::new(123.0, 456.0, 999.0));
        let second = Segment::new(Point3::new(0.0, 999.0, 0.0), Point3::new(0.0, 999.0, 999.0));
        assert_eq!(tickets[..999], extract_tickets(999, &first, PICK_INCREMENT)[..]);
        assert_eq!(tickets[999..], extract_tickets(999, &second, PICK_INCREMENT)[..]);
    }

    #[test]
    fn test_avg_point_lines_identical_points() {
        // Every point is the mean, so every line is empty.
        let s = sig(&"500500500".repeat(3));
        assert!(run_algorithm(Algorithm::AvgPointLines, &s).unwrap().is_empty());
    }

    #[test]
    fn test_avg_point_lines_picks() {
        // mean = (499, 499, 499), truncated from 499.5
        let chunks = ["000000000", "999999999"];
        let tickets = avg_point_lines(&chunks).unwrap();

        let mean = Point3::new(499.0, 499.0, 499.0);
        let low = Segment::new(Point3::ORIGIN, mean);
        let high = Segment::new(Point3::new(999.0, 999.0, 999.0), mean);
        assert_eq!(low.picks(), 249);
        assert_eq!(high.picks(), 250);

        let mut expected = extract_tickets(249, &low, PICK_INCREMENT);
        expected.extend(extract_tickets(250, &high, PICK_INCREMENT));
        assert_eq!(tickets, expected);
    }

    #[test]
    fn test_bouncing_ball_single_point_is_empty() {
        let s = sig("123456789");
        assert!(run_algorithm(Algorithm::BouncingBall, &s).unwrap().is_empty());
    }

    #[test]
    fn test_bouncing_ball_rising_path() {
        // Rising: path is [b, floor(b)], one vertical drop of 999.
        let chunks = ["000000000", "000000999"];
        let tickets = bouncing_ball(&chunks).unwrap();
        let drop = Segment::new(Point3::new(0.0, 0.0, 999.0), Point3::ORIGIN);
        assert!(drop.picks() > 0);
        assert_eq!(tickets, extract_tickets(drop.picks(), &drop, PICK_INCREMENT));
    }

    #[test]
    fn test_bouncing_ball_descending_inserts_bounce() {
        // Falling from z=999 to z=0: path is [mid, b, floor(b)]
        let chunks = ["000000999", "998998000"];
        let tickets = bouncing_ball(&chunks).unwrap();

        let mid = Point3::new(499.0, 499.0, 0.0);
        let b = Point3::new(998.0, 998.0, 0.0);
        let bounce = Segment::new(mid, b);
        // b is already on the floor, so the landing segment is empty
        assert_eq!(tickets, extract_tickets(bounce.picks(), &bounce, PICK_INCREMENT));
    }

    #[test]
    fn test_bouncing_ball_mixed_rise_and_descent() {
        // a -> b rises, b -> c falls, c -> d rises again
        let chunks = ["000000100", "010010500", "020030200", "040040700"];
        let tickets = bouncing_ball(&chunks).unwrap();

        let b = Point3::new(10.0, 10.0, 500.0);
        let c = Point3::new(20.0, 30.0, 200.0);
        let d = Point3::new(40.0, 40.0, 700.0);
        let path = [b, Point3::new(15.0, 20.0, 0.0), c, d, Point3::new(40.0, 40.0, 0.0)];

        let mut expected = Vec::new();
        for pair in path.windows(2) {
            let line = Segment::new(pair[0], pair[1]);
            assert!(line.picks() > 0);
            expected.extend(extract_tickets(line.picks(), &line, PICK_INCREMENT));
        }
        assert_eq!(tickets, expected);
    }

    #[test]
    fn test_short_signature_chunk_error() {
        let s = sig("12345");
        assert!(matches!(
            run_algorithm(Algorithm::Forward, &s),
            Err(DrawError::InvalidChunkSize { size: 9, len: 5 })
        ));
        assert!(run_algorithm(Algorithm::AlienBlood, &s).is_err());
        assert_eq!(run_algorithm(Algorithm::Cubed, &s).unwrap(), vec![1_860_867]);
    }

    #[test]
    fn test_deterministic() {
        let s = sig("31415926535897932384626433832795028841971693993751");
        for algo in Algorithm::ALL {
            assert_eq!(
                run_algorithm(algo, &s).unwrap(),
                run_algorithm(algo, &s).unwrap(),
                "{algo} should be deterministic"
            );
        }
    }
}
