// Copyright (c) 2024 Botho Foundation

//! Points and segments in the 999 x 999 x 999 ticket cube.
//!
//! A nine digit chunk maps to a point whose coordinates are its three
//! three-digit groups. Tickets are read off segments between such points.

use crate::digits::{chunk, filter_parse_int};
use crate::DrawError;

/// Largest coordinate value produced by a three digit group.
pub const MAX_COORDINATE: f64 = 999.0;

/// Squared distance between opposite corners of the ticket cube.
pub const MAX_DISTANCE_SQ: f64 = 3.0 * MAX_COORDINATE * MAX_COORDINATE;

/// Number of picks along a segment of maximum length.
pub const MAX_PICKS: f64 = 999.0;

/// A point in 3D space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const ORIGIN: Point3 = Point3::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Build a point from a nine digit chunk, three digits per axis.
    pub fn from_digits(digits: &str) -> Result<Self, DrawError> {
        let axes = chunk(digits, 3)?;
        if axes.len() < 3 {
            return Err(DrawError::InvalidChunkSize {
                size: 9,
                len: digits.len(),
            });
        }
        Ok(Self::new(
            filter_parse_int(axes[0])? as f64,
            filter_parse_int(axes[1])? as f64,
            filter_parse_int(axes[2])? as f64,
        ))
    }

    /// Squared Euclidean distance to `other`.
    pub fn distance_squared(&self, other: &Point3) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    /// Midpoint of the x/y projection, dropped onto the floor (z = 0).
    pub fn floor_midpoint(&self, other: &Point3) -> Point3 {
        Point3::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0, 0.0)
    }

    /// The same x/y position on the floor.
    pub fn on_floor(&self) -> Point3 {
        Point3::new(self.x, self.y, 0.0)
    }

    /// Ticket number encoded by this point, truncated toward zero.
    pub fn ticket(&self) -> u64 {
        let value = (self.z * 1_000_000.0) + ((self.y * 1_000.0) + self.x);
        value.trunc() as u64
    }
}

/// A directed segment between two points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start: Point3,
    pub end: Point3,
}

impl Segment {
    pub fn new(start: Point3, end: Point3) -> Self {
        Self { start, end }
    }

    /// Linear interpolation: `start + (end - start) * t`.
    pub fn at(&self, t: f64) -> Point3 {
        Point3::new(
            (self.end.x - self.start.x) * t + self.start.x,
            (self.end.y - self.start.y) * t + self.start.y,
            (self.end.z - self.start.z) * t + self.start.z,
        )
    }

    pub fn distance_squared(&self) -> f64 {
        self.start.distance_squared(&self.end)
    }

    /// Picks proportional to squared length, up to 999 for a full diagonal.
    pub fn picks(&self) -> usize {
        let distance = self.distance_squared();
        if distance > 0.0 {
            ((distance / MAX_DISTANCE_SQ) * MAX_PICKS) as usize
        } else {
            0
        }
    }
}
