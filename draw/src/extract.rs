// Copyright (c) 2024 Botho Foundation

//! Ticket extraction along a segment.

use crate::geometry::Segment;
use crate::Ticket;

/// Parametric step between picks; 999 picks cover a segment end to end.
pub const PICK_INCREMENT: f64 = 0.001;

/// Sample `quantity` tickets along `segment` at `increment * i` for
/// `i = 1..=quantity`.
///
/// Duplicates are kept and the output is in sampling order.
pub fn extract_tickets(quantity: usize, segment: &Segment, increment: f64) -> Vec<Ticket> {
    (1..=quantity)
        .map(|i| segment.at(increment * i as f64).ticket())
        .collect()
}
