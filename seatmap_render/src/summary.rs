// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Views derived from the selection and the venue.

use core::fmt;

use seatmap_venue::{PriceTier, SeatId, SeatRef, SeatStatus, Venue};

/// One resolved line of a [`SelectionSummary`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummaryLine {
    /// Seat identifier.
    pub id: SeatId,
    /// Owning section's display label.
    pub section_label: String,
    /// Row index.
    pub row: u32,
    /// Column number.
    pub col: u32,
    /// Price tier.
    pub tier: PriceTier,
    /// Price in whole currency units.
    pub price: u32,
}

impl SummaryLine {
    fn from_seat(seat: SeatRef<'_>) -> Self {
        Self {
            id: seat.seat.id.clone(),
            section_label: seat.section.label.clone(),
            row: seat.row.index,
            col: seat.seat.col,
            tier: seat.seat.price_tier,
            price: seat.seat.price_tier.price(),
        }
    }

    /// Label for the line's remove control, e.g. `Remove VIP Row 1 Seat 3`.
    #[must_use]
    pub fn remove_label(&self) -> String {
        format!(
            "Remove {} Row {} Seat {}",
            self.section_label, self.row, self.col
        )
    }
}

impl fmt::Display for SummaryLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - Row {}, Seat {}",
            self.section_label, self.row, self.col
        )
    }
}

/// The selected seats resolved against the venue, with a running subtotal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionSummary {
    /// Resolved seats in selection order.
    pub lines: Vec<SummaryLine>,
    /// Sum of line prices.
    pub subtotal: u32,
    /// Number of selected ids, including any that did not resolve.
    pub count: usize,
    /// Selection bound.
    pub max: usize,
}

impl SelectionSummary {
    /// Resolves `ids` against `venue`.
    ///
    /// Ids that no longer name a seat are left out of both the lines and the
    /// subtotal.
    pub fn build<I, K>(venue: &Venue, ids: I, max: usize) -> Self
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let mut lines = Vec::new();
        let mut count = 0;
        for id in ids {
            count += 1;
            if let Some(seat) = venue.find(id.as_ref()) {
                lines.push(SummaryLine::from_seat(seat));
            }
        }
        let subtotal = lines.iter().map(|line| line.price).sum();
        Self {
            lines,
            subtotal,
            count,
            max,
        }
    }

    /// Returns `true` while another seat can be added.
    #[must_use]
    pub fn can_add_more(&self) -> bool {
        self.count < self.max
    }

    /// Header text, e.g. `3 / 8 seats`.
    #[must_use]
    pub fn headline(&self) -> String {
        format!("{} / {} seats", self.count, self.max)
    }
}

/// Details for a single focused seat.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeatDetails {
    /// Seat identifier.
    pub id: SeatId,
    /// Owning section's display label.
    pub section_label: String,
    /// Row index.
    pub row: u32,
    /// Column number.
    pub col: u32,
    /// Price tier display label.
    pub tier_label: &'static str,
    /// Price in whole currency units.
    pub price: u32,
    /// Load-time status.
    pub status: SeatStatus,
    /// Capitalized status, e.g. `Available`.
    pub status_label: &'static str,
}

impl SeatDetails {
    /// Details for `seat`.
    #[must_use]
    pub fn of(seat: SeatRef<'_>) -> Self {
        let tier = seat.seat.price_tier;
        Self {
            id: seat.seat.id.clone(),
            section_label: seat.section.label.clone(),
            row: seat.row.index,
            col: seat.seat.col,
            tier_label: tier.label(),
            price: tier.price(),
            status: seat.seat.status,
            status_label: seat.seat.status.display_name(),
        }
    }
}

/// Live-region text for the current selection size.
///
/// Empty when nothing is selected.
#[must_use]
pub fn announcement(count: usize) -> String {
    match count {
        0 => String::new(),
        1 => "1 seat selected".to_owned(),
        n => format!("{n} seats selected"),
    }
}

#[cfg(test)]
mod tests {
    use super::announcement;

    #[test]
    fn announcement_pluralizes() {
        assert_eq!(announcement(0), "");
        assert_eq!(announcement(1), "1 seat selected");
        assert_eq!(announcement(8), "8 seats selected");
    }
}
