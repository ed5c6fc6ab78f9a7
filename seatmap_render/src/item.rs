// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Circle, Point};
use peniko::Color;
use seatmap_venue::{SeatId, SeatRef, SeatStatus};

use crate::palette;

/// Radius of a seat marker in venue units.
pub const SEAT_RADIUS: f64 = 5.0;

/// Stroke width of the selection outline in venue units.
pub const OUTLINE_WIDTH: f64 = 2.0;

/// Stroke drawn around a seat marker.
#[derive(Clone, Copy, Debug)]
pub struct Outline {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in venue units.
    pub width: f64,
}

/// Everything a renderer needs to draw and expose one seat.
#[derive(Clone, Debug)]
pub struct SeatRenderItem {
    /// Seat identifier.
    pub id: SeatId,
    /// Marker center in venue units.
    pub position: Point,
    /// Marker radius in venue units.
    pub radius: f64,
    /// Fill color.
    pub color: Color,
    /// Selection outline; `None` for unselected seats.
    pub outline: Option<Outline>,
    /// Whether activating the seat should toggle it.
    pub interactive: bool,
    /// Whether the seat is currently selected.
    pub selected: bool,
    /// Screen reader label.
    pub accessible_label: String,
}

impl SeatRenderItem {
    /// The marker as a circle.
    #[must_use]
    pub fn circle(&self) -> Circle {
        Circle::new(self.position, self.radius)
    }
}

/// Returns `true` if a seat may be toggled: it is available, or it is
/// already selected and may always be toggled off.
#[must_use]
pub fn is_interactive(status: SeatStatus, is_selected: bool) -> bool {
    status == SeatStatus::Available || is_selected
}

/// Builds the screen reader label for a seat.
///
/// The format is `Section <label>, Row <row>, Seat <col>, <status>` with
/// `, selected` appended for selected seats. The output depends only on
/// the inputs.
#[must_use]
pub fn accessible_label(seat: SeatRef<'_>, is_selected: bool) -> String {
    let mut label = format!(
        "Section {}, Row {}, Seat {}, {}",
        seat.section.label,
        seat.row.index,
        seat.seat.col,
        seat.seat.status.as_str()
    );
    if is_selected {
        label.push_str(", selected");
    }
    label
}

/// Maps a seat and its selection state to its render attributes.
#[must_use]
pub fn describe(seat: SeatRef<'_>, is_selected: bool) -> SeatRenderItem {
    let status = seat.seat.status;
    SeatRenderItem {
        id: seat.seat.id.clone(),
        position: seat.position(),
        radius: SEAT_RADIUS,
        color: palette::seat_color(status, is_selected),
        outline: is_selected.then_some(Outline {
            color: palette::SELECTED_OUTLINE,
            width: OUTLINE_WIDTH,
        }),
        interactive: is_interactive(status, is_selected),
        selected: is_selected,
        accessible_label: accessible_label(seat, is_selected),
    }
}
