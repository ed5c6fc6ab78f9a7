// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed seat colors.

use peniko::Color;
use seatmap_venue::SeatStatus;

/// Fill for available seats (`#22c55e`).
pub const AVAILABLE: Color = Color::from_rgb8(0x22, 0xc5, 0x5e);
/// Fill for reserved seats (`#f97316`).
pub const RESERVED: Color = Color::from_rgb8(0xf9, 0x73, 0x16);
/// Fill for sold seats (`#6b7280`).
pub const SOLD: Color = Color::from_rgb8(0x6b, 0x72, 0x80);
/// Fill for held seats (`#eab308`).
pub const HELD: Color = Color::from_rgb8(0xea, 0xb3, 0x08);
/// Fill for selected seats, whatever their status (`#3b82f6`).
pub const SELECTED: Color = Color::from_rgb8(0x3b, 0x82, 0xf6);
/// Outline drawn around selected seats (`#1e40af`).
pub const SELECTED_OUTLINE: Color = Color::from_rgb8(0x1e, 0x40, 0xaf);

/// Fill for an unselected seat with the given status.
#[must_use]
pub const fn status_color(status: SeatStatus) -> Color {
    match status {
        SeatStatus::Available => AVAILABLE,
        SeatStatus::Reserved => RESERVED,
        SeatStatus::Sold => SOLD,
        SeatStatus::Held => HELD,
    }
}

/// Fill for a seat, taking selection into account.
#[must_use]
pub const fn seat_color(status: SeatStatus, is_selected: bool) -> Color {
    if is_selected {
        SELECTED
    } else {
        status_color(status)
    }
}
