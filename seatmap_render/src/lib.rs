// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=seatmap_render --heading-base-level=0

//! Seatmap Render: what a renderer needs to know about each seat.
//!
//! This crate is pure: it turns venue data plus selection state into plain
//! values and never draws anything itself.
//!
//! - [`describe`] maps a seat and its selection flag to a
//!   [`SeatRenderItem`]: fill color from [`palette`], interactivity,
//!   marker geometry, an outline for selected seats, and a deterministic
//!   accessible label.
//! - [`SelectionSummary`] resolves the selected ids against the venue and
//!   sums their prices. Ids that do not resolve are dropped silently.
//! - [`SeatDetails`] and [`announcement`] back the detail panel and the
//!   live region.
//!
//! ## Example
//!
//! ```rust
//! use seatmap_render::{SelectionSummary, announcement, describe};
//! use seatmap_venue::Venue;
//!
//! let venue = Venue::from_json(r#"{
//!   "venueId": "v", "name": "Club", "map": { "width": 500, "height": 500 },
//!   "sections": [{ "id": "S", "label": "Stage", "rows": [{ "index": 1, "seats": [
//!     { "id": "S-1-01", "col": 1, "x": 10, "y": 10, "priceTier": 1, "status": "available" },
//!     { "id": "S-1-02", "col": 2, "x": 26, "y": 10, "priceTier": 4, "status": "sold" }
//!   ] }] }]
//! }"#).unwrap();
//!
//! let sold = venue.find("S-1-02").unwrap();
//! let item = describe(sold, false);
//! assert!(!item.interactive);
//! assert_eq!(item.accessible_label, "Section Stage, Row 1, Seat 2, sold");
//!
//! let summary = SelectionSummary::build(&venue, ["S-1-01", "gone"], 8);
//! assert_eq!(summary.subtotal, 150);
//! assert_eq!(summary.lines.len(), 1);
//! assert_eq!(announcement(summary.count), "2 seats selected");
//! ```

mod item;
pub mod palette;
mod summary;

pub use item::{
    OUTLINE_WIDTH, Outline, SEAT_RADIUS, SeatRenderItem, accessible_label, describe, is_interactive,
};
pub use summary::{SeatDetails, SelectionSummary, SummaryLine, announcement};
