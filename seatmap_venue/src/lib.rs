// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Seatmap Venue: the read-only venue dataset behind a seat map.
//!
//! A [`Venue`] is a static hierarchy of [`Section`]s, [`Row`]s, and
//! [`Seat`]s. Every seat carries a venue-space position, a [`PriceTier`],
//! and a load-time [`SeatStatus`]. The venue is built once, either from its
//! JSON payload through a [`VenueSource`] or programmatically, and is never
//! mutated afterwards. Selection is tracked elsewhere as an overlay.
//!
//! The crate also holds the static price table ([`PRICE_TABLE`]), since
//! prices are a pure function of a seat's tier.
//!
//! ## Minimal example
//!
//! ```rust
//! use seatmap_venue::{PriceTier, SeatStatus, StaticSource, VenueSource};
//!
//! let payload = r#"{
//!   "venueId": "hall", "name": "Hall", "map": { "width": 600, "height": 400 },
//!   "sections": [{ "id": "A", "label": "Section A", "rows": [
//!     { "index": 1, "seats": [
//!       { "id": "A-1-01", "col": 1, "x": 10, "y": 10, "priceTier": 2, "status": "available" }
//!     ] }
//!   ] }]
//! }"#;
//!
//! let venue = StaticSource::new(payload).fetch().unwrap();
//! let seat = venue.find("A-1-01").unwrap();
//! assert_eq!(seat.seat.status, SeatStatus::Available);
//! assert_eq!(seat.seat.price_tier, PriceTier::Premium);
//! assert_eq!(seat.seat.price_tier.price(), 100);
//! ```
//!
//! ## Features
//!
//! - `synthetic` (default): [`synthetic`] generator for the reference arena.
//! - `http`: `HttpSource`, a blocking HTTP venue source.

mod error;
mod model;
mod price;
mod source;

#[cfg(feature = "synthetic")]
pub mod synthetic;

pub use error::LoadError;
pub use model::{
    MapExtent, Row, Seat, SeatId, SeatLocation, SeatRef, SeatStatus, Section, SectionTransform,
    Venue,
};
pub use price::{PRICE_TABLE, PriceTier, TierInfo, UnknownTier};
#[cfg(feature = "http")]
pub use source::HttpSource;
pub use source::{JsonFileSource, StaticSource, VenueSource};
