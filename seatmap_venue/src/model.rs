// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Venue, section, row, and seat types.

use core::borrow::Borrow;
use core::fmt;

use hashbrown::HashMap;
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

use crate::error::LoadError;
use crate::price::PriceTier;

/// Identifier of a seat, unique across the whole venue.
///
/// Identifiers are derived from section id, row index, and column, for
/// example `VIP-3-07`. The derivation is only a convention of the data
/// source; the model treats ids as opaque strings.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeatId(String);

impl SeatId {
    /// Wraps an existing identifier string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Builds the conventional `<section>-<row>-<col:02>` identifier.
    #[must_use]
    pub fn derive(section_id: &str, row: u32, col: u32) -> Self {
        Self(format!("{section_id}-{row}-{col:02}"))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SeatId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for SeatId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for SeatId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for SeatId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl From<String> for SeatId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for SeatId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<SeatId> for String {
    fn from(id: SeatId) -> Self {
        id.0
    }
}

/// Load-time status of a seat. Never mutated by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatStatus {
    /// Open for selection.
    Available,
    /// Reserved by someone else.
    Reserved,
    /// Already sold.
    Sold,
    /// Held back from sale.
    Held,
}

impl SeatStatus {
    /// All statuses, in legend order.
    pub const ALL: [Self; 4] = [Self::Available, Self::Reserved, Self::Sold, Self::Held];

    /// Lowercase wire name, e.g. `"available"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Reserved => "reserved",
            Self::Sold => "sold",
            Self::Held => "held",
        }
    }

    /// Capitalized name for detail panels, e.g. `"Available"`.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Reserved => "Reserved",
            Self::Sold => "Sold",
            Self::Held => "Held",
        }
    }
}

impl fmt::Display for SeatStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single seat.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seat {
    /// Venue-unique identifier.
    pub id: SeatId,
    /// Column number within the row.
    pub col: u32,
    /// X position in venue units.
    pub x: f64,
    /// Y position in venue units.
    pub y: f64,
    /// Price tier.
    pub price_tier: PriceTier,
    /// Load-time status.
    pub status: SeatStatus,
}

impl Seat {
    /// Position in venue space.
    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A row of seats inside a section.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Row {
    /// 1-based row index; not necessarily contiguous within a section.
    pub index: u32,
    /// Seats in left-to-right order.
    pub seats: Vec<Seat>,
}

/// Placement transform carried by each section in the payload.
///
/// Seat coordinates are already absolute; the transform is retained for
/// renderers that draw section decorations.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SectionTransform {
    /// Horizontal offset.
    pub x: f64,
    /// Vertical offset.
    pub y: f64,
    /// Uniform scale.
    pub scale: f64,
}

impl Default for SectionTransform {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
        }
    }
}

/// A spatially contiguous block of rows.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Section identifier, e.g. `LB-A`.
    pub id: String,
    /// Display label, e.g. `Lower Bowl A`.
    pub label: String,
    /// Decoration transform.
    #[serde(default)]
    pub transform: SectionTransform,
    /// Rows in payload order.
    pub rows: Vec<Row>,
}

impl Section {
    /// Anchor for the section caption: just above and left of the first seat.
    ///
    /// Returns `None` for a section with no seats.
    #[must_use]
    pub fn label_anchor(&self) -> Option<Point> {
        let first = self.rows.first()?.seats.first()?;
        Some(Point::new(first.x - 20.0, first.y - 15.0))
    }

    /// Number of seats in this section.
    #[must_use]
    pub fn seat_count(&self) -> usize {
        self.rows.iter().map(|row| row.seats.len()).sum()
    }
}

/// Size of the venue map in venue units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapExtent {
    /// Map width.
    pub width: f64,
    /// Map height.
    pub height: f64,
}

impl MapExtent {
    /// The extent as a [`Size`].
    #[must_use]
    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Position of a seat inside the section/row hierarchy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SeatLocation {
    /// Index into [`Venue::sections`].
    pub section: usize,
    /// Index into [`Section::rows`].
    pub row: usize,
    /// Index into [`Row::seats`].
    pub seat: usize,
}

/// A borrowed seat together with its owning section and row.
#[derive(Clone, Copy, Debug)]
pub struct SeatRef<'a> {
    /// Owning section.
    pub section: &'a Section,
    /// Owning row.
    pub row: &'a Row,
    /// The seat.
    pub seat: &'a Seat,
}

impl SeatRef<'_> {
    /// Shorthand for `self.seat.position()`.
    #[must_use]
    pub fn position(&self) -> Point {
        self.seat.position()
    }
}

/// The complete, read-only venue dataset.
///
/// A `Venue` is immutable once built. Construction indexes every seat by id
/// so lookups in [`Venue::find`] are constant time, and records a flat
/// traversal order so seats can be addressed by slot number
/// ([`Venue::seat_at`]) for spatial index backends.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "VenueData", into = "VenueData")]
pub struct Venue {
    venue_id: String,
    name: String,
    map: MapExtent,
    sections: Vec<Section>,
    slots: Vec<SeatLocation>,
    by_id: HashMap<SeatId, usize>,
}

impl Venue {
    /// Builds a venue, validating the map extent and indexing its seats.
    ///
    /// Duplicate seat ids are accepted; lookups resolve to the first
    /// occurrence in traversal order.
    pub fn new(
        venue_id: impl Into<String>,
        name: impl Into<String>,
        map: MapExtent,
        sections: Vec<Section>,
    ) -> Result<Self, LoadError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(map.width) || !valid(map.height) {
            return Err(LoadError::InvalidExtent {
                width: map.width,
                height: map.height,
            });
        }

        let mut slots = Vec::new();
        let mut by_id = HashMap::new();
        for (si, section) in sections.iter().enumerate() {
            for (ri, row) in section.rows.iter().enumerate() {
                for (ci, seat) in row.seats.iter().enumerate() {
                    by_id.entry(seat.id.clone()).or_insert(slots.len());
                    slots.push(SeatLocation {
                        section: si,
                        row: ri,
                        seat: ci,
                    });
                }
            }
        }

        Ok(Self {
            venue_id: venue_id.into(),
            name: name.into(),
            map,
            sections,
            slots,
            by_id,
        })
    }

    /// Parses a venue from its JSON payload.
    pub fn from_json(payload: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(payload)?)
    }

    /// Serializes the venue back to its JSON payload.
    pub fn to_json_pretty(&self) -> Result<String, LoadError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Venue identifier.
    #[must_use]
    pub fn venue_id(&self) -> &str {
        &self.venue_id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Map extent in venue units.
    #[must_use]
    pub fn map(&self) -> MapExtent {
        self.map
    }

    /// Sections in payload order.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Total number of seats.
    #[must_use]
    pub fn seat_count(&self) -> usize {
        self.slots.len()
    }

    /// Iterates every seat in traversal order (section, row, seat).
    pub fn seats(&self) -> impl ExactSizeIterator<Item = SeatRef<'_>> + Clone + '_ {
        self.slots.iter().map(|loc| self.resolve(*loc))
    }

    /// Returns the seat at `slot` in traversal order.
    #[must_use]
    pub fn seat_at(&self, slot: usize) -> Option<SeatRef<'_>> {
        self.slots.get(slot).map(|loc| self.resolve(*loc))
    }

    /// Returns the traversal slot of the seat with the given id.
    #[must_use]
    pub fn slot_of(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    /// Returns the hierarchy location of the seat with the given id.
    #[must_use]
    pub fn locate(&self, id: &str) -> Option<SeatLocation> {
        self.slot_of(id).map(|slot| self.slots[slot])
    }

    /// Looks up a seat by id.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<SeatRef<'_>> {
        self.slot_of(id).and_then(|slot| self.seat_at(slot))
    }

    fn resolve(&self, loc: SeatLocation) -> SeatRef<'_> {
        let section = &self.sections[loc.section];
        let row = &section.rows[loc.row];
        SeatRef {
            section,
            row,
            seat: &row.seats[loc.seat],
        }
    }
}

/// Wire shape of the venue payload.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VenueData {
    venue_id: String,
    name: String,
    map: MapExtent,
    sections: Vec<Section>,
}

impl TryFrom<VenueData> for Venue {
    type Error = LoadError;

    fn try_from(data: VenueData) -> Result<Self, Self::Error> {
        Self::new(data.venue_id, data.name, data.map, data.sections)
    }
}

impl From<Venue> for VenueData {
    fn from(venue: Venue) -> Self {
        Self {
            venue_id: venue.venue_id,
            name: venue.name,
            map: venue.map,
            sections: venue.sections,
        }
    }
}
