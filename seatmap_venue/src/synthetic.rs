// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Seeded generator for the reference arena layout.
//!
//! The arena has ten rectangular sections laid out on a 1400x2600 map with
//! 15 000+ seats in total. Seat statuses are drawn with a fixed
//! distribution (70% available, 15% reserved, 10% sold, 5% held), so a given
//! seed always produces the same venue.
//!
//! ```rust
//! use seatmap_venue::synthetic;
//!
//! let venue = synthetic::metropolis_arena(7).unwrap();
//! assert_eq!(venue.sections().len(), 10);
//! assert!(venue.seat_count() > 15_000);
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{MapExtent, PriceTier, Row, Seat, SeatId, SeatStatus, Section, SectionTransform, Venue};

/// Horizontal distance between neighbouring seats.
pub const SEAT_SPACING: f64 = 16.0;
/// Vertical distance between neighbouring rows.
pub const ROW_SPACING: f64 = 20.0;

/// A rectangular block of seats to generate.
#[derive(Clone, Copy, Debug)]
pub struct SectionPlan {
    /// Section identifier, also the seat id prefix.
    pub id: &'static str,
    /// Display label.
    pub label: &'static str,
    /// Index of the first row.
    pub first_row: u32,
    /// Number of rows.
    pub rows: u32,
    /// Seats per row.
    pub seats_per_row: u32,
    /// Position of the first seat of the first row.
    pub origin: (f64, f64),
    /// Tier shared by every seat in the section.
    pub tier: PriceTier,
}

/// Section plan of the reference arena.
pub const ARENA_PLAN: [SectionPlan; 10] = [
    plan("VIP", "VIP Section", 20, 60, (400.0, 50.0), PriceTier::Vip),
    plan("LB-A", "Lower Bowl A", 35, 50, (50.0, 250.0), PriceTier::Premium),
    plan("LB-B", "Lower Bowl B", 35, 50, (700.0, 250.0), PriceTier::Premium),
    plan("LB-C", "Lower Bowl C", 25, 45, (50.0, 750.0), PriceTier::Standard),
    plan("LB-D", "Lower Bowl D", 25, 45, (700.0, 750.0), PriceTier::Standard),
    plan("UB-A", "Upper Bowl A", 35, 55, (50.0, 1200.0), PriceTier::Economy),
    plan("UB-B", "Upper Bowl B", 35, 55, (700.0, 1200.0), PriceTier::Economy),
    plan("UB-C", "Upper Bowl C", 30, 50, (50.0, 1800.0), PriceTier::Economy),
    plan("UB-D", "Upper Bowl D", 30, 50, (700.0, 1800.0), PriceTier::Economy),
    plan("BAL", "Balcony", 25, 50, (400.0, 2200.0), PriceTier::Economy),
];

const fn plan(
    id: &'static str,
    label: &'static str,
    rows: u32,
    seats_per_row: u32,
    origin: (f64, f64),
    tier: PriceTier,
) -> SectionPlan {
    SectionPlan {
        id,
        label,
        first_row: 1,
        rows,
        seats_per_row,
        origin,
        tier,
    }
}

/// Generates the reference arena.
pub fn metropolis_arena(seed: u64) -> Result<Venue, crate::LoadError> {
    generate(
        "arena-01",
        "Metropolis Arena",
        MapExtent {
            width: 1400.0,
            height: 2600.0,
        },
        &ARENA_PLAN,
        seed,
    )
}

/// Generates a venue from an arbitrary section plan.
pub fn generate(
    venue_id: &str,
    name: &str,
    map: MapExtent,
    plans: &[SectionPlan],
    seed: u64,
) -> Result<Venue, crate::LoadError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let sections = plans
        .iter()
        .map(|plan| Section {
            id: plan.id.to_owned(),
            label: plan.label.to_owned(),
            transform: SectionTransform::default(),
            rows: generate_rows(plan, &mut rng),
        })
        .collect();
    Venue::new(venue_id, name, map, sections)
}

fn generate_rows(plan: &SectionPlan, rng: &mut StdRng) -> Vec<Row> {
    (0..plan.rows)
        .map(|offset| {
            let index = plan.first_row + offset;
            let y = plan.origin.1 + f64::from(offset) * ROW_SPACING;
            let seats = (1..=plan.seats_per_row)
                .map(|col| Seat {
                    id: SeatId::derive(plan.id, index, col),
                    col,
                    x: plan.origin.0 + f64::from(col - 1) * SEAT_SPACING,
                    y,
                    price_tier: plan.tier,
                    status: random_status(rng),
                })
                .collect();
            Row { index, seats }
        })
        .collect()
}

fn random_status(rng: &mut StdRng) -> SeatStatus {
    let roll: f64 = rng.random();
    if roll < 0.70 {
        SeatStatus::Available
    } else if roll < 0.85 {
        SeatStatus::Reserved
    } else if roll < 0.95 {
        SeatStatus::Sold
    } else {
        SeatStatus::Held
    }
}
