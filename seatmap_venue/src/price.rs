// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Static price table keyed by [`PriceTier`].

use serde::{Deserialize, Serialize};

/// One of the four price/quality classes assigned to a seat at load time.
///
/// On the wire a tier is the integer `1..=4`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PriceTier {
    /// Tier 1.
    Vip = 1,
    /// Tier 2.
    Premium = 2,
    /// Tier 3.
    Standard = 3,
    /// Tier 4.
    Economy = 4,
}

/// A row of the price table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TierInfo {
    /// The tier this row describes.
    pub tier: PriceTier,
    /// Price in whole currency units.
    pub price: u32,
    /// Display label.
    pub label: &'static str,
}

/// The price table, ordered by tier number.
pub const PRICE_TABLE: [TierInfo; 4] = [
    TierInfo {
        tier: PriceTier::Vip,
        price: 150,
        label: "VIP",
    },
    TierInfo {
        tier: PriceTier::Premium,
        price: 100,
        label: "Premium",
    },
    TierInfo {
        tier: PriceTier::Standard,
        price: 75,
        label: "Standard",
    },
    TierInfo {
        tier: PriceTier::Economy,
        price: 50,
        label: "Economy",
    },
];

impl PriceTier {
    /// All tiers in ascending tier-number order.
    pub const ALL: [Self; 4] = [Self::Vip, Self::Premium, Self::Standard, Self::Economy];

    /// Returns the wire number of this tier (`1..=4`).
    #[must_use]
    pub const fn number(self) -> u8 {
        self as u8
    }

    /// Returns the price table entry for this tier.
    #[must_use]
    pub const fn info(self) -> TierInfo {
        PRICE_TABLE[self as usize - 1]
    }

    /// Returns the price of this tier in whole currency units.
    #[must_use]
    pub const fn price(self) -> u32 {
        self.info().price
    }

    /// Returns the display label of this tier.
    #[must_use]
    pub const fn label(self) -> &'static str {
        self.info().label
    }
}

/// A tier number outside `1..=4`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown price tier {0}, expected 1..=4")]
pub struct UnknownTier(pub u8);

impl TryFrom<u8> for PriceTier {
    type Error = UnknownTier;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Vip),
            2 => Ok(Self::Premium),
            3 => Ok(Self::Standard),
            4 => Ok(Self::Economy),
            other => Err(UnknownTier(other)),
        }
    }
}

impl From<PriceTier> for u8 {
    fn from(tier: PriceTier) -> Self {
        tier.number()
    }
}
