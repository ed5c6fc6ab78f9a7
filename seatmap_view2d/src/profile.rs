// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Interaction profile of the device driving the viewport.
///
/// The profile only selects the culling padding; pan and zoom math is the
/// same for both. Touch input typically arrives with more latency, so its
/// padding is wider to keep seats from popping in at the window edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum InputProfile {
    /// Mouse or trackpad: wheel zoom and drag pan.
    #[default]
    Pointer,
    /// Touch screen: one-finger pan and two-finger pinch.
    Touch,
}

impl InputProfile {
    /// Default culling padding in venue units for this profile.
    #[must_use]
    pub const fn default_padding(self) -> f64 {
        match self {
            Self::Pointer => 100.0,
            Self::Touch => 200.0,
        }
    }
}

/// Accepted range for the window width.
///
/// The window keeps the aspect ratio it was created with, so the height
/// bound follows from the width bound. Zoom requests whose resulting width
/// falls outside `[min_width, max_width]` are rejected as a whole; the
/// window is never clamped onto the boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomLimits {
    /// Narrowest allowed window (most zoomed in).
    pub min_width: f64,
    /// Widest allowed window (most zoomed out).
    pub max_width: f64,
}

impl ZoomLimits {
    /// Smallest window width, in venue units, for the default limits.
    pub const DEFAULT_MIN_EXTENT: f64 = 400.0;
    /// Widest window as a multiple of the map width, for the default limits.
    pub const DEFAULT_MAX_FACTOR: f64 = 2.0;

    /// Limits for a map of the given width: `[min_extent, max_factor * map_width]`.
    ///
    /// The result always admits the full-map window: the minimum drops to the
    /// map width when the map is narrower than `min_extent`, and the maximum
    /// rises to it when `max_factor` is below 1.
    #[must_use]
    pub fn for_map(map_width: f64, min_extent: f64, max_factor: f64) -> Self {
        Self {
            min_width: min_extent,
            max_width: map_width * max_factor,
        }
        .covering(map_width)
    }

    /// Widens the range just enough to include `width`.
    #[must_use]
    pub fn covering(self, width: f64) -> Self {
        Self {
            min_width: self.min_width.min(width),
            max_width: self.max_width.max(width),
        }
    }

    /// Returns `true` if a window of `width` is allowed.
    #[must_use]
    pub fn allows(&self, width: f64) -> bool {
        width >= self.min_width && width <= self.max_width
    }
}
