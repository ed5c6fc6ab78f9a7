// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use kurbo::{Point, Rect, Size, Vec2};

use crate::anchor::PanAnchor;
use crate::cull::{CullBackend, contains_inclusive, padded};
use crate::profile::ZoomLimits;

/// A rectangular window into venue space, driven by pan, zoom, and pinch gestures.
///
/// The controller owns three pieces of state:
/// - The **window**: the venue-space rectangle currently rendered. It starts
///   as the full map extent and keeps that aspect ratio for its whole life.
/// - The **surface** size: the pixel size of the rendering surface, used to
///   convert pointer positions and pixel deltas into venue units.
/// - **Gesture** state: the pan anchor and the pinch baseline distance.
///
/// Every operation is total. Invalid input (non-finite coordinates,
/// non-positive factors or distances) and zoom requests that would leave
/// [`ZoomLimits`] are rejected and return `false`, leaving the window as it
/// was. No operation can produce a window with a non-positive or
/// out-of-range width.
#[derive(Clone, Debug)]
pub struct ViewportController {
    map: Size,
    surface: Size,
    window: Rect,
    limits: ZoomLimits,
    pinch_damping: f64,
    anchor: PanAnchor,
    pinch_baseline: Option<f64>,
}

impl ViewportController {
    /// Damping applied to pinch zoom factors by default.
    pub const DEFAULT_PINCH_DAMPING: f64 = 0.8;

    /// Creates a controller whose window covers the whole `map`.
    ///
    /// Zoom limits default to
    /// `[ZoomLimits::DEFAULT_MIN_EXTENT, ZoomLimits::DEFAULT_MAX_FACTOR * map.width]`.
    /// The `surface` may be zero until the rendering layer is laid out; pan
    /// and pixel-anchored zoom are no-ops until it is set to a positive size.
    #[must_use]
    pub fn new(map: Size, surface: Size) -> Self {
        let limits = ZoomLimits::for_map(
            map.width,
            ZoomLimits::DEFAULT_MIN_EXTENT,
            ZoomLimits::DEFAULT_MAX_FACTOR,
        );
        Self {
            map,
            surface,
            window: Rect::from_origin_size(Point::ORIGIN, map),
            limits,
            pinch_damping: Self::DEFAULT_PINCH_DAMPING,
            anchor: PanAnchor::default(),
            pinch_baseline: None,
        }
    }

    /// Returns the current window in venue coordinates.
    #[must_use]
    pub fn window(&self) -> Rect {
        self.window
    }

    /// Returns the map extent the controller was created for.
    #[must_use]
    pub fn map_size(&self) -> Size {
        self.map
    }

    /// Returns the rendering surface size in pixels.
    #[must_use]
    pub fn surface_size(&self) -> Size {
        self.surface
    }

    /// Sets the rendering surface size in pixels.
    ///
    /// Sizes that are not finite and positive are ignored. The window is not
    /// affected; only the pixel-to-venue conversion changes.
    pub fn set_surface_size(&mut self, size: Size) -> bool {
        if !(size.is_finite() && size.width > 0.0 && size.height > 0.0) {
            return false;
        }
        self.surface = size;
        true
    }

    /// Returns the active zoom limits.
    #[must_use]
    pub fn zoom_limits(&self) -> ZoomLimits {
        self.limits
    }

    /// Replaces the zoom limits.
    ///
    /// The limits are widened to include the map width. If the current window
    /// no longer fits, it is reset to the full map.
    pub fn set_zoom_limits(&mut self, limits: ZoomLimits) {
        self.limits = limits.covering(self.map.width);
        if !self.limits.allows(self.window.width()) {
            self.window = Rect::from_origin_size(Point::ORIGIN, self.map);
        }
    }

    /// Returns the pinch damping coefficient.
    #[must_use]
    pub fn pinch_damping(&self) -> f64 {
        self.pinch_damping
    }

    /// Sets the pinch damping coefficient. Non-finite or non-positive values are ignored.
    pub fn set_pinch_damping(&mut self, damping: f64) {
        if damping.is_finite() && damping > 0.0 {
            self.pinch_damping = damping;
        }
    }

    /// Resets the window to the full map and drops any gesture in progress.
    pub fn reset(&mut self) {
        self.window = Rect::from_origin_size(Point::ORIGIN, self.map);
        self.end_pan();
    }

    /// Scales the window by `factor` around a fixed point.
    ///
    /// `factor < 1` zooms in, `factor > 1` zooms out. `origin` is a position
    /// on the rendering surface expressed as fractions of its size (`0` at the
    /// left/top edge, `1` at the right/bottom edge) and defaults to the
    /// center. The venue point under that position stays put:
    ///
    /// ```text
    /// new_x = old_x + (old_width  - new_width)  * origin.x
    /// new_y = old_y + (old_height - new_height) * origin.y
    /// ```
    ///
    /// If the new width is outside the zoom limits the whole request is
    /// discarded and `false` is returned.
    pub fn apply_zoom(&mut self, factor: f64, origin: Option<Point>) -> bool {
        if !(factor.is_finite() && factor > 0.0) {
            return false;
        }
        let ratio = origin.unwrap_or(Point::new(0.5, 0.5));
        if !ratio.is_finite() {
            return false;
        }

        let old = self.window;
        let width = old.width() * factor;
        if !self.limits.allows(width) {
            return false;
        }
        let height = old.height() * factor;
        let x = old.x0 + (old.width() - width) * ratio.x;
        let y = old.y0 + (old.height() - height) * ratio.y;
        self.window = Rect::from_origin_size((x, y), (width, height));
        true
    }

    /// Zooms by `factor` keeping the venue point under `view_pt` (pixels) fixed.
    ///
    /// Falls back to the window center when the surface size is unknown.
    pub fn zoom_at_view_point(&mut self, factor: f64, view_pt: Point) -> bool {
        if !view_pt.is_finite() {
            return false;
        }
        let origin = self.view_ratio(view_pt);
        self.apply_zoom(factor, origin)
    }

    /// Starts a pan gesture with the pointer at `pos` (pixels).
    pub fn begin_pan(&mut self, pos: Point) -> bool {
        self.anchor.begin(pos)
    }

    /// Continues a pan gesture with the pointer now at `pos` (pixels).
    ///
    /// The window moves opposite to the pointer so that content follows it.
    /// No-op unless a pan is active.
    pub fn continue_pan(&mut self, pos: Point) -> bool {
        match self.anchor.advance(pos) {
            Some(delta) => self.pan_by_view(delta),
            None => false,
        }
    }

    /// Ends the pan gesture and drops any pinch baseline.
    pub fn end_pan(&mut self) {
        self.anchor.clear();
        self.pinch_baseline = None;
    }

    /// Cancels whatever gesture is in progress.
    ///
    /// Call this when the pointer leaves the surface or the platform cancels
    /// a touch sequence. It performs the same reset as [`Self::end_pan`], so
    /// the next move event cannot jump from a stale anchor.
    pub fn cancel_gesture(&mut self) {
        self.end_pan();
    }

    /// Moves the window by a pixel delta, as a drag of `delta` would.
    ///
    /// `venue_dx = delta.x * window_width / surface_width`, likewise for y,
    /// and the window origin moves by minus that amount.
    pub fn pan_by_view(&mut self, delta: Vec2) -> bool {
        if !delta.is_finite() || !self.has_surface() {
            return false;
        }
        let dx = delta.x * self.window.width() / self.surface.width;
        let dy = delta.y * self.window.height() / self.surface.height;
        self.window = self.window - Vec2::new(dx, dy);
        true
    }

    /// Starts tracking a two-finger pinch with the fingers `distance` pixels apart.
    pub fn begin_pinch(&mut self, distance: f64) -> bool {
        if !(distance.is_finite() && distance > 0.0) {
            return false;
        }
        self.pinch_baseline = Some(distance);
        true
    }

    /// Updates a pinch with the fingers now `distance` pixels apart.
    ///
    /// Computes `raw = baseline / distance` (fingers apart means zoom in),
    /// damps it to `1 + (raw - 1) * damping`, applies it with
    /// [`Self::apply_zoom`] at `origin`, and then makes `distance` the new
    /// baseline whether or not the zoom was accepted. Tracking is therefore
    /// incremental, not cumulative.
    ///
    /// Without a baseline the update only records one.
    pub fn continue_pinch(&mut self, distance: f64, origin: Option<Point>) -> bool {
        if !(distance.is_finite() && distance > 0.0) {
            return false;
        }
        let Some(baseline) = self.pinch_baseline.replace(distance) else {
            return false;
        };
        let raw = baseline / distance;
        let damped = 1.0 + (raw - 1.0) * self.pinch_damping;
        self.apply_zoom(damped, origin)
    }

    /// Returns `true` while a pan is active.
    #[must_use]
    pub fn is_panning(&self) -> bool {
        self.anchor.is_active()
    }

    /// Returns `true` while a pinch baseline is held.
    #[must_use]
    pub fn is_pinching(&self) -> bool {
        self.pinch_baseline.is_some()
    }

    /// Returns `true` while any gesture is in progress.
    #[must_use]
    pub fn is_gesture_active(&self) -> bool {
        self.is_panning() || self.is_pinching()
    }

    /// The window grown by `padding` on every side.
    #[must_use]
    pub fn culling_rect(&self, padding: f64) -> Rect {
        padded(self.window, padding)
    }

    /// Returns every item whose position lies inside the padded window.
    ///
    /// This is a single linear pass; the only allocation is the result.
    pub fn visible_seats<I, T, F>(&self, items: I, padding: f64, position: F) -> Vec<T>
    where
        I: IntoIterator<Item = T>,
        F: FnMut(&T) -> Point,
    {
        let mut out = Vec::new();
        self.visible_into(items, padding, position, &mut out);
        out
    }

    /// Like [`Self::visible_seats`], writing into a reusable buffer.
    ///
    /// `out` is cleared first.
    pub fn visible_into<I, T, F>(&self, items: I, padding: f64, mut position: F, out: &mut Vec<T>)
    where
        I: IntoIterator<Item = T>,
        F: FnMut(&T) -> Point,
    {
        out.clear();
        let rect = self.culling_rect(padding);
        out.extend(
            items
                .into_iter()
                .filter(|item| contains_inclusive(rect, position(item))),
        );
    }

    /// Writes the slots visible through the padded window into `out`, in
    /// ascending order, using a precomputed backend.
    pub fn visible_slots<B: CullBackend>(&self, backend: &B, padding: f64, out: &mut Vec<usize>) {
        out.clear();
        backend.query_rect(self.culling_rect(padding), out);
    }

    /// Converts a surface position in pixels into fractions of the surface size.
    ///
    /// Returns `None` if the surface size is unknown or `view_pt` is not finite.
    #[must_use]
    pub fn view_ratio(&self, view_pt: Point) -> Option<Point> {
        if !self.has_surface() || !view_pt.is_finite() {
            return None;
        }
        Some(Point::new(
            view_pt.x / self.surface.width,
            view_pt.y / self.surface.height,
        ))
    }

    /// Converts a surface position in pixels into venue coordinates.
    #[must_use]
    pub fn view_to_world_point(&self, view_pt: Point) -> Option<Point> {
        let ratio = self.view_ratio(view_pt)?;
        Some(Point::new(
            self.window.x0 + ratio.x * self.window.width(),
            self.window.y0 + ratio.y * self.window.height(),
        ))
    }

    /// Converts a venue position into surface pixels.
    #[must_use]
    pub fn world_to_view_point(&self, world_pt: Point) -> Option<Point> {
        if !self.has_surface() || !world_pt.is_finite() {
            return None;
        }
        Some(Point::new(
            (world_pt.x - self.window.x0) * self.surface.width / self.window.width(),
            (world_pt.y - self.window.y0) * self.surface.height / self.window.height(),
        ))
    }

    /// Snapshot of the current state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> ViewportDebugInfo {
        ViewportDebugInfo {
            window: self.window,
            map: self.map,
            surface: self.surface,
            limits: self.limits,
            pinch_damping: self.pinch_damping,
            pan_anchor: self.anchor.last(),
            pinch_baseline: self.pinch_baseline,
        }
    }

    fn has_surface(&self) -> bool {
        self.surface.width > 0.0 && self.surface.height > 0.0
    }
}

/// Debug snapshot of a [`ViewportController`].
#[derive(Clone, Copy, Debug)]
pub struct ViewportDebugInfo {
    /// Current window in venue coordinates.
    pub window: Rect,
    /// Map extent.
    pub map: Size,
    /// Rendering surface size in pixels.
    pub surface: Size,
    /// Active zoom limits.
    pub limits: ZoomLimits,
    /// Pinch damping coefficient.
    pub pinch_damping: f64,
    /// Last recorded pan position, if panning.
    pub pan_anchor: Option<Point>,
    /// Pinch baseline distance, if pinching.
    pub pinch_baseline: Option<f64>,
}
