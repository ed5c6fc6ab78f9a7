// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The seat map session: everything between raw events and a drawable frame.

use kurbo::{Point, Rect, Size};
use seatmap_render::{
    SEAT_RADIUS, SeatDetails, SeatRenderItem, SelectionSummary, announcement, describe,
    is_interactive,
};
use seatmap_selection::{PersistedSelection, SlotStore, Toggle};
use seatmap_venue::{LoadError, SeatId, Venue, VenueSource};
use seatmap_view2d::{
    CullBackend, GridBuckets, InputProfile, LinearScan, ViewportController, ZoomLimits,
};

use crate::gesture::{GestureRouter, InputEvent};
use crate::settings::{CullingMode, EngineConfig};

/// Where the session is in its one-shot venue load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadState {
    /// Waiting for [`SeatMapSession::complete_load`].
    Loading,
    /// The venue is loaded and frames are available.
    Ready,
    /// The load failed. Terminal.
    Failed,
}

/// Everything a renderer needs for one frame.
#[derive(Clone, Debug)]
pub struct Frame {
    /// Current window in venue coordinates.
    pub window: Rect,
    /// Seats inside the padded window, in venue traversal order.
    pub visible: Vec<SeatRenderItem>,
    /// Total number of seats in the venue.
    pub total_seats: usize,
    /// Selected seats and subtotal.
    pub summary: SelectionSummary,
    /// Details for the focused seat, if any.
    pub details: Option<SeatDetails>,
    /// Live-region text for the selection size.
    pub announcement: String,
}

#[derive(Debug)]
enum Culler {
    Linear(LinearScan),
    Grid(GridBuckets),
}

impl Culler {
    fn build(config: &EngineConfig, venue: &Venue) -> Self {
        let positions: Vec<Point> = venue.seats().map(|s| s.position()).collect();
        match config.culling {
            CullingMode::Linear => Self::Linear(LinearScan::new(&positions)),
            CullingMode::Grid => {
                let mut grid = GridBuckets::new(config.grid_cell_size);
                grid.rebuild(&positions);
                Self::Grid(grid)
            }
        }
    }

    fn query(&self, view: &ViewportController, padding: f64, out: &mut Vec<usize>) {
        match self {
            Self::Linear(scan) => view.visible_slots(scan, padding, out),
            Self::Grid(grid) => view.visible_slots(grid, padding, out),
        }
    }

    fn query_rect(&self, rect: Rect, out: &mut Vec<usize>) {
        match self {
            Self::Linear(scan) => scan.query_rect(rect, out),
            Self::Grid(grid) => grid.query_rect(rect, out),
        }
    }
}

#[derive(Debug)]
struct Loaded {
    venue: Venue,
    view: ViewportController,
    culler: Culler,
}

#[derive(Debug)]
enum Phase {
    Loading,
    Ready(Box<Loaded>),
    Failed(LoadError),
}

/// An interactive seat map over one venue.
///
/// The session is driven by three kinds of input, all applied synchronously
/// in arrival order:
/// - the one-shot venue load ([`Self::complete_load`]),
/// - raw surface events ([`Self::handle`]),
/// - selection commands ([`Self::toggle_seat`], [`Self::remove_seat`],
///   [`Self::clear_selection`]).
///
/// [`Self::frame`] then produces the window, the culled render items, and the
/// aggregation views.
///
/// The selection is restored from `store` when the session is created, before
/// the venue is known, so restored ids are not validated. Ids that do not
/// resolve are kept but left out of the summary.
#[derive(Debug)]
pub struct SeatMapSession<S> {
    config: EngineConfig,
    phase: Phase,
    surface: Size,
    router: GestureRouter,
    selection: PersistedSelection<SeatId, S>,
    focused: Option<SeatId>,
}

impl<S: SlotStore> SeatMapSession<S> {
    /// Creates a session in the [`LoadState::Loading`] state.
    pub fn new(config: EngineConfig, store: S, surface: Size) -> Self {
        let selection =
            PersistedSelection::restore(store, config.storage_key.clone(), config.max_seats);
        Self {
            router: GestureRouter::from_config(&config),
            config,
            phase: Phase::Loading,
            surface,
            selection,
            focused: None,
        }
    }

    /// Fetches the venue from `source` and completes the load with the result.
    pub fn load_from<V: VenueSource>(&mut self, source: &V) -> LoadState {
        if self.load_state() == LoadState::Loading {
            self.complete_load(source.fetch());
        }
        self.load_state()
    }

    /// Completes the one-shot venue load.
    ///
    /// Only the first call has any effect; it returns `false` afterwards. On
    /// success the window covers the full map.
    pub fn complete_load(&mut self, result: Result<Venue, LoadError>) -> bool {
        if !matches!(self.phase, Phase::Loading) {
            tracing::debug!("ignoring repeated venue load");
            return false;
        }
        self.phase = match result {
            Ok(venue) => {
                let map = venue.map().size();
                let mut view = ViewportController::new(map, self.surface);
                view.set_zoom_limits(ZoomLimits::for_map(
                    map.width,
                    self.config.min_extent,
                    self.config.max_extent_factor,
                ));
                view.set_pinch_damping(self.config.pinch_damping);
                let culler = Culler::build(&self.config, &venue);
                tracing::info!(
                    venue = venue.venue_id(),
                    name = venue.name(),
                    seats = venue.seat_count(),
                    "venue loaded"
                );
                Phase::Ready(Box::new(Loaded {
                    venue,
                    view,
                    culler,
                }))
            }
            Err(err) => {
                tracing::warn!(error = %err, "venue load failed");
                Phase::Failed(err)
            }
        };
        true
    }

    /// Current load state.
    #[must_use]
    pub fn load_state(&self) -> LoadState {
        match self.phase {
            Phase::Loading => LoadState::Loading,
            Phase::Ready(_) => LoadState::Ready,
            Phase::Failed(_) => LoadState::Failed,
        }
    }

    /// The load failure, once the session has failed.
    #[must_use]
    pub fn load_error(&self) -> Option<&LoadError> {
        match &self.phase {
            Phase::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// The loaded venue.
    #[must_use]
    pub fn venue(&self) -> Option<&Venue> {
        self.loaded().map(|l| &l.venue)
    }

    /// The viewport controller, once loaded.
    #[must_use]
    pub fn viewport(&self) -> Option<&ViewportController> {
        self.loaded().map(|l| &l.view)
    }

    /// The configuration this session was created with.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The input profile of the most recent event.
    #[must_use]
    pub fn input_profile(&self) -> InputProfile {
        self.router.profile()
    }

    /// Culling padding for the current input profile.
    #[must_use]
    pub fn padding(&self) -> f64 {
        self.config.padding_for(self.router.profile())
    }

    /// Applies a raw surface event. Returns `true` if the window changed.
    ///
    /// Before the venue is loaded only resizes are recorded. A pointer move
    /// outside a drag focuses the seat under the pointer, see [`Self::hover_at`].
    pub fn handle(&mut self, event: &InputEvent) -> bool {
        if let InputEvent::Resize { size } = event {
            if size.is_finite() && size.width > 0.0 && size.height > 0.0 {
                self.surface = *size;
            }
        }
        let Phase::Ready(loaded) = &mut self.phase else {
            return false;
        };
        let changed = self.router.apply(&mut loaded.view, event);
        let panning = loaded.view.is_panning();
        if let InputEvent::PointerMove { position } = event {
            if !panning {
                self.hover_at(*position);
            }
        }
        changed
    }

    /// Selected seat ids in selection order.
    #[must_use]
    pub fn selected_ids(&self) -> &[SeatId] {
        self.selection.ids()
    }

    /// Returns `true` if `id` is selected.
    #[must_use]
    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.contains(id)
    }

    /// The persisted selection.
    #[must_use]
    pub fn selection(&self) -> &PersistedSelection<SeatId, S> {
        &self.selection
    }

    /// Toggles the seat with `id`.
    ///
    /// Returns `None` without touching the selection if the venue is not
    /// loaded, the seat does not exist, or it is neither available nor
    /// already selected.
    pub fn toggle_seat(&mut self, id: &str) -> Option<Toggle> {
        let loaded = self.loaded()?;
        let seat = loaded.venue.find(id)?;
        let selected = self.selection.contains(id);
        if !is_interactive(seat.seat.status, selected) {
            tracing::trace!(id, status = %seat.seat.status, "seat is not selectable");
            return None;
        }
        let key = seat.seat.id.clone();
        let outcome = self.selection.toggle(key);
        if outcome == Toggle::Full {
            tracing::debug!(id, max = self.config.max_seats, "selection is full");
        }
        Some(outcome)
    }

    /// Removes `id` from the selection. Returns `true` if it was selected.
    pub fn remove_seat(&mut self, id: &str) -> bool {
        self.selection.remove(id)
    }

    /// Clears the selection. Returns `true` if anything was selected.
    pub fn clear_selection(&mut self) -> bool {
        self.selection.clear()
    }

    /// Shows details for `id`. Returns `false` if no such seat is loaded.
    pub fn focus_seat(&mut self, id: &str) -> bool {
        let Some(seat) = self.venue().and_then(|v| v.find(id)) else {
            return false;
        };
        self.focused = Some(seat.seat.id.clone());
        true
    }

    /// Hides the detail panel.
    pub fn clear_focus(&mut self) {
        self.focused = None;
    }

    /// The focused seat id.
    #[must_use]
    pub fn focused(&self) -> Option<&SeatId> {
        self.focused.as_ref()
    }

    /// Returns the seat drawn under the surface position `view_pt`, if any.
    ///
    /// Among overlapping markers the one whose center is nearest wins.
    #[must_use]
    pub fn seat_at_view_point(&self, view_pt: Point) -> Option<&SeatId> {
        let loaded = self.loaded()?;
        let world = loaded.view.view_to_world_point(view_pt)?;
        let probe = Rect::from_center_size(world, (2.0 * SEAT_RADIUS, 2.0 * SEAT_RADIUS));
        let mut slots = Vec::new();
        loaded.culler.query_rect(probe, &mut slots);
        slots
            .into_iter()
            .filter_map(|slot| loaded.venue.seat_at(slot))
            .map(|seat| (seat.position().distance(world), seat))
            .filter(|(d, _)| *d <= SEAT_RADIUS)
            .min_by(|(a, _), (b, _)| a.total_cmp(b))
            .map(|(_, seat)| &seat.seat.id)
    }

    /// Focuses the seat under `view_pt`, as hovering over it would.
    ///
    /// Returns `false` and keeps the current focus when no seat is there.
    pub fn hover_at(&mut self, view_pt: Point) -> bool {
        let Some(id) = self.seat_at_view_point(view_pt).cloned() else {
            return false;
        };
        if self.focused.as_ref() != Some(&id) {
            tracing::trace!(id = id.as_str(), "hover focus");
            self.focused = Some(id);
        }
        true
    }

    /// Toggles the seat under `view_pt`, as a click would.
    pub fn activate_at(&mut self, view_pt: Point) -> Option<Toggle> {
        let id = self.seat_at_view_point(view_pt)?.clone();
        self.focused = Some(id.clone());
        self.toggle_seat(id.as_str())
    }

    /// Builds the output for the current state, or `None` until loaded.
    #[must_use]
    pub fn frame(&self) -> Option<Frame> {
        let loaded = self.loaded()?;
        let mut slots = Vec::new();
        loaded.culler.query(&loaded.view, self.padding(), &mut slots);
        let visible = slots
            .into_iter()
            .filter_map(|slot| loaded.venue.seat_at(slot))
            .map(|seat| describe(seat, self.selection.contains(seat.seat.id.as_str())))
            .collect();
        let summary =
            SelectionSummary::build(&loaded.venue, self.selection.ids(), self.config.max_seats);
        let details = self
            .focused
            .as_ref()
            .and_then(|id| loaded.venue.find(id.as_str()))
            .map(SeatDetails::of);
        Some(Frame {
            window: loaded.view.window(),
            visible,
            total_seats: loaded.venue.seat_count(),
            announcement: announcement(self.selection.ids().len()),
            summary,
            details,
        })
    }

    fn loaded(&self) -> Option<&Loaded> {
        match &self.phase {
            Phase::Ready(loaded) => Some(loaded),
            _ => None,
        }
    }
}
