// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=seatmap_engine --heading-base-level=0

//! Seatmap Engine: a headless interactive seat map.
//!
//! [`SeatMapSession`] wires the lower crates together:
//! - `seatmap_venue` supplies the venue, loaded exactly once.
//! - `seatmap_view2d` owns the window and the pan/zoom/pinch math.
//!   [`GestureRouter`] turns raw [`InputEvent`]s into controller calls.
//! - `seatmap_selection` holds the bounded selection and mirrors it into a
//!   [`SlotStore`](seatmap_selection::SlotStore).
//! - `seatmap_render` turns visible seats into render items and the
//!   selection into a summary.
//!
//! Tunables live in [`EngineConfig`], which can be read from a TOML file and
//! `SEATMAP_*` environment variables.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use seatmap_engine::{EngineConfig, InputEvent, LoadState, SeatMapSession};
//! use seatmap_selection::MemoryStore;
//! use seatmap_venue::StaticSource;
//!
//! let source = StaticSource::new(r#"{
//!   "venueId": "v", "name": "Club", "map": { "width": 800, "height": 800 },
//!   "sections": [{ "id": "S", "label": "Stage", "rows": [{ "index": 1, "seats": [
//!     { "id": "S-1-01", "col": 1, "x": 100, "y": 100, "priceTier": 2, "status": "available" }
//!   ] }] }]
//! }"#);
//!
//! let mut session =
//!     SeatMapSession::new(EngineConfig::default(), MemoryStore::new(), Size::new(400.0, 400.0));
//! assert_eq!(session.load_from(&source), LoadState::Ready);
//!
//! // Click the seat: surface (50, 50) is venue (100, 100) at this zoom.
//! session.activate_at(Point::new(50.0, 50.0));
//! let frame = session.frame().unwrap();
//! assert_eq!(frame.summary.subtotal, 100);
//! assert_eq!(frame.announcement, "1 seat selected");
//!
//! // Wheel up zooms in around the pointer.
//! session.handle(&InputEvent::Wheel { delta_y: -1.0, position: Point::new(200.0, 200.0) });
//! assert!(session.frame().unwrap().window.width() < 800.0);
//! ```

mod gesture;
mod session;
mod settings;

pub use gesture::{GestureRouter, InputEvent, Touches};
pub use session::{Frame, LoadState, SeatMapSession};
pub use settings::{ConfigError, CullingMode, ENV_PREFIX, EngineConfig};
