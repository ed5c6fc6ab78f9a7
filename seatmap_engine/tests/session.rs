// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end session behavior over small venues.

use kurbo::{Point, Rect, Size};
use seatmap_engine::{CullingMode, EngineConfig, InputEvent, LoadState, SeatMapSession, Touches};
use seatmap_selection::{JsonFileStore, MemoryStore, SlotStore, Toggle};
use seatmap_venue::{LoadError, StaticSource, Venue};

const TRIO: &str = r#"{
  "venueId": "trio", "name": "Trio Hall", "map": { "width": 1000, "height": 1000 },
  "sections": [{ "id": "A", "label": "Section A", "rows": [{ "index": 1, "seats": [
    { "id": "A-1-01", "col": 1, "x": 100, "y": 100, "priceTier": 1, "status": "available" },
    { "id": "A-1-02", "col": 2, "x": 116, "y": 100, "priceTier": 2, "status": "available" },
    { "id": "A-1-03", "col": 3, "x": 132, "y": 100, "priceTier": 3, "status": "available" }
  ] }] }]
}"#;

const EDGES: &str = r#"{
  "venueId": "edges", "name": "Edges", "map": { "width": 1000, "height": 1000 },
  "sections": [{ "id": "E", "label": "Edge", "rows": [{ "index": 1, "seats": [
    { "id": "E-1-01", "col": 1, "x": 500, "y": 500, "priceTier": 4, "status": "available" },
    { "id": "E-1-02", "col": 2, "x": 1050, "y": 500, "priceTier": 4, "status": "sold" },
    { "id": "E-1-03", "col": 3, "x": 1150, "y": 500, "priceTier": 4, "status": "held" }
  ] }] }]
}"#;

fn session_with<S: SlotStore>(payload: &str, config: EngineConfig, store: S) -> SeatMapSession<S> {
    let mut session = SeatMapSession::new(config, store, Size::new(500.0, 500.0));
    assert_eq!(session.load_from(&StaticSource::new(payload)), LoadState::Ready);
    session
}

fn session(payload: &str) -> SeatMapSession<MemoryStore> {
    session_with(payload, EngineConfig::default(), MemoryStore::new())
}

fn visible_ids<S: SlotStore>(session: &SeatMapSession<S>) -> Vec<String> {
    let frame = session.frame().unwrap();
    frame.visible.iter().map(|item| item.id.to_string()).collect()
}

#[test]
fn select_three_tier_scenario() {
    let mut session = session(TRIO);
    assert_eq!(session.toggle_seat("A-1-01"), Some(Toggle::Added));
    assert_eq!(session.toggle_seat("A-1-02"), Some(Toggle::Added));
    let frame = session.frame().unwrap();
    assert_eq!(frame.summary.subtotal, 250);
    assert_eq!(session.selected_ids(), ["A-1-01", "A-1-02"]);

    assert_eq!(session.toggle_seat("A-1-01"), Some(Toggle::Removed));
    let frame = session.frame().unwrap();
    assert_eq!(session.selected_ids(), ["A-1-02"]);
    assert_eq!(frame.summary.subtotal, 100);
    assert_eq!(frame.announcement, "1 seat selected");
}

#[test]
fn unavailable_and_unknown_seats_are_not_toggled() {
    let mut session = session(EDGES);
    assert_eq!(session.toggle_seat("E-1-02"), None);
    assert_eq!(session.toggle_seat("nope"), None);
    assert!(session.selected_ids().is_empty());
}

#[test]
fn culling_uses_profile_padding() {
    let mut session = session(EDGES);
    assert_eq!(session.frame().unwrap().window, Rect::new(0.0, 0.0, 1000.0, 1000.0));
    assert_eq!(visible_ids(&session), ["E-1-01", "E-1-02"]);

    let touches: Touches = [Point::new(10.0, 10.0)].into_iter().collect();
    session.handle(&InputEvent::TouchStart { touches });
    session.handle(&InputEvent::TouchEnd {
        touches: Touches::new(),
    });
    assert_eq!(session.padding(), 200.0);
    assert_eq!(visible_ids(&session), ["E-1-01", "E-1-02", "E-1-03"]);
}

#[test]
fn grid_culling_matches_linear() {
    let config = EngineConfig {
        culling: CullingMode::Grid,
        grid_cell_size: 50.0,
        ..EngineConfig::default()
    };
    let session = session_with(EDGES, config, MemoryStore::new());
    assert_eq!(visible_ids(&session), ["E-1-01", "E-1-02"]);
}

#[test]
fn load_is_one_shot() {
    let mut session = SeatMapSession::new(EngineConfig::default(), MemoryStore::new(), Size::ZERO);
    assert_eq!(session.load_state(), LoadState::Loading);
    assert!(session.frame().is_none());
    assert!(session.complete_load(Err(LoadError::Transport("offline".into()))));
    assert_eq!(session.load_state(), LoadState::Failed);
    assert!(session.load_error().is_some());

    let venue = Venue::from_json(TRIO).unwrap();
    assert!(!session.complete_load(Ok(venue)));
    assert_eq!(session.load_state(), LoadState::Failed);
    assert!(session.frame().is_none());
    assert_eq!(session.toggle_seat("A-1-01"), None);
}

#[test]
fn events_before_load_are_ignored_but_size_is_kept() {
    let mut session = SeatMapSession::new(EngineConfig::default(), MemoryStore::new(), Size::ZERO);
    let resize = InputEvent::Resize {
        size: Size::new(250.0, 250.0),
    };
    assert!(!session.handle(&resize));
    session.complete_load(Venue::from_json(TRIO));
    let view = session.viewport().unwrap();
    assert_eq!(view.surface_size(), Size::new(250.0, 250.0));
}

#[test]
fn click_hits_nearest_seat() {
    let mut session = session(TRIO);
    // Surface is half the map, so venue (116, 100) is at pixel (58, 50).
    assert_eq!(
        session.seat_at_view_point(Point::new(58.0, 50.0)).map(|id| id.as_str()),
        Some("A-1-02")
    );
    assert!(session.seat_at_view_point(Point::new(400.0, 400.0)).is_none());
    assert_eq!(session.activate_at(Point::new(58.0, 50.0)), Some(Toggle::Added));
    let frame = session.frame().unwrap();
    assert_eq!(frame.details.unwrap().tier_label, "Premium");
    assert!(frame.visible.iter().any(|item| item.selected && item.outline.is_some()));
}

#[test]
fn full_map_window_is_within_limits_for_small_extent_factor() {
    let config = EngineConfig {
        max_extent_factor: 0.5,
        ..EngineConfig::default()
    };
    let mut session = session_with(TRIO, config, MemoryStore::new());
    let view = session.viewport().unwrap();
    assert!(view.zoom_limits().allows(view.window().width()));
    assert!(session.handle(&InputEvent::Wheel {
        delta_y: -1.0,
        position: Point::new(250.0, 250.0),
    }));
}

#[test]
fn hover_focuses_seat_outside_drags() {
    let mut session = session(TRIO);
    session.handle(&InputEvent::PointerMove {
        position: Point::new(58.0, 50.0),
    });
    assert_eq!(session.focused().map(|id| id.as_str()), Some("A-1-02"));
    assert_eq!(session.frame().unwrap().details.unwrap().id, "A-1-02");

    // Empty space keeps the last focus.
    assert!(!session.hover_at(Point::new(400.0, 400.0)));
    assert_eq!(session.focused().map(|id| id.as_str()), Some("A-1-02"));

    // Dragging over a seat does not move focus.
    session.clear_focus();
    session.handle(&InputEvent::PointerDown {
        position: Point::new(50.0, 50.0),
    });
    assert!(session.handle(&InputEvent::PointerMove {
        position: Point::new(58.0, 50.0),
    }));
    assert!(session.focused().is_none());
    session.handle(&InputEvent::PointerUp);
    session.handle(&InputEvent::PointerMove {
        position: Point::new(58.0, 50.0),
    });
    assert_eq!(session.focused().map(|id| id.as_str()), Some("A-1-01"));
}

#[test]
fn selection_is_capped_and_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let config = EngineConfig {
        max_seats: 2,
        ..EngineConfig::default()
    };
    {
        let mut session = session_with(TRIO, config.clone(), JsonFileStore::new(dir.path()));
        session.toggle_seat("A-1-01");
        session.toggle_seat("A-1-02");
        assert_eq!(session.toggle_seat("A-1-03"), Some(Toggle::Full));
        assert!(!session.frame().unwrap().summary.can_add_more());
    }
    let mut session = session_with(TRIO, config, JsonFileStore::new(dir.path()));
    assert_eq!(session.selected_ids(), ["A-1-01", "A-1-02"]);
    assert!(session.clear_selection());
    assert!(JsonFileStore::new(dir.path()).get("selected-seats").is_empty());
}

#[test]
fn restored_stale_ids_are_left_out_of_summary() {
    let store = MemoryStore::with_slot("selected-seats", ["gone", "A-1-03"]);
    let session = session_with(TRIO, EngineConfig::default(), store);
    let frame = session.frame().unwrap();
    assert_eq!(frame.summary.lines.len(), 1);
    assert_eq!(frame.summary.subtotal, 75);
    assert_eq!(frame.summary.count, 2);
}

#[test]
fn wheel_out_past_limit_is_rejected() {
    let mut session = session(TRIO);
    let out = InputEvent::Wheel {
        delta_y: 1.0,
        position: Point::new(250.0, 250.0),
    };
    // 1000 * 1.1^8 > 2000, so the eighth step is refused.
    for _ in 0..7 {
        assert!(session.handle(&out));
    }
    let before = session.frame().unwrap().window;
    assert!(!session.handle(&out));
    assert_eq!(session.frame().unwrap().window, before);
}
