// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless seat map walkthrough.
//!
//! Loads a venue (the generated arena by default), then replays a short
//! scripted session: wheel zoom, a drag, a pinch, and a few clicks. After
//! each step it prints the window and what a renderer would draw.
//!
//! Run:
//! - `cargo run -p seatmap_demos --bin walkthrough`
//! - `cargo run -p seatmap_demos --bin walkthrough -- --venue venue.json --state ./state`
//! - `cargo run -p seatmap_demos --bin walkthrough --features http -- --url https://host/venue.json`
//!
//! Settings are read from `--config <file.toml>` and `SEATMAP_*` variables.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use kurbo::{Point, Size};
use seatmap_engine::{EngineConfig, InputEvent, LoadState, SeatMapSession, Touches};
use seatmap_selection::{BackgroundStore, JsonFileStore, SlotStore};
use seatmap_venue::{JsonFileSource, Venue, VenueSource, synthetic};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const SURFACE: Size = Size::new(700.0, 1300.0);

/// Replays a scripted seat map session and prints each frame.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// TOML settings file; missing files fall back to defaults.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Venue JSON file to load instead of the generated arena.
    #[arg(long, conflicts_with = "url")]
    venue: Option<PathBuf>,
    /// Venue URL; needs the `http` feature.
    #[arg(long)]
    url: Option<String>,
    /// Directory for the persisted selection.
    #[arg(long)]
    state: Option<PathBuf>,
    /// Seed for the generated arena.
    #[arg(long, default_value_t = 2025)]
    seed: u64,
}

fn init_tracing(config: &EngineConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn fetch_venue(args: &Args) -> Result<Venue, seatmap_venue::LoadError> {
    if let Some(path) = &args.venue {
        return JsonFileSource::new(path).fetch();
    }
    if let Some(url) = &args.url {
        return fetch_url(url);
    }
    synthetic::metropolis_arena(args.seed)
}

#[cfg(feature = "http")]
fn fetch_url(url: &str) -> Result<Venue, seatmap_venue::LoadError> {
    seatmap_venue::HttpSource::new(url).fetch()
}

#[cfg(not(feature = "http"))]
fn fetch_url(url: &str) -> Result<Venue, seatmap_venue::LoadError> {
    Err(seatmap_venue::LoadError::Transport(format!(
        "cannot fetch {url}: built without the `http` feature"
    )))
}

fn report<S: SlotStore>(step: &str, session: &SeatMapSession<S>) {
    let Some(frame) = session.frame() else {
        println!("{step}: no frame");
        return;
    };
    let w = frame.window;
    println!(
        "{step:<14} window=({:.0}, {:.0}) {:.0}x{:.0}  visible={}/{}  selected={} subtotal=${}",
        w.x0,
        w.y0,
        w.width(),
        w.height(),
        frame.visible.len(),
        frame.total_seats,
        frame.summary.headline(),
        frame.summary.subtotal,
    );
    if !frame.announcement.is_empty() {
        println!("{:<14} live: {}", "", frame.announcement);
    }
}

fn touches(points: &[(f64, f64)]) -> Touches {
    points.iter().map(|&(x, y)| Point::new(x, y)).collect()
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = EngineConfig::load(args.config.as_deref()).context("loading configuration")?;
    init_tracing(&config);

    let state_dir = args
        .state
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("seatmap-walkthrough"));
    let store = BackgroundStore::new(JsonFileStore::new(&state_dir));
    tracing::info!(dir = %state_dir.display(), "selection state directory");

    let mut session = SeatMapSession::new(config, store, SURFACE);
    session.complete_load(fetch_venue(&args));
    if session.load_state() != LoadState::Ready {
        let err = session.load_error().map(ToString::to_string).unwrap_or_default();
        bail!("venue did not load: {err}");
    }
    report("loaded", &session);

    for _ in 0..6 {
        session.handle(&InputEvent::Wheel {
            delta_y: -100.0,
            position: Point::new(350.0, 200.0),
        });
    }
    report("wheel in x6", &session);

    session.handle(&InputEvent::PointerDown {
        position: Point::new(350.0, 650.0),
    });
    session.handle(&InputEvent::PointerMove {
        position: Point::new(250.0, 550.0),
    });
    session.handle(&InputEvent::PointerLeave);
    report("drag", &session);

    session.handle(&InputEvent::TouchStart {
        touches: touches(&[(300.0, 650.0), (400.0, 650.0)]),
    });
    session.handle(&InputEvent::TouchMove {
        touches: touches(&[(250.0, 650.0), (450.0, 650.0)]),
    });
    session.handle(&InputEvent::TouchEnd {
        touches: touches(&[]),
    });
    report("pinch", &session);

    // Click the first few selectable seats on screen.
    let candidates: Vec<String> = session
        .frame()
        .map(|f| {
            f.visible
                .iter()
                .filter(|item| item.interactive)
                .take(3)
                .map(|item| item.id.to_string())
                .collect()
        })
        .unwrap_or_default();
    for id in &candidates {
        session.toggle_seat(id);
        session.focus_seat(id);
    }
    report("select", &session);

    if let Some(frame) = session.frame() {
        for line in &frame.summary.lines {
            println!("  - {line}  ${}", line.price);
        }
        if let Some(details) = frame.details {
            println!(
                "  focused: {} row {} seat {} ({}, ${}, {})",
                details.section_label,
                details.row,
                details.col,
                details.tier_label,
                details.price,
                details.status_label
            );
        }
    }
    session.selection().store().sync();
    Ok(())
}
