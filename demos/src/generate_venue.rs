// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Writes the generated arena as a venue JSON payload.
//!
//! Run:
//! - `cargo run -p seatmap_demos --bin generate_venue -- venue.json 42`
//!
//! Without a path the payload goes to stdout. The seed defaults to 2025.

use std::io::Write;

use anyhow::{Context, Result};
use seatmap_venue::synthetic;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let path = args.next();
    let seed = match args.next() {
        Some(raw) => raw.parse().context("seed must be an integer")?,
        None => 2025,
    };

    let venue = synthetic::metropolis_arena(seed)?;
    let json = venue.to_json_pretty()?;
    match path {
        Some(path) => {
            std::fs::write(&path, &json).with_context(|| format!("writing {path}"))?;
            tracing::info!(path, seats = venue.seat_count(), "venue written");
        }
        None => {
            let mut out = std::io::stdout().lock();
            out.write_all(json.as_bytes())?;
            out.write_all(b"\n")?;
        }
    }
    for section in venue.sections() {
        tracing::debug!(section = %section.id, seats = section.seat_count(), "section");
    }
    Ok(())
}
