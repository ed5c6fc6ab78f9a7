// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::path::PathBuf;

/// Failure to produce a [`Venue`](crate::Venue) from a data source.
///
/// Any of these leaves the consumer in the terminal "no data" state; a
/// partially parsed venue is never exposed.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The payload could not be read from disk.
    #[error("failed to read venue payload from {}", path.display())]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The payload was read but is not a valid venue document.
    #[error("malformed venue payload")]
    Parse(#[from] serde_json::Error),
    /// The transport failed before a payload was received.
    #[error("venue request failed: {0}")]
    Transport(String),
    /// The map extent is not a positive, finite size.
    #[error("venue map extent must be positive, got {width}x{height}")]
    InvalidExtent {
        /// Declared map width.
        width: f64,
        /// Declared map height.
        height: f64,
    },
}
