// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Venue data sources.
//!
//! A source performs a single idempotent read returning the whole venue.
//! There is no pagination or incremental loading.

use std::path::PathBuf;

use crate::{LoadError, Venue};

/// Something that can produce the complete venue dataset.
pub trait VenueSource {
    /// Fetches and parses the venue.
    fn fetch(&self) -> Result<Venue, LoadError>;
}

impl<S: VenueSource + ?Sized> VenueSource for &S {
    fn fetch(&self) -> Result<Venue, LoadError> {
        (**self).fetch()
    }
}

/// Reads the venue payload from a JSON file.
#[derive(Clone, Debug)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    /// Creates a source reading from `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl VenueSource for JsonFileSource {
    fn fetch(&self) -> Result<Venue, LoadError> {
        let payload = std::fs::read_to_string(&self.path).map_err(|source| LoadError::Io {
            path: self.path.clone(),
            source,
        })?;
        let venue = Venue::from_json(&payload)?;
        tracing::debug!(
            path = %self.path.display(),
            seats = venue.seat_count(),
            "venue file parsed"
        );
        Ok(venue)
    }
}

/// Serves a payload held in memory. Useful for tests and embedded assets.
#[derive(Clone, Debug)]
pub struct StaticSource {
    payload: String,
}

impl StaticSource {
    /// Creates a source that parses `payload` on every fetch.
    #[must_use]
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
        }
    }

    /// Creates a source serving an already-built venue.
    pub fn from_venue(venue: &Venue) -> Result<Self, LoadError> {
        Ok(Self::new(serde_json::to_string(venue)?))
    }
}

impl VenueSource for StaticSource {
    fn fetch(&self) -> Result<Venue, LoadError> {
        Venue::from_json(&self.payload)
    }
}

/// Fetches the venue payload over HTTP(S) with a blocking request.
#[cfg(feature = "http")]
#[derive(Clone, Debug)]
pub struct HttpSource {
    url: String,
}

#[cfg(feature = "http")]
impl HttpSource {
    /// Creates a source requesting `url`.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[cfg(feature = "http")]
impl VenueSource for HttpSource {
    fn fetch(&self) -> Result<Venue, LoadError> {
        // Non-2xx responses surface as errors from `call`.
        let mut response = ureq::get(&self.url)
            .call()
            .map_err(|err| LoadError::Transport(err.to_string()))?;
        let payload = response
            .body_mut()
            .read_to_string()
            .map_err(|err| LoadError::Transport(err.to_string()))?;
        Venue::from_json(&payload)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::{JsonFileSource, StaticSource, VenueSource};
    use crate::LoadError;

    const TINY: &str = r#"{"venueId":"t","name":"Tiny","map":{"width":100,"height":100},"sections":[]}"#;

    #[test]
    fn static_source_is_idempotent() {
        let source = StaticSource::new(TINY);
        let a = source.fetch().unwrap();
        let b = source.fetch().unwrap();
        assert_eq!(a.name(), b.name());
        assert_eq!(a.seat_count(), 0);
    }

    #[test]
    fn file_source_reads_payload() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TINY.as_bytes()).unwrap();
        let venue = JsonFileSource::new(file.path()).fetch().unwrap();
        assert_eq!(venue.venue_id(), "t");
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = JsonFileSource::new(dir.path().join("absent.json"))
            .fetch()
            .unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn truncated_payload_is_parse_error() {
        let err = StaticSource::new(&TINY[..40]).fetch().unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }
}
