// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slot storage for persisted selections.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use hashbrown::HashMap;

/// Error raised when a slot cannot be written.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The slot file or its directory could not be written.
    #[error("failed to write slot `{slot}` at {}", path.display())]
    Io {
        /// Slot name.
        slot: String,
        /// File that was being written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// The id list could not be encoded.
    #[error("failed to encode slot `{slot}`")]
    Encode {
        /// Slot name.
        slot: String,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
    /// The background writer thread is gone.
    #[error("background writer has stopped")]
    Disconnected,
}

/// A key-value slot holding an ordered list of seat ids.
///
/// Reads never fail: a missing or unreadable slot is reported as empty.
/// Writes may fail, and callers are expected to treat that as non-fatal.
pub trait SlotStore {
    /// Reads the ids stored under `slot`.
    fn get(&self, slot: &str) -> Vec<String>;

    /// Replaces the ids stored under `slot`.
    fn set(&mut self, slot: &str, ids: &[String]) -> Result<(), StorageError>;
}

impl<S: SlotStore + ?Sized> SlotStore for Box<S> {
    fn get(&self, slot: &str) -> Vec<String> {
        (**self).get(slot)
    }

    fn set(&mut self, slot: &str, ids: &[String]) -> Result<(), StorageError> {
        (**self).set(slot, ids)
    }
}

/// In-memory slots, lost when dropped.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    slots: HashMap<String, Vec<String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with `ids` already stored under `slot`.
    #[must_use]
    pub fn with_slot(
        slot: impl Into<String>,
        ids: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let mut store = Self::new();
        store
            .slots
            .insert(slot.into(), ids.into_iter().map(Into::into).collect());
        store
    }
}

impl SlotStore for MemoryStore {
    fn get(&self, slot: &str) -> Vec<String> {
        self.slots.get(slot).cloned().unwrap_or_default()
    }

    fn set(&mut self, slot: &str, ids: &[String]) -> Result<(), StorageError> {
        self.slots.insert(slot.to_owned(), ids.to_vec());
        Ok(())
    }
}

/// One JSON array per slot, stored as `<dir>/<slot>.json`.
///
/// Slot names are sanitized so they cannot escape `dir`. Writes go to a
/// temporary sibling file first and are then renamed into place.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Stores slots under `dir`, creating it on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory that holds the slot files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `slot`.
    #[must_use]
    pub fn slot_path(&self, slot: &str) -> PathBuf {
        let name: String = slot
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{name}.json"))
    }
}

impl SlotStore for JsonFileStore {
    fn get(&self, slot: &str) -> Vec<String> {
        let path = self.slot_path(slot);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                tracing::debug!(slot, path = %path.display(), error = %err, "unreadable slot");
                return Vec::new();
            }
        };
        match serde_json::from_str::<Vec<String>>(&text) {
            Ok(ids) => ids,
            Err(err) => {
                tracing::debug!(slot, path = %path.display(), error = %err, "corrupt slot ignored");
                Vec::new()
            }
        }
    }

    fn set(&mut self, slot: &str, ids: &[String]) -> Result<(), StorageError> {
        let path = self.slot_path(slot);
        let io_err = |source| StorageError::Io {
            slot: slot.to_owned(),
            path: path.clone(),
            source,
        };
        let body = serde_json::to_vec(ids).map_err(|source| StorageError::Encode {
            slot: slot.to_owned(),
            source,
        })?;
        fs::create_dir_all(&self.dir).map_err(io_err)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, body).map_err(io_err)?;
        fs::rename(&tmp, &path).map_err(io_err)?;
        Ok(())
    }
}
