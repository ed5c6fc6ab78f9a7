// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::bounded::{BoundedSelection, Toggle};
use crate::store::SlotStore;

/// Default slot name for the seat selection.
pub const DEFAULT_SLOT: &str = "selected-seats";

/// Default maximum number of selected seats.
pub const DEFAULT_MAX_SEATS: usize = 8;

/// A [`BoundedSelection`] mirrored into a [`SlotStore`].
///
/// The slot is read once on construction. After that, every operation that
/// changes the selection writes the full id list back. Storage failures are
/// logged and otherwise ignored; the in-memory selection is authoritative.
#[derive(Debug)]
pub struct PersistedSelection<K, S> {
    selection: BoundedSelection<K>,
    store: S,
    slot: String,
}

impl<K, S> PersistedSelection<K, S>
where
    K: Clone + PartialEq + AsRef<str> + From<String>,
    S: SlotStore,
{
    /// Restores the selection stored under `slot`.
    ///
    /// Duplicate ids are dropped and the list is cut to `max`. Ids are not
    /// checked against any venue; callers that render the selection skip
    /// ids they cannot resolve.
    pub fn restore(store: S, slot: impl Into<String>, max: usize) -> Self {
        let slot = slot.into();
        let stored = store.get(&slot);
        let mut selection = BoundedSelection::new(max);
        let total = stored.len();
        let dropped = selection.replace_with(stored.into_iter().map(K::from));
        if dropped > 0 {
            tracing::debug!(slot, total, dropped, "trimmed restored selection");
        }
        Self {
            selection,
            store,
            slot,
        }
    }

    /// Slot this selection is persisted under.
    #[must_use]
    pub fn slot(&self) -> &str {
        &self.slot
    }

    /// The current selection.
    #[must_use]
    pub fn selection(&self) -> &BoundedSelection<K> {
        &self.selection
    }

    /// Selected ids in selection order.
    #[must_use]
    pub fn ids(&self) -> &[K] {
        self.selection.items()
    }

    /// Returns `true` if `id` is selected.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.selection.iter().any(|k| k.as_ref() == id)
    }

    /// Toggles `key`, persisting if anything changed.
    pub fn toggle(&mut self, key: K) -> Toggle {
        let outcome = self.selection.toggle(key);
        if outcome != Toggle::Full {
            self.persist();
        }
        outcome
    }

    /// Removes `id` if selected, persisting if it was.
    pub fn remove(&mut self, id: &str) -> bool {
        let Some(key) = self.selection.iter().find(|k| k.as_ref() == id).cloned() else {
            return false;
        };
        let removed = self.selection.remove(&key);
        if removed {
            self.persist();
        }
        removed
    }

    /// Removes everything, persisting if the selection was non-empty.
    pub fn clear(&mut self) -> bool {
        let cleared = self.selection.clear();
        if cleared {
            self.persist();
        }
        cleared
    }

    /// Borrows the backing store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    fn persist(&mut self) {
        let ids: Vec<String> = self
            .selection
            .iter()
            .map(|k| k.as_ref().to_owned())
            .collect();
        if let Err(err) = self.store.set(&self.slot, &ids) {
            tracing::warn!(slot = %self.slot, error = %err, "failed to persist selection");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PersistedSelection;
    use crate::bounded::Toggle;
    use crate::store::{MemoryStore, SlotStore, StorageError};

    struct FailingStore;

    impl SlotStore for FailingStore {
        fn get(&self, _slot: &str) -> Vec<String> {
            Vec::new()
        }

        fn set(&mut self, _slot: &str, _ids: &[String]) -> Result<(), StorageError> {
            Err(StorageError::Disconnected)
        }
    }

    #[test]
    fn restore_dedups_and_truncates() {
        let store = MemoryStore::with_slot("s", ["a", "b", "a", "c", "d"]);
        let sel: PersistedSelection<String, _> = PersistedSelection::restore(store, "s", 3);
        assert_eq!(sel.ids(), ["a", "b", "c"]);
    }

    #[test]
    fn mutations_write_through() {
        let mut sel: PersistedSelection<String, _> =
            PersistedSelection::restore(MemoryStore::new(), "s", 2);
        sel.toggle("x".into());
        sel.toggle("y".into());
        assert_eq!(sel.store().get("s"), ["x", "y"]);
        assert!(sel.remove("x"));
        assert_eq!(sel.store().get("s"), ["y"]);
        assert!(sel.clear());
        assert!(sel.store().get("s").is_empty());
    }

    #[test]
    fn storage_failure_keeps_memory_state() {
        let mut sel: PersistedSelection<String, _> =
            PersistedSelection::restore(FailingStore, "s", 8);
        assert_eq!(sel.toggle("x".into()), Toggle::Added);
        assert!(sel.contains("x"));
    }
}
