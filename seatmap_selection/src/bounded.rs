// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Result of [`BoundedSelection::toggle`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Toggle {
    /// The key was not selected and has been added.
    Added,
    /// The key was selected and has been removed.
    Removed,
    /// The key was not selected and the selection is full; nothing changed.
    Full,
}

/// A selection of at most `max` unique keys, kept in insertion order.
///
/// `BoundedSelection` only requires equality on `K`. Keys live in a small
/// `Vec<K>` and uniqueness is enforced by scanning, which is cheap for the
/// handful of seats a single order can hold.
///
/// A monotonically increasing revision counter is bumped whenever the
/// contents change; no-op calls leave it alone.
#[derive(Clone, Debug)]
pub struct BoundedSelection<K> {
    items: Vec<K>,
    max: usize,
    revision: u64,
}

impl<K> BoundedSelection<K> {
    /// Creates an empty selection holding at most `max` keys.
    #[must_use]
    pub const fn new(max: usize) -> Self {
        Self {
            items: Vec::new(),
            max,
            revision: 0,
        }
    }

    /// Maximum number of keys.
    #[must_use]
    pub fn max(&self) -> usize {
        self.max
    }

    /// Number of selected keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns `true` while another key can be added.
    #[must_use]
    pub fn can_add_more(&self) -> bool {
        self.items.len() < self.max
    }

    /// Selected keys in insertion order.
    #[must_use]
    pub fn items(&self) -> &[K] {
        &self.items
    }

    /// Iterates the selected keys in insertion order.
    pub fn iter(&self) -> core::slice::Iter<'_, K> {
        self.items.iter()
    }

    /// Current revision.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Removes every key. Returns `true` if anything was removed.
    pub fn clear(&mut self) -> bool {
        if self.items.is_empty() {
            return false;
        }
        self.items.clear();
        self.bump_revision();
        true
    }

    fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl<K: PartialEq> BoundedSelection<K> {
    /// Returns `true` if `key` is selected.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.position_of(key).is_some()
    }

    /// Removes `key` if selected, otherwise adds it unless the selection is full.
    ///
    /// Removal is always possible, so a full selection can still be
    /// toggled off one key at a time.
    pub fn toggle(&mut self, key: K) -> Toggle {
        if let Some(idx) = self.position_of(&key) {
            self.items.remove(idx);
            self.bump_revision();
            Toggle::Removed
        } else if self.can_add_more() {
            self.items.push(key);
            self.bump_revision();
            Toggle::Added
        } else {
            Toggle::Full
        }
    }

    /// Removes `key` if present. Returns `true` if it was.
    pub fn remove(&mut self, key: &K) -> bool {
        match self.position_of(key) {
            Some(idx) => {
                self.items.remove(idx);
                self.bump_revision();
                true
            }
            None => false,
        }
    }

    /// Replaces the contents with `keys`, dropping duplicates and anything past `max`.
    ///
    /// First occurrences win. Returns the number of input keys that were
    /// dropped.
    pub fn replace_with<I>(&mut self, keys: I) -> usize
    where
        I: IntoIterator<Item = K>,
    {
        let mut new_items: Vec<K> = Vec::new();
        let mut dropped = 0;
        for key in keys {
            if new_items.len() >= self.max || new_items.contains(&key) {
                dropped += 1;
            } else {
                new_items.push(key);
            }
        }

        #[cfg(debug_assertions)]
        debug_assert_unique(&new_items);

        if new_items != self.items {
            self.items = new_items;
            self.bump_revision();
        }
        dropped
    }

    fn position_of(&self, key: &K) -> Option<usize> {
        self.items.iter().position(|k| k == key)
    }
}

impl<'a, K> IntoIterator for &'a BoundedSelection<K> {
    type Item = &'a K;
    type IntoIter = core::slice::Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(debug_assertions)]
fn debug_assert_unique<K: PartialEq>(items: &[K]) {
    for i in 0..items.len() {
        for j in (i + 1)..items.len() {
            debug_assert!(
                items[i] != items[j],
                "duplicate selection key at {i} and {j}"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BoundedSelection, Toggle};

    #[test]
    fn toggle_adds_then_removes() {
        let mut sel = BoundedSelection::new(2);
        assert_eq!(sel.toggle(1), Toggle::Added);
        assert_eq!(sel.toggle(2), Toggle::Added);
        assert_eq!(sel.toggle(3), Toggle::Full);
        assert_eq!(sel.items(), &[1, 2]);
        assert_eq!(sel.toggle(1), Toggle::Removed);
        assert_eq!(sel.items(), &[2]);
        assert_eq!(sel.revision(), 3);
    }

    #[test]
    fn zero_capacity_never_holds_anything() {
        let mut sel = BoundedSelection::new(0);
        assert_eq!(sel.toggle("a"), Toggle::Full);
        assert!(sel.is_empty());
        assert!(!sel.can_add_more());
    }

    #[test]
    fn replace_with_truncates_and_dedups() {
        let mut sel = BoundedSelection::new(3);
        let dropped = sel.replace_with([5, 5, 6, 7, 8]);
        assert_eq!(sel.items(), &[5, 6, 7]);
        assert_eq!(dropped, 2);
        let rev = sel.revision();
        sel.replace_with([5, 6, 7]);
        assert_eq!(sel.revision(), rev);
    }
}
