// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=seatmap_selection --heading-base-level=0

//! Seatmap Selection: a bounded, persisted seat selection.
//!
//! - [`BoundedSelection`] keeps at most `max` unique keys in selection order.
//!   Toggling a new key into a full selection is a no-op reported as
//!   [`Toggle::Full`].
//! - [`SlotStore`] is the persistence port: a named slot holding a list of
//!   ids. Reads never fail; a missing or corrupt slot reads as empty.
//! - [`MemoryStore`], [`JsonFileStore`] and [`BackgroundStore`] are the
//!   provided stores. The last one wraps any other store and moves writes
//!   to a worker thread.
//! - [`PersistedSelection`] ties the two together: restore once, write back
//!   after every change, log and ignore storage failures.
//!
//! ## Example
//!
//! ```rust
//! use seatmap_selection::{MemoryStore, PersistedSelection, SlotStore, Toggle};
//!
//! let store = MemoryStore::with_slot("selected-seats", ["A-1-01", "A-1-01", "A-1-02"]);
//! let mut sel: PersistedSelection<String, _> =
//!     PersistedSelection::restore(store, "selected-seats", 2);
//! assert_eq!(sel.ids(), ["A-1-01", "A-1-02"]);
//!
//! // Full: adding a third seat does nothing.
//! assert_eq!(sel.toggle("A-1-03".to_owned()), Toggle::Full);
//!
//! assert_eq!(sel.toggle("A-1-01".to_owned()), Toggle::Removed);
//! assert_eq!(sel.store().get("selected-seats"), ["A-1-02"]);
//! ```

mod background;
mod bounded;
mod persisted;
mod store;

pub use background::BackgroundStore;
pub use bounded::{BoundedSelection, Toggle};
pub use persisted::{DEFAULT_MAX_SEATS, DEFAULT_SLOT, PersistedSelection};
pub use store::{JsonFileStore, MemoryStore, SlotStore, StorageError};
