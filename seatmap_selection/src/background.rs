// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fmt;
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

use crate::store::{SlotStore, StorageError};

enum Message {
    Write { slot: String, ids: Vec<String> },
    Sync(Sender<()>),
}

/// Moves slot writes onto a worker thread.
///
/// [`SlotStore::set`] only enqueues the write and returns immediately, so a
/// slow disk never stalls input handling. Writes are applied in the order
/// they were issued. Failures on the worker are logged and dropped.
///
/// Reads go straight to the wrapped store and may observe a state that is
/// older than the last enqueued write; call [`BackgroundStore::sync`] to wait
/// for the queue to drain.
pub struct BackgroundStore<S> {
    inner: Arc<Mutex<S>>,
    tx: Option<Sender<Message>>,
    worker: Option<JoinHandle<()>>,
}

impl<S: SlotStore + Send + 'static> BackgroundStore<S> {
    /// Spawns the worker thread that owns writes to `store`.
    pub fn new(store: S) -> Self {
        let inner = Arc::new(Mutex::new(store));
        let (tx, rx) = mpsc::channel::<Message>();
        let shared = Arc::clone(&inner);
        let worker = thread::Builder::new()
            .name("seatmap-store".into())
            .spawn(move || {
                for msg in rx {
                    match msg {
                        Message::Write { slot, ids } => {
                            if let Err(err) = lock(&shared).set(&slot, &ids) {
                                tracing::warn!(slot, error = %err, "background slot write failed");
                            }
                        }
                        Message::Sync(ack) => {
                            let _ = ack.send(());
                        }
                    }
                }
            });
        let (tx, worker) = match worker {
            Ok(handle) => (Some(tx), Some(handle)),
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    "could not spawn store worker; writes will be rejected"
                );
                (None, None)
            }
        };
        Self { inner, tx, worker }
    }

    /// Blocks until every write issued so far has been applied.
    pub fn sync(&self) {
        let Some(tx) = &self.tx else { return };
        let (ack_tx, ack_rx) = mpsc::channel();
        if tx.send(Message::Sync(ack_tx)).is_ok() {
            let _ = ack_rx.recv();
        }
    }

    /// Runs `f` against the wrapped store.
    pub fn with_inner<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&lock(&self.inner))
    }
}

impl<S: SlotStore + Send + 'static> SlotStore for BackgroundStore<S> {
    fn get(&self, slot: &str) -> Vec<String> {
        lock(&self.inner).get(slot)
    }

    fn set(&mut self, slot: &str, ids: &[String]) -> Result<(), StorageError> {
        let tx = self.tx.as_ref().ok_or(StorageError::Disconnected)?;
        tx.send(Message::Write {
            slot: slot.to_owned(),
            ids: ids.to_vec(),
        })
        .map_err(|_| StorageError::Disconnected)
    }
}

impl<S> Drop for BackgroundStore<S> {
    fn drop(&mut self) {
        // Closing the channel lets the worker drain the queue and exit.
        self.tx.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl<S> fmt::Debug for BackgroundStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackgroundStore")
            .field("running", &self.tx.is_some())
            .finish_non_exhaustive()
    }
}

fn lock<S>(m: &Mutex<S>) -> MutexGuard<'_, S> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::BackgroundStore;
    use crate::store::{MemoryStore, SlotStore};

    #[test]
    fn writes_land_in_order() {
        let mut store = BackgroundStore::new(MemoryStore::new());
        for n in 1..=20 {
            let ids: Vec<String> = (0..n).map(|i| format!("A-1-{i:02}")).collect();
            store.set("selected-seats", &ids).unwrap();
        }
        store.sync();
        assert_eq!(store.get("selected-seats").len(), 20);
        assert_eq!(store.with_inner(|s| s.get("selected-seats"))[19], "A-1-19");
    }

    #[test]
    fn drop_flushes_pending_writes() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut store = BackgroundStore::new(crate::JsonFileStore::new(dir.path()));
            store.set("selected-seats", &["C-3-03".to_owned()]).unwrap();
        }
        let reader = crate::JsonFileStore::new(dir.path());
        assert_eq!(reader.get("selected-seats"), ["C-3-03"]);
    }
}
