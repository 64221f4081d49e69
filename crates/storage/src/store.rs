//! Shared store
//!
//! [`Store`] guards a [`Keyspace`] with a single mutex. Every command
//! invocation, the commit-time staleness check and the abort reset each run
//! under one lock acquisition, so each of them is atomic with respect to the
//! others.
//!
//! ## Dirty Tracking
//!
//! After each closure passed to [`Store::with_keyspace`] returns, the keys it
//! touched are drained. If the caller declared [`Origin::Direct`], any
//! touched key that is being watched raises the dirty flag. Writes made by a
//! committing pipeline ([`Origin::Pipelined`]) never do.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use strata_core::{Clock, SystemClock, Value, WatchState};

use crate::keyspace::Keyspace;

/// Which path a keyspace access comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// A standalone command issued outside any pipeline commit
    Direct,
    /// A command executed as part of a committed pipeline batch
    Pipelined,
}

/// Mutex-guarded keyspace shared by direct callers and pipelines
///
/// # Thread Safety
///
/// The lock is held only for the duration of one closure. Callers running
/// inside async code must not hold it across an `.await`; `with_keyspace`
/// makes that impossible by construction.
pub struct Store {
    keyspace: Mutex<Keyspace>,
    closed: AtomicBool,
}

impl Store {
    /// Create an empty store driven by `clock`
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            keyspace: Mutex::new(Keyspace::new(clock)),
            closed: AtomicBool::new(false),
        }
    }

    /// Run `f` against the keyspace under the store lock
    pub fn with_keyspace<T>(&self, origin: Origin, f: impl FnOnce(&mut Keyspace) -> T) -> T {
        let mut keyspace = self.keyspace.lock();
        let out = f(&mut keyspace);
        let touched = keyspace.take_touched();
        if origin == Origin::Direct && keyspace.mark_dirty_if_watched(&touched) {
            tracing::debug!(keys = ?touched, "Watched key modified, transaction marked dirty");
        }
        out
    }

    /// Load initial entries without affecting watch state
    pub fn seed<I, K>(&self, entries: I)
    where
        I: IntoIterator<Item = (K, Value)>,
        K: AsRef<str>,
    {
        self.with_keyspace(Origin::Pipelined, |ks| {
            for (key, value) in entries {
                ks.set(key.as_ref(), value);
            }
        });
    }

    // ========================================================================
    // Watch state
    // ========================================================================

    /// Add keys to the watch set
    pub fn watch<I, K>(&self, keys: I)
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        self.with_keyspace(Origin::Direct, |ks| {
            for key in keys {
                ks.watch(key.as_ref());
            }
        });
    }

    /// Forget every watched key and clear the dirty flag
    pub fn unwatch(&self) {
        self.with_keyspace(Origin::Direct, |ks| ks.reset_watch());
    }

    /// Snapshot of the watched keys
    pub fn watching(&self) -> Vec<String> {
        self.with_keyspace(Origin::Direct, |ks| {
            ks.watched_keys().map(str::to_string).collect()
        })
    }

    /// Current value of the dirty flag
    pub fn is_dirty(&self) -> bool {
        self.with_keyspace(Origin::Direct, |ks| ks.is_dirty())
    }

    /// Set the dirty flag, as an external writer would
    pub fn set_dirty(&self, dirty: bool) {
        self.with_keyspace(Origin::Direct, |ks| ks.set_dirty(dirty));
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Evict every expired key through the direct path
    ///
    /// Evicting a watched key marks the keyspace dirty.
    pub fn purge_expired(&self) -> usize {
        self.with_keyspace(Origin::Direct, |ks| ks.purge_expired())
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.with_keyspace(Origin::Direct, |ks| ks.len())
    }

    /// True if nothing is stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stop accepting new work
    pub fn close(&self) {
        if !self.closed.swap(true, Ordering::AcqRel) {
            tracing::info!("Store closed");
        }
    }

    /// True once [`Store::close`] has been called
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}
