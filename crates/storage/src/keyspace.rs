//! Keyspace: the data a store serves
//!
//! Holds the key → value map together with the state the OCC layer reads at
//! commit time: the expiration index, the watch set and the dirty flag.
//!
//! ## Touch Log
//!
//! Every write (including the lazy eviction of an expired key) appends the
//! key to a touch log. The owning [`Store`](crate::Store) drains the log
//! after each operation and decides, based on the operation's origin,
//! whether touched watched keys mark the keyspace dirty.

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};
use strata_core::{Clock, Value, WatchState};

use crate::ttl::ExpirationIndex;

/// Remaining time-to-live of a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ttl {
    /// Key does not exist
    Missing,
    /// Key exists and has no deadline
    Persistent,
    /// Key expires in this many milliseconds
    Millis(u64),
}

/// In-memory keyspace
pub struct Keyspace {
    data: FxHashMap<String, Value>,
    expires: ExpirationIndex,
    watching: FxHashSet<String>,
    dirty: bool,
    touched: Vec<String>,
    clock: Arc<dyn Clock>,
}

impl Keyspace {
    /// Create an empty keyspace driven by `clock`
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            data: FxHashMap::default(),
            expires: ExpirationIndex::new(),
            watching: FxHashSet::default(),
            dirty: false,
            touched: Vec::new(),
            clock,
        }
    }

    /// Current time according to the keyspace clock
    pub fn now_millis(&self) -> u64 {
        self.clock.now_millis()
    }

    /// Read-only view of the expiration index
    pub fn expires(&self) -> &ExpirationIndex {
        &self.expires
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Get the value stored at `key`, evicting it first if it has expired
    pub fn get(&mut self, key: &str) -> Option<&Value> {
        self.evict_if_expired(key);
        self.data.get(key)
    }

    /// True if `key` holds a live value
    pub fn contains_key(&mut self, key: &str) -> bool {
        self.evict_if_expired(key);
        self.data.contains_key(key)
    }

    /// Remaining time-to-live for `key`
    pub fn remaining_ttl(&mut self, key: &str) -> Ttl {
        if !self.contains_key(key) {
            return Ttl::Missing;
        }
        match self.expires.deadline(key) {
            Some(deadline) => Ttl::Millis(deadline.saturating_sub(self.now_millis())),
            None => Ttl::Persistent,
        }
    }

    /// Number of stored keys, including expired keys not yet evicted
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if nothing is stored
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    // ========================================================================
    // Writes
    // ========================================================================

    /// Store `value` at `key`, discarding any previous deadline
    pub fn set(&mut self, key: &str, value: Value) {
        self.expires.remove(key);
        self.data.insert(key.to_string(), value);
        self.touch(key);
    }

    /// Store `value` at `key`, keeping any live deadline
    ///
    /// Used by read-modify-write commands (INCR, APPEND, list pushes).
    pub fn replace(&mut self, key: &str, value: Value) {
        self.evict_if_expired(key);
        self.data.insert(key.to_string(), value);
        self.touch(key);
    }

    /// Remove `key`, returning its live value
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.evict_if_expired(key);
        let removed = self.data.remove(key);
        if removed.is_some() {
            self.expires.remove(key);
            self.touch(key);
        }
        removed
    }

    /// Set an absolute deadline on an existing key
    ///
    /// Returns `false` if the key does not exist.
    pub fn expire_at(&mut self, key: &str, deadline_millis: u64) -> bool {
        if !self.contains_key(key) {
            return false;
        }
        self.expires.set_deadline(key, deadline_millis);
        self.touch(key);
        true
    }

    /// Remove the deadline from `key`
    ///
    /// Returns `true` only if the key existed and had a deadline.
    pub fn persist(&mut self, key: &str) -> bool {
        if !self.contains_key(key) {
            return false;
        }
        let had_deadline = self.expires.remove(key).is_some();
        if had_deadline {
            self.touch(key);
        }
        had_deadline
    }

    /// Evict every key whose deadline has passed
    ///
    /// Returns the number of keys evicted.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.now_millis();
        let expired = self.expires.expired_keys(now);
        for key in &expired {
            self.expires.remove(key);
            self.data.remove(key);
            self.touch(key);
        }
        expired.len()
    }

    fn evict_if_expired(&mut self, key: &str) -> bool {
        if !self.expires.is_expired(key, self.now_millis()) {
            return false;
        }
        self.expires.remove(key);
        self.data.remove(key);
        self.touch(key);
        true
    }

    fn touch(&mut self, key: &str) {
        self.touched.push(key.to_string());
    }

    /// Drain the keys written since the last drain
    pub fn take_touched(&mut self) -> Vec<String> {
        std::mem::take(&mut self.touched)
    }

    // ========================================================================
    // Watch state
    // ========================================================================

    /// Start watching `key`
    pub fn watch(&mut self, key: &str) {
        if !self.watching.contains(key) {
            self.watching.insert(key.to_string());
        }
    }

    /// True if `key` is in the watch set
    pub fn is_watched(&self, key: &str) -> bool {
        self.watching.contains(key)
    }

    /// Set or clear the dirty flag
    pub fn set_dirty(&mut self, dirty: bool) {
        self.dirty = dirty;
    }

    /// Mark the keyspace dirty if any of `keys` is watched
    ///
    /// Returns `true` if the flag was raised by this call.
    pub fn mark_dirty_if_watched(&mut self, keys: &[String]) -> bool {
        if self.dirty || self.watching.is_empty() {
            return false;
        }
        if keys.iter().any(|key| self.watching.contains(key)) {
            self.dirty = true;
            return true;
        }
        false
    }
}

impl WatchState for Keyspace {
    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn watched_keys(&self) -> impl Iterator<Item = &str> {
        self.watching.iter().map(String::as_str)
    }

    fn has_expiry(&self, key: &str) -> bool {
        self.expires.has(key)
    }

    fn is_expired(&self, key: &str) -> bool {
        self.expires.is_expired(key, self.now_millis())
    }

    fn reset_watch(&mut self) {
        self.dirty = false;
        self.watching.clear();
    }
}
