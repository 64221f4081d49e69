//! Expiration index
//!
//! Maps keys to absolute deadlines (milliseconds since the Unix epoch). The
//! index never evicts on its own; the keyspace consults it on access and
//! during explicit purges.

use rustc_hash::FxHashMap;

/// Key → expiry deadline
#[derive(Debug, Default, Clone)]
pub struct ExpirationIndex {
    deadlines: FxHashMap<String, u64>,
}

impl ExpirationIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace the deadline for `key`
    pub fn set_deadline(&mut self, key: &str, deadline_millis: u64) {
        if let Some(existing) = self.deadlines.get_mut(key) {
            *existing = deadline_millis;
        } else {
            self.deadlines.insert(key.to_string(), deadline_millis);
        }
    }

    /// Drop the deadline for `key`, returning it if one was set
    pub fn remove(&mut self, key: &str) -> Option<u64> {
        self.deadlines.remove(key)
    }

    /// True if `key` has a deadline
    pub fn has(&self, key: &str) -> bool {
        self.deadlines.contains_key(key)
    }

    /// Deadline for `key`, if any
    pub fn deadline(&self, key: &str) -> Option<u64> {
        self.deadlines.get(key).copied()
    }

    /// True if `key` has a deadline at or before `now_millis`
    ///
    /// Keys without a deadline never expire.
    pub fn is_expired(&self, key: &str, now_millis: u64) -> bool {
        self.deadlines
            .get(key)
            .is_some_and(|deadline| *deadline <= now_millis)
    }

    /// All keys whose deadline has passed at `now_millis`
    pub fn expired_keys(&self, now_millis: u64) -> Vec<String> {
        self.deadlines
            .iter()
            .filter(|(_, deadline)| **deadline <= now_millis)
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Number of keys with a deadline
    pub fn len(&self) -> usize {
        self.deadlines.len()
    }

    /// True if no key has a deadline
    pub fn is_empty(&self) -> bool {
        self.deadlines.is_empty()
    }
}
