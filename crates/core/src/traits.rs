//! Traits at the seam between the store and the OCC layer

/// Watch bookkeeping validated when a pipeline commits
///
/// The store owns this state. The commit path reads it and, only when the
/// transaction is aborted, resets it through [`WatchState::reset_watch`].
pub trait WatchState {
    /// True once a watched key was written through a direct path
    fn is_dirty(&self) -> bool;

    /// Keys currently being watched
    fn watched_keys(&self) -> impl Iterator<Item = &str>;

    /// True if `key` has an expiry deadline registered
    fn has_expiry(&self, key: &str) -> bool;

    /// True if `key` has a deadline that is at or before the current time
    fn is_expired(&self, key: &str) -> bool;

    /// Clear the dirty flag and forget every watched key
    fn reset_watch(&mut self);
}
