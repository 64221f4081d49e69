//! Commit-time validation of the watch set
//!
//! A batch is stale if, since the keys were watched, either
//! - a watched key was written through a direct path (the dirty flag), or
//! - a watched key has passed its expiry deadline.
//!
//! Expiration is passive: an expired key may not have been evicted yet, so
//! no write ever happened and the dirty flag alone would miss it. Both
//! sources are checked.

use strata_core::WatchState;

/// Why a watch set failed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictType {
    /// The dirty flag was set by a write to a watched key
    WatchedKeyModified,
    /// A watched key's deadline has passed
    WatchedKeyExpired {
        /// The first expired key found
        key: String,
    },
}

/// Outcome of validating a watch set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// No conflict; the batch may execute
    Clean,
    /// The batch must be aborted
    Stale(ConflictType),
}

impl ValidationResult {
    /// True if the batch must be aborted
    pub fn is_stale(&self) -> bool {
        matches!(self, ValidationResult::Stale(_))
    }

    /// The conflict, if any
    pub fn conflict(&self) -> Option<&ConflictType> {
        match self {
            ValidationResult::Clean => None,
            ValidationResult::Stale(conflict) => Some(conflict),
        }
    }
}

/// Check the watch state for staleness without modifying it
///
/// The dirty flag is checked first; otherwise the first watched key that
/// has an expired deadline is reported.
pub fn validate_watch_set<S: WatchState>(state: &S) -> ValidationResult {
    if state.is_dirty() {
        return ValidationResult::Stale(ConflictType::WatchedKeyModified);
    }

    let expired = state
        .watched_keys()
        .find(|key| state.has_expiry(key) && state.is_expired(key));
    match expired {
        Some(key) => ValidationResult::Stale(ConflictType::WatchedKeyExpired {
            key: key.to_string(),
        }),
        None => ValidationResult::Clean,
    }
}

/// Reset watch state after an abort: clear the dirty flag and the watch set
pub fn abort_watch<S: WatchState>(state: &mut S) {
    state.reset_watch();
}
